// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binomial-tree gather, the mirror image of scatter.
//!
//! Masks ascend. In the round for `mask`, every relative rank whose
//! lowest set bit is `mask` sends everything it has accumulated to
//! `relative − mask`. Leaves start with one chunk `c = ceil(size / P)`.

use super::{ascending_masks, SimContext};
use crate::{CollectiveError, Round, Schedule};
use cost_model::TrafficPattern;

/// Relative ranks sending in the round for `mask`: those whose lowest
/// set bit equals `mask`.
pub(crate) fn senders(comm_size: usize, mask: usize) -> impl Iterator<Item = usize> {
    (1..comm_size).filter(move |rel| rel & rel.wrapping_neg() == mask)
}

pub fn binomial<'t>(ctx: &SimContext<'t>) -> Result<Schedule<'t>, CollectiveError> {
    let p = ctx.comm_size;
    // The root ends up holding chunk · P bytes.
    ctx.padded_size()?;
    let mut held = vec![ctx.chunk(); p];

    let mut rounds = Vec::new();
    for (index, mask) in ascending_masks(p).enumerate() {
        let mut round = Round::new(index, mask, TrafficPattern::Ping);
        for rel in senders(p, mask) {
            let parent = rel - mask;
            round.push(ctx.pair(rel, parent)?, held[rel]);
            held[parent] += held[rel];
        }
        tracing::debug!("gather mask {}: {} transfers", mask, round.transfers.len());
        rounds.push(round);
    }

    Ok(ctx.schedule(rounds))
}
