// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binomial-tree reduce, the mirror image of broadcast.
//!
//! Same tree as the binomial gather, but partial results are combined
//! at each step, so every send carries the full message.

use super::gather::senders;
use super::{ascending_masks, SimContext};
use crate::{CollectiveError, Round, Schedule};
use cost_model::TrafficPattern;

pub fn binomial<'t>(ctx: &SimContext<'t>) -> Result<Schedule<'t>, CollectiveError> {
    let p = ctx.comm_size;
    let mut rounds = Vec::new();
    for (index, mask) in ascending_masks(p).enumerate() {
        let mut round = Round::new(index, mask, TrafficPattern::Ping);
        for rel in senders(p, mask) {
            round.push(ctx.pair(rel, rel - mask)?, ctx.message_size);
        }
        tracing::debug!("reduce mask {}: {} transfers", mask, round.transfers.len());
        rounds.push(round);
    }
    Ok(ctx.schedule(rounds))
}
