// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Recursive-doubling allgather.
//!
//! In the round for `mask` every rank exchanges its accumulated block of
//! `size · mask` bytes with the rank whose relative index differs in
//! exactly that bit. Both ends of each exchange are simulated, so every
//! physical transfer appears twice in the round and the round is marked
//! `duplicated`; contention counts are halved when it is costed.

use super::{ascending_masks, SimContext};
use crate::{CollectiveError, Round, Schedule};
use cost_model::TrafficPattern;

pub fn recursive_doubling<'t>(ctx: &SimContext<'t>) -> Result<Schedule<'t>, CollectiveError> {
    let p = ctx.comm_size;
    let mut rounds = Vec::new();
    for (index, mask) in ascending_masks(p).enumerate() {
        let mut round = Round::new(index, mask, TrafficPattern::Duplex).duplicated();
        let bytes = ctx.message_size.saturating_mul(mask as u64);
        for rank in 0..p {
            let rel = ctx.relative(rank);
            let partner = rel ^ mask;
            if partner < p {
                round.push(ctx.pair(rel, partner)?, bytes);
            }
        }
        tracing::debug!(
            "allgather mask {}: {} simulated transfers",
            mask,
            round.transfers.len()
        );
        rounds.push(round);
    }
    Ok(ctx.schedule(rounds))
}
