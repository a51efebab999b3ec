// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binomial-tree broadcast.
//!
//! ```text
//! P = 8, root 0        mask 4:  0 → 4
//!                      mask 2:  0 → 2, 4 → 6
//!                      mask 1:  0 → 1, 2 → 3, 4 → 5, 6 → 7
//! ```
//!
//! Senders in a round are the ranks that held the data when the round
//! started; each sends the full message to `relative + mask` if that
//! index exists and does not hold the data yet.

use super::{descending_masks, SimContext};
use crate::{CollectiveError, Round, Schedule};
use cost_model::TrafficPattern;

pub fn binomial<'t>(ctx: &SimContext<'t>) -> Result<Schedule<'t>, CollectiveError> {
    let p = ctx.comm_size;
    let mut has_data = vec![false; p];
    has_data[0] = true;

    let mut rounds = Vec::new();
    for (index, mask) in descending_masks(p).enumerate() {
        let mut round = Round::new(index, mask, TrafficPattern::Ping);
        let holders: Vec<usize> = (0..p).filter(|&rel| has_data[rel]).collect();
        for rel in holders {
            let dst = rel + mask;
            if dst < p && !has_data[dst] {
                round.push(ctx.pair(rel, dst)?, ctx.message_size);
                has_data[dst] = true;
            }
        }
        tracing::debug!("bcast mask {}: {} transfers", mask, round.transfers.len());
        rounds.push(round);
    }

    Ok(ctx.schedule(rounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{ctx, topo};
    use crate::{AlgorithmKind, OperationKind};

    fn receivers(s: &Schedule<'_>) -> Vec<usize> {
        s.iter_rounds()
            .flat_map(|r| r.pairs().map(|p| p.receiver()))
            .collect()
    }

    #[test]
    fn test_two_nodes_ppn8() {
        let t = topo(2, 8);
        let c = ctx(&t, OperationKind::Bcast, AlgorithmKind::Binomial, 0, 1);
        let s = binomial(&c).unwrap();
        assert_eq!(s.num_rounds(), 4);
        let first = &s.rounds[0];
        assert_eq!(first.mask, 8);
        assert_eq!(first.transfers.len(), 1);
        let pair = &first.transfers[0].pair;
        assert_eq!((pair.sender(), pair.receiver()), (0, 8));
        assert!(pair.is_inter_node());
    }

    #[test]
    fn test_every_rank_receives_once() {
        for p in 1..=13 {
            let t = topo(1, p);
            let c = ctx(&t, OperationKind::Bcast, AlgorithmKind::Binomial, 0, 64);
            let s = binomial(&c).unwrap();
            let mut got = receivers(&s);
            got.sort_unstable();
            assert_eq!(got, (1..p).collect::<Vec<_>>(), "P = {p}");
        }
    }

    #[test]
    fn test_round_count_is_ceil_log2() {
        for (p, expected) in [(1, 0), (2, 1), (3, 2), (5, 3), (8, 3), (9, 4), (16, 4)] {
            let t = topo(1, p);
            let c = ctx(&t, OperationKind::Bcast, AlgorithmKind::Binomial, 0, 1);
            assert_eq!(binomial(&c).unwrap().num_rounds(), expected, "P = {p}");
        }
    }

    #[test]
    fn test_non_zero_root() {
        let t = topo(1, 6);
        let c = ctx(&t, OperationKind::Bcast, AlgorithmKind::Binomial, 4, 1);
        let s = binomial(&c).unwrap();
        let first = &s.rounds[0].transfers[0].pair;
        // relative 0 → 4 is rank 4 → rank 2.
        assert_eq!((first.sender(), first.receiver()), (4, 2));
        let mut got = receivers(&s);
        got.sort_unstable();
        assert_eq!(got, vec![0, 1, 2, 3, 5]);
    }

    #[test]
    fn test_full_message_every_send() {
        let t = topo(1, 8);
        let c = ctx(&t, OperationKind::Bcast, AlgorithmKind::Binomial, 0, 4096);
        let s = binomial(&c).unwrap();
        assert!(s
            .iter_rounds()
            .flat_map(|r| r.transfers.iter())
            .all(|t| t.bytes == 4096));
    }
}
