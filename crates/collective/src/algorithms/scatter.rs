// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binomial-tree scatter.
//!
//! Same tree as the binomial broadcast, but each holder carries only the
//! chunks of its own subtree. With `c = ceil(size / P)` the root starts
//! with `c · P` bytes. A holder with subtree `s` sending at `mask` hands
//! `s − c·mask` bytes to its child and keeps `c·mask`.

use super::{descending_masks, SimContext};
use crate::{CollectiveError, Round, Schedule};
use cost_model::TrafficPattern;

pub fn binomial<'t>(ctx: &SimContext<'t>) -> Result<Schedule<'t>, CollectiveError> {
    let p = ctx.comm_size;
    let chunk = ctx.chunk();
    // Subtree bytes held by each relative rank; `None` until received.
    let mut subtree: Vec<Option<u64>> = vec![None; p];
    subtree[0] = Some(ctx.padded_size()?);

    let mut rounds = Vec::new();
    for (index, mask) in descending_masks(p).enumerate() {
        let mut round = Round::new(index, mask, TrafficPattern::Ping);
        // mask < P, so this stays below the padded size.
        let keep = chunk * mask as u64;
        let holders: Vec<(usize, u64)> = subtree
            .iter()
            .enumerate()
            .filter_map(|(rel, s)| s.map(|held| (rel, held)))
            .collect();
        for (rel, held) in holders {
            let dst = rel + mask;
            if dst >= p || subtree[dst].is_some() {
                continue;
            }
            let sent = held.saturating_sub(keep);
            round.push(ctx.pair(rel, dst)?, sent);
            subtree[rel] = Some(keep.min(held));
            subtree[dst] = Some(sent);
        }
        tracing::debug!("scatter mask {}: {} transfers", mask, round.transfers.len());
        rounds.push(round);
    }

    Ok(ctx.schedule(rounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{ctx, topo};
    use crate::{AlgorithmKind, OperationKind};

    fn sends(s: &Schedule<'_>) -> Vec<(usize, usize, u64)> {
        s.iter_rounds()
            .flat_map(|r| {
                r.transfers
                    .iter()
                    .map(|t| (t.pair.sender(), t.pair.receiver(), t.bytes))
            })
            .collect()
    }

    #[test]
    fn test_power_of_two() {
        let t = topo(1, 8);
        let c = ctx(&t, OperationKind::Scatter, AlgorithmKind::Binomial, 0, 800);
        let s = binomial(&c).unwrap();
        assert_eq!(s.num_rounds(), 3);
        assert_eq!(
            sends(&s),
            vec![
                (0, 4, 400),
                (0, 2, 200),
                (4, 6, 200),
                (0, 1, 100),
                (2, 3, 100),
                (4, 5, 100),
                (6, 7, 100),
            ]
        );
    }

    #[test]
    fn test_uneven_communicator() {
        let t = topo(1, 5);
        let c = ctx(&t, OperationKind::Scatter, AlgorithmKind::Binomial, 0, 10);
        let s = binomial(&c).unwrap();
        // chunk 2, root holds 10.
        assert_eq!(
            sends(&s),
            vec![(0, 4, 2), (0, 2, 4), (0, 1, 2), (2, 3, 2)]
        );
    }

    #[test]
    fn test_every_rank_receives_its_share() {
        for p in 2..=12 {
            let t = topo(1, p);
            let c = ctx(&t, OperationKind::Scatter, AlgorithmKind::Binomial, 0, 64 * p as u64);
            let s = binomial(&c).unwrap();
            let total: u64 = s
                .iter_rounds()
                .flat_map(|r| r.transfers.iter())
                .filter(|t| t.pair.sender() == 0)
                .map(|t| t.bytes)
                .sum();
            // The root ships everything except its own chunk.
            assert_eq!(total, 64 * (p as u64 - 1), "P = {p}");
        }
    }

    #[test]
    fn test_rooted_relative_layout() {
        let t = topo(1, 4);
        let c = ctx(&t, OperationKind::Scatter, AlgorithmKind::Binomial, 2, 40);
        let s = binomial(&c).unwrap();
        assert_eq!(sends(&s), vec![(2, 0, 20), (2, 3, 10), (0, 1, 10)]);
    }
}
