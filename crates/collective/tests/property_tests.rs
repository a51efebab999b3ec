// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property-based tests for the generated schedules.

use collective::{AlgorithmKind, AlgorithmParam, CollectiveEngine, OperationKind};
use comm_model::analyze;
use cost_model::{CostError, CostModel};
use proptest::prelude::*;
use std::sync::Arc;
use topology::{build_topology, Arrangement, Placement, Platform};

struct Flat;

impl CostModel for Flat {
    fn latency(&self, _size: u64, _key: &str) -> Result<f64, CostError> {
        Ok(1.0)
    }

    fn bandwidth(&self, _size: u64, _key: &str) -> Result<f64, CostError> {
        Ok(1.0)
    }
}

fn arb_placement() -> impl Strategy<Value = Placement> {
    prop_oneof![Just(Placement::Block), Just(Placement::Cyclic)]
}

fn ceil_log2(p: usize) -> usize {
    p.next_power_of_two().trailing_zeros() as usize
}

proptest! {
    #[test]
    fn prop_broadcast_reaches_everyone_once(
        nodes in 1usize..5,
        ppn in 1usize..9,
        node_policy in arb_placement(),
        core_policy in arb_placement(),
        root_seed in any::<usize>(),
    ) {
        let spec = format!("g1r1n[01-{nodes:02}]");
        let topo = build_topology(Platform::Df, &spec, ppn, Arrangement::new(node_policy, core_policy)).unwrap();
        let p = topo.rank_count();
        let root = root_seed % p;
        let engine = CollectiveEngine::new(Arc::new(Flat));
        let s = engine
            .simulate(&topo, OperationKind::Bcast, AlgorithmKind::Binomial, 1, AlgorithmParam::Root(root as i64))
            .unwrap();

        prop_assert_eq!(s.num_rounds(), ceil_log2(p));
        let mut received = vec![0usize; p];
        for r in s.iter_rounds() {
            for t in &r.transfers {
                received[t.pair.receiver()] += 1;
            }
        }
        for (rank, n) in received.into_iter().enumerate() {
            prop_assert_eq!(n, usize::from(rank != root), "rank {}", rank);
        }
    }

    #[test]
    fn prop_allgather_raw_counts_are_even(
        nodes in 1usize..5,
        ppn in 1usize..9,
        core_policy in arb_placement(),
    ) {
        let spec = format!("g1r1n[01-{nodes:02}]");
        let topo = build_topology(Platform::Df, &spec, ppn, Arrangement::new(Placement::Block, core_policy)).unwrap();
        let engine = CollectiveEngine::new(Arc::new(Flat));
        let s = engine
            .simulate(&topo, OperationKind::Allgather, AlgorithmKind::RecursiveDoubling, 8, AlgorithmParam::Absent)
            .unwrap();
        for r in s.iter_rounds() {
            for class in analyze(r.pairs()) {
                prop_assert_eq!(class.count % 2, 0);
            }
        }
    }

    #[test]
    fn prop_total_is_sum_of_rounds(
        size in 1u64..100_000,
        ppn in 1usize..9,
    ) {
        let topo = build_topology(Platform::Df, "g1r1n[01-02]", ppn, Arrangement::nodes(Placement::Cyclic)).unwrap();
        let engine = CollectiveEngine::new(Arc::new(Flat));
        let p = engine
            .predict_detailed(&topo, OperationKind::Reduce, AlgorithmKind::Binomial, size, AlgorithmParam::Root(0))
            .unwrap();
        let sum: f64 = p.rounds.iter().map(|r| r.cost).sum();
        prop_assert_eq!(p.total_cost, sum);
        prop_assert!(p.rounds.iter().all(|r| r.cost >= 1.0));
    }
}
