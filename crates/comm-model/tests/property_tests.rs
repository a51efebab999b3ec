// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property-based tests for communication-pair equality laws.

use comm_model::{analyze, CommPair};
use proptest::prelude::*;
use topology::{build_topology, Arrangement, Placed, Placement, Platform, Topology};

const RANKS: usize = 48;

/// Four nodes across two racks and two groups, 12 ranks each.
fn topo() -> Topology<Placed> {
    build_topology(
        Platform::Df,
        "g1r1n[01-02],g1r2n01,g2r1n01",
        12,
        Arrangement::new(Placement::Cyclic, Placement::Cyclic),
    )
    .unwrap()
}

fn arb_edge() -> impl Strategy<Value = (usize, usize)> {
    (0..RANKS, 0..RANKS).prop_filter("distinct ranks", |(a, b)| a != b)
}

proptest! {
    /// Building a pair from either direction yields equal pairs.
    #[test]
    fn orientation_is_irrelevant((a, b) in arb_edge()) {
        let t = topo();
        let fwd = CommPair::direct(&t, a, b).unwrap();
        let back = CommPair::direct(&t, b, a).unwrap();
        prop_assert_eq!(&fwd, &back);
        prop_assert_eq!(fwd.sender(), a);
        prop_assert_eq!(back.sender(), b);
        prop_assert_eq!(&fwd, &fwd);
    }

    /// Equality is symmetric and transitive over arbitrary triples.
    #[test]
    fn equality_is_an_equivalence(e1 in arb_edge(), e2 in arb_edge(), e3 in arb_edge()) {
        let t = topo();
        let p1 = CommPair::direct(&t, e1.0, e1.1).unwrap();
        let p2 = CommPair::direct(&t, e2.0, e2.1).unwrap();
        let p3 = CommPair::direct(&t, e3.0, e3.1).unwrap();
        prop_assert_eq!(p1 == p2, p2 == p1);
        if p1 == p2 && p2 == p3 {
            prop_assert_eq!(&p1, &p3);
        }
    }

    /// Relays over equal transfers from the same unit are equal.
    #[test]
    fn relay_equality_follows_inner((a, b) in arb_edge(), via in 0..RANKS) {
        let t = topo();
        let r1 = CommPair::relay(&t, via, CommPair::direct(&t, a, b).unwrap()).unwrap();
        let r2 = CommPair::relay(&t, via, CommPair::direct(&t, b, a).unwrap()).unwrap();
        prop_assert_eq!(&r1, &r2);
        prop_assert_ne!(&r1, &CommPair::direct(&t, a, b).unwrap());
    }

    /// Class counts sum to the number of pairs, and every member equals
    /// its representative.
    #[test]
    fn classes_partition_the_round(edges in prop::collection::vec(arb_edge(), 0..40)) {
        let t = topo();
        let pairs: Vec<_> = edges
            .iter()
            .map(|&(a, b)| CommPair::direct(&t, a, b).unwrap())
            .collect();
        let classes = analyze(&pairs);
        prop_assert_eq!(classes.iter().map(|c| c.count).sum::<usize>(), pairs.len());
        for class in &classes {
            for &m in &class.members {
                prop_assert_eq!(&pairs[m], class.representative);
            }
        }
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                prop_assert_ne!(a.representative, b.representative);
            }
        }
    }
}
