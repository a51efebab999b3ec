// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property-based tests for node-list expansion and rank placement.

use proptest::prelude::*;
use topology::{build_topology, parse_node_list, Arrangement, Placement, Platform};

// ── Strategies ─────────────────────────────────────────────────────

/// A list of disjoint `[lo-hi]` ranges over node numbers, plus the
/// expected expanded count.
fn arb_ranges() -> impl Strategy<Value = (Vec<(u32, u32)>, usize)> {
    prop::collection::vec(0u32..5, 1..5).prop_map(|lens| {
        let mut ranges = Vec::new();
        let mut next = 1u32;
        let mut total = 0usize;
        for len in lens {
            ranges.push((next, next + len));
            total += (len + 1) as usize;
            next += len + 2;
        }
        (ranges, total)
    })
}

fn render(prefix: &str, ranges: &[(u32, u32)]) -> String {
    let items: Vec<_> = ranges
        .iter()
        .map(|&(lo, hi)| {
            if lo == hi {
                format!("{lo:02}")
            } else {
                format!("{lo:02}-{hi:02}")
            }
        })
        .collect();
    format!("{prefix}[{}]", items.join(","))
}

// ── Property tests ─────────────────────────────────────────────────

proptest! {
    /// Every expanded name matches the DF pattern and the count equals
    /// the number of range members.
    #[test]
    fn expansion_count_matches((ranges, total) in arb_ranges(), group in 1u32..20) {
        let spec = render(&format!("g{group}r1n"), &ranges);
        let nodes = parse_node_list(&spec, Platform::Df).unwrap();
        prop_assert_eq!(nodes.len(), total);
        let profile = Platform::Df.profile().unwrap();
        for n in &nodes {
            prop_assert!(profile.node_regex().is_match(n.as_str()));
        }
    }

    /// Adding a second top-level token adds exactly its own count.
    #[test]
    fn expansion_is_additive((a, na) in arb_ranges(), (b, nb) in arb_ranges()) {
        let spec = format!("{},{}", render("g1r1n", &a), render("g2r1n", &b));
        let nodes = parse_node_list(&spec, Platform::Df).unwrap();
        prop_assert_eq!(nodes.len(), na + nb);
    }

    /// CYCLIC puts rank r on node r % K, BLOCK on node r / ppn.
    #[test]
    fn placement_node_rule(k in 1usize..6, ppn in 1usize..9) {
        let spec = format!("g1r1n[01-{k:02}]");
        let cyclic = build_topology(Platform::Df, &spec, ppn, Arrangement::nodes(Placement::Cyclic)).unwrap();
        let block = build_topology(Platform::Df, &spec, ppn, Arrangement::nodes(Placement::Block)).unwrap();
        prop_assert_eq!(cyclic.node_count(), k);
        for rank in 0..ppn * k {
            prop_assert_eq!(cyclic.node_index_of(rank).unwrap(), rank % k);
            prop_assert_eq!(block.node_index_of(rank).unwrap(), rank / ppn);
        }
    }

    /// No two ranks share a (node, core) binding.
    #[test]
    fn bindings_are_distinct(k in 1usize..4, ppn in 1usize..31, cyclic_cores in any::<bool>()) {
        let core = if cyclic_cores { Placement::Cyclic } else { Placement::Block };
        let spec = format!("g1r1n[01-{k:02}]");
        let topo = build_topology(Platform::Df, &spec, ppn, Arrangement::new(Placement::Cyclic, core)).unwrap();
        let mut seen = std::collections::HashSet::new();
        for (_, b) in topo.iter_bindings() {
            prop_assert!(b.core < 30);
            prop_assert!(seen.insert((b.node, b.core)));
        }
        prop_assert_eq!(seen.len(), ppn * k);
    }
}
