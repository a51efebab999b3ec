// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Contention analysis: group a round's pairs into equivalence classes.
//!
//! Counts are raw. Algorithms that simulate both ends of every exchange
//! see each transfer twice and must halve the count themselves.

use crate::{CommPair, ContentionKey};
use std::collections::HashMap;

/// Pairs in one round that compete for the same resource.
#[derive(Debug, Clone)]
pub struct ContentionClass<'p, 't> {
    /// First pair of the class in round order.
    pub representative: &'p CommPair<'t>,
    /// Number of pairs in the class.
    pub count: usize,
    /// Indices of the member pairs in the input slice.
    pub members: Vec<usize>,
}

impl ContentionClass<'_, '_> {
    /// Count after halving for doubly-simulated rounds.
    pub fn physical_count(&self, duplicated: bool) -> usize {
        if duplicated {
            (self.count / 2).max(1)
        } else {
            self.count
        }
    }
}

/// Groups `pairs` by physical equality, in first-seen order.
pub fn analyze<'p, 't: 'p, I>(pairs: I) -> Vec<ContentionClass<'p, 't>>
where
    I: IntoIterator<Item = &'p CommPair<'t>>,
{
    let mut index: HashMap<ContentionKey, usize> = HashMap::new();
    let mut classes: Vec<ContentionClass<'p, 't>> = Vec::new();
    let mut total = 0usize;

    for (i, pair) in pairs.into_iter().enumerate() {
        total += 1;
        let key = pair.contention_key();
        match index.get(&key) {
            Some(&c) => {
                classes[c].count += 1;
                classes[c].members.push(i);
            }
            None => {
                index.insert(key, classes.len());
                classes.push(ContentionClass {
                    representative: pair,
                    count: 1,
                    members: vec![i],
                });
            }
        }
    }

    tracing::trace!("contention: {} pairs in {} classes", total, classes.len());
    classes
}

/// Largest class count in the round, 0 for an empty round.
pub fn max_contention(classes: &[ContentionClass<'_, '_>]) -> usize {
    classes.iter().map(|c| c.count).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use topology::{build_topology, Arrangement, Placed, Placement, Platform, Topology};

    fn topo() -> Topology<Placed> {
        build_topology(
            Platform::Df,
            "g1r1n[01-04]",
            8,
            Arrangement::nodes(Placement::Block),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_round() {
        let empty: Vec<CommPair<'_>> = Vec::new();
        let classes = analyze(&empty);
        assert!(classes.is_empty());
        assert_eq!(max_contention(&classes), 0);
    }

    #[test]
    fn test_groups_by_semantic_equality() {
        let t = topo();
        let pairs = vec![
            CommPair::direct(&t, 0, 8).unwrap(),
            CommPair::direct(&t, 1, 2).unwrap(),
            CommPair::direct(&t, 9, 3).unwrap(),
            CommPair::direct(&t, 16, 24).unwrap(),
            CommPair::direct(&t, 0, 3).unwrap(),
        ];
        let classes = analyze(&pairs);
        assert_eq!(classes.len(), 3);
        assert_eq!(classes[0].count, 2);
        assert_eq!(classes[0].members, vec![0, 2]);
        assert_eq!(classes[1].count, 2);
        assert_eq!(classes[1].members, vec![1, 4]);
        assert_eq!(classes[2].count, 1);
        assert_eq!(max_contention(&classes), 2);
    }

    #[test]
    fn test_physical_count() {
        let t = topo();
        let pairs = vec![
            CommPair::direct(&t, 0, 8).unwrap(),
            CommPair::direct(&t, 8, 0).unwrap(),
        ];
        let classes = analyze(&pairs);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].physical_count(true), 1);
        assert_eq!(classes[0].physical_count(false), 2);
    }
}
