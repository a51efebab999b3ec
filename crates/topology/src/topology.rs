// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Cluster topology: the parsed node list plus the rank binding table.
//!
//! # Type-State Pattern
//!
//! ```text
//! Topology<Unplaced>   : node list parsed, ppn checked, no ranks bound.
//!       │  .place(arrangement) / .place_n(..) / .place_explicit(..)
//!       ▼
//! Topology<Placed>     : every communicator rank bound to a (node, core).
//! ```
//!
//! Nodes stay immutable across the transition. The binding table is owned
//! by the placed topology, so rank queries are only available once the
//! placement has succeeded.

use crate::{parse_node_list, Arrangement, Node, Platform, TopologyError};
use std::collections::HashSet;
use std::fmt;

// ── Type-state markers ─────────────────────────────────────────────

/// Marker: nodes parsed, no ranks placed.
#[derive(Debug, Clone)]
pub struct Unplaced;

/// Marker: ranks bound to nodes and cores.
#[derive(Debug, Clone)]
pub struct Placed;

/// Sealed trait for topology states.
pub trait TopologyState: fmt::Debug + Clone {}
impl TopologyState for Unplaced {}
impl TopologyState for Placed {}

/// Where one rank lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Index into the topology's node list.
    pub node: usize,
    /// Physical core on that node.
    pub core: usize,
}

// ── Topology ───────────────────────────────────────────────────────

/// An ordered node list with a fixed processes-per-node count.
#[derive(Debug, Clone)]
pub struct Topology<S: TopologyState = Unplaced> {
    platform: Platform,
    nodes: Vec<Node>,
    ppn: usize,
    /// Indexed by rank; `None` for ranks outside the communicator.
    bindings: Vec<Option<Binding>>,
    arrangement: Option<Arrangement>,
    _state: std::marker::PhantomData<S>,
}

// ── Unplaced state ─────────────────────────────────────────────────

impl Topology<Unplaced> {
    /// Parses `node_spec` on `platform` and checks `ppn` against the
    /// platform's core count.
    pub fn new(platform: Platform, node_spec: &str, ppn: usize) -> Result<Self, TopologyError> {
        let profile = platform.profile()?;
        if ppn == 0 || ppn > profile.cores_per_node {
            return Err(TopologyError::range(
                "ppn",
                ppn as i64,
                format!("[1, {}]", profile.cores_per_node),
            ));
        }

        let nodes = parse_node_list(node_spec, platform)?
            .into_iter()
            .enumerate()
            .map(|(i, name)| Node::new(name, i, platform))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            "parsed {} {} nodes from '{}' (ppn {})",
            nodes.len(),
            platform,
            node_spec,
            ppn
        );

        Ok(Self {
            platform,
            nodes,
            ppn,
            bindings: Vec::new(),
            arrangement: None,
            _state: std::marker::PhantomData,
        })
    }

    /// Places all `ppn × node_count` ranks.
    pub fn place(self, arrangement: Arrangement) -> Result<Topology<Placed>, TopologyError> {
        let n = self.capacity();
        self.place_n(arrangement, n)
    }

    /// Places ranks `0..n` under `arrangement`.
    pub fn place_n(self, arrangement: Arrangement, n: usize) -> Result<Topology<Placed>, TopologyError> {
        let capacity = self.capacity();
        if n == 0 || n > capacity {
            return Err(TopologyError::range(
                "rank count",
                n as i64,
                format!("[1, {capacity}]"),
            ));
        }

        let profile = self.platform.profile()?;
        let core_order = arrangement.core.core_order(profile)?;
        let mut filled = vec![0usize; self.nodes.len()];
        let mut bindings = vec![None; capacity];

        for (rank, slot) in bindings.iter_mut().enumerate().take(n) {
            let node = arrangement
                .node
                .node_index(rank, self.ppn, self.nodes.len())?;
            let k = filled[node];
            let core = match core_order.get(k) {
                Some(&core) if k < self.ppn => core,
                _ => {
                    return Err(TopologyError::range(
                        "ranks per node",
                        (k + 1) as i64,
                        format!("at most {}", self.ppn),
                    ))
                }
            };
            filled[node] += 1;
            *slot = Some(Binding { node, core });
        }

        tracing::debug!("placed {} ranks with {}", n, arrangement);
        Ok(self.into_placed(bindings, Some(arrangement)))
    }

    /// Places an explicit rank list: the i-th listed rank goes to node
    /// `i / ppn`, core `i % ppn`.
    ///
    /// The list must be a permutation of `0..ranks.len()`.
    pub fn place_explicit(self, ranks: &[usize]) -> Result<Topology<Placed>, TopologyError> {
        let capacity = self.capacity();
        let n = ranks.len();
        if n == 0 || n > capacity {
            return Err(TopologyError::range(
                "rank count",
                n as i64,
                format!("[1, {capacity}]"),
            ));
        }

        let mut seen = HashSet::with_capacity(n);
        let mut bindings = vec![None; n];
        for (i, &rank) in ranks.iter().enumerate() {
            if rank >= n || !seen.insert(rank) {
                return Err(TopologyError::range(
                    "rank",
                    i64::try_from(rank).unwrap_or(i64::MAX),
                    format!("a distinct value in [0, {n})"),
                ));
            }
            bindings[rank] = Some(Binding {
                node: i / self.ppn,
                core: i % self.ppn,
            });
        }

        Ok(self.into_placed(bindings, None))
    }

    fn into_placed(self, mut bindings: Vec<Option<Binding>>, arrangement: Option<Arrangement>) -> Topology<Placed> {
        let last_bound = bindings.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
        bindings.truncate(last_bound);
        Topology {
            platform: self.platform,
            nodes: self.nodes,
            ppn: self.ppn,
            bindings,
            arrangement,
            _state: std::marker::PhantomData,
        }
    }
}

// ── Placed state ───────────────────────────────────────────────────

impl Topology<Placed> {
    /// Number of bound ranks (the communicator size).
    pub fn rank_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.is_some()).count()
    }

    /// The arrangement used for placement, if not an explicit list.
    pub fn arrangement(&self) -> Option<Arrangement> {
        self.arrangement
    }

    /// Binding of `rank`.
    pub fn binding(&self, rank: usize) -> Result<Binding, TopologyError> {
        self.bindings
            .get(rank)
            .copied()
            .flatten()
            .ok_or(TopologyError::UnboundRank { rank })
    }

    pub fn node_index_of(&self, rank: usize) -> Result<usize, TopologyError> {
        Ok(self.binding(rank)?.node)
    }

    pub fn node_of(&self, rank: usize) -> Result<&Node, TopologyError> {
        Ok(&self.nodes[self.binding(rank)?.node])
    }

    pub fn core_of(&self, rank: usize) -> Result<usize, TopologyError> {
        Ok(self.binding(rank)?.core)
    }

    /// Contention unit of the core `rank` is bound to.
    pub fn unit_of(&self, rank: usize) -> Result<usize, TopologyError> {
        let b = self.binding(rank)?;
        Ok(self.nodes[b.node].unit_of_core(b.core))
    }

    pub fn numa_of(&self, rank: usize) -> Result<usize, TopologyError> {
        let b = self.binding(rank)?;
        Ok(self.nodes[b.node].numa_of_core(b.core))
    }

    /// Intra-node hierarchy level between two ranks on the same node.
    ///
    /// 0 when both share a contention unit, otherwise the smallest `i` in
    /// `1..=max_core_level` for which the unit indices agree after a right
    /// shift by `i`.
    pub fn core_level(&self, r1: usize, r2: usize) -> Result<usize, TopologyError> {
        let (b1, b2) = (self.binding(r1)?, self.binding(r2)?);
        if b1.node != b2.node {
            return Err(TopologyError::DifferentNodes { lhs: r1, rhs: r2 });
        }
        let node = &self.nodes[b1.node];
        core_level_of_units(
            node.unit_of_core(b1.core),
            node.unit_of_core(b2.core),
            node.max_core_level(),
        )
        .ok_or_else(|| TopologyError::UndefinedLevel {
            lhs: format!("{}:{}", node.name(), b1.core),
            rhs: format!("{}:{}", node.name(), b2.core),
        })
    }

    /// Network level between the nodes hosting two ranks.
    pub fn net_level(&self, r1: usize, r2: usize) -> Result<usize, TopologyError> {
        self.node_of(r1)?.level_distance(self.node_of(r2)?)
    }

    /// Ranks bound to the node at `node_index`, ascending.
    pub fn ranks_on(&self, node_index: usize) -> Vec<usize> {
        self.iter_bindings()
            .filter(|(_, b)| b.node == node_index)
            .map(|(rank, _)| rank)
            .collect()
    }

    /// Iterates `(rank, binding)` in rank order.
    pub fn iter_bindings(&self) -> impl Iterator<Item = (usize, Binding)> + '_ {
        self.bindings
            .iter()
            .enumerate()
            .filter_map(|(rank, b)| b.map(|b| (rank, b)))
    }

    /// One-line description of the placed topology.
    pub fn summary(&self) -> String {
        let placement = self
            .arrangement
            .map_or_else(|| "explicit".to_string(), |a| a.to_string());
        format!(
            "Topology {}: {} nodes, ppn {}, {} ranks placed {}",
            self.platform,
            self.nodes.len(),
            self.ppn,
            self.rank_count(),
            placement,
        )
    }
}

/// Core-level rule shared by placed-topology queries and tests.
pub(crate) fn core_level_of_units(u1: usize, u2: usize, max_core_level: usize) -> Option<usize> {
    if u1 == u2 {
        return Some(0);
    }
    (1..=max_core_level).find(|&i| u1 >> i == u2 >> i)
}

// ── Shared implementations ─────────────────────────────────────────

impl<S: TopologyState> Topology<S> {
    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn ppn(&self) -> usize {
        self.ppn
    }

    /// Maximum number of ranks: `ppn × node_count`.
    pub fn capacity(&self) -> usize {
        self.ppn * self.nodes.len()
    }

    /// The first `k` nodes of the list.
    pub fn top_k_nodes(&self, k: usize) -> Result<&[Node], TopologyError> {
        if k == 0 || k > self.nodes.len() {
            return Err(TopologyError::range(
                "k",
                k as i64,
                format!("[1, {}]", self.nodes.len()),
            ));
        }
        Ok(&self.nodes[..k])
    }

    /// Whether a node with this name is part of the topology.
    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name().as_str() == name)
    }
}

impl<S: TopologyState> fmt::Display for Topology<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.nodes.iter().map(|n| n.name().as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

/// Parses `node_spec` and places every rank under `arrangement`.
pub fn build_topology(
    platform: Platform,
    node_spec: &str,
    ppn: usize,
    arrangement: Arrangement,
) -> Result<Topology<Placed>, TopologyError> {
    Topology::new(platform, node_spec, ppn)?.place(arrangement)
}
