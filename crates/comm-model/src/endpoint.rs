// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! One side of a transfer, resolved against a placed topology.

use crate::CommError;
use std::cmp::Ordering;
use std::fmt;
use topology::{Node, Placed, Topology};

/// A rank together with the node, core, and contention unit it is bound to.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'t> {
    pub node: &'t Node,
    pub rank: usize,
    pub core: usize,
    pub unit: usize,
}

impl<'t> Endpoint<'t> {
    /// Resolves `rank` in `topology`.
    pub fn resolve(topology: &'t Topology<Placed>, rank: usize) -> Result<Self, CommError> {
        let node = topology.node_of(rank)?;
        let core = topology.core_of(rank)?;
        Ok(Self {
            node,
            rank,
            core,
            unit: node.unit_of_core(core),
        })
    }

    /// Index of the hosting node in the topology's node list.
    pub fn node_index(&self) -> usize {
        self.node.index()
    }

    pub fn same_node(&self, other: &Endpoint<'_>) -> bool {
        self.node.index() == other.node.index()
    }

    /// Ordering used to normalise pair orientation: node name, then rank.
    pub(crate) fn orient_cmp(&self, other: &Endpoint<'_>) -> Ordering {
        self.node
            .name()
            .as_str()
            .cmp(other.node.name().as_str())
            .then(self.rank.cmp(&other.rank))
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{rank {}, core {}}}", self.node, self.rank, self.core)
    }
}
