// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rank placement policies.
//!
//! Placement is two-level: a node policy chooses which node a rank lands
//! on, and a core policy chooses which core it binds to within that node.
//!
//! | Policy | Node level | Core level |
//! |---|---|---|
//! | `BLOCK` | `rank / ppn` | k-th rank on a node binds core k |
//! | `CYCLIC` | `rank % node_count` | round-robin over NUMA domains |
//! | `PLANE` | not implemented | not implemented |
//! | `ARBITRARY` | not implemented | not implemented |

use crate::{PlatformProfile, TopologyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A placement policy, usable at node or core level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Contiguous ranks fill one slot group before moving to the next.
    #[default]
    Block,
    /// Ranks are dealt round-robin.
    Cyclic,
    /// Recognised, not implemented.
    Plane,
    /// Recognised, not implemented.
    Arbitrary,
}

impl Placement {
    /// Parses a policy name, case-insensitively.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "block" => Some(Self::Block),
            "cyclic" => Some(Self::Cyclic),
            "plane" => Some(Self::Plane),
            "arbitrary" => Some(Self::Arbitrary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "BLOCK",
            Self::Cyclic => "CYCLIC",
            Self::Plane => "PLANE",
            Self::Arbitrary => "ARBITRARY",
        }
    }

    fn unimplemented(&self, level: &str) -> TopologyError {
        TopologyError::NotImplemented {
            feature: format!("{} {level} placement", self.as_str()),
        }
    }

    /// Node index for `rank` under this policy.
    pub fn node_index(&self, rank: usize, ppn: usize, node_count: usize) -> Result<usize, TopologyError> {
        match self {
            Self::Block => Ok(rank / ppn),
            Self::Cyclic => Ok(rank % node_count),
            Self::Plane | Self::Arbitrary => Err(self.unimplemented("node")),
        }
    }

    /// Physical core order for successive ranks placed on one node.
    ///
    /// Entry `k` is the core bound to the k-th rank placed on the node.
    pub fn core_order(&self, profile: &PlatformProfile) -> Result<Vec<usize>, TopologyError> {
        match self {
            Self::Block => Ok((0..profile.cores_per_node).collect()),
            Self::Cyclic => Ok((0..profile.cores_per_numa)
                .flat_map(|slot| {
                    (0..profile.numa_count).map(move |numa| numa * profile.cores_per_numa + slot)
                })
                .filter(|&core| core < profile.cores_per_node)
                .collect()),
            Self::Plane | Self::Arbitrary => Err(self.unimplemented("core")),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Placement {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| {
            TopologyError::parse(s, "unknown placement, expected block, cyclic, plane or arbitrary")
        })
    }
}

/// A node policy paired with a core policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Arrangement {
    pub node: Placement,
    pub core: Placement,
}

impl Arrangement {
    pub fn new(node: Placement, core: Placement) -> Self {
        Self { node, core }
    }

    /// Uses `node` at node level and block order within each node.
    pub fn nodes(node: Placement) -> Self {
        Self {
            node,
            core: Placement::Block,
        }
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.core)
    }
}
