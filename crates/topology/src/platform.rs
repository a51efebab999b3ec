// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Platform profiles: per-machine hierarchy constants and node naming rules.
//!
//! A [`Platform`] tag selects a [`PlatformProfile`], which fixes how many
//! cores a node has, how cores group into NUMA domains and contention
//! units, and how node names encode the network hierarchy.
//!
//! | Platform | Node name | Cores | NUMA × cores | Unit |
//! |---|---|---|---|---|
//! | `DF` | `g12r1n01` (group, rack, node) | 30 | 4 × 8 | 4 |
//! | `TH` | - | not implemented | | |

use crate::TopologyError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A supported (or recognised) cluster platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    /// Dragonfly-style machine with `<group><rack><node>` node names.
    Df,
    /// Recognised but not yet modelled.
    Th,
}

impl Platform {
    /// Parses a platform tag, case-insensitively.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "df" => Some(Self::Df),
            "th" => Some(Self::Th),
            _ => None,
        }
    }

    /// Returns the canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Df => "DF",
            Self::Th => "TH",
        }
    }

    /// Returns the hierarchy profile for this platform.
    pub fn profile(&self) -> Result<&'static PlatformProfile, TopologyError> {
        match self {
            Self::Df => Ok(&DF_PROFILE),
            Self::Th => Err(TopologyError::NotImplemented {
                feature: "TH platform".into(),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| TopologyError::Parse {
            input: s.to_string(),
            detail: "unknown platform, expected 'DF' or 'TH'".into(),
        })
    }
}

/// Fixed hierarchy facts for one platform.
#[derive(Debug)]
pub struct PlatformProfile {
    /// Number of segments in a node name (network hierarchy depth).
    pub max_node_level: usize,
    /// Depth of the intra-node core hierarchy.
    pub max_core_level: usize,
    /// Number of NUMA domains per node.
    pub numa_count: usize,
    /// Usable cores per node.
    pub cores_per_node: usize,
    /// Cores per NUMA domain.
    pub cores_per_numa: usize,
    /// Cores sharing one contention unit.
    pub cores_per_unit: usize,
    node_pattern: &'static str,
    node_regex: &'static OnceLock<Regex>,
}

static DF_NODE_REGEX: OnceLock<Regex> = OnceLock::new();

static DF_PROFILE: PlatformProfile = PlatformProfile {
    max_node_level: 3,
    max_core_level: 3,
    numa_count: 4,
    cores_per_node: 30,
    cores_per_numa: 8,
    cores_per_unit: 4,
    node_pattern: r"^([a-zA-Z]\d+)([a-zA-Z]\d+)([a-zA-Z]\d+)$",
    node_regex: &DF_NODE_REGEX,
};

impl PlatformProfile {
    /// Returns the compiled node-name pattern.
    pub fn node_regex(&self) -> &Regex {
        self.node_regex.get_or_init(|| {
            Regex::new(self.node_pattern).expect("Failed to compile node name pattern")
        })
    }

    /// Splits a node name into its hierarchy segments, or `None` if the
    /// name does not match this platform's naming pattern.
    pub fn split_segments(&self, name: &str) -> Option<Vec<String>> {
        let caps = self.node_regex().captures(name)?;
        Some(
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect(),
        )
    }
}
