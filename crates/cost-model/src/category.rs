// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Cost category keys.
//!
//! A category names one row of a sample table. It is built from ordered
//! label tokens joined with `_`:
//!
//! ```text
//! L1 _ 2 _ PING _ 3
//! │    │   │      └─ contention count
//! │    │   └─ traffic pattern
//! │    └─ hierarchy level (core level for L0, network level for L1)
//! └─ level kind: L0 intra-node, L1 inter-node
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Joins label tokens with `_`.
pub fn category_key<I, T>(labels: I) -> String
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    labels
        .into_iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("_")
}

/// Whether a transfer stays inside one node or crosses the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelKind {
    /// Both endpoints on the same node.
    IntraNode,
    /// Endpoints on different nodes.
    InterNode,
}

impl LevelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntraNode => "L0",
            Self::InterNode => "L1",
        }
    }
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of traffic within one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrafficPattern {
    /// One-directional send.
    Ping,
    /// Simultaneous exchange in both directions.
    Duplex,
}

impl TrafficPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ping => "PING",
            Self::Duplex => "DUPLEX",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PING" => Some(Self::Ping),
            "DUPLEX" => Some(Self::Duplex),
            _ => None,
        }
    }
}

impl fmt::Display for TrafficPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully specified cost category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub kind: LevelKind,
    /// Core level for intra-node transfers, network level otherwise.
    pub level: usize,
    pub pattern: TrafficPattern,
    /// Number of transfers sharing the resource.
    pub contention: usize,
}

impl Category {
    /// Renders the lookup key, e.g. `L1_2_PING_3`.
    pub fn key(&self) -> String {
        category_key([
            self.kind.as_str().to_string(),
            self.level.to_string(),
            self.pattern.as_str().to_string(),
            self.contention.to_string(),
        ])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
