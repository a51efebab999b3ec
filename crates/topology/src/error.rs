// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for topology parsing and rank placement.

/// Errors that can occur while building or querying a cluster topology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// The node-list specification or a node name is malformed.
    #[error("invalid node list '{input}': {detail}")]
    Parse { input: String, detail: String },

    /// A rank, process count, or selector is outside its valid bounds.
    #[error("{what} = {value} is out of range, expected {expected}")]
    Range {
        what: &'static str,
        value: i64,
        expected: String,
    },

    /// The requested platform or placement policy is recognised but not implemented.
    #[error("{feature} is not implemented")]
    NotImplemented { feature: String },

    /// Two nodes do not share a defined hierarchy relationship.
    #[error("undefined network level between '{lhs}' and '{rhs}'")]
    UndefinedLevel { lhs: String, rhs: String },

    /// A rank has no node/core binding in this topology.
    #[error("rank {rank} is not bound to any core")]
    UnboundRank { rank: usize },

    /// Core-level queries require both ranks to live on the same node.
    #[error("ranks {lhs} and {rhs} are on different nodes")]
    DifferentNodes { lhs: usize, rhs: usize },
}

impl TopologyError {
    pub(crate) fn parse(input: &str, detail: impl Into<String>) -> Self {
        Self::Parse {
            input: input.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn range(what: &'static str, value: i64, expected: impl Into<String>) -> Self {
        Self::Range {
            what,
            value,
            expected: expected.into(),
        }
    }
}
