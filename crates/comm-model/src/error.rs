// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for communication-pair construction.

use topology::TopologyError;

/// Errors that can occur while building communication pairs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommError {
    /// An endpoint could not be resolved against the topology.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    /// A direct transfer needs two distinct ranks.
    #[error("rank {rank} cannot form a direct pair with itself")]
    SelfPair { rank: usize },
}
