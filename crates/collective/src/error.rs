// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for collective simulation and prediction.

use crate::{AlgorithmKind, OperationKind};

/// Errors that can occur while simulating or costing a collective.
#[derive(Debug, thiserror::Error)]
pub enum CollectiveError {
    /// No handler is registered for this (operation, algorithm) combination.
    #[error("{operation} has no registered algorithm {algorithm}")]
    UnsupportedAlgorithm {
        operation: OperationKind,
        algorithm: AlgorithmKind,
    },

    /// The algorithm is registered but deliberately not modelled.
    #[error("algorithm {algorithm} for {operation} is not implemented")]
    NotImplemented {
        operation: OperationKind,
        algorithm: AlgorithmKind,
    },

    /// The algorithm parameter has the wrong shape.
    #[error("invalid parameter for {algorithm}: {detail}")]
    InvalidParameter {
        algorithm: AlgorithmKind,
        detail: String,
    },

    /// A root, size, or radix is outside its valid bounds.
    #[error("{what} = {value} is out of range, expected {expected}")]
    Range {
        what: &'static str,
        value: i64,
        expected: String,
    },

    /// Endpoint resolution or pair construction failed.
    #[error("communication error: {0}")]
    Comm(#[from] comm_model::CommError),

    /// A level query against the topology failed.
    #[error("topology error: {0}")]
    Topology(#[from] topology::TopologyError),

    /// The cost model could not price a contention class.
    #[error("cost model error: {0}")]
    Cost(#[from] cost_model::CostError),
}
