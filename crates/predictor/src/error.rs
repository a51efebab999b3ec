// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the prediction front end.

/// Errors that can occur while configuring or running predictions.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// Configuration could not be read, parsed, or serialised.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// A message-size string could not be parsed.
    #[error("invalid message size '{input}': {detail}")]
    InvalidSize { input: String, detail: String },

    /// Building the topology failed.
    #[error("topology error: {0}")]
    TopologyError(#[from] topology::TopologyError),

    /// Loading the cost tables failed.
    #[error("cost model error: {0}")]
    CostError(#[from] cost_model::CostError),

    /// Simulation or costing failed.
    #[error("prediction error: {0}")]
    CollectiveError(#[from] collective::CollectiveError),

    /// A concurrent prediction task panicked or was cancelled.
    #[error("prediction task failed: {0}")]
    TaskError(String),
}
