// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for sample-table loading and cost lookup.

use std::path::PathBuf;

/// Errors that can occur when loading or querying a cost model.
#[derive(Debug, thiserror::Error)]
pub enum CostError {
    /// The table file could not be read.
    #[error("failed to read cost table '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table text violates the header/row format.
    #[error("malformed cost table at line {line}: {detail}")]
    MalformedTable { line: usize, detail: String },

    /// No sample series exists for the requested category.
    #[error("cost category not found: {key}")]
    MissingCategory { key: String },

    /// Message sizes must be positive.
    #[error("invalid message size {size}: must be at least 1 byte")]
    InvalidMessageSize { size: u64 },

    /// The exponential extrapolation did not converge.
    #[error("curve fit for '{key}' did not converge: {detail}")]
    FitConvergence { key: String, detail: String },

    /// A bandwidth sample is zero or negative, so `size / bandwidth` is meaningless.
    #[error("bandwidth for '{key}' is {value}, expected a positive value")]
    NonPositiveBandwidth { key: String, value: f64 },
}

impl CostError {
    pub(crate) fn malformed(line: usize, detail: impl Into<String>) -> Self {
        Self::MalformedTable {
            line,
            detail: detail.into(),
        }
    }
}
