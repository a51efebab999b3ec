// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reports for size sweeps and algorithm comparisons.

use collective::{AlgorithmKind, OperationKind, Prediction};
use serde::{Deserialize, Serialize};

/// One algorithm evaluated over a list of message sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub operation: OperationKind,
    pub algorithm: AlgorithmKind,
    /// Topology summary line.
    pub topology: String,
    pub cost_model: String,
    /// One entry per requested size, in request order.
    pub predictions: Vec<Prediction>,
}

impl PredictionReport {
    /// Total cost per size, in request order.
    pub fn costs(&self) -> Vec<f64> {
        self.predictions.iter().map(|p| p.total_cost).collect()
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = format!(
            "{}/{} on {} (cost model: {})\n",
            self.operation, self.algorithm, self.topology, self.cost_model
        );
        s.push_str(&format!(
            "  {:>12} {:>7} {:>16}\n",
            "Size (B)", "Rounds", "Cost"
        ));
        for p in &self.predictions {
            s.push_str(&format!(
                "  {:>12} {:>7} {:>16.4}\n",
                p.message_size,
                p.num_rounds(),
                p.total_cost
            ));
        }
        s
    }
}

/// Every registered algorithm of one operation at one size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub operation: OperationKind,
    pub message_size: u64,
    /// Modelled algorithms, cheapest first.
    pub ranked: Vec<Prediction>,
    /// Registered algorithms with no cost model yet.
    pub unavailable: Vec<AlgorithmKind>,
}

impl Comparison {
    /// The cheapest modelled algorithm.
    pub fn best(&self) -> Option<&Prediction> {
        self.ranked.first()
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = format!("{} at {} B\n", self.operation, self.message_size);
        for (i, p) in self.ranked.iter().enumerate() {
            s.push_str(&format!(
                "  {}. {:<40} {:>16.4}  ({} rounds)\n",
                i + 1,
                p.algorithm.as_str(),
                p.total_cost,
                p.num_rounds()
            ));
        }
        for a in &self.unavailable {
            s.push_str(&format!("  -  {:<40} {:>16}\n", a.as_str(), "not implemented"));
        }
        s
    }
}
