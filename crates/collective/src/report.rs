// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-prediction breakdown.

use crate::{AlgorithmKind, OperationKind};
use serde::{Deserialize, Serialize};

/// Cost breakdown for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub index: usize,
    pub mask: usize,
    /// Pairs as generated, before any halving.
    pub pairs: usize,
    /// Number of contention classes.
    pub classes: usize,
    /// Bytes moved, each physical transfer counted once.
    pub bytes: u64,
    /// Largest physical contention count in the round.
    pub max_contention: usize,
    pub cost: f64,
}

/// Result of costing one collective call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub operation: OperationKind,
    pub algorithm: AlgorithmKind,
    pub message_size: u64,
    pub comm_size: usize,
    pub root: usize,
    pub total_cost: f64,
    pub rounds: Vec<RoundReport>,
}

impl Prediction {
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// The round with the highest cost, if any.
    pub fn critical_round(&self) -> Option<&RoundReport> {
        self.rounds
            .iter()
            .max_by(|a, b| a.cost.total_cmp(&b.cost))
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = format!(
            "{}/{}: P={}, root={}, size={} B, {} rounds, total cost {:.4}\n",
            self.operation,
            self.algorithm,
            self.comm_size,
            self.root,
            self.message_size,
            self.rounds.len(),
            self.total_cost,
        );
        for r in &self.rounds {
            s.push_str(&format!(
                "  round {:>2} mask {:>4}: {:>4} pairs, {:>3} classes, max contention {:>3}, {:>10} B, cost {:.4}\n",
                r.index, r.mask, r.pairs, r.classes, r.max_contention, r.bytes, r.cost,
            ));
        }
        s
    }
}
