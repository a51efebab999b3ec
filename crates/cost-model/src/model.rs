// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The cost-model interface consumed by the collective engine.

use crate::{Category, CostError, LevelKind, SampleTable};
use std::path::Path;

/// Inter-node transfers larger than this add a bandwidth term.
pub const BANDWIDTH_THRESHOLD: u64 = 8192;

/// Source of latency and bandwidth figures per category.
///
/// Implementations must be shareable across concurrent predictions.
pub trait CostModel: Send + Sync {
    /// Latency cost of moving `size` bytes in category `key`.
    fn latency(&self, size: u64, key: &str) -> Result<f64, CostError>;

    /// Bandwidth figure for `size` bytes in category `key`.
    fn bandwidth(&self, size: u64, key: &str) -> Result<f64, CostError>;

    /// Human-readable model name for logs and reports.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Cost of one contention class: latency, plus `size / bandwidth` for
/// inter-node transfers above [`BANDWIDTH_THRESHOLD`].
pub fn transfer_cost(model: &dyn CostModel, size: u64, category: &Category) -> Result<f64, CostError> {
    let key = category.key();
    let mut cost = model.latency(size, &key)?;
    if category.kind == LevelKind::InterNode && size > BANDWIDTH_THRESHOLD {
        let bw = model.bandwidth(size, &key)?;
        if bw <= 0.0 || !bw.is_finite() {
            return Err(CostError::NonPositiveBandwidth { key, value: bw });
        }
        cost += size as f64 / bw;
    }
    Ok(cost)
}

/// A [`CostModel`] backed by a latency table and a bandwidth table.
#[derive(Debug)]
pub struct TableCostModel {
    latency: SampleTable,
    bandwidth: SampleTable,
    name: String,
}

impl TableCostModel {
    pub fn new(latency: SampleTable, bandwidth: SampleTable) -> Self {
        Self {
            latency,
            bandwidth,
            name: "table".into(),
        }
    }

    /// Loads both tables from disk.
    pub fn from_files(latency: &Path, bandwidth: &Path) -> Result<Self, CostError> {
        let model = Self {
            latency: SampleTable::from_file(latency)?,
            bandwidth: SampleTable::from_file(bandwidth)?,
            name: format!("table({})", latency.display()),
        };
        Ok(model)
    }

    pub fn latency_table(&self) -> &SampleTable {
        &self.latency
    }

    pub fn bandwidth_table(&self) -> &SampleTable {
        &self.bandwidth
    }
}

impl CostModel for TableCostModel {
    fn latency(&self, size: u64, key: &str) -> Result<f64, CostError> {
        self.latency.lookup(size, key)
    }

    fn bandwidth(&self, size: u64, key: &str) -> Result<f64, CostError> {
        self.bandwidth.lookup(size, key)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
