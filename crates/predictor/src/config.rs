// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Predictor configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! platform = "DF"
//! nodes = "g1r1n[01-04]"
//! ppn = 16
//! node_placement = "block"
//! core_placement = "cyclic"
//! latency_table = "resources/df_latency.csv"
//! bandwidth_table = "resources/df_bandwidth.csv"
//! num_threads = 4
//! ```

use crate::PredictorError;
use cost_model::TableCostModel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use topology::{build_topology, Arrangement, Placed, Placement, Platform, Topology};

/// Configuration for a [`Predictor`](crate::Predictor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Machine platform, e.g. `"DF"`.
    pub platform: Platform,
    /// Compressed node list, e.g. `"g1r1n[01-04],g2r1n01"`.
    pub nodes: String,
    /// Processes per node.
    pub ppn: usize,
    /// How ranks are spread across nodes.
    #[serde(default)]
    pub node_placement: Placement,
    /// How ranks are spread across the cores of a node.
    #[serde(default)]
    pub core_placement: Placement,
    /// Latency sample table (CSV).
    pub latency_table: PathBuf,
    /// Bandwidth sample table (CSV).
    pub bandwidth_table: PathBuf,
    /// Worker threads for concurrent sweeps (defaults to online CPU count).
    pub num_threads: Option<usize>,
}

impl PredictorConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PredictorError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PredictorError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PredictorError> {
        toml::from_str(toml_str)
            .map_err(|e| PredictorError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, PredictorError> {
        toml::to_string_pretty(self)
            .map_err(|e| PredictorError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Resolves the number of worker threads.
    pub fn resolve_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }

    pub fn arrangement(&self) -> Arrangement {
        Arrangement::new(self.node_placement, self.core_placement)
    }

    /// Parses the node list and places every rank.
    pub fn build_topology(&self) -> Result<Topology<Placed>, PredictorError> {
        Ok(build_topology(
            self.platform,
            &self.nodes,
            self.ppn,
            self.arrangement(),
        )?)
    }

    /// Loads both cost tables.
    pub fn load_cost_model(&self) -> Result<TableCostModel, PredictorError> {
        Ok(TableCostModel::from_files(
            &self.latency_table,
            &self.bandwidth_table,
        )?)
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Df,
            nodes: "g1r1n[01-02]".to_string(),
            ppn: 8,
            node_placement: Placement::Block,
            core_placement: Placement::Block,
            latency_table: PathBuf::from("resources/df_latency.csv"),
            bandwidth_table: PathBuf::from("resources/df_bandwidth.csv"),
            num_threads: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = PredictorConfig::default();
        assert_eq!(c.platform, Platform::Df);
        assert_eq!(c.ppn, 8);
        assert_eq!(c.arrangement().to_string(), "BLOCK:BLOCK");
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
platform = "DF"
nodes = "g1r1n[01-04]"
ppn = 16
core_placement = "cyclic"
latency_table = "/tmp/lat.csv"
bandwidth_table = "/tmp/bw.csv"
num_threads = 2
"#;
        let c = PredictorConfig::from_toml(toml).unwrap();
        assert_eq!(c.nodes, "g1r1n[01-04]");
        assert_eq!(c.ppn, 16);
        assert_eq!(c.node_placement, Placement::Block);
        assert_eq!(c.core_placement, Placement::Cyclic);
        assert_eq!(c.latency_table, PathBuf::from("/tmp/lat.csv"));
        assert_eq!(c.num_threads, Some(2));
    }

    #[test]
    fn test_from_toml_rejects_unknown_platform() {
        let toml = r#"
platform = "XY"
nodes = "g1r1n01"
ppn = 1
latency_table = "a"
bandwidth_table = "b"
"#;
        assert!(matches!(
            PredictorConfig::from_toml(toml),
            Err(PredictorError::ConfigError(_))
        ));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = PredictorConfig {
            core_placement: Placement::Cyclic,
            num_threads: Some(3),
            ..Default::default()
        };
        let back = PredictorConfig::from_toml(&c.to_toml().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_build_topology() {
        let t = PredictorConfig::default().build_topology().unwrap();
        assert_eq!(t.rank_count(), 16);
        assert_eq!(t.node_index_of(8).unwrap(), 1);
    }

    #[test]
    fn test_missing_tables() {
        let c = PredictorConfig {
            latency_table: PathBuf::from("/nonexistent/lat.csv"),
            ..Default::default()
        };
        assert!(matches!(
            c.load_cost_model(),
            Err(PredictorError::CostError(_))
        ));
    }

    #[test]
    fn test_resolve_threads() {
        let c = PredictorConfig {
            num_threads: Some(8),
            ..Default::default()
        };
        assert_eq!(c.resolve_threads(), 8);
        assert!(PredictorConfig::default().resolve_threads() >= 1);
    }
}
