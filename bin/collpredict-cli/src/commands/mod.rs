// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and the arguments they share.

pub mod algorithms;
pub mod compare;
pub mod inspect;
pub mod predict;

use clap::Args;
use predictor::PredictorConfig;
use std::path::{Path, PathBuf};
use topology::{Placement, Platform};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Machine and cost-table arguments. Any flag given here overrides the
/// value from `--config`.
#[derive(Args, Debug, Default)]
pub struct TopologyArgs {
    /// Compressed node list (e.g., "g1r1n[01-04],g2r1n01").
    #[arg(long)]
    pub nodes: Option<String>,

    /// Processes per node.
    #[arg(long)]
    pub ppn: Option<usize>,

    /// Machine platform.
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Node-level placement: block or cyclic.
    #[arg(long)]
    pub placement: Option<Placement>,

    /// Core-level placement: block or cyclic.
    #[arg(long)]
    pub core_placement: Option<Placement>,

    /// Latency sample table (CSV).
    #[arg(long)]
    pub latency_table: Option<PathBuf>,

    /// Bandwidth sample table (CSV).
    #[arg(long)]
    pub bandwidth_table: Option<PathBuf>,

    /// Worker threads for size sweeps.
    #[arg(long)]
    pub threads: Option<usize>,
}

impl TopologyArgs {
    /// Loads `config` (or the defaults) and applies these overrides.
    pub fn resolve(self, config: Option<&Path>) -> anyhow::Result<PredictorConfig> {
        let mut c = match config {
            Some(path) => PredictorConfig::from_file(path)?,
            None => PredictorConfig::default(),
        };
        if let Some(nodes) = self.nodes {
            c.nodes = nodes;
        }
        if let Some(ppn) = self.ppn {
            c.ppn = ppn;
        }
        if let Some(platform) = self.platform {
            c.platform = platform;
        }
        if let Some(p) = self.placement {
            c.node_placement = p;
        }
        if let Some(p) = self.core_placement {
            c.core_placement = p;
        }
        if let Some(path) = self.latency_table {
            c.latency_table = path;
        }
        if let Some(path) = self.bandwidth_table {
            c.bandwidth_table = path;
        }
        if self.threads.is_some() {
            c.num_threads = self.threads;
        }
        tracing::debug!("resolved configuration: {:?}", c);
        Ok(c)
    }
}

/// Banner shared by every subcommand.
pub fn banner(title: &str) {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║{:^54}║", format!("coll-predict · {title}"));
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
}
