// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # coll-predict
//!
//! Command-line interface for collective cost prediction.
//!
//! ## Usage
//! ```bash
//! # Predict a binomial broadcast over a size sweep
//! coll-predict predict --op bcast --algo binomial --nodes 'g1r1n[01-04]' --ppn 8 --root 0 --sizes 1K,64K,1M
//!
//! # Rank every allgather algorithm at one size
//! coll-predict compare --op allgather --nodes 'g1r1n[01-04]' --ppn 8 --size 64K
//!
//! # Show where each rank lands
//! coll-predict inspect --nodes 'g1r1n[01-02]' --ppn 4 --core-placement cyclic
//!
//! # List registered algorithms
//! coll-predict algorithms --op bcast
//! ```

mod commands;

use clap::{Parser, Subcommand};
use collective::{AlgorithmKind, OperationKind};
use commands::TopologyArgs;

#[derive(Parser)]
#[command(
    name = "coll-predict",
    about = "Predicts the cost of MPI collectives from topology and sampled costs",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI arguments override it).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict one algorithm over a list of message sizes.
    Predict {
        /// Collective operation, e.g. bcast, allgather.
        #[arg(long)]
        op: OperationKind,

        /// Algorithm, e.g. binomial, recursive-doubling.
        #[arg(long)]
        algo: AlgorithmKind,

        #[command(flatten)]
        topology: TopologyArgs,

        /// Root rank for rooted collectives.
        #[arg(long)]
        root: Option<i64>,

        /// Comma-separated message sizes (e.g., "1K,64K,1M").
        #[arg(long)]
        sizes: String,

        /// Print one round-by-round breakdown per size.
        #[arg(long)]
        rounds: bool,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Rank every registered algorithm of an operation at one size.
    Compare {
        /// Collective operation, e.g. bcast, allgather.
        #[arg(long)]
        op: OperationKind,

        #[command(flatten)]
        topology: TopologyArgs,

        /// Root rank for rooted collectives.
        #[arg(long)]
        root: Option<i64>,

        /// Message size (e.g., "64K").
        #[arg(long)]
        size: String,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print the node list and every rank binding.
    Inspect {
        #[command(flatten)]
        topology: TopologyArgs,
    },

    /// List registered algorithms and whether they are modelled.
    Algorithms {
        /// Restrict the listing to one operation.
        #[arg(long)]
        op: Option<OperationKind>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Predict {
            op,
            algo,
            topology,
            root,
            sizes,
            rounds,
            json,
        } => {
            let config = topology.resolve(config)?;
            commands::predict::execute(config, op, algo, root, sizes, rounds, json).await
        }
        Commands::Compare {
            op,
            topology,
            root,
            size,
            json,
        } => {
            let config = topology.resolve(config)?;
            commands::compare::execute(config, op, root, size, json).await
        }
        Commands::Inspect { topology } => {
            let config = topology.resolve(config)?;
            commands::inspect::execute(config).await
        }
        Commands::Algorithms { op } => commands::algorithms::execute(op).await,
    }
}
