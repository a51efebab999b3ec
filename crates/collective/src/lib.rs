// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # collective
//!
//! Round-by-round simulation and costing of MPI collectives.
//!
//! The crate takes:
//! - A placed `Topology` from `topology`.
//! - A `CostModel` from `cost-model`.
//!
//! and, for a registered `(operation, algorithm)` pair, generates the
//! [`Schedule`] of rounds, groups every round's pairs into contention
//! classes with `comm-model`, and sums the per-round maximum class cost.
//!
//! # Example
//! ```no_run
//! use collective::{engine::CollectiveEngine, AlgorithmKind, AlgorithmParam, OperationKind};
//! use cost_model::TableCostModel;
//! use std::{path::Path, sync::Arc};
//! use topology::{build_topology, Arrangement, Placement, Platform};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let topo = build_topology(Platform::Df, "g1r1n[01-02]", 8, Arrangement::nodes(Placement::Block))?;
//! let model = TableCostModel::from_files(
//!     Path::new("resources/df_latency.csv"),
//!     Path::new("resources/df_bandwidth.csv"),
//! )?;
//! let engine = CollectiveEngine::new(Arc::new(model));
//! let cost = engine.predict(&topo, OperationKind::Bcast, AlgorithmKind::Binomial, 1024, AlgorithmParam::Root(0))?;
//! println!("{cost:.3}");
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod engine;
mod error;
pub mod kinds;
pub mod param;
pub mod registry;
pub mod report;
pub mod schedule;

pub use engine::CollectiveEngine;
pub use error::CollectiveError;
pub use kinds::{AlgorithmKind, OperationKind};
pub use param::{AlgorithmParam, ParamRule};
pub use registry::AlgorithmInfo;
pub use report::{Prediction, RoundReport};
pub use schedule::{Round, Schedule, Transfer};
