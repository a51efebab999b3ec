// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # predictor
//!
//! The boundary between the collective engine and its callers.
//!
//! The predictor takes:
//! - A [`PredictorConfig`] naming the platform, node list, placement and
//!   cost tables (from TOML or built in code).
//! - A message-size list, parsed with [`parse_size_list`].
//!
//! and answers single predictions, ordered sweeps (sequential or one
//! blocking task per size), and per-operation algorithm comparisons.
//!
//! # Example
//! ```no_run
//! use collective::{AlgorithmKind, AlgorithmParam, OperationKind};
//! use predictor::{parse_size_list, Predictor, PredictorConfig};
//!
//! # fn main() -> Result<(), predictor::PredictorError> {
//! let predictor = Predictor::from_config(&PredictorConfig::default())?;
//! let sizes = parse_size_list("1K,64K,1M")?;
//! let report = predictor.sweep(
//!     OperationKind::Allgather,
//!     AlgorithmKind::RecursiveDoubling,
//!     &sizes,
//!     AlgorithmParam::Absent,
//! )?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod predictor;
mod report;
mod size;

pub use config::PredictorConfig;
pub use error::PredictorError;
pub use predictor::Predictor;
pub use report::{Comparison, PredictionReport};
pub use size::{parse_size_list, MessageSize};
