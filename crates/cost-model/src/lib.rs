// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cost-model
//!
//! Parameter store for collective cost prediction.
//!
//! - [`SampleTable`]: measured cost series per category at power-of-two
//!   message sizes, loaded from CSV.
//! - [`Category`] / [`category_key`]: the `L<kind>_<level>_<pattern>_<count>`
//!   lookup keys.
//! - [`fit`]: Levenberg–Marquardt fit of `A·e^(B·x)+C` used for sizes
//!   between or beyond the samples.
//! - [`CostModel`]: the trait the engine consumes; [`TableCostModel`] is
//!   the table-backed implementation.

pub mod category;
mod error;
pub mod fit;
pub mod model;
pub mod table;

pub use category::{category_key, Category, LevelKind, TrafficPattern};
pub use error::CostError;
pub use fit::{ExpCurve, FitParams};
pub use model::{transfer_cost, CostModel, TableCostModel, BANDWIDTH_THRESHOLD};
pub use table::SampleTable;
