// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # comm-model
//!
//! Communication pairs and per-round contention analysis.
//!
//! - [`Endpoint`]: a rank resolved to its node, core, and contention unit.
//! - [`CommPair`]: a direct or relayed transfer whose equality follows
//!   the physical resource it occupies, summarised by [`ContentionKey`].
//! - [`analyze`]: groups one round's pairs into [`ContentionClass`]es.

pub mod contention;
mod endpoint;
mod error;
pub mod pair;

pub use contention::{analyze, max_contention, ContentionClass};
pub use endpoint::Endpoint;
pub use error::CommError;
pub use pair::{CommPair, ContentionKey};
