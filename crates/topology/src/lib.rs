// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # topology
//!
//! Cluster topology model and rank placement for collective cost
//! prediction.
//!
//! - [`Platform`] / [`PlatformProfile`]: per-machine hierarchy constants
//!   and node naming rules.
//! - [`NodeName`] / [`Node`]: validated node names split into hierarchy
//!   segments, with network level computation.
//! - [`parse_node_list`]: compact host-list expansion (`g1r1n[01-04]`).
//! - [`Placement`] / [`Arrangement`]: node and core placement policies.
//! - [`Topology`]: the node list with a **type-state pattern**
//!   (`Unplaced` → `Placed`).
//!
//! # Example
//! ```
//! use topology::{build_topology, Arrangement, Placement, Platform};
//!
//! let topo = build_topology(
//!     Platform::Df,
//!     "g1r1n[01-02]",
//!     8,
//!     Arrangement::nodes(Placement::Block),
//! )
//! .unwrap();
//! assert_eq!(topo.rank_count(), 16);
//! assert_eq!(topo.node_index_of(8).unwrap(), 1);
//! ```

mod error;
pub mod node;
mod parser;
pub mod placement;
pub mod platform;
pub mod topology;

pub use error::TopologyError;
pub use node::{level_distance, Node, NodeName};
pub use parser::{parse_node_list, MAX_NODES};
pub use placement::{Arrangement, Placement};
pub use platform::{Platform, PlatformProfile};
pub use topology::{build_topology, Binding, Placed, Topology, TopologyState, Unplaced};
