// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Collective operation and algorithm tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercases and maps `-` to `_` so `recursive-doubling` and
/// `RECURSIVE_DOUBLING` parse alike.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace('-', "_")
}

/// A collective operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Allgather,
    Allreduce,
    Alltoall,
    Bcast,
    Gather,
    Reduce,
    Scatter,
}

impl OperationKind {
    pub const ALL: [OperationKind; 7] = [
        Self::Allgather,
        Self::Allreduce,
        Self::Alltoall,
        Self::Bcast,
        Self::Gather,
        Self::Reduce,
        Self::Scatter,
    ];

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "allgather" => Some(Self::Allgather),
            "allreduce" => Some(Self::Allreduce),
            "alltoall" => Some(Self::Alltoall),
            "bcast" | "broadcast" => Some(Self::Bcast),
            "gather" => Some(Self::Gather),
            "reduce" => Some(Self::Reduce),
            "scatter" => Some(Self::Scatter),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allgather => "ALLGATHER",
            Self::Allreduce => "ALLREDUCE",
            Self::Alltoall => "ALLTOALL",
            Self::Bcast => "BCAST",
            Self::Gather => "GATHER",
            Self::Reduce => "REDUCE",
            Self::Scatter => "SCATTER",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| format!("unknown collective operation '{s}'"))
    }
}

/// A collective algorithm variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlgorithmKind {
    Binomial,
    Ring,
    RecursiveDoubling,
    Smp,
    ScatterRingAllgather,
    ScatterRecursiveDoublingAllgather,
    ReduceScatterAllgather,
    ReduceScatterGather,
    Pairwise,
    Brucks,
    KBrucks,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 11] = [
        Self::Binomial,
        Self::Ring,
        Self::RecursiveDoubling,
        Self::Smp,
        Self::ScatterRingAllgather,
        Self::ScatterRecursiveDoublingAllgather,
        Self::ReduceScatterAllgather,
        Self::ReduceScatterGather,
        Self::Pairwise,
        Self::Brucks,
        Self::KBrucks,
    ];

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "binomial" => Some(Self::Binomial),
            "ring" => Some(Self::Ring),
            "recursive_doubling" | "rd" => Some(Self::RecursiveDoubling),
            "smp" => Some(Self::Smp),
            "scatter_ring_allgather" => Some(Self::ScatterRingAllgather),
            "scatter_recursive_doubling_allgather" => Some(Self::ScatterRecursiveDoublingAllgather),
            "reduce_scatter_allgather" => Some(Self::ReduceScatterAllgather),
            "reduce_scatter_gather" => Some(Self::ReduceScatterGather),
            "pairwise" => Some(Self::Pairwise),
            "brucks" => Some(Self::Brucks),
            "k_brucks" => Some(Self::KBrucks),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binomial => "BINOMIAL",
            Self::Ring => "RING",
            Self::RecursiveDoubling => "RECURSIVE_DOUBLING",
            Self::Smp => "SMP",
            Self::ScatterRingAllgather => "SCATTER_RING_ALLGATHER",
            Self::ScatterRecursiveDoublingAllgather => "SCATTER_RECURSIVE_DOUBLING_ALLGATHER",
            Self::ReduceScatterAllgather => "REDUCE_SCATTER_ALLGATHER",
            Self::ReduceScatterGather => "REDUCE_SCATTER_GATHER",
            Self::Pairwise => "PAIRWISE",
            Self::Brucks => "BRUCKS",
            Self::KBrucks => "K_BRUCKS",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| format!("unknown collective algorithm '{s}'"))
    }
}
