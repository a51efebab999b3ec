// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Round generators for the modelled collective algorithms.
//!
//! Every generator works on ranks relative to the root
//! (`relative = (rank - root) mod P`), builds the round-by-round transfer
//! list, and returns it as a [`Schedule`]. Generators are pure: no cost
//! lookups and no shared state.
//!
//! | Generator | Mask order | Pattern | Bytes per send |
//! |---|---|---|---|
//! | [`broadcast::binomial`] | `pof2(P)/2 … 1` | `PING` | full message |
//! | [`scatter::binomial`] | `pof2(P)/2 … 1` | `PING` | remaining subtree |
//! | [`gather::binomial`] | `1 … pof2(P)/2` | `PING` | accumulated subtree |
//! | [`reduce::binomial`] | `1 … pof2(P)/2` | `PING` | full message |
//! | [`allgather::recursive_doubling`] | `1 … pof2(P)/2` | `DUPLEX` | `size × mask` |

pub mod allgather;
pub mod broadcast;
pub mod gather;
pub mod reduce;
pub mod scatter;

use crate::{AlgorithmKind, CollectiveError, OperationKind, Schedule};
use comm_model::CommPair;
use topology::{Placed, Topology};

/// A round generator.
pub type Generator = for<'t> fn(&SimContext<'t>) -> Result<Schedule<'t>, CollectiveError>;

/// Everything a generator needs for one call.
#[derive(Debug, Clone, Copy)]
pub struct SimContext<'t> {
    pub topology: &'t Topology<Placed>,
    pub operation: OperationKind,
    pub algorithm: AlgorithmKind,
    /// Communicator size `P`.
    pub comm_size: usize,
    /// Root rank, already validated against `comm_size`.
    pub root: usize,
    pub message_size: u64,
}

impl<'t> SimContext<'t> {
    /// Rank for a root-relative index.
    pub fn absolute(&self, relative: usize) -> usize {
        (relative + self.root) % self.comm_size
    }

    /// Root-relative index of `rank`.
    pub fn relative(&self, rank: usize) -> usize {
        (rank + self.comm_size - self.root) % self.comm_size
    }

    /// Direct pair between two root-relative indices.
    pub fn pair(&self, from_rel: usize, to_rel: usize) -> Result<CommPair<'t>, CollectiveError> {
        Ok(CommPair::direct(
            self.topology,
            self.absolute(from_rel),
            self.absolute(to_rel),
        )?)
    }

    /// Per-rank chunk for size-splitting collectives: `ceil(size / P)`.
    pub fn chunk(&self) -> u64 {
        self.message_size.div_ceil(self.comm_size as u64)
    }

    /// Total bytes held by the root of a size-splitting tree: `chunk · P`.
    ///
    /// Fails when rounding the message up to whole chunks overflows `u64`.
    pub fn padded_size(&self) -> Result<u64, CollectiveError> {
        let p = self.comm_size.max(1) as u64;
        self.chunk()
            .checked_mul(p)
            .ok_or_else(|| CollectiveError::Range {
                what: "message size",
                value: i64::try_from(self.message_size).unwrap_or(i64::MAX),
                expected: format!("at most {} bytes for {} ranks", (u64::MAX / p) * p, p),
            })
    }

    pub(crate) fn schedule(&self, rounds: Vec<crate::Round<'t>>) -> Schedule<'t> {
        Schedule {
            operation: self.operation,
            algorithm: self.algorithm,
            comm_size: self.comm_size,
            root: self.root,
            message_size: self.message_size,
            rounds,
        }
    }
}

/// Masks for binomial trees walked root-down: `pof2(P)/2, …, 2, 1`.
pub(crate) fn descending_masks(comm_size: usize) -> impl Iterator<Item = usize> {
    let top = comm_size.next_power_of_two();
    std::iter::successors(Some(top >> 1), |m| Some(m >> 1)).take_while(|&m| m > 0)
}

/// Masks for trees and exchanges walked leaf-up: `1, 2, …` while `< P`.
pub(crate) fn ascending_masks(comm_size: usize) -> impl Iterator<Item = usize> {
    std::iter::successors(Some(1usize), |m| m.checked_mul(2)).take_while(move |&m| m < comm_size)
}
