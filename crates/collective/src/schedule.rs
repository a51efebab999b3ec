// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simulated communication schedules.
//!
//! A [`Schedule`] is the pure output of an algorithm generator: the
//! ordered rounds and, per round, every transfer with its byte count.
//! Costing happens separately in the engine.

use crate::{AlgorithmKind, OperationKind};
use comm_model::CommPair;
use cost_model::TrafficPattern;

/// One transfer in a round.
#[derive(Debug, Clone)]
pub struct Transfer<'t> {
    pub pair: CommPair<'t>,
    pub bytes: u64,
}

/// One synchronised step of an algorithm.
#[derive(Debug, Clone)]
pub struct Round<'t> {
    /// Zero-based position in the schedule.
    pub index: usize,
    /// Partner-selection bit for this round.
    pub mask: usize,
    pub pattern: TrafficPattern,
    /// Every transfer appears twice (simulated from both ends).
    pub duplicated: bool,
    pub transfers: Vec<Transfer<'t>>,
}

impl<'t> Round<'t> {
    pub(crate) fn new(index: usize, mask: usize, pattern: TrafficPattern) -> Self {
        Self {
            index,
            mask,
            pattern,
            duplicated: false,
            transfers: Vec::new(),
        }
    }

    pub(crate) fn duplicated(mut self) -> Self {
        self.duplicated = true;
        self
    }

    pub(crate) fn push(&mut self, pair: CommPair<'t>, bytes: u64) {
        self.transfers.push(Transfer { pair, bytes });
    }

    /// Iterates the round's pairs.
    pub fn pairs(&self) -> impl Iterator<Item = &CommPair<'t>> {
        self.transfers.iter().map(|t| &t.pair)
    }

    /// Bytes moved by the round, counting each physical transfer once.
    pub fn bytes(&self) -> u64 {
        let raw = self
            .transfers
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(t.bytes));
        if self.duplicated {
            raw / 2
        } else {
            raw
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}

/// The full round sequence of one collective call.
#[derive(Debug, Clone)]
pub struct Schedule<'t> {
    pub operation: OperationKind,
    pub algorithm: AlgorithmKind,
    pub comm_size: usize,
    pub root: usize,
    pub message_size: u64,
    pub rounds: Vec<Round<'t>>,
}

impl<'t> Schedule<'t> {
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Total transfers across all rounds, as generated.
    pub fn num_transfers(&self) -> usize {
        self.rounds.iter().map(|r| r.transfers.len()).sum()
    }

    pub fn iter_rounds(&self) -> impl Iterator<Item = &Round<'t>> {
        self.rounds.iter()
    }
}
