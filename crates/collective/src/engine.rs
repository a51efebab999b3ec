// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The collective engine: simulate a schedule, then fold it into a cost.
//!
//! ```text
//!  (op, algo, size, param)
//!        │  registry::lookup
//!        ▼
//!   generator(SimContext) ──► Schedule { rounds }
//!        │                          │ per round
//!        │                          ▼
//!        │             analyze(pairs) ──► classes
//!        │                          │ per class
//!        │                          ▼
//!        │        Category { L0|L1, level, pattern, count }
//!        │                          │ transfer_cost
//!        ▼                          ▼
//!   Prediction  ◄── Σ rounds ◄── max over classes
//! ```
//!
//! The engine holds no per-call state. One engine and one placed
//! topology can serve any number of concurrent predictions.

use crate::algorithms::SimContext;
use crate::registry::{self, AlgorithmInfo, Handler};
use crate::report::{Prediction, RoundReport};
use crate::{AlgorithmKind, AlgorithmParam, CollectiveError, OperationKind, Round, Schedule};
use comm_model::{analyze, CommPair};
use cost_model::{transfer_cost, Category, CostModel, LevelKind};
use std::sync::Arc;
use topology::{Placed, Topology};

/// Costs collective calls against an injected [`CostModel`].
#[derive(Clone)]
pub struct CollectiveEngine {
    cost: Arc<dyn CostModel>,
}

impl std::fmt::Debug for CollectiveEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectiveEngine")
            .field("cost", &self.cost.name())
            .finish()
    }
}

impl CollectiveEngine {
    pub fn new(cost: Arc<dyn CostModel>) -> Self {
        Self { cost }
    }

    pub fn cost_model(&self) -> &dyn CostModel {
        self.cost.as_ref()
    }

    /// Generates the round schedule without costing it.
    ///
    /// Checks run in this order: registration, message size,
    /// implementation status, then the root parameter.
    pub fn simulate<'t>(
        &self,
        topology: &'t Topology<Placed>,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        message_size: u64,
        param: AlgorithmParam,
    ) -> Result<Schedule<'t>, CollectiveError> {
        let entry = registry::lookup(operation, algorithm)?;
        if message_size == 0 {
            return Err(CollectiveError::Range {
                what: "message size",
                value: 0,
                expected: "at least 1 byte".into(),
            });
        }
        let generator = match entry.handler {
            Handler::Implemented(g) => g,
            Handler::Unimplemented => {
                return Err(CollectiveError::NotImplemented {
                    operation,
                    algorithm,
                })
            }
        };

        let comm_size = topology.rank_count();
        let root = entry.param.resolve_root(algorithm, param, comm_size)?;
        let ctx = SimContext {
            topology,
            operation,
            algorithm,
            comm_size,
            root,
            message_size,
        };
        generator(&ctx)
    }

    /// Cost of one round: the most expensive contention class.
    pub fn cost_round(
        &self,
        topology: &Topology<Placed>,
        round: &Round<'_>,
    ) -> Result<RoundReport, CollectiveError> {
        let classes = analyze(round.pairs());
        let mut cost = 0.0_f64;
        let mut max_contention = 0;

        for class in &classes {
            let bytes = class
                .members
                .iter()
                .map(|&i| round.transfers[i].bytes)
                .max()
                .unwrap_or(0);
            let count = class.physical_count(round.duplicated);
            let category = classify(topology, class.representative, round, count)?;
            let class_cost = transfer_cost(self.cost.as_ref(), bytes, &category)?;
            tracing::debug!(
                "round {} class {} ({}): {} B, cost {:.6}",
                round.index,
                class.representative,
                category,
                bytes,
                class_cost
            );
            cost = cost.max(class_cost);
            max_contention = max_contention.max(count);
        }

        Ok(RoundReport {
            index: round.index,
            mask: round.mask,
            pairs: round.transfers.len(),
            classes: classes.len(),
            bytes: round.bytes(),
            max_contention,
            cost,
        })
    }

    /// Simulates and costs one call, with a per-round breakdown.
    pub fn predict_detailed(
        &self,
        topology: &Topology<Placed>,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        message_size: u64,
        param: AlgorithmParam,
    ) -> Result<Prediction, CollectiveError> {
        let schedule = self.simulate(topology, operation, algorithm, message_size, param)?;
        tracing::info!(
            "predicting {}/{} for P={} at {} B ({} rounds)",
            operation,
            algorithm,
            schedule.comm_size,
            message_size,
            schedule.num_rounds()
        );

        let rounds = schedule
            .iter_rounds()
            .map(|r| self.cost_round(topology, r))
            .collect::<Result<Vec<_>, _>>()?;
        let total_cost = rounds.iter().map(|r| r.cost).sum();

        Ok(Prediction {
            operation,
            algorithm,
            message_size,
            comm_size: schedule.comm_size,
            root: schedule.root,
            total_cost,
            rounds,
        })
    }

    /// Total predicted cost of one call.
    pub fn predict(
        &self,
        topology: &Topology<Placed>,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        message_size: u64,
        param: AlgorithmParam,
    ) -> Result<f64, CollectiveError> {
        self.predict_detailed(topology, operation, algorithm, message_size, param)
            .map(|p| p.total_cost)
    }

    /// [`predict`](Self::predict) for each size, in input order.
    pub fn predict_many(
        &self,
        topology: &Topology<Placed>,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        message_sizes: &[u64],
        param: AlgorithmParam,
    ) -> Result<Vec<f64>, CollectiveError> {
        message_sizes
            .iter()
            .map(|&size| self.predict(topology, operation, algorithm, size, param))
            .collect()
    }

    /// Registered algorithms for `operation`.
    pub fn algorithms(&self, operation: OperationKind) -> Vec<AlgorithmInfo> {
        registry::list(Some(operation))
    }
}

/// Builds the cost category for a class from its physical transfer.
fn classify(
    topology: &Topology<Placed>,
    pair: &CommPair<'_>,
    round: &Round<'_>,
    contention: usize,
) -> Result<Category, CollectiveError> {
    let (a, b) = pair.endpoints();
    let (kind, level) = if pair.transfer().is_intra_node() {
        (LevelKind::IntraNode, topology.core_level(a.rank, b.rank)?)
    } else {
        (LevelKind::InterNode, topology.net_level(a.rank, b.rank)?)
    };
    Ok(Category {
        kind,
        level,
        pattern: round.pattern,
        contention,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::topo;
    use cost_model::CostError;

    /// Latency 1 per category, everything else zero.
    struct UnitCost;

    impl CostModel for UnitCost {
        fn latency(&self, _size: u64, _key: &str) -> Result<f64, CostError> {
            Ok(1.0)
        }

        fn bandwidth(&self, _size: u64, _key: &str) -> Result<f64, CostError> {
            Ok(1.0)
        }
    }

    fn engine() -> CollectiveEngine {
        CollectiveEngine::new(Arc::new(UnitCost))
    }

    #[test]
    fn test_one_unit_per_round() {
        let t = topo(1, 8);
        let cost = engine()
            .predict(&t, OperationKind::Bcast, AlgorithmKind::Binomial, 4, AlgorithmParam::Root(0))
            .unwrap();
        assert_eq!(cost, 3.0);
    }

    #[test]
    fn test_zero_size_rejected() {
        let t = topo(1, 4);
        let err = engine()
            .predict(&t, OperationKind::Bcast, AlgorithmKind::Binomial, 0, AlgorithmParam::Root(0))
            .unwrap_err();
        assert!(matches!(err, CollectiveError::Range { what: "message size", .. }));
    }

    #[test]
    fn test_unregistered_before_size_check() {
        let t = topo(1, 4);
        let err = engine()
            .predict(&t, OperationKind::Alltoall, AlgorithmKind::Pairwise, 0, AlgorithmParam::Absent)
            .unwrap_err();
        assert!(matches!(err, CollectiveError::UnsupportedAlgorithm { .. }));
    }

    #[test]
    fn test_duplicated_round_halves_contention() {
        let t = topo(1, 4);
        let e = engine();
        let s = e
            .simulate(&t, OperationKind::Allgather, AlgorithmKind::RecursiveDoubling, 8, AlgorithmParam::Absent)
            .unwrap();
        let report = e.cost_round(&t, &s.rounds[0]).unwrap();
        // Ranks 0..4 share unit 0, so all four simulated pairs are one class.
        assert_eq!(report.pairs, 4);
        assert_eq!(report.classes, 1);
        assert_eq!(report.max_contention, 2);
        assert_eq!(report.bytes, 16);
    }

    #[test]
    fn test_single_rank_has_no_rounds() {
        let t = topo(1, 1);
        let p = engine()
            .predict_detailed(&t, OperationKind::Bcast, AlgorithmKind::Binomial, 64, AlgorithmParam::Root(0))
            .unwrap();
        assert_eq!(p.num_rounds(), 0);
        assert_eq!(p.total_cost, 0.0);
    }
}
