// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The prediction front end.
//!
//! A [`Predictor`] pairs one placed topology with one cost model. Both
//! are read-only and shared behind `Arc`, so a predictor clones cheaply
//! and every size in a sweep can be costed on its own blocking task.
//!
//! ```text
//!   sizes [s0, s1, s2, …]
//!      │  one spawn_blocking task each (bounded by num_threads)
//!      ▼
//!   predict_detailed(s_i) ──► Prediction_i
//!      │  awaited in input order
//!      ▼
//!   [P0, P1, P2, …]
//! ```

use crate::report::{Comparison, PredictionReport};
use crate::{PredictorConfig, PredictorError};
use collective::registry::{self, Handler};
use collective::{
    AlgorithmKind, AlgorithmParam, CollectiveEngine, CollectiveError, OperationKind, Prediction,
};
use cost_model::CostModel;
use std::sync::Arc;
use tokio::sync::Semaphore;
use topology::{Placed, Topology};

/// Predicts collective costs on one topology with one cost model.
#[derive(Debug, Clone)]
pub struct Predictor {
    topology: Arc<Topology<Placed>>,
    engine: CollectiveEngine,
    concurrency: usize,
}

impl Predictor {
    /// Creates a predictor over a placed topology and a cost model.
    pub fn new(topology: Topology<Placed>, cost: Arc<dyn CostModel>) -> Self {
        let concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            topology: Arc::new(topology),
            engine: CollectiveEngine::new(cost),
            concurrency,
        }
    }

    /// Builds the topology and loads the cost tables named in `config`.
    pub fn from_config(config: &PredictorConfig) -> Result<Self, PredictorError> {
        let topology = config.build_topology()?;
        let model = config.load_cost_model()?;
        tracing::info!(
            "predictor ready: {} with cost model '{}'",
            topology.summary(),
            model.name()
        );
        Ok(Self::new(topology, Arc::new(model)).with_concurrency(config.resolve_threads()))
    }

    /// Caps the number of sizes costed at once by the concurrent sweep.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    pub fn topology(&self) -> &Topology<Placed> {
        &self.topology
    }

    pub fn engine(&self) -> &CollectiveEngine {
        &self.engine
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Total predicted cost of one call.
    pub fn predict(
        &self,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        message_size: u64,
        param: AlgorithmParam,
    ) -> Result<f64, PredictorError> {
        Ok(self
            .engine
            .predict(&self.topology, operation, algorithm, message_size, param)?)
    }

    /// One call with a per-round breakdown.
    pub fn predict_detailed(
        &self,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        message_size: u64,
        param: AlgorithmParam,
    ) -> Result<Prediction, PredictorError> {
        Ok(self
            .engine
            .predict_detailed(&self.topology, operation, algorithm, message_size, param)?)
    }

    /// Total cost per size, sequentially, in input order.
    pub fn predict_many(
        &self,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        message_sizes: &[u64],
        param: AlgorithmParam,
    ) -> Result<Vec<f64>, PredictorError> {
        Ok(self
            .engine
            .predict_many(&self.topology, operation, algorithm, message_sizes, param)?)
    }

    /// Costs every size on its own blocking task.
    ///
    /// Results come back in input order. If several sizes fail, the
    /// error of the earliest one in the input is returned.
    pub async fn predict_many_concurrent(
        &self,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        message_sizes: &[u64],
        param: AlgorithmParam,
    ) -> Result<Vec<Prediction>, PredictorError> {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(message_sizes.len());

        for &size in message_sizes {
            let permit = Arc::clone(&permits)
                .acquire_owned()
                .await
                .map_err(|e| PredictorError::TaskError(e.to_string()))?;
            let this = self.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                this.predict_detailed(operation, algorithm, size, param)
            }));
        }

        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            let prediction = handle
                .await
                .map_err(|e| PredictorError::TaskError(e.to_string()))??;
            out.push(prediction);
        }
        tracing::info!(
            "costed {} sizes of {}/{} with up to {} tasks",
            out.len(),
            operation,
            algorithm,
            self.concurrency
        );
        Ok(out)
    }

    /// Sequential sweep wrapped in a report.
    pub fn sweep(
        &self,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        message_sizes: &[u64],
        param: AlgorithmParam,
    ) -> Result<PredictionReport, PredictorError> {
        let predictions = message_sizes
            .iter()
            .map(|&size| self.predict_detailed(operation, algorithm, size, param))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.report(operation, algorithm, predictions))
    }

    /// Wraps finished predictions in a report for this topology.
    pub fn report(
        &self,
        operation: OperationKind,
        algorithm: AlgorithmKind,
        predictions: Vec<Prediction>,
    ) -> PredictionReport {
        PredictionReport {
            operation,
            algorithm,
            topology: self.topology.summary(),
            cost_model: self.engine.cost_model().name().to_string(),
            predictions,
        }
    }

    /// Costs every registered algorithm of `operation` at one size.
    ///
    /// Registered but unmodelled algorithms are listed as unavailable.
    /// Any other failure aborts the comparison.
    pub fn compare(
        &self,
        operation: OperationKind,
        message_size: u64,
        param: AlgorithmParam,
    ) -> Result<Comparison, PredictorError> {
        let mut ranked = Vec::new();
        let mut unavailable = Vec::new();

        for entry in registry::entries(operation) {
            if let Handler::Unimplemented = entry.handler {
                unavailable.push(entry.algorithm);
                continue;
            }
            match self.predict_detailed(operation, entry.algorithm, message_size, param) {
                Ok(p) => ranked.push(p),
                Err(PredictorError::CollectiveError(CollectiveError::NotImplemented { algorithm, .. })) => {
                    unavailable.push(algorithm)
                }
                Err(e) => return Err(e),
            }
        }
        if ranked.is_empty() && unavailable.is_empty() {
            tracing::warn!("{} has no registered algorithms", operation);
        }

        ranked.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
        Ok(Comparison {
            operation,
            message_size,
            ranked,
            unavailable,
        })
    }
}
