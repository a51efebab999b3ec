// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Static algorithm registry.
//!
//! Maps `(operation, algorithm)` to a round generator. Registered but
//! unmodelled variants are kept as explicit [`Handler::Unimplemented`]
//! entries so callers get `NotImplemented` rather than a silent zero;
//! unregistered combinations are `UnsupportedAlgorithm`.
//!
//! | Operation | Implemented | Registered, not implemented |
//! |---|---|---|
//! | `BCAST` | `BINOMIAL` | `SCATTER_RECURSIVE_DOUBLING_ALLGATHER`, `SCATTER_RING_ALLGATHER`, `SMP` |
//! | `SCATTER` | `BINOMIAL` | |
//! | `GATHER` | `BINOMIAL` | |
//! | `REDUCE` | `BINOMIAL` | `REDUCE_SCATTER_GATHER` |
//! | `ALLGATHER` | `RECURSIVE_DOUBLING` | `BRUCKS`, `K_BRUCKS`, `RING` |
//! | `ALLREDUCE` | | `RECURSIVE_DOUBLING`, `REDUCE_SCATTER_ALLGATHER` |
//! | `ALLTOALL` | | |

use crate::algorithms::{allgather, broadcast, gather, reduce, scatter, Generator};
use crate::param::ParamRule;
use crate::{AlgorithmKind, CollectiveError, OperationKind};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// What happens when an entry is invoked.
#[derive(Clone, Copy)]
pub enum Handler {
    Implemented(Generator),
    Unimplemented,
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Implemented(_) => f.write_str("Implemented"),
            Self::Unimplemented => f.write_str("Unimplemented"),
        }
    }
}

/// One registry entry.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub operation: OperationKind,
    pub algorithm: AlgorithmKind,
    pub handler: Handler,
    pub param: ParamRule,
}

impl Entry {
    pub fn is_implemented(&self) -> bool {
        matches!(self.handler, Handler::Implemented(_))
    }
}

/// Serializable view of an entry for listings.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmInfo {
    pub operation: OperationKind,
    pub algorithm: AlgorithmKind,
    pub implemented: bool,
}

type Registry = BTreeMap<(OperationKind, AlgorithmKind), Entry>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        use AlgorithmKind::*;
        use OperationKind::*;

        let implemented = |operation, algorithm, generator: Generator, param| Entry {
            operation,
            algorithm,
            handler: Handler::Implemented(generator),
            param,
        };
        let pending = |operation, algorithm| Entry {
            operation,
            algorithm,
            handler: Handler::Unimplemented,
            param: ParamRule::RootOptional,
        };

        let entries = [
            implemented(Bcast, Binomial, broadcast::binomial, ParamRule::RootRequired),
            pending(Bcast, ScatterRecursiveDoublingAllgather),
            pending(Bcast, ScatterRingAllgather),
            pending(Bcast, Smp),
            implemented(Scatter, Binomial, scatter::binomial, ParamRule::RootRequired),
            implemented(Gather, Binomial, gather::binomial, ParamRule::RootRequired),
            implemented(Reduce, Binomial, reduce::binomial, ParamRule::RootRequired),
            pending(Reduce, ReduceScatterGather),
            implemented(
                Allgather,
                RecursiveDoubling,
                allgather::recursive_doubling,
                ParamRule::RootOptional,
            ),
            pending(Allgather, Brucks),
            pending(Allgather, KBrucks),
            pending(Allgather, Ring),
            pending(Allreduce, RecursiveDoubling),
            pending(Allreduce, ReduceScatterAllgather),
        ];
        entries
            .into_iter()
            .map(|e| ((e.operation, e.algorithm), e))
            .collect()
    })
}

/// Looks up the entry for `(operation, algorithm)`.
pub fn lookup(operation: OperationKind, algorithm: AlgorithmKind) -> Result<&'static Entry, CollectiveError> {
    registry()
        .get(&(operation, algorithm))
        .ok_or(CollectiveError::UnsupportedAlgorithm {
            operation,
            algorithm,
        })
}

/// Entries registered for `operation`, in algorithm order.
pub fn entries(operation: OperationKind) -> impl Iterator<Item = &'static Entry> {
    registry()
        .values()
        .filter(move |e| e.operation == operation)
}

/// Listing of every entry, or only those of `operation`.
pub fn list(operation: Option<OperationKind>) -> Vec<AlgorithmInfo> {
    registry()
        .values()
        .filter(|e| operation.map_or(true, |op| e.operation == op))
        .map(|e| AlgorithmInfo {
            operation: e.operation,
            algorithm: e.algorithm,
            implemented: e.is_implemented(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_registered() {
        let e = lookup(OperationKind::Bcast, AlgorithmKind::Binomial).unwrap();
        assert!(e.is_implemented());
        assert_eq!(e.param, ParamRule::RootRequired);
    }

    #[test]
    fn test_lookup_pending() {
        let e = lookup(OperationKind::Bcast, AlgorithmKind::Smp).unwrap();
        assert!(!e.is_implemented());
    }

    #[test]
    fn test_lookup_unregistered() {
        let err = lookup(OperationKind::Allgather, AlgorithmKind::Smp).unwrap_err();
        assert!(matches!(
            err,
            CollectiveError::UnsupportedAlgorithm {
                algorithm: AlgorithmKind::Smp,
                ..
            }
        ));
        assert!(err.to_string().contains("SMP"));
    }

    #[test]
    fn test_alltoall_has_nothing() {
        assert_eq!(entries(OperationKind::Alltoall).count(), 0);
        for algo in AlgorithmKind::ALL {
            assert!(lookup(OperationKind::Alltoall, algo).is_err());
        }
    }

    #[test]
    fn test_listing() {
        let bcast = list(Some(OperationKind::Bcast));
        assert_eq!(bcast.len(), 4);
        assert_eq!(bcast.iter().filter(|i| i.implemented).count(), 1);
        assert_eq!(list(None).len(), 14);
    }
}
