// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Algorithm-specific parameters.

use crate::{AlgorithmKind, CollectiveError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The extra argument an algorithm may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmParam {
    #[default]
    Absent,
    /// Root rank for rooted collectives.
    Root(i64),
    /// Radix for k-ary variants.
    Radix(i64),
}

/// What an algorithm accepts as its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRule {
    /// A root must be given.
    RootRequired,
    /// A root may be given; rank 0 otherwise.
    RootOptional,
}

impl ParamRule {
    /// Resolves the root rank for a communicator of `comm_size` ranks.
    pub fn resolve_root(
        &self,
        algorithm: AlgorithmKind,
        param: AlgorithmParam,
        comm_size: usize,
    ) -> Result<usize, CollectiveError> {
        let root = match (self, param) {
            (_, AlgorithmParam::Root(r)) => r,
            (Self::RootOptional, AlgorithmParam::Absent) => 0,
            (Self::RootRequired, AlgorithmParam::Absent) => {
                return Err(CollectiveError::InvalidParameter {
                    algorithm,
                    detail: "a root rank is required".into(),
                })
            }
            (_, AlgorithmParam::Radix(k)) => {
                return Err(CollectiveError::InvalidParameter {
                    algorithm,
                    detail: format!("expected a root rank, got radix {k}"),
                })
            }
        };
        if root < 0 || root as u64 >= comm_size as u64 {
            return Err(CollectiveError::Range {
                what: "root",
                value: root,
                expected: format!("[0, {comm_size})"),
            });
        }
        Ok(root as usize)
    }
}

impl fmt::Display for AlgorithmParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("-"),
            Self::Root(r) => write!(f, "root={r}"),
            Self::Radix(k) => write!(f, "radix={k}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_required() {
        let rule = ParamRule::RootRequired;
        let algo = AlgorithmKind::Binomial;
        assert_eq!(rule.resolve_root(algo, AlgorithmParam::Root(3), 8).unwrap(), 3);
        assert!(matches!(
            rule.resolve_root(algo, AlgorithmParam::Absent, 8),
            Err(CollectiveError::InvalidParameter { .. })
        ));
        assert!(matches!(
            rule.resolve_root(algo, AlgorithmParam::Radix(2), 8),
            Err(CollectiveError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_root_optional_defaults_to_zero() {
        let rule = ParamRule::RootOptional;
        let algo = AlgorithmKind::RecursiveDoubling;
        assert_eq!(rule.resolve_root(algo, AlgorithmParam::Absent, 4).unwrap(), 0);
        assert_eq!(rule.resolve_root(algo, AlgorithmParam::Root(2), 4).unwrap(), 2);
    }

    #[test]
    fn test_root_range() {
        let rule = ParamRule::RootRequired;
        let algo = AlgorithmKind::Binomial;
        assert!(matches!(
            rule.resolve_root(algo, AlgorithmParam::Root(-1), 8),
            Err(CollectiveError::Range { value: -1, .. })
        ));
        assert!(matches!(
            rule.resolve_root(algo, AlgorithmParam::Root(8), 8),
            Err(CollectiveError::Range { value: 8, .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(AlgorithmParam::Root(4).to_string(), "root=4");
        assert_eq!(AlgorithmParam::Absent.to_string(), "-");
    }
}
