// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Physical nodes and their position in the network hierarchy.
//!
//! A node name is matched against the platform pattern exactly once, at
//! construction, and kept as an ordered list of hierarchy segments
//! (outermost first). Level computations then compare segments
//! positionally without touching the regex again.

use crate::{Platform, PlatformProfile, TopologyError};
use std::fmt;

/// A validated node name split into its hierarchy segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName {
    name: String,
    segments: Vec<String>,
}

impl NodeName {
    /// Parses `name` against the platform's node-name pattern.
    pub fn parse(name: &str, platform: Platform) -> Result<Self, TopologyError> {
        let profile = platform.profile()?;
        let segments = profile.split_segments(name).ok_or_else(|| {
            TopologyError::parse(
                name,
                format!("node name does not match the {platform} naming pattern"),
            )
        })?;
        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    /// The full node name.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Hierarchy segments, outermost first (e.g. `["g12", "r1", "n01"]`).
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Network level separating two nodes: `L - i - 1`, where `i` is the
    /// index of the first differing segment and `L` the segment count.
    ///
    /// Identical names (and names of different depth) have no defined
    /// network level.
    pub fn level_distance(&self, other: &NodeName) -> Result<usize, TopologyError> {
        let undefined = || TopologyError::UndefinedLevel {
            lhs: self.name.clone(),
            rhs: other.name.clone(),
        };
        if self.segments.len() != other.segments.len() {
            return Err(undefined());
        }
        let depth = self.segments.len();
        self.segments
            .iter()
            .zip(&other.segments)
            .position(|(a, b)| a != b)
            .map(|i| depth - i - 1)
            .ok_or_else(undefined)
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One physical node of the cluster.
///
/// Nodes are immutable: rank-to-core bindings live in the placed
/// [`Topology`](crate::Topology), not here.
#[derive(Debug, Clone)]
pub struct Node {
    name: NodeName,
    index: usize,
    platform: Platform,
    profile: &'static PlatformProfile,
}

impl Node {
    pub(crate) fn new(name: NodeName, index: usize, platform: Platform) -> Result<Self, TopologyError> {
        Ok(Self {
            name,
            index,
            platform,
            profile: platform.profile()?,
        })
    }

    /// The node name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Position of this node in the parsed node list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn max_node_level(&self) -> usize {
        self.profile.max_node_level
    }

    pub fn max_core_level(&self) -> usize {
        self.profile.max_core_level
    }

    pub fn core_count(&self) -> usize {
        self.profile.cores_per_node
    }

    pub fn numa_count(&self) -> usize {
        self.profile.numa_count
    }

    pub fn cores_per_numa(&self) -> usize {
        self.profile.cores_per_numa
    }

    pub fn cores_per_unit(&self) -> usize {
        self.profile.cores_per_unit
    }

    /// Contention unit that `core` belongs to.
    pub fn unit_of_core(&self, core: usize) -> usize {
        core / self.profile.cores_per_unit
    }

    /// NUMA domain that `core` belongs to.
    pub fn numa_of_core(&self, core: usize) -> usize {
        core / self.profile.cores_per_numa
    }

    /// Network level between this node and `other`.
    pub fn level_distance(&self, other: &Node) -> Result<usize, TopologyError> {
        self.name.level_distance(&other.name)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Node {}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Network level between two node names on `platform`.
pub fn level_distance(a: &str, b: &str, platform: Platform) -> Result<usize, TopologyError> {
    let undefined = || TopologyError::UndefinedLevel {
        lhs: a.to_string(),
        rhs: b.to_string(),
    };
    let lhs = NodeName::parse(a, platform).map_err(|_| undefined())?;
    let rhs = NodeName::parse(b, platform).map_err(|_| undefined())?;
    lhs.level_distance(&rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> NodeName {
        NodeName::parse(s, Platform::Df).unwrap()
    }

    #[test]
    fn test_parse_segments() {
        let n = name("g12r1n01");
        assert_eq!(n.segments(), &["g12", "r1", "n01"]);
        assert_eq!(n.as_str(), "g12r1n01");
    }

    #[test]
    fn test_parse_rejects_bad_name() {
        let err = NodeName::parse("node-01", Platform::Df).unwrap_err();
        assert!(matches!(err, TopologyError::Parse { .. }));
    }

    #[test]
    fn test_level_same_rack() {
        assert_eq!(name("g1r1n01").level_distance(&name("g1r1n02")).unwrap(), 0);
    }

    #[test]
    fn test_level_same_group() {
        assert_eq!(name("g1r1n01").level_distance(&name("g1r2n01")).unwrap(), 1);
    }

    #[test]
    fn test_level_different_group() {
        assert_eq!(name("g1r1n01").level_distance(&name("g2r1n01")).unwrap(), 2);
        assert_eq!(name("g2r1n01").level_distance(&name("g1r3n07")).unwrap(), 2);
    }

    #[test]
    fn test_level_identical_is_undefined() {
        let err = name("g1r1n01").level_distance(&name("g1r1n01")).unwrap_err();
        assert!(matches!(err, TopologyError::UndefinedLevel { .. }));
    }

    #[test]
    fn test_level_distance_unmatched_names() {
        let err = level_distance("g1r1n01", "bogus", Platform::Df).unwrap_err();
        assert!(matches!(err, TopologyError::UndefinedLevel { .. }));
        assert_eq!(level_distance("g1r1n01", "g1r2n01", Platform::Df).unwrap(), 1);
    }

    #[test]
    fn test_node_units() {
        let node = Node::new(name("g1r1n01"), 0, Platform::Df).unwrap();
        assert_eq!(node.unit_of_core(0), 0);
        assert_eq!(node.unit_of_core(3), 0);
        assert_eq!(node.unit_of_core(4), 1);
        assert_eq!(node.numa_of_core(8), 1);
        assert_eq!(node.core_count(), 30);
    }
}
