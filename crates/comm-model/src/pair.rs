// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Communication pairs and their physical equality.
//!
//! Two pairs are equal when they compete for the same physical resource,
//! not when their fields match:
//!
//! | Pair kind | Equal when |
//! |---|---|
//! | relay | same relaying node and unit, and equal inner pairs |
//! | intra-node, intra-unit | same node and same unit |
//! | intra-node, inter-unit | same node and the same unordered unit pair |
//! | inter-node | the same unordered node pair |
//!
//! Pairs of different kinds are never equal. The rules are captured by a
//! canonical [`ContentionKey`]; `Eq` and `Hash` are both derived from it,
//! so pairs can be grouped in hash maps without breaking the semantics.

use crate::{CommError, Endpoint};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use topology::{Placed, Topology};

/// One transfer in a round.
#[derive(Debug, Clone)]
pub enum CommPair<'t> {
    /// A transfer between two ranks, oriented so `src ≤ dst`.
    Direct {
        src: Endpoint<'t>,
        dst: Endpoint<'t>,
        /// Whether orientation swapped the sender into `dst`.
        reversed: bool,
    },
    /// A rank relaying what is physically the `inner` transfer.
    Relay {
        via: Endpoint<'t>,
        inner: Box<CommPair<'t>>,
    },
}

/// Canonical form of the pair equality relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentionKey {
    Relay {
        node: usize,
        unit: usize,
        inner: Box<ContentionKey>,
    },
    IntraUnit {
        node: usize,
        unit: usize,
    },
    InterUnit {
        node: usize,
        units: (usize, usize),
    },
    InterNode {
        nodes: (usize, usize),
    },
}

fn unordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

impl<'t> CommPair<'t> {
    /// Builds a direct pair from `sender` to `receiver`.
    pub fn direct(topology: &'t Topology<Placed>, sender: usize, receiver: usize) -> Result<Self, CommError> {
        if sender == receiver {
            return Err(CommError::SelfPair { rank: sender });
        }
        let a = Endpoint::resolve(topology, sender)?;
        let b = Endpoint::resolve(topology, receiver)?;
        Ok(Self::from_endpoints(a, b))
    }

    /// Builds a direct pair from already-resolved endpoints.
    pub fn from_endpoints(sender: Endpoint<'t>, receiver: Endpoint<'t>) -> Self {
        if sender.orient_cmp(&receiver) == Ordering::Greater {
            Self::Direct {
                src: receiver,
                dst: sender,
                reversed: true,
            }
        } else {
            Self::Direct {
                src: sender,
                dst: receiver,
                reversed: false,
            }
        }
    }

    /// Builds a relay pair: `via` forwards the `inner` transfer.
    pub fn relay(topology: &'t Topology<Placed>, via: usize, inner: CommPair<'t>) -> Result<Self, CommError> {
        Ok(Self::Relay {
            via: Endpoint::resolve(topology, via)?,
            inner: Box::new(inner),
        })
    }

    // ── Predicates ─────────────────────────────────────────────────

    pub fn is_relay(&self) -> bool {
        matches!(self, Self::Relay { .. })
    }

    /// Relay pairs are self-to-self and therefore intra-node.
    pub fn is_intra_node(&self) -> bool {
        match self {
            Self::Direct { src, dst, .. } => src.same_node(dst),
            Self::Relay { .. } => true,
        }
    }

    pub fn is_inter_node(&self) -> bool {
        !self.is_intra_node()
    }

    /// Same node and same contention unit.
    pub fn is_intra_unit(&self) -> bool {
        match self {
            Self::Direct { src, dst, .. } => src.same_node(dst) && src.unit == dst.unit,
            Self::Relay { .. } => true,
        }
    }

    /// Same node, different contention units.
    pub fn is_inter_unit(&self) -> bool {
        self.is_intra_node() && !self.is_intra_unit()
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// The physical transfer this pair stands for: itself for direct
    /// pairs, the innermost direct pair for relays.
    pub fn transfer(&self) -> &CommPair<'t> {
        match self {
            Self::Direct { .. } => self,
            Self::Relay { inner, .. } => inner.transfer(),
        }
    }

    /// Normalised endpoints of the physical transfer.
    pub fn endpoints(&self) -> (&Endpoint<'t>, &Endpoint<'t>) {
        match self.transfer() {
            Self::Direct { src, dst, .. } => (src, dst),
            // `transfer` never returns a relay.
            Self::Relay { via, .. } => (via, via),
        }
    }

    /// The rank that sends the physical transfer.
    pub fn sender(&self) -> usize {
        match self.transfer() {
            Self::Direct { src, dst, reversed } => {
                if *reversed {
                    dst.rank
                } else {
                    src.rank
                }
            }
            Self::Relay { via, .. } => via.rank,
        }
    }

    /// The rank that receives the physical transfer.
    pub fn receiver(&self) -> usize {
        match self.transfer() {
            Self::Direct { src, dst, reversed } => {
                if *reversed {
                    src.rank
                } else {
                    dst.rank
                }
            }
            Self::Relay { via, .. } => via.rank,
        }
    }

    /// Canonical equality key.
    pub fn contention_key(&self) -> ContentionKey {
        match self {
            Self::Relay { via, inner } => ContentionKey::Relay {
                node: via.node_index(),
                unit: via.unit,
                inner: Box::new(inner.contention_key()),
            },
            Self::Direct { src, dst, .. } if src.same_node(dst) => {
                if src.unit == dst.unit {
                    ContentionKey::IntraUnit {
                        node: src.node_index(),
                        unit: src.unit,
                    }
                } else {
                    ContentionKey::InterUnit {
                        node: src.node_index(),
                        units: unordered(src.unit, dst.unit),
                    }
                }
            }
            Self::Direct { src, dst, .. } => ContentionKey::InterNode {
                nodes: unordered(src.node_index(), dst.node_index()),
            },
        }
    }

    /// Ordering for map bucketing: `(src node, dst node)` by name.
    ///
    /// Not consistent with `Eq`; use it only to sort, never to dedupe.
    pub fn bucket_cmp(&self, other: &CommPair<'_>) -> Ordering {
        let (a_src, a_dst) = self.endpoints();
        let (b_src, b_dst) = other.endpoints();
        a_src
            .node
            .name()
            .as_str()
            .cmp(b_src.node.name().as_str())
            .then_with(|| a_dst.node.name().as_str().cmp(b_dst.node.name().as_str()))
    }
}

impl PartialEq for CommPair<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.contention_key() == other.contention_key()
    }
}

impl Eq for CommPair<'_> {}

impl Hash for CommPair<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contention_key().hash(state);
    }
}

impl fmt::Display for CommPair<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { src, dst, reversed } => {
                let (from, to) = if *reversed { (dst, src) } else { (src, dst) };
                write!(f, "{from} -> {to}")
            }
            Self::Relay { via, inner } => write!(f, "[{inner}] via {via}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topology::{build_topology, Arrangement, Placement, Platform};

    /// Two nodes in one rack, 16 ranks each, block placement:
    /// rank r sits on node r / 16, core r % 16, unit (r % 16) / 4.
    fn topo() -> Topology<Placed> {
        build_topology(
            Platform::Df,
            "g1r1n[01-02]",
            16,
            Arrangement::nodes(Placement::Block),
        )
        .unwrap()
    }

    #[test]
    fn test_self_pair_rejected() {
        let t = topo();
        assert!(matches!(
            CommPair::direct(&t, 3, 3),
            Err(CommError::SelfPair { rank: 3 })
        ));
    }

    #[test]
    fn test_unbound_rank() {
        let t = topo();
        assert!(matches!(
            CommPair::direct(&t, 0, 99),
            Err(CommError::Topology(_))
        ));
    }

    #[test]
    fn test_orientation() {
        let t = topo();
        let fwd = CommPair::direct(&t, 0, 16).unwrap();
        let back = CommPair::direct(&t, 16, 0).unwrap();
        assert_eq!(fwd, back);
        assert_eq!(back.sender(), 16);
        assert_eq!(back.receiver(), 0);
        assert!(matches!(back, CommPair::Direct { reversed: true, .. }));
        assert_eq!(
            back.to_string(),
            "g1r1n02{rank 16, core 0} -> g1r1n01{rank 0, core 0}"
        );
    }

    #[test]
    fn test_predicates() {
        let t = topo();
        let intra_unit = CommPair::direct(&t, 0, 1).unwrap();
        let inter_unit = CommPair::direct(&t, 0, 4).unwrap();
        let inter_node = CommPair::direct(&t, 0, 16).unwrap();
        assert!(intra_unit.is_intra_node() && intra_unit.is_intra_unit());
        assert!(inter_unit.is_intra_node() && inter_unit.is_inter_unit());
        assert!(inter_node.is_inter_node() && !inter_node.is_inter_unit());
        let relay = CommPair::relay(&t, 2, inter_node.clone()).unwrap();
        assert!(relay.is_relay() && relay.is_intra_node());
    }

    #[test]
    fn test_inter_node_equal_by_node_set() {
        let t = topo();
        let a = CommPair::direct(&t, 0, 16).unwrap();
        let b = CommPair::direct(&t, 17, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_intra_unit_equal_by_unit() {
        let t = topo();
        assert_eq!(
            CommPair::direct(&t, 0, 1).unwrap(),
            CommPair::direct(&t, 2, 3).unwrap()
        );
        assert_ne!(
            CommPair::direct(&t, 0, 1).unwrap(),
            CommPair::direct(&t, 4, 5).unwrap()
        );
        assert_ne!(
            CommPair::direct(&t, 0, 1).unwrap(),
            CommPair::direct(&t, 16, 17).unwrap()
        );
    }

    #[test]
    fn test_inter_unit_equal_by_unit_set() {
        let t = topo();
        let a = CommPair::direct(&t, 0, 4).unwrap();
        let b = CommPair::direct(&t, 5, 1).unwrap();
        let c = CommPair::direct(&t, 0, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_kinds_never_mix() {
        let t = topo();
        let intra_unit = CommPair::direct(&t, 0, 1).unwrap();
        let inter_unit = CommPair::direct(&t, 0, 4).unwrap();
        let inter_node = CommPair::direct(&t, 0, 16).unwrap();
        let relay = CommPair::relay(&t, 0, intra_unit.clone()).unwrap();
        assert_ne!(intra_unit, inter_unit);
        assert_ne!(inter_unit, inter_node);
        assert_ne!(relay, intra_unit);
    }

    #[test]
    fn test_relay_equality() {
        let t = topo();
        let inner = CommPair::direct(&t, 0, 16).unwrap();
        let same_inner = CommPair::direct(&t, 20, 3).unwrap();
        let r1 = CommPair::relay(&t, 1, inner.clone()).unwrap();
        let r2 = CommPair::relay(&t, 2, same_inner).unwrap();
        let other_unit = CommPair::relay(&t, 8, inner.clone()).unwrap();
        let other_inner = CommPair::relay(&t, 1, CommPair::direct(&t, 0, 1).unwrap()).unwrap();
        assert_eq!(r1, r2);
        assert_ne!(r1, other_unit);
        assert_ne!(r1, other_inner);
        assert_eq!(r1.transfer(), &inner);
        assert_eq!(r1.sender(), 0);
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        use std::collections::HashSet;
        let t = topo();
        let mut set = HashSet::new();
        set.insert(CommPair::direct(&t, 0, 16).unwrap());
        set.insert(CommPair::direct(&t, 31, 15).unwrap());
        set.insert(CommPair::direct(&t, 0, 4).unwrap());
        set.insert(CommPair::direct(&t, 6, 3).unwrap());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_bucket_cmp() {
        let t = build_topology(
            Platform::Df,
            "g1r1n[01-03]",
            1,
            Arrangement::nodes(Placement::Block),
        )
        .unwrap();
        let a = CommPair::direct(&t, 0, 1).unwrap();
        let b = CommPair::direct(&t, 0, 2).unwrap();
        assert_eq!(a.bucket_cmp(&b), Ordering::Less);
        assert_eq!(b.bucket_cmp(&a), Ordering::Greater);
    }
}
