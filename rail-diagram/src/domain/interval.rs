//! Railway interval type.

use generational_arena::Index;

use super::{Direction, ForbidNode, RulerNode, StationId};

/// Stable handle of an interval owned by a [`crate::railway::Railway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntervalId(pub(crate) Index);

/// A directed edge between two stations adjacent in one travel direction.
///
/// # Invariants
///
/// - `ruler_nodes.len()` equals the owning railway's ruler count.
/// - `forbid_nodes.len()` equals the owning railway's forbid count.
/// - `ruler_nodes[i]` belongs to the ruler whose index is `i`.
#[derive(Debug, Clone)]
pub struct RailInterval {
    pub(crate) direction: Direction,
    pub(crate) from: StationId,
    pub(crate) to: StationId,
    pub(crate) ruler_nodes: Vec<RulerNode>,
    pub(crate) forbid_nodes: Vec<ForbidNode>,
}

impl RailInterval {
    /// Create an interval with one null node per ruler and forbid.
    pub(crate) fn new(
        direction: Direction,
        from: StationId,
        to: StationId,
        rulers: usize,
        forbids: usize,
    ) -> Self {
        Self {
            direction,
            from,
            to,
            ruler_nodes: vec![RulerNode::default(); rulers],
            forbid_nodes: vec![ForbidNode::default(); forbids],
        }
    }

    /// Direction of travel along this interval.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true for a down-chain interval.
    pub fn is_down(&self) -> bool {
        self.direction.is_down()
    }

    /// Station the interval leaves.
    pub fn from_station(&self) -> StationId {
        self.from
    }

    /// Station the interval arrives at.
    pub fn to_station(&self) -> StationId {
        self.to
    }

    /// One node per ruler, in ruler index order.
    pub fn ruler_nodes(&self) -> &[RulerNode] {
        &self.ruler_nodes
    }

    /// One node per forbid, in forbid index order.
    pub fn forbid_nodes(&self) -> &[ForbidNode] {
        &self.forbid_nodes
    }

    /// Node of the ruler at index `ruler`.
    pub fn ruler_node(&self, ruler: usize) -> Option<&RulerNode> {
        self.ruler_nodes.get(ruler)
    }

    /// Mutable node of the ruler at index `ruler`.
    pub fn ruler_node_mut(&mut self, ruler: usize) -> Option<&mut RulerNode> {
        self.ruler_nodes.get_mut(ruler)
    }

    /// Node of the forbid at index `forbid`.
    pub fn forbid_node(&self, forbid: usize) -> Option<&ForbidNode> {
        self.forbid_nodes.get(forbid)
    }

    /// Mutable node of the forbid at index `forbid`.
    pub fn forbid_node_mut(&mut self, forbid: usize) -> Option<&mut ForbidNode> {
        self.forbid_nodes.get_mut(forbid)
    }

    /// Absorb `next`, which must start where `self` ends.
    ///
    /// The endpoint moves to `next.to` and every node is merged pairwise.
    /// Relinking the stations is the caller's job.
    pub(crate) fn merge_with(&mut self, next: &RailInterval) {
        self.to = next.to;
        for (node, other) in self.ruler_nodes.iter_mut().zip(&next.ruler_nodes) {
            *node = node.merged(other);
        }
        for (node, other) in self.forbid_nodes.iter_mut().zip(&next.forbid_nodes) {
            *node = node.merged(other);
        }
    }
}
