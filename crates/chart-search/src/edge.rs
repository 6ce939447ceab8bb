//! Pooled storage for partial edges.
//!
//! A [`PartialEdge`] is a dense `u32` handle into an [`EdgePool`]. The pool
//! stores every edge's header and child slots contiguously and only ever
//! grows: there is no release operation, and all storage is reclaimed when
//! the pool is dropped together with its owning engine.
//!
//! # Determinism
//! - Handles are issued in allocation order starting from zero.
//! - `PartialEdge::INVALID` (`u32::MAX`) is never issued by `allocate`.

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};
use crate::types::{Arity, Score, VertexId};

/// Handle to a pooled, arity-shaped hypothesis payload.
///
/// Either refers to a materialized edge, or is the invalid marker returned
/// when an advance produced nothing usable.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialEdge(u32);

impl PartialEdge {
    /// The invalid marker.
    pub const INVALID: PartialEdge = PartialEdge(u32::MAX);

    /// Returns the invalid marker.
    #[inline]
    pub const fn invalid() -> Self {
        Self::INVALID
    }

    /// Whether this handle refers to a materialized edge.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Position in the pool.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for PartialEdge {
    fn default() -> Self {
        Self::INVALID
    }
}

/// One sub-derivation slot: a chart vertex and the rank of the alternative
/// chosen from it (0 = best).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChildSlot {
    pub vertex: VertexId,
    pub rank: u32,
}

impl ChildSlot {
    pub const fn new(vertex: VertexId, rank: u32) -> Self {
        Self { vertex, rank }
    }
}

#[derive(Clone, Copy, Debug)]
struct EdgeHeader {
    score: Score,
    start: u32,
    arity: u32,
}

/// Read-only view of a pooled edge.
#[derive(Clone, Copy, Debug)]
pub struct EdgeRef<'a> {
    handle: PartialEdge,
    score: Score,
    children: &'a [ChildSlot],
}

impl<'a> EdgeRef<'a> {
    pub fn handle(&self) -> PartialEdge {
        self.handle
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn arity(&self) -> Arity {
        self.children.len()
    }

    pub fn children(&self) -> &'a [ChildSlot] {
        self.children
    }
}

/// Mutable view used by the model layer to construct a payload in place.
#[derive(Debug)]
pub struct EdgeMut<'a> {
    pub score: &'a mut Score,
    pub children: &'a mut [ChildSlot],
}

/// Arena of partial edges owned by one engine instance.
#[derive(Clone, Debug, Default)]
pub struct EdgePool {
    headers: Vec<EdgeHeader>,
    slots: Vec<ChildSlot>,
}

impl EdgePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool pre-sized for `edges` edges of average arity two.
    pub fn with_capacity(edges: usize) -> Self {
        Self {
            headers: Vec::with_capacity(edges),
            slots: Vec::with_capacity(edges.saturating_mul(2)),
        }
    }

    /// Allocates storage for an edge with `arity` child slots.
    ///
    /// The score starts at zero and every slot at `ChildSlot::default()`;
    /// filling them in is the caller's job.
    ///
    /// # Panics
    /// Panics if the pool already holds `u32::MAX - 1` edges or slots.
    pub fn allocate(&mut self, arity: Arity) -> PartialEdge {
        let index = self.headers.len();
        assert!(index < u32::MAX as usize, "edge pool exhausted");
        let start = self.slots.len();
        let end = start + arity;
        assert!(end < u32::MAX as usize, "edge pool slot storage exhausted");

        self.slots.resize(end, ChildSlot::default());
        self.headers.push(EdgeHeader {
            score: 0.0,
            start: start as u32,
            arity: arity as u32,
        });
        PartialEdge(index as u32)
    }

    /// Allocates an edge and fills it with `score` and `children`.
    pub fn allocate_with(&mut self, score: Score, children: &[ChildSlot]) -> PartialEdge {
        let edge = self.allocate(children.len());
        if let Some(view) = self.get_mut(edge) {
            *view.score = score;
            view.children.copy_from_slice(children);
        }
        edge
    }

    /// View of `edge`, or `None` for the invalid marker or a foreign handle.
    pub fn get(&self, edge: PartialEdge) -> Option<EdgeRef<'_>> {
        let header = self.headers.get(edge.index())?;
        let start = header.start as usize;
        Some(EdgeRef {
            handle: edge,
            score: header.score,
            children: &self.slots[start..start + header.arity as usize],
        })
    }

    /// Mutable view of `edge`.
    pub fn get_mut(&mut self, edge: PartialEdge) -> Option<EdgeMut<'_>> {
        let header = self.headers.get_mut(edge.index())?;
        let start = header.start as usize;
        let end = start + header.arity as usize;
        Some(EdgeMut {
            score: &mut header.score,
            children: &mut self.slots[start..end],
        })
    }

    /// Like [`get`](Self::get) but reports why the lookup failed.
    pub fn try_get(&self, edge: PartialEdge) -> SearchResult<EdgeRef<'_>> {
        if !edge.is_valid() {
            return Err(SearchError::InvalidEdge);
        }
        self.get(edge).ok_or(SearchError::UnknownEdge(edge))
    }

    /// Score of `edge`.
    pub fn score(&self, edge: PartialEdge) -> Option<Score> {
        self.headers.get(edge.index()).map(|h| h.score)
    }

    /// Overwrites the score of `edge`. Returns `false` if the handle is unknown.
    pub fn set_score(&mut self, edge: PartialEdge, score: Score) -> bool {
        match self.headers.get_mut(edge.index()) {
            Some(header) => {
                header.score = score;
                true
            }
            None => false,
        }
    }

    /// Child slots of `edge`, writable.
    pub fn children_mut(&mut self, edge: PartialEdge) -> Option<&mut [ChildSlot]> {
        self.get_mut(edge).map(|view| view.children)
    }

    /// Number of edges allocated so far.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Total child slots allocated across all edges.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_are_writable_in_place() {
        let mut pool = EdgePool::new();
        let edge = pool.allocate(2);
        pool.children_mut(edge).unwrap()[1] = ChildSlot::new(VertexId(3), 2);

        let view = pool.get(edge).unwrap();
        assert_eq!(view.children()[1], ChildSlot::new(VertexId(3), 2));
        assert!(pool.children_mut(PartialEdge::INVALID).is_none());
    }

    #[test]
    fn invalid_marker_is_not_valid() {
        assert!(!PartialEdge::invalid().is_valid());
        assert!(!PartialEdge::default().is_valid());
    }

    #[test]
    fn allocation_is_arity_shaped() {
        let mut pool = EdgePool::new();
        let leaf = pool.allocate(0);
        let binary = pool.allocate(2);

        assert!(leaf.is_valid());
        assert_eq!(pool.get(leaf).unwrap().arity(), 0);
        assert_eq!(pool.get(binary).unwrap().arity(), 2);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.slot_count(), 2);
    }

    #[test]
    fn handles_issued_in_allocation_order() {
        let mut pool = EdgePool::new();
        let a = pool.allocate(1);
        let b = pool.allocate(3);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }

    #[test]
    fn construct_payload_in_place() {
        let mut pool = EdgePool::new();
        let edge = pool.allocate(2);
        {
            let view = pool.get_mut(edge).unwrap();
            *view.score = -1.5;
            view.children[0] = ChildSlot::new(VertexId(4), 0);
            view.children[1] = ChildSlot::new(VertexId(9), 2);
        }
        let view = pool.get(edge).unwrap();
        assert_eq!(view.score(), -1.5);
        assert_eq!(view.children()[1], ChildSlot::new(VertexId(9), 2));
        assert_eq!(view.handle(), edge);
    }

    #[test]
    fn earlier_edges_unaffected_by_later_allocation() {
        let mut pool = EdgePool::with_capacity(1);
        let first = pool.allocate_with(-2.0, &[ChildSlot::new(VertexId(1), 1)]);
        for _ in 0..100 {
            pool.allocate(3);
        }
        let view = pool.get(first).unwrap();
        assert_eq!(view.score(), -2.0);
        assert_eq!(view.children(), &[ChildSlot::new(VertexId(1), 1)]);
    }

    #[test]
    fn set_score_and_lookup() {
        let mut pool = EdgePool::new();
        let edge = pool.allocate(0);
        assert!(pool.set_score(edge, 3.0));
        assert_eq!(pool.score(edge), Some(3.0));
        assert!(!pool.set_score(PartialEdge::invalid(), 1.0));
        assert_eq!(pool.score(PartialEdge::invalid()), None);
    }

    #[test]
    fn try_get_reports_failures() {
        let mut other = EdgePool::new();
        other.allocate(0);
        other.allocate(0);
        let foreign = other.allocate(0);

        let pool = EdgePool::new();
        assert_eq!(
            pool.try_get(PartialEdge::invalid()).unwrap_err(),
            SearchError::InvalidEdge
        );
        assert_eq!(
            pool.try_get(foreign).unwrap_err(),
            SearchError::UnknownEdge(foreign)
        );
    }
}
