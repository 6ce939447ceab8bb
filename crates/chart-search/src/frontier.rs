//! Priority frontier - active generators ordered by their current bound

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::types::{GeneratorId, Score};

/// Max-heap of generator ids keyed by bound.
///
/// Equal bounds pop in admission order (lower id first). The key is the
/// bound at insertion time; a generator's bound only changes while it is
/// out of the frontier being advanced.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, id: GeneratorId, bound: Score) {
        self.heap.push(FrontierEntry { bound, id });
    }

    /// Remove the generator with the greatest bound.
    pub fn pop(&mut self) -> Option<GeneratorId> {
        self.heap.pop().map(|entry| entry.id)
    }

    /// Greatest bound currently queued.
    pub fn peek_bound(&self) -> Option<Score> {
        self.heap.peek().map(|entry| entry.bound)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queued bounds in no particular order.
    pub fn bounds(&self) -> impl Iterator<Item = Score> + '_ {
        self.heap.iter().map(|entry| entry.bound)
    }

    pub fn contains(&self, id: GeneratorId) -> bool {
        self.heap.iter().any(|entry| entry.id == id)
    }
}

/// Wrapper for priority ordering
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    bound: Score,
    id: GeneratorId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bound
            .total_cmp(&other.bound)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
