//! Cube-pruning generator over the child alternatives of one seed edge.
//!
//! The seed names one chart vertex per child slot. Each vertex exposes its
//! alternatives best first, so every combination of child ranks has an
//! optimistic score
//!
//! ```text
//! seed_score + Σ (alt_i[rank_i] − alt_i[seed_rank_i])
//! ```
//!
//! which never exceeds the score of the combination it was reached from. The
//! generator walks this grid lazily: popping a combination pushes its
//! neighbours (one rank bump per slot) and asks the model for the
//! combination's cost. A combination with a nonzero cost is deferred with
//! its corrected score and the advance reports an invalid edge, so the
//! engine ranks the corrected score against every other queued generator
//! before the edge is accepted.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use smallvec::SmallVec;
use tracing::trace;

use crate::context::{Context, Model};
use crate::edge::{ChildSlot, EdgePool, PartialEdge};
use crate::generator::{Advance, EdgeGenerator, SeedGenerator};
use crate::types::{Note, Score, VertexId, EXHAUSTED};

type Ranks = SmallVec<[u32; 4]>;

#[derive(Debug)]
struct Candidate {
    score: Score,
    ranks: Ranks,
    /// Set once the model cost has been applied; `edge` is then materialized.
    costed: bool,
    edge: PartialEdge,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.ranks.cmp(&self.ranks))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Lazy best-first enumerator of one candidate group's child combinations.
#[derive(Debug)]
pub struct CubeGenerator {
    note: Note,
    vertices: SmallVec<[VertexId; 4]>,
    heap: BinaryHeap<Candidate>,
    seen: HashSet<Ranks>,
}

impl CubeGenerator {
    /// Number of combinations discovered but not yet emitted.
    pub fn pending(&self) -> usize {
        self.heap.len()
    }

    fn children(&self, ranks: &[u32]) -> SmallVec<[ChildSlot; 4]> {
        self.vertices
            .iter()
            .zip(ranks)
            .map(|(&vertex, &rank)| ChildSlot::new(vertex, rank))
            .collect()
    }

    fn push_neighbours<M: Model>(&mut self, model: &M, score: Score, ranks: &Ranks) {
        for (slot, &vertex) in self.vertices.iter().enumerate() {
            let alternatives = model.alternatives(vertex);
            let rank = ranks[slot] as usize;
            let (Some(&current), Some(&next)) = (alternatives.get(rank), alternatives.get(rank + 1))
            else {
                continue;
            };
            let mut bumped = ranks.clone();
            bumped[slot] += 1;
            if !self.seen.insert(bumped.clone()) {
                continue;
            }
            // Unsorted alternatives must not raise the bound.
            let delta = (next - current).min(0.0);
            self.heap.push(Candidate {
                score: score + delta,
                ranks: bumped,
                costed: false,
                edge: PartialEdge::INVALID,
            });
        }
    }
}

impl EdgeGenerator for CubeGenerator {
    fn current_bound(&self) -> Score {
        self.heap.peek().map_or(EXHAUSTED, |top| top.score)
    }

    fn note(&self) -> Note {
        self.note
    }
}

impl SeedGenerator for CubeGenerator {
    /// An invalid or foreign seed yields an already exhausted generator.
    fn from_seed(edge: PartialEdge, note: Note, pool: &EdgePool) -> Self {
        let mut generator = Self {
            note,
            vertices: SmallVec::new(),
            heap: BinaryHeap::new(),
            seen: HashSet::new(),
        };
        if let Some(seed) = pool.get(edge) {
            generator.vertices = seed.children().iter().map(|c| c.vertex).collect();
            let ranks: Ranks = seed.children().iter().map(|c| c.rank).collect();
            generator.seen.insert(ranks.clone());
            generator.heap.push(Candidate {
                score: seed.score(),
                ranks,
                costed: false,
                edge: PartialEdge::INVALID,
            });
        }
        generator
    }
}

impl<M: Model> Advance<Context<M>> for CubeGenerator {
    fn advance(&mut self, context: &mut Context<M>, pool: &mut EdgePool) -> PartialEdge {
        let Some(top) = self.heap.pop() else {
            return PartialEdge::INVALID;
        };
        if top.costed {
            return top.edge;
        }

        let model = context.model();
        self.push_neighbours(model, top.score, &top.ranks);

        let edge = pool.allocate_with(top.score, &self.children(&top.ranks));
        let cost = model.combination_cost(pool, edge, self.note).min(0.0);
        if cost == 0.0 {
            return edge;
        }

        let corrected = top.score + cost;
        pool.set_score(edge, corrected);
        trace!(
            note = %self.note,
            optimistic = top.score,
            corrected,
            "Deferred costed combination"
        );
        self.heap.push(Candidate {
            score: corrected,
            ranks: top.ranks,
            costed: true,
            edge,
        });
        PartialEdge::INVALID
    }
}
