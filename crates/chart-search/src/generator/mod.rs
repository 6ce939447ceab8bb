//! Edge generators and the pool that owns them.
//!
//! A generator is a lazy cursor over one admitted candidate group. The merge
//! engine only sees it through the capability traits defined here:
//! - [`EdgeGenerator`]: current admissible bound and the group's note.
//! - [`Advance`]: materialize the next candidate given a search context.
//! - [`SeedGenerator`]: build a generator from an admitted `(edge, note)` seed.

pub mod cube;

pub use cube::CubeGenerator;

use crate::edge::{EdgePool, PartialEdge};
use crate::error::{SearchError, SearchResult};
use crate::types::{is_exhausted, GeneratorId, Note, Score};

/// Scheduling contract shared by every generator variant.
pub trait EdgeGenerator {
    /// Upper bound on the score of the next hypothesis this generator will
    /// produce. Never increases across advances; [`EXHAUSTED`](crate::types::EXHAUSTED)
    /// once nothing is left.
    fn current_bound(&self) -> Score;

    /// Annotation of the candidate group.
    fn note(&self) -> Note;

    fn is_exhausted(&self) -> bool {
        is_exhausted(self.current_bound())
    }
}

/// Advancing a generator within a search context `C`.
pub trait Advance<C: ?Sized>: EdgeGenerator {
    /// Materialize and move past the next candidate.
    ///
    /// Returns either a valid edge allocated from `pool`, or the invalid
    /// marker when this step made progress without a usable hypothesis.
    fn advance(&mut self, context: &mut C, pool: &mut EdgePool) -> PartialEdge;
}

/// Construction from an admitted seed, used by `EdgeQueue::add_edge`.
pub trait SeedGenerator: EdgeGenerator + Sized {
    /// The seed's payload must already be filled in; its score establishes the
    /// generator's initial bound.
    fn from_seed(edge: PartialEdge, note: Note, pool: &EdgePool) -> Self;
}

impl<G: EdgeGenerator + ?Sized> EdgeGenerator for Box<G> {
    fn current_bound(&self) -> Score {
        (**self).current_bound()
    }

    fn note(&self) -> Note {
        (**self).note()
    }
}

impl<C: ?Sized, G: Advance<C> + ?Sized> Advance<C> for Box<G> {
    fn advance(&mut self, context: &mut C, pool: &mut EdgePool) -> PartialEdge {
        (**self).advance(context, pool)
    }
}

// ── Generator Pool ──────────────────────────────────────────────────────

/// Arena of generators owned by one engine instance.
///
/// Generators are only ever added; an exhausted generator keeps its slot
/// until the pool is dropped.
#[derive(Debug)]
pub struct GeneratorPool<G> {
    generators: Vec<G>,
}

impl<G> Default for GeneratorPool<G> {
    fn default() -> Self {
        Self {
            generators: Vec::new(),
        }
    }
}

impl<G> GeneratorPool<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generators: Vec::with_capacity(capacity),
        }
    }

    /// Takes ownership of `generator` and returns its id.
    ///
    /// # Panics
    /// Panics if the pool already holds `u32::MAX` generators.
    pub fn construct(&mut self, generator: G) -> GeneratorId {
        let index = self.generators.len();
        assert!(index < u32::MAX as usize, "generator pool exhausted");
        self.generators.push(generator);
        GeneratorId(index as u32)
    }

    pub fn get(&self, id: GeneratorId) -> Option<&G> {
        self.generators.get(id.index())
    }

    pub fn get_mut(&mut self, id: GeneratorId) -> Option<&mut G> {
        self.generators.get_mut(id.index())
    }

    pub fn try_get(&self, id: GeneratorId) -> SearchResult<&G> {
        self.get(id).ok_or(SearchError::UnknownGenerator(id))
    }

    /// Number of generators ever constructed.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
