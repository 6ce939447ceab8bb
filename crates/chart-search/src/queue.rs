//! The merge engine.
//!
//! `EdgeQueue` admits candidate groups, wraps each in a generator and keeps
//! the active generators in a [`Frontier`] keyed by their admissible bound.
//! A search round repeatedly advances the generator with the greatest bound,
//! forwards valid hypotheses to the output sink and requeues generators that
//! still have candidates, until the round's budget is spent or no generator
//! is left. Because every bound is admissible and non-increasing, accepted
//! hypotheses come out best first without enumerating any group in full.
//!
//! Edges and generators live in per-engine pools that are only reclaimed when
//! the engine is dropped.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::QueueConfig;
use crate::context::SearchContext;
use crate::edge::{EdgePool, PartialEdge};
use crate::frontier::Frontier;
use crate::generator::{Advance, EdgeGenerator, GeneratorPool, SeedGenerator};
use crate::output::HypothesisSink;
use crate::types::{is_exhausted, Arity, GeneratorId, Note, Score};

/// Counters for one `search` round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    /// Budget read from the context at the start of the round.
    pub budget: usize,
    /// Hypotheses forwarded to the sink.
    pub emitted: usize,
    /// Advances that produced no usable hypothesis.
    pub invalid: usize,
    /// Generators dropped from the frontier during the round.
    pub exhausted: usize,
    /// The round was cut short by the stall limit.
    pub stalled: bool,
}

/// Lazy k-best merge over admitted candidate groups.
#[derive(Debug)]
pub struct EdgeQueue<G> {
    edge_pool: EdgePool,
    generators: GeneratorPool<G>,
    frontier: Frontier,
    config: QueueConfig,
}

impl<G: EdgeGenerator> Default for EdgeQueue<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: EdgeGenerator> EdgeQueue<G> {
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            edge_pool: EdgePool::with_capacity(config.edge_capacity),
            generators: GeneratorPool::with_capacity(config.generator_capacity),
            frontier: Frontier::with_capacity(config.generator_capacity),
            config,
        }
    }

    /// Allocate storage for a seed edge with `arity` child slots.
    ///
    /// Fill the payload through [`edge_pool_mut`](Self::edge_pool_mut) before
    /// passing the edge to [`add_edge`](Self::add_edge).
    pub fn allocate_edge(&mut self, arity: Arity) -> PartialEdge {
        self.edge_pool.allocate(arity)
    }

    /// Admit a candidate group seeded by `edge`.
    pub fn add_edge(&mut self, edge: PartialEdge, note: Note) -> GeneratorId
    where
        G: SeedGenerator,
    {
        let generator = G::from_seed(edge, note, &self.edge_pool);
        self.add_generator(generator)
    }

    /// Admit an already constructed generator.
    ///
    /// A generator that is exhausted on arrival is stored but never queued.
    pub fn add_generator(&mut self, generator: G) -> GeneratorId {
        let bound = generator.current_bound();
        let note = generator.note();
        let id = self.generators.construct(generator);
        if !is_exhausted(bound) {
            self.frontier.push(id, bound);
        }
        trace!(generator = %id, %note, bound, "Admitted candidate group");
        id
    }

    /// Whether no generator is waiting in the frontier.
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Number of generators waiting in the frontier.
    pub fn len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of generators ever admitted, exhausted ones included.
    pub fn admitted(&self) -> usize {
        self.generators.len()
    }

    /// Greatest bound in the frontier.
    pub fn peek_bound(&self) -> Option<Score> {
        self.frontier.peek_bound()
    }

    pub fn generator(&self, id: GeneratorId) -> Option<&G> {
        self.generators.get(id)
    }

    /// Whether `id` is currently queued.
    pub fn is_active(&self, id: GeneratorId) -> bool {
        self.frontier.contains(id)
    }

    /// Bounds of the queued generators, in no particular order.
    pub fn active_bounds(&self) -> impl Iterator<Item = Score> + '_ {
        self.frontier.bounds()
    }

    pub fn edge_pool(&self) -> &EdgePool {
        &self.edge_pool
    }

    pub fn edge_pool_mut(&mut self) -> &mut EdgePool {
        &mut self.edge_pool
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Run one round: accept up to `context.pop_limit()` hypotheses into
    /// `output`, then call `output.finished_search()` exactly once.
    pub fn search<C, O>(&mut self, context: &mut C, output: &mut O) -> RoundStats
    where
        C: SearchContext + ?Sized,
        G: Advance<C>,
        O: HypothesisSink + ?Sized,
    {
        let budget = context.pop_limit();
        let mut stats = RoundStats {
            budget,
            ..RoundStats::default()
        };
        let mut remaining = budget;
        let mut invalid_streak: u64 = 0;

        while remaining > 0 {
            let Some(id) = self.frontier.pop() else {
                break;
            };
            // Frontier ids always come from this engine's pool.
            let Some(generator) = self.generators.get_mut(id) else {
                continue;
            };

            let edge = generator.advance(context, &mut self.edge_pool);
            let bound = generator.current_bound();
            let valid = edge.is_valid();
            if valid {
                output.new_hypothesis(edge, generator.note());
                remaining -= 1;
                stats.emitted += 1;
                invalid_streak = 0;
            } else {
                stats.invalid += 1;
                invalid_streak += 1;
            }

            if is_exhausted(bound) {
                stats.exhausted += 1;
            } else {
                self.frontier.push(id, bound);
            }
            trace!(generator = %id, valid, bound, "Advanced generator");

            if let Some(limit) = self.config.stall_limit {
                if invalid_streak >= limit {
                    warn!(
                        limit,
                        emitted = stats.emitted,
                        "Ending search round after consecutive invalid advances"
                    );
                    stats.stalled = true;
                    break;
                }
            }
        }

        output.finished_search();
        debug!(
            budget,
            emitted = stats.emitted,
            invalid = stats.invalid,
            exhausted = stats.exhausted,
            active = self.frontier.len(),
            "Search round finished"
        );
        stats
    }
}
