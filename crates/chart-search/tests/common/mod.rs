//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use chart_search::prelude::*;

/// One scripted advance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Emit(Score),
    Fail,
}

/// Deterministic generator replaying a script.
///
/// The bound is always the next scripted emission, which makes it admissible
/// and non-increasing as long as the emitted scores are.
#[derive(Debug)]
pub struct Scripted {
    note: Note,
    bound: Score,
    steps: VecDeque<Step>,
    pub advances: usize,
    pub advanced_while_exhausted: bool,
}

impl Scripted {
    pub fn new(note: u64, steps: impl IntoIterator<Item = Step>) -> Self {
        let mut generator = Self {
            note: Note(note),
            bound: EXHAUSTED,
            steps: steps.into_iter().collect(),
            advances: 0,
            advanced_while_exhausted: false,
        };
        generator.refresh();
        generator
    }

    pub fn emitting(note: u64, scores: &[Score]) -> Self {
        Self::new(note, scores.iter().map(|&s| Step::Emit(s)))
    }

    fn refresh(&mut self) {
        self.bound = self
            .steps
            .iter()
            .find_map(|step| match step {
                Step::Emit(score) => Some(*score),
                Step::Fail => None,
            })
            .unwrap_or(EXHAUSTED);
    }
}

impl EdgeGenerator for Scripted {
    fn current_bound(&self) -> Score {
        self.bound
    }

    fn note(&self) -> Note {
        self.note
    }
}

impl<C: ?Sized> Advance<C> for Scripted {
    fn advance(&mut self, _context: &mut C, pool: &mut EdgePool) -> PartialEdge {
        self.advances += 1;
        if self.bound == EXHAUSTED {
            self.advanced_while_exhausted = true;
        }
        let step = self.steps.pop_front();
        self.refresh();
        match step {
            Some(Step::Emit(score)) => pool.allocate_with(score, &[]),
            Some(Step::Fail) | None => PartialEdge::invalid(),
        }
    }
}

/// Context carrying only a budget.
pub struct Budget(pub usize);

impl SearchContext for Budget {
    fn pop_limit(&self) -> usize {
        self.0
    }
}

/// Scores of everything a collector received, in emission order.
pub fn emitted_scores<G>(queue: &EdgeQueue<G>, sink: &Collector) -> Vec<Score>
where
    G: EdgeGenerator,
{
    sink.edges()
        .map(|edge| queue.edge_pool().score(edge).unwrap_or(EXHAUSTED))
        .collect()
}

/// Installs a test subscriber so `tracing` output shows up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
