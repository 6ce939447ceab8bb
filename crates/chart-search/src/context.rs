//! Per-pass search context.
//!
//! The merge engine reads only the round budget from its context; everything
//! else a context carries is for the generators that advance within it.

use crate::config::SearchConfig;
use crate::edge::{EdgePool, PartialEdge};
use crate::types::{Note, Score, VertexId};

/// What `EdgeQueue::search` needs from a context.
pub trait SearchContext {
    /// Number of hypotheses the next round may accept.
    fn pop_limit(&self) -> usize;
}

/// Scoring model consulted by [`CubeGenerator`](crate::generator::CubeGenerator).
pub trait Model {
    /// Scores of the hypotheses already built for `vertex`, best first.
    fn alternatives(&self, vertex: VertexId) -> &[Score];

    /// Correction applied once a combination is materialized, such as a
    /// language model cost. Positive values are treated as zero.
    fn combination_cost(&self, _pool: &EdgePool, _edge: PartialEdge, _note: Note) -> Score {
        0.0
    }
}

/// Search configuration paired with the model for one decoding pass.
#[derive(Clone, Debug)]
pub struct Context<M> {
    config: SearchConfig,
    model: M,
}

impl<M> Context<M> {
    pub fn new(config: SearchConfig, model: M) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Change the budget for subsequent rounds.
    pub fn set_pop_limit(&mut self, pop_limit: usize) {
        self.config.pop_limit = pop_limit;
    }

    pub fn into_model(self) -> M {
        self.model
    }
}

impl<M> SearchContext for Context<M> {
    fn pop_limit(&self) -> usize {
        self.config.pop_limit
    }
}
