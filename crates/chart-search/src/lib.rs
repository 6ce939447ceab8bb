//! # chart-search
//!
//! Hypothesis merging core of a hypergraph / chart decoder.
//!
//! Many candidate groups, each too large to enumerate, are merged into one
//! best-first stream of concrete hypotheses under a per-round budget
//! (lazy k-best merge, also known as cube pruning).
//!
//! ## Architecture
//!
//! ```text
//!   AllocateEdge / AddEdge
//!            │
//!            ▼
//!   ┌─────────────────┐   ┌──────────────────┐
//!   │  Edge Pool      │◄──│  Generator Pool  │  ← one generator per group
//!   └────────┬────────┘   └────────┬─────────┘
//!            │                     ▼
//!            │            ┌──────────────────┐
//!            │            │  Frontier        │  ← max-heap on current bound
//!            │            └────────┬─────────┘
//!            │                     ▼
//!            │            ┌──────────────────┐
//!            └───────────►│  EdgeQueue       │  ← pop, advance, requeue
//!                         │  ::search        │
//!                         └────────┬─────────┘
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │  HypothesisSink  │  → new_hypothesis / finished_search
//!                         └──────────────────┘
//! ```
//!
//! ## Key Principles
//!
//! - **Admissible bounds**: a generator's bound never understates its next
//!   hypothesis and never increases, so expanding the highest bound first
//!   yields hypotheses best first.
//! - **Round budget**: the budget counts accepted hypotheses across all
//!   groups; invalid advances cost nothing.
//! - **Bulk lifetime**: edges and generators are allocated from per-engine
//!   arenas and reclaimed only when the engine is dropped.
//! - **Single-threaded**: `search` runs to completion synchronously.
//!
//! ## Example
//!
//! ```
//! use chart_search::prelude::*;
//!
//! struct Chart(Vec<Vec<Score>>);
//!
//! impl Model for Chart {
//!     fn alternatives(&self, vertex: VertexId) -> &[Score] {
//!         &self.0[vertex.0 as usize]
//!     }
//! }
//!
//! let mut queue: EdgeQueue<CubeGenerator> = EdgeQueue::new();
//! let seed = queue.allocate_edge(1);
//! {
//!     let payload = queue.edge_pool_mut().get_mut(seed).unwrap();
//!     *payload.score = -1.0;
//!     payload.children[0] = ChildSlot::new(VertexId(0), 0);
//! }
//! queue.add_edge(seed, Note(7));
//!
//! let mut context = Context::new(SearchConfig { pop_limit: 2 }, Chart(vec![vec![-1.0, -3.0]]));
//! let mut sink = Collector::new();
//! queue.search(&mut context, &mut sink);
//!
//! assert_eq!(sink.len(), 2);
//! assert_eq!(sink.finished(), 1);
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod context;
pub mod edge;
pub mod error;
pub mod frontier;
pub mod generator;
pub mod output;
pub mod queue;
pub mod types;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use config::{QueueConfig, SearchConfig};
pub use context::{Context, Model, SearchContext};
pub use edge::{ChildSlot, EdgeMut, EdgePool, EdgeRef, PartialEdge};
pub use error::{SearchError, SearchResult};
pub use frontier::Frontier;
pub use generator::{Advance, CubeGenerator, EdgeGenerator, GeneratorPool, SeedGenerator};
pub use output::{Collector, Emission, HypothesisSink, RoutingSink};
pub use queue::{EdgeQueue, RoundStats};
pub use types::{is_exhausted, Arity, GeneratorId, Note, Score, VertexId, EXHAUSTED};

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::config::{QueueConfig, SearchConfig};
    pub use crate::context::{Context, Model, SearchContext};
    pub use crate::edge::{ChildSlot, EdgePool, PartialEdge};
    pub use crate::generator::{Advance, CubeGenerator, EdgeGenerator, SeedGenerator};
    pub use crate::output::{Collector, HypothesisSink, RoutingSink};
    pub use crate::queue::{EdgeQueue, RoundStats};
    pub use crate::types::{Arity, Note, Score, VertexId, EXHAUSTED};
}
