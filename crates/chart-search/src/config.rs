//! Configuration for search rounds and for the merge engine.

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

/// Per-pass search settings read by [`Context`](crate::context::Context).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of hypotheses a single `search` round may accept.
    pub pop_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { pop_limit: 1000 }
    }
}

impl SearchConfig {
    /// Parse from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SearchResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Every `pop_limit` is accepted; zero means rounds do no work.
    pub fn validate(&self) -> SearchResult<()> {
        Ok(())
    }
}

/// Settings owned by one [`EdgeQueue`](crate::queue::EdgeQueue).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Initial capacity hint for the edge pool, in edges.
    pub edge_capacity: usize,
    /// Initial capacity hint for the generator pool and frontier.
    pub generator_capacity: usize,
    /// End a round after this many consecutive invalid advances.
    ///
    /// Every invalid advance counts, including a
    /// [`CubeGenerator`](crate::generator::CubeGenerator) deferring a costed
    /// combination, so a limit below the number of deferrals a round can make
    /// in a row also cuts short rounds of well-behaved generators. `None`
    /// leaves termination entirely to the generators.
    pub stall_limit: Option<u64>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            edge_capacity: 256,
            generator_capacity: 64,
            stall_limit: None,
        }
    }
}

impl QueueConfig {
    /// Parse from a JSON document and validate it.
    pub fn from_json(json: &str) -> SearchResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a zero stall limit, which would end every round on the first
    /// invalid advance.
    pub fn validate(&self) -> SearchResult<()> {
        if self.stall_limit == Some(0) {
            return Err(SearchError::InvalidConfig(
                "stall_limit must be positive when set".into(),
            ));
        }
        Ok(())
    }
}
