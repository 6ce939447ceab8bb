//! Error types for the chart search crate.
//!
//! The merge loop itself never fails; these errors come from configuration
//! handling and checked pool lookups.

use thiserror::Error;

use crate::edge::PartialEdge;
use crate::types::GeneratorId;

/// Errors that can occur outside the merge loop.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    /// The handle does not belong to this edge pool.
    #[error("unknown edge: {0:?}")]
    UnknownEdge(PartialEdge),

    /// The invalid marker was used where a materialized edge is required.
    #[error("edge is the invalid marker")]
    InvalidEdge,

    /// The id does not belong to this generator pool.
    #[error("unknown generator: {0}")]
    UnknownGenerator(GeneratorId),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

/// Result type for chart search operations.
pub type SearchResult<T> = Result<T, SearchError>;
