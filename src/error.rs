//! Error types for the energy graph and its configuration.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A vertex index outside `0..len` was passed to an indexed operation.
    #[error("vertex index {index} out of bounds for graph of {len} vertices")]
    IndexOutOfBounds { index: i64, len: usize },

    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
