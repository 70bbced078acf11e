use std::num::ParseIntError;

use thiserror::Error;

/// Coarse classification of a [`GraphParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A vertex identifier outside `1..=vertex_count`.
    InvalidVertexIndex,
    /// Non-integer or missing tokens, or a vertex count too large to hold.
    MalformedInput,
    /// The input stream itself could not be read.
    Io,
}

#[derive(Debug, Error)]
pub enum GraphParseError {
    #[error("vertex {vertex} is outside 1..={vertex_count}")]
    InvalidVertexIndex { vertex: i64, vertex_count: usize },

    #[error("token {position} ({token:?}) is not a valid integer")]
    NotAnInteger {
        token: String,
        position: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("vertex count {vertex_count} exceeds the supported maximum of {max}")]
    TooManyVertices { vertex_count: usize, max: usize },

    #[error("expected {expected} edges but the input ended after {found}")]
    UnexpectedEnd { expected: usize, found: usize },

    #[error("input ended before the vertex/edge count header")]
    MissingHeader,

    #[error("failed to read edge input")]
    Io(#[from] std::io::Error),
}

impl GraphParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphParseError::InvalidVertexIndex { .. } => ErrorKind::InvalidVertexIndex,
            GraphParseError::NotAnInteger { .. }
            | GraphParseError::TooManyVertices { .. }
            | GraphParseError::UnexpectedEnd { .. }
            | GraphParseError::MissingHeader => ErrorKind::MalformedInput,
            GraphParseError::Io(_) => ErrorKind::Io,
        }
    }
}
