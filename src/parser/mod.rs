//! # Edge input
//!
//! Graphs are read from whitespace separated integers: an optional
//! `vertex_count edge_count` header followed by 1-based `source sink` pairs.
//!
//! ```text
//! 1 2
//! 2 3
//! 3 4
//! ```
//!
//! With [`BatchMode::Single`] one batch of pairs feeds both graph
//! representations. [`BatchMode::Dual`] expects two consecutive batches, the
//! first for the adjacency matrix and the second for the adjacency list.
//! Tokens after the last expected pair are ignored.

use std::io::Read;
use std::num::ParseIntError;
use std::str::{FromStr, SplitWhitespace};

use tracing::{debug, warn};

use crate::graph::{Edge, Graph, GraphBuilder, Orientation, VertexIndex, MAX_VERTICES};

pub mod error;

pub use error::{ErrorKind, GraphParseError};

/// A `source sink` pair as it appears in the input, 1-based and unchecked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawEdge {
    pub source: i64,
    pub sink: i64,
}

impl RawEdge {
    /// Converts to a 0-based [`Edge`], checking both endpoints lie in
    /// `1..=vertex_count`.
    pub fn resolve(self, vertex_count: usize) -> Result<Edge, GraphParseError> {
        let index = |vertex: i64| {
            usize::try_from(vertex)
                .ok()
                .filter(|v| (1..=vertex_count).contains(v))
                .map(|v| VertexIndex(v - 1))
                .ok_or(GraphParseError::InvalidVertexIndex {
                    vertex,
                    vertex_count,
                })
        };
        Ok(Edge {
            source: index(self.source)?,
            sink: index(self.sink)?,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BatchMode {
    /// One batch of pairs feeds the matrix and the list.
    #[default]
    Single,
    /// A batch for the matrix followed by a batch for the list.
    Dual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub orientation: Orientation,
    pub batch_mode: BatchMode,
    /// Take `vertex_count` and `edge_count` from the first two tokens instead.
    pub header: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            vertex_count: 10,
            edge_count: 5,
            orientation: Orientation::Undirected,
            batch_mode: BatchMode::Single,
            header: false,
        }
    }
}

/// Pulls integers and edge pairs off a whitespace separated token stream.
pub struct EdgeReader<'a> {
    tokens: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> EdgeReader<'a> {
    pub fn new(input: &'a str) -> Self {
        EdgeReader {
            tokens: input.split_whitespace(),
            position: 0,
        }
    }

    fn next_value<T>(&mut self) -> Option<Result<T, GraphParseError>>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let token = self.tokens.next()?;
        self.position += 1;
        Some(
            token
                .parse()
                .map_err(|source| GraphParseError::NotAnInteger {
                    token: token.to_owned(),
                    position: self.position,
                    source,
                }),
        )
    }

    /// Reads the `vertex_count edge_count` header.
    pub fn read_header(&mut self) -> Result<(usize, usize), GraphParseError> {
        let vertices: usize = self
            .next_value()
            .ok_or(GraphParseError::MissingHeader)??;
        let edges: usize = self
            .next_value()
            .ok_or(GraphParseError::MissingHeader)??;
        Ok((vertices, edges))
    }

    /// The next complete pair, or `None` once the input runs out.
    pub fn next_edge(&mut self) -> Result<Option<RawEdge>, GraphParseError> {
        let Some(source) = self.next_value::<i64>().transpose()? else {
            return Ok(None);
        };
        let Some(sink) = self.next_value::<i64>().transpose()? else {
            return Ok(None);
        };
        Ok(Some(RawEdge { source, sink }))
    }

    /// Reads exactly `count` pairs.
    pub fn read_edges(&mut self, count: usize) -> Result<Vec<RawEdge>, GraphParseError> {
        let mut edges = Vec::with_capacity(count);
        while edges.len() < count {
            match self.next_edge()? {
                Some(edge) => edges.push(edge),
                None => {
                    return Err(GraphParseError::UnexpectedEnd {
                        expected: count,
                        found: edges.len(),
                    })
                }
            }
        }
        Ok(edges)
    }

    /// Consumes and counts whatever is left.
    pub fn remaining(&mut self) -> usize {
        self.tokens.by_ref().count()
    }
}

/// Rejects vertex counts above [`MAX_VERTICES`] before anything is allocated.
pub fn check_vertex_count(vertex_count: usize) -> Result<(), GraphParseError> {
    if vertex_count > MAX_VERTICES {
        return Err(GraphParseError::TooManyVertices {
            vertex_count,
            max: MAX_VERTICES,
        });
    }
    Ok(())
}

/// Builds a graph from the textual edge format.
pub fn parse_graph(input: &str, options: &ReadOptions) -> Result<Graph, GraphParseError> {
    let mut reader = EdgeReader::new(input);
    let (vertex_count, edge_count) = if options.header {
        reader.read_header()?
    } else {
        (options.vertex_count, options.edge_count)
    };
    check_vertex_count(vertex_count)?;
    debug!(
        vertex_count,
        edge_count,
        batch_mode = ?options.batch_mode,
        "reading edges"
    );

    let mut builder = GraphBuilder::new(vertex_count, options.orientation);
    match options.batch_mode {
        BatchMode::Single => {
            for raw in reader.read_edges(edge_count)? {
                builder.add_raw_edge(raw)?;
            }
        }
        BatchMode::Dual => {
            for raw in reader.read_edges(edge_count)? {
                let edge = builder.resolve(raw)?;
                builder.add_matrix_edge(edge);
            }
            for raw in reader.read_edges(edge_count)? {
                let edge = builder.resolve(raw)?;
                builder.add_list_edge(edge);
            }
        }
    }

    let trailing = reader.remaining();
    if trailing > 0 {
        warn!(trailing, "ignoring tokens after the last edge");
    }

    let graph = builder.build();
    if options.batch_mode == BatchMode::Dual && !graph.representations_agree() {
        warn!("matrix and list batches describe different edge sets");
    }
    Ok(graph)
}

/// Reads the whole stream and hands it to [`parse_graph`].
pub fn read_graph(mut input: impl Read, options: &ReadOptions) -> Result<Graph, GraphParseError> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    parse_graph(&text, options)
}
