//! # Graph representation
//!
//! A [`Graph`] is built once from a stream of edges and is read-only afterwards.
//! It carries two views of the same edge set:
//!
//! - an adjacency list ([`Graph::neighbors`]), whose neighbour order is the edge
//!   insertion order and drives every traversal tie-break, and
//! - a bit-packed adjacency matrix ([`AdjacencyMatrix`]) for constant-time
//!   [`Graph::has_edge`] lookups.
//!
//! Both are filled by [`GraphBuilder`]. Vertices are identified by 0-based
//! [`VertexIndex`] values; the 1-based identifiers of the textual input are
//! converted (and range checked) by [`crate::parser`].

use std::fmt::{self, Display};

use itertools::Itertools;

use crate::define_indexed_vec;
use crate::parser::{self, GraphParseError, RawEdge};

pub mod builder;
pub mod matrix;

pub use builder::GraphBuilder;
pub use matrix::AdjacencyMatrix;

define_indexed_vec!(
    /// A 0-based vertex identifier.
    pub struct VertexIndex;

    /// A vector addressed by [`VertexIndex`], one slot per vertex.
    pub struct VertexVec;
);

/// Largest vertex count accepted from input. The adjacency matrix takes
/// `vertex_count²` bits, 128 MiB at this bound.
pub const MAX_VERTICES: usize = 1 << 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Every edge is inserted in both directions.
    #[default]
    Undirected,
    /// Edges only go from source to sink.
    Directed,
}

impl From<bool> for Orientation {
    fn from(directed: bool) -> Self {
        if directed {
            Orientation::Directed
        } else {
            Orientation::Undirected
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Undirected => write!(f, "undirected"),
            Orientation::Directed => write!(f, "directed"),
        }
    }
}

/// A validated edge between two vertices of a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub source: VertexIndex,
    pub sink: VertexIndex,
}

impl Edge {
    pub fn new(source: usize, sink: usize) -> Self {
        Edge {
            source: VertexIndex(source),
            sink: VertexIndex(sink),
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.sink)
    }
}

/// Builds a [`Graph`] from 1-based vertex pairs.
///
/// `graph!(n; a -> b, ...)` gives a directed graph, `graph!(n; a -- b, ...)` an
/// undirected one. Evaluates to `Result<Graph, GraphParseError>`.
///
/// ```
/// use graphwalk::graph;
///
/// let path = graph!(4; 1 -- 2, 2 -- 3, 3 -- 4).unwrap();
/// assert_eq!(path.edge_count(), 3);
/// ```
#[macro_export]
macro_rules! graph {
    ($n:expr; $($s:literal -> $d:literal),* $(,)?) => {
        $crate::graph::Graph::from_edges(
            $n,
            $crate::graph::Orientation::Directed,
            [$(($s, $d)),*],
        )
    };
    ($n:expr; $($s:literal -- $d:literal),* $(,)?) => {
        $crate::graph::Graph::from_edges(
            $n,
            $crate::graph::Orientation::Undirected,
            [$(($s, $d)),*],
        )
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    pub(crate) orientation: Orientation,
    pub(crate) adjacency: VertexVec<Vec<VertexIndex>>,
    pub(crate) matrix: AdjacencyMatrix,
    pub(crate) edge_count: usize,
}

impl Graph {
    /// Builds a graph with `vertex_count` vertices from 1-based `(source, sink)`
    /// pairs, feeding both representations from the same batch.
    ///
    /// Fails with [`GraphParseError::TooManyVertices`] above [`MAX_VERTICES`],
    /// and with [`GraphParseError::InvalidVertexIndex`] on the first pair that
    /// names a vertex outside `1..=vertex_count`.
    pub fn from_edges<I>(
        vertex_count: usize,
        orientation: impl Into<Orientation>,
        edges: I,
    ) -> Result<Self, GraphParseError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        parser::check_vertex_count(vertex_count)?;
        let mut builder = GraphBuilder::new(vertex_count, orientation);
        for (source, sink) in edges {
            builder.add_raw_edge(RawEdge { source, sink })?;
        }
        Ok(builder.build())
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges inserted into the adjacency list, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// All vertices in index order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexIndex> + ExactSizeIterator {
        self.adjacency.indices()
    }

    /// Neighbours of `vertex` in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not a vertex of this graph.
    pub fn neighbors(&self, vertex: VertexIndex) -> &[VertexIndex] {
        &self.adjacency[vertex]
    }

    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    /// Matrix lookup for the edge `source -> sink`.
    pub fn has_edge(&self, source: VertexIndex, sink: VertexIndex) -> bool {
        self.matrix.contains(source, sink)
    }

    /// Iterates the adjacency list as edges, in vertex then insertion order.
    ///
    /// Undirected edges show up once from each endpoint.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(source, sinks)| sinks.iter().map(move |&sink| Edge { source, sink }))
    }

    /// Number of adjacency-list entries pointing at each vertex.
    pub fn in_degrees(&self) -> VertexVec<usize> {
        let mut indeg = VertexVec::filled(self.vertex_count(), 0);
        for edge in self.edges() {
            indeg[edge.sink] += 1;
        }
        indeg
    }

    /// Whether the matrix holds exactly the edges present in the adjacency list.
    ///
    /// Always true for graphs built from a single edge batch; graphs read in
    /// dual-batch mode may disagree.
    pub fn representations_agree(&self) -> bool {
        AdjacencyMatrix::from_adjacency(&self.adjacency) == self.matrix
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} graph, {} vertices, {} edges",
            self.orientation,
            self.vertex_count(),
            self.edge_count
        )?;
        for (v, neighbors) in &self.adjacency {
            if neighbors.is_empty() {
                writeln!(f, "{v}:")?;
            } else {
                writeln!(f, "{v}: {}", neighbors.iter().join(" "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::ErrorKind;

    #[test]
    fn undirected_edges_are_symmetric() {
        let g = graph!(4; 1 -- 2, 2 -- 3, 3 -- 4).unwrap();

        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.orientation(), Orientation::Undirected);
        for edge in g.edges() {
            assert!(g.neighbors(edge.sink).contains(&edge.source));
            assert!(g.has_edge(edge.source, edge.sink));
            assert!(g.has_edge(edge.sink, edge.source));
        }
        assert!(g.matrix().is_symmetric());
        assert!(g.representations_agree());
    }

    #[test]
    fn directed_edges_go_one_way() {
        let g = graph!(3; 1 -> 2, 2 -> 3).unwrap();

        assert!(g.has_edge(VertexIndex(0), VertexIndex(1)));
        assert!(!g.has_edge(VertexIndex(1), VertexIndex(0)));
        assert_eq!(g.neighbors(VertexIndex(1)), &[VertexIndex(2)]);
        assert!(g.neighbors(VertexIndex(2)).is_empty());
        assert!(!g.matrix().is_symmetric());
    }

    #[test]
    fn insertion_order_is_neighbor_order() {
        let g = graph!(4; 1 -- 4, 1 -- 2, 1 -- 3).unwrap();

        assert_eq!(
            g.neighbors(VertexIndex(0)),
            &[VertexIndex(3), VertexIndex(1), VertexIndex(2)]
        );
    }

    #[test]
    fn duplicates_and_self_loops_are_kept() {
        let g = graph!(2; 1 -> 2, 1 -> 2, 2 -> 2).unwrap();

        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors(VertexIndex(0)), &[VertexIndex(1), VertexIndex(1)]);
        assert_eq!(g.in_degrees().raw(), &[0, 3]);
        assert!(g.representations_agree());
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let err = graph!(3; 1 -- 2, 2 -- 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidVertexIndex);

        let err = graph!(3; 0 -> 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidVertexIndex);
    }

    #[test]
    fn oversized_vertex_count_is_rejected() {
        let err = Graph::from_edges(MAX_VERTICES + 1, Orientation::Directed, []).unwrap_err();
        assert!(matches!(
            err,
            GraphParseError::TooManyVertices { vertex_count, .. } if vertex_count == MAX_VERTICES + 1
        ));
    }

    #[test]
    fn empty_graph() {
        let g = graph!(0;).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.vertices().len(), 0);
        assert_eq!(g.edges().count(), 0);
    }

    #[test]
    fn display_lists_neighbors() {
        let g = graph!(3; 1 -> 2, 1 -> 3).unwrap();
        insta::assert_snapshot!(g.to_string(), @r"
        directed graph, 3 vertices, 2 edges
        0: 1 2
        1:
        2:
        ");
    }
}
