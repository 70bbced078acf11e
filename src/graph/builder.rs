use tracing::debug;

use super::{AdjacencyMatrix, Edge, Graph, Orientation, VertexIndex, VertexVec};
use crate::parser::{GraphParseError, RawEdge};

/// Accumulates edges into both graph representations.
///
/// [`GraphBuilder::add_edge`] feeds the adjacency list and the matrix from the
/// same edge. The per-representation methods exist for input that carries a
/// separate edge batch for each of them.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    orientation: Orientation,
    adjacency: VertexVec<Vec<VertexIndex>>,
    matrix: AdjacencyMatrix,
    edge_count: usize,
}

impl GraphBuilder {
    pub fn new(vertex_count: usize, orientation: impl Into<Orientation>) -> Self {
        GraphBuilder {
            orientation: orientation.into(),
            adjacency: VertexVec::filled(vertex_count, Vec::new()),
            matrix: AdjacencyMatrix::new(vertex_count),
            edge_count: 0,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn build(self) -> Graph {
        debug!(
            vertices = self.vertex_count(),
            edges = self.edge_count,
            orientation = %self.orientation,
            "built graph"
        );
        Graph {
            orientation: self.orientation,
            adjacency: self.adjacency,
            matrix: self.matrix,
            edge_count: self.edge_count,
        }
    }

    /// Range checks a 1-based pair against this builder's vertex count.
    pub fn resolve(&self, raw: RawEdge) -> Result<Edge, GraphParseError> {
        raw.resolve(self.vertex_count())
    }

    pub fn add_raw_edge(&mut self, raw: RawEdge) -> Result<Edge, GraphParseError> {
        let edge = self.resolve(raw)?;
        self.add_edge(edge);
        Ok(edge)
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.add_matrix_edge(edge);
        self.add_list_edge(edge);
    }

    pub fn add_matrix_edge(&mut self, Edge { source, sink }: Edge) {
        self.matrix.insert(source, sink);
        if self.orientation == Orientation::Undirected {
            self.matrix.insert(sink, source);
        }
    }

    pub fn add_list_edge(&mut self, Edge { source, sink }: Edge) {
        self.adjacency[source].push(sink);
        if self.orientation == Orientation::Undirected {
            self.adjacency[sink].push(source);
        }
        self.edge_count += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn separate_batches_can_diverge() {
        let mut builder = GraphBuilder::new(3, false);
        builder.add_matrix_edge(Edge::new(0, 1));
        builder.add_list_edge(Edge::new(1, 2));
        let g = builder.build();

        assert!(g.has_edge(VertexIndex(0), VertexIndex(1)));
        assert!(g.neighbors(VertexIndex(0)).is_empty());
        assert_eq!(g.neighbors(VertexIndex(2)), &[VertexIndex(1)]);
        assert!(!g.representations_agree());
    }

    #[test]
    fn same_edges_in_both_batches_agree() {
        let mut builder = GraphBuilder::new(3, true);
        for edge in [Edge::new(0, 1), Edge::new(0, 2)] {
            builder.add_matrix_edge(edge);
        }
        for edge in [Edge::new(0, 2), Edge::new(0, 1)] {
            builder.add_list_edge(edge);
        }
        let g = builder.build();

        assert!(g.representations_agree());
        assert_eq!(g.neighbors(VertexIndex(0)), &[VertexIndex(2), VertexIndex(1)]);
    }

    #[test]
    fn raw_edges_are_converted_to_zero_based() {
        let mut builder = GraphBuilder::new(2, Orientation::Directed);
        let edge = builder.add_raw_edge(RawEdge { source: 2, sink: 1 }).unwrap();

        assert_eq!(edge, Edge::new(1, 0));
        assert!(builder
            .add_raw_edge(RawEdge { source: 3, sink: 1 })
            .is_err());
    }
}
