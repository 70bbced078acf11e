//! Small named graphs shared by the tests.

use crate::{
    graph,
    graph::{Edge, Graph, GraphBuilder, Orientation},
};

#[derive(Clone, Copy, Debug)]
pub enum TestGraph {
    /// Undirected path `0 - 1 - ... - (n-1)`.
    Path(usize),
    /// Two disjoint undirected triangles, `{0, 1, 2}` and `{3, 4, 5}`.
    TwoTriangles,
    /// Directed `0 -> {1, 2} -> 3`.
    Diamond,
    /// A directed DAG with several sources, merges and a chain tail.
    Layered,
    /// [`TestGraph::Layered`] plus a separate directed 3-cycle.
    LayeredWithCycle,
}

impl TestGraph {
    pub fn build(self) -> Graph {
        match self {
            TestGraph::Path(n) => {
                let mut builder = GraphBuilder::new(n, Orientation::Undirected);
                for i in 1..n {
                    builder.add_edge(Edge::new(i - 1, i));
                }
                builder.build()
            }
            TestGraph::TwoTriangles => {
                graph!(6; 1 -- 2, 2 -- 3, 3 -- 1, 4 -- 5, 5 -- 6, 6 -- 4).unwrap()
            }
            TestGraph::Diamond => graph!(4; 1 -> 2, 1 -> 3, 2 -> 4, 3 -> 4).unwrap(),
            TestGraph::Layered => Self::layered_builder(0).build(),
            TestGraph::LayeredWithCycle => {
                let mut builder = Self::layered_builder(3);
                for (source, sink) in [(18, 19), (19, 20), (20, 18)] {
                    builder.add_edge(Edge::new(source, sink));
                }
                builder.build()
            }
        }
    }

    // sources s0..s3 = 0..4, diamond a0..a5 = 4..10, join j0..j2 = 10..13,
    // tail t0..t4 = 13..18
    fn layered_builder(extra: usize) -> GraphBuilder {
        let mut builder = GraphBuilder::new(18 + extra, Orientation::Directed);
        let edges = [
            (0, 4),
            (1, 4),
            (2, 5),
            (3, 5),
            (4, 6),
            (4, 7),
            (5, 7),
            (6, 8),
            (7, 8),
            (7, 9),
            (5, 9),
            (8, 10),
            (9, 10),
            (0, 11),
            (9, 11),
            (3, 12),
            (8, 12),
            (10, 13),
            (11, 13),
            (12, 14),
            (13, 15),
            (14, 15),
            (15, 16),
            (16, 17),
            (2, 17),
        ];
        for (source, sink) in edges {
            builder.add_edge(Edge::new(source, sink));
        }
        builder
    }
}
