use std::io::{self, Write};

use tracing::trace;

use crate::{
    graph::{Graph, VertexIndex},
    visited::Visited,
};

/// An explicit-stack frame: the vertex being expanded and the position of the
/// next neighbour to look at.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    pub(crate) vertex: VertexIndex,
    pub(crate) next: usize,
}

impl Frame {
    pub(crate) fn new(vertex: VertexIndex) -> Self {
        Frame { vertex, next: 0 }
    }
}

impl Graph {
    /// Depth-first pre-order from `source`, calling `visit` on each vertex as
    /// it is first reached. Vertices already in `visited` are not entered.
    pub fn dfs_from(
        &self,
        visited: &mut Visited,
        source: VertexIndex,
        mut visit: impl FnMut(VertexIndex),
    ) {
        if !visited.visit(source) {
            return;
        }
        visit(source);

        let mut stack = vec![Frame::new(source)];
        while let Some(frame) = stack.last_mut() {
            match self.neighbors(frame.vertex).get(frame.next) {
                Some(&next) => {
                    frame.next += 1;
                    if visited.visit(next) {
                        trace!(vertex = %next, depth = stack.len(), "dfs enter");
                        visit(next);
                        stack.push(Frame::new(next));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    /// Runs [`Graph::dfs_from`] from every unvisited vertex in index order.
    pub fn dfs_visit(&self, mut visit: impl FnMut(VertexIndex)) {
        let mut visited = Visited::new(self.vertex_count());
        let mut next = visited.next_unvisited(VertexIndex(0));
        while let Some(v) = next {
            self.dfs_from(&mut visited, v, &mut visit);
            next = visited.next_unvisited(v);
        }
        debug_assert!(visited.is_complete());
    }

    /// Depth-first pre-order of the whole graph.
    #[tracing::instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn dfs(&self) -> Vec<VertexIndex> {
        let mut order = Vec::with_capacity(self.vertex_count());
        self.dfs_visit(|v| order.push(v));
        order
    }

    /// Writes the depth-first pre-order to `writer` while traversing, each
    /// vertex followed by a space.
    pub fn dfs_print(&self, writer: &mut impl Write) -> io::Result<()> {
        let mut result = Ok(());
        self.dfs_visit(|v| {
            if result.is_ok() {
                result = write!(writer, "{v} ");
            }
        });
        result
    }
}

#[cfg(test)]
mod test {
    use crate::{graph, graph::VertexIndex, test_graphs::TestGraph, visited::Visited};

    #[test]
    fn path_pre_order() {
        let g = graph!(4; 1 -- 2, 2 -- 3, 3 -- 4).unwrap();
        assert_eq!(g.dfs(), (0..4).map(VertexIndex).collect::<Vec<_>>());
    }

    #[test]
    fn goes_deep_before_wide() {
        // 0 has children 1 and 3, 1 has child 2
        let g = graph!(4; 1 -- 2, 1 -- 4, 2 -- 3).unwrap();
        assert_eq!(
            g.dfs(),
            vec![VertexIndex(0), VertexIndex(1), VertexIndex(2), VertexIndex(3)]
        );
    }

    #[test]
    fn print_while_traversing() {
        let g = TestGraph::TwoTriangles.build();
        let mut out = Vec::new();
        g.dfs_print(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "0 1 2 3 4 5 ");
    }

    #[test]
    fn single_source_respects_visited() {
        let g = TestGraph::TwoTriangles.build();
        let mut visited = Visited::new(g.vertex_count());
        let mut seen = Vec::new();

        g.dfs_from(&mut visited, VertexIndex(3), |v| seen.push(v));
        assert_eq!(seen.len(), 3);

        g.dfs_from(&mut visited, VertexIndex(4), |v| seen.push(v));
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn long_path_does_not_overflow() {
        let n = 10_000;
        let g = TestGraph::Path(n).build();
        let order = g.dfs();

        assert_eq!(order.len(), n);
        assert!(order.iter().enumerate().all(|(i, v)| v.0 == i));
    }
}
