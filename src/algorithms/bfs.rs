use std::collections::VecDeque;

use tracing::trace;

use crate::{
    graph::{Graph, VertexIndex, VertexVec},
    visited::Visited,
};

impl Graph {
    /// Breadth-first order of the vertices reachable from `source` that are not
    /// yet in `visited`.
    ///
    /// `source` itself is always marked and emitted first. Vertices come out in
    /// non-decreasing distance from `source`; equal distances keep the order in
    /// which their first discoverer listed them.
    pub fn bfs(&self, visited: &mut Visited, source: VertexIndex) -> Vec<VertexIndex> {
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        visited.visit(source);
        queue.push_back(source);

        while let Some(curr) = queue.pop_front() {
            trace!(vertex = %curr, "bfs dequeue");
            order.push(curr);
            for &next in self.neighbors(curr) {
                if visited.visit(next) {
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// One BFS per still-unvisited vertex, in index order, sharing a single
    /// visited set. Each inner vector is one restart.
    #[tracing::instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn bfs_components(&self) -> Vec<Vec<VertexIndex>> {
        let mut visited = Visited::new(self.vertex_count());
        let mut components = Vec::new();
        let mut next = visited.next_unvisited(VertexIndex(0));
        while let Some(v) = next {
            components.push(self.bfs(&mut visited, v));
            next = visited.next_unvisited(v);
        }
        debug_assert!(visited.is_complete());
        trace!(components = components.len(), "bfs sweep done");
        components
    }

    /// Breadth-first order of the whole graph, disconnected parts included.
    pub fn bfs_sweep(&self) -> Vec<VertexIndex> {
        self.bfs_components().into_iter().flatten().collect()
    }

    /// A sweep that starts at `source` before restarting at the remaining
    /// unvisited vertices in index order.
    pub fn bfs_sweep_from(&self, source: VertexIndex) -> Vec<VertexIndex> {
        let mut visited = Visited::new(self.vertex_count());
        let mut order = self.bfs(&mut visited, source);
        let mut next = visited.next_unvisited(VertexIndex(0));
        while let Some(v) = next {
            order.extend(self.bfs(&mut visited, v));
            next = visited.next_unvisited(v);
        }
        order
    }

    /// Hop distance from `source` to every vertex, `None` when unreachable.
    pub fn bfs_distances(&self, source: VertexIndex) -> VertexVec<Option<usize>> {
        let mut dist = VertexVec::filled(self.vertex_count(), None);
        let mut queue = VecDeque::from([(source, 0)]);
        dist[source] = Some(0);

        while let Some((curr, d)) = queue.pop_front() {
            for &next in self.neighbors(curr) {
                if dist[next].is_none() {
                    dist[next] = Some(d + 1);
                    queue.push_back((next, d + 1));
                }
            }
        }

        dist
    }
}
