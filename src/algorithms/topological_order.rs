use std::collections::VecDeque;

use thiserror::Error;
use tracing::{trace, warn};

use super::dfs::Frame;
use crate::{
    graph::{Graph, VertexIndex, VertexVec},
    visited::Visited,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopoError {
    #[error("Not a DAG: {nodes_processed} nodes processed out of {total_nodes} total nodes. Remaining nodes with non-zero in-degrees: {remaining_nodes:?}")]
    NotDag {
        nodes_processed: usize,
        total_nodes: usize,
        remaining_nodes: Vec<(VertexIndex, usize)>,
    },
    #[error("Not a DAG: edge {from} -> {to} closes a cycle")]
    Cycle { from: VertexIndex, to: VertexIndex },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

impl Graph {
    /// Topological order as the reverse of the depth-first finishing order.
    ///
    /// Restarts at every unvisited vertex in index order. Cycles are not
    /// detected: on cyclic input the result is still a permutation of all
    /// vertices, but some back edge points backwards in it. Use
    /// [`Graph::topo_sort_dfs_checked`] to reject such input.
    #[tracing::instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn topo_sort_dfs(&self) -> Vec<VertexIndex> {
        let mut visited = Visited::new(self.vertex_count());
        let mut finished = Vec::with_capacity(self.vertex_count());

        let mut next = visited.next_unvisited(VertexIndex(0));
        while let Some(v) = next {
            self.post_order_from(&mut visited, v, &mut finished);
            next = visited.next_unvisited(v);
        }

        let mut order = Vec::with_capacity(finished.len());
        while let Some(v) = finished.pop() {
            order.push(v);
        }
        order
    }

    /// Pushes every vertex reachable from `source` onto `finished` once all of
    /// its neighbours are finished.
    fn post_order_from(
        &self,
        visited: &mut Visited,
        source: VertexIndex,
        finished: &mut Vec<VertexIndex>,
    ) {
        visited.visit(source);
        let mut stack = vec![Frame::new(source)];

        while let Some(frame) = stack.last_mut() {
            let vertex = frame.vertex;
            match self.neighbors(vertex).get(frame.next) {
                Some(&next) => {
                    frame.next += 1;
                    if visited.visit(next) {
                        stack.push(Frame::new(next));
                    }
                }
                None => {
                    stack.pop();
                    trace!(%vertex, "finished");
                    finished.push(vertex);
                }
            }
        }
    }

    /// Like [`Graph::topo_sort_dfs`], but tracks which vertices are still on the
    /// DFS stack and fails on the first edge that leads back into one of them.
    ///
    /// In an undirected graph every edge leads back to its other endpoint, so
    /// any edge makes this fail.
    #[tracing::instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn topo_sort_dfs_checked(&self) -> Result<Vec<VertexIndex>, TopoError> {
        let mut marks = VertexVec::filled(self.vertex_count(), Mark::Unvisited);
        let mut finished = Vec::with_capacity(self.vertex_count());

        for root in self.vertices() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::InProgress;
            let mut stack = vec![Frame::new(root)];

            while let Some(frame) = stack.last_mut() {
                let vertex = frame.vertex;
                match self.neighbors(vertex).get(frame.next) {
                    Some(&next) => {
                        frame.next += 1;
                        match marks[next] {
                            Mark::Unvisited => {
                                marks[next] = Mark::InProgress;
                                stack.push(Frame::new(next));
                            }
                            Mark::InProgress => {
                                return Err(TopoError::Cycle {
                                    from: vertex,
                                    to: next,
                                });
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        stack.pop();
                        marks[vertex] = Mark::Done;
                        finished.push(vertex);
                    }
                }
            }
        }

        finished.reverse();
        Ok(finished)
    }

    /// Kahn's algorithm.
    ///
    /// Seeds a FIFO queue with the in-degree-0 vertices in index order and
    /// releases a neighbour once its in-degree drops to zero. On a cycle the
    /// vertices on (or behind) it are never released and the result is shorter
    /// than [`Graph::vertex_count`], which is how callers detect it.
    #[tracing::instrument(skip(self), fields(vertices = self.vertex_count()))]
    pub fn topo_sort_kahn(&self) -> Vec<VertexIndex> {
        let (order, _) = self.kahn();
        order
    }

    /// Kahn's algorithm, failing with [`TopoError::NotDag`] instead of
    /// returning a partial order.
    pub fn topo_sort_kahn_checked(&self) -> Result<Vec<VertexIndex>, TopoError> {
        let (order, indeg) = self.kahn();

        if order.len() != indeg.len() {
            let remaining_nodes: Vec<(VertexIndex, usize)> = indeg
                .iter()
                .filter_map(|(node, &degree)| {
                    if degree > 0 {
                        Some((node, degree))
                    } else {
                        None
                    }
                })
                .collect();

            return Err(TopoError::NotDag {
                nodes_processed: order.len(),
                total_nodes: indeg.len(),
                remaining_nodes,
            });
        }
        Ok(order)
    }

    /// The order Kahn's algorithm produces and the residual in-degrees.
    fn kahn(&self) -> (Vec<VertexIndex>, VertexVec<usize>) {
        let mut indeg = self.in_degrees();

        let mut q = VecDeque::new();
        for (i, d) in indeg.iter() {
            if *d == 0 {
                q.push_back(i);
            }
        }

        let mut order = Vec::with_capacity(indeg.len());
        while let Some(v) = q.pop_front() {
            order.push(v);
            for &u in self.neighbors(v) {
                indeg[u] -= 1;
                if indeg[u] == 0 {
                    q.push_back(u);
                }
            }
        }

        if order.len() != indeg.len() {
            warn!(
                processed = order.len(),
                total = indeg.len(),
                "kahn stopped early, graph has a cycle"
            );
        }
        (order, indeg)
    }

    /// Whether `order` lists every vertex exactly once with each edge's source
    /// before its sink.
    pub fn is_topological_order(&self, order: &[VertexIndex]) -> bool {
        if order.len() != self.vertex_count() {
            return false;
        }
        let mut position = VertexVec::filled(self.vertex_count(), None);
        for (i, &v) in order.iter().enumerate() {
            let Some(slot) = position.get_mut(v) else {
                return false;
            };
            if slot.replace(i).is_some() {
                return false;
            }
        }
        self.edges()
            .all(|edge| position[edge.source] < position[edge.sink])
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::TopoError;
    use crate::{graph, graph::VertexIndex, test_graphs::TestGraph};

    #[test]
    fn kahn_on_diamond() {
        let g = graph!(4; 1 -> 2, 1 -> 3, 2 -> 4, 3 -> 4).unwrap();
        let order = g.topo_sort_kahn();

        insta::assert_snapshot!(order.iter().join(" "), @"0 1 2 3");
        assert!(g.is_topological_order(&order));
    }

    #[test]
    fn dfs_on_diamond() {
        let g = graph!(4; 1 -> 2, 1 -> 3, 2 -> 4, 3 -> 4).unwrap();
        let order = g.topo_sort_dfs();

        insta::assert_snapshot!(order.iter().join(" "), @"0 2 1 3");
        assert!(g.is_topological_order(&order));
        assert_eq!(g.topo_sort_dfs_checked().unwrap(), order);
    }

    #[test]
    fn kahn_seeds_sources_in_index_order() {
        let g = graph!(4; 4 -> 1, 2 -> 1, 3 -> 4).unwrap();
        let order = g.topo_sort_kahn();

        insta::assert_snapshot!(order.iter().join(" "), @"1 2 3 0");
        assert!(g.is_topological_order(&order));
    }

    #[test]
    fn kahn_on_cycle_returns_nothing() {
        let g = graph!(3; 1 -> 2, 2 -> 3, 3 -> 1).unwrap();
        assert!(g.topo_sort_kahn().is_empty());
    }

    #[test]
    fn dfs_on_cycle_returns_an_invalid_permutation() {
        let g = graph!(3; 1 -> 2, 2 -> 3, 3 -> 1).unwrap();
        let order = g.topo_sort_dfs();

        assert_eq!(order.len(), 3);
        assert!(!g.is_topological_order(&order));
        assert_eq!(
            g.topo_sort_dfs_checked(),
            Err(TopoError::Cycle {
                from: VertexIndex(2),
                to: VertexIndex(0)
            })
        );
    }

    #[test]
    fn topo_sort_valid_dag() {
        let g = TestGraph::Layered.build();

        let kahn = g.topo_sort_kahn_checked().unwrap();
        let dfs = g.topo_sort_dfs_checked().unwrap();

        assert!(g.is_topological_order(&kahn));
        assert!(g.is_topological_order(&dfs));
        assert_eq!(g.topo_sort_dfs(), dfs);
    }

    #[test]
    fn topo_sort_with_cycle() {
        // 1 -> 2 -> 3 -> 4 -> 2
        let g = graph!(4; 1 -> 2, 2 -> 3, 3 -> 4, 4 -> 2).unwrap();

        let partial = g.topo_sort_kahn();
        assert_eq!(partial, vec![VertexIndex(0)]);

        let result = g.topo_sort_kahn_checked();
        assert!(result.is_err());

        if let Err(TopoError::NotDag {
            nodes_processed,
            total_nodes,
            remaining_nodes,
        }) = result
        {
            assert_eq!(nodes_processed, 1);
            assert_eq!(total_nodes, 4);
            assert_eq!(
                remaining_nodes,
                vec![(VertexIndex(1), 1), (VertexIndex(2), 1), (VertexIndex(3), 1)]
            );
        }
    }

    #[test]
    fn cycle_behind_a_dag_part() {
        let g = TestGraph::LayeredWithCycle.build();

        let partial = g.topo_sort_kahn();
        assert!(partial.len() < g.vertex_count());
        assert!(g.topo_sort_dfs_checked().is_err());

        let Err(TopoError::NotDag {
            remaining_nodes, ..
        }) = g.topo_sort_kahn_checked()
        else {
            panic!("cycle not reported");
        };
        assert_eq!(remaining_nodes.len(), 3);
        assert!(remaining_nodes.iter().all(|&(_, degree)| degree == 1));
    }

    #[test]
    fn undirected_edges_count_as_cycles() {
        let g = graph!(2; 1 -- 2).unwrap();

        assert!(g.topo_sort_kahn().is_empty());
        assert!(g.topo_sort_dfs_checked().is_err());
    }

    #[test]
    fn error_message() {
        let err = graph!(2; 1 -> 2, 2 -> 1)
            .unwrap()
            .topo_sort_dfs_checked()
            .unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Not a DAG: edge 1 -> 0 closes a cycle");
    }

    #[test]
    fn is_topological_order_rejects_non_permutations() {
        let g = TestGraph::Diamond.build();

        assert!(!g.is_topological_order(&[VertexIndex(0), VertexIndex(1), VertexIndex(2)]));
        assert!(!g.is_topological_order(&[
            VertexIndex(0),
            VertexIndex(1),
            VertexIndex(1),
            VertexIndex(3)
        ]));
        assert!(!g.is_topological_order(&[
            VertexIndex(0),
            VertexIndex(1),
            VertexIndex(2),
            VertexIndex(7)
        ]));
        assert!(!g.is_topological_order(&[
            VertexIndex(3),
            VertexIndex(1),
            VertexIndex(2),
            VertexIndex(0)
        ]));
    }
}
