//! # graphwalk
//!
//! Graphwalk builds a graph from a stream of vertex pairs and runs the four
//! classic traversal and ordering algorithms over it: breadth-first search,
//! depth-first search, DFS-based topological sort and Kahn's topological sort.
//!
//! ```
//! use graphwalk::graph;
//!
//! let dag = graph!(4; 1 -> 2, 1 -> 3, 2 -> 4, 3 -> 4).unwrap();
//! let order = dag.topo_sort_kahn();
//! assert!(dag.is_topological_order(&order));
//! ```

pub mod algorithms;
pub mod graph;
pub mod logging;
pub mod parser;
pub mod typed_vec;
pub mod visited;

#[cfg(test)]
mod test_graphs;
