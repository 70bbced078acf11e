//! # Traversal and ordering algorithms
//!
//! All algorithms run over the adjacency list of a [`Graph`](crate::graph::Graph)
//! and visit neighbours in insertion order, so their output is fully determined
//! by the edge input.
//!
//! ## Traversals
//! - [`bfs`]: breadth-first search from a source, full-graph sweeps and
//!   distance layers
//! - [`dfs`]: depth-first pre-order from a source and full-graph sweeps
//!
//! ## Topological Operations
//! - [`topological_order`]: reverse post-order (DFS) and Kahn's algorithm, each
//!   with a variant that reports cycles
//!
//! Single-source primitives take a [`Visited`](crate::visited::Visited) set by
//! `&mut`; sweeps allocate their own. Depth-first algorithms keep an explicit
//! stack, so graph depth is not limited by the call stack.

pub mod bfs;
pub mod dfs;
pub mod topological_order;
