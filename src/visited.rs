//! Visited state for graph traversals.
//!
//! One [`Visited`] belongs to one sweep. Single-source primitives such as
//! [`Graph::bfs`](crate::graph::Graph::bfs) take it by `&mut` so that a caller
//! can thread the same set through several calls and skip components that were
//! already covered.

use bitvec::vec::BitVec;

use crate::graph::VertexIndex;

/// A dense, bit-packed visited set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visited {
    bits: BitVec,
}

impl Visited {
    /// A set over `len` vertices, none of them visited.
    pub fn new(len: usize) -> Self {
        Visited {
            bits: BitVec::repeat(false, len),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn is_visited(&self, vertex: VertexIndex) -> bool {
        self.bits[vertex.0]
    }

    /// Marks `vertex` and returns `true` iff it was not visited before.
    #[inline]
    pub fn visit(&mut self, vertex: VertexIndex) -> bool {
        !self.bits.replace(vertex.0, true)
    }

    pub fn is_complete(&self) -> bool {
        self.bits.all()
    }

    /// The lowest unvisited vertex at or after `from`.
    ///
    /// Sweeps use this to find their next restart point without rescanning the
    /// prefix they already covered.
    pub fn next_unvisited(&self, from: VertexIndex) -> Option<VertexIndex> {
        self.bits
            .get(from.0..)?
            .first_zero()
            .map(|offset| VertexIndex(from.0 + offset))
    }
}
