use std::fmt::{self, Display};

use bitvec::vec::BitVec;

use super::{VertexIndex, VertexVec};

/// Row-major `n × n` bit matrix; bit `(i, j)` is set iff the edge `i -> j`
/// exists.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencyMatrix {
    dimension: usize,
    bits: BitVec,
}

impl AdjacencyMatrix {
    /// An empty `dimension × dimension` matrix.
    ///
    /// # Panics
    ///
    /// Panics if `dimension²` overflows `usize`. Input is bounded by
    /// [`MAX_VERTICES`](crate::graph::MAX_VERTICES) well before that.
    pub fn new(dimension: usize) -> Self {
        let cells = dimension
            .checked_mul(dimension)
            .unwrap_or_else(|| panic!("a {dimension}x{dimension} matrix overflows usize"));
        AdjacencyMatrix {
            dimension,
            bits: BitVec::repeat(false, cells),
        }
    }

    pub fn from_adjacency(adjacency: &VertexVec<Vec<VertexIndex>>) -> Self {
        let mut matrix = AdjacencyMatrix::new(adjacency.len());
        for (source, sinks) in adjacency {
            for &sink in sinks {
                matrix.insert(source, sink);
            }
        }
        matrix
    }

    #[inline]
    fn offset(&self, source: VertexIndex, sink: VertexIndex) -> usize {
        assert!(
            source.0 < self.dimension && sink.0 < self.dimension,
            "edge {source} -> {sink} outside a {0}x{0} matrix",
            self.dimension
        );
        source.0 * self.dimension + sink.0
    }

    pub fn insert(&mut self, source: VertexIndex, sink: VertexIndex) {
        let offset = self.offset(source, sink);
        self.bits.set(offset, true);
    }

    pub fn contains(&self, source: VertexIndex, sink: VertexIndex) -> bool {
        self.bits[self.offset(source, sink)]
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.dimension).all(|i| {
            (i + 1..self.dimension).all(|j| {
                self.contains(VertexIndex(i), VertexIndex(j))
                    == self.contains(VertexIndex(j), VertexIndex(i))
            })
        })
    }
}

impl Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.bits.chunks(self.dimension.max(1)) {
            for bit in row.iter().by_vals() {
                write!(f, "{}", if bit { '1' } else { '0' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
