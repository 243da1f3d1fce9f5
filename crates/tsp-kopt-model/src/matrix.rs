// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{err::MatrixShapeError, node::NodeIndex};
use num_traits::Zero;

/// Arc cost source consulted by the tour when summing its cycle cost.
///
/// # Contract
///
/// The matrix covers every node identity a tour hands it, including the
/// pivot of path tours, and arcs touching the pivot cost zero. How the
/// values are produced (Euclidean, geo, precomputed) is the caller's
/// business.
pub trait CostMatrix<T> {
    fn cost(&self, from: NodeIndex, to: NodeIndex) -> T;

    fn dim(&self) -> usize;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Row-major dense cost matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseCostMatrix<T> {
    dim: usize,
    values: Vec<T>,
}

impl<T: Copy + Zero> DenseCostMatrix<T> {
    /// A `dim x dim` matrix with every entry zero.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            values: vec![T::zero(); dim * dim],
        }
    }
}

impl<T: Copy> DenseCostMatrix<T> {
    /// Builds from explicit rows; every row must have `rows.len()` entries.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixShapeError> {
        let dim = rows.len();
        let mut values = Vec::with_capacity(dim * dim);
        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != dim {
                return Err(MatrixShapeError::new(row, dim, entries.len()));
            }
            values.extend_from_slice(entries);
        }
        Ok(Self { dim, values })
    }

    /// Builds a `dim x dim` matrix by evaluating `f` for every arc.
    pub fn from_fn<F>(dim: usize, mut f: F) -> Self
    where
        F: FnMut(NodeIndex, NodeIndex) -> T,
    {
        let mut values = Vec::with_capacity(dim * dim);
        for from in 0..dim {
            for to in 0..dim {
                values.push(f(NodeIndex::new(from), NodeIndex::new(to)));
            }
        }
        Self { dim, values }
    }

    #[inline]
    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> T {
        debug_assert!(from.get() < self.dim, "from index out of bounds");
        debug_assert!(to.get() < self.dim, "to index out of bounds");
        self.values[from.get() * self.dim + to.get()]
    }

    #[inline]
    pub fn set(&mut self, from: NodeIndex, to: NodeIndex, value: T) {
        debug_assert!(from.get() < self.dim, "from index out of bounds");
        debug_assert!(to.get() < self.dim, "to index out of bounds");
        self.values[from.get() * self.dim + to.get()] = value;
    }

    /// Writes `value` for both arc directions.
    #[inline]
    pub fn set_symmetric(&mut self, a: NodeIndex, b: NodeIndex, value: T) {
        self.set(a, b, value);
        self.set(b, a, value);
    }
}

impl<T: Copy> CostMatrix<T> for DenseCostMatrix<T> {
    #[inline]
    fn cost(&self, from: NodeIndex, to: NodeIndex) -> T {
        self.get(from, to)
    }

    #[inline]
    fn dim(&self) -> usize {
        self.dim
    }
}
