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

/// A row of a dense cost matrix does not match the matrix dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixShapeError {
    row: usize,
    expected: usize,
    got: usize,
}

impl MatrixShapeError {
    pub fn new(row: usize, expected: usize, got: usize) -> Self {
        Self { row, expected, got }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn expected(&self) -> usize {
        self.expected
    }

    #[inline]
    pub fn got(&self) -> usize {
        self.got
    }
}

impl std::fmt::Display for MatrixShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Row {} has {} entries, expected {}",
            self.row, self.got, self.expected
        )
    }
}

impl std::error::Error for MatrixShapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_shape_error_display() {
        let err = MatrixShapeError::new(2, 5, 4);
        assert_eq!(err.row(), 2);
        assert_eq!(err.expected(), 5);
        assert_eq!(err.got(), 4);
        assert_eq!(err.to_string(), "Row 2 has 4 entries, expected 5");
    }
}
