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

/// Index of a node in the tour arena. Identity and storage slot coincide:
/// the insertion order at tour construction fixes the index for the tour's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeIndex({})", self.0)
    }
}

impl From<usize> for NodeIndex {
    #[inline]
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

/// Node payload. Cities carry planar or spatial coordinates; the pivot is
/// the synthetic zero-cost node appended to path tours so that every
/// algorithm operates on a cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    TwoD { x: f64, y: f64 },
    ThreeD { x: f64, y: f64, z: f64 },
    Pivot,
}

impl Node {
    #[inline]
    pub fn two_d(x: f64, y: f64) -> Self {
        Node::TwoD { x, y }
    }

    #[inline]
    pub fn three_d(x: f64, y: f64, z: f64) -> Self {
        Node::ThreeD { x, y, z }
    }

    #[inline]
    pub fn pivot() -> Self {
        Node::Pivot
    }

    #[inline]
    pub fn is_pivot(&self) -> bool {
        matches!(self, Node::Pivot)
    }

    #[inline]
    pub fn x(&self) -> Option<f64> {
        match self {
            Node::TwoD { x, .. } | Node::ThreeD { x, .. } => Some(*x),
            Node::Pivot => None,
        }
    }

    #[inline]
    pub fn y(&self) -> Option<f64> {
        match self {
            Node::TwoD { y, .. } | Node::ThreeD { y, .. } => Some(*y),
            Node::Pivot => None,
        }
    }

    #[inline]
    pub fn z(&self) -> Option<f64> {
        match self {
            Node::ThreeD { z, .. } => Some(*z),
            Node::TwoD { .. } | Node::Pivot => None,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::TwoD { x, y } => write!(f, "Node2D({}, {})", x, y),
            Node::ThreeD { x, y, z } => write!(f, "Node3D({}, {}, {})", x, y, z),
            Node::Pivot => write!(f, "NodePivot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_index_new_get_roundtrip() {
        let idx = NodeIndex::new(7);
        assert_eq!(idx.get(), 7);
        assert_eq!(NodeIndex::from(7), idx);
    }

    #[test]
    fn test_node_index_display() {
        assert_eq!(NodeIndex::new(3).to_string(), "NodeIndex(3)");
    }

    #[test]
    fn test_node_index_ordering() {
        assert!(NodeIndex::new(1) < NodeIndex::new(2));
    }

    #[test]
    fn test_city_coordinates() {
        let a = Node::two_d(1.5, -2.0);
        assert_eq!(a.x(), Some(1.5));
        assert_eq!(a.y(), Some(-2.0));
        assert_eq!(a.z(), None);
        assert!(!a.is_pivot());

        let b = Node::three_d(0.0, 1.0, 2.0);
        assert_eq!(b.z(), Some(2.0));
    }

    #[test]
    fn test_pivot_has_no_coordinates() {
        let p = Node::Pivot;
        assert!(p.is_pivot());
        assert_eq!(p.x(), None);
        assert_eq!(p.y(), None);
        assert_eq!(p.z(), None);
    }

    #[test]
    fn test_node_display() {
        assert_eq!(Node::two_d(1.0, 2.0).to_string(), "Node2D(1, 2)");
        assert_eq!(Node::Pivot.to_string(), "NodePivot");
    }
}
