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

use crate::node::NodeIndex;

/// Undirected tour edge. Endpoints are stored ordered, so `(a, b)` and
/// `(b, a)` compare and hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    a: NodeIndex,
    b: NodeIndex,
}

impl Edge {
    #[inline]
    pub fn new(a: NodeIndex, b: NodeIndex) -> Self {
        debug_assert!(a != b, "edge endpoints must differ");
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    #[inline]
    pub fn endpoints(self) -> (NodeIndex, NodeIndex) {
        (self.a, self.b)
    }

    #[inline]
    pub fn contains(self, node: NodeIndex) -> bool {
        self.a == node || self.b == node
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint at all.
    #[inline]
    pub fn other(self, node: NodeIndex) -> Option<NodeIndex> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({}, {})", self.a.get(), self.b.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn test_edge_is_direction_independent() {
        assert_eq!(Edge::new(ni(3), ni(8)), Edge::new(ni(8), ni(3)));
    }

    #[test]
    fn test_edge_set_deduplicates_reversed_edges() {
        let mut set = HashSet::new();
        set.insert(Edge::new(ni(0), ni(1)));
        set.insert(Edge::new(ni(1), ni(0)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Edge::new(ni(0), ni(1))));
    }

    #[test]
    fn test_endpoints_are_ordered() {
        let edge = Edge::new(ni(9), ni(2));
        assert_eq!(edge.endpoints(), (ni(2), ni(9)));
    }

    #[test]
    fn test_contains_and_other() {
        let edge = Edge::new(ni(4), ni(7));
        assert!(edge.contains(ni(4)));
        assert!(edge.contains(ni(7)));
        assert!(!edge.contains(ni(5)));
        assert_eq!(edge.other(ni(4)), Some(ni(7)));
        assert_eq!(edge.other(ni(7)), Some(ni(4)));
        assert_eq!(edge.other(ni(5)), None);
    }

    #[test]
    fn test_edge_display() {
        assert_eq!(Edge::new(ni(5), ni(1)).to_string(), "Edge(1, 5)");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "edge endpoints must differ")]
    fn test_self_loop_is_rejected_in_debug() {
        let _ = Edge::new(ni(2), ni(2));
    }
}
