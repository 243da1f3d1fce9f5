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

use tsp_kopt_model::prelude::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooFewNodesError {
    got: usize,
}

impl TooFewNodesError {
    pub fn new(got: usize) -> Self {
        Self { got }
    }

    pub fn got(&self) -> usize {
        self.got
    }
}

impl std::fmt::Display for TooFewNodesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A tour needs at least 3 nodes, got {}", self.got)
    }
}

impl std::error::Error for TooFewNodesError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackUnderflowError {
    requested: usize,
    depth: usize,
}

impl StackUnderflowError {
    pub fn new(requested: usize, depth: usize) -> Self {
        Self { requested, depth }
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl std::fmt::Display for StackUnderflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cannot undo {} swaps, the stack holds {}",
            self.requested, self.depth
        )
    }
}

impl std::error::Error for StackUnderflowError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodesNotDistinctError;

impl NodesNotDistinctError {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NodesNotDistinctError {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodesNotDistinctError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Swap nodes are not pairwise distinct")
    }
}

impl std::error::Error for NodesNotDistinctError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetachedEdgeError {
    tail: NodeIndex,
    head: NodeIndex,
}

impl DetachedEdgeError {
    pub fn new(tail: NodeIndex, head: NodeIndex) -> Self {
        Self { tail, head }
    }

    pub fn tail(&self) -> NodeIndex {
        self.tail
    }

    pub fn head(&self) -> NodeIndex {
        self.head
    }
}

impl std::fmt::Display for DetachedEdgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Nodes {} and {} are not linked in the tour",
            self.tail, self.head
        )
    }
}

impl std::error::Error for DetachedEdgeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapOrientationError {
    t3: NodeIndex,
    t4: NodeIndex,
}

impl SwapOrientationError {
    pub fn new(t3: NodeIndex, t4: NodeIndex) -> Self {
        Self { t3, t4 }
    }

    pub fn t3(&self) -> NodeIndex {
        self.t3
    }

    pub fn t4(&self) -> NodeIndex {
        self.t4
    }
}

impl std::fmt::Display for SwapOrientationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Edge ({}, {}) runs against the required traversal direction",
            self.t3, self.t4
        )
    }
}

impl std::error::Error for SwapOrientationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DegenerateSplitError {
    a: NodeIndex,
    b: NodeIndex,
}

impl DegenerateSplitError {
    pub fn new(a: NodeIndex, b: NodeIndex) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> NodeIndex {
        self.a
    }

    pub fn b(&self) -> NodeIndex {
        self.b
    }
}

impl std::fmt::Display for DegenerateSplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Nodes {} and {} are neighbors, the split would strand fewer than 3 nodes",
            self.a, self.b
        )
    }
}

impl std::error::Error for DegenerateSplitError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidSwapError {
    NodesNotDistinct(NodesNotDistinctError),
    DetachedEdge(DetachedEdgeError),
    SwapOrientation(SwapOrientationError),
    DegenerateSplit(DegenerateSplitError),
}

impl std::fmt::Display for InvalidSwapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidSwapError::NodesNotDistinct(e) => write!(f, "{}", e),
            InvalidSwapError::DetachedEdge(e) => write!(f, "{}", e),
            InvalidSwapError::SwapOrientation(e) => write!(f, "{}", e),
            InvalidSwapError::DegenerateSplit(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InvalidSwapError {}

impl From<NodesNotDistinctError> for InvalidSwapError {
    fn from(err: NodesNotDistinctError) -> Self {
        InvalidSwapError::NodesNotDistinct(err)
    }
}

impl From<DetachedEdgeError> for InvalidSwapError {
    fn from(err: DetachedEdgeError) -> Self {
        InvalidSwapError::DetachedEdge(err)
    }
}

impl From<SwapOrientationError> for InvalidSwapError {
    fn from(err: SwapOrientationError) -> Self {
        InvalidSwapError::SwapOrientation(err)
    }
}

impl From<DegenerateSplitError> for InvalidSwapError {
    fn from(err: DegenerateSplitError) -> Self {
        InvalidSwapError::DegenerateSplit(err)
    }
}
