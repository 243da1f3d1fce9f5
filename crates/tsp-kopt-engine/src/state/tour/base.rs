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

use crate::{
    core::numeric::CostNumeric,
    state::tour::{err::TooFewNodesError, record::SwapRecord},
};
use fixedbitset::FixedBitSet;
use fxhash::FxHashSet;
use rand::seq::SliceRandom;
use tsp_kopt_model::prelude::{CostMatrix, Edge, Node, NodeIndex};

/// Smallest node count a tour accepts; below this the cycle degenerates.
pub const MIN_TOUR_NODES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourKind {
    /// Hamiltonian cycle over the given nodes.
    Cycle,
    /// Hamiltonian path; a synthetic pivot node closes it into a cycle so
    /// every operation works uniformly.
    Path,
}

/// Doubly linked cyclic tour over a fixed node set.
///
/// Node identities are the insertion order of the constructor input and
/// never change. The links always form one cycle over all nodes or, while
/// an unfeasible 2-opt split awaits repair, exactly two disjoint cycles.
/// Positions support O(1) order queries and the shorter-arc reversal, but
/// only while fresh; splitting swaps stale them until [`Tour::set_pos`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tour<T> {
    kind: TourKind,
    nodes: Vec<Node>,
    succ: Vec<NodeIndex>,
    pred: Vec<NodeIndex>,
    pos: Vec<i64>,
    edges: FxHashSet<Edge>,
    cost: T,
    swap_stack: Vec<SwapRecord>,
    fresh_positions: bool,
}

impl<T: CostNumeric> Tour<T> {
    /// Builds a tour linking `nodes` in input order into one cycle.
    ///
    /// For [`TourKind::Path`] a pivot node is appended first, so the
    /// effective size is `nodes.len() + 1`. Positions start canonical,
    /// the edge set is derived and the cost is zero until
    /// [`Tour::set_cost`] runs.
    pub fn new(mut nodes: Vec<Node>, kind: TourKind) -> Result<Self, TooFewNodesError> {
        if nodes.len() < MIN_TOUR_NODES {
            return Err(TooFewNodesError::new(nodes.len()));
        }
        if kind == TourKind::Path {
            nodes.push(Node::pivot());
        }

        let len = nodes.len();
        let succ = (0..len).map(|i| NodeIndex::new((i + 1) % len)).collect();
        let pred = (0..len)
            .map(|i| NodeIndex::new((i + len - 1) % len))
            .collect();
        let pos = (0..len as i64).collect();

        let mut tour = Self {
            kind,
            nodes,
            succ,
            pred,
            pos,
            edges: FxHashSet::default(),
            cost: T::zero(),
            swap_stack: Vec::new(),
            fresh_positions: true,
        };
        tour.set_edges();
        Ok(tour)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn kind(&self) -> TourKind {
        self.kind
    }

    #[inline]
    pub fn node(&self, index: NodeIndex) -> &Node {
        debug_assert!(index.get() < self.len(), "node index out of bounds");
        &self.nodes[index.get()]
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn successor(&self, node: NodeIndex) -> NodeIndex {
        debug_assert!(node.get() < self.len(), "node index out of bounds");
        self.succ[node.get()]
    }

    #[inline]
    pub fn predecessor(&self, node: NodeIndex) -> NodeIndex {
        debug_assert!(node.get() < self.len(), "node index out of bounds");
        self.pred[node.get()]
    }

    #[inline]
    pub fn position(&self, node: NodeIndex) -> i64 {
        debug_assert!(node.get() < self.len(), "node index out of bounds");
        self.pos[node.get()]
    }

    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    #[inline]
    pub fn edges(&self) -> &FxHashSet<Edge> {
        &self.edges
    }

    #[inline]
    pub fn swap_stack(&self) -> &[SwapRecord] {
        &self.swap_stack
    }

    /// True while position values reflect the current successor order.
    #[inline]
    pub fn has_fresh_positions(&self) -> bool {
        self.fresh_positions
    }

    /// The synthetic closing node of a path tour.
    #[inline]
    pub fn pivot(&self) -> Option<NodeIndex> {
        match self.kind {
            TourKind::Path => Some(NodeIndex::new(self.len() - 1)),
            TourKind::Cycle => None,
        }
    }

    /// Recomputes the cached cost by summing `matrix` over all cycle arcs.
    /// Feasible tours only.
    pub fn set_cost<M>(&mut self, matrix: &M)
    where
        M: CostMatrix<T>,
    {
        let start = NodeIndex::new(0);
        let mut node = start;
        let mut cost = T::zero();
        for _ in 0..self.len() {
            let next = self.successor(node);
            cost = cost + matrix.cost(node, next);
            node = next;
        }
        debug_assert!(node == start, "set_cost requires a feasible tour");
        self.cost = cost;
    }

    /// Overwrites the cached cost, for drivers that track deltas themselves.
    #[inline]
    pub fn set_raw_cost(&mut self, cost: T) {
        self.cost = cost;
    }

    /// Walks the cycle from node 0 re-assigning canonical positions
    /// `0..len` and marks them fresh.
    ///
    /// On a split tour only the ring containing node 0 is re-labeled and
    /// positions stay stale.
    pub fn set_pos(&mut self) {
        let start = NodeIndex::new(0);
        let mut node = start;
        let mut assigned = 0usize;
        for position in 0..self.len() as i64 {
            self.pos[node.get()] = position;
            assigned += 1;
            node = self.successor(node);
            if node == start {
                break;
            }
        }
        self.fresh_positions = assigned == self.len();
    }

    /// Rebuilds the undirected edge set from the current cycle. Feasible
    /// tours only.
    pub fn set_edges(&mut self) {
        self.edges.clear();
        let start = NodeIndex::new(0);
        let mut node = start;
        for _ in 0..self.len() {
            let next = self.successor(node);
            self.edges.insert(Edge::new(node, next));
            node = next;
            if node == start {
                break;
            }
        }
        debug_assert_eq!(
            self.edges.len(),
            self.len(),
            "set_edges requires a feasible tour"
        );
    }

    /// Relinks the cycle in a uniformly random order, refreshing positions
    /// and edges. The undo stack is cleared; records predating a relink
    /// would replay against links that no longer exist.
    pub fn shuffle<R: rand::Rng>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);

        for i in 0..self.len() {
            let tail = NodeIndex::new(order[i]);
            let head = NodeIndex::new(order[(i + 1) % self.len()]);
            self.link(tail, head);
        }

        self.swap_stack.clear();
        self.set_pos();
        self.set_edges();
        tracing::debug!("Tour: shuffled {} nodes, swap stack cleared", self.len());
    }

    /// Snapshot of the node order, starting at node 0 or, for path tours,
    /// at the pivot so the path reads open at the synthetic node.
    pub fn sequence(&self) -> Vec<NodeIndex> {
        let start = self.pivot().unwrap_or(NodeIndex::new(0));
        self.sequence_from(start)
    }

    /// Snapshot of the node order from a uniformly random start node.
    pub fn sequence_random<R: rand::Rng>(&self, rng: &mut R) -> Vec<NodeIndex> {
        self.sequence_from(NodeIndex::new(rng.random_range(0..self.len())))
    }

    /// Snapshot of the node order by walking successor links from `start`.
    ///
    /// Tolerates a split tour: when the walk closes a ring before seeing
    /// every node it continues from the lowest unvisited index, so each
    /// node is emitted exactly once.
    pub fn sequence_from(&self, start: NodeIndex) -> Vec<NodeIndex> {
        debug_assert!(start.get() < self.len(), "node index out of bounds");
        let mut visited = FixedBitSet::with_capacity(self.len());
        let mut out = Vec::with_capacity(self.len());
        let mut node = start;
        let mut cursor = 0usize;

        for _ in 0..self.len() {
            if visited.contains(node.get()) {
                while visited.contains(cursor) {
                    cursor += 1;
                }
                node = NodeIndex::new(cursor);
            }
            visited.insert(node.get());
            out.push(node);
            node = self.successor(node);
        }
        out
    }

    /// True iff `node` lies strictly inside the open successor arc from
    /// `from` to `to`, found by walking links.
    ///
    /// The walk is bounded by the tour size; if `to` is unreachable (the
    /// nodes sit on different rings of a split tour) this returns false
    /// instead of looping.
    pub fn between_by_links(&self, from: NodeIndex, node: NodeIndex, to: NodeIndex) -> bool {
        let mut current = self.successor(from);
        for _ in 0..self.len() {
            if current == to {
                return false;
            }
            if current == node {
                return true;
            }
            current = self.successor(current);
        }
        false
    }

    /// True iff `node` lies strictly inside the open successor arc from
    /// `from` to `to`, decided in O(1) from positions.
    ///
    /// Positions must be fresh; a single wrap of the position window is
    /// handled, which is why only relative order matters.
    pub fn between_by_position(&self, from: NodeIndex, node: NodeIndex, to: NodeIndex) -> bool {
        debug_assert!(self.fresh_positions, "positions are stale");
        let from_pos = self.position(from);
        let node_pos = self.position(node);
        let to_pos = self.position(to);
        if from_pos <= to_pos {
            from_pos < node_pos && node_pos < to_pos
        } else {
            from_pos < node_pos || node_pos < to_pos
        }
    }

    /// True iff following successor links from node 0 visits every node
    /// exactly once before returning. O(len).
    pub fn is_feasible(&self) -> bool {
        let start = NodeIndex::new(0);
        let mut node = self.successor(start);
        let mut steps = 1usize;
        while node != start && steps < self.len() {
            node = self.successor(node);
            steps += 1;
        }
        node == start && steps == self.len()
    }

    // Link surgery shared with the swap primitives. Callers keep the
    // mirror invariant: every succ write pairs with the matching pred
    // write.

    #[inline]
    pub(crate) fn link(&mut self, tail: NodeIndex, head: NodeIndex) {
        debug_assert!(tail.get() < self.len(), "tail out of bounds");
        debug_assert!(head.get() < self.len(), "head out of bounds");
        self.succ[tail.get()] = head;
        self.pred[head.get()] = tail;
    }

    #[inline]
    pub(crate) fn flip(&mut self, node: NodeIndex) {
        std::mem::swap(&mut self.succ[node.get()], &mut self.pred[node.get()]);
    }

    #[inline]
    pub(crate) fn set_links(&mut self, node: NodeIndex, succ: NodeIndex, pred: NodeIndex) {
        self.succ[node.get()] = succ;
        self.pred[node.get()] = pred;
    }

    #[inline]
    pub(crate) fn set_position(&mut self, node: NodeIndex, position: i64) {
        self.pos[node.get()] = position;
    }

    #[inline]
    pub(crate) fn mark_stale_positions(&mut self) {
        self.fresh_positions = false;
    }

    #[inline]
    pub(crate) fn push_record(&mut self, record: SwapRecord) {
        self.swap_stack.push(record);
    }

    #[inline]
    pub(crate) fn pop_record(&mut self) -> Option<SwapRecord> {
        self.swap_stack.pop()
    }
}
