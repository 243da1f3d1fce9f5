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

//! Checked construction of swap operands.
//!
//! The raw swap primitives trust their callers. The constructors here
//! validate operands against the current links and hand back a move
//! witness that the matching `apply_*` method executes with recording
//! enabled. A witness snapshots link state at construction; apply it
//! before any other mutation of the tour.

use crate::{
    core::numeric::CostNumeric,
    state::tour::{
        base::Tour,
        err::{
            DegenerateSplitError, DetachedEdgeError, InvalidSwapError, NodesNotDistinctError,
            SwapOrientationError,
        },
        swap::pairwise_distinct,
    },
};
use tsp_kopt_model::prelude::NodeIndex;

/// Validated operands for a feasible 2-opt swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeasibleMove {
    t1: NodeIndex,
    t2: NodeIndex,
    t3: NodeIndex,
    t4: NodeIndex,
}

impl FeasibleMove {
    #[inline]
    pub fn t1(&self) -> NodeIndex {
        self.t1
    }

    #[inline]
    pub fn t2(&self) -> NodeIndex {
        self.t2
    }

    #[inline]
    pub fn t3(&self) -> NodeIndex {
        self.t3
    }

    #[inline]
    pub fn t4(&self) -> NodeIndex {
        self.t4
    }
}

impl std::fmt::Display for FeasibleMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FeasibleMove({}, {}, {}, {})",
            self.t1, self.t2, self.t3, self.t4
        )
    }
}

/// Validated operands for an unfeasible 2-opt swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnfeasibleMove {
    t1: NodeIndex,
    t2: NodeIndex,
    t3: NodeIndex,
    t4: NodeIndex,
}

impl UnfeasibleMove {
    #[inline]
    pub fn t1(&self) -> NodeIndex {
        self.t1
    }

    #[inline]
    pub fn t2(&self) -> NodeIndex {
        self.t2
    }

    #[inline]
    pub fn t3(&self) -> NodeIndex {
        self.t3
    }

    #[inline]
    pub fn t4(&self) -> NodeIndex {
        self.t4
    }
}

impl std::fmt::Display for UnfeasibleMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "UnfeasibleMove({}, {}, {}, {})",
            self.t1, self.t2, self.t3, self.t4
        )
    }
}

/// Validated operands for a double bridge, already normalized to
/// successor direction and ordered by tour position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoubleBridgeMove {
    nodes: [NodeIndex; 8],
}

impl DoubleBridgeMove {
    #[inline]
    pub fn nodes(&self) -> [NodeIndex; 8] {
        self.nodes
    }
}

impl std::fmt::Display for DoubleBridgeMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [t1, t2, t3, t4, t5, t6, t7, t8] = self.nodes;
        write!(
            f,
            "DoubleBridgeMove({}, {}, {}, {}, {}, {}, {}, {})",
            t1, t2, t3, t4, t5, t6, t7, t8
        )
    }
}

impl<T: CostNumeric> Tour<T> {
    /// Validates operands for a feasible swap: four distinct nodes,
    /// `(t1,t2)` a tour edge, and `t4` the neighbor of `t3` on the side
    /// opposite to the traversal direction of `(t1,t2)`. Joining any
    /// other neighbor would cut the cycle into two loops.
    ///
    /// Works on a ring of a split tour as well, since only links are
    /// consulted.
    pub fn feasible_move(
        &self,
        t1: NodeIndex,
        t2: NodeIndex,
        t3: NodeIndex,
        t4: NodeIndex,
    ) -> Result<FeasibleMove, InvalidSwapError> {
        if !pairwise_distinct(&[t1, t2, t3, t4]) {
            return Err(NodesNotDistinctError::new().into());
        }
        let forward = if self.successor(t1) == t2 {
            true
        } else if self.predecessor(t1) == t2 {
            false
        } else {
            return Err(DetachedEdgeError::new(t1, t2).into());
        };
        let required = if forward {
            self.predecessor(t3)
        } else {
            self.successor(t3)
        };
        if t4 != required {
            let opposite = if forward {
                self.successor(t3)
            } else {
                self.predecessor(t3)
            };
            if t4 == opposite {
                return Err(SwapOrientationError::new(t3, t4).into());
            }
            return Err(DetachedEdgeError::new(t3, t4).into());
        }
        Ok(FeasibleMove { t1, t2, t3, t4 })
    }

    /// Validates operands for an unfeasible swap: four distinct nodes,
    /// both pairs tour edges traversed in the same direction, and neither
    /// broken edge adjacent to the other. Adjacency would strand a ring
    /// of fewer than 3 nodes.
    pub fn unfeasible_move(
        &self,
        t1: NodeIndex,
        t2: NodeIndex,
        t3: NodeIndex,
        t4: NodeIndex,
    ) -> Result<UnfeasibleMove, InvalidSwapError> {
        if !pairwise_distinct(&[t1, t2, t3, t4]) {
            return Err(NodesNotDistinctError::new().into());
        }
        let forward = if self.successor(t1) == t2 {
            true
        } else if self.predecessor(t1) == t2 {
            false
        } else {
            return Err(DetachedEdgeError::new(t1, t2).into());
        };
        let required = if forward {
            self.successor(t3)
        } else {
            self.predecessor(t3)
        };
        if t4 != required {
            let opposite = if forward {
                self.predecessor(t3)
            } else {
                self.successor(t3)
            };
            if t4 == opposite {
                return Err(SwapOrientationError::new(t3, t4).into());
            }
            return Err(DetachedEdgeError::new(t3, t4).into());
        }
        if self.predecessor(t2) == t3 || self.successor(t2) == t3 {
            return Err(DegenerateSplitError::new(t2, t3).into());
        }
        if self.predecessor(t1) == t4 || self.successor(t1) == t4 {
            return Err(DegenerateSplitError::new(t1, t4).into());
        }
        Ok(UnfeasibleMove { t1, t2, t3, t4 })
    }

    /// Validates operands for a double bridge: four tour edges, handed
    /// in any direction and any order, sharing no node across pairs.
    /// Disjoint pairs put consecutive cuts at least two nodes apart.
    ///
    /// The witness carries the pairs normalized to successor direction
    /// and reordered by position into the sequence the composite swap
    /// expects, so this requires fresh positions.
    #[allow(clippy::too_many_arguments)]
    pub fn double_bridge_move(
        &self,
        t1: NodeIndex,
        t2: NodeIndex,
        t3: NodeIndex,
        t4: NodeIndex,
        t5: NodeIndex,
        t6: NodeIndex,
        t7: NodeIndex,
        t8: NodeIndex,
    ) -> Result<DoubleBridgeMove, InvalidSwapError> {
        debug_assert!(self.has_fresh_positions(), "positions are stale");

        // The two nodes of one pair are an edge and need no mutual
        // check; across pairs every node must be distinct.
        let pairs = [[t1, t2], [t3, t4], [t5, t6], [t7, t8]];
        for i in 0..pairs.len() {
            for j in i + 1..pairs.len() {
                for a in pairs[i] {
                    for b in pairs[j] {
                        if a == b {
                            return Err(NodesNotDistinctError::new().into());
                        }
                    }
                }
            }
        }

        let mut tails = [(t1, t2), (t3, t4), (t5, t6), (t7, t8)];
        for pair in &mut tails {
            if self.successor(pair.0) == pair.1 {
                continue;
            }
            if self.predecessor(pair.0) == pair.1 {
                *pair = (pair.1, pair.0);
            } else {
                return Err(DetachedEdgeError::new(pair.0, pair.1).into());
            }
        }

        let mut order = [tails[0].0, tails[1].0, tails[2].0, tails[3].0];
        order.sort_unstable_by_key(|node| self.position(*node));
        let [n0, n1, n2, n3] = order;

        // First split cuts at n0 and n2, second at n1 and n3; the
        // alternation is what re-joins everything into one cycle.
        Ok(DoubleBridgeMove {
            nodes: [
                n0,
                self.successor(n0),
                n2,
                self.successor(n2),
                n1,
                self.successor(n1),
                n3,
                self.successor(n3),
            ],
        })
    }

    /// True when `feasible_move` would accept the operands.
    #[inline]
    pub fn is_swap_feasible(
        &self,
        t1: NodeIndex,
        t2: NodeIndex,
        t3: NodeIndex,
        t4: NodeIndex,
    ) -> bool {
        self.feasible_move(t1, t2, t3, t4).is_ok()
    }

    /// True when `unfeasible_move` would accept the operands.
    #[inline]
    pub fn is_swap_unfeasible(
        &self,
        t1: NodeIndex,
        t2: NodeIndex,
        t3: NodeIndex,
        t4: NodeIndex,
    ) -> bool {
        self.unfeasible_move(t1, t2, t3, t4).is_ok()
    }

    /// Executes a validated feasible swap on the full cycle, recorded.
    #[inline]
    pub fn apply_feasible(&mut self, mv: FeasibleMove) {
        self.swap_feasible(mv.t1, mv.t2, mv.t3, mv.t4, false, true);
    }

    /// Executes a validated unfeasible swap, recorded.
    #[inline]
    pub fn apply_unfeasible(&mut self, mv: UnfeasibleMove) {
        self.swap_unfeasible(mv.t1, mv.t2, mv.t3, mv.t4, false, true);
    }

    /// Executes a validated double bridge, recorded.
    #[inline]
    pub fn apply_double_bridge(&mut self, mv: DoubleBridgeMove) {
        let [t1, t2, t3, t4, t5, t6, t7, t8] = mv.nodes;
        self.swap_double_bridge(t1, t2, t3, t4, t5, t6, t7, t8, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tour::{base::TourKind, record::SwapRecord};
    use tsp_kopt_model::prelude::Node;

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn cycle(n: usize) -> Tour<f64> {
        let nodes = (0..n).map(|i| Node::two_d(i as f64, 0.0)).collect();
        Tour::new(nodes, TourKind::Cycle).expect("enough nodes")
    }

    #[test]
    fn test_feasible_move_accepts_both_directions() {
        let tour = cycle(8);
        assert!(tour.feasible_move(ni(0), ni(1), ni(5), ni(4)).is_ok());
        assert!(tour.feasible_move(ni(1), ni(0), ni(4), ni(5)).is_ok());
        assert!(tour.is_swap_feasible(ni(0), ni(1), ni(5), ni(4)));
    }

    #[test]
    fn test_feasible_move_rejects_duplicates() {
        let tour = cycle(8);
        assert_eq!(
            tour.feasible_move(ni(0), ni(1), ni(0), ni(7)),
            Err(NodesNotDistinctError::new().into())
        );
    }

    #[test]
    fn test_feasible_move_rejects_detached_edges() {
        let tour = cycle(8);
        assert_eq!(
            tour.feasible_move(ni(0), ni(2), ni(5), ni(4)),
            Err(DetachedEdgeError::new(ni(0), ni(2)).into())
        );
        assert_eq!(
            tour.feasible_move(ni(0), ni(1), ni(5), ni(3)),
            Err(DetachedEdgeError::new(ni(5), ni(3)).into())
        );
    }

    #[test]
    fn test_feasible_move_rejects_wrong_side() {
        let tour = cycle(8);
        // (4,5) runs with the cycle while (0,1) does; joining would cut
        // the tour into two loops
        assert_eq!(
            tour.feasible_move(ni(0), ni(1), ni(4), ni(5)),
            Err(SwapOrientationError::new(ni(4), ni(5)).into())
        );
        assert!(!tour.is_swap_feasible(ni(0), ni(1), ni(4), ni(5)));
    }

    #[test]
    fn test_feasible_move_works_on_split_ring() {
        let mut tour = cycle(12);
        tour.swap_unfeasible(ni(0), ni(1), ni(6), ni(7), false, true);
        // both edges on the inner ring 1..=6
        assert!(tour.is_swap_feasible(ni(1), ni(2), ni(5), ni(4)));
        // edges on different rings never validate
        assert!(!tour.is_swap_feasible(ni(1), ni(2), ni(8), ni(7)));
    }

    #[test]
    fn test_unfeasible_move_accepts_same_direction_pairs() {
        let tour = cycle(12);
        assert!(tour.unfeasible_move(ni(0), ni(1), ni(6), ni(7)).is_ok());
        assert!(tour.unfeasible_move(ni(1), ni(0), ni(7), ni(6)).is_ok());
        assert!(tour.is_swap_unfeasible(ni(0), ni(1), ni(6), ni(7)));
    }

    #[test]
    fn test_unfeasible_move_rejects_opposite_directions() {
        let tour = cycle(12);
        assert_eq!(
            tour.unfeasible_move(ni(0), ni(1), ni(7), ni(6)),
            Err(SwapOrientationError::new(ni(7), ni(6)).into())
        );
    }

    #[test]
    fn test_unfeasible_move_rejects_degenerate_splits() {
        let tour = cycle(12);
        // t3 neighbors t2, the inner ring would hold 2 nodes
        assert_eq!(
            tour.unfeasible_move(ni(0), ni(1), ni(2), ni(3)),
            Err(DegenerateSplitError::new(ni(1), ni(2)).into())
        );
        // t4 neighbors t1, the outer ring would hold 2 nodes
        assert_eq!(
            tour.unfeasible_move(ni(0), ni(1), ni(10), ni(11)),
            Err(DegenerateSplitError::new(ni(0), ni(11)).into())
        );
        assert!(!tour.is_swap_unfeasible(ni(0), ni(1), ni(2), ni(3)));
    }

    #[test]
    fn test_double_bridge_move_normalizes_scrambled_input() {
        let tour = cycle(12);
        let mv = tour
            .double_bridge_move(
                ni(4),
                ni(3),
                ni(0),
                ni(1),
                ni(10),
                ni(9),
                ni(6),
                ni(7),
            )
            .expect("four disjoint edges");
        assert_eq!(
            mv.nodes(),
            [
                ni(0),
                ni(1),
                ni(6),
                ni(7),
                ni(3),
                ni(4),
                ni(9),
                ni(10)
            ]
        );
    }

    #[test]
    fn test_double_bridge_move_rejects_bad_operands() {
        let tour = cycle(12);
        // node 1 appears in two pairs
        assert_eq!(
            tour.double_bridge_move(
                ni(0),
                ni(1),
                ni(1),
                ni(2),
                ni(5),
                ni(6),
                ni(8),
                ni(9)
            ),
            Err(NodesNotDistinctError::new().into())
        );
        // (0,2) is not an edge
        assert_eq!(
            tour.double_bridge_move(
                ni(0),
                ni(2),
                ni(4),
                ni(5),
                ni(7),
                ni(8),
                ni(10),
                ni(11)
            ),
            Err(DetachedEdgeError::new(ni(0), ni(2)).into())
        );
    }

    #[test]
    fn test_apply_feasible_records_and_rewires() {
        let mut tour = cycle(8);
        let mv = tour
            .feasible_move(ni(0), ni(1), ni(5), ni(4))
            .expect("valid move");
        tour.apply_feasible(mv);

        assert_eq!(tour.successor(ni(0)), ni(4));
        assert_eq!(tour.successor(ni(1)), ni(5));
        assert_eq!(tour.swap_stack().len(), 1);
        assert!(tour.is_feasible());
    }

    #[test]
    fn test_apply_unfeasible_then_repair_restores() {
        let mut tour = cycle(12);
        let reference = tour.clone();

        let mv = tour
            .unfeasible_move(ni(0), ni(1), ni(6), ni(7))
            .expect("valid move");
        tour.apply_unfeasible(mv);
        assert!(!tour.is_feasible());

        tour.swap_node_between(ni(0), ni(7), ni(3), ni(4), true);
        assert!(tour.is_feasible());

        tour.restore(2).expect("two records on the stack");
        assert_eq!(tour, reference);
    }

    #[test]
    fn test_probe_and_apply_double_bridge_round_trip() {
        let mut tour = cycle(12);
        let reference = tour.clone();

        let mv = tour
            .double_bridge_move(
                ni(0),
                ni(1),
                ni(6),
                ni(7),
                ni(3),
                ni(4),
                ni(9),
                ni(10),
            )
            .expect("four disjoint edges");
        tour.apply_double_bridge(mv);

        assert!(tour.is_feasible());
        let expected = [0usize, 7, 8, 9, 4, 5, 6, 1, 2, 3, 10, 11];
        let mut node = ni(0);
        for want in expected {
            assert_eq!(node, ni(want));
            node = tour.successor(node);
        }
        // pair roles were traded inside the composite before recording
        assert_eq!(
            tour.swap_stack(),
            &[SwapRecord::DoubleBridge {
                nodes: [
                    ni(0),
                    ni(1),
                    ni(6),
                    ni(7),
                    ni(10),
                    ni(9),
                    ni(4),
                    ni(3)
                ],
            }]
        );

        tour.restore(1).expect("one record on the stack");
        assert_eq!(tour, reference);
    }

    #[test]
    fn test_double_bridge_move_spacing() {
        let mut tour = cycle(12);
        let reference = tour.clone();

        // adjacent cuts share a bracket node across pairs
        let err = tour
            .double_bridge_move(
                ni(0),
                ni(1),
                ni(1),
                ni(2),
                ni(2),
                ni(3),
                ni(5),
                ni(6),
            )
            .unwrap_err();
        assert_eq!(err, NodesNotDistinctError::new().into());

        // two-node segments are the tightest legal spacing
        let mv = tour
            .double_bridge_move(
                ni(11),
                ni(0),
                ni(1),
                ni(2),
                ni(3),
                ni(4),
                ni(6),
                ni(7),
            )
            .expect("four disjoint edges");
        tour.apply_double_bridge(mv);
        assert!(tour.is_feasible());

        tour.restore(1).expect("one record on the stack");
        assert_eq!(tour, reference);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "positions are stale")]
    fn test_double_bridge_move_panics_on_stale_positions() {
        let mut tour = cycle(12);
        tour.mark_stale_positions();
        let _ = tour.double_bridge_move(
            ni(0),
            ni(1),
            ni(3),
            ni(4),
            ni(6),
            ni(7),
            ni(9),
            ni(10),
        );
    }
}
