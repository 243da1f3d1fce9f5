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
    state::tour::{base::Tour, err::StackUnderflowError, record::SwapRecord},
};
use std::mem;
use tsp_kopt_model::prelude::NodeIndex;

/// Which arc a feasible 2-opt swap reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArcChoice {
    /// Decide by position arithmetic, preferring the shorter arc. The
    /// t3..t1 arc wins a tie so that forward and undo resolve to the same
    /// physical nodes. Requires fresh positions.
    Shorter,
    /// Reverse the t3..t1 arc exactly as given. Used inside one ring of a
    /// split tour, where positions cannot be consulted.
    Forward,
    /// Reverse the complement of the t3..t1 arc. Undoing a recorded
    /// feasible swap always re-reverses the complement of its recorded
    /// arc, so replay never has to read positions at all.
    Backward,
}

pub(super) fn pairwise_distinct(nodes: &[NodeIndex]) -> bool {
    for i in 0..nodes.len() {
        for j in i + 1..nodes.len() {
            if nodes[i] == nodes[j] {
                return false;
            }
        }
    }
    true
}

impl<T: CostNumeric> Tour<T> {
    /// 2-opt swap keeping the tour one cycle: breaks `(t1,t2)` and
    /// `(t3,t4)`, joins `(t2,t3)` and `(t1,t4)`, reversing one arc in
    /// place.
    ///
    /// Operands are caller-validated; see the checked layer in `moves`.
    /// `(t1,t2)` must be a tour edge and `t4` must neighbor `t3` on the
    /// side opposite to the traversal direction of `(t1,t2)`. With
    /// `is_subtour` the swap runs inside one ring of a split tour and
    /// leaves positions untouched; otherwise positions stay fresh and the
    /// shorter of the two candidate arcs is the one reversed.
    pub fn swap_feasible(
        &mut self,
        t1: NodeIndex,
        t2: NodeIndex,
        t3: NodeIndex,
        t4: NodeIndex,
        is_subtour: bool,
        record: bool,
    ) {
        debug_assert!(
            is_subtour || self.has_fresh_positions(),
            "positions are stale"
        );
        let arc = if is_subtour {
            ArcChoice::Forward
        } else {
            ArcChoice::Shorter
        };
        self.swap_feasible_inner(t1, t2, t3, t4, is_subtour, record, arc);
    }

    fn swap_feasible_inner(
        &mut self,
        mut t1: NodeIndex,
        mut t2: NodeIndex,
        mut t3: NodeIndex,
        mut t4: NodeIndex,
        is_subtour: bool,
        record: bool,
        arc: ArcChoice,
    ) {
        debug_assert!(
            pairwise_distinct(&[t1, t2, t3, t4]),
            "swap nodes must be pairwise distinct"
        );

        // The reversal walk always runs over t3..t1, so t2 must follow t1.
        if self.successor(t1) != t2 {
            mem::swap(&mut t1, &mut t2);
            mem::swap(&mut t3, &mut t4);
        }

        let reverse_complement = match arc {
            ArcChoice::Forward => false,
            ArcChoice::Backward => true,
            ArcChoice::Shorter => {
                let len = self.len() as i64;
                let mut seg = self.position(t2) - self.position(t3);
                if seg < 0 {
                    seg += len;
                }
                2 * seg >= len
            }
        };
        if reverse_complement {
            mem::swap(&mut t3, &mut t2);
            mem::swap(&mut t4, &mut t1);
        }

        // Reverse t3..t1 along the old successor chain. Positions are
        // re-assigned descending from pos(t1), which keeps them strictly
        // increasing along the new successor order; they may leave the
        // 0..len window, only relative order is ever consulted.
        let mut position = self.position(t1);
        let stop = self.successor(t1);
        let mut node = t3;
        #[cfg(debug_assertions)]
        let mut walked = 0usize;
        while node != stop {
            let next = self.successor(node);
            self.flip(node);
            if !is_subtour {
                self.set_position(node, position);
                position -= 1;
            }
            node = next;
            #[cfg(debug_assertions)]
            {
                walked += 1;
                debug_assert!(walked <= self.len(), "reversal walk left the ring");
            }
        }

        self.link(t3, t2);
        self.link(t4, t1);

        if record {
            self.push_record(SwapRecord::Feasible {
                t1,
                t2,
                t3,
                t4,
                subtour: is_subtour,
            });
        }
    }

    /// 2-opt swap splitting the cycle into two rings: breaks `(t1,t2)`
    /// and `(t3,t4)`, joins `(t2,t3)` and `(t1,t4)` with no reversal.
    ///
    /// Operands are caller-validated: both pairs must be tour edges
    /// traversed in the same direction and non-adjacent, so the rejoin
    /// yields two disjoint rings of at least 3 nodes each. Positions go
    /// stale until `set_pos` runs on a repaired tour. `reverse_subtour`
    /// additionally flips the ring that ends up holding `t4..t1`; it is
    /// an undo pathway and never recorded.
    pub fn swap_unfeasible(
        &mut self,
        mut t1: NodeIndex,
        mut t2: NodeIndex,
        mut t3: NodeIndex,
        mut t4: NodeIndex,
        reverse_subtour: bool,
        record: bool,
    ) {
        debug_assert!(
            pairwise_distinct(&[t1, t2, t3, t4]),
            "swap nodes must be pairwise distinct"
        );
        debug_assert!(
            !(reverse_subtour && record),
            "subtour reversal is an undo step and is never recorded"
        );

        // The relink below assumes t2 precedes t1; rotate the operands
        // when the caller handed the successor direction.
        if self.successor(t1) == t2 {
            mem::swap(&mut t1, &mut t4);
            mem::swap(&mut t2, &mut t3);
        }

        self.link(t2, t3);
        self.link(t4, t1);

        if reverse_subtour {
            // Flip the ring holding t4..t1, walking the old predecessor
            // chain from t4 until it arrives at t1.
            let mut node = t4;
            #[cfg(debug_assertions)]
            let mut walked = 0usize;
            while self.predecessor(node) != t4 {
                let prev = self.predecessor(node);
                self.flip(node);
                node = prev;
                #[cfg(debug_assertions)]
                {
                    walked += 1;
                    debug_assert!(walked <= self.len(), "reversal walk left the ring");
                }
            }
            debug_assert!(node == t1, "subtour reversal must end at t1");
            let old_succ = self.successor(t1);
            self.set_links(t1, t4, old_succ);
        }

        self.mark_stale_positions();

        if record {
            self.push_record(SwapRecord::Unfeasible { t1, t2, t3, t4 });
        }
    }

    /// Repair swap merging the two rings of a split tour back into one
    /// cycle.
    ///
    /// `(t1,t4)` is the broken bracket on the outer ring, `(t5,t6)` an
    /// edge of the inner ring. Whether the inner segment is spliced in
    /// reversed is decided by XOR-ing the local directions of the two
    /// edges; the applied direction lands in the swap record so undo can
    /// replay it exactly. Positions stay stale.
    pub fn swap_node_between(
        &mut self,
        t1: NodeIndex,
        t4: NodeIndex,
        t5: NodeIndex,
        t6: NodeIndex,
        record: bool,
    ) {
        debug_assert!(
            pairwise_distinct(&[t1, t4, t5, t6]),
            "swap nodes must be pairwise distinct"
        );

        let t4_after_t1 = self.successor(t1) == t4;
        let t6_after_t5 = self.successor(t5) == t6;
        let reversed = t4_after_t1 != t6_after_t5;

        if reversed {
            // Flip the inner segment, walking the old predecessor chain.
            let (mut from, to) = if t6_after_t5 { (t5, t6) } else { (t6, t5) };
            #[cfg(debug_assertions)]
            let mut walked = 0usize;
            while from != to {
                let prev = self.predecessor(from);
                self.flip(from);
                from = prev;
                #[cfg(debug_assertions)]
                {
                    walked += 1;
                    debug_assert!(walked <= self.len(), "reversal walk left the ring");
                }
            }
            self.flip(to);
        }

        if t4_after_t1 {
            self.link(t1, t6);
            self.link(t5, t4);
        } else {
            self.link(t6, t1);
            self.link(t4, t5);
        }

        self.mark_stale_positions();

        if record {
            self.push_record(SwapRecord::NodeBetween {
                t1,
                t4,
                t5,
                t6,
                reversed,
            });
        }
    }

    /// 4-opt double bridge: two composed unfeasible splits that re-join
    /// into one cycle with zero segment reversal.
    ///
    /// Operands are caller-validated, normally by `double_bridge_move`.
    /// The first split runs as given; the second pair of edges is then
    /// re-oriented against the ring that now holds `t4..t1` before the
    /// second split rejoins everything. Ends with `set_pos`, so positions
    /// come out fresh.
    #[allow(clippy::too_many_arguments)]
    pub fn swap_double_bridge(
        &mut self,
        t1: NodeIndex,
        t2: NodeIndex,
        t3: NodeIndex,
        t4: NodeIndex,
        mut t5: NodeIndex,
        mut t6: NodeIndex,
        mut t7: NodeIndex,
        mut t8: NodeIndex,
        record: bool,
    ) {
        self.swap_unfeasible(t1, t2, t3, t4, false, false);

        // t5 must lie on the ring holding t4..t1; otherwise the two pairs
        // trade roles.
        let (from, to) = if self.predecessor(t1) == t2 {
            (t1, t4)
        } else {
            (t4, t1)
        };
        if !self.between_by_links(from, t5, to) {
            mem::swap(&mut t5, &mut t8);
            mem::swap(&mut t6, &mut t7);
        }

        // The first split rewrites t1's links, so operands whose four
        // pairs were tour edges never satisfy this; it guards direct
        // callers handing a stale orientation.
        if (self.successor(t1) == t2 && self.predecessor(t5) == t6)
            || (self.predecessor(t1) == t2 && self.successor(t5) == t6)
        {
            mem::swap(&mut t5, &mut t6);
            mem::swap(&mut t7, &mut t8);
        }

        self.swap_unfeasible(t5, t6, t7, t8, false, false);
        self.set_pos();

        tracing::trace!(
            "Tour: double bridge across tails ({}, {}, {}, {})",
            t1,
            t3,
            t5,
            t7
        );

        if record {
            self.push_record(SwapRecord::DoubleBridge {
                nodes: [t1, t2, t3, t4, t5, t6, t7, t8],
            });
        }
    }

    /// Pops and undoes the newest `swaps` records, LIFO.
    ///
    /// The depth check runs before anything is undone, so an underflow
    /// leaves the tour untouched. After the undo loop positions are
    /// refreshed once unless every undone record maintained them itself.
    pub fn restore(&mut self, swaps: usize) -> Result<(), StackUnderflowError> {
        let depth = self.swap_stack().len();
        if swaps > depth {
            return Err(StackUnderflowError::new(swaps, depth));
        }
        self.undo_newest(swaps);
        Ok(())
    }

    /// Undoes the whole swap stack.
    pub fn restore_all(&mut self) {
        self.undo_newest(self.swap_stack().len());
    }

    fn undo_newest(&mut self, swaps: usize) {
        let mut refresh = false;
        for _ in 0..swaps {
            let record = match self.pop_record() {
                Some(record) => record,
                None => break,
            };
            if !record.preserves_positions() {
                refresh = true;
            }
            self.undo_record(record);
        }
        if refresh {
            self.set_pos();
        }
        if swaps > 0 {
            tracing::debug!(
                "Tour: undid {} swaps, {} remain on the stack",
                swaps,
                self.swap_stack().len()
            );
        }
    }

    /// Replays the inverse of one record. Replay never reads positions:
    /// feasible records re-reverse the complement of their recorded arc
    /// structurally, everything else is plain relinking.
    fn undo_record(&mut self, record: SwapRecord) {
        match record {
            SwapRecord::Feasible {
                t1,
                t2,
                t3,
                t4,
                subtour,
            } => {
                self.swap_feasible_inner(t4, t1, t2, t3, subtour, false, ArcChoice::Backward);
            }
            SwapRecord::Unfeasible { t1, t2, t3, t4 } => {
                self.swap_unfeasible(t4, t1, t2, t3, false, false);
            }
            SwapRecord::NodeBetween {
                t1,
                t4,
                t5,
                t6,
                reversed,
            } => {
                self.swap_unfeasible(t6, t1, t4, t5, reversed, false);
            }
            SwapRecord::DoubleBridge {
                nodes: [t1, t2, t3, t4, t5, t6, t7, t8],
            } => {
                self.swap_unfeasible(t8, t5, t6, t7, false, false);
                self.swap_unfeasible(t4, t1, t2, t3, false, false);
            }
        }
    }
}
