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

/// One applied swap, as pushed onto the tour's undo stack.
///
/// Operands are stored after orientation normalization, so undoing a
/// record never has to re-derive the direction the swap actually ran in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapRecord {
    /// 2-opt swap that kept the tour a single cycle. `subtour` marks the
    /// variant applied inside one ring of a split tour, which leaves
    /// positions untouched.
    Feasible {
        t1: NodeIndex,
        t2: NodeIndex,
        t3: NodeIndex,
        t4: NodeIndex,
        subtour: bool,
    },
    /// 2-opt swap that split the cycle into two rings.
    Unfeasible {
        t1: NodeIndex,
        t2: NodeIndex,
        t3: NodeIndex,
        t4: NodeIndex,
    },
    /// Repair swap that merged two rings back into one cycle. `reversed`
    /// records whether the spliced segment was flipped on the way in.
    NodeBetween {
        t1: NodeIndex,
        t4: NodeIndex,
        t5: NodeIndex,
        t6: NodeIndex,
        reversed: bool,
    },
    /// 4-opt double bridge, stored as the two split quadruples in
    /// application order.
    DoubleBridge { nodes: [NodeIndex; 8] },
}

impl SwapRecord {
    /// True when undoing this record keeps positions in sync by itself.
    ///
    /// Only the plain feasible swap rewrites positions while it reverses;
    /// every other kind leaves them stale and `restore` must refresh once
    /// after the undo loop.
    #[inline]
    pub fn preserves_positions(&self) -> bool {
        matches!(
            self,
            SwapRecord::Feasible { subtour: false, .. }
        )
    }
}

impl std::fmt::Display for SwapRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapRecord::Feasible {
                t1,
                t2,
                t3,
                t4,
                subtour: false,
            } => write!(
                f,
                "Feasible({}, {}, {}, {})",
                t1.get(),
                t2.get(),
                t3.get(),
                t4.get()
            ),
            SwapRecord::Feasible {
                t1,
                t2,
                t3,
                t4,
                subtour: true,
            } => write!(
                f,
                "FeasibleSubtour({}, {}, {}, {})",
                t1.get(),
                t2.get(),
                t3.get(),
                t4.get()
            ),
            SwapRecord::Unfeasible { t1, t2, t3, t4 } => write!(
                f,
                "Unfeasible({}, {}, {}, {})",
                t1.get(),
                t2.get(),
                t3.get(),
                t4.get()
            ),
            SwapRecord::NodeBetween {
                t1,
                t4,
                t5,
                t6,
                reversed,
            } => write!(
                f,
                "NodeBetween({}, {}, {}, {}, reversed: {})",
                t1.get(),
                t4.get(),
                t5.get(),
                t6.get(),
                reversed
            ),
            SwapRecord::DoubleBridge { nodes } => {
                write!(f, "DoubleBridge(")?;
                for (i, node) in nodes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", node.get())?;
                }
                write!(f, ")")
            }
        }
    }
}
