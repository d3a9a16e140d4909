//! Swap move on one machine's sequence.

use serde::{Deserialize, Serialize};

use crate::encoding::ResourceOrder;
use crate::models::Operation;

/// Exchange of two positions in one machine's processing sequence.
///
/// Positions are normalized so that `first < second`. A swap is its own
/// inverse: applying it twice restores the original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swap {
    /// Machine whose sequence is edited.
    pub machine: usize,
    /// Lower position.
    pub first: usize,
    /// Higher position.
    pub second: usize,
}

impl Swap {
    /// Creates a swap of positions `a` and `b` on `machine`.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn new(machine: usize, a: usize, b: usize) -> Self {
        assert_ne!(a, b, "called `Swap::new()` with identical positions");
        Self {
            machine,
            first: a.min(b),
            second: a.max(b),
        }
    }

    /// Applies the swap, returning a new order.
    pub fn apply(&self, order: &ResourceOrder) -> ResourceOrder {
        order.with_swapped(self.machine, self.first, self.second)
    }

    /// Operations currently at the two positions of `order`.
    pub fn operations(&self, order: &ResourceOrder) -> (Operation, Operation) {
        let seq = order.machine_order(self.machine);
        (seq[self.first], seq[self.second])
    }
}
