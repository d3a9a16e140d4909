//! Decomposition of a critical path into machine blocks.

use serde::{Deserialize, Serialize};

use crate::encoding::ResourceOrder;
use crate::models::Operation;

/// Maximal run of critical operations processed back to back on one machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Shared machine.
    pub machine: usize,
    /// Position of the first operation in the machine's sequence.
    pub first_position: usize,
    /// Operations of the block, in processing order.
    pub operations: Vec<Operation>,
}

impl Block {
    /// Number of operations in the block.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the block holds no operation.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Position of the last operation in the machine's sequence.
    pub fn last_position(&self) -> usize {
        self.first_position + self.len().saturating_sub(1)
    }

    fn extends_with(&self, machine: usize, position: usize) -> bool {
        self.machine == machine && position == self.first_position + self.len()
    }
}

/// Splits a critical path into blocks of length at least 2.
///
/// Consecutive path operations join the same block when they share a
/// machine and sit at adjacent positions of that machine's sequence.
/// Length-1 runs are dropped since they offer no swap.
pub fn critical_blocks(order: &ResourceOrder, critical_path: &[Operation]) -> Vec<Block> {
    let instance = order.instance();
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for &op in critical_path {
        let Some(position) = order.position(op) else {
            continue;
        };
        let machine = instance.machine(op);

        match current.as_mut() {
            Some(block) if block.extends_with(machine, position) => block.operations.push(op),
            _ => {
                if let Some(done) = current.take() {
                    if done.len() >= 2 {
                        blocks.push(done);
                    }
                }
                current = Some(Block {
                    machine,
                    first_position: position,
                    operations: vec![op],
                });
            }
        }
    }

    if let Some(done) = current {
        if done.len() >= 2 {
            blocks.push(done);
        }
    }
    blocks
}
