//! Adjacent critical swaps (N1).
//!
//! Every pair of consecutive operations inside a critical block. A superset
//! of the Nowicki–Smutnicki moves; larger, but connected.
//!
//! # Reference
//! van Laarhoven, Aarts & Lenstra (1992), "Job Shop Scheduling by Simulated
//! Annealing", Operations Research 40(1)

use super::{critical_blocks, Neighborhood, Swap};
use crate::encoding::ResourceOrder;
use crate::models::Operation;

/// All adjacent swaps inside critical blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalAdjacent;

impl Neighborhood for CriticalAdjacent {
    fn name(&self) -> &'static str {
        "Critical-Adjacent"
    }

    fn swaps_on_path(&self, order: &ResourceOrder, critical_path: &[Operation]) -> Vec<Swap> {
        critical_blocks(order, critical_path)
            .into_iter()
            .flat_map(|block| {
                (block.first_position..block.last_position())
                    .map(move |p| Swap::new(block.machine, p, p + 1))
            })
            .collect()
    }
}
