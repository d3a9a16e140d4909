//! Neighborhood structures over resource orders.
//!
//! A neighborhood turns the critical path of the current solution into a
//! list of candidate moves. Both local-search solvers consume neighborhoods
//! only through the [`Neighborhood`] trait, so implementations can be
//! swapped through configuration.
//!
//! # Structures
//!
//! - [`NowickiSmutnicki`]: first and last pair of every critical block
//! - [`CriticalAdjacent`]: every adjacent pair inside critical blocks
//!
//! # References
//! - Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//!   Shop Problem"
//! - van Laarhoven, Aarts & Lenstra (1992), "Job Shop Scheduling by
//!   Simulated Annealing"

mod adjacent;
mod block;
mod nowicki;
mod swap;

pub use adjacent::CriticalAdjacent;
pub use block::{critical_blocks, Block};
pub use nowicki::NowickiSmutnicki;
pub use swap::Swap;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::encoding::ResourceOrder;
use crate::graph::{DecodeError, DisjunctiveGraph};
use crate::models::Operation;

/// A candidate move together with the order it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    /// The generating move.
    pub swap: Swap,
    /// The current order with `swap` applied.
    pub order: ResourceOrder,
}

/// Generates candidate moves from a resource order.
///
/// Implementors only provide [`swaps_on_path`](Neighborhood::swaps_on_path);
/// decoding and critical-path extraction are shared.
pub trait Neighborhood: Send + Sync + Debug {
    /// Neighborhood name (e.g., "Nowicki-Smutnicki").
    fn name(&self) -> &'static str;

    /// Candidate moves for `order`, given one of its critical paths.
    ///
    /// Moves are returned in a deterministic order without duplicates.
    fn swaps_on_path(&self, order: &ResourceOrder, critical_path: &[Operation]) -> Vec<Swap>;

    /// Candidate moves for `order`.
    fn swaps(&self, order: &ResourceOrder) -> Result<Vec<Swap>, DecodeError> {
        let graph = DisjunctiveGraph::new(order);
        let starts = graph.longest_paths()?;
        Ok(self.swaps_on_path(order, &graph.critical_path(&starts)))
    }

    /// Candidate moves with their resulting orders, index for index.
    fn neighbors(&self, order: &ResourceOrder) -> Result<Vec<Neighbor>, DecodeError> {
        Ok(self
            .swaps(order)?
            .into_iter()
            .map(|swap| Neighbor {
                order: swap.apply(order),
                swap,
            })
            .collect())
    }
}

/// Selectable neighborhood structures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborhoodKind {
    /// Boundary swaps of critical blocks.
    #[default]
    NowickiSmutnicki,
    /// All adjacent swaps inside critical blocks.
    CriticalAdjacent,
}

impl NeighborhoodKind {
    /// Instantiates the selected neighborhood.
    pub fn build(self) -> Box<dyn Neighborhood> {
        match self {
            NeighborhoodKind::NowickiSmutnicki => Box::new(NowickiSmutnicki),
            NeighborhoodKind::CriticalAdjacent => Box::new(CriticalAdjacent),
        }
    }
}
