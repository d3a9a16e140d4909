//! Disjunctive graph: decoding and critical paths.
//!
//! Nodes are operations (dense ids). Two kinds of arcs connect them:
//! - **job arcs** from each step to the next step of the same job (implicit
//!   in the id layout),
//! - **machine arcs** between consecutive operations of a machine's
//!   sequence, taken from a [`ResourceOrder`].
//!
//! Every arc is weighted with the duration of its source node. The earliest
//! start of an operation is its longest-path distance from the source, and
//! the makespan is the longest path overall.
//!
//! # References
//! - Roy & Sussmann (1964), "Les problèmes d'ordonnancement avec contraintes
//!   disjonctives"
//! - Kahn (1962), "Topological sorting of large networks"

mod critical_path;
mod disjunctive;

use std::sync::Arc;

pub use disjunctive::DisjunctiveGraph;

use crate::encoding::ResourceOrder;
use crate::models::Schedule;

/// Errors raised while decoding a resource order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The machine sequences contradict each other or job precedence.
    #[error("resource order is cyclic: {unordered} operation(s) could not be ordered")]
    Cycle {
        /// Number of operations left on (or behind) a cycle.
        unordered: usize,
    },
}

/// Decodes a resource order into its semi-active schedule.
///
/// Pure and deterministic: identical orders decode to identical schedules.
pub fn decode(order: &ResourceOrder) -> Result<Schedule, DecodeError> {
    let starts = DisjunctiveGraph::new(order).longest_paths()?;
    Ok(Schedule::new(Arc::clone(order.instance()), starts))
}
