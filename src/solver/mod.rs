//! Solvers: seed heuristics and local search.
//!
//! Every solver implements [`Solver`]: given an instance and a deadline it
//! returns a schedule, or `None` when nothing could be produced.
//!
//! # Seed Heuristics
//!
//! - [`BasicSolver`]: round-robin by step, always feasible
//! - [`GreedySolver`]: list scheduling driven by a dispatching [`Priority`](crate::dispatching::Priority)
//!
//! # Local Search
//!
//! - [`DescentSolver`]: steepest descent until no improving move exists
//! - [`TabooSolver`]: best admissible move each iteration, with a taboo list
//!   of recently exchanged operation pairs
//!
//! Both local searches decode the current order once per iteration, extract
//! a critical path, ask their [`Neighborhood`](crate::neighborhood::Neighborhood)
//! for moves, and evaluate each move by re-linking a single machine of the
//! disjunctive graph. Evaluation can run on the rayon pool; ties are always
//! resolved by the lowest move index.
//!
//! # References
//!
//! - Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//!   Shop Problem"
//! - Glover (1989), "Tabu Search: Part I"

mod basic;
mod config;
mod descent;
mod evaluate;
mod greedy;
mod taboo;
mod taboo_list;

pub use basic::BasicSolver;
pub use config::{SeedConfig, SolverConfig, Strategy};
pub use descent::DescentSolver;
pub use greedy::GreedySolver;
pub use taboo::TabooSolver;
pub use taboo_list::{TabooKey, TabooList};

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::encoding::ResourceOrder;
use crate::graph::DecodeError;
use crate::models::{Instance, Operation, Schedule};
use crate::neighborhood::Swap;

/// Common interface of all solvers.
pub trait Solver: Send + Sync + Debug {
    /// Solver name (e.g., "taboo").
    fn name(&self) -> &'static str;

    /// Looks for a schedule until done or until `deadline`.
    ///
    /// Returns `None` only when no schedule could be produced at all.
    fn solve(&self, instance: &Arc<Instance>, deadline: Instant) -> Option<Schedule>;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, instance: &Arc<Instance>, deadline: Instant) -> Option<Schedule> {
        (**self).solve(instance, deadline)
    }
}

/// Errors that keep a local search from producing a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    /// The seed provider returned no schedule.
    #[error("seed solver produced no schedule")]
    EmptySeed,
    /// The seed schedule's machine sequences contradict job precedence.
    #[error("seed schedule is infeasible: {0}")]
    InvalidSeed(DecodeError),
    /// The search's best order could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Why a local search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// No move improves the current solution.
    LocalOptimum,
    /// The critical path has no block, so no move exists.
    EmptyNeighborhood,
    /// The iteration budget is spent.
    IterationLimit,
    /// The deadline passed.
    Deadline,
    /// The cancellation flag was raised.
    Cancelled,
    /// A generated neighbor failed to decode; the search kept its best
    /// solution and stopped.
    DecodeFault,
}

/// A move accepted by a local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    /// Iteration (1-based) in which the move was applied.
    pub iteration: usize,
    /// The move, in positions of the order it was applied to.
    pub swap: Swap,
    /// Operations exchanged by the move.
    pub operations: (Operation, Operation),
    /// Makespan after the move.
    pub makespan: i64,
}

/// Outcome of a local search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best order found.
    pub order: ResourceOrder,
    /// Best order, decoded.
    pub schedule: Schedule,
    /// Makespan of the best schedule.
    pub makespan: i64,
    /// Makespan of the seed.
    pub seed_makespan: i64,
    /// Number of iterations started.
    pub iterations: usize,
    /// Accepted moves, in order.
    pub moves: Vec<AppliedMove>,
    /// Why the search stopped.
    pub stop_reason: StopReason,
}

impl SearchResult {
    /// Makespans of the current solution: the seed, then after each move.
    pub fn history(&self) -> Vec<i64> {
        std::iter::once(self.seed_makespan)
            .chain(self.moves.iter().map(|m| m.makespan))
            .collect()
    }
}

/// Runs the seed provider and decodes its schedule into an order.
fn seed_order(
    seed: &dyn Solver,
    instance: &Arc<Instance>,
    deadline: Instant,
) -> Result<(ResourceOrder, i64), SolveError> {
    let schedule = seed.solve(instance, deadline).ok_or(SolveError::EmptySeed)?;
    let order = ResourceOrder::from_schedule(&schedule);
    let makespan = order.makespan().map_err(SolveError::InvalidSeed)?;
    Ok((order, makespan))
}

/// Maps a search outcome onto the optional-schedule contract.
fn into_schedule(solver: &str, result: Result<SearchResult, SolveError>) -> Option<Schedule> {
    match result {
        Ok(result) => Some(result.schedule),
        Err(SolveError::EmptySeed) => {
            log::warn!("{solver}: seed solver produced no schedule");
            None
        }
        Err(err @ SolveError::InvalidSeed(_)) => {
            log::warn!("{solver}: {err}");
            None
        }
        Err(SolveError::Decode(err)) => {
            report_decode_fault(solver, &err);
            None
        }
    }
}

/// A decode failure inside a search is a defect in move generation.
fn report_decode_fault(solver: &str, err: &DecodeError) {
    log::error!("{solver}: {err}");
    if cfg!(debug_assertions) {
        panic!("{solver}: {err}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Seed provider returning a fixed schedule.
    #[derive(Debug, Clone)]
    pub struct FixedSeed(pub Option<Schedule>);

    impl Solver for FixedSeed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn solve(&self, _instance: &Arc<Instance>, _deadline: Instant) -> Option<Schedule> {
            self.0.clone()
        }
    }

    pub fn two_by_two() -> Arc<Instance> {
        Arc::new(Instance::from_jobs(vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]]).unwrap())
    }

    /// Job 0 first on both machines: makespan 11.
    pub fn serial_seed(instance: &Arc<Instance>) -> FixedSeed {
        let order = ResourceOrder::from_machine_orders(
            Arc::clone(instance),
            vec![
                vec![Operation::new(0, 0), Operation::new(1, 1)],
                vec![Operation::new(0, 1), Operation::new(1, 0)],
            ],
        )
        .unwrap();
        FixedSeed(Some(order.to_schedule().unwrap()))
    }

    pub const FT06: &str = "\
6 6
2 1 0 3 1 6 3 7 5 3 4 6
1 8 2 5 4 10 5 10 0 10 3 4
2 5 3 4 5 8 0 9 1 1 4 7
1 5 0 5 2 5 3 3 4 8 5 9
2 9 1 3 4 5 5 4 0 3 3 1
1 3 3 3 5 9 0 10 4 4 2 1
";

    pub fn ft06() -> Arc<Instance> {
        Arc::new(FT06.parse().unwrap())
    }

    pub fn far_deadline() -> Instant {
        Instant::now() + std::time::Duration::from_secs(60)
    }
}
