//! Steepest descent over a critical-path neighborhood.
//!
//! # Algorithm
//!
//! 1. Decode the seed into a resource order.
//! 2. Evaluate every neighbor of the current order.
//! 3. Move to the best one if it is strictly better; otherwise stop.
//!
//! The deadline is checked before each iteration.

use std::sync::Arc;
use std::time::Instant;

use super::evaluate::{evaluate_swaps, select_best};
use super::{
    into_schedule, report_decode_fault, seed_order, AppliedMove, SearchResult, SolveError,
    Solver, StopReason,
};
use crate::encoding::ResourceOrder;
use crate::graph::{DecodeError, DisjunctiveGraph};
use crate::models::{Instance, Schedule};
use crate::neighborhood::{Neighborhood, NowickiSmutnicki};

/// Outcome of one descent iteration.
enum Step {
    Improved(AppliedMove, ResourceOrder),
    Stop(StopReason),
}

/// Steepest-descent local search.
#[derive(Debug)]
pub struct DescentSolver {
    seed: Box<dyn Solver>,
    neighborhood: Box<dyn Neighborhood>,
    parallel: bool,
}

impl DescentSolver {
    /// Creates a descent starting from `seed`'s schedule, using the
    /// Nowicki-Smutnicki neighborhood.
    pub fn new<S: Solver + 'static>(seed: S) -> Self {
        Self {
            seed: Box::new(seed),
            neighborhood: Box::new(NowickiSmutnicki),
            parallel: false,
        }
    }

    /// Sets the neighborhood.
    pub fn with_neighborhood(mut self, neighborhood: Box<dyn Neighborhood>) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Evaluates neighbors on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Runs the descent and reports the full trajectory.
    pub fn search(
        &self,
        instance: &Arc<Instance>,
        deadline: Instant,
    ) -> Result<SearchResult, SolveError> {
        let (mut current, seed_makespan) = seed_order(&*self.seed, instance, deadline)?;
        let mut makespan = seed_makespan;
        let mut moves = Vec::new();
        let mut iterations = 0;
        log::debug!(
            "{}: seed {} makespan {}, neighborhood {}",
            self.name(),
            self.seed.name(),
            seed_makespan,
            self.neighborhood.name()
        );

        let stop_reason = loop {
            if Instant::now() >= deadline {
                break StopReason::Deadline;
            }
            iterations += 1;
            match self.step(&current, makespan, iterations) {
                Ok(Step::Improved(applied, next)) => {
                    log::trace!(
                        "{}: iteration {} makespan {} -> {}",
                        self.name(),
                        iterations,
                        makespan,
                        applied.makespan
                    );
                    makespan = applied.makespan;
                    current = next;
                    moves.push(applied);
                }
                Ok(Step::Stop(reason)) => break reason,
                Err(err) => {
                    report_decode_fault(self.name(), &err);
                    break StopReason::DecodeFault;
                }
            }
        };

        log::debug!(
            "{}: {:?} after {} iteration(s), makespan {}",
            self.name(),
            stop_reason,
            iterations,
            makespan
        );
        Ok(SearchResult {
            schedule: current.to_schedule()?,
            order: current,
            makespan,
            seed_makespan,
            iterations,
            moves,
            stop_reason,
        })
    }

    fn step(
        &self,
        current: &ResourceOrder,
        makespan: i64,
        iteration: usize,
    ) -> Result<Step, DecodeError> {
        let graph = DisjunctiveGraph::new(current);
        let starts = graph.longest_paths()?;
        let swaps = self
            .neighborhood
            .swaps_on_path(current, &graph.critical_path(&starts));
        if swaps.is_empty() {
            return Ok(Step::Stop(StopReason::EmptyNeighborhood));
        }

        let makespans = evaluate_swaps(&graph, current, &swaps, self.parallel)?;
        let Some((best, best_makespan)) = select_best(&makespans) else {
            return Ok(Step::Stop(StopReason::EmptyNeighborhood));
        };
        if best_makespan >= makespan {
            return Ok(Step::Stop(StopReason::LocalOptimum));
        }

        let swap = swaps[best];
        Ok(Step::Improved(
            AppliedMove {
                iteration,
                swap,
                operations: swap.operations(current),
                makespan: best_makespan,
            },
            swap.apply(current),
        ))
    }
}

impl Solver for DescentSolver {
    fn name(&self) -> &'static str {
        "descent"
    }

    fn solve(&self, instance: &Arc<Instance>, deadline: Instant) -> Option<Schedule> {
        into_schedule(self.name(), self.search(instance, deadline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;
    use crate::neighborhood::{CriticalAdjacent, Swap};
    use crate::solver::testing::*;
    use crate::solver::BasicSolver;

    #[test]
    fn test_two_by_two_reaches_optimum() {
        let inst = two_by_two();
        let result = DescentSolver::new(serial_seed(&inst))
            .search(&inst, far_deadline())
            .unwrap();
        assert_eq!(result.seed_makespan, 11);
        assert_eq!(result.makespan, 7);
        assert_eq!(result.history(), vec![11, 7]);
        assert_eq!(result.moves[0].swap, Swap::new(1, 0, 1));
        assert_eq!(
            result.moves[0].operations,
            (Operation::new(0, 1), Operation::new(1, 0))
        );
        assert_eq!(result.stop_reason, StopReason::LocalOptimum);
        assert_eq!(result.iterations, 2);
        assert!(result.schedule.is_valid());
    }

    #[test]
    fn test_history_strictly_decreasing() {
        let inst = ft06();
        for parallel in [false, true] {
            let result = DescentSolver::new(BasicSolver)
                .with_neighborhood(Box::new(CriticalAdjacent))
                .with_parallel(parallel)
                .search(&inst, far_deadline())
                .unwrap();
            let history = result.history();
            assert!(history.windows(2).all(|w| w[1] < w[0]));
            assert_eq!(*history.last().unwrap(), result.makespan);
            assert_eq!(result.schedule.makespan(), result.makespan);
            assert!(result.schedule.is_valid());
            assert!(result.makespan >= inst.lower_bound());
        }
    }

    #[test]
    fn test_parallel_is_deterministic() {
        let inst = ft06();
        let sequential = DescentSolver::new(BasicSolver)
            .search(&inst, far_deadline())
            .unwrap();
        let parallel = DescentSolver::new(BasicSolver)
            .with_parallel(true)
            .search(&inst, far_deadline())
            .unwrap();
        assert_eq!(sequential.moves, parallel.moves);
        assert_eq!(sequential.order, parallel.order);
    }

    #[test]
    fn test_expired_deadline_returns_seed() {
        let inst = two_by_two();
        let result = DescentSolver::new(serial_seed(&inst))
            .search(&inst, Instant::now())
            .unwrap();
        assert_eq!(result.stop_reason, StopReason::Deadline);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.makespan, 11);
    }

    #[test]
    fn test_single_job_has_empty_neighborhood() {
        let inst = Arc::new(Instance::from_jobs(vec![vec![(0, 2), (1, 3), (2, 1)]]).unwrap());
        let result = DescentSolver::new(BasicSolver)
            .search(&inst, far_deadline())
            .unwrap();
        assert_eq!(result.stop_reason, StopReason::EmptyNeighborhood);
        assert_eq!(result.makespan, 6);
    }

    #[test]
    fn test_missing_seed() {
        let inst = two_by_two();
        let solver = DescentSolver::new(FixedSeed(None));
        assert_eq!(
            solver.search(&inst, far_deadline()).unwrap_err(),
            SolveError::EmptySeed
        );
        assert!(solver.solve(&inst, far_deadline()).is_none());
    }

    #[test]
    fn test_infeasible_seed_yields_none() {
        let inst = two_by_two();
        let cyclic = Schedule::new(Arc::clone(&inst), vec![5, 0, 5, 0]);
        let solver = DescentSolver::new(FixedSeed(Some(cyclic)));
        assert!(matches!(
            solver.search(&inst, far_deadline()),
            Err(SolveError::InvalidSeed(_))
        ));
        assert!(solver.solve(&inst, far_deadline()).is_none());
    }

    #[test]
    fn test_zero_length_operation() {
        // job 0: m0 2, m1 0 / job 1: m1 3, m0 1
        let inst = Arc::new(Instance::from_jobs(vec![vec![(0, 2), (1, 0)], vec![(1, 3), (0, 1)]]).unwrap());
        let seed = ResourceOrder::from_machine_orders(
            Arc::clone(&inst),
            vec![
                vec![Operation::new(0, 0), Operation::new(1, 1)],
                vec![Operation::new(0, 1), Operation::new(1, 0)],
            ],
        )
        .unwrap();
        let result = DescentSolver::new(FixedSeed(Some(seed.to_schedule().unwrap())))
            .search(&inst, far_deadline())
            .unwrap();
        assert_eq!(result.history(), vec![6, 4]);
        assert_eq!(result.moves[0].swap, Swap::new(1, 0, 1));
        assert_eq!(result.stop_reason, StopReason::EmptyNeighborhood);
        assert_eq!(result.makespan, inst.lower_bound());
        assert_eq!(result.schedule.start_time(Operation::new(0, 1)), 3);
        assert!(result.schedule.is_valid());
    }

    /// Always proposes exchanging the two operations of machine 0.
    #[derive(Debug)]
    struct FirstMachineSwap;

    impl Neighborhood for FirstMachineSwap {
        fn name(&self) -> &'static str {
            "first-machine"
        }

        fn swaps_on_path(&self, _order: &ResourceOrder, _path: &[Operation]) -> Vec<Swap> {
            vec![Swap::new(0, 0, 1)]
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cyclic")]
    fn test_cyclic_neighbor_panics_in_debug() {
        let inst = two_by_two();
        // from the serial order this swap closes a cycle
        let _ = DescentSolver::new(serial_seed(&inst))
            .with_neighborhood(Box::new(FirstMachineSwap))
            .search(&inst, far_deadline());
    }
}
