//! Taboo search over a critical-path neighborhood.
//!
//! # Algorithm
//!
//! Each iteration:
//! 1. Purge expired taboo entries.
//! 2. Generate the neighborhood of the current order and drop taboo moves.
//! 3. Move to the best remaining neighbor, even if it is worse, and make
//!    its operation pair taboo for `tenure` iterations.
//! 4. Keep the best order seen so far.
//!
//! An iteration with no admissible move leaves the current order as is;
//! the taboo list shrinks as entries expire, so later iterations can move
//! again. The search stops at the iteration cap, the deadline, or when the
//! cancellation flag is raised.
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//! Shop Problem"

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::evaluate::{evaluate_swaps, select_best};
use super::taboo_list::{TabooKey, TabooList};
use super::{
    into_schedule, report_decode_fault, seed_order, AppliedMove, SearchResult, SolveError,
    Solver, StopReason,
};
use crate::encoding::ResourceOrder;
use crate::graph::{DecodeError, DisjunctiveGraph};
use crate::models::{Instance, Schedule};
use crate::neighborhood::{Neighborhood, NowickiSmutnicki};

/// Default taboo tenure, in iterations.
pub const DEFAULT_TENURE: usize = 20;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 5000;

/// Taboo search.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::{Duration, Instant};
/// use u_jobshop::models::Instance;
/// use u_jobshop::solver::{BasicSolver, Solver, TabooSolver};
///
/// let inst = Arc::new(Instance::from_jobs(vec![
///     vec![(0, 3), (1, 2)],
///     vec![(1, 2), (0, 4)],
/// ]).unwrap());
/// let solver = TabooSolver::new(BasicSolver).with_max_iterations(50);
/// let deadline = Instant::now() + Duration::from_secs(1);
/// assert_eq!(solver.solve(&inst, deadline).unwrap().makespan(), 7);
/// ```
#[derive(Debug)]
pub struct TabooSolver {
    seed: Box<dyn Solver>,
    neighborhood: Box<dyn Neighborhood>,
    tenure: usize,
    max_iterations: usize,
    parallel: bool,
    cancel: Option<Arc<AtomicBool>>,
}

/// Move chosen in one iteration.
struct Accepted {
    applied: AppliedMove,
    key: TabooKey,
    order: ResourceOrder,
}

impl TabooSolver {
    /// Creates a taboo search starting from `seed`'s schedule, using the
    /// Nowicki-Smutnicki neighborhood and default tenure and iteration cap.
    pub fn new<S: Solver + 'static>(seed: S) -> Self {
        Self {
            seed: Box::new(seed),
            neighborhood: Box::new(NowickiSmutnicki),
            tenure: DEFAULT_TENURE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            parallel: false,
            cancel: None,
        }
    }

    /// Sets the neighborhood.
    pub fn with_neighborhood(mut self, neighborhood: Box<dyn Neighborhood>) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Sets how many iterations an exchanged pair stays taboo.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Evaluates neighbors on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stops the search once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Taboo tenure.
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Runs the search and reports the full trajectory.
    ///
    /// The returned order and schedule are the best seen, not the last
    /// visited.
    pub fn search(
        &self,
        instance: &Arc<Instance>,
        deadline: Instant,
    ) -> Result<SearchResult, SolveError> {
        let (mut current, seed_makespan) = seed_order(&*self.seed, instance, deadline)?;
        let mut best = current.clone();
        let mut best_makespan = seed_makespan;
        let mut taboo = TabooList::new(self.tenure);
        let mut moves = Vec::new();
        let mut iteration = 0;
        log::debug!(
            "{}: seed {} makespan {}, neighborhood {}, tenure {}",
            self.name(),
            self.seed.name(),
            seed_makespan,
            self.neighborhood.name(),
            self.tenure
        );

        let stop_reason = loop {
            if iteration >= self.max_iterations {
                break StopReason::IterationLimit;
            }
            if Instant::now() >= deadline {
                break StopReason::Deadline;
            }
            if self.cancelled() {
                break StopReason::Cancelled;
            }
            iteration += 1;
            taboo.purge(iteration);

            match self.step(&current, &taboo, iteration) {
                Ok(Some(accepted)) => {
                    let makespan = accepted.applied.makespan;
                    taboo.insert(accepted.key, iteration);
                    current = accepted.order;
                    moves.push(accepted.applied);
                    if makespan < best_makespan {
                        log::debug!(
                            "{}: iteration {} new best {}",
                            self.name(),
                            iteration,
                            makespan
                        );
                        best = current.clone();
                        best_makespan = makespan;
                    }
                }
                Ok(None) => {
                    log::trace!("{}: iteration {} no admissible move", self.name(), iteration);
                }
                Err(err) => {
                    report_decode_fault(self.name(), &err);
                    break StopReason::DecodeFault;
                }
            }
        };

        log::debug!(
            "{}: {:?} after {} iteration(s), best {} (seed {})",
            self.name(),
            stop_reason,
            iteration,
            best_makespan,
            seed_makespan
        );
        Ok(SearchResult {
            schedule: best.to_schedule()?,
            order: best,
            makespan: best_makespan,
            seed_makespan,
            iterations: iteration,
            moves,
            stop_reason,
        })
    }

    fn step(
        &self,
        current: &ResourceOrder,
        taboo: &TabooList,
        iteration: usize,
    ) -> Result<Option<Accepted>, DecodeError> {
        let graph = DisjunctiveGraph::new(current);
        let starts = graph.longest_paths()?;
        let (swaps, keys): (Vec<_>, Vec<_>) = self
            .neighborhood
            .swaps_on_path(current, &graph.critical_path(&starts))
            .into_iter()
            .map(|swap| (swap, TabooKey::of(&swap, current)))
            .filter(|(_, key)| !taboo.contains(key))
            .unzip();

        let makespans = evaluate_swaps(&graph, current, &swaps, self.parallel)?;
        let Some((index, makespan)) = select_best(&makespans) else {
            return Ok(None);
        };

        let swap = swaps[index];
        Ok(Some(Accepted {
            applied: AppliedMove {
                iteration,
                swap,
                operations: swap.operations(current),
                makespan,
            },
            key: keys[index],
            order: swap.apply(current),
        }))
    }
}

impl Solver for TabooSolver {
    fn name(&self) -> &'static str {
        "taboo"
    }

    fn solve(&self, instance: &Arc<Instance>, deadline: Instant) -> Option<Schedule> {
        into_schedule(self.name(), self.search(instance, deadline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::Priority;
    use crate::models::Operation;
    use crate::neighborhood::CriticalAdjacent;
    use crate::solver::testing::*;
    use crate::solver::{BasicSolver, GreedySolver};

    #[test]
    fn test_two_by_two_walk() {
        let inst = two_by_two();
        let result = TabooSolver::new(serial_seed(&inst))
            .with_tenure(1)
            .with_max_iterations(3)
            .search(&inst, far_deadline())
            .unwrap();
        // 11 -> 7 (m1), 7 -> 11 (m0), then the m0 pair is still taboo
        assert_eq!(result.history(), vec![11, 7, 11]);
        assert_eq!(result.moves[1].swap.machine, 0);
        assert_eq!(result.makespan, 7);
        assert_eq!(result.iterations, 3);
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert!(result.schedule.is_valid());
        assert_eq!(result.schedule.makespan(), 7);
    }

    #[test]
    fn test_pairs_not_repeated_within_tenure() {
        let inst = ft06();
        let tenure = 8;
        let result = TabooSolver::new(GreedySolver::new(Priority::Spt))
            .with_neighborhood(Box::new(CriticalAdjacent))
            .with_tenure(tenure)
            .with_max_iterations(300)
            .search(&inst, far_deadline())
            .unwrap();
        let key = |m: &AppliedMove| TabooKey::new(m.swap.machine, m.operations.0, m.operations.1);
        for (i, later) in result.moves.iter().enumerate() {
            for earlier in &result.moves[..i] {
                if key(earlier) == key(later) {
                    assert!(
                        later.iteration - earlier.iteration > tenure,
                        "{:?} repeated at iterations {} and {}",
                        key(later),
                        earlier.iteration,
                        later.iteration
                    );
                }
            }
        }
    }

    #[test]
    fn test_never_worse_than_seed() {
        let inst = ft06();
        for priority in Priority::ALL {
            let result = TabooSolver::new(GreedySolver::new(priority))
                .with_max_iterations(200)
                .search(&inst, far_deadline())
                .unwrap();
            assert!(result.makespan <= result.seed_makespan);
            assert_eq!(result.makespan, *result.history().iter().min().unwrap());
            assert_eq!(result.schedule.makespan(), result.makespan);
            assert!(result.schedule.is_valid());
            assert!(result.makespan >= inst.lower_bound());
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let inst = ft06();
        let run = |parallel| {
            TabooSolver::new(BasicSolver)
                .with_max_iterations(100)
                .with_parallel(parallel)
                .search(&inst, far_deadline())
                .unwrap()
        };
        let (a, b) = (run(false), run(true));
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.order, b.order);
    }

    #[test]
    fn test_iteration_cap() {
        let inst = ft06();
        let result = TabooSolver::new(BasicSolver)
            .with_max_iterations(25)
            .search(&inst, far_deadline())
            .unwrap();
        assert_eq!(result.iterations, 25);
        assert!(result.moves.len() <= 25);
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
    }

    #[test]
    fn test_infeasible_seed_yields_none() {
        let inst = two_by_two();
        let cyclic = Schedule::new(Arc::clone(&inst), vec![5, 0, 5, 0]);
        let solver = TabooSolver::new(FixedSeed(Some(cyclic))).with_max_iterations(10);
        assert!(solver.solve(&inst, far_deadline()).is_none());
    }

    #[test]
    fn test_cancel_flag() {
        let inst = two_by_two();
        let flag = Arc::new(AtomicBool::new(true));
        let result = TabooSolver::new(serial_seed(&inst))
            .with_cancel_flag(Arc::clone(&flag))
            .search(&inst, far_deadline())
            .unwrap();
        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.makespan, 11);
    }

    #[test]
    fn test_expired_deadline() {
        let inst = two_by_two();
        let result = TabooSolver::new(serial_seed(&inst))
            .search(&inst, Instant::now())
            .unwrap();
        assert_eq!(result.stop_reason, StopReason::Deadline);
        assert_eq!(result.makespan, 11);
    }

    #[test]
    fn test_single_job_idles() {
        let inst = Arc::new(Instance::from_jobs(vec![vec![(0, 2), (1, 3)]]).unwrap());
        let result = TabooSolver::new(BasicSolver)
            .with_max_iterations(5)
            .search(&inst, far_deadline())
            .unwrap();
        assert!(result.moves.is_empty());
        assert_eq!(result.iterations, 5);
        assert_eq!(result.makespan, 5);
        assert_eq!(result.schedule.start_time(Operation::new(0, 1)), 2);
    }

    #[test]
    fn test_defaults() {
        let solver = TabooSolver::new(BasicSolver);
        assert_eq!(solver.tenure(), 20);
        assert_eq!(solver.max_iterations(), 5000);
        assert_eq!(solver.name(), "taboo");
    }
}
