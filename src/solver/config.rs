//! Serializable solver configuration.
//!
//! One value picks the strategy, the seed, the neighborhood, and the search
//! parameters, and builds the matching [`Solver`]. Every field has a
//! default, so partial JSON documents are accepted.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::taboo::{DEFAULT_MAX_ITERATIONS, DEFAULT_TENURE};
use super::{BasicSolver, DescentSolver, GreedySolver, Solver, TabooSolver};
use crate::dispatching::Priority;
use crate::models::{Instance, Schedule};
use crate::neighborhood::NeighborhoodKind;

/// Deadline horizon used when no time limit is configured.
const UNLIMITED: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Solver family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Round-robin seed only.
    Basic,
    /// Greedy seed only.
    Greedy,
    /// Seed, then steepest descent.
    Descent,
    /// Seed, then taboo search.
    #[default]
    Taboo,
}

/// Seed provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Dispatching priority; `None` selects the round-robin seed.
    pub priority: Option<Priority>,
    /// Probability of a random pick during greedy dispatch.
    pub random_choice: f64,
    /// Random seed for greedy dispatch.
    pub rng_seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            priority: Some(Priority::EstLrpt),
            random_choice: 0.0,
            rng_seed: 0,
        }
    }
}

impl SeedConfig {
    /// Builds the seed provider.
    pub fn build(&self) -> Box<dyn Solver> {
        match self.priority {
            None => Box::new(BasicSolver),
            Some(priority) => Box::new(
                GreedySolver::new(priority)
                    .with_random_choice(self.random_choice)
                    .with_seed(self.rng_seed),
            ),
        }
    }
}

/// Complete solver configuration.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use u_jobshop::models::Instance;
/// use u_jobshop::solver::{SolverConfig, Strategy};
///
/// let config: SolverConfig =
///     serde_json::from_str(r#"{ "strategy": "descent", "time_limit_ms": 1000 }"#).unwrap();
/// assert_eq!(config.strategy, Strategy::Descent);
/// assert_eq!(config.tenure, 20);
///
/// let inst = Arc::new(Instance::from_jobs(vec![
///     vec![(0, 3), (1, 2)],
///     vec![(1, 2), (0, 4)],
/// ]).unwrap());
/// assert_eq!(config.solve(&inst).unwrap().makespan(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Solver family.
    pub strategy: Strategy,
    /// Seed provider.
    pub seed: SeedConfig,
    /// Neighborhood of the local searches.
    pub neighborhood: NeighborhoodKind,
    /// Taboo tenure, in iterations.
    pub tenure: usize,
    /// Taboo iteration cap.
    pub max_iterations: usize,
    /// Wall-clock budget; `None` means unlimited.
    pub time_limit_ms: Option<u64>,
    /// Evaluate neighbors on the rayon pool.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            seed: SeedConfig::default(),
            neighborhood: NeighborhoodKind::default(),
            tenure: DEFAULT_TENURE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            time_limit_ms: None,
            parallel: false,
        }
    }
}

impl SolverConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the seed provider.
    pub fn with_seed(mut self, seed: SeedConfig) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the neighborhood.
    pub fn with_neighborhood(mut self, neighborhood: NeighborhoodKind) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    /// Sets the taboo tenure.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    /// Sets the taboo iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the time limit.
    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = Some(time_limit_ms);
        self
    }

    /// Enables parallel neighbor evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the configured solver.
    pub fn build(&self) -> Box<dyn Solver> {
        match self.strategy {
            Strategy::Basic => Box::new(BasicSolver),
            Strategy::Greedy => self.seed.build(),
            Strategy::Descent => Box::new(
                DescentSolver::new(self.seed.build())
                    .with_neighborhood(self.neighborhood.build())
                    .with_parallel(self.parallel),
            ),
            Strategy::Taboo => Box::new(
                TabooSolver::new(self.seed.build())
                    .with_neighborhood(self.neighborhood.build())
                    .with_tenure(self.tenure)
                    .with_max_iterations(self.max_iterations)
                    .with_parallel(self.parallel),
            ),
        }
    }

    /// Deadline for a run starting now.
    pub fn deadline(&self) -> Instant {
        let budget = self.time_limit_ms.map_or(UNLIMITED, Duration::from_millis);
        Instant::now() + budget
    }

    /// Builds the solver and runs it within the time limit.
    pub fn solve(&self, instance: &Arc<Instance>) -> Option<Schedule> {
        let solver = self.build();
        log::info!(
            "solving {}x{} instance with {}",
            instance.num_jobs(),
            instance.num_tasks(),
            solver.name()
        );
        solver.solve(instance, self.deadline())
    }
}
