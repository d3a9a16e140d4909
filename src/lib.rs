//! Local-search engine for the job-shop scheduling problem.
//!
//! Minimizes the makespan of a job-shop instance: every job visits the
//! machines in a fixed order, every machine runs one operation at a time.
//! Solutions are kept as per-machine processing orders, decoded through the
//! disjunctive graph, and improved by swapping operations on the critical
//! path.
//!
//! # Modules
//!
//! - **`models`**: Problem and solution types: `Instance`, `Operation`, `Schedule`
//! - **`encoding`**: `ResourceOrder`, the per-machine sequence representation
//! - **`graph`**: Disjunctive graph, decoding, critical paths
//! - **`neighborhood`**: Critical blocks and swap neighborhoods
//! - **`dispatching`**: Priority rules for greedy seeds
//! - **`solver`**: Seed heuristics, steepest descent, taboo search, configuration
//! - **`validation`**: Instance, order, and schedule integrity checks
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::{Duration, Instant};
//! use u_jobshop::dispatching::Priority;
//! use u_jobshop::models::Instance;
//! use u_jobshop::solver::{GreedySolver, Solver, TabooSolver};
//!
//! let instance = Arc::new(Instance::from_jobs(vec![
//!     vec![(0, 3), (1, 2)],
//!     vec![(1, 2), (0, 4)],
//! ]).unwrap());
//! let solver = TabooSolver::new(GreedySolver::new(Priority::Spt))
//!     .with_tenure(5)
//!     .with_max_iterations(100);
//! let schedule = solver
//!     .solve(&instance, Instant::now() + Duration::from_secs(1))
//!     .unwrap();
//! assert_eq!(schedule.makespan(), 7);
//! assert!(schedule.is_valid());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//!   Shop Problem"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod dispatching;
pub mod encoding;
pub mod graph;
pub mod models;
pub mod neighborhood;
pub mod solver;
pub mod validation;
