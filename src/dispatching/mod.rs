//! Dispatching rules and rule engine for seed construction.
//!
//! Provides priority-based dispatching rules (SPT, LPT, SRPT, LRPT, EST)
//! and a sequential rule engine used by
//! [`GreedySolver`](crate::solver::GreedySolver) to pick the next operation
//! among the ready ones.
//!
//! # Usage
//!
//! ```
//! use u_jobshop::dispatching::Priority;
//!
//! let priority: Priority = "est_lrpt".parse().unwrap();
//! assert_eq!(priority.engine().rule_names(), vec!["EST", "LRPT"]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::DispatchContext;
pub use engine::RuleEngine;

use std::fmt::Debug;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Instance, Operation};

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that evaluates operation priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for operations that should be dispatched first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "EST").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a ready operation in the current state.
    fn evaluate(&self, op: Operation, instance: &Instance, context: &DispatchContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Closed set of priority strategies for greedy seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Shortest processing time.
    Spt,
    /// Longest processing time.
    Lpt,
    /// Shortest remaining processing time.
    Srpt,
    /// Longest remaining processing time.
    Lrpt,
    /// Earliest start time, then SPT.
    EstSpt,
    /// Earliest start time, then LRPT.
    EstLrpt,
    /// Earliest start time, then LPT.
    EstLpt,
    /// Earliest start time, then SRPT.
    EstSrpt,
}

/// Unrecognized priority name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority '{0}'")]
pub struct UnknownPriority(pub String);

impl Priority {
    /// Every priority, in declaration order.
    pub const ALL: [Priority; 8] = [
        Priority::Spt,
        Priority::Lpt,
        Priority::Srpt,
        Priority::Lrpt,
        Priority::EstSpt,
        Priority::EstLrpt,
        Priority::EstLpt,
        Priority::EstSrpt,
    ];

    /// Short name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Priority::Spt => "spt",
            Priority::Lpt => "lpt",
            Priority::Srpt => "srpt",
            Priority::Lrpt => "lrpt",
            Priority::EstSpt => "est_spt",
            Priority::EstLrpt => "est_lrpt",
            Priority::EstLpt => "est_lpt",
            Priority::EstSrpt => "est_srpt",
        }
    }

    /// Rule engine implementing this priority.
    pub fn engine(self) -> RuleEngine {
        match self {
            Priority::Spt => RuleEngine::new().with_rule(rules::Spt),
            Priority::Lpt => RuleEngine::new().with_rule(rules::Lpt),
            Priority::Srpt => RuleEngine::new().with_rule(rules::Srpt),
            Priority::Lrpt => RuleEngine::new().with_rule(rules::Lrpt),
            Priority::EstSpt => RuleEngine::new()
                .with_rule(rules::Est)
                .with_tie_breaker(rules::Spt),
            Priority::EstLrpt => RuleEngine::new()
                .with_rule(rules::Est)
                .with_tie_breaker(rules::Lrpt),
            Priority::EstLpt => RuleEngine::new()
                .with_rule(rules::Est)
                .with_tie_breaker(rules::Lpt),
            Priority::EstSrpt => RuleEngine::new()
                .with_rule(rules::Est)
                .with_tie_breaker(rules::Srpt),
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPriority(s.to_string()))
    }
}
