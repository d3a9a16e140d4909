//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Operation-based**: SPT, LPT
//! - **Job-based**: SRPT, LRPT
//! - **Time-based**: EST
//!
//! # Score Convention
//! All rules return lower scores for higher priority operations.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use super::{DispatchContext, DispatchingRule, RuleScore};
use crate::models::{Instance, Operation};

// ======================== Operation-based rules ========================

/// Shortest Processing Time.
///
/// Prioritizes the ready operation with the shortest duration.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, op: Operation, instance: &Instance, _context: &DispatchContext) -> RuleScore {
        instance.duration(op)
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time.
///
/// Prioritizes the ready operation with the longest duration.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, op: Operation, instance: &Instance, _context: &DispatchContext) -> RuleScore {
        -instance.duration(op)
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

// ======================== Job-based rules ========================

/// Shortest Remaining Processing Time.
///
/// Prioritizes jobs closest to completion.
#[derive(Debug, Clone, Copy)]
pub struct Srpt;

impl DispatchingRule for Srpt {
    fn name(&self) -> &'static str {
        "SRPT"
    }

    fn evaluate(&self, op: Operation, _instance: &Instance, context: &DispatchContext) -> RuleScore {
        context.remaining_work[op.job]
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Processing Time"
    }
}

/// Longest Remaining Processing Time.
///
/// Prioritizes jobs with the most work left; keeps long jobs from
/// finishing last.
#[derive(Debug, Clone, Copy)]
pub struct Lrpt;

impl DispatchingRule for Lrpt {
    fn name(&self) -> &'static str {
        "LRPT"
    }

    fn evaluate(&self, op: Operation, _instance: &Instance, context: &DispatchContext) -> RuleScore {
        -context.remaining_work[op.job]
    }

    fn description(&self) -> &'static str {
        "Longest Remaining Processing Time"
    }
}

// ======================== Time-based rules ========================

/// Earliest Start Time.
///
/// Prioritizes operations that can start soonest given machine and job
/// availability. Usually combined with a tie-breaker (EST_SPT, EST_LRPT).
///
/// # Reference
/// Giffler & Thompson (1960), "Algorithms for Solving Production-Scheduling
/// Problems"
#[derive(Debug, Clone, Copy)]
pub struct Est;

impl DispatchingRule for Est {
    fn name(&self) -> &'static str {
        "EST"
    }

    fn evaluate(&self, op: Operation, instance: &Instance, context: &DispatchContext) -> RuleScore {
        context.earliest_start(op, instance)
    }

    fn description(&self) -> &'static str {
        "Earliest Start Time"
    }
}
