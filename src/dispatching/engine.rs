//! Rule engine for multi-criteria dispatching.
//!
//! Chains dispatching rules lexicographically: a later rule is consulted
//! only when every earlier rule ties. Remaining ties go to the lowest job
//! index, so selection is deterministic.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchContext, DispatchingRule, RuleScore};
use crate::models::{Instance, Operation};

/// A composable, sequential rule engine.
///
/// # Example
/// ```
/// use u_jobshop::dispatching::{rules, RuleEngine};
///
/// // EST_SPT: earliest start first, shortest duration among ties
/// let engine = RuleEngine::new()
///     .with_rule(rules::Est)
///     .with_tie_breaker(rules::Spt);
/// assert_eq!(engine.rule_names(), vec!["EST", "SPT"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine (selects the lowest job index).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted after all previous rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the chained rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Index of the highest-priority candidate.
    pub fn select_best(
        &self,
        candidates: &[Operation],
        instance: &Instance,
        context: &DispatchContext,
    ) -> Option<usize> {
        (0..candidates.len()).min_by(|&a, &b| {
            self.compare(candidates[a], candidates[b], instance, context)
        })
    }

    /// Scores of an operation under each rule.
    pub fn evaluate(
        &self,
        op: Operation,
        instance: &Instance,
        context: &DispatchContext,
    ) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(op, instance, context))
            .collect()
    }

    fn compare(
        &self,
        a: Operation,
        b: Operation,
        instance: &Instance,
        context: &DispatchContext,
    ) -> Ordering {
        for rule in &self.rules {
            let ordering = rule
                .evaluate(a, instance, context)
                .cmp(&rule.evaluate(b, instance, context));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.job.cmp(&b.job)
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules::{Est, Lrpt, Spt};

    fn setup() -> (Instance, DispatchContext) {
        // job 0: m0 3, m1 2 / job 1: m1 2, m0 4 / job 2: m1 1, m0 1
        let inst = Instance::from_jobs(vec![
            vec![(0, 3), (1, 2)],
            vec![(1, 2), (0, 4)],
            vec![(1, 1), (0, 1)],
        ])
        .unwrap();
        let ctx = DispatchContext::new(&inst);
        (inst, ctx)
    }

    #[test]
    fn test_single_rule() {
        let (inst, ctx) = setup();
        let ready = [Operation::new(0, 0), Operation::new(1, 0), Operation::new(2, 0)];
        let engine = RuleEngine::new().with_rule(Spt);
        assert_eq!(engine.select_best(&ready, &inst, &ctx), Some(2));
    }

    #[test]
    fn test_tie_breaker() {
        let (inst, mut ctx) = setup();
        ctx.record(Operation::new(2, 0), &inst); // machine 1 busy until 1
        let ready = [Operation::new(0, 0), Operation::new(1, 0), Operation::new(2, 1)];
        // EST: (0,0) -> 0, (1,0) -> 1, (2,1) -> 1; only (0,0) starts at 0
        let est_lrpt = RuleEngine::new().with_rule(Est).with_tie_breaker(Lrpt);
        assert_eq!(est_lrpt.select_best(&ready, &inst, &ctx), Some(0));

        ctx.record(Operation::new(0, 0), &inst); // machine 0 busy until 3
        let ready = [Operation::new(0, 1), Operation::new(1, 0), Operation::new(2, 1)];
        // EST: (0,1) -> 3, (1,0) -> 1, (2,1) -> 3; (1,0) wins outright
        assert_eq!(est_lrpt.select_best(&ready, &inst, &ctx), Some(1));
    }

    #[test]
    fn test_final_tie_by_job() {
        let (inst, ctx) = setup();
        let ready = [Operation::new(1, 0), Operation::new(0, 1)];
        // both last 2 time units
        let engine = RuleEngine::new().with_rule(Spt);
        assert_eq!(engine.select_best(&ready, &inst, &ctx), Some(1));
        assert_eq!(RuleEngine::new().select_best(&[], &inst, &ctx), None);
    }

    #[test]
    fn test_evaluate_scores() {
        let (inst, ctx) = setup();
        let engine = RuleEngine::new().with_rule(Est).with_tie_breaker(Spt);
        assert_eq!(engine.evaluate(Operation::new(1, 1), &inst, &ctx), vec![0, 4]);
        assert_eq!(format!("{engine:?}"), "RuleEngine { rules: [\"EST\", \"SPT\"] }");
    }
}
