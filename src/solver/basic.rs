//! Round-robin seed.

use std::sync::Arc;
use std::time::Instant;

use super::Solver;
use crate::encoding::ResourceOrder;
use crate::models::{Instance, Operation, Schedule};

/// Dispatches all first steps, then all second steps, and so on.
///
/// Within a step, jobs are taken in index order. The resulting order is
/// always feasible; its quality is usually poor, which makes it a useful
/// baseline seed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicSolver;

impl BasicSolver {
    /// Builds the round-robin resource order.
    pub fn dispatch(&self, instance: &Arc<Instance>) -> ResourceOrder {
        let num_jobs = instance.num_jobs();
        let sequence = (0..instance.num_tasks())
            .flat_map(|step| (0..num_jobs).map(move |job| Operation::new(job, step)));
        ResourceOrder::from_dispatch_sequence(Arc::clone(instance), sequence)
    }
}

impl Solver for BasicSolver {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn solve(&self, instance: &Arc<Instance>, _deadline: Instant) -> Option<Schedule> {
        let schedule = self.dispatch(instance).to_schedule().ok()?;
        log::debug!("{}: makespan {}", self.name(), schedule.makespan());
        Some(schedule)
    }
}
