//! Schedule (solution) model.
//!
//! A schedule fixes a start time for every operation of an instance.
//! Schedules are derived values: they are produced by decoding a
//! [`ResourceOrder`](crate::encoding::ResourceOrder) or by a seed
//! heuristic, and are never edited afterwards.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Instance, Operation};
use crate::encoding::ResourceOrder;
use crate::graph::DisjunctiveGraph;
use crate::validation::validate_schedule;

/// A complete schedule: one start time per operation.
///
/// Start times are stored flat, indexed by [`Instance::op_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleData")]
pub struct Schedule {
    instance: Arc<Instance>,
    starts: Vec<i64>,
}

#[derive(Deserialize)]
struct ScheduleData {
    instance: Arc<Instance>,
    starts: Vec<i64>,
}

impl TryFrom<ScheduleData> for Schedule {
    type Error = String;

    fn try_from(data: ScheduleData) -> Result<Self, Self::Error> {
        if data.starts.len() != data.instance.num_operations() {
            return Err(format!(
                "{} start times for {} operations",
                data.starts.len(),
                data.instance.num_operations()
            ));
        }
        Ok(Schedule::new(data.instance, data.starts))
    }
}

impl Schedule {
    /// Creates a schedule from start times in operation-id order.
    ///
    /// # Panics
    ///
    /// Panics if `starts` doesn't hold exactly one entry per operation.
    pub fn new(instance: Arc<Instance>, starts: Vec<i64>) -> Self {
        assert_eq!(
            starts.len(),
            instance.num_operations(),
            "called `Schedule::new()` with {} start times for {} operations",
            starts.len(),
            instance.num_operations()
        );
        Self { instance, starts }
    }

    /// The instance this schedule solves.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Start time of an operation.
    #[inline]
    pub fn start_time(&self, op: Operation) -> i64 {
        self.starts[self.instance.op_id(op)]
    }

    /// End time of an operation.
    #[inline]
    pub fn end_time(&self, op: Operation) -> i64 {
        self.start_time(op) + self.instance.duration(op)
    }

    /// Start times in operation-id order.
    pub fn start_times(&self) -> &[i64] {
        &self.starts
    }

    /// Makespan: latest end time across all operations.
    pub fn makespan(&self) -> i64 {
        self.instance
            .operations()
            .map(|op| self.end_time(op))
            .max()
            .unwrap_or(0)
    }

    /// Operations processed by `machine`, in start-time order.
    ///
    /// Ties are broken by end time, then by operation id, so zero-length
    /// operations come before the operation they share a start with.
    pub fn operations_on_machine(&self, machine: usize) -> Vec<Operation> {
        let mut ops: Vec<Operation> = self
            .instance
            .operations()
            .filter(|&op| self.instance.machine(op) == machine)
            .collect();
        ops.sort_by_key(|&op| (self.start_time(op), self.end_time(op), op));
        ops
    }

    /// Whether the schedule satisfies job precedence and machine exclusivity.
    pub fn is_valid(&self) -> bool {
        validate_schedule(self).is_ok()
    }

    /// One critical path of this schedule, in forward order.
    ///
    /// The machine order is recovered from start times; see
    /// [`DisjunctiveGraph::critical_path`] for the tie-break policy.
    pub fn critical_path(&self) -> Vec<Operation> {
        let order = ResourceOrder::from_schedule(self);
        DisjunctiveGraph::new(&order).critical_path(&self.starts)
    }

    /// Completion time of a job (end of its last operation).
    pub fn job_completion_time(&self, job: usize) -> Option<i64> {
        (0..self.instance.num_tasks())
            .map(|step| self.end_time(Operation::new(job, step)))
            .max()
    }

    /// Machine utilization: busy time / horizon.
    ///
    /// Returns `None` if `horizon` is not positive.
    pub fn machine_utilization(&self, machine: usize, horizon: i64) -> Option<f64> {
        if horizon <= 0 {
            return None;
        }
        let busy = self.instance.machine_load(machine);
        Some(busy as f64 / horizon as f64)
    }

    /// Utilization of every machine, using the makespan as horizon.
    pub fn all_utilizations(&self) -> HashMap<usize, f64> {
        let horizon = self.makespan();
        (0..self.instance.num_machines())
            .filter_map(|m| self.machine_utilization(m, horizon).map(|u| (m, u)))
            .collect()
    }
}
