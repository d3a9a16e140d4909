//! Dispatch state passed to dispatching rules.

use crate::models::{Instance, Operation};

/// Running state of a list-scheduling pass.
///
/// Tracks when each machine and each job becomes free, and how much work
/// each job still has to process (its next unscheduled operation included).
#[derive(Debug, Clone, Default)]
pub struct DispatchContext {
    /// Time at which each machine becomes free.
    pub machine_free: Vec<i64>,
    /// Time at which each job's last scheduled operation ends.
    pub job_free: Vec<i64>,
    /// Unscheduled processing time per job.
    pub remaining_work: Vec<i64>,
}

impl DispatchContext {
    /// Initial state: everything free at time 0, no work done.
    pub fn new(instance: &Instance) -> Self {
        Self {
            machine_free: vec![0; instance.num_machines()],
            job_free: vec![0; instance.num_jobs()],
            remaining_work: (0..instance.num_jobs())
                .map(|j| instance.job_duration(j))
                .collect(),
        }
    }

    /// Earliest time `op` could start given the current state.
    pub fn earliest_start(&self, op: Operation, instance: &Instance) -> i64 {
        self.job_free[op.job].max(self.machine_free[instance.machine(op)])
    }

    /// Schedules `op` at its earliest start and returns that start.
    pub fn record(&mut self, op: Operation, instance: &Instance) -> i64 {
        let start = self.earliest_start(op, instance);
        let duration = instance.duration(op);
        let end = start + duration;
        self.job_free[op.job] = end;
        self.machine_free[instance.machine(op)] = end;
        self.remaining_work[op.job] -= duration;
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let inst = Instance::from_jobs(vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]]).unwrap();
        let mut ctx = DispatchContext::new(&inst);
        assert_eq!(ctx.remaining_work, vec![5, 6]);

        assert_eq!(ctx.record(Operation::new(0, 0), &inst), 0);
        assert_eq!(ctx.earliest_start(Operation::new(1, 0), &inst), 0);
        assert_eq!(ctx.earliest_start(Operation::new(0, 1), &inst), 3);
        assert_eq!(ctx.record(Operation::new(1, 0), &inst), 0);
        assert_eq!(ctx.record(Operation::new(0, 1), &inst), 3);
        assert_eq!(ctx.machine_free, vec![3, 5]);
        assert_eq!(ctx.job_free, vec![5, 2]);
        assert_eq!(ctx.remaining_work, vec![0, 4]);
    }
}
