//! Operation (task) identifier.
//!
//! An operation is the `step`-th processing stage of a job. Operations of
//! the same job are totally ordered by step index.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation of a job-shop instance, identified by `(job, step)`.
///
/// Ordering is job-major, then by step, which matches the dense operation
/// id used by [`Instance::op_id`](super::Instance::op_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Operation {
    /// Job index.
    pub job: usize,
    /// Step index within the job (0-based).
    pub step: usize,
}

impl Operation {
    /// Creates a new operation identifier.
    pub const fn new(job: usize, step: usize) -> Self {
        Self { job, step }
    }

    /// The preceding operation of the same job, if any.
    pub fn job_predecessor(&self) -> Option<Operation> {
        self.step
            .checked_sub(1)
            .map(|step| Operation::new(self.job, step))
    }

    /// The next operation of the same job, if `num_tasks` allows one.
    pub fn job_successor(&self, num_tasks: usize) -> Option<Operation> {
        (self.step + 1 < num_tasks).then(|| Operation::new(self.job, self.step + 1))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.job, self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_neighbors() {
        let op = Operation::new(2, 0);
        assert_eq!(op.job_predecessor(), None);
        assert_eq!(op.job_successor(3), Some(Operation::new(2, 1)));

        let last = Operation::new(2, 2);
        assert_eq!(last.job_predecessor(), Some(Operation::new(2, 1)));
        assert_eq!(last.job_successor(3), None);
    }

    #[test]
    fn test_ordering_is_job_major() {
        let mut ops = vec![
            Operation::new(1, 0),
            Operation::new(0, 1),
            Operation::new(0, 0),
        ];
        ops.sort();
        assert_eq!(
            ops,
            vec![
                Operation::new(0, 0),
                Operation::new(0, 1),
                Operation::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::new(3, 1).to_string(), "(3, 1)");
    }
}
