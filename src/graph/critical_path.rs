//! Critical path extraction.

use super::DisjunctiveGraph;
use crate::models::Operation;

impl DisjunctiveGraph<'_> {
    /// One critical path, in forward order, for the given start times.
    ///
    /// Walks backward from the first operation (in id order) that reaches
    /// the makespan. At each step the predecessor whose end equals the
    /// current start is taken; when both the machine and the job
    /// predecessor qualify, the machine predecessor wins. The walk stops at
    /// an operation starting at 0, or when no predecessor is tight (start
    /// times that were not produced by [`longest_paths`](Self::longest_paths)).
    ///
    /// # Panics
    ///
    /// Panics if `starts` has fewer entries than the instance has operations.
    pub fn critical_path(&self, starts: &[i64]) -> Vec<Operation> {
        let instance = self.instance();
        let n = instance.num_operations();
        let num_tasks = instance.num_tasks();
        let end = |id: usize| starts[id] + instance.duration(instance.operation(id));

        let mut last = None;
        for id in 0..n {
            if last.map_or(true, |best| end(id) > end(best)) {
                last = Some(id);
            }
        }
        let Some(mut current) = last else {
            return Vec::new();
        };

        let mut path = vec![current];
        for _ in 0..n {
            let start = starts[current];
            if start == 0 {
                break;
            }
            let by_machine = self.machine_prev_id(current).filter(|&p| end(p) == start);
            let by_job = (current % num_tasks != 0)
                .then(|| current - 1)
                .filter(|&p| end(p) == start);
            match by_machine.or(by_job) {
                Some(pred) => {
                    path.push(pred);
                    current = pred;
                }
                None => break,
            }
        }

        path.reverse();
        path.into_iter().map(|id| instance.operation(id)).collect()
    }
}
