//! Arena representation of the disjunctive graph.

use std::collections::VecDeque;

use super::DecodeError;
use crate::encoding::ResourceOrder;
use crate::models::{Instance, Operation};

/// Disjunctive graph of a resource order, stored as an arena.
///
/// Job arcs are implicit (`id -> id + 1` inside a job). Machine arcs are
/// explicit `machine_prev` / `machine_next` links per operation id, so a
/// move touching one machine only re-links that machine.
#[derive(Debug, Clone)]
pub struct DisjunctiveGraph<'a> {
    instance: &'a Instance,
    machine_prev: Vec<Option<usize>>,
    machine_next: Vec<Option<usize>>,
}

impl<'a> DisjunctiveGraph<'a> {
    /// Builds the graph of a resource order.
    pub fn new(order: &'a ResourceOrder) -> Self {
        let instance = order.instance().as_ref();
        let n = instance.num_operations();
        let mut graph = Self {
            instance,
            machine_prev: vec![None; n],
            machine_next: vec![None; n],
        };
        for ops in order.machine_orders() {
            graph.relink(ops.iter().copied());
        }
        graph
    }

    /// A copy of this graph where positions `a` and `b` of `machine` (as
    /// listed in `order`) are exchanged.
    ///
    /// `order` must be the order this graph was built from; only the links
    /// of `machine` are recomputed.
    pub fn swapped(&self, order: &ResourceOrder, machine: usize, a: usize, b: usize) -> Self {
        let seq = order.machine_order(machine);
        let mut next = self.clone();
        next.relink((0..seq.len()).map(|p| {
            if p == a {
                seq[b]
            } else if p == b {
                seq[a]
            } else {
                seq[p]
            }
        }));
        next
    }

    fn relink(&mut self, ops: impl Iterator<Item = Operation>) {
        let mut prev: Option<usize> = None;
        for op in ops {
            let id = self.instance.op_id(op);
            self.machine_prev[id] = prev;
            if let Some(p) = prev {
                self.machine_next[p] = Some(id);
            }
            prev = Some(id);
        }
        if let Some(p) = prev {
            self.machine_next[p] = None;
        }
    }

    /// The instance behind the graph.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Operation processed right before `op` on its machine.
    pub fn machine_predecessor(&self, op: Operation) -> Option<Operation> {
        self.machine_prev[self.instance.op_id(op)].map(|id| self.instance.operation(id))
    }

    /// Operation processed right after `op` on its machine.
    pub fn machine_successor(&self, op: Operation) -> Option<Operation> {
        self.machine_next[self.instance.op_id(op)].map(|id| self.instance.operation(id))
    }

    pub(super) fn machine_prev_id(&self, id: usize) -> Option<usize> {
        self.machine_prev[id]
    }

    /// Earliest start time of every operation, in id order.
    ///
    /// Forward relaxation in topological order (Kahn). Operations are
    /// released in id order, so the result is deterministic.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Cycle`] if some operations can never become ready.
    pub fn longest_paths(&self) -> Result<Vec<i64>, DecodeError> {
        let n = self.instance.num_operations();
        let num_tasks = self.instance.num_tasks();

        let mut indegree: Vec<u8> = (0..n)
            .map(|id| u8::from(id % num_tasks != 0) + u8::from(self.machine_prev[id].is_some()))
            .collect();
        let mut starts = vec![0i64; n];
        let mut ready: VecDeque<usize> = (0..n).filter(|&id| indegree[id] == 0).collect();
        let mut visited = 0;

        while let Some(id) = ready.pop_front() {
            visited += 1;
            let end = starts[id] + self.instance.duration(self.instance.operation(id));
            let job_next = (id % num_tasks + 1 < num_tasks).then_some(id + 1);
            for succ in job_next.into_iter().chain(self.machine_next[id]) {
                starts[succ] = starts[succ].max(end);
                indegree[succ] -= 1;
                if indegree[succ] == 0 {
                    ready.push_back(succ);
                }
            }
        }

        if visited < n {
            return Err(DecodeError::Cycle {
                unordered: n - visited,
            });
        }
        Ok(starts)
    }

    /// Length of the longest path (the makespan).
    pub fn makespan(&self) -> Result<i64, DecodeError> {
        let starts = self.longest_paths()?;
        Ok(starts
            .iter()
            .enumerate()
            .map(|(id, &s)| s + self.instance.duration(self.instance.operation(id)))
            .max()
            .unwrap_or(0))
    }
}
