//! Per-machine operation ordering.
//!
//! # Encoding
//!
//! A resource order holds, for each machine, the sequence in which that
//! machine processes its operations. Together with job precedence this
//! fixes a semi-active schedule, obtained by decoding (longest paths in the
//! disjunctive graph).
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the Job
//! Shop Problem", Sec. 2

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::graph::{decode, DecodeError, DisjunctiveGraph};
use crate::models::{Instance, Operation, Schedule};
use crate::validation::{validate_resource_order, ValidationError};

/// One processing sequence per machine.
///
/// Invariant: every operation of the instance appears exactly once, in the
/// sequence of the machine it runs on. Values are never edited in place;
/// search steps build fresh orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResourceOrderData")]
pub struct ResourceOrder {
    instance: Arc<Instance>,
    orders: Vec<Vec<Operation>>,
}

#[derive(Deserialize)]
struct ResourceOrderData {
    instance: Arc<Instance>,
    orders: Vec<Vec<Operation>>,
}

impl TryFrom<ResourceOrderData> for ResourceOrder {
    type Error = String;

    fn try_from(data: ResourceOrderData) -> Result<Self, Self::Error> {
        ResourceOrder::from_machine_orders(data.instance, data.orders).map_err(|errors| {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        })
    }
}

impl ResourceOrder {
    /// Builds an order from explicit machine sequences.
    ///
    /// Fails if the sequences are not a partition of the instance's
    /// operations by machine. Cyclic (infeasible) orders are accepted here
    /// and rejected by decoding.
    pub fn from_machine_orders(
        instance: Arc<Instance>,
        orders: Vec<Vec<Operation>>,
    ) -> Result<Self, Vec<ValidationError>> {
        validate_resource_order(&instance, &orders)?;
        Ok(Self { instance, orders })
    }

    /// Builds an order by appending operations to their machine's sequence
    /// in the given dispatch order.
    ///
    /// The sequence must list every operation exactly once, with each job's
    /// steps in increasing order; the result is then always feasible.
    pub(crate) fn from_dispatch_sequence(
        instance: Arc<Instance>,
        sequence: impl IntoIterator<Item = Operation>,
    ) -> Self {
        let mut orders = vec![Vec::with_capacity(instance.num_jobs()); instance.num_machines()];
        for op in sequence {
            orders[instance.machine(op)].push(op);
        }
        debug_assert!(validate_resource_order(&instance, &orders).is_ok());
        Self { instance, orders }
    }

    /// Recovers the machine sequences of a schedule (by start time).
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let instance = Arc::clone(schedule.instance());
        let orders = (0..instance.num_machines())
            .map(|m| schedule.operations_on_machine(m))
            .collect();
        Self { instance, orders }
    }

    /// The instance this order encodes a solution for.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Processing sequence of one machine.
    pub fn machine_order(&self, machine: usize) -> &[Operation] {
        &self.orders[machine]
    }

    /// All machine sequences, indexed by machine.
    pub fn machine_orders(&self) -> &[Vec<Operation>] {
        &self.orders
    }

    /// Position of an operation within its machine's sequence.
    pub fn position(&self, op: Operation) -> Option<usize> {
        if !self.instance.contains(op) {
            return None;
        }
        self.orders[self.instance.machine(op)]
            .iter()
            .position(|&o| o == op)
    }

    /// A new order with positions `a` and `b` of `machine` exchanged.
    ///
    /// # Panics
    ///
    /// Panics if a position is out of range for the machine.
    pub fn with_swapped(&self, machine: usize, a: usize, b: usize) -> Self {
        let mut next = self.clone();
        next.orders[machine].swap(a, b);
        next
    }

    /// Decodes this order into a schedule.
    pub fn to_schedule(&self) -> Result<Schedule, DecodeError> {
        decode(self)
    }

    /// Makespan of the decoded schedule.
    pub fn makespan(&self) -> Result<i64, DecodeError> {
        DisjunctiveGraph::new(self).makespan()
    }
}
