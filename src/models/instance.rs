//! Job-shop instance model.
//!
//! An instance lists, for every job, the sequence of its operations; each
//! operation runs on one fixed machine for a fixed duration. Instances are
//! immutable once built and are shared through `Arc` by encodings and
//! schedules.
//!
//! # Text Format
//!
//! ```text
//! # comment lines start with '#'
//! 2 2          <- num_jobs num_tasks (num_tasks is also the machine count)
//! 0 3 1 2      <- job 0: machine duration pairs, one per step
//! 1 2 0 4      <- job 1
//! ```
//!
//! # Reference
//! Taillard (1993), "Benchmarks for basic scheduling problems"

use std::num::ParseIntError;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Operation;
use crate::validation::{validate_jobs, ValidationError};

/// Errors raised while reading an instance from text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The file could not be read.
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    /// A token that should be an integer is not.
    #[error("parse int {0}")]
    ParseInt(#[from] ParseIntError),
    /// The text does not follow the expected layout.
    #[error("ill formed instance: {0}")]
    Format(String),
    /// The data parsed but does not describe a valid instance.
    #[error("invalid instance ({} problem(s))", .0.len())]
    Invalid(Vec<ValidationError>),
}

/// An immutable job-shop problem instance.
///
/// Every job has the same number of operations (`num_tasks`). Operation
/// data is stored flat, indexed by [`Instance::op_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InstanceData")]
pub struct Instance {
    num_jobs: usize,
    num_tasks: usize,
    num_machines: usize,
    machines: Vec<usize>,
    durations: Vec<i64>,
}

#[derive(Deserialize)]
struct InstanceData {
    num_jobs: usize,
    num_tasks: usize,
    num_machines: usize,
    machines: Vec<usize>,
    durations: Vec<i64>,
}

impl TryFrom<InstanceData> for Instance {
    type Error = String;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        let num_operations = data.num_jobs * data.num_tasks;
        if data.machines.len() != num_operations || data.durations.len() != num_operations {
            return Err(format!(
                "expected {num_operations} operations, found {} machines and {} durations",
                data.machines.len(),
                data.durations.len()
            ));
        }
        let ops: Vec<(usize, i64)> = data.machines.into_iter().zip(data.durations).collect();
        let jobs = ops
            .chunks(data.num_tasks.max(1))
            .map(<[_]>::to_vec)
            .collect();
        Instance::with_machines(data.num_machines, jobs).map_err(|errors| {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        })
    }
}

impl Instance {
    /// Builds an instance from `(machine, duration)` lists, one per job.
    ///
    /// The machine count is inferred as the largest machine index plus one.
    pub fn from_jobs(jobs: Vec<Vec<(usize, i64)>>) -> Result<Self, Vec<ValidationError>> {
        let num_machines = jobs
            .iter()
            .flatten()
            .map(|&(machine, _)| machine + 1)
            .max()
            .unwrap_or(0);
        Self::with_machines(num_machines, jobs)
    }

    /// Builds an instance with an explicit machine count.
    ///
    /// Machines without any operation are allowed; their order stays empty.
    pub fn with_machines(
        num_machines: usize,
        jobs: Vec<Vec<(usize, i64)>>,
    ) -> Result<Self, Vec<ValidationError>> {
        validate_jobs(num_machines, &jobs)?;

        let num_jobs = jobs.len();
        let num_tasks = jobs.first().map_or(0, Vec::len);
        let (machines, durations) = jobs.into_iter().flatten().unzip();

        Ok(Self {
            num_jobs,
            num_tasks,
            num_machines,
            machines,
            durations,
        })
    }

    /// Reads an instance from a file in the text format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        std::fs::read_to_string(path)?.parse()
    }

    /// Number of jobs.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.num_jobs
    }

    /// Number of operations per job.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    /// Number of machines.
    #[inline]
    pub fn num_machines(&self) -> usize {
        self.num_machines
    }

    /// Total number of operations.
    #[inline]
    pub fn num_operations(&self) -> usize {
        self.num_jobs * self.num_tasks
    }

    /// Dense id of an operation (`job * num_tasks + step`).
    #[inline]
    pub fn op_id(&self, op: Operation) -> usize {
        op.job * self.num_tasks + op.step
    }

    /// Operation with the given dense id.
    #[inline]
    pub fn operation(&self, id: usize) -> Operation {
        Operation::new(id / self.num_tasks, id % self.num_tasks)
    }

    /// Whether the operation belongs to this instance.
    pub fn contains(&self, op: Operation) -> bool {
        op.job < self.num_jobs && op.step < self.num_tasks
    }

    /// Machine the operation runs on.
    #[inline]
    pub fn machine(&self, op: Operation) -> usize {
        self.machines[self.op_id(op)]
    }

    /// Processing time of the operation.
    #[inline]
    pub fn duration(&self, op: Operation) -> i64 {
        self.durations[self.op_id(op)]
    }

    /// Machine of the `step`-th operation of `job`.
    pub fn machine_at(&self, job: usize, step: usize) -> usize {
        self.machine(Operation::new(job, step))
    }

    /// Processing time of the `step`-th operation of `job`.
    pub fn duration_at(&self, job: usize, step: usize) -> i64 {
        self.duration(Operation::new(job, step))
    }

    /// Sum of durations of `job`'s operations from `step` on.
    pub fn remaining_work(&self, job: usize, step: usize) -> i64 {
        (step..self.num_tasks)
            .map(|s| self.duration_at(job, s))
            .sum()
    }

    /// Total processing time of a job.
    pub fn job_duration(&self, job: usize) -> i64 {
        self.remaining_work(job, 0)
    }

    /// Total processing time requested from a machine.
    pub fn machine_load(&self, machine: usize) -> i64 {
        self.operations()
            .filter(|&op| self.machine(op) == machine)
            .map(|op| self.duration(op))
            .sum()
    }

    /// Trivial makespan lower bound: the longest job or the busiest machine.
    pub fn lower_bound(&self) -> i64 {
        let jobs = (0..self.num_jobs).map(|j| self.job_duration(j));
        let machines = (0..self.num_machines).map(|m| self.machine_load(m));
        jobs.chain(machines).max().unwrap_or(0)
    }

    /// All operations in id order (job-major).
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        (0..self.num_operations()).map(move |id| self.operation(id))
    }
}

impl FromStr for Instance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let header = lines
            .next()
            .ok_or_else(|| ParseError::Format("missing header line".into()))?;
        let header = header
            .split_whitespace()
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()?;
        let &[num_jobs, num_tasks] = header.as_slice() else {
            return Err(ParseError::Format(format!(
                "header must contain 2 integers, found {}",
                header.len()
            )));
        };

        let mut jobs = Vec::with_capacity(num_jobs);
        for job in 0..num_jobs {
            let line = lines
                .next()
                .ok_or_else(|| ParseError::Format(format!("missing line for job {job}")))?;
            let values = line
                .split_whitespace()
                .map(str::parse::<i64>)
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() != 2 * num_tasks {
                return Err(ParseError::Format(format!(
                    "job {job} has {} values, expected {}",
                    values.len(),
                    2 * num_tasks
                )));
            }
            let ops = values
                .chunks_exact(2)
                .map(|pair| {
                    let machine = usize::try_from(pair[0]).map_err(|_| {
                        ParseError::Format(format!("job {job} has negative machine {}", pair[0]))
                    })?;
                    Ok((machine, pair[1]))
                })
                .collect::<Result<Vec<_>, ParseError>>()?;
            jobs.push(ops);
        }

        if let Some(extra) = lines.next() {
            return Err(ParseError::Format(format!("unexpected trailing line '{extra}'")));
        }

        Instance::with_machines(num_tasks, jobs).map_err(ParseError::Invalid)
    }
}
