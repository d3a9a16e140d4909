//! Structural validation for job-shop data.
//!
//! Checks the integrity of instance data, per-machine encodings, and
//! decoded schedules. Detects:
//! - Empty or ragged job lists
//! - Machine references out of range, negative durations
//! - Operations missing from (or duplicated in) a resource order
//! - Precedence violations and machine overlaps in a schedule
//!
//! All checks collect every problem instead of stopping at the first one.

use std::collections::HashSet;

use crate::models::{Instance, Operation, Schedule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance has no jobs, or jobs without operations.
    EmptyInstance,
    /// Jobs do not all have the same number of operations.
    RaggedJob,
    /// An operation references a machine that doesn't exist.
    MachineOutOfRange,
    /// An operation has a negative processing time.
    NegativeDuration,
    /// A resource order doesn't have one sequence per machine.
    MachineCountMismatch,
    /// An operation is listed on a machine it doesn't run on.
    WrongMachine,
    /// An operation doesn't belong to the instance.
    UnknownOperation,
    /// An operation is listed more than once.
    DuplicateOperation,
    /// An operation is not listed at all.
    MissingOperation,
    /// An operation starts before its job predecessor finished.
    PrecedenceViolation,
    /// Two operations overlap on the same machine.
    MachineOverlap,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates raw job data: one `(machine, duration)` list per job.
///
/// Checks:
/// 1. At least one job, and jobs are not empty
/// 2. All jobs have the same number of operations
/// 3. Every machine index is below `num_machines`
/// 4. No negative durations
pub fn validate_jobs(num_machines: usize, jobs: &[Vec<(usize, i64)>]) -> ValidationResult {
    let mut errors = Vec::new();

    let Some(first) = jobs.first() else {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Instance has no jobs",
        )]);
    };
    if first.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Job 0 has no operations",
        ));
    }

    let num_tasks = first.len();
    for (job, ops) in jobs.iter().enumerate() {
        if ops.len() != num_tasks {
            errors.push(ValidationError::new(
                ValidationErrorKind::RaggedJob,
                format!(
                    "Job {job} has {} operations, expected {num_tasks}",
                    ops.len()
                ),
            ));
        }
        for (step, &(machine, duration)) in ops.iter().enumerate() {
            if machine >= num_machines {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MachineOutOfRange,
                    format!(
                        "Operation ({job}, {step}) uses machine {machine}, but only {num_machines} exist"
                    ),
                ));
            }
            if duration < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeDuration,
                    format!("Operation ({job}, {step}) has negative duration {duration}"),
                ));
            }
        }
    }

    into_result(errors)
}

/// Validates a per-machine operation ordering against an instance.
///
/// Every operation must appear exactly once, on the machine the instance
/// assigns to it.
pub fn validate_resource_order(instance: &Instance, orders: &[Vec<Operation>]) -> ValidationResult {
    let mut errors = Vec::new();

    if orders.len() != instance.num_machines() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MachineCountMismatch,
            format!(
                "Resource order has {} machine sequences, expected {}",
                orders.len(),
                instance.num_machines()
            ),
        ));
    }

    let mut seen = HashSet::new();
    for (machine, ops) in orders.iter().enumerate() {
        for &op in ops {
            if !instance.contains(op) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownOperation,
                    format!("Operation {op} on machine {machine} is not part of the instance"),
                ));
                continue;
            }
            if instance.machine(op) != machine {
                errors.push(ValidationError::new(
                    ValidationErrorKind::WrongMachine,
                    format!(
                        "Operation {op} listed on machine {machine}, but runs on machine {}",
                        instance.machine(op)
                    ),
                ));
            }
            if !seen.insert(op) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateOperation,
                    format!("Operation {op} is listed more than once"),
                ));
            }
        }
    }

    for op in instance.operations() {
        if !seen.contains(&op) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingOperation,
                format!("Operation {op} is missing from the resource order"),
            ));
        }
    }

    into_result(errors)
}

/// Validates a schedule's start times.
///
/// Checks job precedence (step i+1 starts after step i ends) and machine
/// exclusivity (no two operations overlap on one machine). Zero-length
/// operations never overlap anything.
pub fn validate_schedule(schedule: &Schedule) -> ValidationResult {
    let instance = schedule.instance();
    let mut errors = Vec::new();

    for op in instance.operations() {
        if schedule.start_time(op) < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::PrecedenceViolation,
                format!("Operation {op} starts before time 0"),
            ));
        }
        if let Some(pred) = op.job_predecessor() {
            if schedule.start_time(op) < schedule.end_time(pred) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::PrecedenceViolation,
                    format!(
                        "Operation {op} starts at {} before {pred} ends at {}",
                        schedule.start_time(op),
                        schedule.end_time(pred)
                    ),
                ));
            }
        }
    }

    for machine in 0..instance.num_machines() {
        // latest-ending positive-length operation seen so far, by start time
        let mut busy: Option<Operation> = None;
        for op in schedule.operations_on_machine(machine) {
            if instance.duration(op) == 0 {
                continue;
            }
            if let Some(prev) = busy {
                if schedule.start_time(op) < schedule.end_time(prev) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::MachineOverlap,
                        format!("Operations {prev} and {op} overlap on machine {machine}"),
                    ));
                }
            }
            match busy {
                Some(prev) if schedule.end_time(prev) >= schedule.end_time(op) => {}
                _ => busy = Some(op),
            }
        }
    }

    into_result(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn two_by_two() -> Instance {
        Instance::from_jobs(vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]]).unwrap()
    }

    #[test]
    fn test_valid_jobs() {
        let jobs = vec![vec![(0, 3), (1, 2)], vec![(1, 2), (0, 4)]];
        assert!(validate_jobs(2, &jobs).is_ok());
    }

    #[test]
    fn test_no_jobs() {
        let errors = validate_jobs(2, &[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyInstance);
    }

    #[test]
    fn test_ragged_and_out_of_range() {
        let jobs = vec![vec![(0, 3), (1, 2)], vec![(5, 2)]];
        let errors = validate_jobs(2, &jobs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::RaggedJob));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MachineOutOfRange));
    }

    #[test]
    fn test_negative_duration() {
        let jobs = vec![vec![(0, -1)]];
        let errors = validate_jobs(1, &jobs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeDuration);
    }

    #[test]
    fn test_valid_resource_order() {
        let inst = two_by_two();
        let orders = vec![
            vec![Operation::new(0, 0), Operation::new(1, 1)],
            vec![Operation::new(1, 0), Operation::new(0, 1)],
        ];
        assert!(validate_resource_order(&inst, &orders).is_ok());
    }

    #[test]
    fn test_resource_order_errors() {
        let inst = two_by_two();
        // (1,1) duplicated, (0,0) missing, (0,1) on the wrong machine
        let orders = vec![
            vec![Operation::new(1, 1), Operation::new(1, 1), Operation::new(0, 1)],
            vec![Operation::new(1, 0)],
        ];
        let errors = validate_resource_order(&inst, &orders).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::DuplicateOperation));
        assert!(kinds.contains(&ValidationErrorKind::MissingOperation));
        assert!(kinds.contains(&ValidationErrorKind::WrongMachine));
    }

    #[test]
    fn test_resource_order_machine_count() {
        let inst = two_by_two();
        let errors = validate_resource_order(&inst, &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MachineCountMismatch));
    }

    #[test]
    fn test_schedule_violations() {
        let inst = Arc::new(two_by_two());
        // (0,1) starts at 1 before (0,0) ends at 3; (1,1) overlaps (0,0) on m0
        let bad = Schedule::new(Arc::clone(&inst), vec![0, 1, 0, 2]);
        let errors = validate_schedule(&bad).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::PrecedenceViolation));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MachineOverlap));

        let good = Schedule::new(inst, vec![0, 3, 0, 3]);
        assert!(validate_schedule(&good).is_ok());
    }

    #[test]
    fn test_overlap_across_zero_length_operation() {
        // one machine: [0,10), zero-length at 1, [2,5)
        let inst = Arc::new(Instance::from_jobs(vec![vec![(0, 10)], vec![(0, 0)], vec![(0, 3)]]).unwrap());
        let bad = Schedule::new(Arc::clone(&inst), vec![0, 1, 2]);
        let errors = validate_schedule(&bad).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::MachineOverlap);

        // the zero-length operation may sit anywhere
        let good = Schedule::new(Arc::clone(&inst), vec![0, 4, 10]);
        assert!(validate_schedule(&good).is_ok());
    }

    #[test]
    fn test_overlap_with_earlier_long_operation() {
        // [0,10) covers both [2,4) and [5,7), which don't overlap each other
        let inst = Arc::new(Instance::from_jobs(vec![vec![(0, 10)], vec![(0, 2)], vec![(0, 2)]]).unwrap());
        let bad = Schedule::new(Arc::clone(&inst), vec![0, 2, 5]);
        let errors = validate_schedule(&bad).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::MachineOverlap));
    }
}
