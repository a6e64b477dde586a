//! Input and solution validation for job-shop problems.
//!
//! Checks structural integrity of an instance before a DP model is built,
//! and feasibility of a schedule against its instance. Detects:
//! - Operations on machines outside `0..n_machines`
//! - Negative processing times
//! - Jobs without operations
//! - Schedules whose shape, durations, job order or machine usage
//!   contradict the instance
//!
//! All checks collect every problem found instead of stopping at the first.

use crate::models::{JobShopProblem, JobShopSolution};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An operation references a machine that doesn't exist.
    InvalidMachine,
    /// An operation has a negative processing time.
    NegativeDuration,
    /// A job has no operations.
    EmptyJob,
    /// Job or operation counts differ between solution and problem.
    ShapeMismatch,
    /// A window's length differs from the operation's processing time.
    DurationMismatch,
    /// An operation starts before time zero.
    NegativeStart,
    /// An operation starts before its job predecessor ends.
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

/// Validates a job-shop instance.
///
/// Checks:
/// 1. Every machine id is below `n_machines`
/// 2. No processing time is negative
/// 3. Every job has at least one operation
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &JobShopProblem) -> ValidationResult {
    let mut errors = Vec::new();

    for (j, job) in problem.jobs.iter().enumerate() {
        if job.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyJob,
                format!("Job {j} has no operations"),
            ));
        }

        for (p, op) in job.iter().enumerate() {
            if op.machine_id >= problem.n_machines {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidMachine,
                    format!(
                        "Operation ({j}, {p}) references machine {} but only {} machines exist",
                        op.machine_id, problem.n_machines
                    ),
                ));
            }
            if op.processing_time < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeDuration,
                    format!(
                        "Operation ({j}, {p}) has negative processing time {}",
                        op.processing_time
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that a schedule satisfies every job-shop constraint.
///
/// Checks:
/// 1. One window per operation
/// 2. Window length equals processing time
/// 3. No window starts before zero
/// 4. Operations of a job run in order
/// 5. Operations on a machine do not overlap
///
/// Shape errors stop further checks since windows cannot be matched to
/// operations.
pub fn validate_solution(problem: &JobShopProblem, solution: &JobShopSolution) -> ValidationResult {
    let mut errors = Vec::new();

    if solution.schedule.len() != problem.n_jobs() {
        errors.push(ValidationError::new(
            ValidationErrorKind::ShapeMismatch,
            format!(
                "Solution has {} jobs, problem has {}",
                solution.schedule.len(),
                problem.n_jobs()
            ),
        ));
        return Err(errors);
    }
    for (j, (ops, windows)) in problem.jobs.iter().zip(&solution.schedule).enumerate() {
        if ops.len() != windows.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::ShapeMismatch,
                format!(
                    "Job {j} has {} windows for {} operations",
                    windows.len(),
                    ops.len()
                ),
            ));
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    for (j, (ops, windows)) in problem.jobs.iter().zip(&solution.schedule).enumerate() {
        for (p, (op, w)) in ops.iter().zip(windows).enumerate() {
            if w.duration() != op.processing_time {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DurationMismatch,
                    format!(
                        "Operation ({j}, {p}) runs {} but needs {}",
                        w.duration(),
                        op.processing_time
                    ),
                ));
            }
            if w.start < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeStart,
                    format!("Operation ({j}, {p}) starts at {}", w.start),
                ));
            }
            if p > 0 && w.start < windows[p - 1].end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::PrecedenceViolation,
                    format!(
                        "Operation ({j}, {p}) starts at {} before ({j}, {}) ends at {}",
                        w.start,
                        p - 1,
                        windows[p - 1].end
                    ),
                ));
            }
        }
    }

    for m in 0..problem.n_machines() {
        let sequence = solution.machine_sequence(problem, m);
        for pair in sequence.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let wa = solution.schedule[a.0][a.1];
            let wb = solution.schedule[b.0][b.1];
            if wb.start < wa.end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MachineOverlap,
                    format!(
                        "Machine {m}: ({}, {}) [{}, {}) overlaps ({}, {}) [{}, {})",
                        a.0, a.1, wa.start, wa.end, b.0, b.1, wb.start, wb.end
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobShopProblem, JobShopSolution, Operation};

    fn sample_problem() -> JobShopProblem {
        JobShopProblem::from_pairs(&[vec![(0, 3), (1, 2)], vec![(1, 4), (0, 1)]])
    }

    #[test]
    fn test_valid_problem() {
        assert!(validate_problem(&sample_problem()).is_ok());
    }

    #[test]
    fn test_invalid_machine() {
        let p = JobShopProblem::with_machines(1, vec![vec![Operation::new(3, 1)]]);
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidMachine));
    }

    #[test]
    fn test_negative_duration() {
        let p = JobShopProblem::from_pairs(&[vec![(0, -2)]]);
        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeDuration));
    }

    #[test]
    fn test_multiple_problem_errors() {
        let p = JobShopProblem::with_machines(1, vec![vec![], vec![Operation::new(2, -1)]]);
        let errors = validate_problem(&p).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_valid_solution() {
        let s = JobShopSolution::from_pairs(vec![vec![(0, 3), (4, 6)], vec![(0, 4), (4, 5)]]);
        assert!(validate_solution(&sample_problem(), &s).is_ok());
    }

    #[test]
    fn test_shape_mismatch() {
        let s = JobShopSolution::from_pairs(vec![vec![(0, 3)], vec![(0, 4), (4, 5)]]);
        let errors = validate_solution(&sample_problem(), &s).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ShapeMismatch);

        let s = JobShopSolution::from_pairs(vec![vec![(0, 3), (4, 6)]]);
        assert!(validate_solution(&sample_problem(), &s).is_err());
    }

    #[test]
    fn test_duration_and_precedence_violation() {
        // (0,1) starts at 2 before (0,0) ends at 3, and runs 3 instead of 2
        let s = JobShopSolution::from_pairs(vec![vec![(0, 3), (2, 5)], vec![(0, 4), (5, 6)]]);
        let errors = validate_solution(&sample_problem(), &s).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::PrecedenceViolation));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DurationMismatch));
    }

    #[test]
    fn test_machine_overlap() {
        // M0 runs (0,0) in [0,3) and (1,1) in [2,3)
        let s = JobShopSolution::from_pairs(vec![vec![(0, 3), (4, 6)], vec![(0, 4), (2, 3)]]);
        let errors = validate_solution(&sample_problem(), &s).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MachineOverlap));
    }

    #[test]
    fn test_negative_start() {
        let p = JobShopProblem::from_pairs(&[vec![(0, 2)]]);
        let s = JobShopSolution::from_pairs(vec![vec![(-1, 1)]]);
        let errors = validate_solution(&p, &s).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeStart);
    }
}
