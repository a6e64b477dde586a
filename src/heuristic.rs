//! Greedy list scheduling.
//!
//! Builds a feasible schedule quickly, typically to seed the DP search as
//! a warm start.
//!
//! # Algorithm
//!
//! 1. Candidates are the next unscheduled operation of every job.
//! 2. Pick the candidate that can start earliest.
//! 3. Break ties with a dispatching rule, then by job index.
//! 4. Repeat until every operation is scheduled.
//!
//! # Complexity
//! O(n * j) where n=operations, j=jobs.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{JobShopProblem, JobShopSolution, ScheduledOperation};
use crate::validation::validate_problem;

/// Tie-breaking rule among operations with the same earliest start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchRule {
    /// Shortest Processing Time of the operation.
    #[default]
    Spt,
    /// Longest Processing Time of the operation.
    Lpt,
    /// Most Work Remaining in the job, including the operation.
    MostWorkRemaining,
    /// Lowest job index.
    FirstJob,
}

impl DispatchRule {
    /// Rule name (e.g., "SPT").
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spt => "SPT",
            Self::Lpt => "LPT",
            Self::MostWorkRemaining => "MWKR",
            Self::FirstJob => "FIRST",
        }
    }

    /// Sort key; smaller is dispatched first.
    fn key(&self, processing_time: i64, remaining_work: i64) -> i64 {
        match self {
            Self::Spt => processing_time,
            Self::Lpt => -processing_time,
            Self::MostWorkRemaining => -remaining_work,
            Self::FirstJob => 0,
        }
    }
}

/// Schedules every operation greedily at its earliest possible start.
///
/// # Errors
/// - [`Error::InvalidProblem`] if the instance fails validation
/// - [`Error::HorizonOverflow`] if the summed processing time overflows `i64`
///
/// # Example
/// ```
/// use u_jobshop_dp::heuristic::{greedy_schedule, DispatchRule};
/// use u_jobshop_dp::models::JobShopProblem;
///
/// let problem = JobShopProblem::from_pairs(&[vec![(0, 3), (1, 2)], vec![(1, 4), (0, 1)]]);
/// let solution = greedy_schedule(&problem, DispatchRule::Spt).unwrap();
/// assert!(solution.makespan() >= problem.lower_bound());
/// ```
pub fn greedy_schedule(problem: &JobShopProblem, rule: DispatchRule) -> Result<JobShopSolution> {
    validate_problem(problem).map_err(Error::InvalidProblem)?;
    if problem.checked_horizon().is_none() {
        return Err(Error::HorizonOverflow { horizon: i64::MAX });
    }

    let n_jobs = problem.n_jobs();
    let mut next = vec![0usize; n_jobs];
    let mut job_end = vec![0i64; n_jobs];
    let mut remaining: Vec<i64> = (0..n_jobs).map(|j| problem.job_length(j)).collect();
    let mut machine_end = vec![0i64; problem.n_machines()];
    let mut schedule: Vec<Vec<ScheduledOperation>> = problem
        .jobs
        .iter()
        .map(|ops| Vec::with_capacity(ops.len()))
        .collect();

    for _ in 0..problem.n_operations() {
        let chosen = (0..n_jobs)
            .filter_map(|j| problem.operation(j, next[j]).map(|op| (j, op)))
            .min_by_key(|&(j, op)| {
                let start = machine_end[op.machine_id].max(job_end[j]);
                (start, rule.key(op.processing_time, remaining[j]), j)
            });
        let Some((job, op)) = chosen else {
            break;
        };

        let start = machine_end[op.machine_id].max(job_end[job]);
        let end = start + op.processing_time;
        schedule[job].push(ScheduledOperation::new(start, end));
        machine_end[op.machine_id] = end;
        job_end[job] = end;
        remaining[job] -= op.processing_time;
        next[job] += 1;
    }

    let solution = JobShopSolution::new(schedule);
    debug!(
        "greedy {} schedule: makespan {}",
        rule.name(),
        solution.makespan()
    );
    Ok(solution)
}
