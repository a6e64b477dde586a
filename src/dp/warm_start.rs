//! Warm-start ordering.
//!
//! A known schedule becomes a transition sequence by dispatching its
//! operations in order of start time. Replaying that sequence gives the
//! semi-active version of the schedule, which is never longer.

use crate::error::{Error, Result};
use crate::models::JobShopSolution;

use super::SubtaskTable;

/// Orders the sub-tasks of `solution` by `(start, end)`.
///
/// The sort is stable, so ties keep enumeration order. A job predecessor
/// always has a smaller index than its successor, which keeps
/// zero-duration operations in job order.
///
/// # Errors
/// [`Error::InvalidWarmStart`] if the solution's shape differs from the
/// instance.
pub fn warm_start_transitions(table: &SubtaskTable, solution: &JobShopSolution) -> Result<Vec<usize>> {
    if solution.schedule.len() != table.n_jobs() {
        return Err(Error::InvalidWarmStart(format!(
            "solution has {} jobs, problem has {}",
            solution.schedule.len(),
            table.n_jobs()
        )));
    }
    for (job, windows) in solution.schedule.iter().enumerate() {
        if windows.len() != table.job_len(job) {
            return Err(Error::InvalidWarmStart(format!(
                "job {job} has {} windows for {} operations",
                windows.len(),
                table.job_len(job)
            )));
        }
    }

    let mut flattened: Vec<(usize, i64, i64)> = (0..table.len())
        .map(|task| {
            let (job, position) = table.job_of(task);
            let window = solution.schedule[job][position];
            (task, window.start, window.end)
        })
        .collect();
    flattened.sort_by_key(|&(_, start, end)| (start, end));

    Ok(flattened.into_iter().map(|(task, _, _)| task).collect())
}
