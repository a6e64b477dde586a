//! Job-shop solution model.
//!
//! A solution fixes a start and end time for every operation. Machine
//! assignment is implied by the problem (each operation has exactly one
//! machine), so the schedule is indexed by job and position only.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7

use serde::{Deserialize, Serialize};

use super::JobShopProblem;

/// Time window of one scheduled operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledOperation {
    /// Start time.
    pub start: i64,
    /// End time (exclusive).
    pub end: i64,
}

impl ScheduledOperation {
    /// Creates a scheduled operation.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Length of the window.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// A complete job-shop schedule.
///
/// `schedule[j][p]` holds the window of operation `p` of job `j`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobShopSolution {
    /// Windows per job, per position.
    pub schedule: Vec<Vec<ScheduledOperation>>,
}

impl JobShopSolution {
    /// Creates a solution from windows per job.
    pub fn new(schedule: Vec<Vec<ScheduledOperation>>) -> Self {
        Self { schedule }
    }

    /// Creates a solution from `(start, end)` tuples per job.
    pub fn from_pairs(schedule: Vec<Vec<(i64, i64)>>) -> Self {
        Self::new(
            schedule
                .into_iter()
                .map(|job| {
                    job.into_iter()
                        .map(|(s, e)| ScheduledOperation::new(s, e))
                        .collect()
                })
                .collect(),
        )
    }

    /// Window of one operation.
    pub fn get(&self, job: usize, position: usize) -> Option<&ScheduledOperation> {
        self.schedule.get(job).and_then(|ops| ops.get(position))
    }

    /// Makespan: latest end time across all operations (0 when empty).
    pub fn makespan(&self) -> i64 {
        self.schedule
            .iter()
            .flatten()
            .map(|w| w.end)
            .max()
            .unwrap_or(0)
    }

    /// Completion time of a job (end of its last operation).
    pub fn job_completion(&self, job: usize) -> Option<i64> {
        self.schedule.get(job)?.iter().map(|w| w.end).max()
    }

    /// Operations processed on `machine`, as `(job, position)` pairs
    /// ordered by start time.
    pub fn machine_sequence(&self, problem: &JobShopProblem, machine: usize) -> Vec<(usize, usize)> {
        let mut ops: Vec<(i64, i64, usize, usize)> = Vec::new();
        for (j, job) in problem.jobs.iter().enumerate() {
            for (p, op) in job.iter().enumerate() {
                if op.machine_id != machine {
                    continue;
                }
                if let Some(w) = self.get(j, p) {
                    ops.push((w.start, w.end, j, p));
                }
            }
        }
        ops.sort_unstable();
        ops.into_iter().map(|(_, _, j, p)| (j, p)).collect()
    }

    /// Busy fraction of a machine over the makespan.
    ///
    /// Returns `None` if the makespan is zero.
    pub fn machine_utilization(&self, problem: &JobShopProblem, machine: usize) -> Option<f64> {
        let makespan = self.makespan();
        if makespan <= 0 {
            return None;
        }
        let busy: i64 = self
            .machine_sequence(problem, machine)
            .into_iter()
            .filter_map(|(j, p)| self.get(j, p))
            .map(ScheduledOperation::duration)
            .sum();
        Some(busy as f64 / makespan as f64)
    }
}
