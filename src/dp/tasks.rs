//! Sub-task enumeration shared by the DP models.
//!
//! Every operation of the instance becomes one sub-task with a dense
//! index. Indices are assigned round-robin by position: first operation
//! of every job, then the second operation of every job that has one, and
//! so on. A transition label is simply such an index.

use crate::error::{Error, Result};
use crate::models::JobShopProblem;
use crate::validation::validate_problem;

use super::Cost;

/// Dense, index-addressed view of an instance's operations.
#[derive(Debug, Clone)]
pub struct SubtaskTable {
    n_machines: usize,
    /// `(job, position)` per sub-task index.
    jobs: Vec<(usize, usize)>,
    machines: Vec<usize>,
    durations: Vec<Cost>,
    /// `index[job][position]` -> sub-task index.
    index: Vec<Vec<usize>>,
    /// `tails[job][p]`: summed duration of positions `p..` of the job.
    tails: Vec<Vec<Cost>>,
}

impl SubtaskTable {
    /// Enumerates the sub-tasks of a validated instance.
    ///
    /// # Errors
    /// - [`Error::InvalidProblem`] if the instance fails validation
    /// - [`Error::HorizonOverflow`] if the summed processing time does not
    ///   fit the DP cost type
    pub fn new(problem: &JobShopProblem) -> Result<Self> {
        validate_problem(problem).map_err(Error::InvalidProblem)?;

        let horizon = problem.checked_horizon().ok_or(Error::HorizonOverflow {
            horizon: i64::MAX,
        })?;
        if Cost::try_from(horizon).is_err() {
            return Err(Error::HorizonOverflow { horizon });
        }

        let n = problem.n_operations();
        let mut jobs = Vec::with_capacity(n);
        let mut machines = Vec::with_capacity(n);
        let mut durations = Vec::with_capacity(n);
        let mut index: Vec<Vec<usize>> = problem
            .jobs
            .iter()
            .map(|ops| Vec::with_capacity(ops.len()))
            .collect();

        let mut position = 0;
        while jobs.len() < n {
            for (j, ops) in problem.jobs.iter().enumerate() {
                if let Some(op) = ops.get(position) {
                    index[j].push(jobs.len());
                    jobs.push((j, position));
                    machines.push(op.machine_id);
                    // fits: bounded by the horizon checked above
                    durations.push(op.processing_time as Cost);
                }
            }
            position += 1;
        }

        let tails = problem
            .jobs
            .iter()
            .map(|ops| {
                let mut tail = vec![0; ops.len() + 1];
                for p in (0..ops.len()).rev() {
                    tail[p] = tail[p + 1] + ops[p].processing_time as Cost;
                }
                tail
            })
            .collect();

        Ok(Self {
            n_machines: problem.n_machines(),
            jobs,
            machines,
            durations,
            index,
            tails,
        })
    }

    /// Number of sub-tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the instance has no operations at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    #[inline]
    pub fn n_jobs(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn n_machines(&self) -> usize {
        self.n_machines
    }

    /// Number of operations of one job.
    #[inline]
    pub fn job_len(&self, job: usize) -> usize {
        self.index[job].len()
    }

    /// `(job, position)` of a sub-task.
    #[inline]
    pub fn job_of(&self, task: usize) -> (usize, usize) {
        self.jobs[task]
    }

    #[inline]
    pub fn machine(&self, task: usize) -> usize {
        self.machines[task]
    }

    #[inline]
    pub fn duration(&self, task: usize) -> Cost {
        self.durations[task]
    }

    /// Sub-task index of `(job, position)`, if it exists.
    pub fn index(&self, job: usize, position: usize) -> Option<usize> {
        self.index.get(job)?.get(position).copied()
    }

    /// Sub-task that must be finished before `task` may start.
    ///
    /// In a job shop this is the previous operation of the job, if any.
    pub fn predecessor(&self, task: usize) -> Option<usize> {
        let (job, position) = self.jobs[task];
        position.checked_sub(1).map(|p| self.index[job][p])
    }

    /// Remaining work of `job` from `position` on.
    #[inline]
    pub fn tail(&self, job: usize, position: usize) -> Cost {
        self.tails[job][position]
    }

    /// Time at which `task` would end if dispatched now.
    ///
    /// `end = max(machine_time + d, job_time + d)`: the operation waits for
    /// both its machine and its job predecessor.
    #[inline]
    pub fn end_time(&self, task: usize, machine_time: Cost, job_time: Cost) -> Cost {
        machine_time.max(job_time) + self.durations[task]
    }
}
