//! Job-shop problem model.
//!
//! A job-shop instance is a set of jobs, each an ordered chain of
//! operations. Every operation runs on one designated machine for a fixed
//! processing time; a machine processes at most one operation at a time.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 7

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single operation (sub-job) of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Machine the operation must run on (0-based).
    pub machine_id: usize,
    /// Processing time in time units.
    pub processing_time: i64,
}

impl Operation {
    /// Creates a new operation.
    pub fn new(machine_id: usize, processing_time: i64) -> Self {
        Self {
            machine_id,
            processing_time,
        }
    }
}

/// A job-shop scheduling instance.
///
/// `jobs[j][p]` is the `p`-th operation of job `j`. Operations of a job
/// must run in order; operations sharing a machine must not overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobShopProblem {
    /// Number of machines. Machine ids are `0..n_machines`.
    pub n_machines: usize,
    /// Operations per job, in processing order.
    pub jobs: Vec<Vec<Operation>>,
}

impl JobShopProblem {
    /// Creates a problem, inferring the machine count from the operations.
    pub fn new(jobs: Vec<Vec<Operation>>) -> Self {
        let n_machines = jobs
            .iter()
            .flatten()
            .map(|op| op.machine_id + 1)
            .max()
            .unwrap_or(0);
        Self { n_machines, jobs }
    }

    /// Creates a problem with an explicit machine count.
    ///
    /// Machines without operations are allowed.
    pub fn with_machines(n_machines: usize, jobs: Vec<Vec<Operation>>) -> Self {
        Self { n_machines, jobs }
    }

    /// Builds a problem from `(machine, processing_time)` pairs per job.
    pub fn from_pairs(jobs: &[Vec<(usize, i64)>]) -> Self {
        Self::new(
            jobs.iter()
                .map(|job| job.iter().map(|&(m, p)| Operation::new(m, p)).collect())
                .collect(),
        )
    }

    /// Generates a Taillard-style random instance.
    ///
    /// Every job visits every machine exactly once in a random order;
    /// processing times are uniform in `1..=max_duration`.
    pub fn random<R: Rng>(n_jobs: usize, n_machines: usize, max_duration: i64, rng: &mut R) -> Self {
        let max_duration = max_duration.max(1);
        let jobs = (0..n_jobs)
            .map(|_| {
                let mut route: Vec<usize> = (0..n_machines).collect();
                route.shuffle(rng);
                route
                    .into_iter()
                    .map(|m| Operation::new(m, rng.random_range(1..=max_duration)))
                    .collect()
            })
            .collect();
        Self::with_machines(n_machines, jobs)
    }

    /// Number of jobs.
    #[inline]
    pub fn n_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Number of machines.
    #[inline]
    pub fn n_machines(&self) -> usize {
        self.n_machines
    }

    /// Total number of operations across all jobs.
    pub fn n_operations(&self) -> usize {
        self.jobs.iter().map(Vec::len).sum()
    }

    /// Operation at `position` of `job`, if any.
    pub fn operation(&self, job: usize, position: usize) -> Option<&Operation> {
        self.jobs.get(job).and_then(|ops| ops.get(position))
    }

    /// Sum of all processing times. Running everything back to back
    /// never exceeds this, so it bounds the optimal makespan from above.
    ///
    /// Saturates at `i64::MAX`; see [`checked_horizon`](Self::checked_horizon).
    pub fn horizon(&self) -> i64 {
        self.checked_horizon().unwrap_or(i64::MAX)
    }

    /// Sum of all processing times, or `None` if it overflows `i64`.
    pub fn checked_horizon(&self) -> Option<i64> {
        self.jobs
            .iter()
            .flatten()
            .try_fold(0i64, |acc, op| acc.checked_add(op.processing_time))
    }

    /// Total processing time of one job, saturating at `i64::MAX`.
    pub fn job_length(&self, job: usize) -> i64 {
        self.jobs
            .get(job)
            .map(|ops| {
                ops.iter()
                    .fold(0i64, |acc, op| acc.saturating_add(op.processing_time))
            })
            .unwrap_or(0)
    }

    /// Total processing time assigned to one machine, saturating at
    /// `i64::MAX`.
    pub fn machine_load(&self, machine: usize) -> i64 {
        self.jobs
            .iter()
            .flatten()
            .filter(|op| op.machine_id == machine)
            .fold(0i64, |acc, op| acc.saturating_add(op.processing_time))
    }

    /// Trivial makespan lower bound: longest job or busiest machine.
    pub fn lower_bound(&self) -> i64 {
        let job_bound = (0..self.n_jobs()).map(|j| self.job_length(j)).max().unwrap_or(0);
        let machine_bound = (0..self.n_machines)
            .map(|m| self.machine_load(m))
            .max()
            .unwrap_or(0);
        job_bound.max(machine_bound)
    }
}
