//! Dynamic-programming formulations of the job-shop problem.
//!
//! The models here only *describe* the DP: target state, transitions with
//! their weights, base cases, dominance keys and dual bounds. Searching the
//! state space is left to the `rpid` solvers.
//!
//! Both models share the same recurrence. Scheduling sub-task `i` of job
//! `j` on machine `m` with duration `d` from a state with machine times
//! `M`, job times `J` and makespan `t` gives
//!
//! ```text
//! end  = max(M[m] + d, J[j] + d)
//! M[m] = J[j] = end
//! t'   = max(t, end)
//! cost = t' - t
//! ```
//!
//! so the accumulated path cost of any state equals its current makespan.
//! They differ in how progress is tracked:
//!
//! | Model | Progress | Transition precondition |
//! |-------|----------|-------------------------|
//! | [`FinishedSetModel`] | set of finished sub-tasks | undone, predecessor done |
//! | [`NextTaskModel`] | next position per job | sub-task is the job's next |
//!
//! # Reference
//! Kuroiwa & Beck (2023), "Domain-Independent Dynamic Programming"

mod decode;
mod pointer_model;
mod set_model;
mod tasks;
mod warm_start;

use serde::{Deserialize, Serialize};

pub use decode::retrieve_solution;
pub use pointer_model::{NextTaskModel, NextTaskState};
pub use set_model::{FinishedSetModel, FinishedSetState};
pub use tasks::SubtaskTable;
pub use warm_start::warm_start_transitions;

/// Cost (time) type of the DP models.
pub type Cost = i32;

/// Which DP formulation to search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DpModelKind {
    /// Finished-task set plus machine and job completion times.
    #[default]
    FinishedSet,
    /// Next-task pointer per job plus machine and job completion times.
    NextTask,
}

/// Lower bound on the cost still to pay from a state.
///
/// The final makespan is at least `job_time[j] + remaining work of j` for
/// every job and `machine_time[m] + remaining work on m` for every machine;
/// the cost-to-go is that minus the makespan already paid.
pub(crate) fn remaining_cost_bound(
    table: &SubtaskTable,
    next: &[usize],
    machine_time: &[Cost],
    job_time: &[Cost],
    total: Cost,
) -> Cost {
    let mut machine_end = machine_time.to_vec();
    let mut bound = total;
    for (job, &position) in next.iter().enumerate() {
        bound = bound.max(job_time[job] + table.tail(job, position));
        for task in (position..table.job_len(job)).filter_map(|p| table.index(job, p)) {
            machine_end[table.machine(task)] += table.duration(task);
        }
    }
    let bound = machine_end.into_iter().fold(bound, Cost::max);
    bound - total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobShopProblem;

    #[test]
    fn test_bound_at_target_is_lower_bound() {
        let p = JobShopProblem::from_pairs(&[vec![(0, 3), (1, 2)], vec![(1, 4), (0, 1)]]);
        let t = SubtaskTable::new(&p).unwrap();
        let bound = remaining_cost_bound(&t, &[0, 0], &[0, 0], &[0, 0], 0);
        assert_eq!(i64::from(bound), p.lower_bound());
    }

    #[test]
    fn test_bound_never_negative() {
        let p = JobShopProblem::from_pairs(&[vec![(0, 3)], vec![(1, 4)]]);
        let t = SubtaskTable::new(&p).unwrap();
        // everything done, makespan already 9
        assert_eq!(remaining_cost_bound(&t, &[1, 1], &[3, 9], &[3, 9], 9), 0);
        // job 1 can finish no earlier than 2 + 4
        assert_eq!(remaining_cost_bound(&t, &[1, 0], &[3, 2], &[3, 2], 3), 3);
    }

    #[test]
    fn test_model_kind_serde() {
        let kind: DpModelKind = serde_json::from_str("\"next_task\"").unwrap();
        assert_eq!(kind, DpModelKind::NextTask);
        assert_eq!(DpModelKind::default(), DpModelKind::FinishedSet);
    }
}
