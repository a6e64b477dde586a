//! Schedule retrieval from a transition sequence.

use fixedbitset::FixedBitSet;
use log::trace;

use crate::error::{Error, Result};
use crate::models::{JobShopSolution, ScheduledOperation};

use super::SubtaskTable;

/// Replays a sequence of `sched_i` transitions into a schedule.
///
/// Each sub-task starts as soon as both its machine and its job
/// predecessor are free, which yields the semi-active schedule induced by
/// the dispatch order. The replay does not need the DP state: the times it
/// tracks are exactly the machine and job completion times of the models.
///
/// # Errors
/// - [`Error::InvalidTransition`] for an unknown or repeated sub-task, or
///   one whose predecessor has not been scheduled yet
/// - [`Error::IncompleteSequence`] if some sub-task never appears
pub fn retrieve_solution(table: &SubtaskTable, transitions: &[usize]) -> Result<JobShopSolution> {
    let mut scheduled = FixedBitSet::with_capacity(table.len());
    let mut machine_end: Vec<i64> = vec![0; table.n_machines()];
    let mut windows: Vec<Vec<ScheduledOperation>> = (0..table.n_jobs())
        .map(|job| vec![ScheduledOperation::new(0, 0); table.job_len(job)])
        .collect();

    for (step, &task) in transitions.iter().enumerate() {
        if task >= table.len() {
            return Err(Error::InvalidTransition {
                step,
                reason: format!("unknown sub-task {task}"),
            });
        }
        if scheduled.contains(task) {
            return Err(Error::InvalidTransition {
                step,
                reason: format!("sub-task {task} scheduled twice"),
            });
        }

        let (job, position) = table.job_of(task);
        let job_ready = match table.predecessor(task) {
            Some(pred) if !scheduled.contains(pred) => {
                return Err(Error::InvalidTransition {
                    step,
                    reason: format!(
                        "sub-task {task} ({job}, {position}) precedes its predecessor {pred}"
                    ),
                });
            }
            Some(_) => windows[job][position - 1].end,
            None => 0,
        };

        let machine = table.machine(task);
        let start = machine_end[machine].max(job_ready);
        let end = start + i64::from(table.duration(task));
        trace!("step {step}: sub-task {task} ({job}, {position}) on M{machine} [{start}, {end})");

        machine_end[machine] = end;
        windows[job][position] = ScheduledOperation::new(start, end);
        scheduled.insert(task);
    }

    let count = scheduled.count_ones(..);
    if count != table.len() {
        return Err(Error::IncompleteSequence {
            scheduled: count,
            expected: table.len(),
        });
    }

    Ok(JobShopSolution::new(windows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobShopProblem;
    use crate::validation::validate_solution;

    fn sample() -> (JobShopProblem, SubtaskTable) {
        // enumeration: 0=(0,0) M0 d3, 1=(1,0) M1 d4, 2=(0,1) M1 d2, 3=(1,1) M0 d1
        let p = JobShopProblem::from_pairs(&[vec![(0, 3), (1, 2)], vec![(1, 4), (0, 1)]]);
        let t = SubtaskTable::new(&p).unwrap();
        (p, t)
    }

    #[test]
    fn test_retrieve_semi_active_schedule() {
        let (p, t) = sample();
        let s = retrieve_solution(&t, &[0, 1, 2, 3]).unwrap();
        assert_eq!(
            s,
            JobShopSolution::from_pairs(vec![vec![(0, 3), (4, 6)], vec![(0, 4), (4, 5)]])
        );
        assert_eq!(s.makespan(), 6);
        assert!(validate_solution(&p, &s).is_ok());
    }

    #[test]
    fn test_order_changes_machine_sequence() {
        let (p, t) = sample();
        // (0,1) grabs M1 before (1,0)
        let s = retrieve_solution(&t, &[0, 2, 1, 3]).unwrap();
        assert_eq!(s.get(0, 1), Some(&ScheduledOperation::new(3, 5)));
        assert_eq!(s.get(1, 0), Some(&ScheduledOperation::new(5, 9)));
        assert_eq!(s.makespan(), 10);
        assert!(validate_solution(&p, &s).is_ok());
    }

    #[test]
    fn test_unknown_task() {
        let (_, t) = sample();
        let err = retrieve_solution(&t, &[0, 9]).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { step: 1, .. }));
    }

    #[test]
    fn test_repeated_task() {
        let (_, t) = sample();
        let err = retrieve_solution(&t, &[0, 0]).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { step: 1, .. }));
    }

    #[test]
    fn test_predecessor_not_scheduled() {
        let (_, t) = sample();
        let err = retrieve_solution(&t, &[2]).unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { step: 0, .. }));
    }

    #[test]
    fn test_incomplete_sequence() {
        let (_, t) = sample();
        let err = retrieve_solution(&t, &[0, 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::IncompleteSequence {
                scheduled: 2,
                expected: 4
            }
        ));
    }

    #[test]
    fn test_empty_problem() {
        let t = SubtaskTable::new(&JobShopProblem::new(vec![])).unwrap();
        let s = retrieve_solution(&t, &[]).unwrap();
        assert_eq!(s.makespan(), 0);
    }
}
