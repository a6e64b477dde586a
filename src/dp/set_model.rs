//! Finished-set DP model.
//!
//! ```text
//! dp[U, t, m_1.., j_1..] := minimum makespan reachable from a state with
//!     unscheduled sub-tasks U, makespan t, machine times m_k, job times j_k
//!
//! dp[U, t, ..] = min over i in U with pred(i) not in U of
//!                    (t' - t) + dp[U \ {i}, t', .., m'_p, .., j'_j, ..]
//! dp[{}, ..]   = 0
//! ```
//!
//! The finished set is stored as a bitset; the unfinished set is its
//! complement.

use fixedbitset::FixedBitSet;
use rpid::{Bound, Dominance, Dp};

use super::{remaining_cost_bound, Cost, SubtaskTable};

/// State of the finished-set model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedSetState {
    /// Finished sub-tasks.
    pub done: FixedBitSet,
    /// Completion time of the last sub-task per machine.
    pub machine_time: Vec<Cost>,
    /// Completion time of the last sub-task per job.
    pub job_time: Vec<Cost>,
    /// Current makespan.
    pub total: Cost,
}

impl FinishedSetState {
    /// Sub-tasks not yet finished.
    pub fn undone(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.done.len()).filter(move |&i| !self.done.contains(i))
    }
}

/// DP model tracking the set of finished sub-tasks.
#[derive(Debug, Clone)]
pub struct FinishedSetModel {
    table: SubtaskTable,
    primal_bound: Option<Cost>,
    use_dual_bound: bool,
}

impl FinishedSetModel {
    /// Creates the model over an enumerated instance.
    pub fn new(table: SubtaskTable) -> Self {
        Self {
            table,
            primal_bound: None,
            use_dual_bound: true,
        }
    }

    /// Drops successors whose makespan already exceeds `bound`.
    pub fn with_primal_bound(mut self, bound: Option<Cost>) -> Self {
        self.primal_bound = bound;
        self
    }

    /// Enables or disables the remaining-work dual bound.
    pub fn with_dual_bound(mut self, enabled: bool) -> Self {
        self.use_dual_bound = enabled;
        self
    }

    pub fn table(&self) -> &SubtaskTable {
        &self.table
    }

    /// Whether `sched_task` is applicable: the sub-task is unfinished and
    /// its job predecessor is finished.
    pub fn is_applicable(&self, state: &FinishedSetState, task: usize) -> bool {
        !state.done.contains(task)
            && self
                .table
                .predecessor(task)
                .map_or(true, |pred| state.done.contains(pred))
    }

    /// Applies `sched_task`, returning the successor state.
    pub fn apply(&self, state: &FinishedSetState, task: usize) -> FinishedSetState {
        let (job, _) = self.table.job_of(task);
        let machine = self.table.machine(task);
        let end = self
            .table
            .end_time(task, state.machine_time[machine], state.job_time[job]);

        let mut successor = state.clone();
        successor.done.insert(task);
        successor.machine_time[machine] = end;
        successor.job_time[job] = end;
        successor.total = state.total.max(end);
        successor
    }

    /// Next position per job, derived from the finished set.
    ///
    /// Finished sub-tasks of a job always form a prefix of it.
    fn next_positions(&self, state: &FinishedSetState) -> Vec<usize> {
        (0..self.table.n_jobs())
            .map(|job| {
                (0..self.table.job_len(job))
                    .take_while(|&p| {
                        self.table
                            .index(job, p)
                            .is_some_and(|task| state.done.contains(task))
                    })
                    .count()
            })
            .collect()
    }
}

impl Dp for FinishedSetModel {
    type State = FinishedSetState;
    type CostType = Cost;
    type Label = usize;

    fn get_target(&self) -> Self::State {
        FinishedSetState {
            done: FixedBitSet::with_capacity(self.table.len()),
            machine_time: vec![0; self.table.n_machines()],
            job_time: vec![0; self.table.n_jobs()],
            total: 0,
        }
    }

    fn get_successors(
        &self,
        state: &Self::State,
    ) -> impl IntoIterator<Item = (Self::State, Self::CostType, Self::Label)> {
        (0..self.table.len())
            .filter(move |&task| self.is_applicable(state, task))
            .filter_map(move |task| {
                let successor = self.apply(state, task);
                if self.primal_bound.is_some_and(|bound| successor.total > bound) {
                    return None;
                }
                let weight = successor.total - state.total;
                Some((successor, weight, task))
            })
    }

    fn get_base_cost(&self, state: &Self::State) -> Option<Self::CostType> {
        if state.done.count_ones(..) == self.table.len() {
            Some(0)
        } else {
            None
        }
    }
}

impl Dominance for FinishedSetModel {
    type State = FinishedSetState;
    type Key = (FixedBitSet, Vec<Cost>, Vec<Cost>);

    fn get_key(&self, state: &Self::State) -> Self::Key {
        (
            state.done.clone(),
            state.machine_time.clone(),
            state.job_time.clone(),
        )
    }
}

impl Bound for FinishedSetModel {
    type State = FinishedSetState;
    type CostType = Cost;

    fn get_dual_bound(&self, state: &Self::State) -> Option<Self::CostType> {
        if !self.use_dual_bound {
            return Some(0);
        }
        let next = self.next_positions(state);
        Some(remaining_cost_bound(
            &self.table,
            &next,
            &state.machine_time,
            &state.job_time,
            state.total,
        ))
    }
}
