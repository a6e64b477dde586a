//! Next-task DP model.
//!
//! ```text
//! dp[l_1.., t, m_1.., j_1..] := minimum makespan reachable when job k's
//!     next operation is at position l_k
//!
//! dp[l, t, ..] = min over jobs i with l_i < len(i) of
//!                    (t' - t) + dp[.., l_i + 1, .., t', .., m'_p, .., j'_i, ..]
//! dp[len(1).., ..] = 0
//! ```
//!
//! Since operations of a job run in a fixed order, one pointer per job
//! replaces the finished set, which keeps states small and makes the
//! precondition a single comparison.

use rpid::{Bound, Dominance, Dp};

use super::{remaining_cost_bound, Cost, SubtaskTable};

/// State of the next-task model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextTaskState {
    /// Position of the next unscheduled operation per job.
    pub next: Vec<usize>,
    /// Completion time of the last sub-task per machine.
    pub machine_time: Vec<Cost>,
    /// Completion time of the last sub-task per job.
    pub job_time: Vec<Cost>,
    /// Current makespan.
    pub total: Cost,
}

/// DP model tracking a next-operation pointer per job.
#[derive(Debug, Clone)]
pub struct NextTaskModel {
    table: SubtaskTable,
    primal_bound: Option<Cost>,
    use_dual_bound: bool,
}

impl NextTaskModel {
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

    /// Sub-task a job would schedule next, if it has any left.
    pub fn next_task(&self, state: &NextTaskState, job: usize) -> Option<usize> {
        self.table.index(job, state.next[job])
    }

    /// Schedules the next operation of `job`.
    pub fn apply(&self, state: &NextTaskState, job: usize, task: usize) -> NextTaskState {
        let machine = self.table.machine(task);
        let end = self
            .table
            .end_time(task, state.machine_time[machine], state.job_time[job]);

        let mut successor = state.clone();
        successor.next[job] += 1;
        successor.machine_time[machine] = end;
        successor.job_time[job] = end;
        successor.total = state.total.max(end);
        successor
    }
}

impl Dp for NextTaskModel {
    type State = NextTaskState;
    type CostType = Cost;
    type Label = usize;

    fn get_target(&self) -> Self::State {
        NextTaskState {
            next: vec![0; self.table.n_jobs()],
            machine_time: vec![0; self.table.n_machines()],
            job_time: vec![0; self.table.n_jobs()],
            total: 0,
        }
    }

    fn get_successors(
        &self,
        state: &Self::State,
    ) -> impl IntoIterator<Item = (Self::State, Self::CostType, Self::Label)> {
        (0..self.table.n_jobs()).filter_map(move |job| {
            let task = self.next_task(state, job)?;
            let successor = self.apply(state, job, task);
            if self.primal_bound.is_some_and(|bound| successor.total > bound) {
                return None;
            }
            let weight = successor.total - state.total;
            Some((successor, weight, task))
        })
    }

    fn get_base_cost(&self, state: &Self::State) -> Option<Self::CostType> {
        let finished = state
            .next
            .iter()
            .enumerate()
            .all(|(job, &position)| position >= self.table.job_len(job));
        finished.then_some(0)
    }
}

impl Dominance for NextTaskModel {
    type State = NextTaskState;
    type Key = (Vec<usize>, Vec<Cost>, Vec<Cost>);

    fn get_key(&self, state: &Self::State) -> Self::Key {
        (
            state.next.clone(),
            state.machine_time.clone(),
            state.job_time.clone(),
        )
    }
}

impl Bound for NextTaskModel {
    type State = NextTaskState;
    type CostType = Cost;

    fn get_dual_bound(&self, state: &Self::State) -> Option<Self::CostType> {
        if !self.use_dual_bound {
            return Some(0);
        }
        Some(remaining_cost_bound(
            &self.table,
            &state.next,
            &state.machine_time,
            &state.job_time,
            state.total,
        ))
    }
}
