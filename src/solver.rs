//! DP solver front-end.
//!
//! Builds the configured DP model, runs the `rpid` CABS search and turns
//! the resulting transition sequence back into a schedule.
//!
//! # Example
//! ```no_run
//! use u_jobshop_dp::config::DpSolverConfig;
//! use u_jobshop_dp::heuristic::{greedy_schedule, DispatchRule};
//! use u_jobshop_dp::parser::parse_jsp_file;
//! use u_jobshop_dp::solver::DpJspSolver;
//!
//! let problem = parse_jsp_file("ft10.txt").unwrap();
//! let config = DpSolverConfig::default().with_time_limit(60.0);
//! let mut solver = DpJspSolver::new(problem.clone(), config).unwrap();
//! solver
//!     .set_warm_start(&greedy_schedule(&problem, DispatchRule::MostWorkRemaining).unwrap())
//!     .unwrap();
//! let result = solver.solve().unwrap();
//! println!("{:?} makespan {:?}", result.status, result.makespan);
//! ```

use log::{debug, info};
use rpid::solvers::{self, CabsParameters, Search, SearchParameters};
use serde::{Deserialize, Serialize};

use crate::config::DpSolverConfig;
use crate::dp::{
    retrieve_solution, warm_start_transitions, Cost, DpModelKind, FinishedSetModel,
    NextTaskModel, SubtaskTable,
};
use crate::error::{Error, Result};
use crate::models::{JobShopProblem, JobShopSolution};

/// Outcome classification of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// The returned schedule is proven optimal.
    Optimal,
    /// A schedule was found but not proven optimal.
    Feasible,
    /// The search proved that no schedule exists.
    Infeasible,
    /// The search stopped before finding any schedule.
    Unknown,
}

/// Result of [`DpJspSolver::solve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpSolveResult {
    /// Best schedule found, if any.
    pub solution: Option<JobShopSolution>,
    /// Makespan of `solution`.
    pub makespan: Option<i64>,
    /// Best proven lower bound on the optimal makespan.
    pub best_bound: Option<i64>,
    pub status: SolveStatus,
    /// Whether `solution` is the warm start rather than a search result.
    pub from_warm_start: bool,
}

/// Incumbent taken from a warm start.
#[derive(Debug, Clone)]
struct WarmStart {
    transitions: Vec<usize>,
    solution: JobShopSolution,
    makespan: i64,
}

/// Fields of an `rpid` solution the front-end needs.
#[derive(Debug)]
struct SearchOutcome {
    cost: Option<Cost>,
    best_bound: Option<Cost>,
    transitions: Vec<usize>,
    is_optimal: bool,
    is_infeasible: bool,
}

/// Job-shop solver over the DP models.
#[derive(Debug, Clone)]
pub struct DpJspSolver {
    problem: JobShopProblem,
    config: DpSolverConfig,
    table: SubtaskTable,
    warm_start: Option<WarmStart>,
}

impl DpJspSolver {
    /// Enumerates the sub-tasks of `problem`.
    ///
    /// # Errors
    /// [`Error::InvalidProblem`] or [`Error::HorizonOverflow`].
    pub fn new(problem: JobShopProblem, config: DpSolverConfig) -> Result<Self> {
        let table = SubtaskTable::new(&problem)?;
        debug!(
            "DP table: {} jobs, {} machines, {} sub-tasks",
            table.n_jobs(),
            table.n_machines(),
            table.len()
        );
        Ok(Self {
            problem,
            config,
            table,
            warm_start: None,
        })
    }

    pub fn problem(&self) -> &JobShopProblem {
        &self.problem
    }

    pub fn config(&self) -> &DpSolverConfig {
        &self.config
    }

    pub fn table(&self) -> &SubtaskTable {
        &self.table
    }

    /// Makespan of the stored warm start, if any.
    pub fn warm_start_makespan(&self) -> Option<i64> {
        self.warm_start.as_ref().map(|w| w.makespan)
    }

    /// Seeds the search with a known schedule.
    ///
    /// The schedule is reduced to its dispatch order and replayed, so the
    /// stored incumbent is the semi-active version of `solution`. Its
    /// makespan becomes the primal bound of later searches.
    ///
    /// # Errors
    /// [`Error::InvalidWarmStart`] if the shape of `solution` does not
    /// match the problem, or its dispatch order cannot be replayed.
    pub fn set_warm_start(&mut self, solution: &JobShopSolution) -> Result<()> {
        let transitions = warm_start_transitions(&self.table, solution)?;
        let replayed = retrieve_solution(&self.table, &transitions)
            .map_err(|e| Error::InvalidWarmStart(e.to_string()))?;
        let makespan = replayed.makespan();
        debug!(
            "warm start: makespan {} (given {})",
            makespan,
            solution.makespan()
        );
        self.warm_start = Some(WarmStart {
            transitions,
            solution: replayed,
            makespan,
        });
        Ok(())
    }

    /// Dispatch order of the stored warm start.
    pub fn warm_start_transitions(&self) -> Option<&[usize]> {
        self.warm_start.as_ref().map(|w| w.transitions.as_slice())
    }

    /// Runs the search.
    ///
    /// With a warm start, only schedules no longer than the incumbent are
    /// explored; if the search finds none, the incumbent is returned with
    /// `from_warm_start` set.
    ///
    /// # Errors
    /// [`Error::InvalidTransition`] or [`Error::IncompleteSequence`] if the
    /// solver's transition sequence does not decode.
    pub fn solve(&self) -> Result<DpSolveResult> {
        let primal_bound = match &self.warm_start {
            Some(w) => Some(Cost::try_from(w.makespan).map_err(|_| Error::HorizonOverflow {
                horizon: w.makespan,
            })?),
            None => None,
        };
        info!(
            "solving {}x{} job shop with {:?} model (time limit {:?})",
            self.table.n_jobs(),
            self.table.n_machines(),
            self.config.model,
            self.config.time_limit_secs
        );

        let outcome = self.search(primal_bound);
        let best_bound = outcome.best_bound.map(i64::from);

        let result = match (outcome.cost, &self.warm_start) {
            (Some(cost), warm) if warm.as_ref().map_or(true, |w| i64::from(cost) <= w.makespan) => {
                let solution = retrieve_solution(&self.table, &outcome.transitions)?;
                DpSolveResult {
                    makespan: Some(solution.makespan()),
                    solution: Some(solution),
                    best_bound,
                    status: if outcome.is_optimal {
                        SolveStatus::Optimal
                    } else {
                        SolveStatus::Feasible
                    },
                    from_warm_start: false,
                }
            }
            (_, Some(warm)) => {
                // no schedule shorter than the incumbent was found
                let proven = outcome.is_optimal || outcome.is_infeasible;
                DpSolveResult {
                    solution: Some(warm.solution.clone()),
                    makespan: Some(warm.makespan),
                    best_bound: if proven {
                        Some(warm.makespan)
                    } else {
                        best_bound.map(|b| b.min(warm.makespan))
                    },
                    status: if proven {
                        SolveStatus::Optimal
                    } else {
                        SolveStatus::Feasible
                    },
                    from_warm_start: true,
                }
            }
            (_, None) => DpSolveResult {
                solution: None,
                makespan: None,
                best_bound,
                status: if outcome.is_infeasible {
                    SolveStatus::Infeasible
                } else {
                    SolveStatus::Unknown
                },
                from_warm_start: false,
            },
        };

        info!(
            "search finished: {:?}, makespan {:?}, bound {:?}",
            result.status, result.makespan, result.best_bound
        );
        Ok(result)
    }

    /// Like [`solve`](Self::solve), but a missing schedule is an error.
    ///
    /// # Errors
    /// [`Error::NoSolution`] when no schedule was found.
    pub fn solve_or_err(&self) -> Result<(JobShopSolution, DpSolveResult)> {
        let result = self.solve()?;
        match result.solution.clone() {
            Some(solution) => Ok((solution, result)),
            None => Err(Error::NoSolution),
        }
    }

    fn search(&self, primal_bound: Option<Cost>) -> SearchOutcome {
        let parameters = || SearchParameters {
            time_limit: self.config.time_limit_secs,
            quiet: self.config.quiet,
            ..Default::default()
        };

        match self.config.model {
            DpModelKind::FinishedSet => {
                let model = FinishedSetModel::new(self.table.clone())
                    .with_primal_bound(primal_bound)
                    .with_dual_bound(self.config.use_dual_bound);
                let mut solver =
                    solvers::create_cabs(model, parameters(), CabsParameters::default());
                let solution = solver.search();
                SearchOutcome {
                    cost: solution.cost,
                    best_bound: solution.best_bound,
                    transitions: solution.transitions,
                    is_optimal: solution.is_optimal,
                    is_infeasible: solution.is_infeasible,
                }
            }
            DpModelKind::NextTask => {
                let model = NextTaskModel::new(self.table.clone())
                    .with_primal_bound(primal_bound)
                    .with_dual_bound(self.config.use_dual_bound);
                let mut solver =
                    solvers::create_cabs(model, parameters(), CabsParameters::default());
                let solution = solver.search();
                SearchOutcome {
                    cost: solution.cost,
                    best_bound: solution.best_bound,
                    transitions: solution.transitions,
                    is_optimal: solution.is_optimal,
                    is_infeasible: solution.is_infeasible,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{greedy_schedule, DispatchRule};
    use crate::parser::{parse_jsp, FT06};
    use crate::validation::validate_solution;

    const MODELS: [DpModelKind; 2] = [DpModelKind::FinishedSet, DpModelKind::NextTask];

    fn two_by_two() -> JobShopProblem {
        JobShopProblem::from_pairs(&[vec![(0, 3), (1, 2)], vec![(1, 4), (0, 1)]])
    }

    fn three_by_three() -> JobShopProblem {
        JobShopProblem::from_pairs(&[
            vec![(0, 3), (1, 2), (2, 2)],
            vec![(0, 2), (2, 1), (1, 4)],
            vec![(1, 4), (2, 3)],
        ])
    }

    fn solve(problem: &JobShopProblem, model: DpModelKind) -> DpSolveResult {
        let config = DpSolverConfig::default().with_model(model);
        DpJspSolver::new(problem.clone(), config)
            .unwrap()
            .solve()
            .unwrap()
    }

    #[test]
    fn test_two_by_two_optimal() {
        let p = two_by_two();
        for model in MODELS {
            let r = solve(&p, model);
            assert_eq!(r.status, SolveStatus::Optimal, "{model:?}");
            assert_eq!(r.makespan, Some(6));
            assert!(!r.from_warm_start);
            let s = r.solution.unwrap();
            assert!(validate_solution(&p, &s).is_ok());
            assert_eq!(s.makespan(), 6);
        }
    }

    #[test]
    fn test_three_by_three_optimal() {
        // M1 carries 2 + 4 + 4 = 10
        let p = three_by_three();
        assert_eq!(p.lower_bound(), 10);
        for model in MODELS {
            let r = solve(&p, model);
            assert_eq!(r.status, SolveStatus::Optimal, "{model:?}");
            let s = r.solution.unwrap();
            assert!(validate_solution(&p, &s).is_ok());
            assert_eq!(Some(s.makespan()), r.makespan);
            assert!(s.makespan() >= p.lower_bound());
            let greedy = greedy_schedule(&p, DispatchRule::Spt).unwrap();
            assert!(s.makespan() <= greedy.makespan());
        }
    }

    #[test]
    fn test_models_agree() {
        let p = three_by_three();
        let a = solve(&p, DpModelKind::FinishedSet);
        let b = solve(&p, DpModelKind::NextTask);
        assert_eq!(a.makespan, b.makespan);
    }

    #[test]
    fn test_without_dual_bound() {
        let p = two_by_two();
        let config = DpSolverConfig::default().with_dual_bound(false);
        let r = DpJspSolver::new(p, config).unwrap().solve().unwrap();
        assert_eq!(r.makespan, Some(6));
        assert_eq!(r.status, SolveStatus::Optimal);
    }

    #[test]
    fn test_warm_start_is_replayed() {
        let p = two_by_two();
        let mut solver = DpJspSolver::new(p, DpSolverConfig::default()).unwrap();
        let idle = JobShopSolution::from_pairs(vec![vec![(1, 4), (10, 12)], vec![(2, 6), (6, 7)]]);
        solver.set_warm_start(&idle).unwrap();
        assert_eq!(solver.warm_start_makespan(), Some(6));
        assert_eq!(solver.warm_start_transitions(), Some(&[0, 1, 3, 2][..]));
    }

    #[test]
    fn test_warm_start_never_worse() {
        let p = three_by_three();
        let greedy = greedy_schedule(&p, DispatchRule::FirstJob).unwrap();
        for model in MODELS {
            let config = DpSolverConfig::default().with_model(model);
            let mut solver = DpJspSolver::new(p.clone(), config).unwrap();
            solver.set_warm_start(&greedy).unwrap();
            let (s, r) = solver.solve_or_err().unwrap();
            assert!(validate_solution(&p, &s).is_ok());
            assert!(s.makespan() <= greedy.makespan());
            assert_eq!(r.status, SolveStatus::Optimal);
            assert_eq!(r.makespan, solve(&p, model).makespan);
        }
    }

    #[test]
    fn test_invalid_warm_start() {
        let mut solver = DpJspSolver::new(two_by_two(), DpSolverConfig::default()).unwrap();
        let wrong = JobShopSolution::from_pairs(vec![vec![(0, 3)]]);
        assert!(matches!(
            solver.set_warm_start(&wrong),
            Err(Error::InvalidWarmStart(_))
        ));
        assert_eq!(solver.warm_start_makespan(), None);
    }

    #[test]
    fn test_invalid_problem() {
        let p = JobShopProblem::from_pairs(&[vec![(0, 3), (0, -2)]]);
        assert!(matches!(
            DpJspSolver::new(p, DpSolverConfig::default()),
            Err(Error::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_empty_problem() {
        let r = solve(&JobShopProblem::new(vec![]), DpModelKind::FinishedSet);
        assert_eq!(r.makespan, Some(0));
    }

    #[test]
    fn test_ft06_with_warm_start() {
        let p = parse_jsp(FT06).unwrap();
        let greedy = greedy_schedule(&p, DispatchRule::MostWorkRemaining).unwrap();
        let config = DpSolverConfig::default().with_time_limit(5.0);
        let mut solver = DpJspSolver::new(p.clone(), config).unwrap();
        solver.set_warm_start(&greedy).unwrap();
        let (s, r) = solver.solve_or_err().unwrap();
        assert!(validate_solution(&p, &s).is_ok());
        assert!(s.makespan() >= 55);
        assert!(s.makespan() <= greedy.makespan());
        if let Some(bound) = r.best_bound {
            assert!(bound <= s.makespan());
        }
    }

    #[test]
    fn test_ft06_next_task_optimal() {
        let p = parse_jsp(FT06).unwrap();
        let greedy = greedy_schedule(&p, DispatchRule::MostWorkRemaining).unwrap();
        let config = DpSolverConfig::default().with_model(DpModelKind::NextTask);
        let mut solver = DpJspSolver::new(p.clone(), config).unwrap();
        solver.set_warm_start(&greedy).unwrap();
        let (s, r) = solver.solve_or_err().unwrap();
        assert_eq!(r.status, SolveStatus::Optimal);
        assert_eq!(r.makespan, Some(55));
        assert_eq!(s.makespan(), 55);
        assert!(validate_solution(&p, &s).is_ok());
    }

    #[test]
    fn test_unproven_warm_start_bound_never_exceeds_makespan() {
        let p = parse_jsp(FT06).unwrap();
        let greedy = greedy_schedule(&p, DispatchRule::FirstJob).unwrap();
        let config = DpSolverConfig::default().with_time_limit(0.0);
        let mut solver = DpJspSolver::new(p, config).unwrap();
        solver.set_warm_start(&greedy).unwrap();
        let r = solver.solve().unwrap();
        assert!(r.makespan.is_some());
        if let (Some(bound), Some(makespan)) = (r.best_bound, r.makespan) {
            assert!(bound <= makespan);
        }
    }
}
