//! Job-shop scheduling as dynamic programming.
//!
//! Formulates the job-shop makespan problem as a DP model, searches it with
//! the `rpid` solvers and decodes the transition sequence back into a
//! schedule. A known schedule can seed the search as a warm start.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Operation`, `JobShopProblem`,
//!   `ScheduledOperation`, `JobShopSolution`
//! - **`validation`**: Problem and schedule integrity checks
//! - **`parser`**: Standard JSP instance format
//! - **`dp`**: Sub-task enumeration, the two DP models, schedule retrieval
//!   and warm-start ordering
//! - **`heuristic`**: Greedy list scheduling for initial solutions
//! - **`solver`**: Search front-end tying the pieces together
//! - **`config`**: Solver configuration
//!
//! # Example
//! ```
//! use u_jobshop_dp::config::DpSolverConfig;
//! use u_jobshop_dp::models::JobShopProblem;
//! use u_jobshop_dp::solver::{DpJspSolver, SolveStatus};
//!
//! let problem = JobShopProblem::from_pairs(&[vec![(0, 3), (1, 2)], vec![(1, 4), (0, 1)]]);
//! let solver = DpJspSolver::new(problem, DpSolverConfig::default()).unwrap();
//! let result = solver.solve().unwrap();
//! assert_eq!(result.status, SolveStatus::Optimal);
//! assert_eq!(result.makespan, Some(6));
//! ```
//!
//! # References
//!
//! - Kuroiwa & Beck (2023), "Solving Domain-Independent Dynamic Programming
//!   Problems with Anytime Heuristic Search"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dp;
mod error;
pub mod heuristic;
pub mod models;
pub mod parser;
pub mod solver;
pub mod validation;

pub use error::{Error, Result};
