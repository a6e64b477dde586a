//! Job-shop domain models.
//!
//! Provides the instance and solution types shared by the parser,
//! validation, heuristics and the DP models.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Operation` | One sub-job: machine + processing time |
//! | `JobShopProblem` | Jobs as ordered operation chains |
//! | `ScheduledOperation` | Start/end window of one operation |
//! | `JobShopSolution` | Windows for every operation |

mod problem;
mod solution;

pub use problem::{JobShopProblem, Operation};
pub use solution::{JobShopSolution, ScheduledOperation};
