//! Solver configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use crate::dp::DpModelKind;

/// Configuration of [`DpJspSolver`](crate::solver::DpJspSolver).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use u_jobshop_dp::config::{DpModelKind, DpSolverConfig};
///
/// let config = DpSolverConfig::from_json_str(r#"{ "model": "next_task" }"#).unwrap();
/// assert_eq!(config.model, DpModelKind::NextTask);
/// assert!(config.quiet);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DpSolverConfig {
    /// DP formulation to search.
    pub model: DpModelKind,
    /// Wall-clock limit in seconds. `None` searches until optimality.
    pub time_limit_secs: Option<f64>,
    /// Suppress solver progress output.
    pub quiet: bool,
    /// Prune with the remaining-work dual bound.
    pub use_dual_bound: bool,
}

impl Default for DpSolverConfig {
    fn default() -> Self {
        Self {
            model: DpModelKind::FinishedSet,
            time_limit_secs: None,
            quiet: true,
            use_dual_bound: true,
        }
    }
}

impl DpSolverConfig {
    pub fn with_model(mut self, model: DpModelKind) -> Self {
        self.model = model;
        self
    }

    pub fn with_time_limit(mut self, secs: f64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_dual_bound(mut self, enabled: bool) -> Self {
        self.use_dual_bound = enabled;
        self
    }

    /// Parses a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let c = DpSolverConfig::default();
        assert_eq!(c.model, DpModelKind::FinishedSet);
        assert_eq!(c.time_limit_secs, None);
        assert!(c.quiet);
        assert!(c.use_dual_bound);
    }

    #[test]
    fn test_builders() {
        let c = DpSolverConfig::default()
            .with_model(DpModelKind::NextTask)
            .with_time_limit(2.5)
            .with_quiet(false)
            .with_dual_bound(false);
        assert_eq!(c.model, DpModelKind::NextTask);
        assert_eq!(c.time_limit_secs, Some(2.5));
        assert!(!c.quiet);
        assert!(!c.use_dual_bound);
    }

    #[test]
    fn test_json_partial_and_full() {
        let c = DpSolverConfig::from_json_str("{}").unwrap();
        assert_eq!(c, DpSolverConfig::default());

        let c = DpSolverConfig::from_json_str(
            r#"{"model":"finished_set","time_limit_secs":10.0,"quiet":false,"use_dual_bound":false}"#,
        )
        .unwrap();
        assert_eq!(c.time_limit_secs, Some(10.0));
        assert!(!c.use_dual_bound);

        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(DpSolverConfig::from_json_str(&json).unwrap(), c);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            DpSolverConfig::from_json_str(r#"{"model":"bogus"}"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            DpSolverConfig::from_path("/nonexistent/solver.json"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join("u_jobshop_dp_config_test.json");
        std::fs::write(&path, r#"{"model":"next_task","time_limit_secs":1.0}"#).unwrap();
        let c = DpSolverConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(c.model, DpModelKind::NextTask);
        assert_eq!(c.time_limit_secs, Some(1.0));
    }
}
