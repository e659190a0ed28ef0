use std::io::Write;
use std::process::{Command, Stdio};

use satlint_smtlib::script::Script;

use crate::config::{SolverConfig, SolverKind};
use crate::error::SolverError;
use crate::parser::parse_solver_output;
use crate::result::SolverResult;

/// Subprocess SMT solver interface.
///
/// Communicates with the solver binary (Z3 or CVC5) by spawning it and
/// piping SMT-LIB2 text through stdin. One process per `check_sat` call;
/// nothing persists between calls.
#[derive(Debug)]
pub struct CliSolver {
    config: SolverConfig,
}

impl CliSolver {
    /// Create a new `CliSolver` with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a `CliSolver` with an auto-detected Z3 and default settings.
    pub fn with_default_config() -> Result<Self, SolverError> {
        Self::with_default_config_for(SolverKind::Z3)
    }

    /// Create a `CliSolver` with an auto-detected binary for the given kind.
    pub fn with_default_config_for(kind: SolverKind) -> Result<Self, SolverError> {
        let config = SolverConfig::auto_detect_for(kind)?;
        Ok(Self { config })
    }

    /// Get a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Check satisfiability of a script.
    ///
    /// Formats the script to SMT-LIB2 text using `Display` and runs the
    /// solver on it. The script is expected to carry its own `(check-sat)`
    /// and `(get-model)` commands.
    pub fn check_sat(&self, script: &Script) -> Result<SolverResult, SolverError> {
        self.check_sat_raw(&script.to_string())
    }

    /// Check satisfiability from a raw SMT-LIB2 string.
    pub fn check_sat_raw(&self, smtlib: &str) -> Result<SolverResult, SolverError> {
        self.config.validate()?;

        let args = self.config.build_args();
        tracing::trace!(solver = %self.config.kind, ?args, "spawning solver process");

        let mut child = Command::new(&self.config.solver_path)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                SolverError::Process(format!("Failed to start {}: {e}", self.config.kind))
            })?;

        // Write SMT-LIB to stdin; the handle drops at end of scope so the
        // solver sees EOF and terminates.
        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                SolverError::Process(format!("Failed to open {} stdin", self.config.kind))
            })?;
            stdin.write_all(smtlib.as_bytes()).map_err(|e| {
                SolverError::Process(format!("Failed to write to {} stdin: {e}", self.config.kind))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            SolverError::Process(format!("Failed to wait for {}: {e}", self.config.kind))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Check for timeout in stderr
        if stderr.contains("timeout") || stdout.trim() == "timeout" {
            return Ok(SolverResult::Unknown("timeout".to_string()));
        }

        parse_solver_output(&stdout, &stderr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_binary_fails_validation() {
        let solver = CliSolver::new(SolverConfig::new(
            SolverKind::Z3,
            PathBuf::from("/nonexistent/z3"),
        ));
        let err = solver.check_sat_raw("(check-sat)").unwrap_err();
        assert!(matches!(err, SolverError::NotFound(SolverKind::Z3, _)));
    }

    #[test]
    fn config_accessor() {
        let config = SolverConfig::new(SolverKind::Cvc5, PathBuf::from("/usr/bin/cvc5"));
        let solver = CliSolver::new(config);
        assert_eq!(solver.config().kind, SolverKind::Cvc5);
    }
}
