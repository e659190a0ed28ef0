//! Abstraction over SMT solver backends.
//!
//! The `SolverBackend` trait lets the analysis driver run against any
//! solver: the subprocess-based `CliSolver` in production, a scripted stub
//! in tests.

use satlint_smtlib::script::Script;

use crate::config::SolverKind;
use crate::error::SolverError;
use crate::result::SolverResult;
use crate::solver::CliSolver;

/// Trait abstracting over SMT solver backends.
pub trait SolverBackend {
    /// Check satisfiability of the given SMT script.
    ///
    /// Returns:
    /// - `Ok(SolverResult::Sat(model))` if satisfiable (witness found)
    /// - `Ok(SolverResult::Unsat)` if unsatisfiable
    /// - `Ok(SolverResult::Unknown(reason))` if the solver couldn't determine
    /// - `Err(SolverError)` if the solver invocation failed
    fn check_sat(&self, script: &Script) -> Result<SolverResult, SolverError>;
}

impl SolverBackend for CliSolver {
    fn check_sat(&self, script: &Script) -> Result<SolverResult, SolverError> {
        self.check_sat(script)
    }
}

/// Create a solver backend for the specified solver kind.
pub fn create_backend(kind: SolverKind) -> Result<Box<dyn SolverBackend>, SolverError> {
    tracing::debug!(solver = %kind, "using subprocess backend");
    let solver = CliSolver::with_default_config_for(kind)?;
    Ok(Box::new(solver))
}

/// Create the default solver backend (Z3).
pub fn create_default_backend() -> Result<Box<dyn SolverBackend>, SolverError> {
    create_backend(SolverKind::Z3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_backend_missing_solver_reports_kind() {
        // CVC5 is typically absent; if it is installed the creation simply
        // succeeds and there is nothing to assert.
        if let Err(err) = create_backend(SolverKind::Cvc5) {
            assert!(err.to_string().contains("CVC5"));
        }
    }
}
