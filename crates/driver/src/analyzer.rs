//! The satisfiability driver: gate, solver invocation, verdict.

use satlint_analysis::ast::Expr;
use satlint_analysis::build_query;
use satlint_analysis::encode_term::TranslationError;
use satlint_solver::{SolverBackend, SolverError, SolverResult, create_default_backend};

use crate::present::render_model;
use crate::verdict::Verdict;

/// Analyzes one expression at a time against a solver backend.
///
/// Every failure channel collapses to [`Verdict::Inconclusive`]; the analyzer
/// never reports a definite verdict it cannot back with a solver answer. No
/// state accumulates between calls.
pub struct ExpressionAnalyzer {
    backend: Box<dyn SolverBackend>,
}

impl ExpressionAnalyzer {
    /// Create an analyzer over an explicit backend.
    pub fn new(backend: Box<dyn SolverBackend>) -> Self {
        Self { backend }
    }

    /// Create an analyzer over the default solver (auto-detected Z3).
    pub fn with_default_solver() -> Result<Self, SolverError> {
        Ok(Self::new(create_default_backend()?))
    }

    /// Analyze an expression and classify its satisfiability.
    ///
    /// Only binary expressions with a boolean result type are analyzed;
    /// everything else is out of scope and inconclusive without touching the
    /// solver.
    pub fn analyze(&self, expr: &Expr) -> Verdict {
        if !matches!(expr, Expr::Binary { .. }) || !expr.ty().is_bool() {
            tracing::debug!(expression = %expr, "skipping non-boolean or non-binary expression");
            return Verdict::Inconclusive;
        }

        let script = match build_query(expr) {
            Ok(script) => script,
            Err(TranslationError::Unsupported(what)) => {
                tracing::debug!(expression = %expr, %what, "expression not translatable");
                return Verdict::Inconclusive;
            }
            // Already logged at the detection site
            Err(TranslationError::Internal(_)) => return Verdict::Inconclusive,
        };

        match self.backend.check_sat(&script) {
            Ok(SolverResult::Unsat) => {
                tracing::debug!(expression = %expr, "unsatisfiable");
                Verdict::Unsatisfiable
            }
            Ok(SolverResult::Sat(model)) => {
                tracing::debug!(expression = %expr, "satisfiable");
                Verdict::Satisfiable {
                    model_text: model.as_ref().map(render_model).unwrap_or_default(),
                }
            }
            Ok(SolverResult::Unknown(reason)) => {
                tracing::debug!(expression = %expr, %reason, "solver answered unknown");
                Verdict::Inconclusive
            }
            Err(err) => {
                tracing::debug!(expression = %expr, error = %err, "solver invocation failed");
                Verdict::Inconclusive
            }
        }
    }
}
