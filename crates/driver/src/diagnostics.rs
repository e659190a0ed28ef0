//! Diagnostics handed to the presentation collaborator.
//!
//! Only definite verdicts produce a diagnostic: a provably-false condition is
//! an error, a satisfiable one a hint carrying its witness. Inconclusive
//! analyses stay silent.

use colored::Colorize;

use crate::verdict::Verdict;

/// How strongly the diagnostic should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Hint,
}

/// A single diagnostic about an analyzed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Map a verdict to its diagnostic, if any.
pub fn from_verdict(verdict: &Verdict) -> Option<Diagnostic> {
    match verdict {
        Verdict::Unsatisfiable => Some(Diagnostic {
            severity: Severity::Error,
            message: "Expression is unsatisfiable".to_string(),
        }),
        Verdict::Satisfiable { model_text } => Some(Diagnostic {
            severity: Severity::Hint,
            message: format!("Expression is satisfiable, model is:\n\n{model_text}"),
        }),
        Verdict::Inconclusive => None,
    }
}

/// Render a diagnostic for terminal output.
pub fn render_terminal(diagnostic: &Diagnostic) -> String {
    let tag = match diagnostic.severity {
        Severity::Error => "error".red().bold(),
        Severity::Hint => "hint".green().bold(),
    };
    format!("{tag}: {message}", message = diagnostic.message)
}
