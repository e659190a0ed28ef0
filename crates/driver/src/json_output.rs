//! Structured JSON output for analysis results.
//!
//! Produces machine-readable verdicts and diagnostics for non-IDE consumers
//! (CI checks, editor plugins without a native protocol).

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Severity};
use crate::verdict::Verdict;

/// Complete analysis report for one expression in JSON format.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct JsonReport {
    /// Textual rendering of the analyzed expression.
    pub expression: String,
    /// "unsatisfiable", "satisfiable", or "inconclusive"
    pub verdict: String,
    /// The rendered model, for satisfiable expressions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Diagnostics derived from the verdict (empty when inconclusive).
    pub diagnostics: Vec<JsonDiagnostic>,
}

/// A single diagnostic in JSON format.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct JsonDiagnostic {
    /// "error" or "hint"
    pub severity: String,
    pub message: String,
}

impl JsonDiagnostic {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            severity: match diagnostic.severity {
                Severity::Error => "error".to_string(),
                Severity::Hint => "hint".to_string(),
            },
            message: diagnostic.message.clone(),
        }
    }
}

impl JsonReport {
    /// Build a report from an expression rendering and its verdict.
    pub fn new(expression: impl Into<String>, verdict: &Verdict) -> Self {
        let diagnostics = crate::diagnostics::from_verdict(verdict)
            .iter()
            .map(JsonDiagnostic::from)
            .collect();
        Self {
            expression: expression.into(),
            verdict: match verdict {
                Verdict::Unsatisfiable => "unsatisfiable".to_string(),
                Verdict::Satisfiable { .. } => "satisfiable".to_string(),
                Verdict::Inconclusive => "inconclusive".to_string(),
            },
            model: verdict.model_text().map(str::to_string),
            diagnostics,
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
