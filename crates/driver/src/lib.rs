//! # satlint-driver
//!
//! The satisfiability driver: takes a typed boolean expression, assembles the
//! SMT query through `satlint-analysis`, runs it through a `satlint-solver`
//! backend, and classifies the outcome into a [`Verdict`]. Definite verdicts
//! become [`diagnostics::Diagnostic`]s for the presentation collaborator,
//! with JSON and terminal renderings on top.

pub mod analyzer;
pub mod diagnostics;
pub mod json_output;
pub mod present;
pub mod verdict;

pub use analyzer::ExpressionAnalyzer;
pub use diagnostics::{Diagnostic, Severity};
pub use json_output::JsonReport;
pub use present::render_model;
pub use verdict::Verdict;
