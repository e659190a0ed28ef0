use std::fmt;
use std::path::PathBuf;

use crate::config::SolverKind;

/// Errors from solver interaction.
#[derive(Debug)]
pub enum SolverError {
    /// Solver binary not found at the specified path.
    NotFound(SolverKind, PathBuf),
    /// Process failed to start or crashed.
    Process(String),
    /// Failed to parse solver output.
    Parse(String),
    /// Timeout exceeded.
    Timeout,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::NotFound(kind, path) => {
                write!(f, "{kind} binary not found at: {}", path.display())
            }
            SolverError::Process(msg) => write!(f, "Solver process error: {msg}"),
            SolverError::Parse(msg) => write!(f, "Failed to parse solver output: {msg}"),
            SolverError::Timeout => write!(f, "Solver timeout exceeded"),
        }
    }
}

impl std::error::Error for SolverError {}

impl PartialEq for SolverError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SolverError::NotFound(ak, ap), SolverError::NotFound(bk, bp)) => {
                ak == bk && ap == bp
            }
            (SolverError::Process(a), SolverError::Process(b)) => a == b,
            (SolverError::Parse(a), SolverError::Parse(b)) => a == b,
            (SolverError::Timeout, SolverError::Timeout) => true,
            _ => false,
        }
    }
}
