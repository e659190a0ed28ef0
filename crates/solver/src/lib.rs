//! # satlint-solver
//!
//! Subprocess SMT solver interface for expression satisfiability analysis.
//!
//! Spawns a solver binary (Z3 by default, CVC5 supported), pipes an SMT-LIB2
//! script through stdin, and parses the `sat`/`unsat`/`unknown` answer plus
//! the `(get-model)` block into a [`SolverResult`].
//!
//! ## Usage
//!
//! ```no_run
//! use satlint_solver::{CliSolver, SolverResult};
//!
//! let solver = CliSolver::with_default_config().unwrap();
//! let result = solver.check_sat_raw("
//!     (declare-const x (_ BitVec 32))
//!     (assert (bvsgt x (_ bv0 32)))
//!     (check-sat)
//!     (get-model)
//! ").unwrap();
//!
//! match result {
//!     SolverResult::Sat(model) => println!("SAT: {model:?}"),
//!     SolverResult::Unsat => println!("UNSAT"),
//!     SolverResult::Unknown(reason) => println!("Unknown: {reason}"),
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod model;
mod parser;
pub mod result;
pub mod solver;

// Re-export primary types for ergonomic use
pub use backend::{SolverBackend, create_backend, create_default_backend};
pub use config::{SolverConfig, SolverKind};
pub use error::SolverError;
pub use model::Model;
pub use result::SolverResult;
pub use solver::CliSolver;
