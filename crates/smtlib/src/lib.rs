//! # satlint-smtlib
//!
//! SMT-LIB2 abstract syntax and textual formatting.
//!
//! The types here cover exactly the fragment an expression satisfiability
//! query needs: boolean, bitvector, floating-point, and rounding-mode sorts;
//! the matching term algebra; and the five commands a query script contains.
//! The `Display` impls in [`formatter`] produce the canonical SMT-LIB2 text
//! piped to the solver.

pub mod command;
pub mod formatter;
pub mod script;
pub mod sort;
pub mod term;

pub use command::Command;
pub use script::Script;
pub use sort::Sort;
pub use term::Term;
