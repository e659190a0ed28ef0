//! Typed expression trees and their translation to SMT-LIB satisfiability
//! queries.
//!
//! The pipeline: [`ast::Expr`] (supplied by the host language services) →
//! [`encode_term::Translator`] → [`query::build_query`] → a solver-ready
//! [`satlint_smtlib::Script`].

pub mod ast;
pub mod encode_sort;
pub mod encode_term;
pub mod query;
pub mod typed_term;

pub use ast::{Expr, SourceType};
pub use encode_term::{TranslationError, Translator};
pub use query::build_query;
pub use typed_term::TypedTerm;
