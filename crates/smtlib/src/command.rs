use crate::sort::Sort;
use crate::term::Term;

/// SMT-LIB command representation.
///
/// Only the commands a satisfiability query contains: a header comment, the
/// free-variable declarations, one assertion, `(check-sat)` and `(get-model)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `;; comment`
    Comment(String),
    /// `(declare-const name sort)`
    DeclareConst(String, Sort),
    /// `(assert term)`
    Assert(Term),
    /// `(check-sat)`
    CheckSat,
    /// `(get-model)`
    GetModel,
}
