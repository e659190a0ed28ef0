//! A term paired with its sort.

use satlint_smtlib::sort::Sort;
use satlint_smtlib::term::Term;

/// A translated expression: an SMT term together with the sort it was built
/// at. Consumers project through the `as_*` accessors instead of assuming a
/// sort, so a mismatch surfaces as `None` rather than a malformed script.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedTerm {
    pub sort: Sort,
    pub term: Term,
}

impl TypedTerm {
    pub fn new(sort: Sort, term: Term) -> Self {
        Self { sort, term }
    }

    pub fn bool(term: Term) -> Self {
        Self::new(Sort::Bool, term)
    }

    /// The term, if it is boolean-sorted.
    pub fn as_bool(&self) -> Option<&Term> {
        match self.sort {
            Sort::Bool => Some(&self.term),
            _ => None,
        }
    }

    /// The term and its width, if it is bitvector-sorted.
    pub fn as_bitvec(&self) -> Option<(&Term, u32)> {
        match self.sort {
            Sort::BitVec(w) => Some((&self.term, w)),
            _ => None,
        }
    }

    /// The term and its (eb, sb), if it is floating-point-sorted.
    pub fn as_float(&self) -> Option<(&Term, u32, u32)> {
        match self.sort {
            Sort::Float(e, s) => Some((&self.term, e, s)),
            _ => None,
        }
    }
}
