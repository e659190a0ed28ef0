/// Outcome of analyzing one expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The expression can never be true.
    Unsatisfiable,
    /// The expression can be true; `model_text` is the rendered witness
    /// assignment (empty when the solver returned no model).
    Satisfiable { model_text: String },
    /// Nothing could be established: the expression was out of scope, the
    /// translation failed, or the solver answered unknown or errored.
    Inconclusive,
}

impl Verdict {
    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, Verdict::Unsatisfiable)
    }

    pub fn is_satisfiable(&self) -> bool {
        matches!(self, Verdict::Satisfiable { .. })
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Verdict::Inconclusive)
    }

    /// The rendered model, if satisfiable.
    pub fn model_text(&self) -> Option<&str> {
        match self {
            Verdict::Satisfiable { model_text } => Some(model_text),
            _ => None,
        }
    }
}
