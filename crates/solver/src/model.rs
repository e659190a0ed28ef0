/// A model (witness assignment) from the solver.
///
/// Contains constant assignments extracted from the `(get-model)` output,
/// plus the solver's native model block verbatim for display alongside the
/// decoded values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    /// Constant assignments: `(name, value_string)` pairs in output order.
    pub assignments: Vec<(String, String)>,
    /// The native model block as the solver printed it.
    pub raw: String,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model from assignment pairs and the raw block text.
    pub fn with_assignments(assignments: Vec<(String, String)>, raw: String) -> Self {
        Self { assignments, raw }
    }

    /// Look up a constant's value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Return the number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Return whether the model has no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
