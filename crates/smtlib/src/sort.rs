/// SMT-LIB sort (type) representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sort {
    /// Boolean sort
    Bool,
    /// Fixed-width bitvector: `(_ BitVec n)`
    BitVec(u32),
    /// IEEE 754 floating-point: `(_ FloatingPoint e s)`
    Float(u32, u32),
    /// IEEE 754 rounding-mode sort
    RoundingMode,
}

impl Sort {
    /// Single-precision floating-point sort (f32).
    pub fn float32() -> Self {
        Sort::Float(8, 24)
    }

    /// Double-precision floating-point sort (f64).
    pub fn float64() -> Self {
        Sort::Float(11, 53)
    }

    /// Returns `true` if this is a bitvector sort.
    pub fn is_bitvec(&self) -> bool {
        matches!(self, Sort::BitVec(_))
    }

    /// Returns `true` if this is a floating-point sort.
    pub fn is_float(&self) -> bool {
        matches!(self, Sort::Float(_, _))
    }
}
