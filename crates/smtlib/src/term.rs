/// SMT-LIB term (expression) representation.
///
/// Covers exactly the theory fragment a satisfiability query over a C-family
/// boolean condition produces: boolean connectives, fixed-width bitvector
/// arithmetic and comparison, and IEEE 754 floating-point arithmetic with an
/// explicit rounding-mode operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    // === Literals ===
    /// Boolean literal
    BoolLit(bool),
    /// Bitvector literal with value and width
    BitVecLit(i128, u32),
    /// Floating-point literal from raw bits: `(fp sign exp sig)` with eb, sb
    FpFromBits(u8, u64, u64, u32, u32),

    // === Variables ===
    /// Named constant/variable reference
    Const(String),

    // === Boolean operations ===
    /// Logical NOT
    Not(Box<Term>),
    /// Logical AND (n-ary)
    And(Vec<Term>),
    /// Logical OR (n-ary)
    Or(Vec<Term>),
    /// Logical XOR
    Xor(Box<Term>, Box<Term>),

    // === Core ===
    /// Equality: `(= a b)`
    Eq(Box<Term>, Box<Term>),

    // === Bitvector arithmetic ===
    /// `(bvadd a b)`
    BvAdd(Box<Term>, Box<Term>),
    /// `(bvsub a b)`
    BvSub(Box<Term>, Box<Term>),
    /// `(bvmul a b)`
    BvMul(Box<Term>, Box<Term>),
    /// `(bvsdiv a b)` — signed division
    BvSDiv(Box<Term>, Box<Term>),
    /// `(bvudiv a b)` — unsigned division
    BvUDiv(Box<Term>, Box<Term>),
    /// `(bvsrem a b)` — signed remainder
    BvSRem(Box<Term>, Box<Term>),
    /// `(bvurem a b)` — unsigned remainder
    BvURem(Box<Term>, Box<Term>),
    /// `(bvneg a)` — two's complement negation
    BvNeg(Box<Term>),

    // === Bitvector comparison (signed) ===
    /// `(bvslt a b)` — signed less-than
    BvSLt(Box<Term>, Box<Term>),
    /// `(bvsle a b)` — signed less-or-equal
    BvSLe(Box<Term>, Box<Term>),
    /// `(bvsgt a b)` — signed greater-than
    BvSGt(Box<Term>, Box<Term>),
    /// `(bvsge a b)` — signed greater-or-equal
    BvSGe(Box<Term>, Box<Term>),

    // === Bitvector comparison (unsigned) ===
    /// `(bvult a b)` — unsigned less-than
    BvULt(Box<Term>, Box<Term>),
    /// `(bvule a b)` — unsigned less-or-equal
    BvULe(Box<Term>, Box<Term>),
    /// `(bvugt a b)` — unsigned greater-than
    BvUGt(Box<Term>, Box<Term>),
    /// `(bvuge a b)` — unsigned greater-or-equal
    BvUGe(Box<Term>, Box<Term>),

    // === Bitvector bitwise ===
    /// `(bvand a b)`
    BvAnd(Box<Term>, Box<Term>),
    /// `(bvor a b)`
    BvOr(Box<Term>, Box<Term>),
    /// `(bvxor a b)`
    BvXor(Box<Term>, Box<Term>),
    /// `(bvnot a)`
    BvNot(Box<Term>),
    /// `(bvshl a b)` — shift left
    BvShl(Box<Term>, Box<Term>),
    /// `(bvlshr a b)` — logical shift right
    BvLShr(Box<Term>, Box<Term>),
    /// `(bvashr a b)` — arithmetic shift right
    BvAShr(Box<Term>, Box<Term>),

    // === Floating-point arithmetic ===
    /// `(fp.add rm x y)`
    FpAdd(Box<Term>, Box<Term>, Box<Term>),
    /// `(fp.sub rm x y)`
    FpSub(Box<Term>, Box<Term>, Box<Term>),
    /// `(fp.mul rm x y)`
    FpMul(Box<Term>, Box<Term>, Box<Term>),
    /// `(fp.div rm x y)`
    FpDiv(Box<Term>, Box<Term>, Box<Term>),
    /// `(fp.rem x y)` — IEEE remainder, rounding-mode independent
    FpRem(Box<Term>, Box<Term>),
    /// `(fp.neg x)`
    FpNeg(Box<Term>),

    // === Floating-point comparison ===
    /// `(fp.eq x y)` — IEEE 754 equality (NaN-aware)
    FpEq(Box<Term>, Box<Term>),
    /// `(fp.lt x y)`
    FpLt(Box<Term>, Box<Term>),
    /// `(fp.leq x y)`
    FpLeq(Box<Term>, Box<Term>),
    /// `(fp.gt x y)`
    FpGt(Box<Term>, Box<Term>),
    /// `(fp.geq x y)`
    FpGeq(Box<Term>, Box<Term>),
}

impl Term {
    /// Build a floating-point literal from the raw bits of an `f32`.
    pub fn fp_from_f32(value: f32) -> Term {
        let bits = value.to_bits();
        let sign = (bits >> 31) as u8;
        let exp = u64::from((bits >> 23) & 0xff);
        let sig = u64::from(bits & 0x7f_ffff);
        Term::FpFromBits(sign, exp, sig, 8, 24)
    }

    /// Build a floating-point literal from the raw bits of an `f64`.
    pub fn fp_from_f64(value: f64) -> Term {
        let bits = value.to_bits();
        let sign = (bits >> 63) as u8;
        let exp = (bits >> 52) & 0x7ff;
        let sig = bits & 0xf_ffff_ffff_ffff;
        Term::FpFromBits(sign, exp, sig, 11, 53)
    }
}
