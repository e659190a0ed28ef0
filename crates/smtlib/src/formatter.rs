//! SMT-LIB2 text formatting for AST types.
//!
//! Implements `Display` for [`Sort`], [`Term`], [`Command`], and [`Script`],
//! producing valid SMT-LIB2 output that can be parsed by solvers such as Z3.
//!
//! Symbol names that are not simple SMT-LIB symbols (free variables derived
//! from source-expression text contain spaces and quotes) are emitted as
//! quoted symbols `|...|`.

use std::fmt;

use crate::command::Command;
use crate::script::Script;
use crate::sort::Sort;
use crate::term::Term;

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::BitVec(width) => write!(f, "(_ BitVec {width})"),
            Sort::Float(e, s) => write!(f, "(_ FloatingPoint {e} {s})"),
            Sort::RoundingMode => write!(f, "RoundingMode"),
        }
    }
}

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// Characters allowed in a simple (unquoted) SMT-LIB symbol.
fn is_simple_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "~!@$%^&*_-+=<>.?/".contains(c)
}

/// Write a symbol, quoting with `|...|` when it is not a simple symbol.
///
/// `|` and `\` cannot appear inside a quoted symbol; they are replaced with
/// `_` so that any name the binder produces remains emittable. The
/// replacement is deterministic, so equal names still format identically.
fn fmt_symbol(name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let simple = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(is_simple_symbol_char);
    if simple {
        write!(f, "{name}")
    } else {
        write!(f, "|")?;
        for c in name.chars() {
            if c == '|' || c == '\\' {
                write!(f, "_")?;
            } else {
                write!(f, "{c}")?;
            }
        }
        write!(f, "|")
    }
}

// ---------------------------------------------------------------------------
// Term
// ---------------------------------------------------------------------------

/// Format a bitvector literal. Negative values are converted to their
/// two's-complement unsigned representation for the given bit-width.
fn fmt_bv_lit(value: i128, width: u32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let unsigned = if value < 0 {
        // Two's complement: wrap into [0, 2^width)
        let modulus: u128 = 1u128 << width;
        ((modulus as i128) + value) as u128
    } else {
        value as u128
    };
    write!(f, "(_ bv{unsigned} {width})")
}

/// Format a floating-point literal from its bit triple:
/// `(fp #bS #bEEEE... #bMMMM...)`.
fn fmt_fp_lit(
    sign: u8,
    exp: u64,
    sig: u64,
    eb: u32,
    sb: u32,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "(fp #b{sign} #b")?;
    for i in (0..eb).rev() {
        write!(f, "{}", (exp >> i) & 1)?;
    }
    write!(f, " #b")?;
    // Significand field is sb-1 bits; the hidden bit is implicit.
    for i in (0..sb - 1).rev() {
        write!(f, "{}", (sig >> i) & 1)?;
    }
    write!(f, ")")
}

/// Write a binary SMT-LIB operator: `(op lhs rhs)`.
fn fmt_binop(op: &str, lhs: &Term, rhs: &Term, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({op} {lhs} {rhs})")
}

/// Write a unary SMT-LIB operator: `(op arg)`.
fn fmt_unop(op: &str, arg: &Term, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({op} {arg})")
}

/// Write a rounding-mode-parameterized operator: `(op rm lhs rhs)`.
fn fmt_rm_binop(
    op: &str,
    rm: &Term,
    lhs: &Term,
    rhs: &Term,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "({op} {rm} {lhs} {rhs})")
}

/// Write a space-separated list of terms.
fn fmt_term_list(terms: &[Term], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, t) in terms.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{t}")?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // --- Literals ---
            Term::BoolLit(true) => write!(f, "true"),
            Term::BoolLit(false) => write!(f, "false"),
            Term::BitVecLit(value, width) => fmt_bv_lit(*value, *width, f),
            Term::FpFromBits(sign, exp, sig, eb, sb) => {
                fmt_fp_lit(*sign, *exp, *sig, *eb, *sb, f)
            }

            // --- Variables ---
            Term::Const(name) => fmt_symbol(name, f),

            // --- Boolean operations ---
            Term::Not(inner) => fmt_unop("not", inner, f),
            Term::And(terms) => {
                if terms.is_empty() {
                    write!(f, "true")
                } else {
                    write!(f, "(and ")?;
                    fmt_term_list(terms, f)?;
                    write!(f, ")")
                }
            }
            Term::Or(terms) => {
                if terms.is_empty() {
                    write!(f, "false")
                } else {
                    write!(f, "(or ")?;
                    fmt_term_list(terms, f)?;
                    write!(f, ")")
                }
            }
            Term::Xor(lhs, rhs) => fmt_binop("xor", lhs, rhs, f),

            // --- Core ---
            Term::Eq(lhs, rhs) => fmt_binop("=", lhs, rhs, f),

            // --- Bitvector arithmetic ---
            Term::BvAdd(a, b) => fmt_binop("bvadd", a, b, f),
            Term::BvSub(a, b) => fmt_binop("bvsub", a, b, f),
            Term::BvMul(a, b) => fmt_binop("bvmul", a, b, f),
            Term::BvSDiv(a, b) => fmt_binop("bvsdiv", a, b, f),
            Term::BvUDiv(a, b) => fmt_binop("bvudiv", a, b, f),
            Term::BvSRem(a, b) => fmt_binop("bvsrem", a, b, f),
            Term::BvURem(a, b) => fmt_binop("bvurem", a, b, f),
            Term::BvNeg(a) => fmt_unop("bvneg", a, f),

            // --- Bitvector comparison (signed) ---
            Term::BvSLt(a, b) => fmt_binop("bvslt", a, b, f),
            Term::BvSLe(a, b) => fmt_binop("bvsle", a, b, f),
            Term::BvSGt(a, b) => fmt_binop("bvsgt", a, b, f),
            Term::BvSGe(a, b) => fmt_binop("bvsge", a, b, f),

            // --- Bitvector comparison (unsigned) ---
            Term::BvULt(a, b) => fmt_binop("bvult", a, b, f),
            Term::BvULe(a, b) => fmt_binop("bvule", a, b, f),
            Term::BvUGt(a, b) => fmt_binop("bvugt", a, b, f),
            Term::BvUGe(a, b) => fmt_binop("bvuge", a, b, f),

            // --- Bitvector bitwise ---
            Term::BvAnd(a, b) => fmt_binop("bvand", a, b, f),
            Term::BvOr(a, b) => fmt_binop("bvor", a, b, f),
            Term::BvXor(a, b) => fmt_binop("bvxor", a, b, f),
            Term::BvNot(a) => fmt_unop("bvnot", a, f),
            Term::BvShl(a, b) => fmt_binop("bvshl", a, b, f),
            Term::BvLShr(a, b) => fmt_binop("bvlshr", a, b, f),
            Term::BvAShr(a, b) => fmt_binop("bvashr", a, b, f),

            // --- Floating-point arithmetic ---
            Term::FpAdd(rm, a, b) => fmt_rm_binop("fp.add", rm, a, b, f),
            Term::FpSub(rm, a, b) => fmt_rm_binop("fp.sub", rm, a, b, f),
            Term::FpMul(rm, a, b) => fmt_rm_binop("fp.mul", rm, a, b, f),
            Term::FpDiv(rm, a, b) => fmt_rm_binop("fp.div", rm, a, b, f),
            Term::FpRem(a, b) => fmt_binop("fp.rem", a, b, f),
            Term::FpNeg(a) => fmt_unop("fp.neg", a, f),

            // --- Floating-point comparison ---
            Term::FpEq(a, b) => fmt_binop("fp.eq", a, b, f),
            Term::FpLt(a, b) => fmt_binop("fp.lt", a, b, f),
            Term::FpLeq(a, b) => fmt_binop("fp.leq", a, b, f),
            Term::FpGt(a, b) => fmt_binop("fp.gt", a, b, f),
            Term::FpGeq(a, b) => fmt_binop("fp.geq", a, b, f),
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Comment(text) => write!(f, ";; {text}"),
            Command::DeclareConst(name, sort) => {
                write!(f, "(declare-const ")?;
                fmt_symbol(name, f)?;
                write!(f, " {sort})")
            }
            Command::Assert(term) => write!(f, "(assert {term})"),
            Command::CheckSat => write!(f, "(check-sat)"),
            Command::GetModel => write!(f, "(get-model)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use crate::command::Command;
    use crate::script::Script;
    use crate::sort::Sort;
    use crate::term::Term;

    fn var(name: &str) -> Term {
        Term::Const(name.to_string())
    }

    fn boxed(name: &str) -> Box<Term> {
        Box::new(var(name))
    }

    // -----------------------------------------------------------------------
    // Sort formatting
    // -----------------------------------------------------------------------

    #[test]
    fn sort_bool() {
        assert_eq!(Sort::Bool.to_string(), "Bool");
    }

    #[test]
    fn sort_bitvec() {
        assert_eq!(Sort::BitVec(32).to_string(), "(_ BitVec 32)");
        assert_eq!(Sort::BitVec(8).to_string(), "(_ BitVec 8)");
        assert_eq!(Sort::BitVec(64).to_string(), "(_ BitVec 64)");
    }

    #[test]
    fn sort_float() {
        assert_eq!(Sort::Float(8, 24).to_string(), "(_ FloatingPoint 8 24)");
        assert_eq!(Sort::Float(11, 53).to_string(), "(_ FloatingPoint 11 53)");
    }

    #[test]
    fn sort_rounding_mode() {
        assert_eq!(Sort::RoundingMode.to_string(), "RoundingMode");
    }

    // -----------------------------------------------------------------------
    // Term formatting — literals
    // -----------------------------------------------------------------------

    #[test]
    fn term_bool_lit() {
        assert_eq!(Term::BoolLit(true).to_string(), "true");
        assert_eq!(Term::BoolLit(false).to_string(), "false");
    }

    #[test]
    fn term_bitvec_lit_positive() {
        assert_eq!(Term::BitVecLit(0, 8).to_string(), "(_ bv0 8)");
        assert_eq!(Term::BitVecLit(255, 8).to_string(), "(_ bv255 8)");
        assert_eq!(Term::BitVecLit(42, 32).to_string(), "(_ bv42 32)");
    }

    #[test]
    fn term_bitvec_lit_negative() {
        // -1 in 8-bit two's complement = 255
        assert_eq!(Term::BitVecLit(-1, 8).to_string(), "(_ bv255 8)");
        // -128 in 8-bit = 128
        assert_eq!(Term::BitVecLit(-128, 8).to_string(), "(_ bv128 8)");
        // -1 in 32-bit = 4294967295
        assert_eq!(Term::BitVecLit(-1, 32).to_string(), "(_ bv4294967295 32)");
    }

    #[test]
    fn term_fp_lit_one_f32() {
        // 1.0f32 = 0 | 01111111 | 000...0
        assert_eq!(
            Term::fp_from_f32(1.0).to_string(),
            "(fp #b0 #b01111111 #b00000000000000000000000)"
        );
    }

    #[test]
    fn term_fp_lit_neg_zero_f64() {
        let t = Term::fp_from_f64(-0.0);
        let text = t.to_string();
        assert!(text.starts_with("(fp #b1 #b00000000000 #b"));
        assert!(text.ends_with(")"));
    }

    // -----------------------------------------------------------------------
    // Term formatting — symbols
    // -----------------------------------------------------------------------

    #[test]
    fn term_const_simple() {
        assert_eq!(var("x").to_string(), "x");
        assert_eq!(var("my_var").to_string(), "my_var");
    }

    #[test]
    fn term_const_quoted_when_not_simple() {
        assert_eq!(
            var("variable from expr: 'Foo()'").to_string(),
            "|variable from expr: 'Foo()'|"
        );
    }

    #[test]
    fn term_const_quoted_when_leading_digit() {
        assert_eq!(var("0x").to_string(), "|0x|");
    }

    #[test]
    fn term_const_pipe_replaced_inside_quotes() {
        assert_eq!(var("a|b").to_string(), "|a_b|");
    }

    // -----------------------------------------------------------------------
    // Term formatting — boolean operations
    // -----------------------------------------------------------------------

    #[test]
    fn term_not() {
        let t = Term::Not(Box::new(Term::BoolLit(true)));
        assert_eq!(t.to_string(), "(not true)");
    }

    #[test]
    fn term_and() {
        let t = Term::And(vec![var("a"), var("b")]);
        assert_eq!(t.to_string(), "(and a b)");
    }

    #[test]
    fn term_and_empty() {
        assert_eq!(Term::And(vec![]).to_string(), "true");
    }

    #[test]
    fn term_or() {
        let t = Term::Or(vec![var("a"), var("b"), var("c")]);
        assert_eq!(t.to_string(), "(or a b c)");
    }

    #[test]
    fn term_or_empty() {
        assert_eq!(Term::Or(vec![]).to_string(), "false");
    }

    #[test]
    fn term_xor() {
        let t = Term::Xor(boxed("p"), boxed("q"));
        assert_eq!(t.to_string(), "(xor p q)");
    }

    #[test]
    fn term_eq() {
        let t = Term::Eq(boxed("x"), Box::new(Term::BitVecLit(5, 32)));
        assert_eq!(t.to_string(), "(= x (_ bv5 32))");
    }

    // -----------------------------------------------------------------------
    // Term formatting — bitvector operations
    // -----------------------------------------------------------------------

    #[test]
    fn term_bv_arith() {
        assert_eq!(Term::BvAdd(boxed("x"), boxed("y")).to_string(), "(bvadd x y)");
        assert_eq!(Term::BvSub(boxed("x"), boxed("y")).to_string(), "(bvsub x y)");
        assert_eq!(Term::BvMul(boxed("x"), boxed("y")).to_string(), "(bvmul x y)");
        assert_eq!(Term::BvSDiv(boxed("a"), boxed("b")).to_string(), "(bvsdiv a b)");
        assert_eq!(Term::BvUDiv(boxed("a"), boxed("b")).to_string(), "(bvudiv a b)");
        assert_eq!(Term::BvSRem(boxed("a"), boxed("b")).to_string(), "(bvsrem a b)");
        assert_eq!(Term::BvURem(boxed("a"), boxed("b")).to_string(), "(bvurem a b)");
        assert_eq!(Term::BvNeg(boxed("x")).to_string(), "(bvneg x)");
    }

    #[test]
    fn term_bv_comparisons() {
        assert_eq!(Term::BvSLt(boxed("a"), boxed("b")).to_string(), "(bvslt a b)");
        assert_eq!(Term::BvSLe(boxed("a"), boxed("b")).to_string(), "(bvsle a b)");
        assert_eq!(Term::BvSGt(boxed("a"), boxed("b")).to_string(), "(bvsgt a b)");
        assert_eq!(Term::BvSGe(boxed("a"), boxed("b")).to_string(), "(bvsge a b)");
        assert_eq!(Term::BvULt(boxed("a"), boxed("b")).to_string(), "(bvult a b)");
        assert_eq!(Term::BvULe(boxed("a"), boxed("b")).to_string(), "(bvule a b)");
        assert_eq!(Term::BvUGt(boxed("a"), boxed("b")).to_string(), "(bvugt a b)");
        assert_eq!(Term::BvUGe(boxed("a"), boxed("b")).to_string(), "(bvuge a b)");
    }

    #[test]
    fn term_bv_bitwise() {
        assert_eq!(Term::BvAnd(boxed("a"), boxed("b")).to_string(), "(bvand a b)");
        assert_eq!(Term::BvOr(boxed("a"), boxed("b")).to_string(), "(bvor a b)");
        assert_eq!(Term::BvXor(boxed("a"), boxed("b")).to_string(), "(bvxor a b)");
        assert_eq!(Term::BvNot(boxed("x")).to_string(), "(bvnot x)");
        assert_eq!(Term::BvShl(boxed("a"), boxed("b")).to_string(), "(bvshl a b)");
        assert_eq!(Term::BvLShr(boxed("a"), boxed("b")).to_string(), "(bvlshr a b)");
        assert_eq!(Term::BvAShr(boxed("a"), boxed("b")).to_string(), "(bvashr a b)");
    }

    // -----------------------------------------------------------------------
    // Term formatting — floating-point operations
    // -----------------------------------------------------------------------

    #[test]
    fn term_fp_add_with_rounding_mode() {
        let t = Term::FpAdd(boxed("roundingmode"), boxed("x"), boxed("y"));
        assert_eq!(t.to_string(), "(fp.add roundingmode x y)");
    }

    #[test]
    fn term_fp_rem_has_no_rounding_mode() {
        let t = Term::FpRem(boxed("x"), boxed("y"));
        assert_eq!(t.to_string(), "(fp.rem x y)");
    }

    #[test]
    fn term_fp_comparisons() {
        assert_eq!(Term::FpEq(boxed("a"), boxed("b")).to_string(), "(fp.eq a b)");
        assert_eq!(Term::FpLt(boxed("a"), boxed("b")).to_string(), "(fp.lt a b)");
        assert_eq!(Term::FpLeq(boxed("a"), boxed("b")).to_string(), "(fp.leq a b)");
        assert_eq!(Term::FpGt(boxed("a"), boxed("b")).to_string(), "(fp.gt a b)");
        assert_eq!(Term::FpGeq(boxed("a"), boxed("b")).to_string(), "(fp.geq a b)");
        assert_eq!(Term::FpNeg(boxed("x")).to_string(), "(fp.neg x)");
    }

    // -----------------------------------------------------------------------
    // Term formatting — nested expressions
    // -----------------------------------------------------------------------

    #[test]
    fn term_nested() {
        // (and (bvsgt x (_ bv42 32)) (bvslt x (_ bv43 32)))
        let t = Term::And(vec![
            Term::BvSGt(boxed("x"), Box::new(Term::BitVecLit(42, 32))),
            Term::BvSLt(boxed("x"), Box::new(Term::BitVecLit(43, 32))),
        ]);
        assert_eq!(
            t.to_string(),
            "(and (bvsgt x (_ bv42 32)) (bvslt x (_ bv43 32)))"
        );
    }

    // -----------------------------------------------------------------------
    // Command formatting
    // -----------------------------------------------------------------------

    #[test]
    fn cmd_comment() {
        assert_eq!(
            Command::Comment("this is a comment".into()).to_string(),
            ";; this is a comment"
        );
    }

    #[test]
    fn cmd_declare_const() {
        assert_eq!(
            Command::DeclareConst("x".into(), Sort::BitVec(32)).to_string(),
            "(declare-const x (_ BitVec 32))"
        );
    }

    #[test]
    fn cmd_declare_const_quoted() {
        assert_eq!(
            Command::DeclareConst("variable from expr: 'Foo()'".into(), Sort::Bool).to_string(),
            "(declare-const |variable from expr: 'Foo()'| Bool)"
        );
    }

    #[test]
    fn cmd_declare_rounding_mode() {
        assert_eq!(
            Command::DeclareConst("roundingmode".into(), Sort::RoundingMode).to_string(),
            "(declare-const roundingmode RoundingMode)"
        );
    }

    #[test]
    fn cmd_assert() {
        assert_eq!(Command::Assert(Term::BoolLit(true)).to_string(), "(assert true)");
    }

    #[test]
    fn cmd_check_sat_and_get_model() {
        assert_eq!(Command::CheckSat.to_string(), "(check-sat)");
        assert_eq!(Command::GetModel.to_string(), "(get-model)");
    }

    // -----------------------------------------------------------------------
    // Script formatting
    // -----------------------------------------------------------------------

    #[test]
    fn script_empty() {
        assert_eq!(Script::new().to_string(), "");
    }

    #[test]
    fn script_full_query() {
        let s = Script::with_commands(vec![
            Command::Comment("satisfiability of `x > 0`".into()),
            Command::DeclareConst("x".into(), Sort::BitVec(32)),
            Command::Assert(Term::BvSGt(
                Box::new(Term::Const("x".into())),
                Box::new(Term::BitVecLit(0, 32)),
            )),
            Command::CheckSat,
            Command::GetModel,
        ]);
        assert_eq!(
            s.to_string(),
            "\
;; satisfiability of `x > 0`\n\
(declare-const x (_ BitVec 32))\n\
(assert (bvsgt x (_ bv0 32)))\n\
(check-sat)\n\
(get-model)"
        );
    }
}
