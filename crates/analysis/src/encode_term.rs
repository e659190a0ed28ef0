//! Translate typed expressions to SMT-LIB terms.
//!
//! The translator walks the expression tree bottom-up, mapping each node to a
//! [`TypedTerm`]. Sub-expressions it cannot model are degraded to opaque free
//! variables of their static type, so a condition containing a method call is
//! still analyzable as long as the call result only flows through supported
//! operators.

use std::collections::HashMap;

use satlint_smtlib::sort::Sort;
use satlint_smtlib::term::Term;

use crate::ast::{
    BinOp, ConstantValue, Expr, FloatTy, ResolvedBinaryOp, ResolvedUnaryOp, SourceType, UnOp,
};
use crate::encode_sort::{is_signed_type, sort_of};
use crate::typed_term::TypedTerm;

/// Why a node could not be translated.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// The construct is outside the modeled fragment. A clean abstention:
    /// callers degrade the node or give up on the whole expression, and
    /// nothing is logged.
    Unsupported(String),
    /// The input violated an invariant the host is supposed to guarantee
    /// (operand sort mismatch, an operator identity outside its family).
    /// Logged at the detection site; never degraded.
    Internal(String),
}

impl std::fmt::Display for TranslationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslationError::Unsupported(what) => write!(f, "unsupported construct: {what}"),
            TranslationError::Internal(what) => write!(f, "internal inconsistency: {what}"),
        }
    }
}

impl std::error::Error for TranslationError {}

/// Log and construct an [`TranslationError::Internal`].
fn internal(message: String) -> TranslationError {
    tracing::error!(error = %message, "internal inconsistency during translation");
    TranslationError::Internal(message)
}

/// Encode a host-evaluated constant as a term of the matching sort.
///
/// Integers become bit-exact bitvector literals of their declared width,
/// floats become IEEE bit-pattern literals. Strings and anything else the
/// theory fragment has no literal for yield `None`.
pub fn encode_constant(value: &ConstantValue) -> Option<TypedTerm> {
    match value {
        ConstantValue::Bool(b) => Some(TypedTerm::bool(Term::BoolLit(*b))),
        ConstantValue::Int(v, ity) => {
            let w = ity.bit_width();
            Some(TypedTerm::new(Sort::BitVec(w), Term::BitVecLit(i128::from(*v), w)))
        }
        ConstantValue::Uint(v, uty) => {
            let w = uty.bit_width();
            Some(TypedTerm::new(Sort::BitVec(w), Term::BitVecLit(i128::from(*v), w)))
        }
        ConstantValue::Char(c) => Some(TypedTerm::new(
            Sort::BitVec(16),
            Term::BitVecLit(i128::from(*c), 16),
        )),
        ConstantValue::Float(v, FloatTy::F32) => Some(TypedTerm::new(
            Sort::float32(),
            Term::fp_from_f32(*v as f32),
        )),
        ConstantValue::Float(v, FloatTy::F64) => {
            Some(TypedTerm::new(Sort::float64(), Term::fp_from_f64(*v)))
        }
        ConstantValue::Str(_) => None,
    }
}

/// Per-run table of free variables, keyed by binding identity.
///
/// Records `(name, sort)` declarations in first-binding order so the query
/// assembler emits exactly one `declare-const` per free variable.
#[derive(Debug, Default)]
struct FreeVariableTable {
    entries: HashMap<String, TypedTerm>,
    declarations: Vec<(String, Sort)>,
}

impl FreeVariableTable {
    fn get(&self, key: &str) -> Option<&TypedTerm> {
        self.entries.get(key)
    }

    fn insert(&mut self, key: String, name: String, term: TypedTerm) {
        self.declarations.push((name, term.sort.clone()));
        self.entries.insert(key, term);
    }
}

/// Operand classification driving operator dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperandClass {
    Bool,
    SignedBitVec,
    UnsignedBitVec,
    Float,
    /// No sort: strings, decimals, delegates, references.
    Unmodeled,
}

fn classify(ty: &SourceType) -> OperandClass {
    match sort_of(ty) {
        Some(Sort::Bool) => OperandClass::Bool,
        Some(Sort::BitVec(_)) if is_signed_type(ty) => OperandClass::SignedBitVec,
        Some(Sort::BitVec(_)) => OperandClass::UnsignedBitVec,
        Some(Sort::Float(_, _)) => OperandClass::Float,
        Some(Sort::RoundingMode) | None => OperandClass::Unmodeled,
    }
}

/// Name of the run-scoped symbolic rounding mode.
const ROUNDING_MODE_NAME: &str = "roundingmode";

/// Translates one expression tree per run.
///
/// Holds the run state: the free-variable table and the lazily created
/// rounding-mode symbol. Repeated translations through fresh translators are
/// deterministic and produce identical terms and declarations.
#[derive(Debug, Default)]
pub struct Translator {
    vars: FreeVariableTable,
    rounding_mode: Option<Term>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations accumulated so far, in first-binding order.
    pub fn declarations(&self) -> &[(String, Sort)] {
        &self.vars.declarations
    }

    /// The symbolic rounding mode, created and declared on first use. It is
    /// left unconstrained: a float property must hold under any rounding
    /// mode for the verdict to be trusted.
    fn rounding_mode(&mut self) -> Term {
        if let Some(term) = &self.rounding_mode {
            return term.clone();
        }
        let term = Term::Const(ROUNDING_MODE_NAME.to_string());
        self.vars
            .declarations
            .push((ROUNDING_MODE_NAME.to_string(), Sort::RoundingMode));
        self.rounding_mode = Some(term.clone());
        term
    }

    /// Bind a free variable: table lookup first, then sort mapping.
    ///
    /// `key` is the binding identity, `name` the emitted constant name. A key
    /// already bound at a different sort than `ty` maps to is an internal
    /// inconsistency.
    pub fn bind(
        &mut self,
        key: &str,
        name: &str,
        ty: &SourceType,
    ) -> Result<TypedTerm, TranslationError> {
        let sort = sort_of(ty).ok_or_else(|| {
            TranslationError::Unsupported(format!("no sort for type of variable '{name}'"))
        })?;
        if let Some(existing) = self.vars.get(key) {
            if existing.sort != sort {
                return Err(internal(format!(
                    "variable '{name}' rebound at sort {sort} (was {existing_sort})",
                    existing_sort = existing.sort
                )));
            }
            return Ok(existing.clone());
        }
        let term = TypedTerm::new(sort, Term::Const(name.to_string()));
        self.vars
            .insert(key.to_string(), name.to_string(), term.clone());
        Ok(term)
    }

    /// Translate an expression to a term of its sort.
    pub fn translate(&mut self, expr: &Expr) -> Result<TypedTerm, TranslationError> {
        match expr {
            Expr::Literal { value, .. } => encode_constant(value).ok_or_else(|| {
                TranslationError::Unsupported(format!("constant '{value}' has no literal form"))
            }),
            Expr::Variable { name, decl_id, ty } => {
                self.bind(&format!("decl#{decl_id}"), name, ty)
            }
            Expr::Unary {
                operand, resolved, ..
            } => match resolved {
                Some(r) => self.translate_unary(r, operand),
                None => Err(TranslationError::Unsupported(
                    "unresolved unary operator".to_string(),
                )),
            },
            Expr::Binary {
                lhs, rhs, resolved, ..
            } => match resolved {
                Some(r) => self.translate_binary(r, lhs, rhs),
                None => Err(TranslationError::Unsupported(
                    "unresolved binary operator".to_string(),
                )),
            },
            Expr::Unsupported { constant, text, .. } => match constant {
                Some(value) => encode_constant(value).ok_or_else(|| {
                    TranslationError::Unsupported(format!(
                        "constant of '{text}' has no literal form"
                    ))
                }),
                None => Err(TranslationError::Unsupported(format!(
                    "expression shape of '{text}'"
                ))),
            },
        }
    }

    /// Translate a sub-expression, degrading an unsupported one to an opaque
    /// free variable of its static type.
    ///
    /// The variable is keyed and named by the sub-expression's textual
    /// rendering, so the same untranslatable fragment appearing twice maps to
    /// the same symbol. Internal inconsistencies propagate undampened.
    pub fn accept(&mut self, expr: &Expr) -> Result<TypedTerm, TranslationError> {
        match self.translate(expr) {
            Ok(term) => Ok(term),
            Err(TranslationError::Unsupported(_)) => {
                let name = format!("variable from expr: '{expr}'");
                self.bind(&name, &name, expr.ty())
            }
            Err(err @ TranslationError::Internal(_)) => Err(err),
        }
    }

    fn translate_unary(
        &mut self,
        r: &ResolvedUnaryOp,
        operand: &Expr,
    ) -> Result<TypedTerm, TranslationError> {
        let operand = self.accept(operand)?;
        match (r.op, classify(&r.operand_ty)) {
            (UnOp::BitNot, OperandClass::SignedBitVec | OperandClass::UnsignedBitVec) => {
                let (t, w) = self.expect_bitvec(&operand, "~")?;
                Ok(TypedTerm::new(Sort::BitVec(w), Term::BvNot(Box::new(t))))
            }
            (UnOp::Not, OperandClass::Bool) => {
                let t = self.expect_bool(&operand, "!")?;
                Ok(TypedTerm::bool(Term::Not(Box::new(t))))
            }
            (UnOp::Neg, OperandClass::SignedBitVec) => {
                let (t, w) = self.expect_bitvec(&operand, "-")?;
                Ok(TypedTerm::new(Sort::BitVec(w), Term::BvNeg(Box::new(t))))
            }
            (UnOp::Neg, OperandClass::Float) => {
                let (t, e, s) = self.expect_float(&operand, "-")?;
                Ok(TypedTerm::new(Sort::Float(e, s), Term::FpNeg(Box::new(t))))
            }
            (UnOp::Plus, _) => Ok(operand),
            (op, class) => Err(TranslationError::Unsupported(format!(
                "unary operator {token} on {class:?} operand",
                token = op.token()
            ))),
        }
    }

    fn translate_binary(
        &mut self,
        r: &ResolvedBinaryOp,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<TypedTerm, TranslationError> {
        let lhs = self.accept(lhs)?;
        let rhs = self.accept(rhs)?;
        match classify(&r.result_ty) {
            OperandClass::Bool => self.bool_result_binary(r, lhs, rhs),
            OperandClass::SignedBitVec | OperandClass::UnsignedBitVec => {
                self.integer_result_binary(r, lhs, rhs)
            }
            OperandClass::Float => self.float_result_binary(r, lhs, rhs),
            OperandClass::Unmodeled => Err(TranslationError::Unsupported(format!(
                "operator {token} with unmodeled result type",
                token = r.op.token()
            ))),
        }
    }

    /// Operators producing a boolean: equality, orderings, connectives.
    fn bool_result_binary(
        &mut self,
        r: &ResolvedBinaryOp,
        lhs: TypedTerm,
        rhs: TypedTerm,
    ) -> Result<TypedTerm, TranslationError> {
        use OperandClass::*;
        let op = r.op;
        let class = classify(&r.operand_ty);
        let term = match (op, class) {
            // Equality over types outside the fragment is recognized and
            // declined without logging.
            (BinOp::Eq | BinOp::Ne, Unmodeled) => {
                return Err(TranslationError::Unsupported(
                    "equality over unmodeled operand type".to_string(),
                ));
            }
            (BinOp::Eq | BinOp::Ne, Bool) => {
                let l = self.expect_bool(&lhs, op.token())?;
                let r = self.expect_bool(&rhs, op.token())?;
                Term::Eq(Box::new(l), Box::new(r))
            }
            (BinOp::Eq | BinOp::Ne, SignedBitVec | UnsignedBitVec) => {
                let (l, r, _) = self.bitvec_pair(&lhs, &rhs, op.token())?;
                Term::Eq(Box::new(l), Box::new(r))
            }
            // IEEE equality, not bit equality: NaN != NaN, -0 == +0.
            (BinOp::Eq | BinOp::Ne, Float) => {
                let (l, r, _) = self.float_pair(&lhs, &rhs, op.token())?;
                Term::FpEq(Box::new(l), Box::new(r))
            }
            // Short-circuit and eager forms coincide in a side-effect-free
            // formula.
            (BinOp::And | BinOp::AndAlso, Bool) => {
                let l = self.expect_bool(&lhs, op.token())?;
                let r = self.expect_bool(&rhs, op.token())?;
                Term::And(vec![l, r])
            }
            (BinOp::Or | BinOp::OrElse, Bool) => {
                let l = self.expect_bool(&lhs, op.token())?;
                let r = self.expect_bool(&rhs, op.token())?;
                Term::Or(vec![l, r])
            }
            (BinOp::Xor, Bool) => {
                let l = self.expect_bool(&lhs, op.token())?;
                let r = self.expect_bool(&rhs, op.token())?;
                Term::Xor(Box::new(l), Box::new(r))
            }
            (BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge, SignedBitVec) => {
                let (l, r, _) = self.bitvec_pair(&lhs, &rhs, op.token())?;
                let (l, r) = (Box::new(l), Box::new(r));
                match op {
                    BinOp::Lt => Term::BvSLt(l, r),
                    BinOp::Le => Term::BvSLe(l, r),
                    BinOp::Gt => Term::BvSGt(l, r),
                    _ => Term::BvSGe(l, r),
                }
            }
            (BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge, UnsignedBitVec) => {
                let (l, r, _) = self.bitvec_pair(&lhs, &rhs, op.token())?;
                let (l, r) = (Box::new(l), Box::new(r));
                match op {
                    BinOp::Lt => Term::BvULt(l, r),
                    BinOp::Le => Term::BvULe(l, r),
                    BinOp::Gt => Term::BvUGt(l, r),
                    _ => Term::BvUGe(l, r),
                }
            }
            (BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge, Float) => {
                let (l, r, _) = self.float_pair(&lhs, &rhs, op.token())?;
                let (l, r) = (Box::new(l), Box::new(r));
                match op {
                    BinOp::Lt => Term::FpLt(l, r),
                    BinOp::Le => Term::FpLeq(l, r),
                    BinOp::Gt => Term::FpGt(l, r),
                    _ => Term::FpGeq(l, r),
                }
            }
            (op, class) => {
                return Err(internal(format!(
                    "boolean-result operator {token} unmatched for {class:?} operands",
                    token = op.token()
                )));
            }
        };
        let term = if op == BinOp::Ne {
            Term::Not(Box::new(term))
        } else {
            term
        };
        Ok(TypedTerm::bool(term))
    }

    /// Operators producing an integer: wraparound arithmetic, bitwise, shifts.
    fn integer_result_binary(
        &mut self,
        r: &ResolvedBinaryOp,
        lhs: TypedTerm,
        rhs: TypedTerm,
    ) -> Result<TypedTerm, TranslationError> {
        let signed = is_signed_type(&r.operand_ty);
        let op = r.op;
        let (l, rr, width) = self.bitvec_pair(&lhs, &rhs, op.token())?;
        let (l, rr) = (Box::new(l), Box::new(rr));
        let term = match op {
            BinOp::Add => Term::BvAdd(l, rr),
            BinOp::Sub => Term::BvSub(l, rr),
            BinOp::Mul => Term::BvMul(l, rr),
            BinOp::Div if signed => Term::BvSDiv(l, rr),
            BinOp::Div => Term::BvUDiv(l, rr),
            BinOp::Rem if signed => Term::BvSRem(l, rr),
            BinOp::Rem => Term::BvURem(l, rr),
            BinOp::And => Term::BvAnd(l, rr),
            BinOp::Or => Term::BvOr(l, rr),
            BinOp::Xor => Term::BvXor(l, rr),
            BinOp::Shl => Term::BvShl(l, rr),
            // Right shift follows the operand's signedness: arithmetic for
            // signed types, logical for unsigned.
            BinOp::Shr if signed => Term::BvAShr(l, rr),
            BinOp::Shr => Term::BvLShr(l, rr),
            op => {
                return Err(internal(format!(
                    "integer-result operator {token} unmatched",
                    token = op.token()
                )));
            }
        };
        Ok(TypedTerm::new(Sort::BitVec(width), term))
    }

    /// Operators producing a float. Arithmetic takes the run's symbolic
    /// rounding mode; remainder is rounding-independent.
    fn float_result_binary(
        &mut self,
        r: &ResolvedBinaryOp,
        lhs: TypedTerm,
        rhs: TypedTerm,
    ) -> Result<TypedTerm, TranslationError> {
        let op = r.op;
        let (l, rr, (e, s)) = self.float_pair(&lhs, &rhs, op.token())?;
        let (l, rr) = (Box::new(l), Box::new(rr));
        let term = match op {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => {
                let rm = Box::new(self.rounding_mode());
                match op {
                    BinOp::Add => Term::FpAdd(rm, l, rr),
                    BinOp::Sub => Term::FpSub(rm, l, rr),
                    BinOp::Mul => Term::FpMul(rm, l, rr),
                    _ => Term::FpDiv(rm, l, rr),
                }
            }
            BinOp::Rem => Term::FpRem(l, rr),
            op => {
                return Err(internal(format!(
                    "float-result operator {token} unmatched",
                    token = op.token()
                )));
            }
        };
        Ok(TypedTerm::new(Sort::Float(e, s), term))
    }

    fn expect_bool(&self, t: &TypedTerm, op: &str) -> Result<Term, TranslationError> {
        t.as_bool().cloned().ok_or_else(|| {
            internal(format!(
                "operand of {op} is {sort}, expected Bool",
                sort = t.sort
            ))
        })
    }

    fn expect_bitvec(&self, t: &TypedTerm, op: &str) -> Result<(Term, u32), TranslationError> {
        t.as_bitvec()
            .map(|(term, w)| (term.clone(), w))
            .ok_or_else(|| {
                internal(format!(
                    "operand of {op} is {sort}, expected a bitvector",
                    sort = t.sort
                ))
            })
    }

    fn expect_float(&self, t: &TypedTerm, op: &str) -> Result<(Term, u32, u32), TranslationError> {
        t.as_float()
            .map(|(term, e, s)| (term.clone(), e, s))
            .ok_or_else(|| {
                internal(format!(
                    "operand of {op} is {sort}, expected a float",
                    sort = t.sort
                ))
            })
    }

    /// Both operands as bitvectors of equal width.
    fn bitvec_pair(
        &self,
        lhs: &TypedTerm,
        rhs: &TypedTerm,
        op: &str,
    ) -> Result<(Term, Term, u32), TranslationError> {
        let (l, lw) = self.expect_bitvec(lhs, op)?;
        let (r, rw) = self.expect_bitvec(rhs, op)?;
        if lw != rw {
            return Err(internal(format!(
                "operands of {op} have mismatched widths {lw} and {rw}"
            )));
        }
        Ok((l, r, lw))
    }

    /// Both operands as floats of the same format.
    fn float_pair(
        &self,
        lhs: &TypedTerm,
        rhs: &TypedTerm,
        op: &str,
    ) -> Result<(Term, Term, (u32, u32)), TranslationError> {
        let (l, le, ls) = self.expect_float(lhs, op)?;
        let (r, re, rs) = self.expect_float(rhs, op)?;
        if (le, ls) != (re, rs) {
            return Err(internal(format!(
                "operands of {op} have mismatched float formats ({le},{ls}) and ({re},{rs})"
            )));
        }
        Ok((l, r, (le, ls)))
    }
}
