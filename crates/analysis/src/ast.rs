//! Typed expression tree supplied by the host language services.
//!
//! The tree is a closed enum: every node carries the facts the host type
//! resolver established (static type, constant value, operator resolution),
//! and the translator matches on it exhaustively. The `Display` impl produces
//! the C-style textual rendering used to name opaque free variables.

use std::fmt;

/// Signed integer widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntTy {
    I8,
    I16,
    I32,
    I64,
}

impl IntTy {
    pub fn bit_width(&self) -> u32 {
        match self {
            IntTy::I8 => 8,
            IntTy::I16 => 16,
            IntTy::I32 => 32,
            IntTy::I64 => 64,
        }
    }
}

/// Unsigned integer widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintTy {
    U8,
    U16,
    U32,
    U64,
}

impl UintTy {
    pub fn bit_width(&self) -> u32 {
        match self {
            UintTy::U8 => 8,
            UintTy::U16 => 16,
            UintTy::U32 => 32,
            UintTy::U64 => 64,
        }
    }
}

/// Floating-point widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatTy {
    F32,
    F64,
}

impl FloatTy {
    pub fn bit_width(&self) -> u32 {
        match self {
            FloatTy::F32 => 32,
            FloatTy::F64 => 64,
        }
    }
}

/// Static type of an expression node, as resolved by the host.
///
/// `Enum` carries its underlying integer representation; `Named` covers every
/// type the analysis does not model (classes, interfaces, delegates, strings,
/// decimals) and never maps to a solver sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceType {
    Bool,
    Int(IntTy),
    Uint(UintTy),
    /// 16-bit unsigned code unit.
    Char,
    Float(FloatTy),
    Enum(String, Box<SourceType>),
    Named(String),
}

impl SourceType {
    pub fn is_bool(&self) -> bool {
        matches!(self, SourceType::Bool)
    }

    /// Convenience constructor for an enum type over an integer underlying.
    pub fn enumeration(name: impl Into<String>, underlying: SourceType) -> Self {
        SourceType::Enum(name.into(), Box::new(underlying))
    }

    pub fn named(name: impl Into<String>) -> Self {
        SourceType::Named(name.into())
    }
}

/// A constant value the host evaluated at resolution time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Bool(bool),
    Int(i64, IntTy),
    Uint(u64, UintTy),
    Char(u16),
    Float(f64, FloatTy),
    Str(String),
}

/// Binary operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Short-circuit `&&`
    AndAlso,
    /// Short-circuit `||`
    OrElse,
}

impl BinOp {
    /// Source token text.
    pub fn token(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::And => "&",
            BinOp::Or => "|",
            BinOp::Xor => "^",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::AndAlso => "&&",
            BinOp::OrElse => "||",
        }
    }
}

/// Unary operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    /// Logical `!`
    Not,
    /// Bitwise `~`
    BitNot,
    /// Arithmetic `-`
    Neg,
    /// Unary `+`
    Plus,
}

impl UnOp {
    pub fn token(&self) -> &'static str {
        match self {
            UnOp::Not => "!",
            UnOp::BitNot => "~",
            UnOp::Neg => "-",
            UnOp::Plus => "+",
        }
    }
}

/// Host resolution of a binary operator application.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBinaryOp {
    pub op: BinOp,
    pub operand_ty: SourceType,
    pub result_ty: SourceType,
}

/// Host resolution of a unary operator application.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUnaryOp {
    pub op: UnOp,
    pub operand_ty: SourceType,
    pub result_ty: SourceType,
}

/// A typed expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal carrying its evaluated constant value.
    Literal { value: ConstantValue, ty: SourceType },
    /// A reference to a declared local or parameter. `decl_id` is the
    /// declared-symbol identity used as the binding key; `name` is the
    /// symbol's short name used for the solver constant.
    Variable {
        name: String,
        decl_id: u64,
        ty: SourceType,
    },
    /// A unary operator application. `resolved` is `None` when the host
    /// could not resolve the operator.
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        resolved: Option<ResolvedUnaryOp>,
        ty: SourceType,
    },
    /// A binary operator application.
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        resolved: Option<ResolvedBinaryOp>,
        ty: SourceType,
    },
    /// Any node shape the analysis does not model (calls, field accesses,
    /// casts, ...). Carries its source text and, when the host could fold it,
    /// its constant value.
    Unsupported {
        text: String,
        ty: SourceType,
        constant: Option<ConstantValue>,
    },
}

impl Expr {
    /// Static type of this node.
    pub fn ty(&self) -> &SourceType {
        match self {
            Expr::Literal { ty, .. }
            | Expr::Variable { ty, .. }
            | Expr::Unary { ty, .. }
            | Expr::Binary { ty, .. }
            | Expr::Unsupported { ty, .. } => ty,
        }
    }

    pub fn literal(value: ConstantValue, ty: SourceType) -> Expr {
        Expr::Literal { value, ty }
    }

    pub fn variable(name: impl Into<String>, decl_id: u64, ty: SourceType) -> Expr {
        Expr::Variable {
            name: name.into(),
            decl_id,
            ty,
        }
    }

    /// Binary node with a successful resolution whose operand and result
    /// types are given explicitly.
    pub fn binary(
        op: BinOp,
        lhs: Expr,
        rhs: Expr,
        operand_ty: SourceType,
        result_ty: SourceType,
    ) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            resolved: Some(ResolvedBinaryOp {
                op,
                operand_ty,
                result_ty: result_ty.clone(),
            }),
            ty: result_ty,
        }
    }

    /// Binary node the host failed to resolve.
    pub fn binary_unresolved(op: BinOp, lhs: Expr, rhs: Expr, ty: SourceType) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            resolved: None,
            ty,
        }
    }

    pub fn unary(op: UnOp, operand: Expr, operand_ty: SourceType, result_ty: SourceType) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
            resolved: Some(ResolvedUnaryOp {
                op,
                operand_ty,
                result_ty: result_ty.clone(),
            }),
            ty: result_ty,
        }
    }

    pub fn unsupported(text: impl Into<String>, ty: SourceType) -> Expr {
        Expr::Unsupported {
            text: text.into(),
            ty,
            constant: None,
        }
    }

    pub fn unsupported_const(
        text: impl Into<String>,
        ty: SourceType,
        constant: ConstantValue,
    ) -> Expr {
        Expr::Unsupported {
            text: text.into(),
            ty,
            constant: Some(constant),
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Bool(true) => write!(f, "true"),
            ConstantValue::Bool(false) => write!(f, "false"),
            ConstantValue::Int(v, _) => write!(f, "{v}"),
            ConstantValue::Uint(v, _) => write!(f, "{v}"),
            ConstantValue::Char(c) => match char::from_u32(u32::from(*c)) {
                Some(c) => write!(f, "'{c}'"),
                None => write!(f, "'\\u{c:04x}'"),
            },
            ConstantValue::Float(v, _) => write!(f, "{v}"),
            ConstantValue::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Wrap nested operator applications in parentheses so the rendering stays
/// unambiguous without tracking precedence.
fn fmt_child(child: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match child {
        Expr::Binary { .. } | Expr::Unary { .. } => write!(f, "({child})"),
        _ => write!(f, "{child}"),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value, .. } => write!(f, "{value}"),
            Expr::Variable { name, .. } => write!(f, "{name}"),
            Expr::Unary { op, operand, .. } => {
                write!(f, "{}", op.token())?;
                fmt_child(operand, f)
            }
            Expr::Binary { op, lhs, rhs, .. } => {
                fmt_child(lhs, f)?;
                write!(f, " {} ", op.token())?;
                fmt_child(rhs, f)
            }
            Expr::Unsupported { text, .. } => write!(f, "{text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int32() -> SourceType {
        SourceType::Int(IntTy::I32)
    }

    #[test]
    fn bit_widths() {
        assert_eq!(IntTy::I8.bit_width(), 8);
        assert_eq!(IntTy::I64.bit_width(), 64);
        assert_eq!(UintTy::U16.bit_width(), 16);
        assert_eq!(FloatTy::F32.bit_width(), 32);
        assert_eq!(FloatTy::F64.bit_width(), 64);
    }

    #[test]
    fn ty_accessor() {
        let e = Expr::variable("x", 1, int32());
        assert_eq!(e.ty(), &int32());

        let e = Expr::binary(
            BinOp::Gt,
            Expr::variable("x", 1, int32()),
            Expr::literal(ConstantValue::Int(0, IntTy::I32), int32()),
            int32(),
            SourceType::Bool,
        );
        assert!(e.ty().is_bool());
    }

    #[test]
    fn binary_constructor_records_resolution() {
        let e = Expr::binary(
            BinOp::Add,
            Expr::variable("a", 1, int32()),
            Expr::variable("b", 2, int32()),
            int32(),
            int32(),
        );
        match e {
            Expr::Binary { resolved: Some(r), .. } => {
                assert_eq!(r.op, BinOp::Add);
                assert_eq!(r.operand_ty, int32());
                assert_eq!(r.result_ty, int32());
            }
            _ => panic!("expected resolved binary"),
        }
    }

    #[test]
    fn display_renders_source_text() {
        let e = Expr::binary(
            BinOp::AndAlso,
            Expr::binary(
                BinOp::Gt,
                Expr::variable("x", 1, int32()),
                Expr::literal(ConstantValue::Int(0, IntTy::I32), int32()),
                int32(),
                SourceType::Bool,
            ),
            Expr::binary(
                BinOp::Lt,
                Expr::variable("x", 1, int32()),
                Expr::literal(ConstantValue::Int(10, IntTy::I32), int32()),
                int32(),
                SourceType::Bool,
            ),
            SourceType::Bool,
            SourceType::Bool,
        );
        assert_eq!(e.to_string(), "(x > 0) && (x < 10)");
    }

    #[test]
    fn display_unary_and_unsupported() {
        let e = Expr::unary(
            UnOp::Not,
            Expr::variable("flag", 7, SourceType::Bool),
            SourceType::Bool,
            SourceType::Bool,
        );
        assert_eq!(e.to_string(), "!flag");

        let e = Expr::unsupported("Foo.Bar(x)", SourceType::Bool);
        assert_eq!(e.to_string(), "Foo.Bar(x)");
    }

    #[test]
    fn display_constant_values() {
        assert_eq!(ConstantValue::Bool(true).to_string(), "true");
        assert_eq!(ConstantValue::Int(-5, IntTy::I32).to_string(), "-5");
        assert_eq!(ConstantValue::Char(65).to_string(), "'A'");
        assert_eq!(ConstantValue::Str("hi".into()).to_string(), "\"hi\"");
    }
}
