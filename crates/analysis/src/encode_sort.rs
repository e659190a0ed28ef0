//! Map source types to SMT-LIB sorts.

use satlint_smtlib::sort::Sort;

use crate::ast::{FloatTy, SourceType};

/// Convert a source type to an SMT-LIB sort, when one exists.
///
/// # Mapping
///
/// - enum types → the sort of their underlying integer type
/// - `bool` → `Bool`
/// - signed/unsigned 8/16/32/64-bit integers → `(_ BitVec N)`
/// - `char` → `(_ BitVec 16)` (UTF-16 code unit)
/// - `f32` → `(_ FloatingPoint 8 24)`
/// - `f64` → `(_ FloatingPoint 11 53)`
/// - anything else → `None` (strings, decimals, references, delegates)
pub fn sort_of(ty: &SourceType) -> Option<Sort> {
    match ty {
        SourceType::Enum(name, underlying) => {
            tracing::trace!(enum_name = %name, "encoding enum as its underlying type");
            sort_of(underlying)
        }
        SourceType::Bool => Some(Sort::Bool),
        SourceType::Int(ity) => Some(Sort::BitVec(ity.bit_width())),
        SourceType::Uint(uty) => Some(Sort::BitVec(uty.bit_width())),
        SourceType::Char => Some(Sort::BitVec(16)),
        SourceType::Float(FloatTy::F32) => Some(Sort::float32()),
        SourceType::Float(FloatTy::F64) => Some(Sort::float64()),
        SourceType::Named(_) => None,
    }
}

/// Bit width of a type's sort, when it has one.
pub fn type_bit_width(ty: &SourceType) -> Option<u32> {
    match sort_of(ty)? {
        Sort::BitVec(w) => Some(w),
        Sort::Float(e, s) => Some(e + s),
        Sort::Bool | Sort::RoundingMode => None,
    }
}

/// Whether a type uses signed comparison and arithmetic operators.
///
/// Enums inherit the signedness of their underlying type. `char` is an
/// unsigned code unit.
pub fn is_signed_type(ty: &SourceType) -> bool {
    match ty {
        SourceType::Int(_) => true,
        SourceType::Float(_) => true,
        SourceType::Enum(_, underlying) => is_signed_type(underlying),
        SourceType::Bool | SourceType::Uint(_) | SourceType::Char | SourceType::Named(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{IntTy, UintTy};

    #[test]
    fn bool_maps_to_bool() {
        assert_eq!(sort_of(&SourceType::Bool), Some(Sort::Bool));
    }

    #[test]
    fn integers_map_to_bitvectors() {
        assert_eq!(sort_of(&SourceType::Int(IntTy::I8)), Some(Sort::BitVec(8)));
        assert_eq!(sort_of(&SourceType::Int(IntTy::I16)), Some(Sort::BitVec(16)));
        assert_eq!(sort_of(&SourceType::Int(IntTy::I32)), Some(Sort::BitVec(32)));
        assert_eq!(sort_of(&SourceType::Int(IntTy::I64)), Some(Sort::BitVec(64)));
        assert_eq!(sort_of(&SourceType::Uint(UintTy::U8)), Some(Sort::BitVec(8)));
        assert_eq!(sort_of(&SourceType::Uint(UintTy::U64)), Some(Sort::BitVec(64)));
    }

    #[test]
    fn char_is_a_16_bit_code_unit() {
        assert_eq!(sort_of(&SourceType::Char), Some(Sort::BitVec(16)));
    }

    #[test]
    fn floats_map_to_ieee_sorts() {
        assert_eq!(sort_of(&SourceType::Float(FloatTy::F32)), Some(Sort::Float(8, 24)));
        assert_eq!(sort_of(&SourceType::Float(FloatTy::F64)), Some(Sort::Float(11, 53)));
    }

    #[test]
    fn enum_maps_to_underlying() {
        let color = SourceType::enumeration("Color", SourceType::Int(IntTy::I32));
        assert_eq!(sort_of(&color), Some(Sort::BitVec(32)));

        let flags = SourceType::enumeration("Flags", SourceType::Uint(UintTy::U8));
        assert_eq!(sort_of(&flags), Some(Sort::BitVec(8)));
    }

    #[test]
    fn unsupported_types_have_no_sort() {
        assert_eq!(sort_of(&SourceType::named("String")), None);
        assert_eq!(sort_of(&SourceType::named("System.Decimal")), None);
    }

    #[test]
    fn sort_mapping_is_deterministic() {
        let ty = SourceType::enumeration("E", SourceType::Int(IntTy::I16));
        assert_eq!(sort_of(&ty), sort_of(&ty));
    }

    #[test]
    fn bit_widths() {
        assert_eq!(type_bit_width(&SourceType::Int(IntTy::I32)), Some(32));
        assert_eq!(type_bit_width(&SourceType::Char), Some(16));
        assert_eq!(type_bit_width(&SourceType::Float(FloatTy::F64)), Some(64));
        assert_eq!(type_bit_width(&SourceType::Bool), None);
        assert_eq!(type_bit_width(&SourceType::named("String")), None);
    }

    #[test]
    fn signedness() {
        assert!(is_signed_type(&SourceType::Int(IntTy::I8)));
        assert!(is_signed_type(&SourceType::Float(FloatTy::F32)));
        assert!(!is_signed_type(&SourceType::Uint(UintTy::U32)));
        assert!(!is_signed_type(&SourceType::Char));
        assert!(is_signed_type(&SourceType::enumeration(
            "E",
            SourceType::Int(IntTy::I32)
        )));
        assert!(!is_signed_type(&SourceType::enumeration(
            "F",
            SourceType::Uint(UintTy::U16)
        )));
    }
}
