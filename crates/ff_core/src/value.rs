//! The closed `FlagValue` discriminated union and its `TypeKind` tag
//! (spec.md §4.6). Nesting is permitted only inside `Object` fields.
//!
//! This is the type-erased representation a `Snapshot` actually stores
//! (spec.md §9 "Type-indexed registry under erasure"): `Feature<T, C>`
//! handles convert to/from `FlagValue` at the evaluation boundary and check
//! `TypeKind` before trusting the conversion.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The closed set of value kinds a feature can declare (spec.md §3, §4.6).
/// Reflection-based dispatch on a payload-provided type name is explicitly
/// out of scope (spec.md §9) — this enum is exhaustive and never extended
/// at runtime.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeKind {
    Boolean,
    String,
    Int64,
    Float64,
    /// `Enum(enum_type_id)` — the variant name itself is not part of the
    /// type, only which closed enum type the feature is declared against.
    Enum(&'static str),
    Object,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Boolean => f.write_str("BOOLEAN"),
            TypeKind::String => f.write_str("STRING"),
            TypeKind::Int64 => f.write_str("INT"),
            TypeKind::Float64 => f.write_str("DOUBLE"),
            TypeKind::Enum(id) => write!(f, "ENUM({id})"),
            TypeKind::Object => f.write_str("OBJECT"),
        }
    }
}

/// A value of one of the closed kinds in `TypeKind`. Snapshots, rules, and
/// default values all carry this type-erased representation; `Feature<T,C>`
/// is the typed view over it.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlagValue {
    Boolean(bool),
    String(String),
    Int64(i64),
    Float64(f64),
    Enum { enum_type: String, variant: String },
    Object(BTreeMap<String, FlagValue>),
}

impl FlagValue {
    pub fn kind(&self) -> TypeKindOwned {
        match self {
            FlagValue::Boolean(_) => TypeKindOwned::Boolean,
            FlagValue::String(_) => TypeKindOwned::String,
            FlagValue::Int64(_) => TypeKindOwned::Int64,
            FlagValue::Float64(_) => TypeKindOwned::Float64,
            FlagValue::Enum { enum_type, .. } => TypeKindOwned::Enum(enum_type.clone()),
            FlagValue::Object(_) => TypeKindOwned::Object,
        }
    }

    /// Whether this value's runtime kind matches a feature's declared
    /// `TypeKind`. Used at the evaluation boundary as the defense-in-depth
    /// check spec.md §9 describes ("should be impossible if serialization
    /// validates, but the check is defense in depth").
    pub fn matches_kind(&self, declared: TypeKind) -> bool {
        match (self, declared) {
            (FlagValue::Boolean(_), TypeKind::Boolean) => true,
            (FlagValue::String(_), TypeKind::String) => true,
            (FlagValue::Int64(_), TypeKind::Int64) => true,
            (FlagValue::Float64(_), TypeKind::Float64) => true,
            (FlagValue::Enum { enum_type, .. }, TypeKind::Enum(id)) => enum_type == id,
            (FlagValue::Object(_), TypeKind::Object) => true,
            _ => false,
        }
    }
}

/// Owned mirror of `TypeKind` (the `Enum` variant's payload can't be
/// `'static` once derived from a runtime `FlagValue`).
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TypeKindOwned {
    Boolean,
    String,
    Int64,
    Float64,
    Enum(String),
    Object,
}

impl fmt::Display for TypeKindOwned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKindOwned::Boolean => f.write_str("BOOLEAN"),
            TypeKindOwned::String => f.write_str("STRING"),
            TypeKindOwned::Int64 => f.write_str("INT"),
            TypeKindOwned::Float64 => f.write_str("DOUBLE"),
            TypeKindOwned::Enum(id) => write!(f, "ENUM({id})"),
            TypeKindOwned::Object => f.write_str("OBJECT"),
        }
    }
}

/// Error returned when a `FlagValue` cannot be converted to a concrete `T`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueKindMismatch {
    pub expected: &'static str,
    pub actual: TypeKindOwned,
}

impl fmt::Display for ValueKindMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got {}", self.expected, self.actual)
    }
}

macro_rules! impl_scalar_conversion {
    ($ty:ty, $variant:ident, $expected:literal) => {
        impl TryFrom<FlagValue> for $ty {
            type Error = ValueKindMismatch;
            fn try_from(v: FlagValue) -> Result<Self, Self::Error> {
                match v {
                    FlagValue::$variant(inner) => Ok(inner),
                    other => Err(ValueKindMismatch { expected: $expected, actual: other.kind() }),
                }
            }
        }

        impl From<$ty> for FlagValue {
            fn from(v: $ty) -> Self {
                FlagValue::$variant(v)
            }
        }
    };
}

impl_scalar_conversion!(bool, Boolean, "BOOLEAN");
impl_scalar_conversion!(String, String, "STRING");
impl_scalar_conversion!(i64, Int64, "INT");
impl_scalar_conversion!(f64, Float64, "DOUBLE");

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn scalar_round_trip() {
        let v: FlagValue = true.into();
        assert_eq!(bool::try_from(v).unwrap(), true);
    }

    #[test]
    fn mismatch_is_reported() {
        let v = FlagValue::Int64(1);
        let err = bool::try_from(v).unwrap_err();
        assert_eq!(err.expected, "BOOLEAN");
        assert_eq!(err.actual, TypeKindOwned::Int64);
    }

    #[test]
    fn enum_kind_matches_only_same_type_id() {
        let v = FlagValue::Enum { enum_type: "Plan".to_string(), variant: "Pro".to_string() };
        assert!(v.matches_kind(TypeKind::Enum("Plan")));
        assert!(!v.matches_kind(TypeKind::Enum("Tier")));
    }

    #[test]
    fn object_nesting() {
        let mut fields = BTreeMap::new();
        fields.insert("count".to_string(), FlagValue::Int64(3));
        let v = FlagValue::Object(fields);
        assert!(v.matches_kind(TypeKind::Object));
    }
}
