//! The closed `FlagValue` wire discriminated union (spec.md §4.6).
//!
//! Nesting is only valid inside `OBJECT.fields`; any other arrangement is
//! rejected by `serde_json` itself as an unknown variant, which this crate
//! reports as `ParseError::InvalidSnapshot`.

use ff_core::value::FlagValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FlagValueWire {
    #[serde(rename = "BOOLEAN")]
    Boolean { value: bool },
    #[serde(rename = "STRING")]
    String { value: String },
    #[serde(rename = "INT")]
    Int64 { value: i64 },
    #[serde(rename = "DOUBLE")]
    Float64 { value: f64 },
    #[serde(rename = "ENUM")]
    Enum {
        #[serde(rename = "enum")]
        enum_type: String,
        variant: String,
    },
    #[serde(rename = "OBJECT")]
    Object { fields: BTreeMap<String, FlagValueWire> },
}

impl From<FlagValueWire> for FlagValue {
    fn from(w: FlagValueWire) -> Self {
        match w {
            FlagValueWire::Boolean { value } => FlagValue::Boolean(value),
            FlagValueWire::String { value } => FlagValue::String(value),
            FlagValueWire::Int64 { value } => FlagValue::Int64(value),
            FlagValueWire::Float64 { value } => FlagValue::Float64(value),
            FlagValueWire::Enum { enum_type, variant } => FlagValue::Enum { enum_type, variant },
            FlagValueWire::Object { fields } => {
                FlagValue::Object(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<FlagValue> for FlagValueWire {
    fn from(v: FlagValue) -> Self {
        match v {
            FlagValue::Boolean(value) => FlagValueWire::Boolean { value },
            FlagValue::String(value) => FlagValueWire::String { value },
            FlagValue::Int64(value) => FlagValueWire::Int64 { value },
            FlagValue::Float64(value) => FlagValueWire::Float64 { value },
            FlagValue::Enum { enum_type, variant } => FlagValueWire::Enum { enum_type, variant },
            FlagValue::Object(fields) => {
                FlagValueWire::Object { fields: fields.into_iter().map(|(k, v)| (k, v.into())).collect() }
            }
        }
    }
}
