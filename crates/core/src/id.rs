//! Product identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::DomainError;

/// Identifier of a catalog product: the join key for selection.
///
/// Catalog files use either integers or strings. Equality is strict, so
/// `ProductId::Int(1)` and `ProductId::Text("1")` never match each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

/// Largest float magnitude that still maps onto `i64` without wrapping.
const I64_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

impl ProductId {
    /// Convert a raw JSON value into an identifier (catalog file: strict).
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| DomainError::invalid_id(format!("{n} is not an integer"))),
            Value::String(s) => Ok(Self::Text(s.clone())),
            other => Err(DomainError::invalid_id(format!(
                "expected a string or an integer, got {other}"
            ))),
        }
    }

    /// Best-effort conversion for caller-supplied ids.
    ///
    /// Integral numbers (`1`, `1.0`) become `Int`, strings become `Text`.
    /// Anything else (`1.5`, `null`, arrays, objects) can never match a catalog
    /// entry and yields `None`.
    pub fn from_requested(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Int).or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < I64_FLOAT_LIMIT)
                    .map(|f| Self::Int(f as i64))
            }),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Int(v) => core::fmt::Display::fmt(v, f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ProductId {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}
