//! The scalar stored in every setting.
//!
//! Values are persisted as their JSON encoding, which keeps booleans,
//! integers, floats, and strings distinguishable on the way back out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A typed scalar setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Human-readable name of the variant, used in type mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, and integers widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Encode for storage.
    ///
    /// Non-finite floats are rejected: JSON has no representation for them
    /// and they would come back as `null`.
    pub fn encode(&self) -> Result<String> {
        if let Value::Float(f) = self {
            if !f.is_finite() {
                return Err(Error::Validation(format!(
                    "cannot store non-finite float {f}"
                )));
            }
        }
        serde_json::to_string(self).map_err(|e| Error::Internal(e.to_string()))
    }

    /// Decode a stored value. Only JSON scalars are accepted.
    pub fn decode(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions into Value
// ---------------------------------------------------------------------------

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Conversions out of Value
// ---------------------------------------------------------------------------

fn mismatch(expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        v.as_bool().ok_or_else(|| mismatch("boolean", &v))
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        v.as_i64().ok_or_else(|| mismatch("integer", &v))
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        v.as_f64().ok_or_else(|| mismatch("float", &v))
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Text(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_preserves_type() {
        let cases = [
            Value::Null,
            Value::Bool(true),
            Value::Integer(123),
            Value::Integer(-1),
            Value::Float(1.0),
            Value::Float(2.5),
            Value::Text("KEY B".into()),
            Value::Text("123".into()),
        ];

        for value in cases {
            let raw = value.encode().unwrap();
            assert_eq!(Value::decode(&raw).unwrap(), value, "raw = {raw}");
        }
    }

    #[test]
    fn whole_float_stays_float() {
        let raw = Value::Float(1.0).encode().unwrap();
        assert_eq!(raw, "1.0");
        assert!(matches!(Value::decode(&raw).unwrap(), Value::Float(_)));
    }

    #[test]
    fn non_finite_float_rejected() {
        assert!(matches!(
            Value::Float(f64::NAN).encode(),
            Err(Error::Validation(_))
        ));
        assert!(Value::Float(f64::INFINITY).encode().is_err());
    }

    #[test]
    fn decode_rejects_containers() {
        assert!(Value::decode("[1, 2]").is_err());
        assert!(Value::decode(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn from_impls() {
        assert_eq!(Value::from(123), Value::Integer(123));
        assert_eq!(Value::from(7u8), Value::Integer(7));
        assert_eq!(Value::from(false), Value::Bool(false));
        assert_eq!(Value::from("x"), Value::Text("x".into()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(4)), Value::Integer(4));
    }

    #[test]
    fn typed_extraction() {
        assert_eq!(i64::try_from(Value::Integer(5)).unwrap(), 5);
        assert_eq!(f64::try_from(Value::Integer(5)).unwrap(), 5.0);
        assert_eq!(String::try_from(Value::from("s")).unwrap(), "s");
        assert!(bool::try_from(Value::Bool(true)).unwrap());

        let err = i64::try_from(Value::from("nope")).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: "integer",
                found: "string"
            }
        ));
    }

    #[test]
    fn display() {
        assert_eq!(Value::Integer(123).to_string(), "123");
        assert_eq!(Value::from("KEY B").to_string(), "KEY B");
        assert_eq!(Value::Null.to_string(), "null");
    }
}
