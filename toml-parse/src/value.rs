//! The immutable result tree.

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;

/// A parsed TOML document, or any value within one.
///
/// Objects preserve the insertion order of their first occurrence; arrays
/// preserve source order. There is no `Null` variant — TOML has no null.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Number(Number),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

/// A decoded numeric literal. Width is always the narrowest of
/// {32-bit, 64-bit, arbitrary-precision} that represents the value, per the
/// integer width-promotion ladder; floats are arbitrary-precision decimal
/// with explicit variants for the three IEEE special values TOML permits.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    I32(i32),
    I64(i64),
    BigInt(BigInt),
    Float(FloatValue),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FloatValue {
    Finite(BigDecimal),
    NaN,
    PositiveInfinity,
    NegativeInfinity,
}
