//! The attribute value model.
//!
//! [`Value`] is the discriminated container stored in every attribute slot.
//! Attribute columns are not statically typed: a single sequence may mix
//! variants, and [`crate::infer`] recovers a column type by scanning it.
//!
//! Coercion rules used by typed getters and combinators:
//!
//! - number: `Null` -> absent, `Bool` -> 1.0 / 0.0, `Number` -> itself
//! - text: `Null` -> "", `Bool` -> "true" / "false", `Number` -> `f64` display
//! - boolean: `Null` -> false, `Number` -> non-zero, `Text` -> non-empty
//!
//! `Opaque` values never coerce; they only round-trip through custom
//! combinators.

use std::any::Any;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Error as _, Serialize, Serializer};

/// Caller-defined handle stored in an attribute slot.
///
/// Cloning shares the handle. Two opaque values are equal only when they
/// point at the same allocation.
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Opaque(Arc::new(value))
    }

    /// Borrows the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).downcast_ref::<T>()
    }

    /// Returns true if both handles share one allocation.
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// One attribute value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Opaque(Opaque),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_opaque(&self) -> Option<&Opaque> {
        match self {
            Value::Opaque(o) => Some(o),
            _ => None,
        }
    }

    /// Returns a human-readable name of the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::Opaque(_) => "opaque",
        }
    }

    /// Coerces to a number. `Ok(None)` means the slot is null.
    ///
    /// On failure returns the offending variant's type name.
    pub fn to_number(&self) -> Result<Option<f64>, &'static str> {
        match self {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            Value::Number(n) => Ok(Some(*n)),
            other => Err(other.type_name()),
        }
    }

    /// Coerces to display text. Null becomes the empty string.
    pub fn to_text(&self) -> Result<Cow<'_, str>, &'static str> {
        match self {
            Value::Null => Ok(Cow::Borrowed("")),
            Value::Bool(b) => Ok(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Number(n) => Ok(Cow::Owned(n.to_string())),
            Value::Text(s) => Ok(Cow::Borrowed(s)),
            Value::Opaque(_) => Err("opaque"),
        }
    }

    /// Coerces to a truth value. Null is false.
    pub fn to_bool(&self) -> Result<bool, &'static str> {
        match self {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(*n != 0.0),
            Value::Text(s) => Ok(!s.is_empty()),
            Value::Opaque(_) => Err("opaque"),
        }
    }

    /// Total ordering used by the min/max reductions.
    ///
    /// Booleans and numbers compare numerically, strings lexicographically.
    /// Returns `None` for pairs with no common ordering (including nulls).
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Bool(_) | Value::Number(_), Value::Bool(_) | Value::Number(_)) => {
                let a = self.to_number().ok().flatten()?;
                let b = other.to_number().ok().flatten()?;
                Some(a.total_cmp(&b))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Opaque(_) => write!(f, "<opaque>"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Opaque(_) => Err(S::Error::custom("opaque values cannot be serialized")),
        }
    }
}

// Convenience conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Opaque(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
