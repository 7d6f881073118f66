//! Column type inference.
//!
//! Attribute sequences carry no declared type. [`infer_kind`] scans a
//! sequence once and picks the most specific classification that every value
//! satisfies, in this precedence:
//!
//! 1. Boolean: every value is null or boolean
//! 2. Numeric: every value is null, boolean or number
//! 3. String: no opaque values
//! 4. Opaque: anything else
//!
//! An empty sequence is Numeric.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Inferred type of an attribute sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Boolean,
    Numeric,
    String,
    Opaque,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Boolean => "boolean",
            AttributeKind::Numeric => "numeric",
            AttributeKind::String => "string",
            AttributeKind::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

/// Classifies a sequence of values.
pub fn infer_kind<'a, I>(values: I) -> AttributeKind
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut seen_any = false;
    let mut seen_number = false;
    let mut seen_text = false;

    for value in values {
        seen_any = true;
        match value {
            Value::Null | Value::Bool(_) => {}
            Value::Number(_) => seen_number = true,
            Value::Text(_) => seen_text = true,
            // Nothing later in the scan can lower the classification.
            Value::Opaque(_) => return AttributeKind::Opaque,
        }
    }

    if seen_text {
        AttributeKind::String
    } else if seen_number || !seen_any {
        AttributeKind::Numeric
    } else {
        AttributeKind::Boolean
    }
}
