//! Built-in and custom reductions over a merge group.
//!
//! A merge group is the ordered list of old values that collapse into one new
//! value. Every combinator accepts an empty group and produces a value for it.
//! Null members are treated as follows:
//!
//! - Sum, Product: the identity element (0 and 1)
//! - Min, Max, Mean, Median: skipped; nothing left yields Null
//! - Concatenate: the empty string
//! - First, Last, Random, Custom: passed through untouched

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use graphattr_core::{AttributeError, BoxError, Value};
use rand::Rng;

use crate::error::ReduceError;

/// Signature of a caller-supplied reduction.
pub type CombineFn = dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync;

/// A caller-supplied reduction function.
///
/// Receives the full merge group; its result is used verbatim, including
/// opaque values.
#[derive(Clone)]
pub struct CustomCombinator(Arc<CombineFn>);

impl CustomCombinator {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        CustomCombinator(Arc::new(f))
    }

    pub fn call(&self, group: &[Value]) -> Result<Value, BoxError> {
        (self.0)(group)
    }
}

impl fmt::Debug for CustomCombinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomCombinator(..)")
    }
}

/// Reduction strategy for one attribute.
#[derive(Debug, Clone)]
pub enum Combinator {
    /// Drop the attribute from the rebuilt table.
    Ignore,
    Sum,
    Product,
    Min,
    Max,
    /// A uniformly chosen member of the group.
    Random,
    First,
    Last,
    Mean,
    Median,
    /// Text coercion of every member, joined without separator.
    Concatenate,
    Custom(CustomCombinator),
}

impl Combinator {
    /// Wraps a closure as a [`Combinator::Custom`].
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Combinator::Custom(CustomCombinator::new(f))
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Combinator::Ignore)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Combinator::Ignore => "ignore",
            Combinator::Sum => "sum",
            Combinator::Product => "product",
            Combinator::Min => "min",
            Combinator::Max => "max",
            Combinator::Random => "random",
            Combinator::First => "first",
            Combinator::Last => "last",
            Combinator::Mean => "mean",
            Combinator::Median => "median",
            Combinator::Concatenate => "concatenate",
            Combinator::Custom(_) => "custom",
        }
    }

    /// Reduces a merge group to one value.
    ///
    /// `rng` is only drawn from by [`Combinator::Random`].
    pub fn reduce<R: Rng + ?Sized>(
        &self,
        group: &[Value],
        rng: &mut R,
    ) -> Result<Value, ReduceError> {
        match self {
            Combinator::Ignore => Ok(Value::Null),
            Combinator::Sum => fold_numbers(group, 0.0, |acc, x| acc + x),
            Combinator::Product => fold_numbers(group, 1.0, |acc, x| acc * x),
            Combinator::Min => extreme(group, Ordering::Less),
            Combinator::Max => extreme(group, Ordering::Greater),
            Combinator::Random => {
                if group.is_empty() {
                    return Ok(Value::Null);
                }
                let pick = rng.gen_range(0..group.len());
                Ok(group[pick].clone())
            }
            Combinator::First => Ok(group.first().cloned().unwrap_or_default()),
            Combinator::Last => Ok(group.last().cloned().unwrap_or_default()),
            Combinator::Mean => mean(group),
            Combinator::Median => median(group),
            Combinator::Concatenate => concatenate(group),
            Combinator::Custom(f) => f.call(group).map_err(ReduceError::Custom),
        }
    }
}

impl FromStr for Combinator {
    type Err = AttributeError;

    /// Parses a built-in combinator name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let combinator = match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Combinator::Ignore,
            "sum" => Combinator::Sum,
            "prod" | "product" => Combinator::Product,
            "min" => Combinator::Min,
            "max" => Combinator::Max,
            "random" => Combinator::Random,
            "first" => Combinator::First,
            "last" => Combinator::Last,
            "mean" => Combinator::Mean,
            "median" => Combinator::Median,
            "concat" | "concatenate" => Combinator::Concatenate,
            _ => {
                return Err(AttributeError::UnknownCombinator {
                    name: s.to_string(),
                })
            }
        };
        Ok(combinator)
    }
}

fn number(value: &Value) -> Result<Option<f64>, ReduceError> {
    value.to_number().map_err(|found| ReduceError::TypeMismatch {
        expected: "number",
        found,
    })
}

fn fold_numbers(
    group: &[Value],
    identity: f64,
    op: impl Fn(f64, f64) -> f64,
) -> Result<Value, ReduceError> {
    let mut acc = identity;
    for value in group {
        if let Some(x) = number(value)? {
            acc = op(acc, x);
        }
    }
    Ok(Value::Number(acc))
}

/// Smallest (`Less`) or largest (`Greater`) non-null member. Ties keep the
/// first occurrence.
fn extreme(group: &[Value], wanted: Ordering) -> Result<Value, ReduceError> {
    let mut best: Option<&Value> = None;
    for value in group.iter().filter(|v| !v.is_null()) {
        let current = match best {
            Some(current) => current,
            None => {
                if value.compare(value).is_none() {
                    return Err(ReduceError::TypeMismatch {
                        expected: "number or string",
                        found: value.type_name(),
                    });
                }
                best = Some(value);
                continue;
            }
        };
        let ordering = value
            .compare(current)
            .ok_or(ReduceError::TypeMismatch {
                expected: current.type_name(),
                found: value.type_name(),
            })?;
        if ordering == wanted {
            best = Some(value);
        }
    }
    Ok(best.cloned().unwrap_or_default())
}

/// Running mean, updated one member at a time.
/// Running mean, falling back to a plain sum once an infinity shows up so
/// that `[inf, 1]` stays `inf` and `[inf, -inf]` becomes NaN.
fn mean(group: &[Value]) -> Result<Value, ReduceError> {
    let mut mean = 0.0;
    let mut sum = 0.0;
    let mut finite = true;
    let mut count: u64 = 0;
    for value in group {
        if let Some(x) = number(value)? {
            count += 1;
            sum += x;
            finite &= x.is_finite();
            mean += (x - mean) / count as f64;
        }
    }
    if count == 0 {
        Ok(Value::Null)
    } else if !finite || !mean.is_finite() {
        Ok(Value::Number(sum / count as f64))
    } else {
        Ok(Value::Number(mean))
    }
}

fn median(group: &[Value]) -> Result<Value, ReduceError> {
    let mut xs = Vec::with_capacity(group.len());
    for value in group {
        if let Some(x) = number(value)? {
            xs.push(x);
        }
    }
    if xs.is_empty() {
        return Ok(Value::Null);
    }
    xs.sort_by(f64::total_cmp);
    let mid = xs.len() / 2;
    let median = if xs.len() % 2 == 1 {
        xs[mid]
    } else {
        (xs[mid - 1] + xs[mid]) / 2.0
    };
    Ok(Value::Number(median))
}

fn concatenate(group: &[Value]) -> Result<Value, ReduceError> {
    let mut out = String::new();
    for value in group {
        let text = value.to_text().map_err(|found| ReduceError::TypeMismatch {
            expected: "string",
            found,
        })?;
        out.push_str(&text);
    }
    Ok(Value::Text(out))
}
