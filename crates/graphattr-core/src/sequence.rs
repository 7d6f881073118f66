//! Per-entity value sequences.
//!
//! An [`AttributeSequence`] holds one [`Value`] per vertex or per edge, or a
//! single value for graph-scope attributes. Every constructor that allocates
//! reserves its storage fallibly, so allocation failure surfaces as
//! [`AttributeError::OutOfMemory`] instead of aborting.

use std::ops::Index;

use crate::error::AttributeError;
use crate::infer::{infer_kind, AttributeKind};
use crate::scope::Scope;
use crate::value::Value;

/// Rejects attribute names the store cannot key on.
pub fn validate_name(name: &str) -> Result<(), AttributeError> {
    if name.is_empty() {
        return Err(AttributeError::InvalidAttributeName {
            reason: "attribute names must be non-empty".to_string(),
        });
    }
    Ok(())
}

/// Allocates an empty vector able to hold `len` values without reallocating.
pub(crate) fn try_vec(len: usize) -> Result<Vec<Value>, AttributeError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|_| AttributeError::OutOfMemory { requested: len })?;
    Ok(values)
}

/// Ordered attribute values, one per entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeSequence {
    values: Vec<Value>,
}

impl AttributeSequence {
    pub fn new() -> Self {
        AttributeSequence { values: Vec::new() }
    }

    /// An empty sequence with room for `capacity` values.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AttributeError> {
        Ok(AttributeSequence {
            values: try_vec(capacity)?,
        })
    }

    /// A sequence of `len` nulls.
    pub fn nulls(len: usize) -> Result<Self, AttributeError> {
        let mut values = try_vec(len)?;
        values.resize(len, Value::Null);
        Ok(AttributeSequence { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }

    /// Replaces the value at `position`, returning the old one.
    pub fn set(
        &mut self,
        scope: Scope,
        position: usize,
        value: Value,
    ) -> Result<Value, AttributeError> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(position)
            .ok_or(AttributeError::PositionOutOfRange {
                scope,
                position,
                len,
            })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Appends a value. Capacity must have been reserved by the caller for
    /// the append to be infallible.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Reserves room for `additional` more values.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AttributeError> {
        self.values
            .try_reserve_exact(additional)
            .map_err(|_| AttributeError::OutOfMemory {
                requested: additional,
            })
    }

    /// Appends `values` if given, otherwise `count` nulls.
    ///
    /// Does not allocate if [`try_reserve`](Self::try_reserve) was called
    /// with `count` first.
    pub fn extend_or_nulls(&mut self, count: usize, values: Option<&[Value]>) {
        match values {
            Some(values) => self.values.extend_from_slice(values),
            None => self.values.resize(self.values.len() + count, Value::Null),
        }
    }

    /// Deep copy with fallible allocation.
    pub fn try_clone(&self) -> Result<Self, AttributeError> {
        let mut values = try_vec(self.values.len())?;
        values.extend_from_slice(&self.values);
        Ok(AttributeSequence { values })
    }

    /// Builds a new sequence with `self[mapping[i]]` at position `i`.
    ///
    /// Every mapping entry must be in range; the caller validates positions so
    /// that a whole table can be checked before any sequence is rebuilt.
    pub fn gather(&self, mapping: &[usize]) -> Result<Self, AttributeError> {
        let mut values = try_vec(mapping.len())?;
        values.extend(mapping.iter().map(|&old| self.values[old].clone()));
        Ok(AttributeSequence { values })
    }

    /// Classifies the sequence. See [`infer_kind`].
    pub fn kind(&self) -> AttributeKind {
        infer_kind(&self.values)
    }
}

impl Index<usize> for AttributeSequence {
    type Output = Value;

    fn index(&self, position: usize) -> &Value {
        &self.values[position]
    }
}

impl From<Vec<Value>> for AttributeSequence {
    fn from(values: Vec<Value>) -> Self {
        AttributeSequence { values }
    }
}

impl FromIterator<Value> for AttributeSequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        AttributeSequence {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeSequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
