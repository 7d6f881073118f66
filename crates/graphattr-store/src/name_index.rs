//! Lazily built name -> vertex lookup.
//!
//! The index is derived entirely from the vertex attribute [`NAME_ATTRIBUTE`].
//! It is built on the first lookup and dropped (never patched) whenever the
//! vertex set or that attribute changes. When several vertices share a name,
//! the highest position wins because later insertions overwrite earlier ones.

use std::cell::OnceCell;
use std::collections::HashMap;

use graphattr_core::{AttributeError, AttributeSequence, Value};

/// The vertex attribute the index is built from.
pub const NAME_ATTRIBUTE: &str = "name";

/// Hashable projection of a name value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NameKey {
    Bool(bool),
    /// Bit pattern with -0.0 folded into 0.0.
    Number(u64),
    Text(String),
}

impl NameKey {
    /// `Ok(None)` for null names, which are not indexed.
    fn from_value(value: &Value) -> Result<Option<NameKey>, AttributeError> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(NameKey::Bool(*b))),
            Value::Number(n) if n.is_nan() => Err(unhashable("NaN")),
            Value::Number(n) => {
                let n = if *n == 0.0 { 0.0 } else { *n };
                Ok(Some(NameKey::Number(n.to_bits())))
            }
            Value::Text(s) => Ok(Some(NameKey::Text(s.clone()))),
            Value::Opaque(_) => Err(unhashable("opaque")),
        }
    }
}

fn unhashable(found: &'static str) -> AttributeError {
    AttributeError::TypeMismatch {
        attribute: NAME_ATTRIBUTE.to_string(),
        expected: "boolean, number or string",
        found,
    }
}

/// Cache from vertex name to vertex position.
///
/// Lookups take `&self`; the map is built into a [`OnceCell`] on demand.
#[derive(Debug, Default)]
pub struct NameIndex {
    map: OnceCell<HashMap<NameKey, usize>>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self) -> bool {
        self.map.get().is_some()
    }

    /// Drops the cached map; the next lookup rebuilds it.
    pub fn invalidate(&mut self) {
        if self.map.take().is_some() {
            tracing::trace!("name index invalidated");
        }
    }

    /// Returns the position of the vertex called `name`.
    ///
    /// `names` is the current vertex name sequence, if the attribute exists.
    pub fn lookup(
        &self,
        names: Option<&AttributeSequence>,
        name: &Value,
    ) -> Result<usize, AttributeError> {
        let map = self.get_or_build(names)?;
        let key = NameKey::from_value(name)?;
        key.and_then(|key| map.get(&key).copied())
            .ok_or_else(|| AttributeError::NoSuchVertex {
                name: name.to_string(),
            })
    }

    fn get_or_build(
        &self,
        names: Option<&AttributeSequence>,
    ) -> Result<&HashMap<NameKey, usize>, AttributeError> {
        if let Some(map) = self.map.get() {
            return Ok(map);
        }
        let map = build(names)?;
        tracing::trace!(entries = map.len(), "name index built");
        Ok(self.map.get_or_init(|| map))
    }
}

fn build(names: Option<&AttributeSequence>) -> Result<HashMap<NameKey, usize>, AttributeError> {
    let mut map = HashMap::new();
    let Some(names) = names else {
        return Ok(map);
    };
    map.reserve(names.len());
    for (position, value) in names.iter().enumerate() {
        if let Some(key) = NameKey::from_value(value)? {
            map.insert(key, position);
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphattr_core::Opaque;

    fn names(values: &[Value]) -> AttributeSequence {
        values.to_vec().into()
    }

    #[test]
    fn builds_on_first_lookup() {
        let seq = names(&[Value::from("a"), Value::from("b")]);
        let index = NameIndex::new();
        assert!(!index.is_built());
        assert_eq!(index.lookup(Some(&seq), &Value::from("b")).unwrap(), 1);
        assert!(index.is_built());
    }

    #[test]
    fn duplicate_names_last_wins() {
        let seq = names(&[Value::from("x"), Value::from("y"), Value::from("x")]);
        let index = NameIndex::new();
        assert_eq!(index.lookup(Some(&seq), &Value::from("x")).unwrap(), 2);
    }

    #[test]
    fn null_names_are_skipped() {
        let seq = names(&[Value::Null, Value::from("a")]);
        let index = NameIndex::new();
        assert_eq!(index.lookup(Some(&seq), &Value::from("a")).unwrap(), 1);
        assert!(matches!(
            index.lookup(Some(&seq), &Value::Null),
            Err(AttributeError::NoSuchVertex { .. })
        ));
    }

    #[test]
    fn numeric_names_fold_negative_zero() {
        let seq = names(&[Value::Number(-0.0), Value::Number(3.0)]);
        let index = NameIndex::new();
        assert_eq!(index.lookup(Some(&seq), &Value::Number(0.0)).unwrap(), 0);
        assert_eq!(index.lookup(Some(&seq), &Value::Number(3.0)).unwrap(), 1);
    }

    #[test]
    fn missing_attribute_means_no_vertices() {
        let index = NameIndex::new();
        assert!(matches!(
            index.lookup(None, &Value::from("a")),
            Err(AttributeError::NoSuchVertex { .. })
        ));
    }

    #[test]
    fn opaque_name_fails_build_and_leaves_index_absent() {
        let seq = names(&[Value::from("a"), Value::Opaque(Opaque::new(1))]);
        let index = NameIndex::new();
        assert!(matches!(
            index.lookup(Some(&seq), &Value::from("a")),
            Err(AttributeError::TypeMismatch { .. })
        ));
        assert!(!index.is_built());
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let mut seq = names(&[Value::from("a")]);
        let mut index = NameIndex::new();
        assert_eq!(index.lookup(Some(&seq), &Value::from("a")).unwrap(), 0);

        seq = names(&[Value::from("b")]);
        // Still served from the stale map until invalidated.
        assert_eq!(index.lookup(Some(&seq), &Value::from("a")).unwrap(), 0);

        index.invalidate();
        assert!(!index.is_built());
        assert!(index.lookup(Some(&seq), &Value::from("a")).is_err());
        assert_eq!(index.lookup(Some(&seq), &Value::from("b")).unwrap(), 0);
    }
}
