//! Per-attribute combinator selection.

use graphattr_core::{validate_name, AttributeError};
use indexmap::IndexMap;

use crate::combinator::Combinator;

static IGNORE: Combinator = Combinator::Ignore;

/// Which combinator applies to which attribute during one combine operation.
///
/// Resolution order for an attribute name: its explicit entry, then the
/// default entry, then [`Combinator::Ignore`].
#[derive(Debug, Clone, Default)]
pub struct CombinationSpec {
    by_name: IndexMap<String, Combinator>,
    default: Option<Combinator>,
}

impl CombinationSpec {
    /// An empty spec: every attribute is ignored.
    pub fn new() -> Self {
        Self::default()
    }

    /// A spec applying one combinator to every attribute.
    pub fn uniform(combinator: Combinator) -> Self {
        CombinationSpec {
            by_name: IndexMap::new(),
            default: Some(combinator),
        }
    }

    /// Sets the combinator for one attribute name.
    pub fn with_attribute(
        mut self,
        name: &str,
        combinator: Combinator,
    ) -> Result<Self, AttributeError> {
        validate_name(name)?;
        self.by_name.insert(name.to_string(), combinator);
        Ok(self)
    }

    /// Sets the fallback used by attributes without an explicit entry.
    pub fn with_default(mut self, combinator: Combinator) -> Self {
        self.default = Some(combinator);
        self
    }

    /// Builds a spec from declarative `(name, combinator name)` pairs.
    ///
    /// A `None` name sets the default entry. Later pairs overwrite earlier ones.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, AttributeError>
    where
        I: IntoIterator<Item = (Option<&'a str>, &'a str)>,
    {
        let mut spec = CombinationSpec::new();
        for (name, combinator) in pairs {
            let combinator: Combinator = combinator.parse()?;
            spec = match name {
                Some(name) => spec.with_attribute(name, combinator)?,
                None => spec.with_default(combinator),
            };
        }
        Ok(spec)
    }

    /// Returns the combinator for `name`.
    pub fn resolve(&self, name: &str) -> &Combinator {
        self.by_name
            .get(name)
            .or(self.default.as_ref())
            .unwrap_or(&IGNORE)
    }
}

impl From<Combinator> for CombinationSpec {
    fn from(combinator: Combinator) -> Self {
        CombinationSpec::uniform(combinator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_ignores_everything() {
        let spec = CombinationSpec::new();
        assert!(spec.resolve("weight").is_ignore());
    }

    #[test]
    fn explicit_entry_beats_default() {
        let spec = CombinationSpec::uniform(Combinator::First)
            .with_attribute("weight", Combinator::Sum)
            .unwrap();
        assert!(matches!(spec.resolve("weight"), Combinator::Sum));
        assert!(matches!(spec.resolve("label"), Combinator::First));
    }

    #[test]
    fn from_pairs_with_default() {
        let spec =
            CombinationSpec::from_pairs([(Some("weight"), "sum"), (None, "last")]).unwrap();
        assert!(matches!(spec.resolve("weight"), Combinator::Sum));
        assert!(matches!(spec.resolve("color"), Combinator::Last));
    }

    #[test]
    fn from_pairs_rejects_unknown_and_empty_names() {
        let err = CombinationSpec::from_pairs([(Some("weight"), "avg")]).unwrap_err();
        assert!(matches!(err, AttributeError::UnknownCombinator { .. }));

        let err = CombinationSpec::from_pairs([(Some(""), "sum")]).unwrap_err();
        assert!(matches!(err, AttributeError::InvalidAttributeName { .. }));
    }

    #[test]
    fn names_are_case_sensitive() {
        let spec = CombinationSpec::new()
            .with_attribute("Weight", Combinator::Max)
            .unwrap();
        assert!(spec.resolve("weight").is_ignore());
        assert!(matches!(spec.resolve("Weight"), Combinator::Max));
    }
}
