use crate::{Overrides, ParamError, ParamSet, ParamSpec, ParamValue, PropertyMap};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A [`ParamSet`] whose read path treats an unset value as an absent
/// property.
///
/// Construction and mutation rules are exactly those of [`ParamSet`];
/// only reads differ. A property is present iff its stored value is not
/// [`ParamValue::Unset`], or its validator accepts the unset marker as
/// legitimate data. Reading an absent property fails with the same
/// [`ParamError::KeyNotFound`] used for undeclared names, so one
/// validation pass over a whole hyperparameter set surfaces every
/// mandatory-but-unset property before a long-running job starts.
#[derive(Debug)]
pub struct StrictParamSet {
    inner: ParamSet,
}

impl StrictParamSet {
    pub fn from_specs(
        specs: impl IntoIterator<Item = Arc<ParamSpec>>,
        overrides: Overrides,
    ) -> Result<Self, ParamError> {
        ParamSet::from_specs(specs, overrides).map(|inner| Self { inner })
    }

    pub fn from_prototype(prototype: &ParamSet, overrides: Overrides) -> Result<Self, ParamError> {
        ParamSet::from_prototype(prototype, overrides).map(|inner| Self { inner })
    }

    /// Wraps an existing set, reinterpreting its reads.
    pub fn new(inner: ParamSet) -> Self {
        Self { inner }
    }

    /// The wrapped set, e.g. for use as a prototype.
    pub fn inner(&self) -> &ParamSet {
        &self.inner
    }

    pub fn into_inner(self) -> ParamSet {
        self.inner
    }

    pub fn get(&self, name: &str) -> Result<&ParamValue, ParamError> {
        let value = self.inner.get(name)?;
        if value.is_unset() && !self.accepts_unset(name) {
            return Err(ParamError::KeyNotFound(name.to_string()));
        }
        Ok(value)
    }

    /// The presence predicate: declared, and either set or allowed to be
    /// unset by its validator.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    fn accepts_unset(&self, name: &str) -> bool {
        self.inner
            .spec(name)
            .and_then(|spec| spec.validator())
            .map_or(false, |validator| validator.accepts(&ParamValue::Unset))
    }

    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Result<(), ParamError> {
        self.inner.set(name, value)
    }

    pub fn schema(&self) -> &[Arc<ParamSpec>] {
        self.inner.schema()
    }

    pub fn specs(&self) -> &BTreeMap<String, Arc<ParamSpec>> {
        self.inner.specs()
    }

    pub fn spec(&self, name: &str) -> Option<&Arc<ParamSpec>> {
        self.inner.spec(name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.inner.is_declared(name)
    }

    pub fn freeze(&mut self) {
        self.inner.freeze();
    }

    pub fn seal(&mut self) {
        self.inner.seal();
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.is_frozen()
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.is_sealed()
    }

    pub fn copy_values(&self) -> PropertyMap {
        self.inner.copy_values()
    }
}
