use crate::{Guard, ParamError, ParamValue};
use std::collections::BTreeMap;
use tracing::debug;

/// A mutable associative store with two one-way guard states.
///
/// Freezing forbids all further writes; sealing forbids new keys while
/// leaving existing keys writable. Both flags live outside the entry map,
/// so an entry literally named `"frozen"` is just data. Neither flag can
/// ever be cleared on an instance.
#[derive(Debug, Default)]
pub struct PropertyMap {
    entries: BTreeMap<String, ParamValue>,
    frozen: bool,
    sealed: bool,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: BTreeMap<String, ParamValue>) -> Self {
        Self {
            entries,
            frozen: false,
            sealed: false,
        }
    }

    pub fn get(&self, key: &str) -> Result<&ParamValue, ParamError> {
        self.entries
            .get(key)
            .ok_or_else(|| ParamError::KeyNotFound(key.to_string()))
    }

    pub fn set(&mut self, key: impl Into<String>, value: ParamValue) -> Result<(), ParamError> {
        let key = key.into();
        if self.frozen {
            debug!(%key, "write rejected: map is frozen");
            return Err(ParamError::AccessDenied {
                key,
                guard: Guard::Frozen,
            });
        }
        if self.sealed && !self.entries.contains_key(&key) {
            debug!(%key, "write rejected: map is sealed");
            return Err(ParamError::AccessDenied {
                key,
                guard: Guard::Sealed,
            });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    /// An independent duplicate of the entries with both guards cleared,
    /// for branching off a mutable working copy. `Clone` is deliberately
    /// not derived so guard state is never duplicated by accident.
    pub fn copy(&self) -> PropertyMap {
        PropertyMap::with_entries(self.entries.clone())
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
