/*!
Hierarchical configuration store for the PQC runtime.

Entries live in a flat map keyed `section + "/" + key`. Two sections are
reserved: [`ALIAS_SECTION`] holds name indirections resolved transitively
by [`ConfigStore::deref_alias`], and [`OPTION_SECTION`] holds library
options behind the [`ConfigStore::set_option`]/[`ConfigStore::option`]
convenience wrappers.

The store itself is plain data; the runtime state guards it with the
dedicated configuration lock built at initialization.
*/

use std::collections::{HashMap, HashSet};

use crate::core::error::{Error, Result};

// Built-in entries loaded at initialization
pub mod defaults;

/// Section that holds alias indirections
pub const ALIAS_SECTION: &str = "alias";

/// Section that holds library options
pub const OPTION_SECTION: &str = "conf";

/// Flat section/key to value map with alias indirection on top
#[derive(Debug, Default, Clone)]
pub struct ConfigStore {
    entries: HashMap<String, String>,
}

impl ConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        ConfigStore {
            entries: HashMap::new(),
        }
    }

    fn full_key(section: &str, key: &str) -> String {
        format!("{section}/{key}")
    }

    /// Stored value for `section`/`key`, or empty if absent; absence is
    /// not an error
    pub fn get(&self, section: &str, key: &str) -> String {
        self.entries
            .get(&Self::full_key(section, key))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether an entry exists for `section`/`key`, empty-valued or not
    pub fn is_set(&self, section: &str, key: &str) -> bool {
        self.entries.contains_key(&Self::full_key(section, key))
    }

    /// Store `value` under `section`/`key`
    ///
    /// The write succeeds if `overwrite` is requested, if no entry
    /// exists, or if the existing entry's value is empty; otherwise the
    /// existing value is silently preserved.
    pub fn set(&mut self, section: &str, key: &str, value: &str, overwrite: bool) {
        let full_key = Self::full_key(section, key);

        if overwrite || self.entries.get(&full_key).is_none_or(|existing| existing.is_empty()) {
            self.entries.insert(full_key, value.to_string());
        }
    }

    /// Record that `key` is an alias for `value`
    pub fn add_alias(&mut self, key: &str, value: &str) {
        self.set(ALIAS_SECTION, key, value, false);
    }

    /// Follow alias indirections from `key` until a non-aliased name
    ///
    /// A name that appears twice along the chain means the aliases form a
    /// cycle; that fails with [`Error::AliasCycle`] naming the repeated
    /// key instead of looping forever.
    pub fn deref_alias(&self, key: &str) -> Result<String> {
        let mut seen = HashSet::new();
        let mut name = key.to_string();

        while self.is_set(ALIAS_SECTION, &name) {
            if !seen.insert(name.clone()) {
                return Err(Error::AliasCycle(name));
            }
            name = self.get(ALIAS_SECTION, &name);
        }

        Ok(name)
    }

    /// Set a library option
    pub fn set_option(&mut self, key: &str, value: &str) {
        self.set(OPTION_SECTION, key, value, true);
    }

    /// Get a library option, or empty if unset
    pub fn option(&self, key: &str) -> String {
        self.get(OPTION_SECTION, key)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
