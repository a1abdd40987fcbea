use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::DefaultsStore;
use super::value::DefaultsValue;

/// In-memory preference store for tests and previews.
///
/// Holds a single map from key to value behind a mutex, so concurrent tests can share
/// one instance. Clones share the same map.
///
/// # Examples
///
/// ```
/// use foundation_deps::defaults::{DefaultsStore, InMemoryDefaults};
///
/// let defaults = InMemoryDefaults::new();
/// defaults.set_string("username", Some("robert"));
/// assert_eq!(defaults.string("username").as_deref(), Some("robert"));
/// assert!(!defaults.bool("username"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDefaults {
    values: Arc<Mutex<HashMap<String, DefaultsValue>>>,
}

impl InMemoryDefaults {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `values`.
    pub fn with_values<K: Into<String>>(values: impl IntoIterator<Item = (K, DefaultsValue)>) -> Self {
        let values = values
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self {
            values: Arc::new(Mutex::new(values)),
        }
    }

    /// Returns true if anything is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.lock().contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl DefaultsStore for InMemoryDefaults {
    fn object(&self, key: &str) -> Option<DefaultsValue> {
        self.values.lock().get(key).cloned()
    }

    fn set_object(&self, key: &str, value: Option<DefaultsValue>) {
        let mut values = self.values.lock();
        match value {
            Some(value) => {
                values.insert(key.to_owned(), value);
            }
            None => {
                values.remove(key);
            }
        }
    }

    fn remove_object(&self, key: &str) {
        self.values.lock().remove(key);
    }
}
