use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::value::DefaultsValue;

/* 📖 # Why do preference operations never return a Result?

Callers treat preferences as best-effort settings. A missing partition, a corrupt
backing file or a value of the wrong kind all collapse to the accessor's
absent-default on read, and writes that cannot land are dropped. Keeping the trait
infallible keeps every call site a plain expression.
*/

/// Key-value preference storage over a named partition.
///
/// Implementors provide the three generic operations; the typed accessors are
/// derived from them. Reading a key through an accessor of another kind returns that
/// accessor's absent-default. Writing `None` through any setter removes the key.
pub trait DefaultsStore: std::fmt::Debug + Send + Sync + 'static {
    /// Retrieves the raw value stored under `key`.
    fn object(&self, key: &str) -> Option<DefaultsValue>;

    /// Stores `value` under `key`, or removes the key when `value` is `None`.
    fn set_object(&self, key: &str, value: Option<DefaultsValue>);

    /// Removes whatever is stored under `key`.
    fn remove_object(&self, key: &str);

    /// Returns the boolean under `key`, or `false`.
    fn bool(&self, key: &str) -> bool {
        self.object(key)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    /// Returns the integer under `key`, or `0`.
    fn int(&self, key: &str) -> i64 {
        self.object(key)
            .and_then(|value| value.as_int())
            .unwrap_or(0)
    }

    /// Returns the double under `key`, or `0.0`.
    fn double(&self, key: &str) -> f64 {
        self.object(key)
            .and_then(|value| value.as_double())
            .unwrap_or(0.0)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.object(key)
            .and_then(|value| value.as_str().map(str::to_owned))
    }

    fn string_array(&self, key: &str) -> Option<Vec<String>> {
        self.object(key).and_then(|value| value.as_string_array())
    }

    fn date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.object(key).and_then(|value| value.as_date())
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.set_object(key, Some(DefaultsValue::Bool(value)));
    }

    fn set_int(&self, key: &str, value: i64) {
        self.set_object(key, Some(DefaultsValue::Int(value)));
    }

    fn set_double(&self, key: &str, value: f64) {
        self.set_object(key, Some(DefaultsValue::Double(value)));
    }

    fn set_string(&self, key: &str, value: Option<&str>) {
        self.set_object(key, value.map(DefaultsValue::from));
    }

    fn set_string_array(&self, key: &str, value: Option<Vec<String>>) {
        self.set_object(key, value.map(DefaultsValue::StringArray));
    }

    fn set_date(&self, key: &str, value: Option<DateTime<Utc>>) {
        self.set_object(key, value.map(DefaultsValue::Date));
    }
}

/// Handle to a preference store, enabling shared ownership.
///
/// Internally wraps `Arc<dyn DefaultsStore>` for cheap cloning and thread-safe sharing.
#[derive(Debug, Clone)]
pub struct DefaultsHandle(Arc<dyn DefaultsStore>);

impl DefaultsHandle {
    /// Create a new DefaultsHandle from a store implementation.
    pub fn new(store: impl DefaultsStore) -> Self {
        Self(Arc::new(store))
    }
}

impl std::ops::Deref for DefaultsHandle {
    type Target = dyn DefaultsStore;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
