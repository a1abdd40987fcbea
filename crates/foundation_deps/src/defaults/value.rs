use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/* 📖 # Why a sum type for stored preference values?

Preference partitions are weakly typed: a key holds whatever was last written, and
every typed accessor just asks "is this a value of my kind?". DefaultsValue makes that
explicit. The typed accessors on DefaultsStore map a mismatched kind to their absent
default, and the generic object accessor hands out the value itself.

Data, Array and Dictionary cover what untyped callers used to store as "any object".

JSON has no literal for NaN or the infinities, so a non-finite Double is written as
one of the strings "NaN", "Infinity" or "-Infinity" and read back as the same value.
*/

/// A value stored under a preference key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultsValue {
    Bool(bool),
    Int(i64),
    Double(#[serde(with = "double_repr")] f64),
    String(String),
    StringArray(Vec<String>),
    Date(DateTime<Utc>),
    Data(Vec<u8>),
    Array(Vec<DefaultsValue>),
    Dictionary(BTreeMap<String, DefaultsValue>),
}

mod double_repr {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    const NAN: &str = "NaN";
    const INFINITY: &str = "Infinity";
    const NEG_INFINITY: &str = "-Infinity";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Named(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value.is_sign_positive() {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Named(name) => match name.as_str() {
                NAN => Ok(f64::NAN),
                INFINITY => Ok(f64::INFINITY),
                NEG_INFINITY => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!("invalid double '{}'", other))),
            },
        }
    }
}

impl DefaultsValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DefaultsValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            DefaultsValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            DefaultsValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DefaultsValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the list of strings, also accepting a generic array whose
    /// elements are all strings.
    pub fn as_string_array(&self) -> Option<Vec<String>> {
        match self {
            DefaultsValue::StringArray(values) => Some(values.clone()),
            DefaultsValue::Array(values) => values
                .iter()
                .map(|value| value.as_str().map(str::to_owned))
                .collect(),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            DefaultsValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            DefaultsValue::Data(value) => Some(value),
            _ => None,
        }
    }

    /// Short name of the stored kind, used in log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DefaultsValue::Bool(_) => "bool",
            DefaultsValue::Int(_) => "int",
            DefaultsValue::Double(_) => "double",
            DefaultsValue::String(_) => "string",
            DefaultsValue::StringArray(_) => "string_array",
            DefaultsValue::Date(_) => "date",
            DefaultsValue::Data(_) => "data",
            DefaultsValue::Array(_) => "array",
            DefaultsValue::Dictionary(_) => "dictionary",
        }
    }
}

impl From<bool> for DefaultsValue {
    fn from(value: bool) -> Self {
        DefaultsValue::Bool(value)
    }
}

impl From<i64> for DefaultsValue {
    fn from(value: i64) -> Self {
        DefaultsValue::Int(value)
    }
}

impl From<f64> for DefaultsValue {
    fn from(value: f64) -> Self {
        DefaultsValue::Double(value)
    }
}

impl From<&str> for DefaultsValue {
    fn from(value: &str) -> Self {
        DefaultsValue::String(value.to_owned())
    }
}

impl From<String> for DefaultsValue {
    fn from(value: String) -> Self {
        DefaultsValue::String(value)
    }
}

impl From<Vec<String>> for DefaultsValue {
    fn from(values: Vec<String>) -> Self {
        DefaultsValue::StringArray(values)
    }
}

impl From<DateTime<Utc>> for DefaultsValue {
    fn from(value: DateTime<Utc>) -> Self {
        DefaultsValue::Date(value)
    }
}

impl From<Vec<u8>> for DefaultsValue {
    fn from(value: Vec<u8>) -> Self {
        DefaultsValue::Data(value)
    }
}
