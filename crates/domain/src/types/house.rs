//! Opaque house record returned by the upstream API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A house as served by `GET /Houses` or `GET /Houses/{id}`.
///
/// The record is passed through untouched; accessors only peek at the few
/// fields used for logging and analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct House(Value);

impl House {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn id(&self) -> Option<&str> {
        self.field_str("id")
    }

    /// Display name, if the record has a non-empty string `name`.
    pub fn name(&self) -> Option<&str> {
        self.field_str("name").filter(|name| !name.is_empty())
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for House {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
