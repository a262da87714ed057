use std::fmt;

use serde_json::{Number, Value};

/// Identifier of a category, subcategory or provider.
///
/// The catalog returns ids as numbers or strings depending on the table, and
/// the same id is compared across both shapes. The canonical string key is
/// therefore the identity: `7`, `7.0` and `"7"` are the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Reads an id out of a JSON scalar. Blank strings, `null`, booleans and
    /// containers are not ids.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
            }
            Value::Number(number) => Some(Self(number_key(number))),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Renders a JSON number the way it reads as a key: integral values never
/// carry a fractional part.
pub(crate) fn number_key(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() < 9.0e15 => {
            format!("{}", float as i64)
        }
        _ => number.to_string(),
    }
}
