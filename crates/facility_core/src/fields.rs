//! Total accessors over loosely-typed catalog records.
//!
//! Every helper accepts any `serde_json::Value` (including `null` and
//! non-objects) and answers `None` instead of failing.

use serde_json::Value;

use crate::ids::{number_key, EntityId};

/// Trimmed, non-blank text of a string or number.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => string_text(value),
        Value::Number(number) => Some(number_key(number)),
        _ => None,
    }
}

/// Trimmed, non-blank text of a string. Numbers are rejected.
pub(crate) fn string_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

/// Finite number from a JSON number or a numeric string.
pub(crate) fn numeric(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Text of `record[key]`, if present and non-blank.
pub(crate) fn text_at(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(scalar_text)
}

/// The subcategory a provider record claims to belong to.
///
/// An object answers its `id`. Any other non-null value is coerced to its
/// text: numbers and strings as ids, booleans as `"true"`/`"false"`, arrays
/// as their element texts joined with `,` (so `[4]` is `"4"`).
pub fn record_subcategory_id(record: &Value) -> Option<EntityId> {
    match record.get("sub_category")? {
        Value::Object(nested) => nested.get("id").and_then(EntityId::from_value),
        Value::Null => None,
        other => coerced_text(other)
            .filter(|text| !text.is_empty())
            .map(EntityId::new),
    }
}

fn coerced_text(value: &Value) -> Option<String> {
    match value {
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(items) => {
            let parts = items.iter().map(coerced_text).collect::<Option<Vec<_>>>()?;
            Some(parts.join(","))
        }
        other => scalar_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_text_skips_blank_and_containers() {
        assert_eq!(scalar_text(&json!("  Pune ")), Some("Pune".to_string()));
        assert_eq!(scalar_text(&json!(12)), Some("12".to_string()));
        assert_eq!(scalar_text(&json!("   ")), None);
        assert_eq!(scalar_text(&json!({ "a": 1 })), None);
        assert_eq!(scalar_text(&json!(false)), None);
    }

    #[test]
    fn numeric_reads_numbers_and_numeric_strings() {
        assert_eq!(numeric(&json!(4.5)), Some(4.5));
        assert_eq!(numeric(&json!(" 3 ")), Some(3.0));
        assert_eq!(numeric(&json!("n/a")), None);
        assert_eq!(numeric(&json!(null)), None);
    }

    #[test]
    fn subcategory_id_prefers_nested_object() {
        assert_eq!(
            record_subcategory_id(&json!({ "sub_category": { "id": 2, "name": "Dental" } })),
            Some(EntityId::from(2))
        );
        assert_eq!(
            record_subcategory_id(&json!({ "sub_category": 5 })),
            Some(EntityId::from(5))
        );
        assert_eq!(
            record_subcategory_id(&json!({ "sub_category": "9" })),
            Some(EntityId::from(9))
        );
    }

    #[test]
    fn subcategory_id_coerces_other_values_to_text() {
        assert_eq!(
            record_subcategory_id(&json!({ "sub_category": true })),
            Some(EntityId::new("true"))
        );
        assert_eq!(
            record_subcategory_id(&json!({ "sub_category": [4] })),
            Some(EntityId::from(4))
        );
        assert_eq!(
            record_subcategory_id(&json!({ "sub_category": [1, "2"] })),
            Some(EntityId::new("1,2"))
        );
    }

    #[test]
    fn subcategory_id_unresolvable_shapes() {
        assert_eq!(record_subcategory_id(&json!({})), None);
        assert_eq!(record_subcategory_id(&json!({ "sub_category": null })), None);
        assert_eq!(record_subcategory_id(&json!({ "sub_category": { "name": "x" } })), None);
        assert_eq!(record_subcategory_id(&json!({ "sub_category": [] })), None);
        assert_eq!(record_subcategory_id(&json!({ "sub_category": "  " })), None);
        assert_eq!(record_subcategory_id(&json!(null)), None);
        assert_eq!(record_subcategory_id(&json!("string record")), None);
    }
}
