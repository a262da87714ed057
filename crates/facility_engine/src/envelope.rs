use serde_json::Value;

/// Extracts the record list from a response body.
///
/// Accepted shapes, in priority order: `{ "data": [...] }`,
/// `{ "results": [...] }`, and a bare array. Anything else is an empty list.
pub fn unwrap_envelope(body: Value) -> Vec<Value> {
    match body {
        Value::Array(records) => records,
        Value::Object(mut map) => {
            for key in ["data", "results"] {
                if let Some(Value::Array(records)) = map.remove(key) {
                    return records;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::unwrap_envelope;
    use serde_json::json;

    #[test]
    fn three_shapes_yield_the_same_records() {
        let records = json!([{ "id": 1 }, { "id": 2 }]);
        let expected = records.as_array().unwrap().clone();

        assert_eq!(unwrap_envelope(records.clone()), expected);
        assert_eq!(unwrap_envelope(json!({ "data": records.clone() })), expected);
        assert_eq!(unwrap_envelope(json!({ "results": records })), expected);
    }

    #[test]
    fn data_wins_over_results() {
        let body = json!({ "results": [{ "id": "r" }], "data": [{ "id": "d" }] });
        assert_eq!(unwrap_envelope(body), vec![json!({ "id": "d" })]);
    }

    #[test]
    fn non_array_data_falls_through_to_results() {
        let body = json!({ "data": { "count": 1 }, "results": [{ "id": 1 }] });
        assert_eq!(unwrap_envelope(body), vec![json!({ "id": 1 })]);
    }

    #[test]
    fn unknown_shapes_are_empty() {
        assert!(unwrap_envelope(json!({ "detail": "Not found." })).is_empty());
        assert!(unwrap_envelope(json!(null)).is_empty());
        assert!(unwrap_envelope(json!("text")).is_empty());
        assert!(unwrap_envelope(json!({ "data": null })).is_empty());
    }
}
