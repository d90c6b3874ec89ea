// ==========================================
// Sales Bulk Import - response shape extractors
// ==========================================
// The remote API has accumulated historical response shapes: a bare list,
// or a list wrapped under a data/items/itens key. Each shape is a small
// extractor returning an optional normalized list, tried in order —
// instead of nested fallback branches at every call site.
// ==========================================

use serde_json::Value;

type ShapeExtractor = fn(&Value) -> Option<Vec<Value>>;

fn bare_list(value: &Value) -> Option<Vec<Value>> {
    value.as_array().cloned()
}

fn wrapped_data(value: &Value) -> Option<Vec<Value>> {
    value.get("data")?.as_array().cloned()
}

fn wrapped_items(value: &Value) -> Option<Vec<Value>> {
    value.get("items")?.as_array().cloned()
}

fn wrapped_itens(value: &Value) -> Option<Vec<Value>> {
    value.get("itens")?.as_array().cloned()
}

const SHAPES: &[ShapeExtractor] = &[bare_list, wrapped_data, wrapped_items, wrapped_itens];

/// Normalize a search response to its record list, whatever shape the
/// tenant returns. None when no shape matches.
pub fn extract_records(value: &Value) -> Option<Vec<Value>> {
    SHAPES.iter().find_map(|extract| extract(value))
}

/// Pull the opaque identifier out of a remote record. Identifier keys also
/// vary by API generation; numbers are stringified.
pub fn extract_id(record: &Value) -> Option<String> {
    const ID_KEYS: &[&str] = &["id", "identificador", "identificador_legado"];
    ID_KEYS.iter().find_map(|key| {
        let v = record.get(*key)?;
        v.as_str()
            .map(String::from)
            .or_else(|| v.as_i64().map(|n| n.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_records_bare_list() {
        let v = json!([{"id": "1"}, {"id": "2"}]);
        assert_eq!(extract_records(&v).unwrap().len(), 2);
    }

    #[test]
    fn test_extract_records_wrapped() {
        for key in ["data", "items", "itens"] {
            let v = json!({ key: [{"id": "1"}] });
            assert_eq!(extract_records(&v).unwrap().len(), 1, "key {key}");
        }
    }

    #[test]
    fn test_extract_records_no_shape() {
        assert!(extract_records(&json!({"total": 0})).is_none());
        assert!(extract_records(&json!("nope")).is_none());
    }

    #[test]
    fn test_extract_id_key_and_type_variants() {
        assert_eq!(extract_id(&json!({"id": "abc"})).as_deref(), Some("abc"));
        assert_eq!(extract_id(&json!({"id": 42})).as_deref(), Some("42"));
        assert_eq!(
            extract_id(&json!({"identificador_legado": "L-9"})).as_deref(),
            Some("L-9")
        );
        assert_eq!(extract_id(&json!({"nome": "x"})), None);
    }
}
