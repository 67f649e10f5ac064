//! Rewrites global IDs in client input into store-local IDs.

use super::self_prelude::*;
use crate::relay::from_global_id;

fn local_id(global_id: &str) -> GraphqlResult<String> {
    Ok(from_global_id(global_id)?.id)
}

/// Rewrite every `keys` field of a structured query, at any depth, from
/// global IDs to local IDs. `ids` clauses are rewritten as well.
pub fn replace_id_deep(query: &JsonValue, keys: &[String]) -> GraphqlResult<JsonValue> {
    match query {
        JsonValue::Object(map) => {
            let mut replaced = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let value = if keys.iter().any(|id_key| id_key == key) {
                    replace_ids(value, keys)?
                } else if key == "ids" {
                    replace_ids_clause(value, keys)?
                } else {
                    replace_id_deep(value, keys)?
                };
                replaced.insert(key.clone(), value);
            }
            Ok(JsonValue::Object(replaced))
        }
        JsonValue::Array(items) => items
            .iter()
            .map(|item| replace_id_deep(item, keys))
            .collect::<GraphqlResult<Vec<_>>>()
            .map(JsonValue::Array),
        other => Ok(other.clone()),
    }
}

/// Value of an ID field: a single ID, a list of IDs, or a long-form clause
/// body such as `{"value": id}`.
fn replace_ids(value: &JsonValue, keys: &[String]) -> GraphqlResult<JsonValue> {
    match value {
        JsonValue::String(id) => Ok(JsonValue::String(local_id(id)?)),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| replace_ids(item, keys))
            .collect::<GraphqlResult<Vec<_>>>()
            .map(JsonValue::Array),
        JsonValue::Object(map) => {
            let mut replaced = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let value = match key.as_str() {
                    "value" | "query" => replace_ids(value, keys)?,
                    _ => replace_id_deep(value, keys)?,
                };
                replaced.insert(key.clone(), value);
            }
            Ok(JsonValue::Object(replaced))
        }
        other => Ok(other.clone()),
    }
}

fn replace_ids_clause(value: &JsonValue, keys: &[String]) -> GraphqlResult<JsonValue> {
    match value {
        JsonValue::Object(map) => {
            let mut replaced = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                let value = if key == "values" {
                    replace_ids(value, keys)?
                } else {
                    replace_id_deep(value, keys)?
                };
                replaced.insert(key.clone(), value);
            }
            Ok(JsonValue::Object(replaced))
        }
        other => replace_id_deep(other, keys),
    }
}

/// Rewrite the top-level `keys` fields of a record from global IDs to local
/// IDs, copying every other field.
pub fn replace_id_keys(record: &JsonValue, keys: &[String]) -> GraphqlResult<JsonValue> {
    let JsonValue::Object(map) = record else {
        return Ok(record.clone());
    };
    let mut replaced = serde_json::Map::with_capacity(map.len());
    for (key, value) in map {
        let value = match value {
            JsonValue::String(id) if keys.iter().any(|id_key| id_key == key) => {
                JsonValue::String(local_id(id)?)
            }
            value => value.clone(),
        };
        replaced.insert(key.clone(), value);
    }
    Ok(JsonValue::Object(replaced))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::to_global_id;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn keys() -> Vec<String> {
        vec!["id".to_string(), "ownerId".to_string()]
    }

    #[test]
    fn ids_are_rewritten_at_any_depth() {
        let query = json!({
            "bool": {
                "must": [
                    { "term": { "id": to_global_id("User", "7") } },
                    { "terms": { "ownerId": [to_global_id("Team", "1"), to_global_id("Team", "2")] } },
                    { "term": { "ownerId": { "value": to_global_id("Team", "3") } } },
                    { "term": { "name": "VXNlcjo3" } },
                ],
                "filter": { "ids": { "values": [to_global_id("User", "8")] } },
            }
        });
        assert_eq!(
            replace_id_deep(&query, &keys()).unwrap(),
            json!({
                "bool": {
                    "must": [
                        { "term": { "id": "7" } },
                        { "terms": { "ownerId": ["1", "2"] } },
                        { "term": { "ownerId": { "value": "3" } } },
                        { "term": { "name": "VXNlcjo3" } },
                    ],
                    "filter": { "ids": { "values": ["8"] } },
                }
            })
        );
    }

    #[test]
    fn malformed_ids_propagate() {
        let query = json!({ "term": { "id": "not base64!" } });
        assert_matches!(
            replace_id_deep(&query, &keys()),
            Err(GraphqlError::GlobalId(_))
        );
    }

    #[test]
    fn only_top_level_keys_of_records() {
        let record = json!({
            "id": to_global_id("User", "7"),
            "name": "yoda",
            "profile": { "id": "kept" },
            "ownerId": null,
        });
        assert_eq!(
            replace_id_keys(&record, &keys()).unwrap(),
            json!({
                "id": "7",
                "name": "yoda",
                "profile": { "id": "kept" },
                "ownerId": null,
            })
        );
    }
}
