use super::model::*;
use super::model_schema::*;
use super::self_prelude::*;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::debug;

/// A [`Model`] kept in memory, used by tests and the demo server.
///
/// Understands a small subset of the store's query DSL: `match_all`, `term`,
/// `terms`, `match`, `ids` and `bool`.
pub struct MemoryModel {
    name: String,
    model_name: String,
    schema: ModelSchema,
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    records: Vec<Record>,
    next_id: u64,
}

impl MemoryModel {
    pub fn new(model_name: impl Into<String>, schema: ModelSchema) -> Self {
        let model_name = model_name.into();
        Self {
            name: model_name.to_lowercase(),
            model_name,
            schema,
            state: RwLock::new(MemoryState {
                records: vec![],
                next_id: 1,
            }),
        }
    }

    /// Override the index name, which defaults to the lowercased model name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub async fn records(&self) -> Vec<Record> {
        self.state.read().await.records.clone()
    }

    async fn matching(&self, query: Option<&JsonValue>) -> StoreResult<Vec<Record>> {
        let state = self.state.read().await;
        let mut matched = vec![];
        for record in state.records.iter() {
            let is_match = match query {
                Some(query) => matches_query(query, record)?,
                None => true,
            };
            if is_match {
                matched.push(record.clone());
            }
        }
        Ok(matched)
    }
}

#[async_trait]
impl Model for MemoryModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    async fn count(&self, options: &FindOptions) -> StoreResult<u64> {
        let matched = self.matching(options.query.as_ref()).await?;
        Ok(matched.len() as u64)
    }

    async fn find_all(&self, options: &FindOptions) -> StoreResult<Vec<Record>> {
        let matched = self.matching(options.query.as_ref()).await?;
        let from = options.from.unwrap_or(0) as usize;
        let size = options.size.map(|size| size as usize).unwrap_or(usize::MAX);
        debug!(
            "{}: {} matching records, window from {from} size {:?}",
            self.name,
            matched.len(),
            options.size
        );
        Ok(matched.into_iter().skip(from).take(size).collect())
    }

    async fn create_bulk(
        &self,
        records: Vec<Record>,
        _options: &WriteOptions,
    ) -> StoreResult<Vec<String>> {
        let records = records
            .into_iter()
            .map(|record| match record {
                JsonValue::Object(map) => Ok(map),
                other => Err(StoreError::Other(anyhow::anyhow!(
                    "Records must be objects, got: {other}"
                ))),
            })
            .collect::<StoreResult<Vec<_>>>()?;

        let mut state = self.state.write().await;
        let mut taken = state
            .records
            .iter()
            .filter_map(|record| record.get("id"))
            .map(id_string)
            .collect::<HashSet<_>>();
        taken.extend(records.iter().filter_map(|record| record.get("id")).map(id_string));

        let mut ids = Vec::with_capacity(records.len());
        for mut record in records {
            let id = match record.get("id") {
                Some(JsonValue::Null) | None => {
                    let id = state.next_unused_id(&taken);
                    taken.insert(id.clone());
                    record.insert("id".to_string(), JsonValue::String(id.clone()));
                    id
                }
                Some(id) => id_string(id),
            };
            ids.push(id);
            state.records.push(JsonValue::Object(record));
        }
        debug!("{}: stored {} records", self.name, ids.len());
        Ok(ids)
    }
}

impl MemoryState {
    /// Next sequential ID not held by any record.
    fn next_unused_id(&mut self, taken: &HashSet<String>) -> String {
        loop {
            let id = self.next_id.to_string();
            self.next_id += 1;
            if !taken.contains(&id) {
                return id;
            }
        }
    }
}

fn id_string(id: &JsonValue) -> String {
    match id {
        JsonValue::String(id) => id.clone(),
        other => other.to_string(),
    }
}

fn single_clause(query: &JsonValue) -> StoreResult<(&str, &JsonValue)> {
    if let JsonValue::Object(map) = query {
        let mut entries = map.iter();
        if let (Some((name, body)), None) = (entries.next(), entries.next()) {
            return Ok((name.as_str(), body));
        }
    }
    Err(StoreError::MalformedQuery(
        query.to_string(),
        "expected an object with exactly one clause".to_string(),
    ))
}

/// Field and value of a `term`/`match` style clause, accepting both the
/// short form `{"field": value}` and the long form `{"field": {"value": value}}`.
fn field_clause<'a>(
    clause: &str,
    body: &'a JsonValue,
    long_key: &str,
) -> StoreResult<(&'a str, &'a JsonValue)> {
    let (field, value) = single_clause(body)
        .map_err(|_| StoreError::MalformedQuery(clause.to_string(), body.to_string()))?;
    let value = match value {
        JsonValue::Object(map) => map.get(long_key).ok_or_else(|| {
            StoreError::MalformedQuery(clause.to_string(), body.to_string())
        })?,
        value => value,
    };
    Ok((field, value))
}

fn field_values<'a>(record: &'a Record, field: &str) -> Vec<&'a JsonValue> {
    match record.get(field) {
        Some(JsonValue::Array(values)) => values.iter().collect(),
        Some(value) => vec![value],
        None => vec![],
    }
}

fn term_eq(stored: &JsonValue, expected: &JsonValue) -> bool {
    match (stored, expected) {
        (JsonValue::Number(a), JsonValue::Number(b)) => a.as_f64() == b.as_f64(),
        (JsonValue::String(a), JsonValue::Number(b)) => *a == b.to_string(),
        (JsonValue::Number(a), JsonValue::String(b)) => a.to_string() == *b,
        (a, b) => a == b,
    }
}

fn clause_list(clause: &str, value: Option<&JsonValue>) -> StoreResult<Vec<JsonValue>> {
    match value {
        None => Ok(vec![]),
        Some(JsonValue::Array(items)) => Ok(items.clone()),
        Some(object @ JsonValue::Object(_)) => Ok(vec![object.clone()]),
        Some(other) => Err(StoreError::MalformedQuery(
            clause.to_string(),
            other.to_string(),
        )),
    }
}

/// Evaluate a query against a single record.
pub fn matches_query(query: &JsonValue, record: &Record) -> StoreResult<bool> {
    let (clause, body) = single_clause(query)?;
    match clause {
        "match_all" => Ok(true),
        "term" => {
            let (field, expected) = field_clause(clause, body, "value")?;
            Ok(field_values(record, field)
                .into_iter()
                .any(|stored| term_eq(stored, expected)))
        }
        "terms" => {
            let (field, expected) = single_clause(body)?;
            let expected = expected.as_array().ok_or_else(|| {
                StoreError::MalformedQuery(clause.to_string(), body.to_string())
            })?;
            Ok(field_values(record, field).into_iter().any(|stored| {
                expected.iter().any(|expected| term_eq(stored, expected))
            }))
        }
        "match" => {
            let (field, expected) = field_clause(clause, body, "query")?;
            Ok(field_values(record, field)
                .into_iter()
                .any(|stored| match (stored, expected) {
                    (JsonValue::String(stored), JsonValue::String(expected)) => stored
                        .to_lowercase()
                        .contains(&expected.to_lowercase()),
                    (stored, expected) => term_eq(stored, expected),
                }))
        }
        "ids" => {
            let values = body
                .get("values")
                .and_then(JsonValue::as_array)
                .ok_or_else(|| {
                    StoreError::MalformedQuery(clause.to_string(), body.to_string())
                })?;
            Ok(record
                .get("id")
                .map(|id| values.iter().any(|value| term_eq(id, value)))
                .unwrap_or(false))
        }
        "bool" => {
            let mut required = clause_list("must", body.get("must"))?;
            required.extend(clause_list("filter", body.get("filter"))?);
            let should = clause_list("should", body.get("should"))?;
            let must_not = clause_list("must_not", body.get("must_not"))?;

            for query in required.iter() {
                if !matches_query(query, record)? {
                    return Ok(false);
                }
            }
            for query in must_not.iter() {
                if matches_query(query, record)? {
                    return Ok(false);
                }
            }
            // `should` only narrows the result when nothing else is required.
            if required.is_empty() && !should.is_empty() {
                for query in should.iter() {
                    if matches_query(query, record)? {
                        return Ok(true);
                    }
                }
                return Ok(false);
            }
            Ok(true)
        }
        other => Err(StoreError::UnsupportedQuery(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn test_model() -> MemoryModel {
        MemoryModel::new(
            "TestModel",
            ModelSchema::new()
                .field("name", FieldType::Text)
                .field("age", FieldType::Integer),
        )
    }

    async fn seeded_model() -> MemoryModel {
        let model = test_model();
        model
            .create_bulk(
                vec![
                    json!({ "name": "obiwan", "age": 57 }),
                    json!({ "name": "yoda", "age": 900 }),
                    json!({ "name": "old ben", "age": 57 }),
                ],
                &WriteOptions::default(),
            )
            .await
            .unwrap();
        model
    }

    #[tokio::test]
    async fn create_bulk_assigns_ids() {
        let model = test_model();
        let ids = model
            .create_bulk(
                vec![json!({ "name": "obiwan" }), json!({ "id": "x", "name": "yoda" })],
                &WriteOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(ids, vec!["1", "x"]);
        assert_eq!(model.records().await[0]["id"], json!("1"));
    }

    #[tokio::test]
    async fn count_ignores_window() {
        let model = seeded_model().await;
        let options = FindOptions {
            size: Some(1),
            from: Some(1),
            ..Default::default()
        };
        assert_eq!(model.count(&options).await.unwrap(), 3);
        assert_eq!(model.find_all(&options).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn term_query() {
        let model = seeded_model().await;
        let options = FindOptions {
            query: Some(json!({ "term": { "name": "obiwan" } })),
            ..Default::default()
        };
        let records = model.find_all(&options).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], json!("obiwan"));
    }

    #[tokio::test]
    async fn bool_query() {
        let model = seeded_model().await;
        let options = FindOptions {
            query: Some(json!({
                "bool": {
                    "must": [{ "term": { "age": 57 } }],
                    "must_not": { "match": { "name": "OLD" } },
                }
            })),
            ..Default::default()
        };
        let records = model.find_all(&options).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], json!("obiwan"));

        let options = FindOptions {
            query: Some(json!({
                "bool": {
                    "should": [
                        { "term": { "name": "yoda" } },
                        { "ids": { "values": ["3"] } },
                    ]
                }
            })),
            ..Default::default()
        };
        assert_eq!(model.count(&options).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unsupported_clause() {
        let model = seeded_model().await;
        let options = FindOptions {
            query: Some(json!({ "geo_distance": {} })),
            ..Default::default()
        };
        assert_matches!(
            model.count(&options).await,
            Err(StoreError::UnsupportedQuery(clause)) if clause == "geo_distance"
        );
    }

    #[tokio::test]
    async fn generated_ids_skip_given_ones() {
        let model = test_model();
        let ids = model
            .create_bulk(
                vec![json!({ "id": "2", "name": "obiwan" }), json!({ "name": "yoda" })],
                &WriteOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(ids, vec!["2", "1"]);

        let ids = model
            .create_bulk(vec![json!({ "name": "ben" })], &WriteOptions::default())
            .await
            .unwrap();
        assert_eq!(ids, vec!["3"]);
    }

    #[tokio::test]
    async fn invalid_batch_stores_nothing() {
        let model = test_model();
        let result = model
            .create_bulk(
                vec![json!({ "name": "obiwan" }), json!("yoda")],
                &WriteOptions::default(),
            )
            .await;
        assert_matches!(result, Err(StoreError::Other(_)));
        assert!(model.records().await.is_empty());
    }
}
