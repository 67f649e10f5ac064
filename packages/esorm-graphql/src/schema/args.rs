use super::self_prelude::*;

/// Arguments of a connection field, as sent by the client.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionArgs {
    pub after: Option<String>,
    pub before: Option<String>,
    pub first: Option<i64>,
    pub last: Option<i64>,
    pub query: Option<JsonValue>,
    pub group_by: Vec<String>,
    /// Every argument of the field, including caller-defined ones.
    pub all: serde_json::Map<String, JsonValue>,
}

impl ConnectionArgs {
    pub fn from_json(args: serde_json::Map<String, JsonValue>) -> GraphqlResult<Self> {
        Ok(Self {
            after: string_arg(&args, "after")?,
            before: string_arg(&args, "before")?,
            first: int_arg(&args, "first")?,
            last: int_arg(&args, "last")?,
            query: args.get("query").filter(|query| !query.is_null()).cloned(),
            group_by: group_by_arg(&args)?,
            all: args,
        })
    }

    /// The cursor to page from. `after` takes precedence over `before`, and
    /// empty strings count as absent.
    pub fn cursor(&self) -> Option<&str> {
        [self.after.as_deref(), self.before.as_deref()]
            .into_iter()
            .flatten()
            .find(|cursor| !cursor.is_empty())
    }

    /// Requested page size. `first` takes precedence over `last`, and `0`
    /// counts as absent.
    pub fn page_size(&self) -> GraphqlResult<Option<PageSize>> {
        for (name, value) in [("first", self.first), ("last", self.last)] {
            if let Some(value) = value.filter(|value| *value < 0) {
                return Err(GraphqlError::InvalidArgument(
                    name.to_string(),
                    format!("must not be negative, got {value}"),
                ));
            }
        }
        let first = self.first.filter(|first| *first > 0);
        let last = self.last.filter(|last| *last > 0);
        Ok(first.or(last).map(|size| PageSize {
            size: size as u64,
            backward: last.is_some(),
        }))
    }
}

/// Size of a requested page and the direction it was requested in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSize {
    pub size: u64,
    /// `last` was given, so next and previous are seen from the end.
    pub backward: bool,
}

/// Caller hook rewriting the composed find options of a connection.
pub type FindOptionsHook =
    Arc<dyn Fn(FindOptions, &ConnectionArgs) -> FindOptions + Send + Sync>;

fn string_arg(
    args: &serde_json::Map<String, JsonValue>,
    name: &str,
) -> GraphqlResult<Option<String>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(GraphqlError::InvalidArgument(
            name.to_string(),
            format!("expected a string, got {other}"),
        )),
    }
}

fn int_arg(
    args: &serde_json::Map<String, JsonValue>,
    name: &str,
) -> GraphqlResult<Option<i64>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(value)) => value.as_i64().map(Some).ok_or_else(|| {
            GraphqlError::InvalidArgument(
                name.to_string(),
                format!("expected an integer, got {value}"),
            )
        }),
        Some(other) => Err(GraphqlError::InvalidArgument(
            name.to_string(),
            format!("expected an integer, got {other}"),
        )),
    }
}

fn group_by_arg(args: &serde_json::Map<String, JsonValue>) -> GraphqlResult<Vec<String>> {
    match args.get("groupBy") {
        None | Some(JsonValue::Null) => Ok(vec![]),
        Some(JsonValue::String(group)) => Ok(vec![group.clone()]),
        Some(JsonValue::Array(groups)) => groups
            .iter()
            .map(|group| match group {
                JsonValue::String(group) => Ok(group.clone()),
                other => Err(GraphqlError::InvalidArgument(
                    "groupBy".to_string(),
                    format!("expected a string, got {other}"),
                )),
            })
            .collect(),
        Some(other) => Err(GraphqlError::InvalidArgument(
            "groupBy".to_string(),
            format!("expected a list of strings, got {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn args(value: JsonValue) -> ConnectionArgs {
        match value {
            JsonValue::Object(map) => ConnectionArgs::from_json(map).unwrap(),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn first_wins_over_last() {
        let args = args(json!({ "first": 2, "last": 5 }));
        assert_eq!(
            args.page_size().unwrap(),
            Some(PageSize {
                size: 2,
                backward: true
            })
        );
    }

    #[test]
    fn zero_counts_as_absent() {
        assert_eq!(args(json!({ "first": 0 })).page_size().unwrap(), None);
        assert_eq!(
            args(json!({ "first": 0, "last": 3 })).page_size().unwrap(),
            Some(PageSize {
                size: 3,
                backward: true
            })
        );
    }

    #[test]
    fn negative_sizes_are_rejected() {
        assert_matches!(
            args(json!({ "last": -1 })).page_size(),
            Err(GraphqlError::InvalidArgument(name, _)) if name == "last"
        );
    }

    #[test]
    fn after_wins_over_before() {
        assert_eq!(args(json!({ "after": "a", "before": "b" })).cursor(), Some("a"));
        assert_eq!(args(json!({ "after": "", "before": "b" })).cursor(), Some("b"));
        assert_eq!(args(json!({ "after": null })).cursor(), None);
    }

    #[test]
    fn group_by_and_extension_args() {
        let args = args(json!({ "groupBy": ["a", "b"], "sort": "name" }));
        assert_eq!(args.group_by, vec!["a", "b"]);
        assert_eq!(args.all["sort"], json!("name"));
        assert_matches!(
            ConnectionArgs::from_json(
                json!({ "first": "ten" }).as_object().cloned().unwrap()
            ),
            Err(GraphqlError::InvalidArgument(name, _)) if name == "first"
        );
    }
}
