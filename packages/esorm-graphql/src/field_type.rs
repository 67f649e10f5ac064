//! Mapping from store field types to GraphQL types and values.

use crate::spec::ScalarTypeRef;
use crate::store::FieldType;
use async_graphql::{dynamic::TypeRef, Value};
use serde_json::Value as JsonValue;

/// GraphQL representation of a store field type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphqlFieldType {
    Int,
    Float,
    Boolean,
    String,
    Date,
    Json,
}

impl From<FieldType> for GraphqlFieldType {
    fn from(field_type: FieldType) -> Self {
        use FieldType::*;
        match field_type {
            Float => Self::Float,
            Integer => Self::Int,
            Boolean => Self::Boolean,
            Date => Self::Date,
            IntegerRange | FloatRange | LongRange | DoubleRange | DateRange | Object
            | Nested | GeoPoint | GeoShape | Ip | Completion | TokenCount | Murmur3
            | AnnotatedText | Percolator | Join | Alias => Self::Json,
            Text | Keyword | Long | Short | Byte | Double | HalfFloat | ScaledFloat
            | DateNanos | Binary | Flattened | SearchAsYouType | Unknown => Self::String,
        }
    }
}

impl GraphqlFieldType {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int => TypeRef::INT,
            Self::Float => TypeRef::FLOAT,
            Self::Boolean => TypeRef::BOOLEAN,
            Self::String => TypeRef::STRING,
            Self::Date => TypeRef::DATE,
            Self::Json => TypeRef::JSON,
        }
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::named(self.type_name())
    }

    /// Convert a stored value to its GraphQL value. `None` for missing or
    /// `null` values and for values that do not fit the type.
    pub fn to_value(&self, value: &JsonValue) -> Option<Value> {
        if value.is_null() {
            return None;
        }
        match self {
            Self::Int => match value {
                JsonValue::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f as i64))
                    .map(Value::from),
                JsonValue::String(s) => s.parse::<i64>().ok().map(Value::from),
                _ => None,
            },
            Self::Float => match value {
                JsonValue::Number(n) => n.as_f64().map(Value::from),
                JsonValue::String(s) => s.parse::<f64>().ok().map(Value::from),
                _ => None,
            },
            Self::Boolean => match value {
                JsonValue::Bool(b) => Some(Value::from(*b)),
                JsonValue::String(s) => s.parse::<bool>().ok().map(Value::from),
                _ => None,
            },
            Self::String => match value {
                JsonValue::String(s) => Some(Value::from(s.as_str())),
                other => Some(Value::from(other.to_string())),
            },
            Self::Date | Self::Json => Value::from_json(value.clone()).ok(),
        }
    }
}
