use super::self_prelude::*;

/// Mapping types understood by the document store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Keyword,
    Long,
    Integer,
    Short,
    Byte,
    Double,
    Float,
    HalfFloat,
    ScaledFloat,
    Date,
    DateNanos,
    Boolean,
    Binary,
    IntegerRange,
    FloatRange,
    LongRange,
    DoubleRange,
    DateRange,
    Object,
    Nested,
    Flattened,
    GeoPoint,
    GeoShape,
    Ip,
    Completion,
    TokenCount,
    Murmur3,
    #[serde(alias = "annotated-text")]
    AnnotatedText,
    Percolator,
    Join,
    Alias,
    SearchAsYouType,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(rename = "type")]
    pub r#type: FieldType,
}

/// Field mappings of a model plus the fields that hold global IDs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub mappings: IndexMap<String, FieldMapping>,
    #[serde(default)]
    pub global_keys: Vec<String>,
}

impl FieldMapping {
    pub fn new(r#type: FieldType) -> Self {
        Self { r#type }
    }
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, r#type: FieldType) -> Self {
        self.mappings.insert(name.into(), FieldMapping::new(r#type));
        self
    }

    pub fn global_key(mut self, name: impl Into<String>) -> Self {
        self.global_keys.push(name.into());
        self
    }

    /// Fields whose values are global IDs on the way in: `id` plus the
    /// declared global keys.
    pub fn id_keys(&self) -> Vec<String> {
        std::iter::once("id".to_string())
            .chain(self.global_keys.iter().cloned())
            .collect()
    }
}
