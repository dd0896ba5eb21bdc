//! Mapped output resources.

use obds_model::ResourceKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A mapped FHIR resource: type, id and an otherwise opaque JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputResource {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub id: String,
    #[serde(flatten)]
    pub content: Map<String, Value>,
}

impl OutputResource {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            content: Map::new(),
        }
    }

    pub fn of_kind(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::new(kind.as_str(), id)
    }

    /// Sets a top-level element, replacing any previous value.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.content.insert(key.into(), value);
        self
    }

    /// Sets `meta.source`, keeping other `meta` elements.
    #[must_use]
    pub fn with_meta_source(mut self, source: impl Into<String>) -> Self {
        let meta = self
            .content
            .entry("meta")
            .or_insert_with(|| Value::Object(Map::new()));
        if !meta.is_object() {
            *meta = Value::Object(Map::new());
        }
        if let Value::Object(meta) = meta {
            meta.insert("source".to_string(), Value::String(source.into()));
        }
        self
    }

    /// Upsert address `"{type}/{id}"`.
    pub fn address(&self) -> String {
        format!("{}/{}", self.resource_type, self.id)
    }
}
