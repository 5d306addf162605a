//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Harcelement.
//! The Harcelement project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Record Module
//!
//! [`Record`] is the document unit exchanged with the store collaborators and
//! passed through operator pipelines. The payload is a JSON object holding the
//! stored post fields (`text`, `label`, `type`, `created_at`, and after
//! enrichment `preprocessed_text`, `language`, `toxicity_score`, ...).
//!
//! ```rust
//! use harcelement::record::Record;
//! use serde_json::json;
//!
//! let record = Record::new("42".to_string(), json!({"text": "hello", "label": "NB"}));
//! assert_eq!(record.str_field(&["text"]).unwrap(), Some("hello"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Result, Error};

/// Generic metadata map that may accompany a record.
pub type Metadata = Map<String, Value>;

/// Fundamental document unit read from sources and written to sinks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Stable identifier; sinks address patches by it.
    pub id: Option<String>,

    /// Stored document fields.
    pub payload: Value,

    /// Scratch attributes produced by operators (language, scores, tokens).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Record {
    /// Constructs a record with the given payload and optional identifier.
    pub fn new(id: impl Into<Option<String>>, payload: Value) -> Self {
        Record {
            id: id.into(),
            payload,
            metadata: None,
        }
    }

    /// Attaches metadata to the record.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns a mutable reference to the metadata map, creating it if necessary.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        self.metadata.get_or_insert_with(Metadata::new)
    }

    /// Returns the first present payload field among `keys`.
    pub fn field(&self, keys: &[&str]) -> Option<&Value> {
        let object = self.payload.as_object()?;
        keys.iter()
            .filter_map(|key| object.get(*key))
            .find(|value| !value.is_null())
    }

    /// Returns the first present string field among `keys`.
    ///
    /// Absent or null fields yield `Ok(None)`; a present field of another JSON
    /// type is a schema error.
    pub fn str_field(&self, keys: &[&str]) -> Result<Option<&str>> {
        match self.field(keys) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.as_str())),
            Some(other) => Err(Error::schema(format!(
                "field '{}' must be a string, found {}",
                keys.first().copied().unwrap_or_default(),
                json_kind(other)
            ))),
        }
    }

    /// Merges `patch` into the payload object, overwriting existing keys.
    pub fn merge(&mut self, patch: &Map<String, Value>) {
        if !self.payload.is_object() {
            self.payload = Value::Object(Map::new());
        }
        if let Value::Object(object) = &mut self.payload {
            for (key, value) in patch {
                object.insert(key.clone(), value.clone());
            }
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convenience alias for working on batches of records.
pub type RecordBatch = Vec<Record>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn str_field_prefers_first_present_key() {
        let record = Record::new(
            "1".to_string(),
            json!({"original_text": null, "Text": "legacy", "text": "current"}),
        );
        assert_eq!(
            record.str_field(&["original_text", "text", "Text"]).unwrap(),
            Some("current")
        );
    }

    #[test]
    fn str_field_rejects_non_string() {
        let record = Record::new("1".to_string(), json!({"text": {"nested": true}}));
        assert!(matches!(
            record.str_field(&["text"]),
            Err(Error::Schema { .. })
        ));
    }

    #[test]
    fn merge_overwrites_only_patched_keys() {
        let mut record = Record::new("1".to_string(), json!({"text": "a", "label": "B"}));
        let mut patch = Map::new();
        patch.insert("label".into(), json!("NB"));
        patch.insert("language".into(), json!("en"));
        record.merge(&patch);
        assert_eq!(record.payload, json!({"text": "a", "label": "NB", "language": "en"}));
    }
}
