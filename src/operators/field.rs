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

//! Dotted field addressing (`payload.text`, `metadata.tokens`) used by the
//! operators to read their input and place their output.

use std::fmt;

use serde_json::{Map, Value};

use crate::errors::{Error, Result};
use crate::record::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Root {
    Payload,
    Metadata,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPath {
    root: Root,
    keys: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self> {
        let mut segments = path
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty());

        let root = match segments.next() {
            Some("payload") => Root::Payload,
            Some("metadata") => Root::Metadata,
            Some(_) => {
                return Err(Error::validation(format!(
                    "field path '{path}' must start with 'payload' or 'metadata'"
                )))
            }
            None => return Err(Error::validation("field path may not be empty")),
        };
        let keys: Vec<String> = segments.map(str::to_string).collect();
        if keys.is_empty() {
            return Err(Error::validation(format!(
                "field path '{path}' must name at least one key"
            )));
        }
        Ok(Self { root, keys })
    }

    /// Value at the path, if every segment exists.
    pub fn resolve<'a>(&self, record: &'a Record) -> Option<&'a Value> {
        let (first, rest) = self.keys.split_first()?;
        let mut current = match self.root {
            Root::Payload => record.payload.as_object()?.get(first)?,
            Root::Metadata => record.metadata.as_ref()?.get(first)?,
        };
        for key in rest {
            current = current.as_object()?.get(key)?;
        }
        Some(current)
    }

    /// Writes `value` at the path, creating intermediate objects. Fails when
    /// an intermediate segment holds a non-object value.
    pub fn set_value(&self, record: &mut Record, value: Value) -> Result<()> {
        let mut current: &mut Map<String, Value> = match self.root {
            Root::Payload => {
                if !record.payload.is_object() {
                    record.payload = Value::Object(Map::new());
                }
                match &mut record.payload {
                    Value::Object(map) => map,
                    _ => return Err(Error::internal("payload is not an object")),
                }
            }
            Root::Metadata => record.metadata_mut(),
        };

        let Some((last, parents)) = self.keys.split_last() else {
            return Err(Error::validation("field path must name at least one key"));
        };
        for key in parents {
            let entry = current
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            current = match entry {
                Value::Object(map) => map,
                _ => {
                    return Err(Error::validation(format!(
                        "cannot write '{self}': segment '{key}' is not an object"
                    )))
                }
            };
        }
        current.insert(last.clone(), value);
        Ok(())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = match self.root {
            Root::Payload => "payload",
            Root::Metadata => "metadata",
        };
        write!(f, "{root}.{}", self.keys.join("."))
    }
}

/// Reads an optional path setting, falling back to `default`.
pub(crate) fn path_setting_or(
    config: &Map<String, Value>,
    key: &str,
    default: &str,
) -> Result<FieldPath> {
    match config.get(key) {
        None | Some(Value::Null) => FieldPath::parse(default),
        Some(Value::String(raw)) => FieldPath::parse(raw),
        Some(_) => Err(Error::validation(format!("'{key}' must be a string path"))),
    }
}
