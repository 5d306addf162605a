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

//! Text operators: `text.normalize`, `text.tokenize`, `text.stopwords` and
//! `text.lemmatize`.

use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};

use crate::errors::{Error, Result};
use crate::operator::Operator;
use crate::operators::field::{path_setting_or, FieldPath};
use crate::record::{json_kind, Record, RecordBatch};
use crate::text::normalizer::{clean_text, drop_short_tokens, token_sequence, tokenize};
use crate::text::TextNormalizer;
use crate::toolkit::NlpToolkit;

const DEFAULT_TEXT: &str = "payload.text";
const DEFAULT_TOKENS: &str = "metadata.tokens";

/// Operator settings object; a missing config means all defaults.
pub(crate) fn settings<'a>(config: &'a Value, operator: &str) -> Result<&'a Map<String, Value>> {
    static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();
    match config {
        Value::Null => Ok(EMPTY.get_or_init(Map::new)),
        Value::Object(map) => Ok(map),
        _ => Err(Error::validation(format!("{operator} config must be object"))),
    }
}

/// Reads a string field; absent fields are skipped by returning `None`.
pub(crate) fn text_at<'a>(path: &FieldPath, record: &'a Record) -> Result<Option<&'a str>> {
    match path.resolve(record) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => Err(Error::schema(format!(
            "field '{path}' must be a string, found {}",
            json_kind(other)
        ))),
    }
}

fn tokens_at(path: &FieldPath, record: &Record, stage: &str) -> Result<Vec<String>> {
    let value = path.resolve(record).unwrap_or(&Value::Null);
    token_sequence(value, stage)
}

fn to_json(tokens: Vec<String>) -> Value {
    Value::Array(tokens.into_iter().map(Value::String).collect())
}

#[derive(Debug)]
pub struct NormalizeText {
    source: FieldPath,
    target: FieldPath,
    normalizer: TextNormalizer,
}

impl NormalizeText {
    pub fn new(source: FieldPath, target: FieldPath, toolkit: Arc<NlpToolkit>) -> Self {
        Self {
            source,
            target,
            normalizer: TextNormalizer::new(toolkit),
        }
    }
}

impl Operator for NormalizeText {
    fn name(&self) -> &'static str {
        "text.normalize"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        for record in &mut batch {
            let Some(text) = text_at(&self.source, record)? else {
                continue;
            };
            let normalized = self.normalizer.normalize(text);
            self.target.set_value(record, Value::String(normalized))?;
        }
        Ok(batch)
    }
}

pub fn normalize_factory(
    config: &Value,
    toolkit: &Arc<NlpToolkit>,
) -> Result<Box<dyn Operator + Send + Sync>> {
    let obj = settings(config, "text.normalize")?;
    let source = path_setting_or(obj, "path", DEFAULT_TEXT)?;
    let target = path_setting_or(obj, "target", "payload.preprocessed_text")?;
    Ok(Box::new(NormalizeText::new(source, target, Arc::clone(toolkit))))
}

/// Cleans text (lowercase, markup, URLs, special characters, digits and
/// punctuation) and writes the token array.
#[derive(Debug)]
pub struct Tokenize {
    source: FieldPath,
    target: FieldPath,
}

impl Tokenize {
    pub fn new(source: FieldPath, target: FieldPath) -> Self {
        Self { source, target }
    }
}

impl Operator for Tokenize {
    fn name(&self) -> &'static str {
        "text.tokenize"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        for record in &mut batch {
            let Some(text) = text_at(&self.source, record)? else {
                continue;
            };
            let tokens = tokenize(&clean_text(text));
            self.target.set_value(record, to_json(tokens))?;
        }
        Ok(batch)
    }
}

pub fn tokenize_factory(
    config: &Value,
    _toolkit: &Arc<NlpToolkit>,
) -> Result<Box<dyn Operator + Send + Sync>> {
    let obj = settings(config, "text.tokenize")?;
    let source = path_setting_or(obj, "path", DEFAULT_TEXT)?;
    let target = path_setting_or(obj, "target", DEFAULT_TOKENS)?;
    Ok(Box::new(Tokenize::new(source, target)))
}

/// Removes English stopwords from a token array. A field that is not an
/// array of strings violates the operator's input contract.
#[derive(Debug)]
pub struct RemoveStopwords {
    source: FieldPath,
    target: FieldPath,
    normalizer: TextNormalizer,
}

impl RemoveStopwords {
    pub fn new(source: FieldPath, target: FieldPath, toolkit: Arc<NlpToolkit>) -> Self {
        Self {
            source,
            target,
            normalizer: TextNormalizer::new(toolkit),
        }
    }
}

impl Operator for RemoveStopwords {
    fn name(&self) -> &'static str {
        "text.stopwords"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        for record in &mut batch {
            let tokens = tokens_at(&self.source, record, self.name())?;
            let kept = self.normalizer.remove_stopwords(&tokens);
            self.target.set_value(record, to_json(kept))?;
        }
        Ok(batch)
    }
}

pub fn stopwords_factory(
    config: &Value,
    toolkit: &Arc<NlpToolkit>,
) -> Result<Box<dyn Operator + Send + Sync>> {
    let obj = settings(config, "text.stopwords")?;
    let source = path_setting_or(obj, "path", DEFAULT_TOKENS)?;
    let target = path_setting_or(obj, "target", &source.to_string())?;
    Ok(Box::new(RemoveStopwords::new(source, target, Arc::clone(toolkit))))
}

/// Lemmatizes a token array and drops single-character lemmas. With
/// `joined` set, the space-joined lemmas are written there as well.
#[derive(Debug)]
pub struct Lemmatize {
    source: FieldPath,
    target: FieldPath,
    joined: Option<FieldPath>,
    normalizer: TextNormalizer,
}

impl Lemmatize {
    pub fn new(
        source: FieldPath,
        target: FieldPath,
        joined: Option<FieldPath>,
        toolkit: Arc<NlpToolkit>,
    ) -> Self {
        Self {
            source,
            target,
            joined,
            normalizer: TextNormalizer::new(toolkit),
        }
    }
}

impl Operator for Lemmatize {
    fn name(&self) -> &'static str {
        "text.lemmatize"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        for record in &mut batch {
            let tokens = tokens_at(&self.source, record, self.name())?;
            let lemmas = drop_short_tokens(self.normalizer.lemmatize_tokens(&tokens));
            if let Some(joined) = &self.joined {
                joined.set_value(record, Value::String(lemmas.join(" ")))?;
            }
            self.target.set_value(record, to_json(lemmas))?;
        }
        Ok(batch)
    }
}

pub fn lemmatize_factory(
    config: &Value,
    toolkit: &Arc<NlpToolkit>,
) -> Result<Box<dyn Operator + Send + Sync>> {
    let obj = settings(config, "text.lemmatize")?;
    let source = path_setting_or(obj, "path", DEFAULT_TOKENS)?;
    let target = path_setting_or(obj, "target", &source.to_string())?;
    let joined = match obj.get("joined") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(FieldPath::parse(raw)?),
        Some(_) => return Err(Error::validation("text.lemmatize 'joined' must be a string path")),
    };
    Ok(Box::new(Lemmatize::new(source, target, joined, Arc::clone(toolkit))))
}
