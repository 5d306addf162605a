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

//! Index field schema and the stored-document transform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use xxhash_rust::xxh3::xxh3_64;

use crate::errors::{Error, Result};
use crate::post::{
    parse_timestamp, FIELD_CREATED_AT, FIELD_PREPROCESSED_TEXT, FIELD_PROCESSED_AT, ID_KEYS,
    LABEL_KEYS, TEXT_KEYS, TYPE_KEYS,
};
use crate::record::{json_kind, Record};

/// Characters above which `original_text` gets no keyword sub-field value.
pub const KEYWORD_IGNORE_ABOVE: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    /// Exact-match.
    Keyword,
    /// Analyzed free text.
    Text,
    /// Free text with a `.keyword` exact-match sub-field.
    TextWithKeyword,
    Float,
    Date,
}

/// Indexed fields in mapping order.
pub const FIELDS: &[(&str, FieldType)] = &[
    ("id_post", FieldType::Keyword),
    ("titre", FieldType::Text),
    ("contenu", FieldType::Text),
    ("original_text", FieldType::TextWithKeyword),
    ("preprocessed_text", FieldType::Text),
    ("auteur", FieldType::Keyword),
    ("date", FieldType::Date),
    ("url", FieldType::Keyword),
    ("language", FieldType::Keyword),
    ("sentiment", FieldType::Keyword),
    ("polarity", FieldType::Float),
    ("subjectivity", FieldType::Float),
    ("vader_compound", FieldType::Float),
    ("toxicity_score", FieldType::Float),
    ("label", FieldType::Keyword),
    ("type", FieldType::Keyword),
    ("created_at", FieldType::Date),
    ("nlp_processed_at", FieldType::Date),
];

/// Type of `field`, resolving the `original_text.keyword` sub-field.
pub fn field_type(field: &str) -> Option<FieldType> {
    if let Some(parent) = field.strip_suffix(".keyword") {
        return match field_type(parent)? {
            FieldType::TextWithKeyword => Some(FieldType::Keyword),
            _ => None,
        };
    }
    FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, kind)| *kind)
}

/// Index creation body: mappings plus single-shard, replica-free settings.
pub fn mapping() -> Value {
    let mut properties = Map::new();
    for (name, kind) in FIELDS {
        let property = match kind {
            FieldType::Keyword => json!({"type": "keyword"}),
            FieldType::Text => json!({"type": "text", "analyzer": "standard"}),
            FieldType::TextWithKeyword => json!({
                "type": "text",
                "analyzer": "standard",
                "fields": {"keyword": {"type": "keyword", "ignore_above": KEYWORD_IGNORE_ABOVE}},
            }),
            FieldType::Float => json!({"type": "float"}),
            FieldType::Date => json!({"type": "date"}),
        };
        properties.insert((*name).to_string(), property);
    }
    json!({
        "mappings": {"properties": properties},
        "settings": {"number_of_shards": 1, "number_of_replicas": 0},
    })
}

/// Document as published to the index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub id_post: String,
    pub titre: String,
    pub contenu: String,
    pub original_text: String,
    pub preprocessed_text: String,
    pub auteur: String,
    pub date: DateTime<Utc>,
    pub url: String,
    pub language: String,
    pub sentiment: String,
    pub polarity: f64,
    pub subjectivity: f64,
    pub vader_compound: f64,
    pub toxicity_score: f64,
    pub label: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub created_at: DateTime<Utc>,
    pub nlp_processed_at: DateTime<Utc>,
}

/// Stable anonymous author handle derived from a post id.
pub fn anonymize_author(id: &str) -> String {
    format!("user_{}", xxh3_64(id.as_bytes()) % 1000)
}

pub fn post_url(id: &str) -> String {
    format!("https://example.com/post/{id}")
}

/// `Post ` followed by the first eight characters of the id.
pub fn post_title(id: &str) -> String {
    let short: String = id.chars().take(8).collect();
    format!("Post {short}")
}

fn string_or(record: &Record, keys: &[&str], default: &str) -> Result<String> {
    Ok(record.str_field(keys)?.unwrap_or(default).to_string())
}

fn float_or_zero(record: &Record, key: &str) -> Result<f64> {
    match record.field(&[key]) {
        None => Ok(0.0),
        Some(Value::Number(number)) => Ok(number.as_f64().unwrap_or_default()),
        Some(Value::String(raw)) => raw
            .trim()
            .parse()
            .map_err(|_| Error::schema(format!("field '{key}' is not a number: '{raw}'"))),
        Some(other) => Err(Error::schema(format!(
            "field '{key}' must be a number, found {}",
            json_kind(other)
        ))),
    }
}

fn date_or(record: &Record, key: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    match record.str_field(&[key])? {
        None => Ok(now),
        Some(raw) => parse_timestamp(raw)
            .ok_or_else(|| Error::schema(format!("field '{key}' is not a timestamp: '{raw}'"))),
    }
}

fn id_of(record: &Record) -> String {
    match record.field(ID_KEYS) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => record.id.clone().unwrap_or_default(),
    }
}

impl IndexDocument {
    /// Builds the index document for a stored post. Missing dates become
    /// `now`, missing scores 0.0, missing language `unknown`, missing
    /// sentiment `neutral` and other missing strings empty.
    pub fn from_stored(record: &Record, now: DateTime<Utc>) -> Result<Self> {
        let id = id_of(record);
        let text = string_or(record, TEXT_KEYS, "")?;
        let created_at = date_or(record, FIELD_CREATED_AT, now)?;
        Ok(IndexDocument {
            titre: post_title(&id),
            contenu: text.clone(),
            original_text: text,
            preprocessed_text: string_or(record, &[FIELD_PREPROCESSED_TEXT], "")?,
            auteur: anonymize_author(&id),
            date: created_at,
            url: post_url(&id),
            language: string_or(record, &["language"], "unknown")?,
            sentiment: string_or(record, &["sentiment"], "neutral")?,
            polarity: float_or_zero(record, "polarity")?,
            subjectivity: float_or_zero(record, "subjectivity")?,
            vader_compound: float_or_zero(record, "vader_compound")?,
            toxicity_score: float_or_zero(record, "toxicity_score")?,
            label: string_or(record, LABEL_KEYS, "")?,
            post_type: string_or(record, TYPE_KEYS, "")?,
            created_at,
            nlp_processed_at: date_or(record, FIELD_PROCESSED_AT, now)?,
            id_post: id,
        })
    }
}
