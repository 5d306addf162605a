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

//! # Post Model
//!
//! Typed views of the documents the pipeline moves around:
//!
//! - [`RawPost`]: a labeled post as produced by dataset ingestion
//! - [`NormalizedText`]: the original text and its normalized token string
//! - [`EnrichmentResult`]: language, sentiment and toxicity for one post
//! - [`EnrichedPost`]: all three merged, the unit handed to persistence
//!
//! Stored documents use the field names below; the legacy dataset column
//! names (`Text`, `Label`, `Types`, `Id_post`) are accepted when reading.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::{Error, Result};
use crate::record::Record;

pub const FIELD_ID: &str = "id_post";
pub const FIELD_TEXT: &str = "text";
pub const FIELD_LABEL: &str = "label";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_CREATED_AT: &str = "created_at";
pub const FIELD_ORIGINAL_TEXT: &str = "original_text";
pub const FIELD_PREPROCESSED_TEXT: &str = "preprocessed_text";
pub const FIELD_PROCESSED_AT: &str = "nlp_processed_at";

/// Keys searched, in order, for the raw text of a stored document.
pub const TEXT_KEYS: &[&str] = &[FIELD_ORIGINAL_TEXT, FIELD_TEXT, "Text"];
/// Keys searched, in order, for the label of a stored document.
pub const LABEL_KEYS: &[&str] = &[FIELD_LABEL, "Label"];
/// Keys searched, in order, for the post type of a stored document.
pub const TYPE_KEYS: &[&str] = &[FIELD_TYPE, "Types"];
/// Keys searched, in order, for the post identifier of a stored document.
pub const ID_KEYS: &[&str] = &[FIELD_ID, "Id_post"];

/// Annotation of a post in the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "B")]
    Bullying,
    #[serde(rename = "NB")]
    NotBullying,
}

impl Label {
    /// Short code stored in documents and matched by index queries.
    pub fn code(&self) -> &'static str {
        match self {
            Label::Bullying => "B",
            Label::NotBullying => "NB",
        }
    }

    /// Parses a stored label. Accepts the short codes and the spelled-out
    /// dataset forms in any case; anything else is unrecognized.
    pub fn parse(value: &str) -> Option<Label> {
        let folded: String = value
            .trim()
            .chars()
            .filter(|ch| ch.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "b" | "bullying" => Some(Label::Bullying),
            "nb" | "notbullying" => Some(Label::NotBullying),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Categorical sentiment derived from the compound valence score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled post produced by dataset ingestion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    pub id: String,
    pub text: String,
    pub label: Label,
    #[serde(rename = "type")]
    pub post_type: String,
    pub created_at: DateTime<Utc>,
}

impl RawPost {
    /// Stored document form of the post.
    pub fn to_record(&self) -> Record {
        Record::new(
            self.id.clone(),
            json!({
                FIELD_ID: self.id,
                FIELD_TEXT: self.text,
                FIELD_LABEL: self.label.code(),
                FIELD_TYPE: self.post_type,
                FIELD_CREATED_AT: self.created_at.to_rfc3339(),
            }),
        )
    }

    /// Reads a post back from a stored document.
    pub fn from_record(record: &Record) -> Result<RawPost> {
        let id = document_id(record)?;
        let text = record.str_field(TEXT_KEYS)?.unwrap_or_default().to_string();
        let label_text = record.str_field(LABEL_KEYS)?.unwrap_or_default();
        let label = Label::parse(label_text).ok_or_else(|| {
            Error::schema(format!("document {id} has unrecognized label '{label_text}'"))
        })?;
        let post_type = record.str_field(TYPE_KEYS)?.unwrap_or_default().to_string();
        let created_at = match record.str_field(&[FIELD_CREATED_AT])? {
            Some(raw) => parse_timestamp(raw).ok_or_else(|| {
                Error::schema(format!("document {id} has invalid created_at '{raw}'"))
            })?,
            None => Utc::now(),
        };
        Ok(RawPost {
            id,
            text,
            label,
            post_type,
            created_at,
        })
    }
}

/// The original text of a post and its normalized token string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    #[serde(rename = "original_text")]
    pub original: String,
    #[serde(rename = "preprocessed_text")]
    pub normalized: String,
}

/// Language, sentiment and toxicity computed for one post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub language: String,
    pub sentiment: Sentiment,
    pub polarity: f64,
    pub subjectivity: f64,
    pub vader_compound: f64,
    pub toxicity_score: f64,
    #[serde(rename = "nlp_processed_at")]
    pub processed_at: DateTime<Utc>,
}

/// RawPost ⊕ NormalizedText ⊕ EnrichmentResult.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPost {
    #[serde(flatten)]
    pub post: RawPost,
    #[serde(flatten)]
    pub text: NormalizedText,
    #[serde(flatten)]
    pub enrichment: EnrichmentResult,
}

/// Builds the partial update applied to a stored document after processing.
pub fn update_patch(text: &NormalizedText, enrichment: &EnrichmentResult) -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert(FIELD_ORIGINAL_TEXT.into(), json!(text.original));
    patch.insert(FIELD_PREPROCESSED_TEXT.into(), json!(text.normalized));
    patch.insert("language".into(), json!(enrichment.language));
    patch.insert("sentiment".into(), json!(enrichment.sentiment.as_str()));
    patch.insert("polarity".into(), json!(enrichment.polarity));
    patch.insert("subjectivity".into(), json!(enrichment.subjectivity));
    patch.insert("vader_compound".into(), json!(enrichment.vader_compound));
    patch.insert("toxicity_score".into(), json!(enrichment.toxicity_score));
    patch.insert(
        FIELD_PROCESSED_AT.into(),
        json!(enrichment.processed_at.to_rfc3339()),
    );
    patch
}

/// Identifier of a stored document: the record id, else the id field.
pub fn document_id(record: &Record) -> Result<String> {
    if let Some(id) = record.id.as_deref().filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }
    match record.field(ID_KEYS) {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(Error::schema("document has no identifier")),
    }
}

/// Parses RFC 3339 timestamps and the naive `YYYY-MM-DD HH:MM:SS` form
/// found in dataset exports.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| chrono::NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn label_parse_accepts_codes_and_dataset_spellings() {
        assert_eq!(Label::parse("B"), Some(Label::Bullying));
        assert_eq!(Label::parse(" bullying "), Some(Label::Bullying));
        assert_eq!(Label::parse("NB"), Some(Label::NotBullying));
        assert_eq!(Label::parse("Not-Bullying"), Some(Label::NotBullying));
        assert_eq!(Label::parse("Normal"), None);
        assert_eq!(Label::parse(""), None);
    }

    #[test]
    fn raw_post_round_trips_through_record() {
        let post = RawPost {
            id: "7".into(),
            text: "You are great".into(),
            label: Label::NotBullying,
            post_type: "none".into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 19, 30, 0).unwrap(),
        };
        let record = post.to_record();
        assert_eq!(record.payload[FIELD_LABEL], json!("NB"));
        assert_eq!(RawPost::from_record(&record).unwrap(), post);
    }

    #[test]
    fn document_id_falls_back_to_numeric_field() {
        let record = Record::new(None, json!({"Id_post": 12}));
        assert_eq!(document_id(&record).unwrap(), "12");
        let missing = Record::new(None, json!({"text": "x"}));
        assert!(document_id(&missing).is_err());
    }

    #[test]
    fn parse_timestamp_accepts_naive_exports() {
        let parsed = parse_timestamp("2024-05-02 21:15:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 2, 21, 15, 0).unwrap());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
