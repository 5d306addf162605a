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

//! Enrichment operators: `nlp.language`, `nlp.sentiment` and `nlp.toxicity`.

use std::sync::Arc;

use serde_json::{json, Number, Value};

use crate::enrich::{Enricher, SentimentScores};
use crate::errors::{Error, Result};
use crate::operator::Operator;
use crate::operators::field::{path_setting_or, FieldPath};
use crate::operators::text::{settings, text_at};
use crate::post::Label;
use crate::record::RecordBatch;
use crate::toolkit::NlpToolkit;

const DEFAULT_TEXT: &str = "payload.text";

fn number(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

#[derive(Debug)]
pub struct DetectLanguage {
    source: FieldPath,
    target: FieldPath,
    enricher: Enricher,
}

impl Operator for DetectLanguage {
    fn name(&self) -> &'static str {
        "nlp.language"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        for record in &mut batch {
            let text = text_at(&self.source, record)?.unwrap_or_default();
            let language = self.enricher.detect_language(text);
            self.target.set_value(record, Value::String(language))?;
        }
        Ok(batch)
    }
}

pub fn language_factory(
    config: &Value,
    toolkit: &Arc<NlpToolkit>,
) -> Result<Box<dyn Operator + Send + Sync>> {
    let obj = settings(config, "nlp.language")?;
    Ok(Box::new(DetectLanguage {
        source: path_setting_or(obj, "path", DEFAULT_TEXT)?,
        target: path_setting_or(obj, "target", "metadata.language")?,
        enricher: Enricher::new(Arc::clone(toolkit)),
    }))
}

/// Writes `{sentiment, polarity, subjectivity, compound}` at the target.
#[derive(Debug)]
pub struct AnalyzeSentiment {
    source: FieldPath,
    target: FieldPath,
    enricher: Enricher,
}

impl Operator for AnalyzeSentiment {
    fn name(&self) -> &'static str {
        "nlp.sentiment"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        for record in &mut batch {
            let text = text_at(&self.source, record)?.unwrap_or_default();
            let scores = self.enricher.analyze_sentiment(text);
            let value = json!({
                "sentiment": scores.sentiment.as_str(),
                "polarity": number(scores.polarity),
                "subjectivity": number(scores.subjectivity),
                "compound": number(scores.compound),
            });
            self.target.set_value(record, value)?;
        }
        Ok(batch)
    }
}

pub fn sentiment_factory(
    config: &Value,
    toolkit: &Arc<NlpToolkit>,
) -> Result<Box<dyn Operator + Send + Sync>> {
    let obj = settings(config, "nlp.sentiment")?;
    Ok(Box::new(AnalyzeSentiment {
        source: path_setting_or(obj, "path", DEFAULT_TEXT)?,
        target: path_setting_or(obj, "target", "metadata.sentiment")?,
        enricher: Enricher::new(Arc::clone(toolkit)),
    }))
}

/// Scores toxicity from the label, the compound sentiment and the text.
/// The compound is read from `compound` when present, otherwise computed.
#[derive(Debug)]
pub struct ScoreToxicity {
    source: FieldPath,
    label: FieldPath,
    compound: FieldPath,
    target: FieldPath,
    enricher: Enricher,
}

impl Operator for ScoreToxicity {
    fn name(&self) -> &'static str {
        "nlp.toxicity"
    }

    fn apply(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        for record in &mut batch {
            let text = text_at(&self.source, record)?.unwrap_or_default();
            let label = text_at(&self.label, record)?.and_then(Label::parse);
            let scores = match self.compound.resolve(record) {
                Some(Value::Number(compound)) => SentimentScores {
                    compound: compound.as_f64().unwrap_or_default(),
                    ..SentimentScores::neutral()
                },
                None | Some(Value::Null) => self.enricher.analyze_sentiment(text),
                Some(_) => {
                    return Err(Error::schema(format!(
                        "field '{}' must be a number",
                        self.compound
                    )))
                }
            };
            let score = self.enricher.toxicity_score(text, label, &scores);
            self.target.set_value(record, number(score))?;
        }
        Ok(batch)
    }
}

pub fn toxicity_factory(
    config: &Value,
    toolkit: &Arc<NlpToolkit>,
) -> Result<Box<dyn Operator + Send + Sync>> {
    let obj = settings(config, "nlp.toxicity")?;
    Ok(Box::new(ScoreToxicity {
        source: path_setting_or(obj, "path", DEFAULT_TEXT)?,
        label: path_setting_or(obj, "label", "payload.label")?,
        compound: path_setting_or(obj, "compound", "metadata.sentiment.compound")?,
        target: path_setting_or(obj, "target", "metadata.toxicity_score")?,
        enricher: Enricher::new(Arc::clone(toolkit)),
    }))
}
