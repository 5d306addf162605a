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

//! # Analysis Summary
//!
//! Aggregate figures over stored documents after enrichment. Fields missing
//! from a document are left out of the corresponding figure.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::record::Record;

#[derive(Debug, Serialize, Default, Clone, PartialEq, Eq)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub total_documents: usize,
    /// Mean of the numeric `toxicity_score` fields, rounded to 3 decimals.
    pub average_toxicity_score: f64,
    pub sentiment_distribution: SentimentDistribution,
    pub language_distribution: BTreeMap<String, usize>,
}

impl AnalysisSummary {
    /// Summarizes `records`; `None` when there are no documents.
    pub fn compute(records: &[Record]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut summary = AnalysisSummary {
            total_documents: records.len(),
            ..Default::default()
        };
        let mut toxicity_total = 0.0f64;
        let mut toxicity_count = 0usize;

        for record in records {
            let Some(fields) = record.payload.as_object() else {
                continue;
            };

            if let Some(score) = fields.get("toxicity_score").and_then(Value::as_f64) {
                toxicity_total += score;
                toxicity_count += 1;
            }

            match fields.get("sentiment").and_then(Value::as_str) {
                Some("positive") => summary.sentiment_distribution.positive += 1,
                Some("negative") => summary.sentiment_distribution.negative += 1,
                Some("neutral") => summary.sentiment_distribution.neutral += 1,
                _ => {}
            }

            if let Some(language) = fields.get("language").and_then(Value::as_str) {
                *summary
                    .language_distribution
                    .entry(language.to_string())
                    .or_insert(0) += 1;
            }
        }

        if toxicity_count > 0 {
            let mean = toxicity_total / toxicity_count as f64;
            summary.average_toxicity_score = (mean * 1000.0).round() / 1000.0;
        }
        Some(summary)
    }
}
