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

//! # Enrichment Module
//!
//! Per-post analysis layered on top of the raw text:
//!
//! - **Language** ([language.rs](language/index.html)): two-classifier ISO
//!   639-1 detection
//! - **Sentiment** ([sentiment.rs](sentiment/index.html)): polarity,
//!   subjectivity and compound valence
//! - **Toxicity** ([toxicity.rs](toxicity/index.html)): composite score from
//!   label, sentiment and length
//!
//! ```rust
//! use std::sync::Arc;
//! use harcelement::enrich::Enricher;
//! use harcelement::post::{Label, Sentiment};
//! use harcelement::toolkit::NlpToolkit;
//!
//! let enricher = Enricher::new(Arc::new(NlpToolkit::new()));
//! let result = enricher.enrich("You are stupid and ugly, nobody likes you", Some(Label::Bullying));
//! assert_eq!(result.sentiment, Sentiment::Negative);
//! assert!(result.toxicity_score >= 0.9);
//! ```

pub mod language;
pub mod lexicon;
pub mod sentiment;
pub mod toxicity;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::post::{EnrichmentResult, Label};
use crate::toolkit::NlpToolkit;

pub use language::{LanguageClassifier, LanguageDetector, StopwordClassifier, TrigramClassifier, UNKNOWN_LANGUAGE};
pub use sentiment::{categorize, SentimentScores};
pub use toxicity::toxicity_score;

/// Computes language, sentiment and toxicity for raw post text.
#[derive(Debug, Clone)]
pub struct Enricher {
    toolkit: Arc<NlpToolkit>,
}

impl Enricher {
    pub fn new(toolkit: Arc<NlpToolkit>) -> Self {
        Self { toolkit }
    }

    pub fn toolkit(&self) -> &Arc<NlpToolkit> {
        &self.toolkit
    }

    /// ISO 639-1 code of `text`, or `"unknown"`.
    pub fn detect_language(&self, text: &str) -> String {
        self.toolkit.language.detect(text)
    }

    pub fn analyze_sentiment(&self, text: &str) -> SentimentScores {
        sentiment::analyze(&self.toolkit.polarity, &self.toolkit.valence, text)
    }

    pub fn toxicity_score(&self, text: &str, label: Option<Label>, sentiment: &SentimentScores) -> f64 {
        toxicity::toxicity_score(text, label, sentiment.compound)
    }

    /// Enriches a post stamped with the current time.
    pub fn enrich(&self, raw_text: &str, label: Option<Label>) -> EnrichmentResult {
        self.enrich_at(raw_text, label, Utc::now())
    }

    /// Enriches a post with an explicit processing timestamp.
    pub fn enrich_at(
        &self,
        raw_text: &str,
        label: Option<Label>,
        processed_at: DateTime<Utc>,
    ) -> EnrichmentResult {
        let sentiment = self.analyze_sentiment(raw_text);
        EnrichmentResult {
            language: self.detect_language(raw_text),
            sentiment: sentiment.sentiment,
            polarity: sentiment.polarity,
            subjectivity: sentiment.subjectivity,
            vader_compound: sentiment.compound,
            toxicity_score: self.toxicity_score(raw_text, label, &sentiment),
            processed_at,
        }
    }
}
