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

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use harcelement::enrich::language::LanguageError;
use harcelement::enrich::toxicity::toxicity_score_for;
use harcelement::enrich::{toxicity_score, LanguageClassifier, UNKNOWN_LANGUAGE};
use harcelement::{Enricher, Label, NlpToolkit, Sentiment, SentimentScores};
use proptest::prelude::*;

fn enricher() -> Enricher {
    Enricher::new(Arc::new(NlpToolkit::new()))
}

#[derive(Debug)]
struct Always(&'static str);

impl LanguageClassifier for Always {
    fn name(&self) -> &'static str {
        "always"
    }

    fn classify(&self, _text: &str) -> Result<&'static str, LanguageError> {
        Ok(self.0)
    }
}

#[test]
fn too_short_text_has_unknown_language() {
    let enricher = enricher();
    assert_eq!(enricher.detect_language(""), UNKNOWN_LANGUAGE);
    assert_eq!(enricher.detect_language("ab"), "unknown");
}

#[test]
fn english_post_is_detected() {
    assert_eq!(enricher().detect_language("I hate you so much, you are the worst"), "en");
}

#[test]
fn disagreeing_classifiers_keep_the_second_answer() {
    let toolkit = NlpToolkit::new()
        .with_language_classifiers(Box::new(Always("fr")), Box::new(Always("it")));
    let enricher = Enricher::new(Arc::new(toolkit));
    assert_eq!(enricher.detect_language("bonjour a tous"), "it");
}

#[test]
fn empty_text_sentiment_is_neutral_with_zero_scores() {
    let scores = enricher().analyze_sentiment("");
    assert_eq!(scores.sentiment, Sentiment::Neutral);
    assert_eq!(scores.polarity, 0.0);
    assert_eq!(scores.subjectivity, 0.0);
    assert_eq!(scores.compound, 0.0);
}

#[test]
fn sentiment_follows_compound_thresholds() {
    let enricher = enricher();
    let positive = enricher.analyze_sentiment("I love this, it is wonderful and great");
    assert_eq!(positive.sentiment, Sentiment::Positive);
    assert!(positive.compound >= 0.3);
    assert!(positive.polarity > 0.0);

    let negative = enricher.analyze_sentiment("You are so stupid and ugly");
    assert_eq!(negative.sentiment, Sentiment::Negative);
    assert!(negative.compound <= -0.3);
}

#[test]
fn toxicity_reference_values() {
    let long = "word ".repeat(11);
    assert_eq!(toxicity_score(&long, Some(Label::Bullying), -0.6), 1.0);
    assert_eq!(toxicity_score("short", Some(Label::NotBullying), 0.0), 0.1);
    assert_eq!(toxicity_score("short", Some(Label::Bullying), -0.3), 0.8);
    assert_eq!(toxicity_score_for("short", "??", 0.0), 0.1);
    assert_eq!(toxicity_score_for(&long, "NB", -0.21), 0.3);
}

#[test]
fn enricher_toxicity_uses_compound() {
    let scores = SentimentScores {
        compound: -0.9,
        ..SentimentScores::neutral()
    };
    assert_eq!(enricher().toxicity_score("hi", Some(Label::Bullying), &scores), 0.9);
}

#[test]
fn enrich_at_is_deterministic() {
    let enricher = enricher();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let text = "<b>You are so stupid and ugly</b>";
    let first = enricher.enrich_at(text, Some(Label::Bullying), at);
    let second = enricher.enrich_at(text, Some(Label::Bullying), at);
    assert_eq!(first, second);
    assert_eq!(first.processed_at, at);
    assert_eq!(first.sentiment, Sentiment::Negative);
    assert!(first.toxicity_score >= 0.8);
}

proptest! {
    #[test]
    fn toxicity_stays_in_unit_interval(
        words in 0usize..30,
        label in "(B|NB|b|nb|[A-Z]{0,3})",
        compound in -1.0f64..=1.0,
    ) {
        let text = "w ".repeat(words);
        let score = toxicity_score_for(&text, &label, compound);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn unrecognized_labels_score_like_not_bullying(
        label in "[C-Z]{1,4}",
        compound in -1.0f64..=1.0,
    ) {
        prop_assert_eq!(
            toxicity_score_for("some text", &label, compound),
            toxicity_score_for("some text", "NB", compound)
        );
    }
}
