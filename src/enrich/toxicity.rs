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

//! # Toxicity Score
//!
//! Composite score in `[0, 1]`:
//!
//! | component                               | weight |
//! |-----------------------------------------|--------|
//! | label `B`                               | 0.7    |
//! | label `NB` or unrecognized              | 0.1    |
//! | compound < -0.5                         | 0.2    |
//! | -0.5 <= compound < -0.2                 | 0.1    |
//! | more than 10 whitespace-separated words | 0.1    |
//!
//! Components are summed in tenths so that the maximum is exactly `1.0`.

use crate::post::Label;

/// Word count above which a post earns the length component.
pub const LONG_POST_WORDS: usize = 10;

fn label_tenths(label: Option<Label>) -> u32 {
    match label {
        Some(Label::Bullying) => 7,
        Some(Label::NotBullying) | None => 1,
    }
}

fn sentiment_tenths(compound: f64) -> u32 {
    if compound < -0.5 {
        2
    } else if compound < -0.2 {
        1
    } else {
        0
    }
}

fn length_tenths(text: &str) -> u32 {
    u32::from(text.split_whitespace().count() > LONG_POST_WORDS)
}

/// Scores a post from its label, compound sentiment and raw text.
pub fn toxicity_score(text: &str, label: Option<Label>, compound: f64) -> f64 {
    let tenths = label_tenths(label) + sentiment_tenths(compound) + length_tenths(text);
    (f64::from(tenths) / 10.0).min(1.0)
}

/// Same as [`toxicity_score`] with the label given as stored text.
pub fn toxicity_score_for(text: &str, label: &str, compound: f64) -> f64 {
    toxicity_score(text, Label::parse(label), compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximum_is_exactly_one() {
        let text = "word ".repeat(11);
        assert_eq!(toxicity_score(&text, Some(Label::Bullying), -0.6), 1.0);
    }

    #[test]
    fn short_neutral_not_bullying_scores_base() {
        assert_eq!(toxicity_score("short", Some(Label::NotBullying), 0.0), 0.1);
        assert_eq!(toxicity_score_for("short", "Not-Bullying", 0.0), 0.1);
    }

    #[test]
    fn unrecognized_label_scores_like_not_bullying() {
        assert_eq!(
            toxicity_score_for("short", "maybe", -0.3),
            toxicity_score("short", Some(Label::NotBullying), -0.3)
        );
        assert_eq!(toxicity_score_for("short", "", 0.0), 0.1);
    }

    #[test]
    fn sentiment_bands() {
        assert_eq!(toxicity_score("x", Some(Label::NotBullying), -0.51), 0.3);
        assert_eq!(toxicity_score("x", Some(Label::NotBullying), -0.5), 0.2);
        assert_eq!(toxicity_score("x", Some(Label::NotBullying), -0.2), 0.1);
        assert_eq!(toxicity_score("x", Some(Label::Bullying), -0.21), 0.8);
    }

    #[test]
    fn exactly_ten_words_is_not_long() {
        let text = "word ".repeat(10);
        assert_eq!(toxicity_score(&text, Some(Label::Bullying), 0.0), 0.7);
    }
}
