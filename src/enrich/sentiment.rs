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

//! # Sentiment Analysis
//!
//! Two independent lexicon analyzers run over the raw post text:
//!
//! - [`PolarityAnalyzer`] averages `(polarity, subjectivity)` pairs of the
//!   sentiment words it finds, adjusted by a preceding intensifier or negation.
//! - [`ValenceAnalyzer`] sums word valences with degree-adverb boosting, caps
//!   emphasis, negation within three tokens, the contrastive `but` rule and
//!   exclamation emphasis, then squashes the sum into a compound score in
//!   `[-1, 1]`.
//!
//! Only the compound score decides the [`Sentiment`] category.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enrich::lexicon::{
    BOOSTERS_DOWN, BOOSTERS_UP, NEGATIONS, POLARITY_INTENSIFIERS, POLARITY_LEXICON,
    VALENCE_LEXICON,
};
use crate::post::Sentiment;

/// Compound score at or above which a post is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.3;
/// Compound score at or below which a post is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.3;

const BOOST: f64 = 0.293;
const CAPS_BOOST: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_BOOST: f64 = 0.292;
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Sentiment scores for one text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct SentimentScores {
    pub sentiment: Sentiment,
    pub polarity: f64,
    pub subjectivity: f64,
    pub compound: f64,
}

impl SentimentScores {
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Maps a compound score to its category.
pub fn categorize(compound: f64) -> Sentiment {
    if compound >= POSITIVE_THRESHOLD {
        Sentiment::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

fn lookup_key(token: &str) -> String {
    token
        .trim_matches(|ch: char| !ch.is_alphanumeric() && ch != '\'')
        .to_lowercase()
}

#[derive(Clone, Debug)]
pub struct PolarityAnalyzer {
    lexicon: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for PolarityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: POLARITY_LEXICON
                .iter()
                .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
                .collect(),
            intensifiers: POLARITY_INTENSIFIERS.iter().copied().collect(),
        }
    }

    /// Returns `(polarity, subjectivity)`; `(0.0, 0.0)` when the text has no
    /// sentiment words.
    pub fn analyze(&self, text: &str) -> (f64, f64) {
        let tokens: Vec<String> = text.split_whitespace().map(lookup_key).collect();
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut hits = 0usize;

        for (index, token) in tokens.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = self.lexicon.get(token.as_str()) else {
                continue;
            };
            let previous = index.checked_sub(1).map(|i| tokens[i].as_str());
            if let Some(multiplier) = previous.and_then(|word| self.intensifiers.get(word)) {
                polarity *= multiplier;
                subjectivity *= multiplier;
            }
            let negated = tokens[index.saturating_sub(2)..index]
                .iter()
                .any(|word| NEGATIONS.contains(&word.as_str()));
            if negated {
                polarity *= -0.5;
            }
            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += subjectivity.clamp(0.0, 1.0);
            hits += 1;
        }

        if hits == 0 {
            return (0.0, 0.0);
        }
        (
            (polarity_sum / hits as f64).clamp(-1.0, 1.0),
            (subjectivity_sum / hits as f64).clamp(0.0, 1.0),
        )
    }
}

#[derive(Clone, Debug)]
pub struct ValenceAnalyzer {
    lexicon: HashMap<&'static str, f64>,
}

impl Default for ValenceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

struct Token {
    key: String,
    shouting: bool,
}

impl ValenceAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: VALENCE_LEXICON.iter().copied().collect(),
        }
    }

    /// Compound valence in `[-1, 1]`, rounded to four decimals.
    pub fn compound(&self, text: &str) -> f64 {
        let tokens: Vec<Token> = text
            .split_whitespace()
            .map(|raw| Token {
                key: lookup_key(raw),
                shouting: is_shouting(raw),
            })
            .filter(|token| !token.key.is_empty())
            .collect();
        if tokens.is_empty() {
            return 0.0;
        }

        let shouting_words = tokens.iter().filter(|token| token.shouting).count();
        let caps_differential = shouting_words > 0 && shouting_words < tokens.len();

        let mut valences: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(index, token)| self.token_valence(&tokens, index, token, caps_differential))
            .collect();

        if let Some(pivot) = tokens.iter().position(|token| token.key == "but") {
            for (index, valence) in valences.iter_mut().enumerate() {
                if index < pivot {
                    *valence *= 0.5;
                } else if index > pivot {
                    *valence *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        if sum != 0.0 {
            let exclamations = text.chars().filter(|ch| *ch == '!').count().min(4);
            let emphasis = exclamations as f64 * EXCLAMATION_BOOST;
            sum += emphasis.copysign(sum);
        }

        let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);
        (compound * 10_000.0).round() / 10_000.0
    }

    fn token_valence(
        &self,
        tokens: &[Token],
        index: usize,
        token: &Token,
        caps_differential: bool,
    ) -> f64 {
        let Some(&base) = self.lexicon.get(token.key.as_str()) else {
            return 0.0;
        };
        let mut valence = base;
        if caps_differential && token.shouting {
            valence += CAPS_BOOST.copysign(valence);
        }

        for distance in 1..=3 {
            let Some(previous) = index.checked_sub(distance).map(|i| &tokens[i]) else {
                break;
            };
            let mut scalar = if BOOSTERS_UP.contains(&previous.key.as_str()) {
                BOOST
            } else if BOOSTERS_DOWN.contains(&previous.key.as_str()) {
                -BOOST
            } else {
                continue;
            };
            if valence < 0.0 {
                scalar = -scalar;
            }
            if caps_differential && previous.shouting {
                scalar += CAPS_BOOST.copysign(scalar);
            }
            scalar *= match distance {
                1 => 1.0,
                2 => 0.95,
                _ => 0.9,
            };
            valence += scalar;
        }

        let negated = tokens[index.saturating_sub(3)..index]
            .iter()
            .any(|previous| NEGATIONS.contains(&previous.key.as_str()));
        if negated {
            valence *= NEGATION_SCALAR;
        }
        valence
    }
}

fn is_shouting(raw: &str) -> bool {
    let letters: Vec<char> = raw.chars().filter(|ch| ch.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|ch| ch.is_uppercase())
}

/// Runs both analyzers. Empty or whitespace-only text is neutral with zero
/// scores.
pub fn analyze(polarity: &PolarityAnalyzer, valence: &ValenceAnalyzer, text: &str) -> SentimentScores {
    if text.trim().is_empty() {
        return SentimentScores::neutral();
    }
    let (polarity, subjectivity) = polarity.analyze(text);
    let compound = valence.compound(text);
    SentimentScores {
        sentiment: categorize(compound),
        polarity,
        subjectivity,
        compound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(text: &str) -> SentimentScores {
        analyze(&PolarityAnalyzer::new(), &ValenceAnalyzer::new(), text)
    }

    #[test]
    fn empty_text_is_neutral() {
        assert_eq!(scores(""), SentimentScores::neutral());
        assert_eq!(scores("   "), SentimentScores::neutral());
    }

    #[test]
    fn abusive_text_is_negative() {
        let result = scores("I hate you, you are stupid and ugly");
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert!(result.compound <= NEGATIVE_THRESHOLD);
        assert!(result.polarity < 0.0);
        assert!(result.subjectivity > 0.0);
    }

    #[test]
    fn warm_text_is_positive() {
        let result = scores("I love this amazing community");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!(result.polarity > 0.0);
    }

    #[test]
    fn negation_flips_valence() {
        let analyzer = ValenceAnalyzer::new();
        assert!(analyzer.compound("this is good") > 0.0);
        assert!(analyzer.compound("this is not good") < 0.0);
    }

    #[test]
    fn boosters_and_caps_increase_intensity() {
        let analyzer = ValenceAnalyzer::new();
        let plain = analyzer.compound("you are bad");
        let boosted = analyzer.compound("you are very bad");
        let shouted = analyzer.compound("you are BAD");
        assert!(boosted < plain);
        assert!(shouted < plain);
    }

    #[test]
    fn contrast_weights_the_second_clause() {
        let analyzer = ValenceAnalyzer::new();
        assert!(analyzer.compound("the food was good but the service was terrible") < 0.0);
    }

    #[test]
    fn compound_thresholds() {
        assert_eq!(categorize(0.3), Sentiment::Positive);
        assert_eq!(categorize(-0.3), Sentiment::Negative);
        assert_eq!(categorize(0.29), Sentiment::Neutral);
        assert_eq!(categorize(-0.29), Sentiment::Neutral);
    }

    #[test]
    fn text_without_sentiment_words_scores_zero() {
        let result = scores("the table is in the kitchen");
        assert_eq!(result.compound, 0.0);
        assert_eq!(result.polarity, 0.0);
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }
}
