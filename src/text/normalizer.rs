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

//! # Text Normalizer
//!
//! Deterministic cleaning and lemmatization of raw post text. Stages run in
//! a fixed order:
//!
//! 1. empty guard
//! 2. lowercase
//! 3. HTML tag removal (Windows paths pass through untouched)
//! 4. URL removal
//! 5. special characters to spaces, whitespace collapsed
//! 6. digits and ASCII punctuation removed
//! 7. tokenization
//! 8. English stopword removal
//! 9. part-of-speech driven lemmatization
//! 10. single-character tokens dropped
//! 11. tokens joined with single spaces
//!
//! Each stage is also exposed on its own for the operator pipeline.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use scraper::Html;
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::post::NormalizedText;
use crate::record::json_kind;
use crate::text::tagger::PartOfSpeech;
use crate::toolkit::NlpToolkit;

/// Upper bound on re-lemmatization rounds while a lemma settles.
const MAX_SETTLE_ROUNDS: usize = 8;

fn windows_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z]:[\\/].*").expect("valid windows path regex"))
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+")
            .expect("valid url regex")
    })
}

fn special_char_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^\w\s.!?,;:]").expect("valid special character regex"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn digit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("valid digit regex"))
}

/// Returns the visible text of an HTML fragment. Text that looks like a
/// Windows path (`C:\...`) is returned unchanged.
pub fn clean_html(text: &str) -> String {
    if windows_path_pattern().is_match(text) {
        return text.to_string();
    }
    let fragment = Html::parse_fragment(text);
    fragment.root_element().text().collect()
}

pub fn clean_urls(text: &str) -> String {
    url_pattern().replace_all(text, "").into_owned()
}

/// Replaces every character outside word characters, whitespace and
/// `. ! ? , ; :` with a space, then collapses and trims whitespace.
pub fn clean_special_chars(text: &str) -> String {
    let spaced = special_char_pattern().replace_all(text, " ");
    whitespace_pattern()
        .replace_all(&spaced, " ")
        .trim()
        .to_string()
}

pub fn remove_punctuation_and_digits(text: &str) -> String {
    digit_pattern()
        .replace_all(text, "")
        .chars()
        .filter(|ch| !ch.is_ascii_punctuation())
        .collect()
}

/// Splits text into word tokens, line by line.
pub fn tokenize(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}

/// Reads a JSON value as a token sequence.
///
/// Anything other than an array of strings violates the input contract of
/// the token stages.
pub fn token_sequence(value: &Value, stage: &str) -> Result<Vec<String>> {
    let items = value.as_array().ok_or_else(|| {
        Error::input_contract(
            stage,
            format!("input should be a list of tokens, found {}", json_kind(value)),
        )
    })?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                Error::input_contract(
                    stage,
                    format!("input should be a list of tokens, found {} element", json_kind(item)),
                )
            })
        })
        .collect()
}

/// Stages 1 to 6: everything up to tokenization.
pub fn clean_text(raw_text: &str) -> String {
    if raw_text.is_empty() {
        return String::new();
    }
    let text = raw_text.to_lowercase();
    let text = clean_html(&text);
    let text = clean_urls(&text);
    let text = clean_special_chars(&text);
    remove_punctuation_and_digits(&text)
}

/// Stage 10: keeps tokens longer than one character.
pub fn drop_short_tokens(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|token| token.chars().count() > 1)
        .collect()
}

/// Runs the normalization stages with a shared [`NlpToolkit`].
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    toolkit: Arc<NlpToolkit>,
}

impl TextNormalizer {
    pub fn new(toolkit: Arc<NlpToolkit>) -> Self {
        Self { toolkit }
    }

    pub fn toolkit(&self) -> &Arc<NlpToolkit> {
        &self.toolkit
    }

    /// Normalizes raw post text into a space-separated lemma string.
    pub fn normalize(&self, raw_text: &str) -> String {
        if raw_text.is_empty() {
            return String::new();
        }
        let tokens = tokenize(&clean_text(raw_text));
        let tokens = self.remove_stopwords(&tokens);
        drop_short_tokens(self.lemmatize_tokens(&tokens)).join(" ")
    }

    /// Normalizes `raw_text` and keeps the original alongside.
    pub fn normalize_post(&self, raw_text: &str) -> NormalizedText {
        NormalizedText {
            original: raw_text.to_string(),
            normalized: self.normalize(raw_text),
        }
    }

    pub fn remove_stopwords(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|token| !self.toolkit.stopwords.contains(token))
            .cloned()
            .collect()
    }

    /// Lemmatizes tokens by their tagged part of speech. When the tagger is
    /// unavailable every token is lemmatized as a noun.
    pub fn lemmatize_tokens(&self, tokens: &[String]) -> Vec<String> {
        match self.toolkit.tagger.tag(tokens) {
            Ok(tags) => tokens
                .iter()
                .zip(tags)
                .map(|(token, tag)| self.settle(token, PartOfSpeech::from_treebank(tag), true))
                .collect(),
            Err(err) => {
                log::debug!("falling back to untagged lemmatization: {err}");
                tokens
                    .iter()
                    .map(|token| self.settle(token, PartOfSpeech::Noun, false))
                    .collect()
            }
        }
    }

    /// Lemmatizes `token`, then keeps re-lemmatizing the result under its
    /// own tag until it stops changing. A lemma that lands on a stopword is
    /// discarded in favor of the token.
    ///
    /// This goes further than a single lemmatization: "buildings" tags as a
    /// noun and yields "building", which tags as a verb on its own and
    /// settles on "build". Stopping at the first lemma would break
    /// `normalize(normalize(x)) == normalize(x)`, since a second pass tags
    /// "building" in isolation. Stopping when the part of speech changes
    /// has the same problem.
    fn settle(&self, token: &str, pos: PartOfSpeech, tagged: bool) -> String {
        let lemmatizer = &self.toolkit.lemmatizer;
        let mut current = lemmatizer.lemmatize(token, pos);
        for _ in 0..MAX_SETTLE_ROUNDS {
            if current == token {
                break;
            }
            let pos = if tagged { self.tag_one(&current) } else { PartOfSpeech::Noun };
            let next = lemmatizer.lemmatize(&current, pos);
            if next == current {
                break;
            }
            current = next;
        }
        if self.toolkit.stopwords.contains(&current) {
            token.to_string()
        } else {
            current
        }
    }

    fn tag_one(&self, word: &str) -> PartOfSpeech {
        self.toolkit
            .tagger
            .tag(&[word.to_string()])
            .ok()
            .and_then(|tags| tags.first().copied())
            .map(PartOfSpeech::from_treebank)
            .unwrap_or(PartOfSpeech::Noun)
    }
}
