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

//! # Part-of-Speech Tagging
//!
//! Taggers emit Penn Treebank tags (`NN`, `NNS`, `VBD`, `VBG`, `JJ`, `JJS`,
//! `RB`, ...). The lemmatizer only looks at the first letter of a tag, see
//! [`PartOfSpeech::from_treebank`].

use thiserror::Error;

use crate::text::lemmatizer::{is_past_shape, is_progressive_shape, verb_exception};

/// Coarse word class used to pick lemmatization rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Maps a treebank tag by prefix: `J` adjective, `V` verb, `N` noun,
    /// `R` adverb; anything else is treated as a noun.
    pub fn from_treebank(tag: &str) -> Self {
        match tag.chars().next() {
            Some('J') => PartOfSpeech::Adjective,
            Some('V') => PartOfSpeech::Verb,
            Some('R') => PartOfSpeech::Adverb,
            _ => PartOfSpeech::Noun,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The tagger has no model to work with.
    #[error("pos tagger unavailable: {0}")]
    Unavailable(String),
}

/// Assigns one treebank tag per token.
pub trait PosTagger: std::fmt::Debug {
    fn tag(&self, tokens: &[String]) -> Result<Vec<&'static str>, TagError>;
}

/// Rule-based tagger driven by word shape and small closed word lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuffixTagger;

const ADJECTIVES: &[&str] = &[
    "bad", "big", "good", "great", "new", "old", "high", "low", "small", "large",
    "long", "short", "young", "real", "sure", "free", "full", "true", "fake",
    "dumb", "fat", "ugly", "nice", "happy", "sad", "mad", "stupid", "dead", "sick",
    "poor", "rich", "black", "white", "gay", "weird", "cool", "hot", "cute",
    "pretty", "lazy", "crazy", "dirty", "nasty", "funny", "silly", "angry",
    "better", "best", "worse", "worst", "little", "least", "less",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ish", "ical", "ary", "ic",
];

const BASE_VERBS: &[&str] = &[
    "go", "get", "make", "know", "think", "take", "see", "come", "want", "look",
    "use", "find", "give", "tell", "work", "call", "try", "ask", "need", "feel",
    "leave", "put", "mean", "keep", "let", "begin", "seem", "help", "talk", "turn",
    "start", "show", "hear", "play", "run", "move", "like", "live", "believe",
    "hold", "bring", "write", "stand", "lose", "pay", "meet", "kill", "hate",
    "love", "hurt", "die", "shut", "stop", "say", "fight", "hit", "eat", "cry",
];

impl SuffixTagger {
    pub fn new() -> Self {
        SuffixTagger
    }

    fn tag_word(word: &str) -> &'static str {
        let lower = word.to_lowercase();
        let word = lower.as_str();
        let len = word.chars().count();

        if verb_exception(word).is_some() {
            return "VBD";
        }
        if BASE_VERBS.contains(&word) {
            return "VB";
        }
        if ADJECTIVES.contains(&word) {
            return "JJ";
        }
        if len > 4 && word.ends_with("ly") {
            return "RB";
        }
        if is_progressive_shape(word) {
            return "VBG";
        }
        if is_past_shape(word) {
            return "VBD";
        }
        if len > 5 && (word.ends_with("iest") || is_doubled_superlative(word)) {
            return "JJS";
        }
        if len > 3
            && ADJECTIVE_SUFFIXES
                .iter()
                .any(|suffix| word.ends_with(suffix) && len > suffix.len() + 1)
        {
            return "JJ";
        }
        if len > 3
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return "NNS";
        }
        "NN"
    }
}

impl PosTagger for SuffixTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<&'static str>, TagError> {
        Ok(tokens.iter().map(|token| Self::tag_word(token)).collect())
    }
}

/// Tagger that is never available; selected when tagging is switched off in
/// configuration so the normalizer takes its untagged path.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTagger;

impl PosTagger for DisabledTagger {
    fn tag(&self, _tokens: &[String]) -> Result<Vec<&'static str>, TagError> {
        Err(TagError::Unavailable("tagging disabled".into()))
    }
}

fn is_doubled_superlative(word: &str) -> bool {
    let bytes = word.as_bytes();
    let n = bytes.len();
    word.is_ascii() && word.ends_with("est") && n > 5 && bytes[n - 4] == bytes[n - 5] && !has_vowel(&word[n - 4..n - 3])
}

pub(crate) fn has_vowel(stem: &str) -> bool {
    stem.chars().any(|ch| matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y'))
}
