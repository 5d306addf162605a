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

//! # Lemmatizer
//!
//! Morphological lemmatizer in the style of WordNet's `morphy`: an exception
//! table for irregular forms, then suffix detachment rules per part of
//! speech. Without a full dictionary to validate candidates, detachment is
//! guarded by word shape (minimum length, a vowel in the stem, double
//! consonant and silent-e restoration).
//!
//! Every rule either maps to a base form from the exception tables or
//! strictly shortens the word, so re-applying the lemmatizer converges.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::text::tagger::{has_vowel, PartOfSpeech};

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("wolves", "wolf"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("selves", "self"),
    ("thieves", "thief"),
    ("data", "datum"),
    ("criteria", "criterion"),
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("went", "go"),
    ("gone", "go"),
    ("ran", "run"),
    ("saw", "see"),
    ("seen", "see"),
    ("said", "say"),
    ("made", "make"),
    ("took", "take"),
    ("taken", "take"),
    ("came", "come"),
    ("got", "get"),
    ("gotten", "get"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("told", "tell"),
    ("found", "find"),
    ("gave", "give"),
    ("given", "give"),
    ("felt", "feel"),
    ("left", "leave"),
    ("kept", "keep"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("wrote", "write"),
    ("written", "write"),
    ("lost", "lose"),
    ("paid", "pay"),
    ("met", "meet"),
    ("held", "hold"),
    ("stood", "stand"),
    ("heard", "hear"),
    ("meant", "mean"),
    ("began", "begin"),
    ("begun", "begin"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("fought", "fight"),
    ("hid", "hide"),
    ("hidden", "hide"),
    ("shot", "shoot"),
    ("sent", "send"),
    ("spent", "spend"),
    ("built", "build"),
    ("sat", "sit"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("broke", "break"),
    ("broken", "break"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("understood", "understand"),
    ("lying", "lie"),
    ("dying", "die"),
    ("tying", "tie"),
    ("beaten", "beat"),
    ("bitten", "bite"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("taught", "teach"),
    ("caught", "catch"),
    ("sold", "sell"),
    ("slept", "sleep"),
    ("stole", "steal"),
    ("stolen", "steal"),
];

const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("less", "little"),
    ("least", "little"),
];

/// Words with a plural-looking `s` that are already base forms.
const INVARIANT_S: &[&str] = &[
    "always", "perhaps", "sometimes", "towards", "afterwards", "besides",
    "whereas", "thus", "yes", "news", "series", "species", "bias", "alias",
    "atlas", "canvas", "lens", "christmas", "texas", "jesus",
];

/// Words ending in `ing` that are not progressive verb forms.
const NOT_PROGRESSIVE: &[&str] = &[
    "morning", "evening", "anything", "something", "nothing", "everything",
    "ceiling", "during", "pudding", "wedding", "sibling", "darling",
];

/// Words ending in `ed` that are not past forms.
const NOT_PAST: &[&str] = &[
    "hundred", "sacred", "naked", "wicked", "kindred", "rugged", "beloved",
    "shed", "bled",
];

fn table(entries: &'static [(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    entries.iter().copied().collect()
}

fn verb_table() -> &'static HashMap<&'static str, &'static str> {
    static VERBS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    VERBS.get_or_init(|| table(VERB_EXCEPTIONS))
}

/// Base form of an irregular verb form, if `word` is one.
pub fn verb_exception(word: &str) -> Option<&'static str> {
    verb_table().get(word).copied()
}

pub(crate) fn is_progressive_shape(word: &str) -> bool {
    word.len() > 4
        && word.ends_with("ing")
        && !NOT_PROGRESSIVE.contains(&word)
        && has_vowel(&word[..word.len() - 3])
}

pub(crate) fn is_past_shape(word: &str) -> bool {
    word.len() > 3
        && word.ends_with("ed")
        && !word.ends_with("eed")
        && !NOT_PAST.contains(&word)
        && has_vowel(&word[..word.len() - 2])
}

/// Morphological lemmatizer with per-part-of-speech rules.
#[derive(Clone, Debug)]
pub struct Lemmatizer {
    nouns: HashMap<&'static str, &'static str>,
    adjectives: HashMap<&'static str, &'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            nouns: table(NOUN_EXCEPTIONS),
            adjectives: table(ADJECTIVE_EXCEPTIONS),
        }
    }

    /// Lemmatizes one lowercase word for the given part of speech. Unknown
    /// shapes are returned unchanged.
    pub fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        if !word.is_ascii() {
            return word.to_string();
        }
        match pos {
            PartOfSpeech::Noun => self.noun(word),
            PartOfSpeech::Verb => verb(word),
            PartOfSpeech::Adjective => self.adjective(word),
            PartOfSpeech::Adverb => word.to_string(),
        }
    }

    fn noun(&self, word: &str) -> String {
        if let Some(base) = self.nouns.get(word) {
            return base.to_string();
        }
        strip_plural(word).unwrap_or_else(|| word.to_string())
    }

    fn adjective(&self, word: &str) -> String {
        if let Some(base) = self.adjectives.get(word) {
            return base.to_string();
        }
        let len = word.len();
        if len > 5 && word.ends_with("iest") {
            return format!("{}y", &word[..len - 4]);
        }
        if len > 5 && word.ends_with("est") {
            let stem = &word[..len - 3];
            if ends_with_double_consonant(stem) {
                return stem[..stem.len() - 1].to_string();
            }
        }
        word.to_string()
    }
}

fn strip_plural(word: &str) -> Option<String> {
    let len = word.len();
    if len <= 3
        || INVARIANT_S.contains(&word)
        || word.ends_with("ss")
        || word.ends_with("us")
        || word.ends_with("is")
        || !word.ends_with('s')
    {
        return None;
    }
    if word.ends_with("ies") {
        return Some(if len > 4 {
            format!("{}y", &word[..len - 3])
        } else {
            word[..len - 1].to_string()
        });
    }
    if ["xes", "ches", "shes", "sses", "zzes"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return Some(word[..len - 2].to_string());
    }
    Some(word[..len - 1].to_string())
}

fn verb(word: &str) -> String {
    if let Some(base) = verb_exception(word) {
        return base.to_string();
    }
    if word.len() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = strip_plural(word) {
        return stem;
    }
    if is_progressive_shape(word) {
        return restore(&word[..word.len() - 3]);
    }
    if is_past_shape(word) {
        let stem = &word[..word.len() - 2];
        if stem.ends_with('i') {
            return if stem.len() > 2 {
                format!("{}y", &stem[..stem.len() - 1])
            } else {
                format!("{stem}e")
            };
        }
        return restore(stem);
    }
    word.to_string()
}

fn is_consonant(ch: u8) -> bool {
    ch.is_ascii_alphabetic() && !matches!(ch, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn ends_with_double_consonant(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    n >= 2 && bytes[n - 1] == bytes[n - 2] && is_consonant(bytes[n - 1])
}

/// Undoes consonant doubling and restores a dropped silent `e` on a stem
/// left by removing `ing` or `ed`.
fn restore(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if ends_with_double_consonant(stem) && !matches!(bytes[n - 1], b'l' | b's' | b'z') {
        return stem[..n - 1].to_string();
    }
    let last = bytes[n - 1];
    let needs_e = match last {
        b'v' | b'c' => true,
        b'g' => stem.ends_with("dg"),
        b'z' => stem.ends_with("iz") || stem.ends_with("yz"),
        b's' => n <= 4 && n >= 2 && !is_consonant(bytes[n - 2]),
        _ => short_cvc(bytes),
    };
    if needs_e {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}

/// Consonant-vowel-consonant ending on a short stem (`mak`, `hop`, `smil`).
fn short_cvc(bytes: &[u8]) -> bool {
    let n = bytes.len();
    if n < 3 || n > 4 {
        return false;
    }
    let (c1, v, c2) = (bytes[n - 3], bytes[n - 2], bytes[n - 1]);
    let cvc = is_consonant(c1)
        && !is_consonant(v)
        && is_consonant(c2)
        && !matches!(c2, b'w' | b'x' | b'y');
    cvc && (n == 3 || is_consonant(bytes[0]))
}
