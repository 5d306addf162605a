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

//! # Language Detection
//!
//! [`LanguageDetector`] asks two independent classifiers for an ISO 639-1
//! code. When they agree that code wins; when they disagree the second
//! classifier's answer is kept. Short input and classifier failures yield
//! [`UNKNOWN_LANGUAGE`].

use std::collections::HashMap;
use std::fmt::Debug;

use thiserror::Error;

/// Code reported when no language can be determined.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Trimmed texts shorter than this many characters are not classified.
pub const MIN_DETECTABLE_CHARS: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LanguageError {
    #[error("text has no alphabetic characters")]
    NoFeatures,
}

/// A single language classifier.
pub trait LanguageClassifier: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, text: &str) -> Result<&'static str, LanguageError>;
}

#[derive(Default, Clone, Copy)]
struct ScriptCounts {
    latin: usize,
    cjk: usize,
    arabic: usize,
    cyrillic: usize,
    devanagari: usize,
    total: usize,
}

impl ScriptCounts {
    fn of(text: &str) -> Self {
        let mut counts = ScriptCounts::default();
        for ch in text.chars().filter(|ch| ch.is_alphabetic()) {
            counts.total += 1;
            let code = ch as u32;
            if code <= 0x024F {
                counts.latin += 1;
            } else if (0x4E00..=0x9FFF).contains(&code)
                || (0x3400..=0x4DBF).contains(&code)
                || (0xF900..=0xFAFF).contains(&code)
            {
                counts.cjk += 1;
            } else if (0x0600..=0x06FF).contains(&code)
                || (0x0750..=0x077F).contains(&code)
                || (0x08A0..=0x08FF).contains(&code)
            {
                counts.arabic += 1;
            } else if (0x0400..=0x052F).contains(&code) {
                counts.cyrillic += 1;
            } else if (0x0900..=0x097F).contains(&code) {
                counts.devanagari += 1;
            }
        }
        counts
    }

    fn share(&self, value: usize) -> f64 {
        value as f64 / self.total.max(1) as f64
    }

    /// Language implied by a dominant non-Latin script.
    fn dominant_iso(&self) -> Option<&'static str> {
        [
            (self.cjk, "zh"),
            (self.arabic, "ar"),
            (self.cyrillic, "ru"),
            (self.devanagari, "hi"),
        ]
        .into_iter()
        .filter(|(count, _)| *count > self.latin && *count > 0)
        .max_by_key(|(count, _)| *count)
        .map(|(_, iso)| iso)
    }
}

struct LanguageProfile {
    iso: &'static str,
    trigrams: &'static [(&'static str, f64)],
    script_weight: fn(&ScriptCounts) -> f64,
}

fn latin(scores: &ScriptCounts) -> f64 {
    scores.share(scores.latin)
}

static PROFILES: &[LanguageProfile] = &[
    LanguageProfile {
        iso: "en",
        trigrams: &[
            (" th", 1.0), ("the", 1.0), ("he ", 1.0), ("and", 1.0), ("ing", 1.0),
            ("ion", 0.8), (" yo", 1.0), ("you", 1.0), ("ou ", 0.8), ("is ", 0.8),
        ],
        script_weight: latin,
    },
    LanguageProfile {
        iso: "fr",
        trigrams: &[
            (" de", 0.8), ("les", 1.0), (" le", 1.0), ("ent", 0.8), (" la", 0.8),
            ("que", 0.8), (" et", 1.0), ("ous", 1.0), ("est", 0.8), ("ais", 1.0),
        ],
        script_weight: latin,
    },
    LanguageProfile {
        iso: "es",
        trigrams: &[
            (" de", 0.8), ("que", 0.8), (" el", 1.0), ("los", 1.0), ("las", 1.0),
            ("ión", 1.0), ("os ", 0.8), (" es", 0.8), ("ero", 1.0), (" y ", 1.0),
        ],
        script_weight: latin,
    },
    LanguageProfile {
        iso: "de",
        trigrams: &[
            ("ich", 1.0), ("der", 1.0), ("die", 1.0), ("und", 1.0), ("ein", 1.0),
            ("sch", 1.0), ("cht", 1.0), ("en ", 0.8), (" ge", 1.0), ("ist", 0.8),
        ],
        script_weight: latin,
    },
    LanguageProfile {
        iso: "it",
        trigrams: &[
            (" di", 1.0), ("che", 1.0), ("ell", 1.0), ("il ", 1.0), ("per", 0.8),
            ("ato", 1.0), ("zio", 1.0), ("no ", 0.8), ("to ", 0.8), (" un", 0.8),
        ],
        script_weight: latin,
    },
    LanguageProfile {
        iso: "pt",
        trigrams: &[
            (" de", 0.8), ("que", 0.8), ("ção", 1.0), ("os ", 0.8), ("do ", 1.0),
            ("da ", 1.0), ("ão ", 1.0), ("não", 1.0), (" um", 1.0), ("com", 0.8),
        ],
        script_weight: latin,
    },
    LanguageProfile {
        iso: "nl",
        trigrams: &[
            (" de", 0.8), ("het", 1.0), ("een", 1.0), ("van", 1.0), ("ij ", 1.0),
            ("aar", 1.0), ("oor", 1.0), ("ijk", 1.0), (" ik", 1.0), ("jij", 1.0),
        ],
        script_weight: latin,
    },
    LanguageProfile {
        iso: "ru",
        trigrams: &[
            ("ост", 1.0), ("ени", 1.0), ("ого", 1.0), ("ать", 1.0), ("ове", 1.0),
            (" пр", 1.0),
        ],
        script_weight: |scores| scores.share(scores.cyrillic),
    },
    LanguageProfile {
        iso: "ar",
        trigrams: &[(" ال", 1.1), ("من ", 1.1), ("في ", 1.1), ("على", 1.1), ("لا ", 1.1)],
        script_weight: |scores| scores.share(scores.arabic),
    },
    LanguageProfile {
        iso: "zh",
        trigrams: &[("的", 1.2), ("是", 1.2), ("在", 1.2), ("人", 1.2), ("和", 1.2), ("有", 1.2)],
        script_weight: |scores| scores.share(scores.cjk),
    },
    LanguageProfile {
        iso: "hi",
        trigrams: &[(" के", 1.1), ("में", 1.1), ("और", 1.1), ("है ", 1.1), ("से ", 1.1)],
        script_weight: |scores| scores.share(scores.devanagari),
    },
];

struct ScoreBoard {
    entries: Vec<(&'static str, f64, f64)>,
}

impl ScoreBoard {
    /// Highest combined score wins. Latin text with no trigram evidence at
    /// all is reported as English.
    fn best_iso(&self, scripts: &ScriptCounts) -> &'static str {
        let evidence: f64 = self.entries.iter().map(|(_, trigram, _)| trigram).sum();
        if evidence == 0.0 {
            return scripts.dominant_iso().unwrap_or("en");
        }
        let mut best_iso = "en";
        let mut best_score = f64::MIN;
        for (iso, trigram, script) in &self.entries {
            let score = trigram + script * 0.8;
            if score > best_score {
                best_score = score;
                best_iso = *iso;
            }
        }
        best_iso
    }
}

/// Character trigram profiles weighted by the dominant script.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrigramClassifier;

impl TrigramClassifier {
    fn scores(text: &str, scripts: &ScriptCounts) -> ScoreBoard {
        let lowered = format!(" {} ", text.to_lowercase());
        let chars: Vec<char> = lowered.chars().collect();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for window in chars.windows(3) {
            *counts.entry(window.iter().collect()).or_insert(0) += 1;
        }
        let mut singles: HashMap<char, usize> = HashMap::new();
        for ch in &chars {
            *singles.entry(*ch).or_insert(0) += 1;
        }

        let total = counts.values().sum::<usize>().max(1) as f64;
        let entries = PROFILES
            .iter()
            .map(|profile| {
                let trigram: f64 = profile
                    .trigrams
                    .iter()
                    .map(|(gram, weight)| {
                        let hits = match gram.chars().count() {
                            1 => gram
                                .chars()
                                .next()
                                .and_then(|ch| singles.get(&ch))
                                .copied()
                                .unwrap_or(0),
                            _ => counts.get(*gram).copied().unwrap_or(0),
                        };
                        hits as f64 / total * weight
                    })
                    .sum();
                (profile.iso, trigram, (profile.script_weight)(scripts))
            })
            .collect();
        ScoreBoard { entries }
    }
}

impl LanguageClassifier for TrigramClassifier {
    fn name(&self) -> &'static str {
        "trigram"
    }

    fn classify(&self, text: &str) -> Result<&'static str, LanguageError> {
        let scripts = ScriptCounts::of(text);
        if scripts.total == 0 {
            return Err(LanguageError::NoFeatures);
        }
        Ok(Self::scores(text, &scripts).best_iso(&scripts))
    }
}

static FUNCTION_WORDS: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "the", "and", "you", "is", "are", "i", "to", "of", "it", "that", "this",
            "was", "for", "with", "your", "not", "have", "be", "what", "so",
        ],
    ),
    (
        "fr",
        &[
            "le", "la", "les", "et", "je", "tu", "il", "est", "pas", "ne", "une",
            "des", "que", "qui", "pour", "dans", "avec", "mais", "vous", "comme",
        ],
    ),
    (
        "es",
        &[
            "el", "los", "las", "y", "yo", "es", "que", "no", "una", "por", "para",
            "con", "pero", "como", "muy", "eres", "del", "lo", "su", "esta",
        ],
    ),
    (
        "de",
        &[
            "der", "die", "das", "und", "ich", "du", "ist", "nicht", "ein", "eine",
            "mit", "für", "auf", "aber", "wie", "sie", "es", "zu", "bist", "dich",
        ],
    ),
    (
        "it",
        &[
            "il", "di", "che", "non", "sono", "sei", "per", "una", "della", "con",
            "ma", "come", "questo", "gli", "io", "molto", "perché", "anche", "ho", "mi",
        ],
    ),
    (
        "pt",
        &[
            "o", "os", "que", "não", "um", "uma", "para", "com", "você", "do", "da",
            "em", "mas", "como", "eu", "muito", "isso", "está", "são", "seu",
        ],
    ),
    (
        "nl",
        &[
            "de", "het", "een", "en", "ik", "je", "jij", "niet", "van", "dat", "is",
            "met", "voor", "maar", "zijn", "ook", "wat", "zo", "bent", "mij",
        ],
    ),
];

/// Counts function-word hits per language; non-Latin scripts are decided
/// by script alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct StopwordClassifier;

impl LanguageClassifier for StopwordClassifier {
    fn name(&self) -> &'static str {
        "stopword"
    }

    fn classify(&self, text: &str) -> Result<&'static str, LanguageError> {
        let scripts = ScriptCounts::of(text);
        if scripts.total == 0 {
            return Err(LanguageError::NoFeatures);
        }
        if let Some(iso) = scripts.dominant_iso() {
            return Ok(iso);
        }

        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|ch: char| !ch.is_alphabetic())
            .filter(|word| !word.is_empty())
            .collect();

        let mut best = ("en", 0usize);
        for (iso, vocabulary) in FUNCTION_WORDS {
            let hits = words.iter().filter(|word| vocabulary.contains(word)).count();
            if hits > best.1 {
                best = (*iso, hits);
            }
        }
        Ok(best.0)
    }
}

/// Two-classifier language detector.
#[derive(Debug)]
pub struct LanguageDetector {
    primary: Box<dyn LanguageClassifier>,
    secondary: Box<dyn LanguageClassifier>,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(Box::new(TrigramClassifier), Box::new(StopwordClassifier))
    }
}

impl LanguageDetector {
    pub fn new(
        primary: Box<dyn LanguageClassifier>,
        secondary: Box<dyn LanguageClassifier>,
    ) -> Self {
        Self { primary, secondary }
    }

    pub fn detect(&self, text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_DETECTABLE_CHARS {
            return UNKNOWN_LANGUAGE.to_string();
        }
        let outcome = self
            .primary
            .classify(trimmed)
            .and_then(|first| Ok((first, self.secondary.classify(trimmed)?)));
        match outcome {
            Ok((first, second)) if first == second => first.to_string(),
            Ok((first, second)) => {
                log::debug!(
                    "language classifiers disagree ({}={first}, {}={second})",
                    self.primary.name(),
                    self.secondary.name()
                );
                second.to_string()
            }
            Err(err) => {
                log::debug!("language detection failed: {err}");
                UNKNOWN_LANGUAGE.to_string()
            }
        }
    }
}
