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

//! Built-in word lists for the sentiment analyzers.

/// `(word, polarity, subjectivity)` for the polarity analyzer.
pub const POLARITY_LEXICON: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("awesome", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("beautiful", 0.85, 1.0),
    ("excellent", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("perfect", 1.0, 1.0),
    ("kind", 0.6, 0.9),
    ("smart", 0.214, 0.643),
    ("funny", 0.25, 1.0),
    ("fun", 0.3, 0.2),
    ("cool", 0.35, 0.65),
    ("proud", 0.8, 1.0),
    ("brilliant", 0.9, 1.0),
    ("bad", -0.7, 0.667),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("hate", -0.8, 0.9),
    ("stupid", -0.8, 1.0),
    ("ugly", -0.7, 1.0),
    ("dumb", -0.375, 0.5),
    ("disgusting", -1.0, 1.0),
    ("worthless", -0.8, 0.9),
    ("pathetic", -1.0, 1.0),
    ("idiot", -0.8, 0.8),
    ("loser", -0.6, 0.8),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("sick", -0.714, 0.857),
    ("crazy", -0.6, 0.9),
    ("lazy", -0.25, 1.0),
    ("weird", -0.5, 1.0),
    ("annoying", -0.8, 0.9),
    ("useless", -0.5, 0.2),
    ("fake", -0.5, 1.0),
    ("nasty", -1.0, 1.0),
    ("dirty", -0.6, 0.8),
    ("poor", -0.4, 0.6),
    ("evil", -1.0, 1.0),
];

/// Multipliers applied by the polarity analyzer to the next sentiment word.
pub const POLARITY_INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.3),
    ("extremely", 1.5),
    ("totally", 1.4),
    ("absolutely", 1.5),
    ("completely", 1.4),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("barely", 0.4),
];

/// Word valences on a `[-4, 4]` scale for the compound analyzer.
pub const VALENCE_LEXICON: &[(&str, f64)] = &[
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("amazing", 2.8),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("great", 3.1),
    ("good", 1.9),
    ("happy", 2.7),
    ("nice", 1.8),
    ("awesome", 3.1),
    ("excellent", 2.7),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("perfect", 2.7),
    ("kind", 2.4),
    ("smart", 1.7),
    ("funny", 1.9),
    ("fun", 2.3),
    ("cool", 1.3),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("glad", 2.0),
    ("proud", 2.1),
    ("support", 1.7),
    ("friend", 2.2),
    ("friends", 2.1),
    ("win", 2.8),
    ("welcome", 2.0),
    ("respect", 2.1),
    ("hope", 1.9),
    ("enjoy", 2.2),
    ("brilliant", 2.8),
    ("hate", -2.7),
    ("hated", -3.2),
    ("hates", -1.9),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("disgusting", -2.4),
    ("stupid", -2.4),
    ("worthless", -1.9),
    ("ugly", -2.3),
    ("idiot", -2.3),
    ("idiots", -2.6),
    ("kill", -3.7),
    ("die", -2.9),
    ("dead", -3.3),
    ("bad", -2.5),
    ("worst", -3.1),
    ("worse", -2.1),
    ("loser", -2.4),
    ("pathetic", -2.2),
    ("dumb", -2.3),
    ("sad", -2.1),
    ("angry", -2.3),
    ("sick", -2.3),
    ("annoying", -1.7),
    ("useless", -1.8),
    ("fake", -1.5),
    ("nasty", -2.6),
    ("dirty", -1.9),
    ("fool", -1.9),
    ("moron", -2.2),
    ("trash", -1.5),
    ("freak", -1.9),
    ("hurt", -2.4),
    ("cry", -2.1),
    ("shame", -2.1),
    ("disgrace", -2.2),
    ("weird", -0.7),
    ("crazy", -1.4),
    ("lazy", -1.5),
    ("poor", -2.1),
    ("racist", -3.1),
    ("bully", -2.2),
    ("abuse", -3.2),
    ("threat", -2.4),
    ("destroy", -2.7),
    ("evil", -3.4),
    ("fuck", -2.5),
    ("shit", -2.6),
    ("bitch", -2.8),
    ("damn", -1.7),
];

/// Degree adverbs that push the next valence away from zero.
pub const BOOSTERS_UP: &[&str] = &[
    "very", "really", "so", "extremely", "totally", "absolutely", "completely",
    "incredibly", "hugely", "utterly", "most", "more", "fucking",
];

/// Degree adverbs that pull the next valence toward zero.
pub const BOOSTERS_DOWN: &[&str] = &[
    "slightly", "somewhat", "barely", "hardly", "kinda", "sorta", "marginally",
    "partly", "less",
];

pub const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor",
    "nowhere", "cannot", "can't", "cant", "don't", "dont", "doesn't", "doesnt",
    "didn't", "didnt", "isn't", "isnt", "wasn't", "wasnt", "aren't", "arent",
    "won't", "wont", "wouldn't", "wouldnt", "shouldn't", "shouldnt", "couldn't",
    "couldnt", "ain't", "aint", "without",
];
