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

use harcelement::text::normalizer::{clean_text, tokenize};
use harcelement::text::tagger::DisabledTagger;
use harcelement::text::StopwordSet;
use harcelement::{NlpToolkit, TextNormalizer};
use proptest::prelude::*;

fn normalizer() -> TextNormalizer {
    TextNormalizer::new(Arc::new(NlpToolkit::new()))
}

#[test]
fn post_with_markup_mention_digits_and_url() {
    let out = normalizer()
        .normalize("<p>Hello @user! This is a TEST123 message with https://example.com URL.</p>");
    assert!(!out.contains('<'));
    assert!(!out.contains('@'));
    assert!(!out.contains("http"));
    assert!(!out.contains("example"));
    assert!(!out.chars().any(|ch| ch.is_ascii_digit()));
    assert_eq!(out, out.to_lowercase());
    assert_eq!(out, "hello user test message url");
}

#[test]
fn empty_and_stopword_only_posts_normalize_to_empty() {
    let normalizer = normalizer();
    assert_eq!(normalizer.normalize(""), "");
    assert_eq!(normalizer.normalize("\n\t "), "");
    assert_eq!(normalizer.normalize("It was what it was"), "");
}

#[test]
fn tokenize_splits_lines_and_whitespace() {
    assert_eq!(tokenize("one two\nthree\r\n  four"), vec!["one", "two", "three", "four"]);
    assert!(tokenize("").is_empty());
}

#[test]
fn clean_text_keeps_windows_paths_intact() {
    let cleaned = clean_text(r"C:\Users\<admin>");
    assert!(cleaned.contains("users"));
    assert!(cleaned.contains("admin"));
}

#[test]
fn single_character_lemmas_are_dropped() {
    assert_eq!(normalizer().normalize("x y z bullies"), "bully");
}

#[test]
fn custom_stopwords_replace_the_english_list() {
    let toolkit = NlpToolkit::new().with_stopwords(StopwordSet::from_words(["loser"]));
    let normalizer = TextNormalizer::new(Arc::new(toolkit));
    assert_eq!(normalizer.normalize("You loser"), "you");
}

#[test]
fn untagged_toolkit_lemmatizes_as_nouns() {
    let toolkit = NlpToolkit::new().with_tagger(Box::new(DisabledTagger));
    let normalizer = TextNormalizer::new(Arc::new(toolkit));
    assert_eq!(normalizer.normalize("cats running"), "cat running");
}

#[test]
fn normalizer_is_shareable_across_threads() {
    let normalizer = normalizer();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let normalizer = normalizer.clone();
            std::thread::spawn(move || normalizer.normalize("The cats were running"))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "cat run");
    }
}

proptest! {
    #[test]
    fn normalization_is_idempotent(text in "[a-zA-Z0-9 <>/@.!?,:;#&'-]{0,80}") {
        let normalizer = normalizer();
        let once = normalizer.normalize(&text);
        prop_assert_eq!(normalizer.normalize(&once), once.clone());
    }

    #[test]
    fn output_is_lowercase_words_longer_than_one_char(text in "[a-zA-Z0-9 .!?,#@-]{0,80}") {
        let out = normalizer().normalize(&text);
        prop_assert_eq!(out.to_lowercase(), out.clone());
        prop_assert!(!out.chars().any(|ch| ch.is_ascii_digit()));
        prop_assert!(out.split(' ').filter(|t| !t.is_empty()).all(|t| t.chars().count() > 1));
    }
}
