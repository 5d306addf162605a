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

//! # NLP Toolkit
//!
//! All linguistic resources used by normalization and enrichment, built once
//! and shared read-only through an [`Arc`](std::sync::Arc). Nothing in the
//! toolkit is mutated after construction, so it can be used from several
//! worker threads at once.
//!
//! ```rust
//! use std::sync::Arc;
//! use harcelement::toolkit::NlpToolkit;
//! use harcelement::text::TextNormalizer;
//!
//! let toolkit = Arc::new(NlpToolkit::new());
//! let normalizer = TextNormalizer::new(Arc::clone(&toolkit));
//! assert_eq!(normalizer.normalize("The cats were running!"), "cat run");
//! ```

use crate::config::NlpConfig;
use crate::enrich::language::{LanguageClassifier, LanguageDetector};
use crate::enrich::sentiment::{PolarityAnalyzer, ValenceAnalyzer};
use crate::text::lemmatizer::Lemmatizer;
use crate::text::stopwords::StopwordSet;
use crate::text::tagger::{DisabledTagger, PosTagger, SuffixTagger};

#[derive(Debug)]
pub struct NlpToolkit {
    pub stopwords: StopwordSet,
    pub tagger: Box<dyn PosTagger + Send + Sync>,
    pub lemmatizer: Lemmatizer,
    pub language: LanguageDetector,
    pub polarity: PolarityAnalyzer,
    pub valence: ValenceAnalyzer,
}

impl Default for NlpToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl NlpToolkit {
    /// Toolkit with the built-in English resources and tagging enabled.
    pub fn new() -> Self {
        Self {
            stopwords: StopwordSet::english(),
            tagger: Box::new(SuffixTagger::new()),
            lemmatizer: Lemmatizer::new(),
            language: LanguageDetector::default(),
            polarity: PolarityAnalyzer::new(),
            valence: ValenceAnalyzer::new(),
        }
    }

    pub fn from_config(config: &NlpConfig) -> Self {
        let toolkit = Self::new();
        if config.pos_tagging {
            toolkit
        } else {
            toolkit.with_tagger(Box::new(DisabledTagger))
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_tagger(mut self, tagger: Box<dyn PosTagger + Send + Sync>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_language_classifiers(
        mut self,
        primary: Box<dyn LanguageClassifier>,
        secondary: Box<dyn LanguageClassifier>,
    ) -> Self {
        self.language = LanguageDetector::new(primary, secondary);
        self
    }
}
