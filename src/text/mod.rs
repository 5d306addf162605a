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

//! # Text Module
//!
//! Text cleaning and lemmatization:
//!
//! - **Normalizer** ([normalizer.rs](normalizer/index.html)): the staged
//!   cleaning pipeline
//! - **Stopwords** ([stopwords.rs](stopwords/index.html)): the English
//!   stopword list
//! - **Tagger** ([tagger.rs](tagger/index.html)): part-of-speech tagging
//! - **Lemmatizer** ([lemmatizer.rs](lemmatizer/index.html)): rule and
//!   exception based lemmatization

pub mod lemmatizer;
pub mod normalizer;
pub mod stopwords;
pub mod tagger;

pub use lemmatizer::Lemmatizer;
pub use normalizer::TextNormalizer;
pub use stopwords::StopwordSet;
pub use tagger::{DisabledTagger, PartOfSpeech, PosTagger, SuffixTagger, TagError};
