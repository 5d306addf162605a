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

//! # Operators Module
//!
//! Built-in operators, each created by a factory from a JSON config object:
//!
//! | name             | reads (default)           | writes (default)                  |
//! |------------------|---------------------------|-----------------------------------|
//! | `text.normalize` | `payload.text`            | `payload.preprocessed_text`       |
//! | `text.tokenize`  | `payload.text`            | `metadata.tokens`                 |
//! | `text.stopwords` | `metadata.tokens`         | same field                        |
//! | `text.lemmatize` | `metadata.tokens`         | same field, optional `joined`     |
//! | `nlp.language`   | `payload.text`            | `metadata.language`               |
//! | `nlp.sentiment`  | `payload.text`            | `metadata.sentiment`              |
//! | `nlp.toxicity`   | text, `payload.label`     | `metadata.toxicity_score`         |
//!
//! Paths are overridden with the `path` and `target` config keys.

pub mod field;
pub mod nlp;
pub mod text;

pub use field::FieldPath;
