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

//! # Harcelement Core Library
//!
//! Batch pipeline for a labeled cyberbullying dataset: posts are cleaned and
//! lemmatized, enriched with language, sentiment and a toxicity score,
//! written back to a document store and republished to a search index.
//!
//! ## Module Overview
//!
//! - **text**: TextNormalizer and its stages (cleaning, stopwords, tagging,
//!   lemmatization)
//! - **enrich**: Enricher (language detection, sentiment, toxicity)
//! - **toolkit**: the immutable analyzer set shared by normalizer and enricher
//! - **batch**: BatchRunner over a document source and sink
//! - **store**: source/sink traits with in-memory and JSONL stores
//! - **post**: typed post views and the stored field names
//! - **record**: the document unit passed between stores and operators
//! - **operator** / **operators** / **pipeline**: config-built operator chains
//! - **ingest**: CSV dataset loading and cleanup
//! - **index**: index schema, in-memory index and bulk export
//! - **metrics**: analysis summary over stored documents
//! - **config** / **logging**: configuration files and the `log` backend
//!
//! ## Feature Flags
//!
//! - `parallel`: process the documents of a batch on the Rayon pool
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use harcelement::{BatchRunner, MemoryStore, NlpToolkit, Record};
//! use serde_json::json;
//!
//! let mut store = MemoryStore::from_records(vec![
//!     Record::new("1".to_string(), json!({"text": "You are <b>so</b> stupid", "label": "B"})),
//! ]);
//! let runner = BatchRunner::new(Arc::new(NlpToolkit::new()), 50)?;
//! let summary = runner.run(&mut store)?;
//! assert_eq!(summary.processed(), 1);
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `Result<T, Error>`. Failures confined to one
//! document during a batch run are recorded in the run summary instead.

pub mod batch;
pub mod config;
pub mod enrich;
pub mod errors;
pub mod index;
pub mod ingest;
pub mod logging;
pub mod metrics;
pub mod operator;
pub mod operators;
pub mod pipeline;
pub mod post;
pub mod record;
pub mod store;
pub mod text;
pub mod toolkit;

pub use batch::{BatchProgress, BatchRunner, RecordOutcome, RunSummary};
pub use config::AppConfig;
pub use enrich::{Enricher, LanguageDetector, SentimentScores};
pub use errors::{Error, Result};
pub use index::{IndexDocument, MemoryIndex, Query};
pub use ingest::{Dataset, PostTimeWindow};
pub use metrics::AnalysisSummary;
pub use operator::{execute_operator, Operator};
pub use pipeline::{OperatorFactory, Pipeline, PipelineBuilder};
pub use post::{EnrichedPost, EnrichmentResult, Label, NormalizedText, RawPost, Sentiment};
pub use record::{Metadata, Record, RecordBatch};
pub use store::{DocumentSink, DocumentSource, JsonlStore, MemoryStore};
pub use text::TextNormalizer;
pub use toolkit::NlpToolkit;
