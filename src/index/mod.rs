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

//! # Search Index Publication
//!
//! Republishes enriched documents under a fixed field schema:
//!
//! - [`schema`]: the mapping and the stored-document transform
//! - [`memory`]: an in-memory index with bulk loading, refresh, the query
//!   subset used by the sample queries, and a bulk NDJSON export that can
//!   be posted to an Elasticsearch `_bulk` endpoint
//!
//! [`publish`] runs the whole sequence: recreate, bulk index, refresh,
//! verify, sample queries, export.

pub mod memory;
pub mod schema;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::config::IndexConfig;
use crate::errors::Result;
use crate::record::Record;

pub use memory::{sample_queries, BulkStats, MemoryIndex, Query, SampleQuery, SearchResult};
pub use schema::{mapping, FieldType, IndexDocument};

/// Documents returned with the verification and each sample query.
pub const SAMPLE_SIZE: usize = 3;

#[derive(Clone, Debug, Serialize)]
pub struct SampleQueryReport {
    pub name: &'static str,
    pub total_hits: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct PublishReport {
    pub index: String,
    pub bulk: BulkStats,
    pub document_count: usize,
    pub sample_documents: Vec<Value>,
    pub sample_queries: Vec<SampleQueryReport>,
    pub exported: usize,
}

/// Publishes `records` into a fresh index named by `config` and writes the
/// bulk export.
pub fn publish(records: &[Record], config: &IndexConfig) -> Result<(MemoryIndex, PublishReport)> {
    let mut index = MemoryIndex::new(config.name.clone());
    index.recreate();
    let bulk = index.bulk_index(records, config.chunk_size, Utc::now())?;
    let document_count = index.refresh();

    let sample_documents = index.search(&Query::MatchAll, SAMPLE_SIZE)?.hits;
    let sample_queries = index
        .run_sample_queries(SAMPLE_SIZE)?
        .into_iter()
        .map(|(name, result)| SampleQueryReport {
            name,
            total_hits: result.total_hits,
        })
        .collect();

    let exported = index.export_bulk(&config.export_path)?;
    log::info!(
        "exported {exported} documents to {}",
        config.export_path.display()
    );

    let report = PublishReport {
        index: config.name.clone(),
        bulk,
        document_count,
        sample_documents,
        sample_queries,
        exported,
    };
    Ok((index, report))
}
