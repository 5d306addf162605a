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

//! # Batch Runner
//!
//! [`BatchRunner`] walks a document source in fixed-size windows, normalizes
//! and enriches every document and writes the window's merge patches to the
//! sink as one bulk write.
//!
//! An optional operator [`Pipeline`] runs on each enriched document; the
//! payload fields it adds or changes join the document's patch.
//!
//! A failure confined to one document (missing id, text of the wrong type,
//! a label that is not a string) is logged with the document id and recorded
//! as a [`RecordOutcome::Failed`]; the run continues. Errors raised by the
//! source or sink abort the run.
//!
//! With the `parallel` feature the documents of a window are processed on the
//! Rayon pool. Patches are still applied to the sink from the calling thread,
//! in window order.

use std::sync::Arc;

use chrono::{DateTime, Utc};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::enrich::Enricher;
use crate::errors::{Error, Result};
use crate::pipeline::Pipeline;
use crate::post::{document_id, update_patch, Label, LABEL_KEYS, TEXT_KEYS};
use crate::record::Record;
use crate::store::{DocumentSink, DocumentSource, Patch};
use crate::text::TextNormalizer;
use crate::toolkit::NlpToolkit;

pub const DEFAULT_BATCH_SIZE: usize = 50;

pub type ProgressCallback = Box<dyn Fn(BatchProgress) + Send + Sync>;

/// Snapshot reported after each window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchProgress {
    pub batch: usize,
    pub seen: usize,
    pub total: Option<usize>,
    pub processed: usize,
    pub failed: usize,
}

/// What happened to one document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecordOutcome {
    Processed { id: String },
    Failed { id: Option<String>, reason: String },
}

impl RecordOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, RecordOutcome::Processed { .. })
    }
}

/// Outcomes of a run, in visiting order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub batches: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl RunSummary {
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_processed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.processed()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Failed outcomes only.
    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_processed())
    }
}

type Processed = std::result::Result<(String, Patch), (Option<String>, Error)>;

pub struct BatchRunner {
    normalizer: TextNormalizer,
    enricher: Enricher,
    batch_size: usize,
    pipeline: Option<Pipeline>,
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for BatchRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRunner")
            .field("batch_size", &self.batch_size)
            .field("pipeline", &self.pipeline.as_ref().map(Pipeline::stage_names))
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl BatchRunner {
    /// Creates a runner over `toolkit`. A zero batch size is rejected.
    pub fn new(toolkit: Arc<NlpToolkit>, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::validation("batch size must be positive"));
        }
        Ok(Self {
            normalizer: TextNormalizer::new(Arc::clone(&toolkit)),
            enricher: Enricher::new(toolkit),
            batch_size,
            pipeline: None,
            progress: None,
        })
    }

    /// Runs `pipeline` on every document after the built-in enrichment.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Builds the patch for one stored document.
    pub fn process_record(&self, record: &Record, now: DateTime<Utc>) -> Result<(String, Patch)> {
        let id = document_id(record)?;
        let text = record.str_field(TEXT_KEYS)?.unwrap_or_default();
        let label = record.str_field(LABEL_KEYS)?.and_then(Label::parse);

        let normalized = self.normalizer.normalize_post(text);
        let enrichment = self.enricher.enrich_at(text, label, now);
        let patch = update_patch(&normalized, &enrichment);
        match &self.pipeline {
            Some(pipeline) => Ok((id, extend_patch(pipeline, record, patch)?)),
            None => Ok((id, patch)),
        }
    }

    fn process_one(&self, record: &Record) -> Processed {
        self.process_record(record, Utc::now())
            .map_err(|err| (document_id(record).ok(), err))
    }

    #[cfg(feature = "parallel")]
    fn process_window(&self, window: &[Record]) -> Vec<Processed> {
        window.par_iter().map(|record| self.process_one(record)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn process_window(&self, window: &[Record]) -> Vec<Processed> {
        window.iter().map(|record| self.process_one(record)).collect()
    }

    /// Processes one window and bulk-writes its patches to `sink`.
    fn flush_window<K: DocumentSink + ?Sized>(
        &self,
        window: &[Record],
        sink: &mut K,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let mut outcomes: Vec<Option<RecordOutcome>> = Vec::with_capacity(window.len());
        let mut slots = Vec::new();
        let mut patches = Vec::new();
        for result in self.process_window(window) {
            match result {
                Ok(update) => {
                    slots.push(outcomes.len());
                    outcomes.push(None);
                    patches.push(update);
                }
                Err((id, err)) => {
                    log::warn!(
                        "skipping document {}: {err}",
                        id.as_deref().unwrap_or("<no id>")
                    );
                    outcomes.push(Some(RecordOutcome::Failed {
                        id,
                        reason: err.to_string(),
                    }));
                }
            }
        }

        if !patches.is_empty() {
            let matched = sink.apply_patches(&patches)?;
            if matched.len() != patches.len() {
                return Err(Error::collaborator(
                    "document-sink",
                    format!("{} results for {} patches", matched.len(), patches.len()),
                ));
            }
            for ((slot, (id, _)), found) in slots.into_iter().zip(patches).zip(matched) {
                outcomes[slot] = Some(if found {
                    RecordOutcome::Processed { id }
                } else {
                    RecordOutcome::Failed {
                        id: Some(id),
                        reason: "document is no longer stored".to_string(),
                    }
                });
            }
        }

        summary.outcomes.extend(outcomes.into_iter().flatten());
        summary.batches += 1;
        Ok(())
    }

    fn report(&self, summary: &RunSummary, total: Option<usize>) {
        let processed = summary.processed();
        let failed = summary.total() - processed;
        log::info!(
            "batch {} done: {} processed, {} failed",
            summary.batches,
            processed,
            failed
        );
        if let Some(callback) = &self.progress {
            callback(BatchProgress {
                batch: summary.batches,
                seen: summary.total(),
                total,
                processed,
                failed,
            });
        }
    }

    /// Enriches every document of `store`, paging with skip/limit.
    pub fn run<S>(&self, store: &mut S) -> Result<RunSummary>
    where
        S: DocumentSource + DocumentSink,
    {
        let total = store.count()?;
        log::info!("enriching {total} documents in batches of {}", self.batch_size);

        let mut summary = RunSummary::default();
        let mut skip = 0;
        while skip < total {
            let window = store.fetch(skip, self.batch_size)?;
            if window.is_empty() {
                break;
            }
            skip += window.len();
            self.flush_window(&window, store, &mut summary)?;
            self.report(&summary, Some(total));
        }
        store.flush()?;

        log::info!(
            "enrichment finished: {} processed, {} failed",
            summary.processed(),
            summary.failed()
        );
        Ok(summary)
    }

    /// Enriches documents from an iterator, windowing it by the batch size.
    pub fn run_iter<I, K>(&self, records: I, sink: &mut K) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Record>,
        K: DocumentSink + ?Sized,
    {
        let mut summary = RunSummary::default();
        let mut pending = records.into_iter().peekable();
        while pending.peek().is_some() {
            let window: Vec<Record> = pending.by_ref().take(self.batch_size).collect();
            self.flush_window(&window, sink, &mut summary)?;
            self.report(&summary, None);
        }
        sink.flush()?;
        Ok(summary)
    }
}

/// Runs `pipeline` on the enriched document and adds the payload fields it
/// set to `patch`. Metadata written by the operators is not stored.
fn extend_patch(pipeline: &Pipeline, record: &Record, mut patch: Patch) -> Result<Patch> {
    let mut enriched = record.clone();
    enriched.merge(&patch);
    let mut out = pipeline.run(vec![enriched])?;
    if out.len() != 1 {
        return Err(Error::pipeline(
            "pipeline",
            format!("expected one document back, got {}", out.len()),
        ));
    }
    let Value::Object(payload) = out.remove(0).payload else {
        return Err(Error::schema("pipeline output payload must be an object"));
    };
    for (key, value) in payload {
        if patch.contains_key(&key) || record.payload.get(&key) != Some(&value) {
            patch.insert(key, value);
        }
    }
    Ok(patch)
}
