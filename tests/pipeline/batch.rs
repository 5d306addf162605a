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

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use harcelement::store::Patch;
use harcelement::{
    BatchRunner, DocumentSink, JsonlStore, Label, MemoryStore, NlpToolkit, PipelineBuilder,
    RawPost, Record, RecordOutcome,
};
use serde_json::json;

fn runner(batch_size: usize) -> BatchRunner {
    BatchRunner::new(Arc::new(NlpToolkit::new()), batch_size).unwrap()
}

fn post(id: usize, text: &str, label: Label) -> Record {
    RawPost {
        id: id.to_string(),
        text: text.to_string(),
        label,
        post_type: "none".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 10, 19, 30, 0).unwrap(),
    }
    .to_record()
}

#[derive(Default)]
struct RecordingSink {
    patches: Vec<(String, Patch)>,
    windows: Vec<usize>,
    flushed: bool,
}

impl DocumentSink for RecordingSink {
    fn apply_patch(&mut self, id: &str, patch: &Patch) -> harcelement::Result<bool> {
        self.patches.push((id.to_string(), patch.clone()));
        Ok(true)
    }

    fn apply_patches(&mut self, patches: &[(String, Patch)]) -> harcelement::Result<Vec<bool>> {
        self.windows.push(patches.len());
        self.patches.extend_from_slice(patches);
        Ok(vec![true; patches.len()])
    }

    fn flush(&mut self) -> harcelement::Result<()> {
        self.flushed = true;
        Ok(())
    }
}

#[test]
fn failing_documents_do_not_stop_the_run() {
    let mut records: Vec<Record> = (1..=7)
        .map(|i| post(i, &format!("Post number {i} is fine"), Label::NotBullying))
        .collect();
    records.push(Record::new("8".to_string(), json!({"text": ["not", "a", "string"]})));
    records.push(Record::new(None, json!({"text": "no identifier at all"})));
    records.push(Record::new("10".to_string(), json!({"text": "bad label", "label": 3})));

    let mut store = MemoryStore::from_records(records);
    let summary = runner(4).run(&mut store).unwrap();

    assert_eq!(summary.total(), 10);
    assert_eq!(summary.processed(), 7);
    assert_eq!(summary.failed(), 3);
    assert_eq!(summary.batches, 3);

    let failed_ids: Vec<_> = summary
        .failures()
        .map(|outcome| match outcome {
            RecordOutcome::Failed { id, .. } => id.clone(),
            RecordOutcome::Processed { .. } => unreachable!(),
        })
        .collect();
    assert_eq!(failed_ids, vec![Some("8".to_string()), None, Some("10".to_string())]);

    let untouched = store.get("8").unwrap();
    assert!(untouched.payload.get("preprocessed_text").is_none());
    for id in 1..=7 {
        let stored = store.get(&id.to_string()).unwrap();
        assert!(stored.payload["preprocessed_text"].is_string());
        assert_eq!(stored.payload["label"], json!("NB"));
    }
}

#[test]
fn enriched_fields_are_written_back() {
    let mut store = MemoryStore::from_records(vec![post(
        1,
        "<b>You are so stupid and ugly</b>",
        Label::Bullying,
    )]);
    runner(50).run(&mut store).unwrap();

    let payload = &store.get("1").unwrap().payload;
    assert_eq!(payload["original_text"], json!("<b>You are so stupid and ugly</b>"));
    assert_eq!(payload["preprocessed_text"], json!("stupid ugly"));
    assert_eq!(payload["sentiment"], json!("negative"));
    assert_eq!(payload["type"], json!("none"));
    assert!(payload["toxicity_score"].as_f64().unwrap() >= 0.8);
    assert!(payload["nlp_processed_at"].is_string());
}

#[test]
fn rerunning_over_enriched_documents_is_stable() {
    let mut store = MemoryStore::from_records(vec![post(1, "The cats were running", Label::NotBullying)]);
    let runner = runner(10);
    runner.run(&mut store).unwrap();
    let first = store.get("1").unwrap().payload["preprocessed_text"].clone();
    runner.run(&mut store).unwrap();
    assert_eq!(store.get("1").unwrap().payload["preprocessed_text"], first);
    assert_eq!(first, json!("cat run"));
}

#[test]
fn jsonl_store_persists_enrichment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store").join("posts.jsonl");

    let mut store = JsonlStore::open(&path).unwrap();
    store.insert_many((1..=3).map(|i| post(i, "I love this, it is wonderful", Label::NotBullying)));
    store.flush().unwrap();

    let mut store = JsonlStore::open(&path).unwrap();
    let summary = runner(2).run(&mut store).unwrap();
    assert_eq!(summary.processed(), 3);

    let reopened = JsonlStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 3);
    for record in reopened.records() {
        assert_eq!(record.payload["sentiment"], json!("positive"));
        assert_eq!(record.payload["toxicity_score"], json!(0.1));
    }
}

#[test]
fn run_iter_windows_any_record_stream() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let reporter = Arc::clone(&seen);
    let runner = runner(3).with_progress(Box::new(move |progress| {
        reporter.lock().unwrap().push((progress.batch, progress.seen, progress.total));
    }));

    let mut sink = RecordingSink::default();
    let records = (1..=7).map(|i| post(i, "hello there", Label::NotBullying));
    let summary = runner.run_iter(records, &mut sink).unwrap();

    assert_eq!(summary.processed(), 7);
    assert!(sink.flushed);
    let ids: Vec<_> = sink.patches.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7"]);
    assert_eq!(sink.windows, vec![3, 3, 1]);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(1, 3, None), (2, 6, None), (3, 7, None)]
    );
}

#[test]
fn empty_store_runs_no_batches() {
    let mut store = MemoryStore::new();
    let summary = runner(5).run(&mut store).unwrap();
    assert_eq!(summary.batches, 0);
    assert_eq!(summary.total(), 0);
}

#[test]
fn failed_documents_stay_out_of_the_bulk_write() {
    let mut sink = RecordingSink::default();
    let records = vec![
        post(1, "hello there", Label::NotBullying),
        Record::new("2".to_string(), json!({"text": 5})),
        post(3, "good morning", Label::NotBullying),
    ];
    let summary = runner(3).run_iter(records, &mut sink).unwrap();

    assert_eq!(sink.windows, vec![2]);
    let ids: Vec<_> = summary
        .outcomes
        .iter()
        .map(|outcome| match outcome {
            RecordOutcome::Processed { id } => id.as_str(),
            RecordOutcome::Failed { id, .. } => id.as_deref().unwrap_or("-"),
        })
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert!(!summary.outcomes[1].is_processed());
}

#[test]
fn configured_pipeline_fields_are_stored() {
    let toolkit = Arc::new(NlpToolkit::new());
    let pipeline = PipelineBuilder::with_toolkit(Arc::clone(&toolkit))
        .defaults()
        .build_from_config(&[json!({
            "operator": "text.tokenize",
            "config": {"path": "payload.preprocessed_text", "target": "payload.tokens"}
        })])
        .unwrap();
    let runner = BatchRunner::new(toolkit, 10).unwrap().with_pipeline(pipeline);

    let mut store = MemoryStore::from_records(vec![post(1, "The cats were running", Label::NotBullying)]);
    let summary = runner.run(&mut store).unwrap();
    assert_eq!(summary.processed(), 1);

    let stored = store.get("1").unwrap();
    assert_eq!(stored.payload["preprocessed_text"], json!("cat run"));
    assert_eq!(stored.payload["tokens"], json!(["cat", "run"]));
    assert!(stored.metadata.is_none());
}

#[test]
fn pipeline_errors_fail_only_that_document() {
    let toolkit = Arc::new(NlpToolkit::new());
    let pipeline = PipelineBuilder::with_toolkit(Arc::clone(&toolkit))
        .defaults()
        .build_from_config(&[json!({"operator": "text.stopwords"})])
        .unwrap();
    let runner = BatchRunner::new(toolkit, 10).unwrap().with_pipeline(pipeline);

    let mut store = MemoryStore::from_records(vec![post(1, "hello there", Label::NotBullying)]);
    let summary = runner.run(&mut store).unwrap();
    assert_eq!(summary.processed(), 0);
    assert_eq!(summary.failed(), 1);
    assert!(store.get("1").unwrap().payload.get("preprocessed_text").is_none());
}
