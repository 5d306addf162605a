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

use chrono::{TimeZone, Utc};
use harcelement::config::IndexConfig;
use harcelement::index::{mapping, publish, IndexDocument, MemoryIndex, Query};
use harcelement::{BatchRunner, Label, MemoryStore, NlpToolkit, RawPost, Record};
use serde_json::{json, Value};

fn enriched_records() -> Vec<Record> {
    let posts = [
        ("<b>You are so stupid and ugly</b>", Label::Bullying),
        ("I love this, it is wonderful and great", Label::NotBullying),
        ("I hate you, you are stupid and ugly!", Label::Bullying),
        ("See you at practice tomorrow", Label::NotBullying),
    ];
    let records = posts.iter().enumerate().map(|(idx, (text, label))| {
        RawPost {
            id: (idx + 1).to_string(),
            text: text.to_string(),
            label: *label,
            post_type: "none".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 7, 14, 20, 15, 0).unwrap(),
        }
        .to_record()
    });
    let mut store = MemoryStore::from_records(records);
    BatchRunner::new(Arc::new(NlpToolkit::new()), 2)
        .unwrap()
        .run(&mut store)
        .unwrap();
    store.records().to_vec()
}

#[test]
fn publish_indexes_queries_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let config = IndexConfig {
        name: "posts_test".to_string(),
        chunk_size: 2,
        export_path: dir.path().join("out").join("bulk.ndjson"),
    };

    let mut records = enriched_records();
    records.push(Record::new(
        "5".to_string(),
        json!({"id_post": "5", "text": "broken", "toxicity_score": "very high"}),
    ));

    let (index, report) = publish(&records, &config).unwrap();
    assert_eq!(report.bulk.indexed, 4);
    assert_eq!(report.bulk.errors, 1);
    assert_eq!(report.document_count, 4);
    assert_eq!(index.document_count(), 4);
    assert_eq!(report.sample_documents.len(), 3);

    let counts: Vec<_> = report
        .sample_queries
        .iter()
        .map(|query| (query.name, query.total_hits))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("High toxicity posts", 2),
            ("Negative sentiment posts", 2),
            ("Bullying posts", 2),
        ]
    );

    let export = std::fs::read_to_string(&config.export_path).unwrap();
    let lines: Vec<Value> = export
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(report.exported, 4);
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], json!({"index": {"_index": "posts_test"}}));
    assert_eq!(lines[1]["id_post"], json!("1"));
    assert_eq!(lines[1]["type"], json!("none"));
    assert_eq!(lines[1]["contenu"], json!("<b>You are so stupid and ugly</b>"));
}

#[test]
fn documents_are_searchable_only_after_refresh() {
    let now = Utc::now();
    let mut index = MemoryIndex::new("refresh_test");
    for record in enriched_records() {
        index
            .index_document(&IndexDocument::from_stored(&record, now).unwrap())
            .unwrap();
    }
    assert_eq!(index.document_count(), 0);
    assert_eq!(index.search(&Query::MatchAll, 10).unwrap().total_hits, 0);

    assert_eq!(index.refresh(), 4);
    assert_eq!(index.search(&Query::MatchAll, 10).unwrap().total_hits, 4);

    index.recreate();
    assert_eq!(index.document_count(), 0);
}

#[test]
fn field_queries_follow_the_mapping() {
    let mut index = MemoryIndex::new("query_test");
    index.bulk_index(&enriched_records(), 10, Utc::now()).unwrap();
    index.refresh();

    let stupid = index.search(&Query::matching("preprocessed_text", "Stupid people"), 10).unwrap();
    assert_eq!(stupid.total_hits, 2);

    let exact = index
        .search(&Query::term("original_text.keyword", "See you at practice tomorrow"), 10)
        .unwrap();
    assert_eq!(exact.total_hits, 1);
    assert_eq!(exact.hits[0]["label"], json!("NB"));

    let limited = index.search(&Query::MatchAll, 1).unwrap();
    assert_eq!(limited.total_hits, 4);
    assert_eq!(limited.hits.len(), 1);

    assert!(index.search(&Query::term("nope", "x"), 10).is_err());
}

#[test]
fn mapping_declares_every_published_field() {
    let mapping = mapping();
    let properties = mapping["mappings"]["properties"].as_object().unwrap();
    let document = serde_json::to_value(
        IndexDocument::from_stored(&enriched_records()[0], Utc::now()).unwrap(),
    )
    .unwrap();
    for key in document.as_object().unwrap().keys() {
        assert!(properties.contains_key(key), "{key} missing from mapping");
    }
    assert_eq!(mapping["settings"]["number_of_shards"], json!(1));
}

#[test]
fn zero_chunk_size_is_rejected() {
    let mut index = MemoryIndex::new("chunks");
    assert!(index.bulk_index(&[], 0, Utc::now()).is_err());
}
