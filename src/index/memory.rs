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

//! In-memory search index with Elasticsearch-style refresh semantics:
//! indexed documents become searchable after [`MemoryIndex::refresh`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::errors::{Error, Result};
use crate::index::schema::{field_type, mapping, FieldType, IndexDocument, KEYWORD_IGNORE_ABOVE};
use crate::record::Record;

/// Query subset understood by [`MemoryIndex::search`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    MatchAll,
    /// Exact value of a keyword field, or one analyzed token of a text field.
    Term { field: String, value: String },
    /// Numeric bounds on a float field; either bound may be open.
    Range {
        field: String,
        gte: Option<f64>,
        lte: Option<f64>,
    },
    /// Any analyzed token of `text` present in a text field.
    Match { field: String, text: String },
}

impl Query {
    pub fn term(field: &str, value: &str) -> Self {
        Query::Term {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn at_least(field: &str, gte: f64) -> Self {
        Query::Range {
            field: field.to_string(),
            gte: Some(gte),
            lte: None,
        }
    }

    pub fn matching(field: &str, text: &str) -> Self {
        Query::Match {
            field: field.to_string(),
            text: text.to_string(),
        }
    }

    fn field(&self) -> Option<&str> {
        match self {
            Query::MatchAll => None,
            Query::Term { field, .. } | Query::Range { field, .. } | Query::Match { field, .. } => {
                Some(field.as_str())
            }
        }
    }
}

/// Lowercased alphanumeric runs, an approximation of the standard analyzer.
fn analyze(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BulkStats {
    pub indexed: usize,
    pub errors: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    pub total_hits: usize,
    pub hits: Vec<Value>,
}

/// A named query run after publication to sanity-check the index.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleQuery {
    pub name: &'static str,
    pub query: Query,
}

pub fn sample_queries() -> Vec<SampleQuery> {
    vec![
        SampleQuery {
            name: "High toxicity posts",
            query: Query::at_least("toxicity_score", 0.7),
        },
        SampleQuery {
            name: "Negative sentiment posts",
            query: Query::term("sentiment", "negative"),
        },
        SampleQuery {
            name: "Bullying posts",
            query: Query::term("label", "B"),
        },
    ]
}

#[derive(Debug)]
pub struct MemoryIndex {
    name: String,
    searchable: Vec<Value>,
    pending: Vec<Value>,
}

impl MemoryIndex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            searchable: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mapping(&self) -> Value {
        mapping()
    }

    /// Drops every document, as deleting and recreating the index would.
    pub fn recreate(&mut self) {
        if !self.searchable.is_empty() || !self.pending.is_empty() {
            log::info!("deleted existing index: {}", self.name);
        }
        self.searchable.clear();
        self.pending.clear();
        log::info!("created index: {}", self.name);
    }

    pub fn index_document(&mut self, document: &IndexDocument) -> Result<()> {
        self.pending.push(serde_json::to_value(document)?);
        Ok(())
    }

    /// Transforms and indexes stored documents in chunks of `chunk_size`.
    /// A document that fails to transform is logged and counted; the rest of
    /// the chunk proceeds.
    pub fn bulk_index(
        &mut self,
        records: &[Record],
        chunk_size: usize,
        now: DateTime<Utc>,
    ) -> Result<BulkStats> {
        if chunk_size == 0 {
            return Err(Error::validation("chunk size must be positive"));
        }
        log::info!("starting bulk indexing of {} documents", records.len());
        let mut stats = BulkStats::default();
        for chunk in records.chunks(chunk_size) {
            for record in chunk {
                match IndexDocument::from_stored(record, now)
                    .and_then(|document| self.index_document(&document))
                {
                    Ok(()) => stats.indexed += 1,
                    Err(err) => {
                        stats.errors += 1;
                        log::error!("indexing error for {:?}: {err}", record.id);
                    }
                }
            }
            log::info!("indexed {} documents, {} errors", stats.indexed, stats.errors);
        }
        log::info!(
            "bulk indexing completed: {} successful, {} errors",
            stats.indexed,
            stats.errors
        );
        Ok(stats)
    }

    /// Makes pending documents searchable; returns the searchable count.
    pub fn refresh(&mut self) -> usize {
        self.searchable.append(&mut self.pending);
        self.searchable.len()
    }

    pub fn document_count(&self) -> usize {
        self.searchable.len()
    }

    /// Searchable documents matching `query`, at most `size` returned.
    pub fn search(&self, query: &Query, size: usize) -> Result<SearchResult> {
        let kind = match query.field() {
            Some(field) => Some(field_type(field).ok_or_else(|| {
                Error::validation(format!("field '{field}' is not in the index mapping"))
            })?),
            None => None,
        };
        let mut total_hits = 0;
        let mut hits = Vec::new();
        for source in &self.searchable {
            if matches(query, kind, source) {
                total_hits += 1;
                if hits.len() < size {
                    hits.push(source.clone());
                }
            }
        }
        Ok(SearchResult { total_hits, hits })
    }

    /// Runs [`sample_queries`] and returns each result by name.
    pub fn run_sample_queries(&self, size: usize) -> Result<Vec<(&'static str, SearchResult)>> {
        sample_queries()
            .into_iter()
            .map(|sample| Ok((sample.name, self.search(&sample.query, size)?)))
            .collect()
    }

    /// Writes searchable documents as an Elasticsearch bulk NDJSON body.
    pub fn export_bulk(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let temp = temp_path(path);
        {
            let mut writer = BufWriter::new(File::create(&temp)?);
            let action = json!({"index": {"_index": self.name}});
            for source in &self.searchable {
                serde_json::to_writer(&mut writer, &action)?;
                writer.write_all(b"\n")?;
                serde_json::to_writer(&mut writer, source)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        std::fs::rename(&temp, path)?;
        Ok(self.searchable.len())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("export");
    path.parent()
        .unwrap_or(Path::new("."))
        .join(format!(".{stem}.tmp"))
}

fn lookup<'a>(source: &'a Value, field: &str) -> Option<&'a Value> {
    source.get(field.strip_suffix(".keyword").unwrap_or(field))
}

fn matches(query: &Query, kind: Option<FieldType>, source: &Value) -> bool {
    match query {
        Query::MatchAll => true,
        Query::Term { field, value } => {
            let Some(stored) = lookup(source, field).and_then(Value::as_str) else {
                return false;
            };
            match kind {
                Some(FieldType::Keyword) if field.ends_with(".keyword") => {
                    stored.chars().count() <= KEYWORD_IGNORE_ABOVE && stored == value
                }
                Some(FieldType::Keyword) => stored == value,
                Some(FieldType::Text) | Some(FieldType::TextWithKeyword) => {
                    analyze(stored).any(|token| token == *value)
                }
                _ => false,
            }
        }
        Query::Range { field, gte, lte } => {
            let Some(stored) = lookup(source, field).and_then(Value::as_f64) else {
                return false;
            };
            gte.map_or(true, |bound| stored >= bound) && lte.map_or(true, |bound| stored <= bound)
        }
        Query::Match { field, text } => {
            let Some(stored) = lookup(source, field).and_then(Value::as_str) else {
                return false;
            };
            let wanted: Vec<String> = analyze(text).collect();
            match kind {
                Some(FieldType::Keyword) => stored == text,
                _ => analyze(stored).any(|token| wanted.contains(&token)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: &str, text: &str, toxicity: f64, sentiment: &str, label: &str) -> Record {
        Record::new(
            id.to_string(),
            json!({
                "id_post": id,
                "original_text": text,
                "toxicity_score": toxicity,
                "sentiment": sentiment,
                "label": label,
            }),
        )
    }

    fn populated() -> MemoryIndex {
        let mut index = MemoryIndex::new("posts");
        let records = vec![
            stored("1", "You are stupid", 0.9, "negative", "B"),
            stored("2", "Have a nice day", 0.1, "positive", "NB"),
            stored("3", "Nobody likes you", 0.7, "neutral", "B"),
        ];
        index.bulk_index(&records, 2, Utc::now()).unwrap();
        index.refresh();
        index
    }

    #[test]
    fn documents_are_searchable_after_refresh() {
        let mut index = MemoryIndex::new("posts");
        index
            .bulk_index(&[stored("1", "hi", 0.1, "neutral", "NB")], 10, Utc::now())
            .unwrap();
        assert_eq!(index.search(&Query::MatchAll, 10).unwrap().total_hits, 0);
        assert_eq!(index.refresh(), 1);
        assert_eq!(index.search(&Query::MatchAll, 10).unwrap().total_hits, 1);
    }

    #[test]
    fn sample_queries_count_matches() {
        let results = populated().run_sample_queries(5).unwrap();
        let totals: Vec<_> = results.iter().map(|(name, r)| (*name, r.total_hits)).collect();
        assert_eq!(
            totals,
            vec![
                ("High toxicity posts", 2),
                ("Negative sentiment posts", 1),
                ("Bullying posts", 2)
            ]
        );
    }

    #[test]
    fn match_and_keyword_queries() {
        let index = populated();
        let hits = index.search(&Query::matching("contenu", "STUPID people"), 10).unwrap();
        assert_eq!(hits.total_hits, 1);
        let exact = index
            .search(&Query::term("original_text.keyword", "Have a nice day"), 10)
            .unwrap();
        assert_eq!(exact.total_hits, 1);
        assert!(index.search(&Query::term("missing", "x"), 10).is_err());
    }

    #[test]
    fn transform_failures_are_counted() {
        let mut index = MemoryIndex::new("posts");
        let records = vec![
            stored("1", "fine", 0.1, "neutral", "NB"),
            Record::new("2".to_string(), json!({"polarity": [1]})),
        ];
        let stats = index.bulk_index(&records, 100, Utc::now()).unwrap();
        assert_eq!(stats, BulkStats { indexed: 1, errors: 1 });
    }

    #[test]
    fn export_writes_action_and_source_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("posts.ndjson");
        let written = populated().export_bulk(&path).unwrap();
        assert_eq!(written, 3);
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> = content.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0]["index"]["_index"], json!("posts"));
        assert_eq!(lines[1]["id_post"], json!("1"));
    }
}
