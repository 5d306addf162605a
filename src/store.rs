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

//! # Document Store
//!
//! The batch runner talks to persistence through two traits:
//!
//! - [`DocumentSource`]: counts documents and fetches them with skip/limit
//!   pagination, in a stable order
//! - [`DocumentSink`]: merges partial updates into documents by id, one
//!   bulk write per window
//!
//! [`MemoryStore`] implements both in memory; [`JsonlStore`] wraps it and
//! persists to a JSONL file, one record per line. Flushing writes a sibling
//! temporary file and renames it over the target.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::errors::{Error, Result};
use crate::post::document_id;
use crate::record::{Record, RecordBatch};

/// Partial update addressed to one document.
pub type Patch = Map<String, Value>;

pub trait DocumentSource {
    /// Number of documents available.
    fn count(&self) -> Result<usize>;

    /// Up to `limit` documents starting at position `skip`.
    fn fetch(&self, skip: usize, limit: usize) -> Result<RecordBatch>;
}

pub trait DocumentSink {
    /// Merges `patch` into the document `id`. Returns `false` when no such
    /// document exists, which is not an error.
    fn apply_patch(&mut self, id: &str, patch: &Patch) -> Result<bool>;

    /// Applies a window of patches as one bulk write. The result holds one
    /// flag per patch, in order, telling whether it matched a document.
    fn apply_patches(&mut self, patches: &[(String, Patch)]) -> Result<Vec<bool>> {
        patches
            .iter()
            .map(|(id, patch)| self.apply_patch(id, patch))
            .collect()
    }

    /// Makes applied patches durable.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory store that keeps insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<Record>,
    positions: HashMap<String, usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut store = Self::new();
        store.insert_many(records);
        store
    }

    /// Inserts records. A record whose id is already stored replaces the
    /// stored one in place. Returns the number of records written.
    pub fn insert_many(&mut self, records: impl IntoIterator<Item = Record>) -> usize {
        let mut written = 0;
        for record in records {
            let id = document_id(&record).ok();
            match id.as_ref().and_then(|id| self.positions.get(id)).copied() {
                Some(position) => self.records[position] = record,
                None => {
                    if let Some(id) = id {
                        self.positions.insert(id, self.records.len());
                    }
                    self.records.push(record);
                }
            }
            written += 1;
        }
        written
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.positions.get(id).map(|position| &self.records[*position])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.positions.clear();
    }
}

impl DocumentSource for MemoryStore {
    fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }

    fn fetch(&self, skip: usize, limit: usize) -> Result<RecordBatch> {
        Ok(self.records.iter().skip(skip).take(limit).cloned().collect())
    }
}

impl DocumentSink for MemoryStore {
    fn apply_patch(&mut self, id: &str, patch: &Patch) -> Result<bool> {
        match self.positions.get(id) {
            Some(&position) => {
                self.records[position].merge(patch);
                Ok(true)
            }
            None => {
                log::warn!("no stored document with id {id}; update ignored");
                Ok(false)
            }
        }
    }
}

/// JSONL-backed store. Documents are held in memory and written back on
/// [`flush`](DocumentSink::flush).
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    inner: MemoryStore,
    dirty: bool,
}

impl JsonlStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut inner = MemoryStore::new();
        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let mut records = Vec::new();
            for (line_no, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record: Record = serde_json::from_str(&line).map_err(|err| {
                    Error::collaborator(
                        "jsonl-store",
                        format!("{}:{}: {err}", path.display(), line_no + 1),
                    )
                })?;
                records.push(record);
            }
            inner.insert_many(records);
            log::debug!("opened {} with {} documents", path.display(), inner.len());
        }
        Ok(Self {
            path,
            inner,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn insert_many(&mut self, records: impl IntoIterator<Item = Record>) -> usize {
        let written = self.inner.insert_many(records);
        self.dirty |= written > 0;
        written
    }

    pub fn clear(&mut self) {
        self.dirty |= !self.inner.is_empty();
        self.inner.clear();
    }

    pub fn records(&self) -> &[Record] {
        self.inner.records()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.inner.get(id)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn temp_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("store");
        let parent = self.path.parent().unwrap_or(Path::new("."));
        parent.join(format!(".{stem}.tmp"))
    }

    fn write_all(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for record in self.inner.records() {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl DocumentSource for JsonlStore {
    fn count(&self) -> Result<usize> {
        self.inner.count()
    }

    fn fetch(&self, skip: usize, limit: usize) -> Result<RecordBatch> {
        self.inner.fetch(skip, limit)
    }
}

impl DocumentSink for JsonlStore {
    fn apply_patch(&mut self, id: &str, patch: &Patch) -> Result<bool> {
        let matched = self.inner.apply_patch(id, patch)?;
        self.dirty |= matched;
        Ok(matched)
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty && self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        self.write_all(&temp)
            .and_then(|_| std::fs::rename(&temp, &self.path).map_err(Error::from))
            .map_err(|err| Error::collaborator("jsonl-store", err.to_string()))?;
        self.dirty = false;
        log::debug!("flushed {} documents to {}", self.inner.len(), self.path.display());
        Ok(())
    }
}
