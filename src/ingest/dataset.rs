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

//! Labeled CSV dataset: loading, cleanup and conversion to [`RawPost`]s.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::post::{Label, RawPost};

/// Column of the raw dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Text,
    Label,
    Types,
}

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Text => "Text",
            Column::Label => "Label",
            Column::Types => "Types",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One dataset row. Empty cells are missing values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetRow {
    pub text: Option<String>,
    pub label: Option<String>,
    pub types: Option<String>,
}

impl DatasetRow {
    pub fn get(&self, column: Column) -> Option<&str> {
        match column {
            Column::Text => self.text.as_deref(),
            Column::Label => self.label.as_deref(),
            Column::Types => self.types.as_deref(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatasetReaderConfig {
    pub skip_errors: bool,
    pub max_errors: usize,
}

impl Default for DatasetReaderConfig {
    fn default() -> Self {
        Self {
            skip_errors: true,
            max_errors: 100,
        }
    }
}

/// Window and evening-peak probability for synthetic post times.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostTimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub peak_probability: f64,
}

impl PostTimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate, peak_probability: f64) -> Result<Self> {
        if start > end {
            return Err(Error::validation("post time window starts after it ends"));
        }
        Ok(Self {
            start,
            end,
            peak_probability,
        })
    }
}

const TYPE_ALIASES: &[(&str, &str)] = &[
    ("religious", "religion"),
    ("religon", "religion"),
    ("ethnically", "ethnicity"),
    ("racism", "ethnicity"),
    ("threat", "threats"),
    ("vocation", "vocational"),
    ("saxual", "sexual"),
];

/// Trims and lowercases a harassment type and folds known misspellings.
pub fn normalize_types(value: &str) -> String {
    let folded = value.trim().to_lowercase();
    TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == folded)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(folded)
}

/// Maps a free-form label to a label: anything starting with `n` is
/// NotBullying, anything else Bullying. Blank values are missing.
pub fn normalize_label(value: &str) -> Option<Label> {
    let folded = value.trim().to_lowercase();
    match folded.chars().next()? {
        'n' => Some(Label::NotBullying),
        _ => Some(Label::Bullying),
    }
}

/// Random post time: a uniform day of the window plus a uniform second of
/// that day. With `peak_probability` the time of day is redrawn within
/// 18:00:00..=22:59:59.
pub fn generate_post_time<R: Rng + ?Sized>(window: &PostTimeWindow, rng: &mut R) -> DateTime<Utc> {
    let days = (window.end - window.start).num_days().max(0);
    let day = window.start + Duration::days(rng.gen_range(0..=days));
    let second = rng.gen_range(0..24 * 3600);
    let mut time = day.and_time(chrono::NaiveTime::MIN) + Duration::seconds(second);

    if rng.gen::<f64>() < window.peak_probability {
        let hour = rng.gen_range(18..=22);
        let minute = rng.gen_range(0..=59);
        let second = rng.gen_range(0..=59);
        if let Some(peak) = time.date().and_hms_opt(hour, minute, second) {
            time = peak;
        }
    }
    time.and_utc()
}

/// In-memory labeled dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, &DatasetReaderConfig::default())
    }

    pub fn load_with(path: impl AsRef<Path>, config: &DatasetReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| Error::Io(format!("{}: {err}", path.display())))?;
        let dataset = Self::from_reader(file, config)?;
        log::info!("loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Reads CSV with a header row. Header names are matched
    /// case-insensitively; the `Text` column is required.
    pub fn from_reader<R: Read>(reader: R, config: &DatasetReaderConfig) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let position = |column: Column| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column.header()))
        };
        let text_at = position(Column::Text)
            .ok_or_else(|| Error::schema("dataset has no 'Text' column"))?;
        let label_at = position(Column::Label);
        let types_at = position(Column::Types);

        let cell = |record: &csv::StringRecord, at: Option<usize>| {
            at.and_then(|i| record.get(i))
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string)
        };

        let mut rows = Vec::new();
        let mut errors = 0;
        for (idx, result) in csv_reader.records().enumerate() {
            match result {
                Ok(record) => rows.push(DatasetRow {
                    text: cell(&record, Some(text_at)),
                    label: cell(&record, label_at),
                    types: cell(&record, types_at),
                }),
                Err(err) => {
                    errors += 1;
                    if !config.skip_errors || errors > config.max_errors {
                        return Err(Error::Csv(format!(
                            "too many errors ({errors}): last error at row {idx}: {err}"
                        )));
                    }
                    log::warn!("skipping invalid CSV row {idx}: {err}");
                }
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes exact duplicate rows, keeping first occurrences. Returns the
    /// number removed.
    pub fn drop_duplicate_rows(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(row.clone()));
        let dropped = before - self.rows.len();
        log::info!(
            "dropped {dropped} duplicate rows, {} records remain",
            self.rows.len()
        );
        dropped
    }

    /// Applies [`normalize_types`] to every present type.
    pub fn normalize_types(&mut self) {
        for row in &mut self.rows {
            if let Some(types) = row.types.as_deref() {
                row.types = Some(normalize_types(types));
            }
        }
    }

    /// Rewrites every present label to its code (`B` or `NB`).
    pub fn normalize_labels(&mut self) {
        for row in &mut self.rows {
            row.label = row
                .label
                .as_deref()
                .and_then(normalize_label)
                .map(|label| label.code().to_string());
        }
    }

    /// Distinct values of `column` in order of first appearance.
    pub fn unique_values(&self, column: Column) -> Vec<Option<String>> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| row.get(column).map(str::to_string))
            .filter(|value| seen.insert(value.clone()))
            .collect()
    }

    /// Occurrences of each present value of `column`, most frequent first.
    pub fn value_counts(&self, column: Column) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for value in self.rows.iter().filter_map(|row| row.get(column)) {
            *counts.entry(value).or_insert(0) += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(value, count)| (value.to_string(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    pub fn null_count(&self, column: Column) -> usize {
        self.rows.iter().filter(|row| row.get(column).is_none()).count()
    }

    /// Converts the rows into posts. Missing labels become NotBullying;
    /// missing types become `none` (NotBullying) or `unknown` (Bullying).
    /// Ids run from 1 in row order.
    pub fn into_posts<R: Rng + ?Sized>(self, window: &PostTimeWindow, rng: &mut R) -> Vec<RawPost> {
        self.rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                let label = row
                    .label
                    .as_deref()
                    .and_then(Label::parse)
                    .unwrap_or(Label::NotBullying);
                let post_type = row.types.unwrap_or_else(|| match label {
                    Label::NotBullying => "none".to_string(),
                    Label::Bullying => "unknown".to_string(),
                });
                RawPost {
                    id: (idx + 1).to_string(),
                    text: row.text.unwrap_or_default(),
                    label,
                    post_type,
                    created_at: generate_post_time(window, rng),
                }
            })
            .collect()
    }
}
