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

//! # Configuration
//!
//! [`AppConfig`] gathers every tunable of the pipeline. It is read from a
//! YAML file (`.yaml`/`.yml`) or a JSON file (any other extension); every
//! section and field is optional and falls back to the defaults below.
//!
//! ```yaml
//! store:
//!   path: data/posts.jsonl
//! batch:
//!   size: 50
//! ingest:
//!   csv_path: data/cyberbullying.csv
//!   start_date: 2024-01-01
//!   end_date: 2024-12-31
//!   peak_probability: 0.6
//!   seed: 7
//! index:
//!   name: harcelement_posts
//!   chunk_size: 100
//!   export_path: data/harcelement_posts.ndjson
//! nlp:
//!   pos_tagging: true
//! logging:
//!   level: info
//!   console: true
//!   json: false
//!   file: logs/harcelement.log
//! pipeline:
//!   - operator: text.tokenize
//!     config:
//!       path: payload.preprocessed_text
//!       target: payload.tokens
//! ```
//!
//! `pipeline` lists extra operator steps the `enrich` command runs on every
//! document after the built-in normalization and enrichment.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Error, Result};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// JSONL document store file.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/posts.jsonl"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    pub size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            size: crate::batch::DEFAULT_BATCH_SIZE,
        }
    }
}

/// Dataset loading and synthetic timestamp generation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    pub csv_path: PathBuf,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Probability that a generated time falls in the evening peak.
    pub peak_probability: f64,
    /// Fixed RNG seed; unseeded runs draw from entropy.
    pub seed: Option<u64>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/cyberbullying.csv"),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN),
            peak_probability: 0.6,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndexConfig {
    pub name: String,
    pub chunk_size: usize,
    /// Bulk NDJSON export written by the `index` command.
    pub export_path: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: "harcelement_posts".to_string(),
            chunk_size: 100,
            export_path: PathBuf::from("data/harcelement_posts.ndjson"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NlpConfig {
    /// Tag tokens before lemmatizing; off means every token is a noun.
    pub pos_tagging: bool,
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self { pos_tagging: true }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub level: String,
    pub console: bool,
    /// One JSON object per line instead of plain text.
    pub json: bool,
    /// Append-only log file, disabled when absent.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            json: false,
            file: None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub batch: BatchConfig,
    pub ingest: IngestConfig,
    pub index: IndexConfig,
    pub nlp: NlpConfig,
    pub logging: LogConfig,
    /// Operator steps, `{"operator": name, "config": {...}}`.
    pub pipeline: Vec<Value>,
}

impl AppConfig {
    /// Loads a configuration file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            _ => Self::from_json(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|err| Error::Config(err.to_string()))
    }

    /// Rejects values no run can work with.
    pub fn validate(&self) -> Result<()> {
        if self.batch.size == 0 {
            return Err(Error::Config("batch.size must be positive".into()));
        }
        if self.index.chunk_size == 0 {
            return Err(Error::Config("index.chunk_size must be positive".into()));
        }
        if self.ingest.start_date > self.ingest.end_date {
            return Err(Error::Config(
                "ingest.start_date must not be after ingest.end_date".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.ingest.peak_probability) {
            return Err(Error::Config(
                "ingest.peak_probability must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store.path = path.into();
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch.size = size;
        self
    }

    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ingest.csv_path = path.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ingest.seed = Some(seed);
        self
    }

    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index.export_path = path.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml("batch:\n  size: 10\nnlp:\n  pos_tagging: false\n").unwrap();
        assert_eq!(config.batch.size, 10);
        assert!(!config.nlp.pos_tagging);
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.index.name, "harcelement_posts");
        assert_eq!(config.ingest.peak_probability, 0.6);
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("config.yml");
        std::fs::write(&yaml, "ingest:\n  start_date: 2024-02-01\n  seed: 3\n").unwrap();
        let config = AppConfig::load(&yaml).unwrap();
        assert_eq!(config.ingest.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(config.ingest.seed, Some(3));

        let json = dir.path().join("config.json");
        std::fs::write(&json, r#"{"index": {"chunk_size": 25}}"#).unwrap();
        assert_eq!(AppConfig::load(&json).unwrap().index.chunk_size, 25);
    }

    #[test]
    fn pipeline_steps_are_read_from_yaml() {
        let config = AppConfig::from_yaml(
            "pipeline:\n  - operator: text.tokenize\n    config:\n      target: payload.tokens\n",
        )
        .unwrap();
        assert_eq!(config.pipeline.len(), 1);
        assert_eq!(config.pipeline[0]["operator"], "text.tokenize");
        assert!(AppConfig::default().pipeline.is_empty());
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "batch:\n  size: 0\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(Error::Config(_))));
        assert!(matches!(
            AppConfig::load(dir.path().join("missing.yaml")),
            Err(Error::Config(_))
        ));
    }
}
