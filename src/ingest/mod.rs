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

//! # Data Ingestion Module
//!
//! Turns the labeled cyberbullying CSV (`Text`, `Label`, `Types` columns)
//! into [`RawPost`]s ready for the document store.
//!
//! ## Steps
//!
//! 1. Load the CSV, skipping malformed rows
//! 2. Drop exact duplicate rows
//! 3. Fold harassment types and labels to their canonical forms
//! 4. Fill missing labels and types
//! 5. Assign sequential ids and synthetic creation times
//!
//! ```rust
//! use harcelement::config::IngestConfig;
//! use harcelement::ingest::prepare_posts;
//!
//! let posts = prepare_posts(&IngestConfig { seed: Some(7), ..Default::default() })?;
//! ```

pub mod dataset;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::IngestConfig;
use crate::errors::Result;
use crate::post::RawPost;

pub use dataset::{
    generate_post_time, normalize_label, normalize_types, Column, Dataset, DatasetReaderConfig,
    DatasetRow, PostTimeWindow,
};

/// Cleans a loaded dataset in place, logging value and null counts.
pub fn clean_dataset(dataset: &mut Dataset) {
    for column in [Column::Label, Column::Types] {
        log::debug!("{column} values: {:?}", dataset.unique_values(column));
    }
    dataset.drop_duplicate_rows();
    dataset.normalize_types();
    dataset.normalize_labels();
    for column in [Column::Types, Column::Label] {
        let nulls = dataset.null_count(column);
        if nulls > 0 {
            log::info!("column '{column}' has {nulls} missing values");
        }
    }
}

/// Loads, cleans and converts the dataset named by `config`.
pub fn prepare_posts(config: &IngestConfig) -> Result<Vec<RawPost>> {
    let mut dataset = Dataset::load(&config.csv_path)?;
    clean_dataset(&mut dataset);
    let window = PostTimeWindow::new(config.start_date, config.end_date, config.peak_probability)?;
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let posts = dataset.into_posts(&window, &mut rng);
    for (label, count) in label_counts(&posts) {
        log::info!("{label}: {count} posts");
    }
    Ok(posts)
}

fn label_counts(posts: &[RawPost]) -> Vec<(&'static str, usize)> {
    let bullying = posts
        .iter()
        .filter(|post| post.label == crate::post::Label::Bullying)
        .count();
    vec![("B", bullying), ("NB", posts.len() - bullying)]
}
