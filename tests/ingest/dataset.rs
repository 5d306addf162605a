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

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Timelike};
use harcelement::config::IngestConfig;
use harcelement::errors::Error;
use harcelement::ingest::{
    clean_dataset, generate_post_time, prepare_posts, Column, Dataset, DatasetReaderConfig,
    PostTimeWindow,
};
use harcelement::Label;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn fixture() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/posts.csv"))
}

fn seeded_config(seed: u64) -> IngestConfig {
    IngestConfig {
        csv_path: fixture(),
        seed: Some(seed),
        ..IngestConfig::default()
    }
}

#[test]
fn malformed_rows_are_skipped_and_blank_cells_are_missing() {
    let dataset = Dataset::load(fixture()).unwrap();
    assert_eq!(dataset.len(), 7);
    assert_eq!(dataset.null_count(Column::Label), 1);
    assert_eq!(dataset.null_count(Column::Types), 4);
    assert_eq!(dataset.rows()[0].get(Column::Types), Some("Religon"));
}

#[test]
fn strict_reader_fails_on_malformed_rows() {
    let strict = DatasetReaderConfig {
        skip_errors: false,
        ..DatasetReaderConfig::default()
    };
    assert!(matches!(Dataset::load_with(fixture(), &strict), Err(Error::Csv(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(Dataset::load("/definitely/not/here.csv"), Err(Error::Io(_))));
}

#[test]
fn missing_text_column_is_a_schema_error() {
    let csv = "Label,Types\nBullying,threat\n";
    let result = Dataset::from_reader(csv.as_bytes(), &DatasetReaderConfig::default());
    assert!(matches!(result, Err(Error::Schema { .. })));
}

#[test]
fn cleanup_dedups_and_folds_values() {
    let mut dataset = Dataset::load(fixture()).unwrap();
    clean_dataset(&mut dataset);

    assert_eq!(dataset.len(), 6);
    let types: Vec<_> = dataset.rows().iter().map(|row| row.get(Column::Types)).collect();
    assert_eq!(
        types,
        vec![Some("religion"), None, Some("ethnicity"), None, None, Some("vocational")]
    );
    assert_eq!(
        dataset.value_counts(Column::Label),
        vec![("B".to_string(), 3), ("NB".to_string(), 2)]
    );
}

#[test]
fn posts_get_sequential_ids_and_defaults() {
    let posts = prepare_posts(&seeded_config(7)).unwrap();
    assert_eq!(posts.len(), 6);

    let ids: Vec<_> = posts.iter().map(|post| post.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6"]);

    let labels: Vec<_> = posts.iter().map(|post| post.label).collect();
    assert_eq!(
        labels,
        vec![
            Label::Bullying,
            Label::NotBullying,
            Label::Bullying,
            Label::NotBullying,
            Label::Bullying,
            Label::NotBullying,
        ]
    );

    let types: Vec<_> = posts.iter().map(|post| post.post_type.as_str()).collect();
    assert_eq!(
        types,
        vec!["religion", "none", "ethnicity", "none", "unknown", "vocational"]
    );
    assert!(posts.iter().all(|post| post.created_at.year() == 2024));
}

#[test]
fn seeded_ingestion_is_reproducible() {
    let first = prepare_posts(&seeded_config(42)).unwrap();
    let second = prepare_posts(&seeded_config(42)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn inverted_time_window_is_rejected() {
    let config = IngestConfig {
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ..seeded_config(1)
    };
    assert!(prepare_posts(&config).is_err());
}

#[test]
fn certain_peak_puts_every_post_in_the_evening() {
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let window = PostTimeWindow::new(day, day, 1.0).unwrap();
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..200 {
        let time = generate_post_time(&window, &mut rng);
        assert_eq!(time.date_naive(), day);
        assert!((18..=22).contains(&time.hour()));
    }
}
