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

//! `harcelement` command line: ingest the CSV dataset into the document
//! store, enrich the stored posts, publish them to the search index, and
//! report summaries.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use harcelement::config::AppConfig;
use harcelement::index::publish;
use harcelement::ingest::prepare_posts;
use harcelement::pipeline::PipelineBuilder;
use harcelement::store::{DocumentSink, DocumentSource};
use harcelement::{AnalysisSummary, BatchRunner, JsonlStore, NlpToolkit, RawPost, TextNormalizer};

#[derive(Parser, Debug)]
#[command(
    name = "harcelement",
    version,
    about = "Cyberbullying dataset pipeline: normalize, enrich and index labeled posts"
)]
struct Cli {
    /// YAML or JSON configuration file
    #[arg(long, short, env = "HARCELEMENT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// JSONL document store, overriding `store.path`
    #[arg(long, env = "HARCELEMENT_STORE", global = true)]
    store: Option<PathBuf>,

    /// Log level, overriding `logging.level`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the labeled CSV dataset into the document store
    Ingest {
        /// Dataset CSV, overriding `ingest.csv_path`
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Seed for the synthetic post times
        #[arg(long)]
        seed: Option<u64>,

        /// Empty the store before inserting
        #[arg(long)]
        replace: bool,
    },
    /// Normalize and enrich every stored post
    Enrich {
        /// Documents per window, overriding `batch.size`
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Publish stored posts to the search index and write the bulk export
    Index {
        /// Bulk NDJSON export, overriding `index.export_path`
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the index mapping and exit
        #[arg(long)]
        mapping: bool,
    },
    /// Print the analysis summary of the stored posts
    Summary,
    /// Normalize text given as arguments, or stdin lines when none are given
    Normalize { text: Vec<String> },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(store) = &cli.store {
        config = config.with_store_path(store);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level);
    }
    Ok(config)
}

fn open_store(config: &AppConfig) -> Result<JsonlStore> {
    JsonlStore::open(&config.store.path)
        .with_context(|| format!("failed to open store {}", config.store.path.display()))
}

fn print_summary(store: &JsonlStore) -> Result<()> {
    match AnalysisSummary::compute(store.records()) {
        Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
        None => println!("store is empty"),
    }
    Ok(())
}

fn ingest(config: AppConfig, csv: Option<PathBuf>, seed: Option<u64>, replace: bool) -> Result<()> {
    let mut config = config;
    if let Some(csv) = csv {
        config = config.with_csv_path(csv);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let posts = prepare_posts(&config.ingest).with_context(|| {
        format!("failed to load dataset {}", config.ingest.csv_path.display())
    })?;

    let mut store = open_store(&config)?;
    if replace {
        store.clear();
    }
    let written = store.insert_many(posts.iter().map(RawPost::to_record));
    store.flush().context("failed to write store")?;
    println!(
        "loaded {written} posts into {} ({} stored)",
        config.store.path.display(),
        store.len()
    );
    Ok(())
}

fn enrich(config: AppConfig, batch_size: Option<usize>) -> Result<()> {
    let batch_size = batch_size.unwrap_or(config.batch.size);
    let mut store = open_store(&config)?;
    let total = store.count()?;

    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
            .context("invalid progress template")?
            .progress_chars("=> "),
    );
    let reporter = bar.clone();

    let toolkit = Arc::new(NlpToolkit::from_config(&config.nlp));
    let mut runner = BatchRunner::new(Arc::clone(&toolkit), batch_size)?;
    if !config.pipeline.is_empty() {
        let pipeline = PipelineBuilder::with_toolkit(toolkit)
            .defaults()
            .build_from_config(&config.pipeline)
            .context("invalid pipeline steps")?;
        log::info!("extra pipeline stages: {}", pipeline.stage_names().join(", "));
        runner = runner.with_pipeline(pipeline);
    }
    let runner = runner.with_progress(Box::new(move |progress| {
        reporter.set_position(progress.seen as u64);
        reporter.set_message(format!("{} failed", progress.failed));
    }));
    let summary = runner.run(&mut store).context("enrichment run failed")?;
    bar.finish_and_clear();

    println!(
        "finished processing: {} succeeded, {} failed",
        summary.processed(),
        summary.failed()
    );
    print_summary(&store)
}

fn index(config: AppConfig, export: Option<PathBuf>, mapping: bool) -> Result<()> {
    if mapping {
        println!("{}", serde_json::to_string_pretty(&harcelement::index::mapping())?);
        return Ok(());
    }
    let mut config = config;
    if let Some(export) = export {
        config = config.with_export_path(export);
    }
    let store = open_store(&config)?;
    let (_, report) = publish(store.records(), &config.index).context("index publication failed")?;

    println!("successfully indexed: {} documents", report.bulk.indexed);
    println!("errors: {}", report.bulk.errors);
    println!("total documents in index: {}", report.document_count);
    for doc in &report.sample_documents {
        let id: String = doc["id_post"].as_str().unwrap_or_default().chars().take(8).collect();
        let content: String = doc["contenu"].as_str().unwrap_or_default().chars().take(80).collect();
        println!("id: {id}  content: {content}");
        println!(
            "sentiment: {}, toxicity: {:.2}",
            doc["sentiment"].as_str().unwrap_or_default(),
            doc["toxicity_score"].as_f64().unwrap_or_default()
        );
    }
    for query in &report.sample_queries {
        println!("{}: {} matches", query.name, query.total_hits);
    }
    println!("bulk export: {}", config.index.export_path.display());
    Ok(())
}

fn normalize(config: AppConfig, text: Vec<String>) -> Result<()> {
    let normalizer = TextNormalizer::new(Arc::new(NlpToolkit::from_config(&config.nlp)));
    if text.is_empty() {
        for line in io::stdin().lock().lines() {
            println!("{}", normalizer.normalize(&line.context("failed to read stdin")?));
        }
    } else {
        for item in text {
            println!("{}", normalizer.normalize(&item));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    harcelement::logging::init(&config.logging).context("failed to initialize logging")?;

    match cli.command {
        Command::Ingest { csv, seed, replace } => ingest(config, csv, seed, replace),
        Command::Enrich { batch_size } => enrich(config, batch_size),
        Command::Index { export, mapping } => index(config, export, mapping),
        Command::Summary => {
            let store = open_store(&config)?;
            print_summary(&store)
        }
        Command::Normalize { text } => normalize(config, text),
    }
}
