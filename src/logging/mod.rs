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

//! # Logging Backend
//!
//! Library code logs through the `log` facade. This module provides the
//! backend the binary installs: a [`Logger`] fanning each record out to a
//! console handler and an optional append-only file handler, each rendering
//! plain text or one JSON object per line.
//!
//! [`init`] installs the logger once; later calls keep the first logger.

pub mod formatters;
pub mod handlers;

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::LogConfig;
use crate::errors::{Error, Result};
use handlers::{ConsoleHandler, FileHandler, LogHandler};

/// Owned copy of a log record handed to the handlers.
#[derive(Clone, Debug)]
pub struct LogLine {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

pub struct Logger {
    threshold: LevelFilter,
    handlers: Vec<Box<dyn LogHandler>>,
}

impl Logger {
    /// Builds the logger described by `config`.
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        let threshold = parse_level(&config.level)?;
        let mut handlers: Vec<Box<dyn LogHandler>> = Vec::new();
        if config.console {
            handlers.push(Box::new(ConsoleHandler::new(config.json)));
        }
        if let Some(path) = &config.file {
            handlers.push(Box::new(FileHandler::open(path, config.json)?));
        }
        Ok(Logger {
            threshold,
            handlers,
        })
    }

    pub fn threshold(&self) -> LevelFilter {
        self.threshold
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.threshold
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = LogLine {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
            timestamp: Utc::now(),
        };
        for handler in &self.handlers {
            handler.handle(&line);
        }
    }

    fn flush(&self) {
        for handler in &self.handlers {
            handler.flush();
        }
    }
}

/// Parses a level name, case-insensitively. `warning` is accepted for `warn`.
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(Error::Config(format!("unknown log level '{other}'"))),
    }
}

/// Installs the global logger. Returns `false` when one was already set.
pub fn init(config: &LogConfig) -> Result<bool> {
    let logger = Logger::from_config(config)?;
    let threshold = logger.threshold();
    match log::set_boxed_logger(Box::new(logger)) {
        Ok(()) => {
            log::set_max_level(threshold);
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::formatters::{JsonFormatter, LineFormatter, TextFormatter};

    fn line(message: &str) -> LogLine {
        LogLine {
            level: Level::Warn,
            target: "harcelement::batch".to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn level_names_parse() {
        assert_eq!(parse_level("WARNING").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level(" debug ").unwrap(), LevelFilter::Debug);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn formatters_render_one_line() {
        let json = JsonFormatter.format(&line("skipping document 4"));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["message"], "skipping document 4");

        let text = TextFormatter.format(&line("skipping document 4"));
        assert!(text.contains("WARN  [harcelement::batch] skipping document 4"));
    }

    #[test]
    fn file_handler_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            level: "info".into(),
            console: false,
            json: true,
            file: Some(dir.path().join("logs").join("run.log")),
        };
        let logger = Logger::from_config(&config).unwrap();
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("test")
                .args(format_args!("first"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("test")
                .args(format_args!("filtered"))
                .build(),
        );
        logger.flush();
        let content = std::fs::read_to_string(dir.path().join("logs").join("run.log")).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("\"first\""));
    }

    #[test]
    fn init_installs_the_global_logger_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("global.log");
        let config = LogConfig {
            level: "info".into(),
            console: false,
            json: false,
            file: Some(path.clone()),
        };
        assert!(init(&config).unwrap());
        log::info!(target: "harcelement::logging", "global logger ready");
        log::logger().flush();
        assert!(!init(&config).unwrap());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("global logger ready"));
    }
}
