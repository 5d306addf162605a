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

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::Result;
use crate::logging::formatters::{formatter, LineFormatter};
use crate::logging::LogLine;

pub trait LogHandler: Send + Sync {
    fn handle(&self, line: &LogLine);

    fn flush(&self) {}
}

/// Writes to standard error so command output on stdout stays clean.
pub struct ConsoleHandler {
    formatter: Box<dyn LineFormatter>,
}

impl ConsoleHandler {
    pub fn new(json: bool) -> Self {
        ConsoleHandler {
            formatter: formatter(json),
        }
    }
}

impl LogHandler for ConsoleHandler {
    fn handle(&self, line: &LogLine) {
        eprintln!("{}", self.formatter.format(line));
    }
}

/// Appends to a file, creating it and its parent directories on open.
pub struct FileHandler {
    path: PathBuf,
    formatter: Box<dyn LineFormatter>,
    file: Mutex<File>,
}

impl FileHandler {
    pub fn open(path: impl AsRef<Path>, json: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(FileHandler {
            path,
            formatter: formatter(json),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogHandler for FileHandler {
    fn handle(&self, line: &LogLine) {
        let rendered = self.formatter.format(line);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{rendered}");
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}
