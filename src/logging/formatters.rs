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

use serde_json::{json, Value};

use crate::logging::LogLine;

/// Renders a log line as one output line.
pub trait LineFormatter: Send + Sync {
    fn format(&self, line: &LogLine) -> String;
}

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn to_json(line: &LogLine) -> Value {
        json!({
            "timestamp": line.timestamp.to_rfc3339(),
            "level": line.level.as_str(),
            "target": line.target,
            "message": line.message,
        })
    }
}

impl LineFormatter for JsonFormatter {
    fn format(&self, line: &LogLine) -> String {
        Self::to_json(line).to_string()
    }
}

pub struct TextFormatter;

impl LineFormatter for TextFormatter {
    fn format(&self, line: &LogLine) -> String {
        format!(
            "{} {:<5} [{}] {}",
            line.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            line.level.as_str(),
            line.target,
            line.message
        )
    }
}

pub(crate) fn formatter(json: bool) -> Box<dyn LineFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TextFormatter)
    }
}
