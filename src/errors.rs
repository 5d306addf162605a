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

//! # Error Module
//!
//! This module defines the error types used throughout the pipeline for
//! consistent error handling and reporting.
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem errors from the JSONL store, CSV dataset or exports
//! - **Csv**: Malformed dataset rows
//! - **Schema**: Stored documents that do not have the expected shape
//! - **Validation**: Invalid parameters or record contents
//! - **InputContract**: A stage received input of the wrong kind (for example
//!   stopword removal given a plain string instead of a token sequence)
//! - **Operator**: Failures in operator implementations
//! - **Pipeline**: Pipeline orchestration failures
//! - **Collaborator**: Source, sink or index failures; always fatal to a run
//! - **Serde**: Serialization/deserialization errors
//! - **Config**: Unreadable or invalid configuration files
//! - **Internal**: Unexpected internal failures
//!
//! Per-record failures inside a batch run are not surfaced as `Err`; the
//! runner records them as failed outcomes and continues.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Canonical error enumeration.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
pub enum Error {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Dataset rows that could not be parsed.
    #[error("csv error: {0}")]
    Csv(String),

    /// Errors caused by malformed documents or incompatible data layout.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A pipeline stage was handed input of the wrong kind.
    #[error("input contract violated in '{stage}': {message}")]
    InputContract { stage: String, message: String },

    /// Any failure raised by an operator implementation.
    #[error("operator '{operator}' failed: {message}")]
    Operator { operator: String, message: String },

    /// Failures that occur while orchestrating a pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Failures reported by a source, sink or index collaborator.
    #[error("collaborator '{collaborator}' failed: {message}")]
    Collaborator {
        collaborator: String,
        message: String,
    },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl Error {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct schema errors.
    pub fn schema<T: Into<String>>(message: T) -> Self {
        Error::Schema {
            message: message.into(),
        }
    }

    /// Helper to construct input-contract errors.
    pub fn input_contract(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InputContract {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct operator errors.
    pub fn operator(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Operator {
            operator: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct collaborator errors.
    pub fn collaborator(name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Collaborator {
            collaborator: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Error::Internal(message.into())
    }
}
