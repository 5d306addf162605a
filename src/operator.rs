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

//! # Operator Module
//!
//! Operators transform a batch of [`Record`](crate::record::Record)s and
//! return the processed batch. The built-in text and NLP steps live in
//! [`operators`](crate::operators); anything implementing [`Operator`] can be
//! registered with a [`PipelineBuilder`](crate::pipeline::PipelineBuilder).
//!
//! ```rust
//! use harcelement::operator::Operator;
//! use harcelement::record::RecordBatch;
//! use harcelement::errors::Result;
//!
//! #[derive(Debug)]
//! struct Uppercase;
//!
//! impl Operator for Uppercase {
//!     fn name(&self) -> &'static str {
//!         "text.uppercase"
//!     }
//!
//!     fn apply(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
//!         for record in &mut batch {
//!             if let Some(text) = record.payload["text"].as_str() {
//!                 record.payload["text"] = text.to_uppercase().into();
//!             }
//!         }
//!         Ok(batch)
//!     }
//! }
//! ```

use crate::errors::{Error, Result};
use crate::record::RecordBatch;

/// A named batch transformation.
pub trait Operator: std::fmt::Debug {
    /// Registry name, also used in error messages.
    fn name(&self) -> &'static str;

    /// Processes a batch. An operator may drop, keep or add records.
    fn apply(&self, batch: RecordBatch) -> Result<RecordBatch>;
}

/// Runs `operator`, tagging any failure with the operator name.
///
/// Input-contract violations are passed through untouched so callers can
/// still tell them apart from other operator failures.
pub fn execute_operator(operator: &dyn Operator, batch: RecordBatch) -> Result<RecordBatch> {
    operator.apply(batch).map_err(|err| match err {
        Error::InputContract { .. } => err,
        other => Error::operator(operator.name(), other.to_string()),
    })
}
