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

//! # Pipeline Module
//!
//! A [`Pipeline`] is a linear sequence of operators. [`PipelineBuilder`]
//! instantiates operators by name from configuration steps of the form
//! `{"operator": "text.normalize", "config": {...}}`.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{Error, Result};
use crate::operator::{execute_operator, Operator};
use crate::operators::{nlp, text};
use crate::record::RecordBatch;
use crate::toolkit::NlpToolkit;

/// Builds one operator from its config, sharing the builder's toolkit.
pub type OperatorFactory =
    fn(&Value, &Arc<NlpToolkit>) -> Result<Box<dyn Operator + Send + Sync>>;

/// Simple linear pipeline composed of sequential operators.
#[derive(Debug)]
pub struct Pipeline {
    stages: Vec<Box<dyn Operator + Send + Sync>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Operator + Send + Sync>>) -> Self {
        Pipeline { stages }
    }

    /// Names of the stages in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Runs the pipeline, passing the batch through each operator in turn.
    pub fn run(&self, mut batch: RecordBatch) -> Result<RecordBatch> {
        for stage in &self.stages {
            batch = execute_operator(stage.as_ref(), batch)?;
        }
        Ok(batch)
    }

    /// Runs the pipeline over consecutive chunks of `chunk_size` records.
    pub fn run_chunked(&self, batch: RecordBatch, chunk_size: usize) -> Result<RecordBatch> {
        if chunk_size == 0 {
            return Err(Error::validation("chunk size must be positive"));
        }
        let mut out = Vec::with_capacity(batch.len());
        let mut pending = batch.into_iter().peekable();
        while pending.peek().is_some() {
            let chunk: RecordBatch = pending.by_ref().take(chunk_size).collect();
            out.extend(self.run(chunk)?);
        }
        Ok(out)
    }

    /// Ensures the pipeline contains at least one stage.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(Error::pipeline("pipeline", "no stages configured"));
        }
        Ok(())
    }
}

/// Builder that knows how to instantiate operators from configuration.
pub struct PipelineBuilder {
    factories: HashMap<String, OperatorFactory>,
    toolkit: Arc<NlpToolkit>,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    /// Creates an empty builder with a fresh toolkit.
    pub fn new() -> Self {
        Self::with_toolkit(Arc::new(NlpToolkit::new()))
    }

    /// Creates an empty builder whose operators share `toolkit`.
    pub fn with_toolkit(toolkit: Arc<NlpToolkit>) -> Self {
        PipelineBuilder {
            factories: HashMap::new(),
            toolkit,
        }
    }

    /// Creates a builder pre-loaded with the bundled operators.
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        builder.register_defaults();
        builder
    }

    /// Registers the bundled operators on this builder.
    pub fn defaults(mut self) -> Self {
        self.register_defaults();
        self
    }

    /// Registers a factory for the given operator name, replacing any
    /// previous registration.
    pub fn register(&mut self, name: impl Into<String>, factory: OperatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    fn register_defaults(&mut self) {
        self.register("text.normalize", text::normalize_factory);
        self.register("text.tokenize", text::tokenize_factory);
        self.register("text.stopwords", text::stopwords_factory);
        self.register("text.lemmatize", text::lemmatize_factory);
        self.register("nlp.language", nlp::language_factory);
        self.register("nlp.sentiment", nlp::sentiment_factory);
        self.register("nlp.toxicity", nlp::toxicity_factory);
    }

    /// Builds a pipeline from a sequence of configuration steps.
    pub fn build_from_config(&self, steps: &[Value]) -> Result<Pipeline> {
        let mut stages = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            let object = step.as_object().ok_or_else(|| {
                Error::validation(format!("pipeline step #{index} must be an object"))
            })?;

            let operator_name = object
                .get("operator")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    Error::validation(format!("pipeline step #{index} missing string 'operator'"))
                })?;

            let factory = self.factories.get(operator_name).ok_or_else(|| {
                Error::validation(format!("unknown operator '{operator_name}'"))
            })?;

            let config_value = object.get("config").cloned().unwrap_or(Value::Null);
            stages.push(factory(&config_value, &self.toolkit)?);
        }

        let pipeline = Pipeline::new(stages);
        pipeline.validate()?;
        Ok(pipeline)
    }
}
