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

use std::sync::Arc;

use harcelement::errors::Error;
use harcelement::{execute_operator, NlpToolkit, Operator, PipelineBuilder, Record, RecordBatch};
use serde_json::{json, Map};

#[derive(Debug)]
struct Rejecting;

impl Operator for Rejecting {
    fn name(&self) -> &'static str {
        "rejecting"
    }

    fn apply(&self, _batch: RecordBatch) -> harcelement::Result<RecordBatch> {
        Err(Error::validation("nothing passes"))
    }
}

fn posts() -> RecordBatch {
    vec![
        Record::new(
            "1".to_string(),
            json!({"text": "I hate you, you are stupid and ugly!", "label": "B"}),
        ),
        Record::new("2".to_string(), json!({"text": "The cats were running", "label": "NB"})),
    ]
}

#[test]
fn staged_chain_matches_the_normalizer() {
    let builder = PipelineBuilder::with_toolkit(Arc::new(NlpToolkit::new())).defaults();
    let staged = builder
        .build_from_config(&[
            json!({"operator": "text.tokenize"}),
            json!({"operator": "text.stopwords"}),
            json!({"operator": "text.lemmatize", "config": {"joined": "payload.staged"}}),
            json!({"operator": "text.normalize"}),
        ])
        .unwrap();
    assert_eq!(
        staged.stage_names(),
        vec!["text.tokenize", "text.stopwords", "text.lemmatize", "text.normalize"]
    );

    let out = staged.run(posts()).unwrap();
    for record in &out {
        assert_eq!(record.payload["staged"], record.payload["preprocessed_text"]);
    }
    assert_eq!(out[1].payload["preprocessed_text"], json!("cat run"));
    assert_eq!(out[1].metadata.as_ref().unwrap()["tokens"], json!(["cat", "run"]));
}

#[test]
fn enrichment_chain_writes_metadata() {
    let pipeline = PipelineBuilder::with_defaults()
        .build_from_config(&[
            json!({"operator": "nlp.language"}),
            json!({"operator": "nlp.sentiment"}),
            json!({"operator": "nlp.toxicity"}),
        ])
        .unwrap();
    let out = pipeline.run(posts()).unwrap();

    let bullying = out[0].metadata.as_ref().unwrap();
    assert_eq!(bullying["language"], json!("en"));
    assert_eq!(bullying["sentiment"]["sentiment"], json!("negative"));
    assert_eq!(bullying["toxicity_score"], json!(0.9));

    let neutral = out[1].metadata.as_ref().unwrap();
    assert_eq!(neutral["sentiment"]["sentiment"], json!("neutral"));
    assert_eq!(neutral["toxicity_score"], json!(0.1));
}

#[test]
fn token_stage_without_tokens_breaks_its_input_contract() {
    let pipeline = PipelineBuilder::with_defaults()
        .build_from_config(&[json!({"operator": "text.stopwords"})])
        .unwrap();
    let err = pipeline.run(posts()).unwrap_err();
    assert!(matches!(err, Error::InputContract { ref stage, .. } if stage == "text.stopwords"));

    let mut record = Record::new(None, json!({"text": "hi"}));
    record.metadata = Some(Map::from_iter([("tokens".to_string(), json!("just a string"))]));
    let err = pipeline.run(vec![record]).unwrap_err();
    assert!(matches!(err, Error::InputContract { .. }));
}

#[test]
fn execute_operator_names_the_failing_operator() {
    let err = execute_operator(&Rejecting, posts()).unwrap_err();
    match err {
        Error::Operator { operator, message } => {
            assert_eq!(operator, "rejecting");
            assert!(message.contains("nothing passes"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn bad_step_configs_are_rejected() {
    let builder = PipelineBuilder::with_defaults();
    assert!(builder
        .build_from_config(&[json!({"operator": "text.normalize", "config": "oops"})])
        .is_err());
    assert!(builder
        .build_from_config(&[json!({"operator": "text.lemmatize", "config": {"joined": 5}})])
        .is_err());
    assert!(builder.build_from_config(&[json!({"config": {}})]).is_err());
}
