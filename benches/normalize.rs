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

//! Normalization and enrichment throughput.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use harcelement::{Enricher, NlpToolkit, TextNormalizer};

const POSTS: &[&str] = &[
    "<p>Hello @user! This is a TEST123 message with https://example.com URL.</p>",
    "You are so stupid and ugly, nobody at school likes you!!!",
    "Congratulations on the new job, the whole team is proud of you",
    "Je ne sais pas pourquoi tu es comme ça avec moi",
    "The cats were running around the garden while the children played",
];

fn bench_normalize(c: &mut Criterion) {
    let toolkit = Arc::new(NlpToolkit::new());
    let normalizer = TextNormalizer::new(Arc::clone(&toolkit));
    let enricher = Enricher::new(toolkit);

    c.bench_function("normalize_single_post", |b| {
        b.iter(|| normalizer.normalize(black_box(POSTS[0])))
    });

    c.bench_function("enrich_single_post", |b| {
        b.iter(|| enricher.enrich(black_box(POSTS[1]), None))
    });

    let mut group = c.benchmark_group("normalize_batch");
    for size in [10usize, 100, 1000] {
        let batch: Vec<&str> = POSTS.iter().copied().cycle().take(size).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| {
                batch
                    .iter()
                    .map(|text| normalizer.normalize(black_box(text)))
                    .collect::<Vec<_>>()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
