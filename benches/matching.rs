use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docket::{parse, Section};

const HEADINGS: &[&str] = &[
    "Permitted Liens",
    "Indebtedness",
    "Restricted Payments",
    "Negative Covenants",
    "Asset Sales",
    "Investments",
    "Events of Default",
    "Financial Covenants",
];

fn build_corpus(n: usize) -> Vec<Section> {
    (0..n)
        .map(|i| {
            Section::new()
                .set("heading", HEADINGS[i % HEADINGS.len()])
                .set("article", "Article VII Negative Covenants")
                .set(
                    "doc_type",
                    if i % 3 == 0 {
                        "credit_agreement"
                    } else {
                        "term_sheet"
                    },
                )
                .set("vintage", 2015 + (i % 10) as i64)
                .set("facility_size_mm", (50 * (i % 40)) as i64)
        })
        .collect()
}

fn bench_matching(c: &mut Criterion) {
    let corpus = build_corpus(1_000);
    let queries = [
        ("term", "heading: liens"),
        (
            "boolean",
            "heading: (liens OR indebtedness) AND NOT doc_type: term_sheet",
        ),
        ("regex", "heading: /invest(ments)?|liens/ vintage: 2021"),
    ];

    let mut group = c.benchmark_group("match_1k_sections");
    for (name, text) in queries {
        let query = parse(text).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                corpus
                    .iter()
                    .filter(|section| query.matches(black_box(section)))
                    .count()
            });
        });
    }
    group.finish();
}

fn bench_threaded(c: &mut Criterion) {
    let corpus = Arc::new(build_corpus(8_000));
    let query = Arc::new(
        parse("heading: (liens OR indebtedness) AND NOT doc_type: term_sheet").unwrap(),
    );

    let mut group = c.benchmark_group("threaded_matching");
    for &threads in &[1_usize, 2, 4] {
        group.bench_function(&format!("{threads}_threads"), |b| {
            b.iter(|| {
                let chunk = corpus.len() / threads;
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let corpus = Arc::clone(&corpus);
                        let query = Arc::clone(&query);
                        thread::spawn(move || {
                            corpus[t * chunk..(t + 1) * chunk]
                                .iter()
                                .filter(|section| query.matches(section))
                                .count()
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap())
                    .sum::<usize>()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_matching, bench_threaded);
criterion_main!(benches);
