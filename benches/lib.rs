// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rainbow_braces::braces::{BracketScanner, match_pairs};
use rainbow_braces::syntax::DisallowList;
use rainbow_braces::{
    BraceOptions, BraceTagger, LanguageMode, TextDocument, TextSource, TokenSpan, Trigger,
};

fn generate_source(lines: usize) -> String {
    let mut text = String::with_capacity(lines * 40);
    for i in 0..lines {
        match i % 5 {
            0 => text.push_str(&format!("fn item_{i}(input: &[u8]) -> Option<u8> {{\n")),
            1 => text.push_str("    let v = (input[0] + (input[1] * 2)) as u8;\n"),
            2 => text.push_str("    let w = [v; 4].map(|x| { x + 1 });\n"),
            3 => text.push_str("    Some(w[0])\n"),
            _ => text.push_str("}\n"),
        }
    }
    text
}

fn tagger(text: &str) -> BraceTagger<TextDocument, Vec<TokenSpan>, ()> {
    BraceTagger::new(
        TextDocument::new(text),
        Vec::new(),
        (),
        LanguageMode::Standard,
        BraceOptions::default(),
    )
}

fn bench_scan(c: &mut Criterion) {
    let text = generate_source(10_000);
    let disallow = DisallowList::default();
    let scanner = BracketScanner::default();

    c.bench_function("scan_and_match_10k_lines", |b| {
        b.iter(|| match_pairs(scanner.scan(black_box(&text), 0, &disallow)))
    });
}

fn bench_passes(c: &mut Criterion) {
    let text = generate_source(10_000);

    c.bench_function("full_pass_10k_lines", |b| {
        b.iter_batched(
            || tagger(&text),
            |mut tagger| tagger.run_pass(),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("edit_pass_10k_lines", |b| {
        b.iter_batched(
            || {
                let mut tagger = tagger(&text);
                let _ = tagger.run_pass();
                let middle = tagger.source().line_extent(text.len() / 2).start;
                let position = tagger.source_mut().insert(middle, "    (x);\n");
                let version = tagger.source().current_version();
                (tagger, Trigger::Edit { position, version })
            },
            |(mut tagger, trigger)| tagger.handle(trigger),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_scan, bench_passes);
criterion_main!(benches);
