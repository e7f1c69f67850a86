// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Pass latency baseline.
//!
//! Generates documents of increasing size, runs a full pass and a pass after
//! a single edit near the middle, and reports timings. Set `RUST_LOG=debug`
//! to see the per-pass log lines.

use std::time::Duration;

use rainbow_braces::syntax::{LanguageDetector, SynopticClassifier};
use rainbow_braces::{BraceOptions, BraceTagger, PassOutcome, PassStats, TextDocument, TextSource, Trigger};
use tracing_subscriber::EnvFilter;

/// Passes slower than this are reported.
const TARGET_PASS_TIME: Duration = Duration::from_millis(100);

const SIZES: [usize; 4] = [100, 1_000, 10_000, 50_000];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Rainbow Braces Pass Baseline ===\n");

    let language = LanguageDetector::new().detect_language("baseline.rs");
    let mut slow = Vec::new();

    for lines in SIZES {
        let text = generate_source(lines);
        let document = TextDocument::new(&text);
        let mut tagger = BraceTagger::new(
            document,
            SynopticClassifier::new(language),
            (),
            language.mode(),
            BraceOptions::default(),
        );

        let full = match tagger.run_pass() {
            Ok(PassOutcome::Completed(stats)) => stats,
            Ok(outcome) => {
                println!("{lines:>6} lines: full pass did not complete ({outcome:?})");
                continue;
            }
            Err(err) => {
                println!("{lines:>6} lines: full pass failed: {err}");
                continue;
            }
        };

        let middle = tagger.source().line_extent(text.len() / 2).start;
        let position = tagger.source_mut().insert(middle, "    (edit);\n");
        let version = tagger.source().current_version();
        let incremental = match tagger.handle(Trigger::Edit { position, version }) {
            Ok(PassOutcome::Completed(stats)) => stats,
            Ok(outcome) => {
                println!("{lines:>6} lines: incremental pass did not complete ({outcome:?})");
                continue;
            }
            Err(err) => {
                println!("{lines:>6} lines: incremental pass failed: {err}");
                continue;
            }
        };

        report(lines, "full", &full);
        report(lines, "incremental", &incremental);

        for (kind, stats) in [("full", &full), ("incremental", &incremental)] {
            if stats.elapsed > TARGET_PASS_TIME {
                slow.push(format!("{lines} lines, {kind} pass: {:?}", stats.elapsed));
            }
        }
    }

    println!();
    if slow.is_empty() {
        println!("All passes within {TARGET_PASS_TIME:?}.");
    } else {
        println!("Passes over {TARGET_PASS_TIME:?}:");
        for entry in &slow {
            println!("  - {entry}");
        }
    }
}

fn report(lines: usize, kind: &str, stats: &PassStats) {
    println!(
        "{lines:>6} lines {kind:>12}: {:>10.2?}  rescan from {:>8}  pairs {:>7} (retained {:>7})  candidates {:>7}",
        stats.elapsed, stats.rescan_start, stats.pairs, stats.retained, stats.candidates
    );
}

fn generate_source(lines: usize) -> String {
    let mut text = String::with_capacity(lines * 40);
    for i in 0..lines {
        match i % 6 {
            0 => text.push_str(&format!("fn item_{i}(input: &[u8]) -> Option<u8> {{\n")),
            1 => text.push_str("    // (comment brackets are ignored]\n"),
            2 => text.push_str("    let s = \"string ( with ) brackets\";\n"),
            3 => text.push_str("    let v = (input[0] + (input[1] * 2)) as u8;\n"),
            4 => text.push_str("    Some(v)\n"),
            _ => text.push_str("}\n"),
        }
    }
    text
}
