// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rainbow_braces::braces::{BracketScanner, match_pairs};
use rainbow_braces::syntax::{DisallowList, LanguageDetector, SynopticClassifier};
use rainbow_braces::{
    BraceKind, BraceOptions, BracePair, BraceTagger, Category, ClassificationSource, ClassifyError,
    DocumentVersion, LanguageMode, PassError, PassOutcome, PassStats, Span, TagRecord, TextDocument,
    TextSource, TokenSpan, Trigger,
};

fn tagger(text: &str, options: BraceOptions) -> BraceTagger<TextDocument, Vec<TokenSpan>, ()> {
    BraceTagger::new(TextDocument::new(text), Vec::new(), (), LanguageMode::Standard, options)
}

fn completed(outcome: PassOutcome) -> PassStats {
    match outcome {
        PassOutcome::Completed(stats) => stats,
        other => panic!("expected a completed pass, got {other:?}"),
    }
}

fn full_pairs(text: &str) -> Vec<BracePair> {
    match_pairs(BracketScanner::default().scan(text, 0, &DisallowList::default()))
}

fn colors(tags: &[TagRecord]) -> Vec<(usize, usize)> {
    tags.iter().map(|tag| (tag.span.start, tag.color_index)).collect()
}

#[test]
fn test_unbalanced_open_is_tagged() {
    let mut tagger = tagger("(()", BraceOptions::default());
    completed(tagger.run_pass().unwrap());

    assert_eq!(colors(&tagger.get_tags(Span::new(0, 3))), vec![(0, 0), (1, 1), (2, 1)]);
}

#[test]
fn test_cycle_wraps_around() {
    let options = BraceOptions {
        cycle_length: 3,
        ..BraceOptions::default()
    };
    let mut tagger = tagger("(((())))", options);
    completed(tagger.run_pass().unwrap());

    let mut tags = colors(&tagger.get_tags(Span::new(0, 8)));
    tags.sort();
    assert_eq!(
        tags,
        vec![(0, 0), (1, 1), (2, 2), (3, 0), (4, 0), (5, 2), (6, 1), (7, 0)]
    );
}

#[test]
fn test_kinds_nest_independently() {
    let mut tagger = tagger("{[(x)]}", BraceOptions::default());
    completed(tagger.run_pass().unwrap());

    let tags = tagger.get_tags(Span::new(0, 7));
    assert_eq!(tags.len(), 6);
    assert!(tags.iter().all(|tag| tag.color_index == 0));
}

#[test]
fn test_pairs_are_balanced() {
    let text = "fn f(a: [u8; 2]) { g(a[0], {b}) }\n)]}\n{(";
    let mut tagger = tagger(text, BraceOptions::default());
    completed(tagger.run_pass().unwrap());

    let bytes = text.as_bytes();
    let mut seen = std::collections::HashSet::new();
    for pair in tagger.cache().pairs() {
        assert_eq!(bytes[pair.open.start] as char, pair.kind.open_char());
        assert!(seen.insert(pair.open.start));
        if pair.is_closed() {
            assert!(pair.open.end <= pair.close.start);
            assert_eq!(bytes[pair.close.start] as char, pair.kind.close_char());
            assert!(seen.insert(pair.close.start));
        }
        assert!(pair.level >= 1);
    }
}

#[test]
fn test_disallowed_spans_are_never_tagged() {
    let text = "f(x) // (y]\nz\"{\"";
    let tokens = vec![
        TokenSpan::new(5..11, Category::Comment),
        TokenSpan::new(13..16, Category::String),
        TokenSpan::new(1..2, Category::Punctuation),
    ];
    let mut tagger =
        BraceTagger::new(TextDocument::new(text), tokens, (), LanguageMode::Standard, BraceOptions::default());
    completed(tagger.run_pass().unwrap());

    let tagged: Vec<usize> = tagger.get_tags(Span::new(0, text.len())).iter().map(|t| t.span.start).collect();
    assert_eq!(tagged, vec![1, 3]);
}

#[test]
fn test_line_limit_is_inclusive() {
    let options = BraceOptions {
        max_document_lines: 5,
        ..BraceOptions::default()
    };

    let mut at_limit = tagger("(\n\n\n\n)", options.clone());
    assert_eq!(at_limit.source().line_count(), 5);
    completed(at_limit.run_pass().unwrap());

    let mut over_limit = tagger("(\n\n\n\n\n)", options);
    assert_eq!(over_limit.run_pass().unwrap(), PassOutcome::TooLarge { line_count: 6 });
    assert!(over_limit.get_tags(Span::new(0, 6)).is_empty());
}

#[test]
fn test_edit_keeps_pairs_above_edit_line() {
    let text = "fn a() { (1) }\nfn b() { [2] }\nfn c() { {3} }\n";
    let mut tagger = tagger(text, BraceOptions::default());
    completed(tagger.run_pass().unwrap());
    let line_two = 15;
    let above: Vec<BracePair> =
        tagger.cache().pairs().iter().copied().filter(|pair| pair.close.end <= line_two).collect();

    let position = tagger.source_mut().insert(line_two + 10, "(");
    let version = tagger.source().current_version();
    let stats = completed(tagger.handle(Trigger::Edit { position, version }).unwrap());

    assert_eq!(stats.rescan_start, line_two);
    assert_eq!(stats.retained, above.len());
    for pair in &above {
        assert!(tagger.cache().pairs().contains(pair));
    }
    assert_eq!(tagger.cache().pairs(), full_pairs(&tagger.source().to_text()).as_slice());
}

#[test]
fn test_scrolling_extends_scanned_range() {
    let text: String = (0..200).map(|i| format!("f{i}({{ [{i}] }})\n")).collect();
    let options = BraceOptions {
        viewport_overflow: 0,
        ..BraceOptions::default()
    };
    let mut tagger = tagger(&text, options);
    tagger.source_mut().scroll_to_lines(0, 9);

    let first = completed(tagger.run_pass().unwrap());
    assert!(first.scanned_end < text.len());

    tagger.source_mut().scroll_to_lines(150, 159);
    let second = completed(tagger.handle(Trigger::ViewportChanged).unwrap());
    assert_eq!(second.rescan_start, first.scanned_end);
    assert!(second.scanned_end >= tagger.source().visible_range().end);

    let expected: Vec<BracePair> =
        full_pairs(&text).into_iter().filter(|pair| pair.open.end <= second.scanned_end).collect();
    assert_eq!(tagger.cache().pairs(), expected.as_slice());
}

/// Fails while the shared flag is set.
struct FlakyClassifier {
    failing: Arc<AtomicBool>,
}

impl ClassificationSource for FlakyClassifier {
    fn classified_spans(&mut self, _source: &dyn TextSource, _range: Span) -> Result<Vec<TokenSpan>, ClassifyError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ClassifyError::Unavailable("tokenizer busy".into()))
        } else {
            Ok(Vec::new())
        }
    }
}

#[test]
fn test_classification_failure_keeps_tags_and_pending_edit() {
    let failing = Arc::new(AtomicBool::new(false));
    let classifier = FlakyClassifier {
        failing: Arc::clone(&failing),
    };
    let mut tagger = BraceTagger::new(
        TextDocument::new("(a)\n(b)\n"),
        classifier,
        (),
        LanguageMode::Standard,
        BraceOptions::default(),
    );
    completed(tagger.run_pass().unwrap());
    let before = tagger.get_tags(Span::new(0, 8));

    failing.store(true, Ordering::SeqCst);
    let position = tagger.source_mut().insert(4, "[");
    let version = tagger.source().current_version();
    let err = tagger.handle(Trigger::Edit { position, version }).unwrap_err();
    assert!(matches!(err, PassError::Classification(_)));
    assert_eq!(tagger.get_tags(Span::new(0, 9)), before);

    failing.store(false, Ordering::SeqCst);
    let stats = completed(tagger.run_pass().unwrap());
    assert_eq!(stats.rescan_start, 4);
    assert_eq!(tagger.cache().pairs(), full_pairs("(a)\n[(b)\n").as_slice());
}

/// A document that changes while a pass reads its text.
struct RacingDocument {
    inner: TextDocument,
    bumps: Cell<u64>,
    race: bool,
}

impl TextSource for RacingDocument {
    fn current_version(&self) -> DocumentVersion {
        DocumentVersion(self.inner.current_version().0 + self.bumps.get())
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn line_count(&self) -> usize {
        self.inner.line_count()
    }

    fn line_extent(&self, position: usize) -> Span {
        self.inner.line_extent(position)
    }

    fn text(&self, range: Span) -> String {
        if self.race {
            self.bumps.set(self.bumps.get() + 1);
        }
        self.inner.text(range)
    }

    fn visible_range(&self) -> Span {
        self.inner.visible_range()
    }
}

#[test]
fn test_stale_pass_is_discarded() {
    let document = RacingDocument {
        inner: TextDocument::new("(a)"),
        bumps: Cell::new(0),
        race: false,
    };
    let mut tagger =
        BraceTagger::new(document, Vec::<TokenSpan>::new(), (), LanguageMode::Standard, BraceOptions::default());
    let first = completed(tagger.run_pass().unwrap());
    let before = tagger.get_tags(Span::new(0, 3));

    tagger.source_mut().race = true;
    tagger.source_mut().inner.insert(0, "[");
    let outcome = tagger.run_pass().unwrap();
    assert!(matches!(outcome, PassOutcome::Superseded { .. }));
    assert_eq!(tagger.cache().version(), Some(first.version));
    assert_eq!(tagger.get_tags(Span::new(0, 4)), before);
}

#[test]
fn test_options_from_toml_drive_the_pass() {
    let options = BraceOptions::from_toml_str(
        r#"
        curly_brackets = false
        cycle_length = 2
        "#,
    )
    .unwrap();
    let mut tagger = tagger("{(((x)))}", options);
    completed(tagger.run_pass().unwrap());

    let tags = tagger.get_tags(Span::new(0, 9));
    assert!(tags.iter().all(|tag| tag.span.start != 0 && tag.span.start != 8));
    assert_eq!(colors(&tags), vec![(1, 0), (7, 0), (2, 1), (6, 1), (3, 0), (5, 0)]);
}

#[test]
fn test_html_documents_are_not_tagged() {
    let language = LanguageDetector::new().detect_language("index.html");
    let mut tagger = BraceTagger::new(
        TextDocument::new("<script>f(x)</script>"),
        Vec::<TokenSpan>::new(),
        (),
        language.mode(),
        BraceOptions::default(),
    );
    assert_eq!(tagger.run_pass().unwrap(), PassOutcome::Unsupported);
}

#[test]
fn test_synoptic_classifier_skips_string_brackets() {
    let text = "let s = \"(\";\nf(x);\n";
    let language = LanguageDetector::new().detect_language("main.rs");
    let mut tagger = BraceTagger::new(
        TextDocument::new(text),
        SynopticClassifier::new(language),
        (),
        language.mode(),
        BraceOptions::default(),
    );
    completed(tagger.run_pass().unwrap());

    let pairs = tagger.cache().pairs();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].kind, BraceKind::Paren);
    assert_eq!(pairs[0].open, Span::at(14));
    assert_eq!(pairs[0].close, Span::at(16));
}
