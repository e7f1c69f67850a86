// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Finds candidate bracket characters in a range of text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::braces::pair::{BraceKind, Side};
use crate::config::BraceOptions;
use crate::syntax::DisallowList;

static BRACKET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[{}()\[\]]").expect("bracket pattern is a valid regex"));

/// A bracket character that survived filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketCandidate {
    pub kind: BraceKind,
    /// Whether the character opens or closes `kind`.
    pub side: Side,
    /// Absolute byte offset in the document.
    pub position: usize,
}

impl BracketCandidate {
    pub fn ch(&self) -> char {
        match self.side {
            Side::Open => self.kind.open_char(),
            Side::Close => self.kind.close_char(),
        }
    }
}

/// Returns true when a document is over the analysis line ceiling.
pub fn exceeds_line_limit(line_count: usize, max_lines: usize) -> bool {
    line_count > max_lines
}

/// Line-by-line scanner for the six bracket characters.
#[derive(Debug, Clone, Copy)]
pub struct BracketScanner {
    enabled: [bool; 3],
}

impl Default for BracketScanner {
    fn default() -> Self {
        Self { enabled: [true; 3] }
    }
}

impl BracketScanner {
    /// A scanner for the bracket kinds enabled in `options`.
    pub fn new(options: &BraceOptions) -> Self {
        let mut enabled = [false; 3];
        for kind in BraceKind::ALL {
            enabled[kind.index()] = options.is_kind_enabled(kind);
        }
        Self { enabled }
    }

    pub fn is_enabled(&self, kind: BraceKind) -> bool {
        self.enabled[kind.index()]
    }

    /// Scans `text`, which starts at document offset `base`, and returns the
    /// bracket candidates in document order.
    ///
    /// Lines without any bracket character are skipped whole. Candidates of
    /// disabled kinds and candidates inside `disallow` are dropped.
    pub fn scan(&self, text: &str, base: usize, disallow: &DisallowList) -> Vec<BracketCandidate> {
        let mut candidates = Vec::new();
        let mut disallowed = disallow.cursor();
        disallowed.seek(base);

        let mut line_start = base;
        for line in text.split_inclusive('\n') {
            let line_len = line.len();
            if !BRACKET_PATTERN.is_match(line) {
                line_start += line_len;
                continue;
            }

            for found in BRACKET_PATTERN.find_iter(line) {
                let position = line_start + found.start();
                let Some((kind, side)) = found.as_str().chars().next().and_then(BraceKind::from_char) else {
                    continue;
                };
                if !self.is_enabled(kind) || disallowed.contains(position) {
                    continue;
                }
                candidates.push(BracketCandidate { kind, side, position });
            }
            line_start += line_len;
        }

        candidates
    }
}
