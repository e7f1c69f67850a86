// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Decides which bracket characters are structural.
//!
//! A bracket is eligible for pairing unless it lies inside a classified span
//! whose category is not on the language mode's allow-list. The disallowed
//! spans are collected once per pass into a sorted, merged [`DisallowList`].

use crate::document::TextSource;
use crate::error::ClassifyError;
use crate::span::Span;
use crate::syntax::classifier::{Category, TokenSpan};
use crate::syntax::language::LanguageMode;

/// Returns true if brackets inside a span of `category` take part in pairing.
pub fn is_allowed(category: &Category, mode: LanguageMode) -> bool {
    match category {
        Category::Punctuation | Category::Operator | Category::Delimiter => true,
        Category::String | Category::Directive => mode == LanguageMode::Template,
        _ => false,
    }
}

/// Builds disallow lists for one language mode.
#[derive(Debug, Clone, Copy)]
pub struct TokenFilter {
    mode: LanguageMode,
}

impl TokenFilter {
    pub fn new(mode: LanguageMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> LanguageMode {
        self.mode
    }

    pub fn is_allowed(&self, category: &Category) -> bool {
        is_allowed(category, self.mode)
    }

    /// Collects the disallowed spans of `tokens`.
    ///
    /// Fails if a token reaches past the end of `source`, which means the
    /// classification belongs to a different version of the text.
    pub fn disallow_list(
        &self,
        tokens: &[TokenSpan],
        source: &dyn TextSource,
    ) -> Result<DisallowList, ClassifyError> {
        let len = source.len();
        let mut spans = Vec::new();
        for token in tokens {
            if token.span.end > len || token.span.start > token.span.end {
                return Err(ClassifyError::InvalidSpan {
                    start: token.span.start,
                    end: token.span.end,
                    len,
                });
            }
            if !token.span.is_empty() && !self.is_allowed(&token.category) {
                spans.push(token.span);
            }
        }
        Ok(DisallowList::from_spans(spans))
    }
}

/// Sorted, non-overlapping, non-empty spans in which brackets are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisallowList {
    spans: Vec<Span>,
}

impl DisallowList {
    /// Sorts and merges `spans`. Empty spans are dropped.
    pub fn from_spans(mut spans: Vec<Span>) -> Self {
        spans.retain(|span| !span.is_empty());
        spans.sort_unstable();

        let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
                _ => merged.push(span),
            }
        }
        Self { spans: merged }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns true if `position` lies inside a disallowed span.
    pub fn contains(&self, position: usize) -> bool {
        let idx = self.spans.partition_point(|span| span.end <= position);
        self.spans.get(idx).is_some_and(|span| span.start <= position)
    }

    /// A forward-only cursor for checking positions in increasing order.
    pub fn cursor(&self) -> DisallowCursor<'_> {
        DisallowCursor { spans: &self.spans, idx: 0 }
    }
}

/// Two-pointer sweep over a [`DisallowList`].
///
/// Positions passed to [`DisallowCursor::contains`] must not decrease.
#[derive(Debug)]
pub struct DisallowCursor<'a> {
    spans: &'a [Span],
    idx: usize,
}

impl DisallowCursor<'_> {
    pub fn contains(&mut self, position: usize) -> bool {
        while self.spans.get(self.idx).is_some_and(|span| span.end <= position) {
            self.idx += 1;
        }
        self.spans.get(self.idx).is_some_and(|span| span.start <= position)
    }

    /// Jumps to the first span that may contain `position`.
    pub fn seek(&mut self, position: usize) {
        self.idx = self.spans.partition_point(|span| span.end <= position);
    }
}
