// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Half-open byte ranges over document text.

use std::fmt;
use std::ops::Range;

/// A half-open range `[start, end)` of byte offsets into a document.
///
/// An empty span is a sentinel for "not matched" or "not applicable" and never
/// takes part in overlap or containment tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Span {
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Span {
    /// The empty sentinel span.
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    /// Creates a span. `end` is clamped to `start` when it lies before it.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span end {end} before start {start}");
        Self { start, end: end.max(start) }
    }

    /// Creates a span, returning `None` when `end < start`.
    pub fn try_new(start: usize, end: usize) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// The one-byte span of a bracket character at `position`.
    pub fn at(position: usize) -> Self {
        Self { start: position, end: position + 1 }
    }

    /// Zero for empty and reversed spans.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `position` lies inside a non-empty span.
    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }

    /// Returns true if both spans are non-empty and share at least one byte.
    pub fn intersects(&self, other: &Span) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Returns true if the span is non-empty and ends at or before `position`.
    pub fn ends_at_or_before(&self, position: usize) -> bool {
        !self.is_empty() && self.end <= position
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Keeps the bounds as given, so a reversed range stays reversed and can be
/// rejected where it is consumed.
impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span { start: range.start, end: range.end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_span_never_intersects() {
        let empty = Span::EMPTY;
        assert!(empty.is_empty());
        assert!(!empty.contains(0));
        assert!(!empty.intersects(&Span::new(0, 10)));
        assert!(!Span::new(0, 10).intersects(&Span::new(5, 5)));
        assert!(!empty.ends_at_or_before(100));
    }

    #[test]
    fn test_half_open_bounds() {
        let span = Span::new(3, 6);
        assert!(!span.contains(2));
        assert!(span.contains(3));
        assert!(span.contains(5));
        assert!(!span.contains(6));
        assert!(span.intersects(&Span::new(5, 9)));
        assert!(!span.intersects(&Span::new(6, 9)));
        assert!(span.ends_at_or_before(6));
        assert!(!span.ends_at_or_before(5));
    }

    #[test]
    fn test_try_new_rejects_reversed() {
        assert_eq!(Span::try_new(4, 2), None);
        assert_eq!(Span::try_new(2, 4), Some(Span::new(2, 4)));
        assert_eq!(Span::at(7), Span::new(7, 8));
        assert_eq!(Span::from(1..3).len(), 2);
    }

    #[test]
    fn test_from_range_keeps_reversed_bounds() {
        let span = Span::from(9..4);
        assert_eq!((span.start, span.end), (9, 4));
        assert_eq!(span.len(), 0);
        assert!(!span.is_empty());
        assert_eq!(Span::try_new(span.start, span.end), None);
    }
}
