// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The text collaborator a tagger reads from.
//!
//! [`TextSource`] is everything the pairing engine needs from a host editor:
//! the current version, line geometry, text by range, and the visible range.
//! [`TextDocument`] is an in-memory implementation over a rope, used by tests,
//! the baseline tool, and hosts without their own buffer type.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use ropey::Rope;

use crate::span::Span;

/// Monotonic identifier of a document's content state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DocumentVersion(pub u64);

impl DocumentVersion {
    pub fn next(self) -> Self {
        DocumentVersion(self.0 + 1)
    }
}

impl fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Read access to a live document.
///
/// All offsets are byte offsets. Implementations clamp out-of-range positions
/// to the document length.
pub trait TextSource {
    fn current_version(&self) -> DocumentVersion;

    /// Length of the document in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn line_count(&self) -> usize;

    /// Extent of the line containing `position`, including its line break.
    fn line_extent(&self, position: usize) -> Span;

    fn text(&self, range: Span) -> String;

    /// Byte range of the lines currently on screen.
    fn visible_range(&self) -> Span;
}

/// In-memory document with a version counter and a viewport.
#[derive(Debug, Clone, Default)]
pub struct TextDocument {
    rope: Rope,
    version: DocumentVersion,
    visible: Option<Span>,
}

impl TextDocument {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            version: DocumentVersion(1),
            visible: None,
        }
    }

    /// Sets the visible byte range. Without one the whole document is visible.
    pub fn set_visible_range(&mut self, range: Span) {
        self.visible = Some(range);
    }

    /// Shows lines `first..=last` (zero-based, clamped).
    pub fn scroll_to_lines(&mut self, first: usize, last: usize) {
        let lines = self.rope.len_lines();
        let first = first.min(lines - 1);
        let last = last.clamp(first, lines - 1);
        let start = self.rope.line_to_byte(first);
        let end = self.rope.line_to_byte(last + 1);
        self.visible = Some(Span::new(start, end));
    }

    /// Inserts `text` at byte `position` and returns the edit position.
    pub fn insert(&mut self, position: usize, text: &str) -> usize {
        let position = position.min(self.rope.len_bytes());
        let char_idx = self.rope.byte_to_char(position);
        self.rope.insert(char_idx, text);
        self.version = self.version.next();
        position
    }

    /// Removes the bytes in `range` and returns the edit position.
    pub fn remove(&mut self, range: Span) -> usize {
        let range = self.clamp(range);
        let start = self.rope.byte_to_char(range.start);
        let end = self.rope.byte_to_char(range.end);
        self.rope.remove(start..end);
        self.version = self.version.next();
        range.start
    }

    /// Replaces `range` with `text` as a single edit.
    pub fn replace(&mut self, range: Span, text: &str) -> usize {
        let range = self.clamp(range);
        let start = self.rope.byte_to_char(range.start);
        let end = self.rope.byte_to_char(range.end);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.version = self.version.next();
        range.start
    }

    pub fn to_text(&self) -> String {
        self.rope.to_string()
    }

    fn clamp(&self, range: Span) -> Span {
        let len = self.rope.len_bytes();
        Span::new(range.start.min(len), range.end.min(len))
    }
}

impl TextSource for TextDocument {
    fn current_version(&self) -> DocumentVersion {
        self.version
    }

    fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_extent(&self, position: usize) -> Span {
        let position = position.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(position);
        Span::new(self.rope.line_to_byte(line), self.rope.line_to_byte(line + 1))
    }

    fn text(&self, range: Span) -> String {
        let range = self.clamp(range);
        self.rope.byte_slice(range.as_range()).to_string()
    }

    fn visible_range(&self) -> Span {
        let len = self.rope.len_bytes();
        match self.visible {
            Some(visible) => Span::new(visible.start.min(len), visible.end.min(len)),
            None => Span::new(0, len),
        }
    }
}

/// A document shared between an editing thread and a background worker.
pub type SharedDocument = Arc<RwLock<TextDocument>>;

impl<T: TextSource> TextSource for Arc<RwLock<T>> {
    fn current_version(&self) -> DocumentVersion {
        self.read().current_version()
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn line_count(&self) -> usize {
        self.read().line_count()
    }

    fn line_extent(&self, position: usize) -> Span {
        self.read().line_extent(position)
    }

    fn text(&self, range: Span) -> String {
        self.read().text(range)
    }

    fn visible_range(&self) -> Span {
        self.read().visible_range()
    }
}
