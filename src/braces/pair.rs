// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bracket kinds and the pair records built from them.

use crate::span::Span;

/// One of the three independently tracked bracket kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BraceKind {
    /// `(` and `)`
    Paren,
    /// `{` and `}`
    Curly,
    /// `[` and `]`
    Square,
}

/// Whether a bracket character opens or closes its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// `(`, `{` or `[`
    Open,
    /// `)`, `}` or `]`
    Close,
}

impl BraceKind {
    pub const ALL: [BraceKind; 3] = [BraceKind::Paren, BraceKind::Curly, BraceKind::Square];

    pub fn open_char(self) -> char {
        match self {
            BraceKind::Paren => '(',
            BraceKind::Curly => '{',
            BraceKind::Square => '[',
        }
    }

    pub fn close_char(self) -> char {
        match self {
            BraceKind::Paren => ')',
            BraceKind::Curly => '}',
            BraceKind::Square => ']',
        }
    }

    /// Classifies a bracket character. Returns `None` for anything else.
    pub fn from_char(ch: char) -> Option<(BraceKind, Side)> {
        match ch {
            '(' => Some((BraceKind::Paren, Side::Open)),
            ')' => Some((BraceKind::Paren, Side::Close)),
            '{' => Some((BraceKind::Curly, Side::Open)),
            '}' => Some((BraceKind::Curly, Side::Close)),
            '[' => Some((BraceKind::Square, Side::Open)),
            ']' => Some((BraceKind::Square, Side::Close)),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// A bracket pair with its nesting level inside its own kind.
///
/// `close` is empty while the pair has no visible close; such pairs are still
/// tagged. Pairs are only ever created from an opening bracket, so `open` is
/// never empty for pairs produced by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BracePair {
    pub kind: BraceKind,
    /// One-byte span of the opening bracket.
    pub open: Span,
    /// One-byte span of the closing bracket, or [`Span::EMPTY`] while unclosed.
    pub close: Span,
    /// 1-based depth among the open pairs of `kind` when this pair was created.
    pub level: usize,
}

impl BracePair {
    /// An unclosed pair opened at `position`.
    pub fn opened(kind: BraceKind, position: usize, level: usize) -> Self {
        Self {
            kind,
            open: Span::at(position),
            close: Span::EMPTY,
            level,
        }
    }

    pub fn is_closed(&self) -> bool {
        !self.close.is_empty()
    }

    /// Returns true if the open or the close span ends at or before `position`.
    pub fn is_above(&self, position: usize) -> bool {
        self.open.ends_at_or_before(position) || self.close.ends_at_or_before(position)
    }
}
