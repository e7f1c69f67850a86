// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Converts bracket pairs into colored position tags.

use std::num::NonZeroUsize;

use crate::braces::pair::BracePair;
use crate::span::Span;

/// A bracket position and the palette index it should be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagRecord {
    /// The bracket character, one byte wide.
    pub span: Span,
    /// Palette slot in `0..cycle_length`; see [`color_index`].
    pub color_index: usize,
}

/// Palette index for a nesting level: `(level - 1) mod cycle`.
///
/// This is also the lookup renderers use for anything else keyed by level,
/// such as connector lines between paired brackets.
pub fn color_index(level: usize, cycle: NonZeroUsize) -> usize {
    level.saturating_sub(1) % cycle.get()
}

/// Emits one tag per non-empty bracket span: open and close of every pair,
/// sharing the pair's color index. Unclosed pairs only tag their open.
pub fn emit(pairs: &[BracePair], cycle: NonZeroUsize) -> Vec<TagRecord> {
    let mut tags = Vec::with_capacity(pairs.len() * 2);
    for pair in pairs {
        let color_index = color_index(pair.level, cycle);
        for span in [pair.open, pair.close] {
            if !span.is_empty() {
                tags.push(TagRecord { span, color_index });
            }
        }
    }
    tags
}

/// The tags published for a document, queried by range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<TagRecord>,
}

impl TagSet {
    pub fn new(tags: Vec<TagRecord>) -> Self {
        Self { tags }
    }

    /// Tags intersecting `range`. An empty range yields nothing.
    pub fn tags_in(&self, range: Span) -> impl Iterator<Item = &TagRecord> + '_ {
        self.tags.iter().filter(move |tag| tag.span.intersects(&range))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagRecord> + '_ {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
