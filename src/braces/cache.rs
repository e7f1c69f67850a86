// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Reuse of bracket pairs across passes.
//!
//! Text above an edit does not change, so pairs that start above the line of
//! the edit keep their positions and levels. Everything from that line on is
//! scanned again.

use crate::braces::pair::BracePair;
use crate::document::{DocumentVersion, TextSource};
use crate::span::Span;

/// What a pass can take over from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheUpdate {
    /// Pairs above `rescan_start`, with closes at or after it cleared.
    pub retained: Vec<BracePair>,
    /// Start of the first line that must be scanned again.
    pub rescan_start: usize,
}

impl CacheUpdate {
    pub fn full() -> Self {
        Self {
            retained: Vec::new(),
            rescan_start: 0,
        }
    }
}

/// Keeps the pairs that lie above `boundary`.
///
/// A pair is kept when its open or its close ends at or before `boundary`.
/// A kept pair whose close lies past the boundary gets its close cleared, so
/// it goes back on its kind's stack and the rescan can close it again. Open
/// spans and levels of kept pairs are never changed.
pub fn retain_above(previous: &[BracePair], boundary: usize) -> Vec<BracePair> {
    previous
        .iter()
        .filter(|pair| pair.is_above(boundary))
        .map(|pair| {
            let mut pair = *pair;
            if !pair.close.ends_at_or_before(boundary) {
                pair.close = Span::EMPTY;
            }
            pair
        })
        .collect()
}

/// The pair set of the last completed pass and what it was computed against.
#[derive(Debug, Clone, Default)]
pub struct IncrementalCache {
    version: Option<DocumentVersion>,
    pairs: Vec<BracePair>,
    scanned_end: usize,
}

impl IncrementalCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> Option<DocumentVersion> {
        self.version
    }

    pub fn pairs(&self) -> &[BracePair] {
        &self.pairs
    }

    /// End of the text covered by the cached pairs.
    pub fn scanned_end(&self) -> usize {
        self.scanned_end
    }

    pub fn is_empty(&self) -> bool {
        self.version.is_none()
    }

    /// Plans the next pass against the current state of `source`.
    ///
    /// `dirty_from` is the earliest edit position since the cached version,
    /// if known. When the version moved on and no edit position is known,
    /// nothing can be reused.
    pub fn update(&self, source: &dyn TextSource, dirty_from: Option<usize>) -> CacheUpdate {
        let Some(version) = self.version else {
            return CacheUpdate::full();
        };

        let boundary = match dirty_from {
            Some(position) => position.min(self.scanned_end),
            None if version == source.current_version() => self.scanned_end,
            None => return CacheUpdate::full(),
        };
        if boundary == 0 {
            return CacheUpdate::full();
        }

        let rescan_start = source.line_extent(boundary).start;
        CacheUpdate {
            retained: retain_above(&self.pairs, rescan_start),
            rescan_start,
        }
    }

    /// Replaces the cached pairs with the result of a completed pass.
    ///
    /// A result for a version older than the cached one is stale and is
    /// rejected; returns whether the cache was updated.
    #[must_use]
    pub fn commit(&mut self, version: DocumentVersion, pairs: Vec<BracePair>, scanned_end: usize) -> bool {
        if self.version.is_some_and(|cached| version < cached) {
            return false;
        }
        self.version = Some(version);
        self.pairs = pairs;
        self.scanned_end = scanned_end;
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
