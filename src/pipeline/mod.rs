// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-document brace tagging controller.
//!
//! A [`BraceTagger`] owns one document's pair cache and published tags. It
//! pulls text from a [`TextSource`], classification from a
//! [`ClassificationSource`], and pushes change notifications to a [`TagSink`].
//! Passes are strictly serialized: the cache and the tags are replaced
//! together, only when a pass completes against the still-current version.

pub mod debounce;
pub mod worker;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::braces::{
    BracketScanner, IncrementalCache, PairMatcher, TagRecord, TagSet, emit, exceeds_line_limit,
};
use crate::config::BraceOptions;
use crate::document::{DocumentVersion, TextSource};
use crate::error::PassError;
use crate::span::Span;
use crate::syntax::{ClassificationSource, LanguageMode, TokenFilter};

pub use debounce::PendingPass;
pub use worker::BraceWorker;

/// Tags shared between the tagger and whoever renders them.
pub type TagStore = Arc<RwLock<TagSet>>;

/// Why a pass is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The text changed at `position`, producing `version`.
    Edit { position: usize, version: DocumentVersion },
    /// The visible range moved or resized.
    ViewportChanged,
    /// Drop everything cached and start over.
    Reset,
}

impl Trigger {
    /// Folds a newer trigger into a pending one.
    ///
    /// Edits keep the earliest position and the latest version, so a merged
    /// edit still bounds every change it stands for.
    pub fn merge(self, next: Trigger) -> Trigger {
        match (self, next) {
            (Trigger::Reset, _) | (_, Trigger::Reset) => Trigger::Reset,
            (
                Trigger::Edit { position: a, version: va },
                Trigger::Edit { position: b, version: vb },
            ) => Trigger::Edit {
                position: a.min(b),
                version: va.max(vb),
            },
            (edit @ Trigger::Edit { .. }, Trigger::ViewportChanged)
            | (Trigger::ViewportChanged, edit @ Trigger::Edit { .. }) => edit,
            (Trigger::ViewportChanged, Trigger::ViewportChanged) => Trigger::ViewportChanged,
        }
    }
}

/// Receives the results of completed passes.
pub trait TagSink {
    /// Tags in `affected` may have changed; pull them with `BraceTagger::get_tags`.
    fn tags_changed(&self, affected: Span);

    /// The document has more lines than the configured ceiling and was not analyzed.
    fn document_too_large(&self, _line_count: usize, _max_lines: usize) {}
}

impl TagSink for () {
    fn tags_changed(&self, _affected: Span) {}
}

/// Notifications forwarded over a channel, for hosts that apply them on their own thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEvent {
    /// See [`TagSink::tags_changed`].
    TagsChanged(Span),
    /// See [`TagSink::document_too_large`].
    DocumentTooLarge { line_count: usize, max_lines: usize },
}

impl TagSink for Sender<TagEvent> {
    fn tags_changed(&self, affected: Span) {
        // A closed channel means the host went away; nothing left to notify.
        let _ = self.send(TagEvent::TagsChanged(affected));
    }

    fn document_too_large(&self, line_count: usize, max_lines: usize) {
        let _ = self.send(TagEvent::DocumentTooLarge { line_count, max_lines });
    }
}

/// Counters for one completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassStats {
    /// Document version the pass ran against.
    pub version: DocumentVersion,
    /// Line-aligned offset where scanning resumed. Zero for a full pass.
    pub rescan_start: usize,
    /// End of the text now covered by the cache.
    pub scanned_end: usize,
    /// Pairs carried over from the cache.
    pub retained: usize,
    /// Pairs in the new pair set.
    pub pairs: usize,
    /// Bracket candidates fed to the matcher.
    pub candidates: usize,
    /// Wall time from the start of the pass to commit.
    pub elapsed: Duration,
}

/// How a pass ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// New pairs and tags were committed.
    Completed(PassStats),
    /// The cache already covers the visible range of the current version.
    Unchanged,
    /// The document exceeds the line ceiling; previous tags are kept.
    TooLarge { line_count: usize },
    /// Tagging is switched off in the options.
    Disabled,
    /// The document's language is never tagged.
    Unsupported,
    /// The document changed while the pass ran; its result was discarded.
    Superseded { version: DocumentVersion },
}

/// Earliest edit since the cached version, and the newest version it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Dirty {
    from: usize,
    version: DocumentVersion,
}

/// Brace tagging for one document.
pub struct BraceTagger<S, C, K> {
    source: S,
    classifier: C,
    sink: K,
    options: BraceOptions,
    filter: TokenFilter,
    cache: IncrementalCache,
    tags: TagStore,
    dirty: Option<Dirty>,
    reported_too_large: bool,
}

impl<S, C, K> BraceTagger<S, C, K>
where
    S: TextSource,
    C: ClassificationSource,
    K: TagSink,
{
    pub fn new(source: S, classifier: C, sink: K, mode: LanguageMode, options: BraceOptions) -> Self {
        Self {
            source,
            classifier,
            sink,
            options,
            filter: TokenFilter::new(mode),
            cache: IncrementalCache::new(),
            tags: TagStore::default(),
            dirty: None,
            reported_too_large: false,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the document. Report edits with [`Trigger::Edit`].
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn options(&self) -> &BraceOptions {
        &self.options
    }

    pub fn cache(&self) -> &IncrementalCache {
        &self.cache
    }

    /// A handle to the published tags that stays valid across passes.
    pub fn tag_store(&self) -> TagStore {
        Arc::clone(&self.tags)
    }

    /// Tags intersecting `range`.
    pub fn get_tags(&self, range: Span) -> Vec<TagRecord> {
        self.tags.read().tags_in(range).copied().collect()
    }

    /// Applies new settings.
    ///
    /// Disabling clears the cache and the tags and notifies the sink over the
    /// visible range. Changing which bracket kinds are tracked drops the cache.
    /// A new cycle length recolors the cached pairs in place.
    pub fn set_options(&mut self, options: BraceOptions) {
        if self.options.enabled && !options.enabled {
            self.clear();
            self.sink.tags_changed(self.source.visible_range());
        } else if options.changes_pairs(&self.options) || !self.options.enabled {
            self.cache.clear();
        } else if options.cycle() != self.options.cycle() && !self.cache.is_empty() {
            *self.tags.write() = TagSet::new(emit(self.cache.pairs(), options.cycle()));
            self.sink.tags_changed(Span::new(0, self.cache.scanned_end()));
        }
        self.options = options;
    }

    /// Records a trigger without running a pass.
    pub fn note(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Edit { position, version } => {
                self.dirty = Some(match self.dirty {
                    Some(dirty) => Dirty {
                        from: dirty.from.min(position),
                        version: dirty.version.max(version),
                    },
                    None => Dirty { from: position, version },
                });
            }
            Trigger::ViewportChanged => {}
            Trigger::Reset => {
                self.cache.clear();
                self.dirty = None;
            }
        }
    }

    /// Records `trigger` and runs a pass.
    pub fn handle(&mut self, trigger: Trigger) -> Result<PassOutcome, PassError> {
        self.note(trigger);
        self.run_pass()
    }

    /// Runs one pass against the current document state.
    ///
    /// On error nothing changes: the cache, the tags, and pending edit
    /// positions all stay as they were.
    pub fn run_pass(&mut self) -> Result<PassOutcome, PassError> {
        if self.filter.mode() == LanguageMode::Unsupported {
            return Ok(PassOutcome::Unsupported);
        }
        if !self.options.enabled {
            return Ok(PassOutcome::Disabled);
        }

        let started = Instant::now();
        let version = self.source.current_version();
        let line_count = self.source.line_count();
        let max_lines = self.options.max_document_lines;
        if exceeds_line_limit(line_count, max_lines) {
            if !self.reported_too_large {
                info!(line_count, max_lines, "document too large, brace tagging skipped");
                self.reported_too_large = true;
            }
            self.sink.document_too_large(line_count, max_lines);
            return Ok(PassOutcome::TooLarge { line_count });
        }
        self.reported_too_large = false;

        let len = self.source.len();
        let visible = self.source.visible_range();
        let overflow = self.options.viewport_overflow;
        let window = Span::new(visible.start.saturating_sub(overflow), (visible.end + overflow).min(len));
        let window_end = self.source.line_extent(window.end).end;

        if self.cache.version() == Some(version) && self.dirty.is_none() && window_end <= self.cache.scanned_end() {
            return Ok(PassOutcome::Unchanged);
        }

        // Edit positions only bound the changes if they cover the version we read.
        let dirty_from = self.dirty.filter(|dirty| dirty.version == version).map(|dirty| dirty.from);
        let update = self.cache.update(&self.source, dirty_from);
        let rescan_start = update.rescan_start;
        let scan_end = window_end.max(rescan_start);

        let tokens = self
            .classifier
            .classified_spans(&self.source, Span::new(0, scan_end))
            .map_err(|err| {
                warn!(%version, error = %err, "classification failed, keeping previous brace tags");
                PassError::from(err)
            })?;
        let disallow = self.filter.disallow_list(&tokens, &self.source).map_err(|err| {
            warn!(%version, error = %err, "inconsistent classification, keeping previous brace tags");
            PassError::from(err)
        })?;

        let text = self.source.text(Span::new(rescan_start, scan_end));
        let candidates = BracketScanner::new(&self.options).scan(&text, rescan_start, &disallow);
        let candidate_count = candidates.len();
        let retained = update.retained.len();

        let mut matcher = PairMatcher::seeded(update.retained);
        matcher.extend(candidates);
        let pairs = matcher.into_pairs();

        if self.source.current_version() != version {
            debug!(%version, "document changed during brace pass, result discarded");
            return Ok(PassOutcome::Superseded { version });
        }

        let tags = emit(&pairs, self.options.cycle());
        let pair_count = pairs.len();
        if !self.cache.commit(version, pairs, scan_end) {
            debug!(%version, "stale brace pass result discarded");
            return Ok(PassOutcome::Superseded { version });
        }
        *self.tags.write() = TagSet::new(tags);
        self.dirty = None;

        self.sink.tags_changed(Span::new(rescan_start.min(window.start), scan_end));

        let stats = PassStats {
            version,
            rescan_start,
            scanned_end: scan_end,
            retained,
            pairs: pair_count,
            candidates: candidate_count,
            elapsed: started.elapsed(),
        };
        debug!(
            %version,
            rescan_start,
            scanned_end = scan_end,
            retained,
            pairs = pair_count,
            elapsed_us = stats.elapsed.as_micros() as u64,
            "brace pass completed"
        );
        Ok(PassOutcome::Completed(stats))
    }

    fn clear(&mut self) {
        self.cache.clear();
        self.dirty = None;
        *self.tags.write() = TagSet::default();
    }
}
