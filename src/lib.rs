// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Rainbow brace tagging for editor views.
//!
//! The crate keeps an incrementally updated index of bracket pairs over a live
//! document and turns it into `(span, color index)` tags keyed by nesting depth.
//! Token classification decides which bracket characters are real syntax and
//! which sit inside strings or comments.
//!
//! The data flow of a pass:
//!
//! ```text
//! edit / viewport event
//!   → TokenFilter + BracketScanner over the rescan range
//!   → PairMatcher seeded from the IncrementalCache
//!   → TagEmitter
//!   → TagSink::tags_changed
//! ```
//!
//! [`pipeline::BraceTagger`] drives one document synchronously;
//! [`pipeline::BraceWorker`] runs the same tagger on a debounced background thread.

pub mod braces;
pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod span;
pub mod syntax;

pub use braces::{BraceKind, BracePair, TagRecord, TagSet};
pub use config::BraceOptions;
pub use document::{DocumentVersion, SharedDocument, TextDocument, TextSource};
pub use error::{ClassifyError, ConfigError, PassError};
pub use pipeline::{BraceTagger, BraceWorker, PassOutcome, PassStats, TagSink, Trigger};
pub use span::Span;
pub use syntax::{Category, ClassificationSource, Language, LanguageMode, TokenSpan};
