// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The incremental brace-pairing engine.
//!
//! Scanning, pairing, cache reuse and tag emission. Each stage is usable on
//! its own; [`crate::pipeline`] wires them into a per-document pass.

pub mod cache;
pub mod matcher;
pub mod pair;
pub mod scanner;
pub mod tags;


pub use cache::{CacheUpdate, IncrementalCache, retain_above};
pub use matcher::{PairMatcher, match_pairs};
pub use pair::{BraceKind, BracePair, Side};
pub use scanner::{BracketCandidate, BracketScanner, exceeds_line_limit};
pub use tags::{TagRecord, TagSet, color_index, emit};
