// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for brace tagging.
//!
//! None of these are fatal to the host: a failed pass keeps the previous tags.
//! Unbalanced brackets and oversized documents are not errors at all; see
//! [`crate::pipeline::PassOutcome`].

use thiserror::Error;

/// A fault reported by (or detected in the output of) a classification source.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classification unavailable: {0}")]
    Unavailable(String),

    #[error("classifier returned span {start}..{end} outside a document of {len} bytes")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("tokens do not cover line {line}")]
    LineMismatch { line: usize },
}

/// Invalid brace tagging settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cycle length must be at least 1")]
    ZeroCycleLength,

    #[error("maximum document line count must be at least 1")]
    ZeroMaxLines,

    #[error("failed to parse brace settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A pass that aborted without touching the cache or the published tags.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("classification failed: {0}")]
    Classification(#[from] ClassifyError),
}
