// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Language detection and token classification.
//!
//! This module decides, per document language, which classified regions may
//! contain structural brackets.

pub mod classifier;
pub mod language;
pub mod token_filter;

pub use classifier::{Category, ClassificationSource, SynopticClassifier, TokenSpan};
pub use language::{Language, LanguageDetector, LanguageMode};
pub use token_filter::{DisallowCursor, DisallowList, TokenFilter, is_allowed};
