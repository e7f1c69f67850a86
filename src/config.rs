// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Host-supplied settings for brace tagging.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::braces::BraceKind;
use crate::error::ConfigError;

/// Settings read at the start of every pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BraceOptions {
    /// Master switch. Disabling clears all tags.
    pub enabled: bool,
    /// Track `(` `)` pairs.
    pub parentheses: bool,
    /// Track `{` `}` pairs.
    pub curly_brackets: bool,
    /// Track `[` `]` pairs.
    pub square_brackets: bool,
    /// Number of distinct colors before levels wrap around.
    pub cycle_length: usize,
    /// Debounce delay in milliseconds.
    pub debounce: u64,
    /// Documents with more lines than this are not analyzed.
    pub max_document_lines: usize,
    /// Bytes scanned past each end of the visible range.
    pub viewport_overflow: usize,
}

impl Default for BraceOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            parentheses: true,
            curly_brackets: true,
            square_brackets: true,
            cycle_length: 4,
            debounce: 50,
            max_document_lines: 100_000,
            viewport_overflow: 200,
        }
    }
}

impl BraceOptions {
    /// Parses options from a TOML table. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let options: BraceOptions = toml::from_str(input)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_length == 0 {
            return Err(ConfigError::ZeroCycleLength);
        }
        if self.max_document_lines == 0 {
            return Err(ConfigError::ZeroMaxLines);
        }
        Ok(())
    }

    /// Whether pairs of `kind` are tracked.
    pub fn is_kind_enabled(&self, kind: BraceKind) -> bool {
        match kind {
            BraceKind::Paren => self.parentheses,
            BraceKind::Curly => self.curly_brackets,
            BraceKind::Square => self.square_brackets,
        }
    }

    /// Cycle length as a non-zero value. A zero setting is treated as one color.
    pub fn cycle(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cycle_length).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce)
    }

    /// Whether two option sets produce different pair sets for the same text.
    pub(crate) fn changes_pairs(&self, other: &BraceOptions) -> bool {
        self.parentheses != other.parentheses
            || self.curly_brackets != other.curly_brackets
            || self.square_brackets != other.square_brackets
    }
}
