// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Language detection and bracket classification modes.
//!
//! The language of a document decides which token categories may contain
//! structural brackets. Template languages treat string and directive tokens
//! as bracket-bearing, because brackets inside interpolation delimiters still
//! pair with the surrounding code.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Languages with known bracket classification rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    /// Also JSX and the module variants.
    JavaScript,
    /// Also TSX.
    TypeScript,
    Python,
    /// JSON and JSON with comments.
    Json,
    CSharp,
    /// CSS, SCSS and Less.
    Css,
    Sql,
    /// XAML and Avalonia XAML.
    Xaml,
    /// Razor templates (C# embedded in markup)
    Razor,
    /// HTML markup; embedded languages are tagged in their own documents
    Html,
    /// Unknown extensions; classified as having no tokens.
    PlainText,
}

/// How a language's classification is turned into a bracket allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageMode {
    /// Brackets are structural only in punctuation, operator and delimiter tokens
    /// (or outside any token).
    Standard,
    /// Like `Standard`, but string and directive tokens are allowed too.
    Template,
    /// The document is never tagged.
    Unsupported,
}

impl Language {
    /// Maps a lower-case file extension to its language.
    pub fn from_extension(extension: &str) -> Option<Language> {
        let language = match extension {
            "rs" => Language::Rust,
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "mts" | "tsx" => Language::TypeScript,
            "py" | "pyi" => Language::Python,
            "json" | "jsonc" => Language::Json,
            "cs" | "csx" => Language::CSharp,
            "css" | "scss" | "less" => Language::Css,
            "sql" => Language::Sql,
            "xaml" | "axaml" => Language::Xaml,
            "cshtml" | "razor" => Language::Razor,
            "html" | "htm" | "aspx" => Language::Html,
            "txt" | "text" => Language::PlainText,
            _ => return None,
        };
        Some(language)
    }

    pub fn mode(self) -> LanguageMode {
        match self {
            Language::Razor => LanguageMode::Template,
            Language::Html => LanguageMode::Unsupported,
            _ => LanguageMode::Standard,
        }
    }
}

/// Identifies a document's language from its path.
#[derive(Debug, Default)]
pub struct LanguageDetector {
    /// Per-file choices that win over the extension.
    pinned: HashMap<PathBuf, Language>,
}

impl LanguageDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pinned language first, then the extension (case-insensitive), then plain text.
    pub fn detect_language<P: AsRef<Path>>(&self, path: P) -> Language {
        let path = path.as_ref();
        if let Some(&language) = self.pinned.get(path) {
            return language;
        }

        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(|extension| Language::from_extension(&extension.to_ascii_lowercase()))
            .unwrap_or(Language::PlainText)
    }

    pub fn pin_language<P: AsRef<Path>>(&mut self, path: P, language: Language) {
        self.pinned.insert(path.as_ref().to_path_buf(), language);
    }

    /// Returns the language that was pinned for `path`, if any.
    pub fn unpin_language<P: AsRef<Path>>(&mut self, path: P) -> Option<Language> {
        self.pinned.remove(path.as_ref())
    }
}
