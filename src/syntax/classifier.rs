// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Token classification consumed by the bracket pass.
//!
//! A [`ClassificationSource`] reports which spans of a document are strings,
//! comments, operators and so on. The pass only cares about the category of
//! spans that cover bracket characters; see [`super::TokenFilter`].

use std::fmt;

use synoptic::{Highlighter, TokOpt};

use crate::document::TextSource;
use crate::error::ClassifyError;
use crate::span::Span;
use crate::syntax::language::Language;

/// Category label attached to a classified span.
///
/// The set is open: names the crate does not know map to [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Punctuation,
    Operator,
    /// Markup delimiters, e.g. XAML's.
    Delimiter,
    /// String literals, including interpolated and template strings.
    String,
    Comment,
    Keyword,
    /// Preprocessor and template directives.
    Directive,
    /// Any category name without a dedicated variant, kept verbatim.
    Other(String),
}

impl Category {
    /// Maps a classifier's category name onto a category.
    ///
    /// Language-qualified names such as `"SQL Operator"` or `"XAML Delimiter"`
    /// resolve to their base category.
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        match lower.as_str() {
            "punctuation" => Category::Punctuation,
            "operator" => Category::Operator,
            "delimiter" => Category::Delimiter,
            "string" => Category::String,
            "comment" => Category::Comment,
            "keyword" => Category::Keyword,
            "directive" => Category::Directive,
            _ if lower.ends_with(" operator") => Category::Operator,
            _ if lower.ends_with(" delimiter") => Category::Delimiter,
            _ if lower.ends_with("directive") => Category::Directive,
            _ => Category::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Category::Punctuation => "punctuation",
            Category::Operator => "operator",
            Category::Delimiter => "delimiter",
            Category::String => "string",
            Category::Comment => "comment",
            Category::Keyword => "keyword",
            Category::Directive => "directive",
            Category::Other(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified region of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    /// Byte range of the token. Reversed ranges are kept as given.
    pub span: Span,
    pub category: Category,
}

impl TokenSpan {
    /// `span` is taken as given; a reversed range makes the pass fail with
    /// [`ClassifyError::InvalidSpan`].
    pub fn new(span: impl Into<Span>, category: Category) -> Self {
        Self { span: span.into(), category }
    }
}

/// Supplies classified spans for a range of a document.
///
/// Implementations return spans in document order. Spans reaching past the
/// document end or reversed spans are reported as faults by the pass.
pub trait ClassificationSource {
    fn classified_spans(
        &mut self,
        source: &dyn TextSource,
        range: Span,
    ) -> Result<Vec<TokenSpan>, ClassifyError>;
}

/// Pre-computed classification: returns the spans intersecting the range.
impl ClassificationSource for Vec<TokenSpan> {
    fn classified_spans(
        &mut self,
        _source: &dyn TextSource,
        range: Span,
    ) -> Result<Vec<TokenSpan>, ClassifyError> {
        Ok(self.iter().filter(|token| token.span.intersects(&range)).cloned().collect())
    }
}

/// Classification backed by the synoptic tokenizer.
///
/// Rules cover the regions that can hide brackets (strings, comments,
/// character literals) plus the operator and delimiter categories some
/// languages name explicitly.
pub struct SynopticClassifier {
    language: Language,
    highlighter: Highlighter,
}

impl fmt::Debug for SynopticClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynopticClassifier").field("language", &self.language).finish_non_exhaustive()
    }
}

impl SynopticClassifier {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            highlighter: build_highlighter(language),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

impl ClassificationSource for SynopticClassifier {
    fn classified_spans(
        &mut self,
        source: &dyn TextSource,
        range: Span,
    ) -> Result<Vec<TokenSpan>, ClassifyError> {
        // Multi-line tokens depend on everything above the range.
        let text = source.text(Span::new(0, range.end));
        let lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
        self.highlighter.run(&lines);

        let mut spans = Vec::new();
        let mut line_start = 0;
        for (y, line) in lines.iter().enumerate() {
            let mut column = 0;
            for token in self.highlighter.line(y, line) {
                match token {
                    TokOpt::Some(text, kind) => {
                        let span = Span::new(line_start + column, line_start + column + text.len());
                        if span.intersects(&range) {
                            spans.push(TokenSpan::new(span, Category::from_name(&kind)));
                        }
                        column += text.len();
                    }
                    TokOpt::None(text) => column += text.len(),
                }
            }
            if column != line.len() {
                return Err(ClassifyError::LineMismatch { line: y });
            }
            line_start += line.len() + 1;
        }

        Ok(spans)
    }
}

/// Tab width 1 keeps token lengths equal to source byte lengths.
fn build_highlighter(language: Language) -> Highlighter {
    let mut highlighter = Highlighter::new(1);

    match language {
        Language::Rust => {
            highlighter.keyword("keyword", r"\b(fn|let|mut|pub|struct|enum|impl|trait|use|mod|const|static|if|else|match|for|while|loop|return)\b");
            highlighter.keyword("character", r"'(\\.|[^'\\])'");
            highlighter.bounded("string", "\"", "\"", true);
            highlighter.keyword("comment", r"//.*$");
            highlighter.bounded("comment", r"/\*", r"\*/", false);
        }
        Language::JavaScript | Language::TypeScript | Language::CSharp => {
            highlighter.keyword("keyword", r"\b(function|var|let|const|if|else|for|while|return|class|new|using|namespace)\b");
            highlighter.bounded("string", "\"", "\"", true);
            highlighter.bounded("string", "'", "'", true);
            highlighter.bounded("string", "`", "`", true);
            highlighter.keyword("comment", r"//.*$");
            highlighter.bounded("comment", r"/\*", r"\*/", false);
        }
        Language::Python => {
            highlighter.keyword("keyword", r"\b(def|class|if|elif|else|for|while|return|import|from|lambda)\b");
            highlighter.bounded("string", "\"\"\"", "\"\"\"", true);
            highlighter.bounded("string", "\"", "\"", true);
            highlighter.bounded("string", "'", "'", true);
            highlighter.keyword("comment", r"#.*$");
        }
        Language::Json => {
            highlighter.bounded("string", "\"", "\"", true);
        }
        Language::Css => {
            highlighter.bounded("string", "\"", "\"", true);
            highlighter.bounded("comment", r"/\*", r"\*/", false);
        }
        Language::Sql => {
            highlighter.bounded("string", "'", "'", false);
            highlighter.keyword("comment", r"--.*$");
            highlighter.keyword("SQL Operator", r"[()]");
        }
        Language::Xaml => {
            highlighter.bounded("comment", "<!--", "-->", false);
            highlighter.keyword("XAML Delimiter", r"[{}]");
        }
        Language::Razor => {
            highlighter.bounded("comment", r"@\*", r"\*@", false);
            highlighter.keyword("RazorDirective", r"@[A-Za-z]+");
            highlighter.bounded("string", "\"", "\"", true);
            highlighter.keyword("comment", r"//.*$");
        }
        Language::Html | Language::PlainText => {}
    }

    highlighter
}
