use std::fmt;
use xxhash_rust::xxh64::xxh64;

use crate::analyzers::go::synopsis;
use crate::core::filter::{FilterChain, SymbolFilter};

/// How much of each doc comment is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocMode {
    /// No docs at all.
    None,
    /// The first sentence.
    #[default]
    Synopsis,
    /// The whole comment.
    Full,
}

impl DocMode {
    /// Reduces a comment's text according to the mode.
    pub fn apply(&self, text: &str) -> String {
        if *self == Self::None {
            return String::new();
        }

        let text = text.trim();
        let text = text.strip_prefix("// ").unwrap_or(text);

        match self {
            Self::Full => text.to_string(),
            _ => synopsis(text),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Synopsis => "synopsis",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for DocMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of a [`super::Parser`].
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    pub exclude_docs: bool,
    pub full_docs: bool,
    pub exclude_tags: bool,
    pub filters: FilterChain,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep whole doc comments instead of their synopsis.
    pub fn with_full_docs(mut self) -> Self {
        self.full_docs = true;
        self
    }

    /// Drop doc comments. Takes precedence over [`Self::with_full_docs`].
    pub fn with_no_docs(mut self) -> Self {
        self.exclude_docs = true;
        self
    }

    /// Drop struct field tags.
    pub fn with_no_tags(mut self) -> Self {
        self.exclude_tags = true;
        self
    }

    /// Appends filters to the chain, keeping their order.
    pub fn with_symbol_filters(mut self, filters: impl IntoIterator<Item = SymbolFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn doc_mode(&self) -> DocMode {
        if self.exclude_docs {
            DocMode::None
        } else if self.full_docs {
            DocMode::Full
        } else {
            DocMode::Synopsis
        }
    }

    /// Stable hash of the effective configuration.
    pub fn fingerprint(&self) -> u64 {
        xxh64(self.to_string().as_bytes(), 0)
    }
}

impl fmt::Display for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parserOptions(docs={},tags={},filters={})",
            self.doc_mode(),
            !self.exclude_tags,
            self.filters
        )
    }
}
