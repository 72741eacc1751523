//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pkgdmp operations
#[derive(Debug, Error)]
pub enum Error {
    /// Go source loading errors
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Declaration extraction errors
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Filter construction errors
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Canonical formatting errors
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Syntax highlighting errors
    #[error(transparent)]
    Highlight(#[from] HighlightError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Fatal extraction failures.
///
/// Constant values form a closed set of shapes in Go's grammar, so anything
/// else aborts extraction of the whole package.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported const value `{text}` ({kind})")]
    UnsupportedConstValue { kind: String, text: String },

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ExtractError>,
    },
}

impl ExtractError {
    pub fn unsupported_value(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::UnsupportedConstValue {
            kind: kind.into(),
            text: text.into(),
        }
    }

    /// Wrap the error with the declaration being processed.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping context layers.
    pub fn root(&self) -> &ExtractError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors raised while building symbol filters.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid name pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported symbol type string: {0:?}")]
    UnknownSymbolKind(String),
}

/// Errors raised by canonical source formatters.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unbalanced brackets at line {line}")]
    Unbalanced { line: usize },

    #[error("gofmt failed: {message}")]
    Gofmt { message: String },

    #[error("gofmt binary not found")]
    GofmtMissing,

    #[error("running gofmt: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading Go source files.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in {}:{line}:{column}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("parsing {} produced no syntax tree", path.display())]
    NoTree { path: PathBuf },

    #[error("loading Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by terminal syntax highlighting.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("unknown theme {name:?} (available: {available})")]
    UnknownTheme { name: String, available: String },

    #[error("no syntax definition for Go")]
    MissingSyntax,

    #[error("highlighting failed: {0}")]
    Syntect(#[from] syntect::Error),
}

/// Configuration file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {setting} setting: {source}")]
    Filter {
        setting: &'static str,
        #[source]
        source: FilterError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
