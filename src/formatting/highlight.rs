//! Terminal syntax highlighting of Go source with syntect.

use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use crate::core::errors::HighlightError;

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Highlights Go source with one of syntect's bundled themes.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    theme: &'static Theme,
}

impl Highlighter {
    pub fn new(theme: &str) -> Result<Self, HighlightError> {
        THEMES
            .themes
            .get(theme)
            .map(|theme| Self { theme })
            .ok_or_else(|| HighlightError::UnknownTheme {
                name: theme.to_string(),
                available: available_themes().join(", "),
            })
    }

    /// ANSI 24-bit colored copy of `source`, ending with a style reset.
    pub fn highlight(&self, source: &str) -> Result<String, HighlightError> {
        let syntax = SYNTAXES
            .find_syntax_by_extension("go")
            .ok_or(HighlightError::MissingSyntax)?;

        let mut lines = HighlightLines::new(syntax, self.theme);
        let mut out = String::with_capacity(source.len() * 2);

        for line in LinesWithEndings::from(source) {
            let ranges = lines.highlight_line(line, &SYNTAXES)?;
            out.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }

        out.push_str("\x1b[0m");
        Ok(out)
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self {
            theme: &THEMES.themes[DEFAULT_THEME],
        }
    }
}

/// Names of the bundled themes, sorted.
pub fn available_themes() -> Vec<&'static str> {
    THEMES.themes.keys().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_exists() {
        assert!(available_themes().contains(&DEFAULT_THEME));
        assert!(Highlighter::new(DEFAULT_THEME).is_ok());
    }

    #[test]
    fn test_unknown_theme() {
        let err = Highlighter::new("no-such-theme").unwrap_err();
        assert!(matches!(err, HighlightError::UnknownTheme { ref name, .. } if name == "no-such-theme"));
        assert!(err.to_string().contains(DEFAULT_THEME));
    }

    #[test]
    fn test_highlight_keeps_text() {
        let source = "package p\n\nfunc F() int\n";
        let out = Highlighter::default().highlight(source).unwrap();

        assert!(out.contains("\x1b["));
        assert!(out.ends_with("\x1b[0m"));

        let stripped = strip_ansi(&out);
        assert_eq!(stripped, source);
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }
}
