pub mod highlight;
pub mod source;

pub use highlight::{Highlighter, DEFAULT_THEME};
pub use source::{BuiltinFormatter, FormatterChoice, GofmtFormatter, SourceFormatter};

use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    /// Color mode from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Color mode from an arbitrary variable lookup.
    ///
    /// `NO_COLOR`, `PKGDMP_NO_COLOR` and `CLICOLOR=0` turn colors off,
    /// `CLICOLOR_FORCE=1` turns them on regardless.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut mode = Self::Auto;

        // NO_COLOR only needs to be present (no-color.org)
        if lookup("NO_COLOR").is_some() || lookup("PKGDMP_NO_COLOR").is_some() {
            mode = Self::Never;
        }

        if lookup("CLICOLOR").as_deref() == Some("0") {
            mode = Self::Never;
        }

        if lookup("CLICOLOR_FORCE").as_deref() == Some("1") {
            mode = Self::Always;
        }

        mode
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }

    /// Applies the mode to `colored` output (error messages).
    pub fn apply_to_colored(&self) {
        colored::control::set_override(self.should_use_color());
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }

    std::io::stdout().is_terminal()
}
