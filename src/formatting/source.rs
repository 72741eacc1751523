//! Canonical formatting of rendered declaration text.

use serde::Deserialize;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::core::errors::FormatError;

/// Normalizes rendered Go text.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;

    fn name(&self) -> &'static str;
}

/// Dependency-free formatter: tab indentation by bracket depth.
///
/// Lines are re-indented, trailing whitespace and repeated blank lines are
/// removed and the result ends with a single newline. Brackets inside
/// strings, runes and comments are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormatter;

impl SourceFormatter for BuiltinFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut lines: Vec<String> = Vec::new();
        let mut scanner = Scanner::default();
        let mut last_line = 0;

        for (index, raw) in source.lines().enumerate() {
            last_line = index + 1;

            if scanner.in_raw_string {
                lines.push(raw.trim_end().to_string());
                scanner.scan(raw, last_line)?;
                continue;
            }

            let line = raw.trim();
            if line.is_empty() {
                if lines.last().is_some_and(|l| !l.is_empty()) {
                    lines.push(String::new());
                }
                continue;
            }

            let closers = if scanner.in_block_comment {
                0
            } else {
                line.chars().take_while(|c| matches!(c, ')' | ']' | '}')).count()
            };
            let indent = scanner.depth.saturating_sub(closers);

            lines.push(format!("{}{}", "\t".repeat(indent), line));
            scanner.scan(line, last_line)?;
        }

        if scanner.depth != 0 {
            return Err(FormatError::Unbalanced { line: last_line });
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        if lines.is_empty() {
            return Ok(String::new());
        }

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}

/// Bracket depth tracking across lines.
#[derive(Debug, Default)]
struct Scanner {
    depth: usize,
    in_raw_string: bool,
    in_block_comment: bool,
}

impl Scanner {
    fn scan(&mut self, line: &str, line_no: usize) -> Result<(), FormatError> {
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            if self.in_raw_string {
                if c == '`' {
                    self.in_raw_string = false;
                }
                continue;
            }

            if self.in_block_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.in_block_comment = false;
                }
                continue;
            }

            match c {
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    self.in_block_comment = true;
                }
                '"' | '\'' => {
                    while let Some(s) = chars.next() {
                        if s == '\\' {
                            chars.next();
                        } else if s == c {
                            break;
                        }
                    }
                }
                '`' => self.in_raw_string = true,
                '(' | '[' | '{' => self.depth += 1,
                ')' | ']' | '}' => {
                    self.depth = self
                        .depth
                        .checked_sub(1)
                        .ok_or(FormatError::Unbalanced { line: line_no })?;
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Pipes text through an external `gofmt`.
#[derive(Debug, Clone)]
pub struct GofmtFormatter {
    path: PathBuf,
}

impl GofmtFormatter {
    /// Finds `gofmt` on `PATH`.
    pub fn locate() -> Result<Self, FormatError> {
        which::which("gofmt")
            .map(Self::with_path)
            .map_err(|_| FormatError::GofmtMissing)
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SourceFormatter for GofmtFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(FormatError::Gofmt {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &'static str {
        "gofmt"
    }
}

/// Which formatter to use for source output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatterChoice {
    /// `gofmt` when installed, else builtin.
    #[default]
    Auto,
    Builtin,
    Gofmt,
}

impl FormatterChoice {
    pub fn formatter(&self) -> Result<Box<dyn SourceFormatter>, FormatError> {
        match self {
            Self::Builtin => Ok(Box::new(BuiltinFormatter)),
            Self::Gofmt => Ok(Box::new(GofmtFormatter::locate()?)),
            Self::Auto => match GofmtFormatter::locate() {
                Ok(gofmt) => Ok(Box::new(gofmt)),
                Err(_) => {
                    debug!("gofmt not found, using builtin formatter");
                    Ok(Box::new(BuiltinFormatter))
                }
            },
        }
    }
}

impl fmt::Display for FormatterChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Builtin => f.write_str("builtin"),
            Self::Gofmt => f.write_str("gofmt"),
        }
    }
}
