use anyhow::Context;
use std::io::Write;

use crate::core::Package;
use crate::formatting::{Highlighter, SourceFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Source,
}

pub trait OutputWriter {
    fn write_packages(&mut self, packages: &[Package]) -> anyhow::Result<()>;
}

/// Pretty-printed JSON array of packages.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_packages(&mut self, packages: &[Package]) -> anyhow::Result<()> {
        let json =
            serde_json::to_string_pretty(packages).context("encoding packages as JSON")?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Formatted (and optionally highlighted) Go declarations, one block per
/// package followed by a blank line.
pub struct SourceWriter<W: Write> {
    writer: W,
    formatter: Box<dyn SourceFormatter>,
    highlighter: Option<Highlighter>,
}

impl<W: Write> SourceWriter<W> {
    pub fn new(writer: W, formatter: Box<dyn SourceFormatter>) -> Self {
        Self {
            writer,
            formatter,
            highlighter: None,
        }
    }

    pub fn with_highlighter(mut self, highlighter: Option<Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    fn render(&self, package: &Package) -> anyhow::Result<String> {
        let source = package.source_with(self.formatter.as_ref()).with_context(|| {
            format!(
                "getting source for {} package ({} formatter)",
                package.name,
                self.formatter.name()
            )
        })?;

        match &self.highlighter {
            Some(highlighter) => highlighter.highlight(&source).with_context(|| {
                format!("syntax highlighting source for {} package", package.name)
            }),
            None => Ok(source),
        }
    }
}

impl<W: Write> OutputWriter for SourceWriter<W> {
    fn write_packages(&mut self, packages: &[Package]) -> anyhow::Result<()> {
        for package in packages {
            let text = self.render(package)?;
            write!(self.writer, "{text}\n\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
