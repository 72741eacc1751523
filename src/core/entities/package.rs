use serde::Serialize;
use std::fmt;

use super::{ConstGroup, Func, TypeDef};
use crate::core::errors::FormatError;
use crate::core::render::comment_block;
use crate::core::symbol::{Symbol, SymbolKind};
use crate::formatting::source::{BuiltinFormatter, SourceFormatter};

/// The filtered declarations of one Go package.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Package {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consts: Vec<ConstGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub funcs: Vec<Func>,
}

impl Package {
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.consts.is_empty() && self.types.is_empty() && self.funcs.is_empty()
    }

    /// Rendered text normalized by the builtin formatter.
    pub fn source(&self) -> Result<String, FormatError> {
        self.source_with(&BuiltinFormatter)
    }

    pub fn source_with(&self, formatter: &dyn SourceFormatter) -> Result<String, FormatError> {
        formatter.format(&self.to_string())
    }
}

impl Symbol for Package {
    fn ident(&self) -> &str {
        &self.name
    }

    /// The package symbol is the root of filtering and always exported.
    fn is_exported(&self) -> bool {
        true
    }

    fn symbol_kind(&self) -> SymbolKind {
        SymbolKind::Package
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&comment_block(&self.doc))?;
        write!(f, "package {}", self.name)?;

        for group in self.consts.iter().filter(|g| !g.consts.is_empty()) {
            write!(f, "\n\n{group}")?;
        }
        for typedef in &self.types {
            write!(f, "\n\n{typedef}")?;
        }
        for func in &self.funcs {
            write!(f, "\n\n{func}")?;
        }

        f.write_str("\n")
    }
}
