use serde::Serialize;
use std::fmt;

use crate::core::render::comment_block;
use crate::core::symbol::{Symbol, SymbolKind};

/// One `const` declaration: a single spec or a parenthesized group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstGroup {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
    pub consts: Vec<Const>,
}

impl fmt::Display for ConstGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.consts.is_empty() {
            return Ok(());
        }

        f.write_str(&comment_block(&self.doc))?;
        f.write_str("const ")?;

        if let [single] = self.consts.as_slice() {
            return write!(f, "{single}");
        }

        f.write_str("(\n")?;
        for c in &self.consts {
            writeln!(f, "    {c}")?;
        }
        f.write_str(")")
    }
}

/// A single const spec, e.g. `A, B = 1, 2`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Const {
    pub names: Vec<String>,
    /// Explicitly written type, if any.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_text: Option<String>,
    pub values: Vec<Value>,
}

impl Symbol for Const {
    fn ident(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    fn symbol_kind(&self) -> SymbolKind {
        SymbolKind::Const
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(", "))?;

        if let Some(type_text) = &self.type_text {
            write!(f, " {type_text}")?;
        }

        if !self.values.is_empty() {
            let exprs: Vec<&str> = self.values.iter().map(|v| v.expr.as_str()).collect();
            write!(f, " = {}", exprs.join(", "))?;
        }

        Ok(())
    }
}

/// A value in a [`Const`] spec with its inferred or explicit type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Value {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(rename = "type")]
    pub type_text: String,
    /// The type was written out or taken from a conversion.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub specific: bool,
    /// Source text of the whole value expression.
    #[serde(skip)]
    pub expr: String,
}
