use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::core::render::{comment_block, trailing_comment};
use crate::core::symbol::{Symbol, SymbolKind};

static FIELD_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+):"(.*?)""#).expect("valid field tag regex"));

/// A struct field, function parameter, result or receiver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub type_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<FieldTag>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(skip)]
    pub kind: SymbolKind,
}

impl Field {
    pub fn new(kind: SymbolKind, names: Vec<String>, type_text: impl Into<String>) -> Self {
        Self {
            names,
            type_text: type_text.into(),
            tag: None,
            tags: Vec::new(),
            doc: String::new(),
            comment: String::new(),
            kind,
        }
    }

    /// Sets the raw struct tag (without backquotes) and its parsed form.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tags = parse_field_tags(&tag);
        self.tag = Some(tag);
        self
    }

    /// Returns true for an embedded struct field.
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty() && self.kind == SymbolKind::StructField
    }

    /// `a, b int`, or just the type for unnamed fields.
    pub fn signature(&self) -> String {
        if self.names.is_empty() {
            self.type_text.clone()
        } else {
            format!("{} {}", self.names.join(", "), self.type_text)
        }
    }
}

impl Symbol for Field {
    /// First name, the type's base name for embedded fields, or empty for
    /// unnamed parameters and results.
    fn ident(&self) -> &str {
        match self.names.first() {
            Some(name) => name,
            None if self.is_embedded() => embedded_name(&self.type_text),
            None => "",
        }
    }

    fn symbol_kind(&self) -> SymbolKind {
        self.kind
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&comment_block(&self.doc))?;
        f.write_str(&self.signature())?;

        if let Some(tag) = &self.tag {
            write!(f, " `{tag}`")?;
        }

        f.write_str(&trailing_comment(&self.comment))
    }
}

/// One `key:"v1,v2"` entry of a struct tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldTag {
    pub key: String,
    pub values: Vec<String>,
}

pub fn parse_field_tags(tag: &str) -> Vec<FieldTag> {
    let tag = tag.trim_matches('`');

    FIELD_TAG
        .captures_iter(tag)
        .map(|caps| FieldTag {
            key: caps[1].to_string(),
            values: caps[2].split(',').map(str::to_string).collect(),
        })
        .collect()
}

/// `*pkg.Name[T]` -> `Name`
fn embedded_name(type_text: &str) -> &str {
    let base = type_text.trim_start_matches('*');
    let base = base.split('[').next().unwrap_or(base);
    base.rsplit('.').next().unwrap_or(base)
}
