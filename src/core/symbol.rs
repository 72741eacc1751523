//! Uniform symbol capability shared by every extracted declaration.
//!
//! Filters never see concrete entity types. Anything offered to a
//! [`crate::core::filter::SymbolFilter`] only has to answer three questions:
//! its identifier, whether it is exported and which [`SymbolKind`] it is.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::errors::FilterError;

/// Category of a package symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolKind {
    /// `package mypackage`
    Package,
    /// `const myConst = ...`
    Const,
    /// `type MyInt int`
    IdentType,
    /// `type MyFunc func(...)`
    FuncType,
    /// `type MyStruct struct { ... }`
    StructType,
    /// `type MyInterface interface { ... }`
    InterfaceType,
    /// `type MyMap map[...]...`
    MapType,
    /// `type MyChan chan ...`
    ChanType,
    /// `type MyArray []string`
    ArrayType,
    /// `func MyFunc(...) { ... }`
    Func,
    /// `func (r Recv) MyMethod(...) { ... }`
    Method,
    StructField,
    ParamField,
    ResultField,
    ReceiverField,
}

impl SymbolKind {
    /// Kinds selectable from the command line and config file.
    pub const SELECTABLE: [SymbolKind; 11] = [
        SymbolKind::Const,
        SymbolKind::IdentType,
        SymbolKind::FuncType,
        SymbolKind::StructType,
        SymbolKind::InterfaceType,
        SymbolKind::MapType,
        SymbolKind::ChanType,
        SymbolKind::ArrayType,
        SymbolKind::Func,
        SymbolKind::Method,
        SymbolKind::StructField,
    ];

    /// Short name used on the command line and in diagnostic strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Const => "const",
            Self::IdentType => "identType",
            Self::FuncType => "funcType",
            Self::StructType => "struct",
            Self::InterfaceType => "interface",
            Self::MapType => "mapType",
            Self::ChanType => "chanType",
            Self::ArrayType => "arrayType",
            Self::Func => "func",
            Self::Method => "method",
            Self::StructField => "field",
            Self::ParamField => "param",
            Self::ResultField => "result",
            Self::ReceiverField => "receiver",
        }
    }

    /// Returns true for kinds every filter must let through.
    ///
    /// Dropping a parameter, result or receiver would produce an invalid
    /// signature, and the package symbol is the root of filtering.
    pub fn is_unfilterable(&self) -> bool {
        matches!(
            self,
            Self::Package | Self::ParamField | Self::ResultField | Self::ReceiverField
        )
    }

    /// Returns true for the field kinds (struct, param, result, receiver).
    pub fn is_field(&self) -> bool {
        matches!(
            self,
            Self::StructField | Self::ParamField | Self::ResultField | Self::ReceiverField
        )
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolKind {
    type Err = FilterError;

    /// Parses a selectable kind name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        Self::SELECTABLE
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FilterError::UnknownSymbolKind(wanted.to_string()))
    }
}

/// A package symbol such as a const, type definition, function or field.
pub trait Symbol {
    /// Declared name; the first name for multi-name declarations.
    fn ident(&self) -> &str;

    fn is_exported(&self) -> bool {
        is_exported_ident(self.ident())
    }

    fn symbol_kind(&self) -> SymbolKind;
}

/// Go's export convention reduced to a casing test: the first character,
/// uppercased, equals itself.
///
/// Characters without case (`_`, digits) therefore count as exported. An empty
/// identifier is never exported.
pub fn is_exported_ident(name: &str) -> bool {
    match name.chars().next() {
        Some(first) => first.to_uppercase().eq(std::iter::once(first)),
        None => false,
    }
}
