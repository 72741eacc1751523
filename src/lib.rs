//! Extract the declarations of Go packages as filtered, self-rendering
//! entities.
//!
//! Source files are parsed with tree-sitter into a documentation AST
//! ([`analyzers::go`]), then an [`extract::Parser`] configured with a
//! [`core::FilterChain`] turns each package into a [`core::Package`] that
//! renders back to Go declaration text or serializes to JSON.

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod extract;
pub mod formatting;
pub mod io;
pub mod observability;

pub use crate::analyzers::{load_dir, load_source, DocPackage};
pub use crate::core::{
    is_exported_ident, Error, FilterAction, FilterChain, Package, Result, Symbol, SymbolFilter,
    SymbolKind,
};
pub use crate::extract::{DocMode, Parser, ParserOptions};
