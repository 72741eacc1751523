//! Symbol model, filter engine and declaration entities.

pub mod entities;
pub mod errors;
pub mod filter;
pub mod render;
pub mod symbol;

pub use entities::{
    ChanDir, Const, ConstGroup, Field, FieldTag, Func, Package, TypeDef, TypeShape, Value,
};
pub use errors::{Error, Result};
pub use filter::{FilterAction, FilterChain, SymbolFilter};
pub use symbol::{is_exported_ident, Symbol, SymbolKind};
