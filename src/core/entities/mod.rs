//! Declaration entities: the filtered, self-rendering view of a package.
//!
//! Each entity implements [`crate::core::symbol::Symbol`] so the filter chain
//! can judge it, `Serialize` for structured output and `Display` for
//! declaration text. `Display` output is valid Go but not whitespace-perfect;
//! see [`Package::source`] for the normalized form.

mod consts;
mod field;
mod func;
mod package;
mod types;

pub use consts::{Const, ConstGroup, Value};
pub use field::{parse_field_tags, Field, FieldTag};
pub use func::Func;
pub use package::Package;
pub use types::{ChanDir, TypeDef, TypeShape};
