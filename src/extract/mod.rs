//! Declaration extraction: documentation AST in, filtered [`Package`] out.
//!
//! [`Package`]: crate::core::entities::Package

mod options;
mod parser;

pub use options::{DocMode, ParserOptions};
pub use parser::Parser;
