//! Language front ends producing the documentation AST.

pub mod go;

pub use go::{load_dir, load_source, DocPackage};
