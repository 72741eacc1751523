//! Go front end: tree-sitter-go parsing plus `go/doc`-style association.
//!
//! [`load_dir`] is the entry point. It yields one [`DocPackage`] per package
//! clause found in a directory, ready for [`crate::extract::Parser`].

pub mod ast;
pub mod comments;
pub mod package;
pub mod printer;
pub mod reader;
pub mod synopsis;

pub use ast::{
    DocFunc, DocPackage, DocType, Expr, FieldNode, FuncType, InterfaceElem, LitKind, TypeExpr,
    ValueGroup, ValueSpec,
};
pub use package::{build_packages, load_dir, load_source};
pub use printer::type_text;
pub use synopsis::synopsis;
