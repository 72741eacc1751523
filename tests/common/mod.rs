// Shared helpers for pkgdmp integration tests
#![allow(dead_code)]

use pkgdmp::analyzers::{load_source, DocPackage};
use pkgdmp::core::Package;
use pkgdmp::extract::{Parser, ParserOptions};
use std::fs;
use std::path::PathBuf;

pub fn data_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(relative)
}

pub fn default_doc_package() -> DocPackage {
    let source = fs::read_to_string(data_path("go/default.go")).unwrap();
    load_source(&source).unwrap()
}

pub fn extract(source: &str, options: ParserOptions) -> Package {
    let dpkg = load_source(source).unwrap();
    Parser::new(options).package(&dpkg).unwrap()
}

/// Compares `actual` with `tests/data/golden/<name>.golden`, rewriting the
/// file instead when `UPDATE_GOLDEN` is set.
pub fn assert_golden(name: &str, actual: &str) {
    let path = data_path(&format!("golden/{name}.golden"));

    if std::env::var_os("UPDATE_GOLDEN").is_some() {
        fs::write(&path, actual).unwrap();
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("reading golden file {}: {e}", path.display()));
    pretty_assertions::assert_eq!(expected, actual, "golden file {name} differs");
}
