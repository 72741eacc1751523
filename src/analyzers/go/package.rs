//! Builds [`DocPackage`]s from parsed files.
//!
//! Association follows `go/doc`: a const group belongs to the type most of
//! its specs are typed with, a function returning exactly one package type
//! is that type's constructor and a method belongs to its receiver's type.
//! Declaration order is kept throughout.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use super::ast::{DocFunc, DocPackage, TypeExpr, ValueGroup};
use super::reader::{new_parser, parse_source, Decl, SourceFile};
use crate::core::errors::SourceError;
use crate::io::walker::go_files;

/// Parses the non-test Go files directly inside `dir`, one [`DocPackage`]
/// per package clause name, sorted by name.
pub fn load_dir(dir: &Path) -> Result<Vec<DocPackage>, SourceError> {
    let mut parser = new_parser()?;
    let mut files = Vec::new();

    for path in go_files(dir)? {
        let source = fs::read_to_string(&path).map_err(|e| SourceError::io(&path, e))?;
        trace!(path = %path.display(), bytes = source.len(), "parsing Go file");
        files.push(parse_source(&mut parser, &path, &source)?);
    }

    debug!(dir = %dir.display(), files = files.len(), "loaded Go files");
    Ok(build_packages(files))
}

/// Parses a single in-memory source as a package.
pub fn load_source(source: &str) -> Result<DocPackage, SourceError> {
    let mut parser = new_parser()?;
    let file = parse_source(&mut parser, Path::new("<source>"), source)?;
    let name = file.package.clone();
    Ok(associate(&name, &[file]))
}

pub fn build_packages(files: Vec<SourceFile>) -> Vec<DocPackage> {
    let mut by_name: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();
    for file in files {
        by_name.entry(file.package.clone()).or_default().push(file);
    }

    by_name
        .iter()
        .map(|(name, files)| associate(name, files))
        .collect()
}

/// Associates the declarations of one package's files.
pub fn associate(name: &str, files: &[SourceFile]) -> DocPackage {
    let docs: Vec<&str> = files
        .iter()
        .map(|f| f.doc.as_str())
        .filter(|doc| !doc.is_empty())
        .collect();

    let mut pkg = DocPackage {
        name: name.to_string(),
        doc: docs.join("\n"),
        ..Default::default()
    };

    let decls = || files.iter().flat_map(|f| f.decls.iter());
    let mut type_index: HashMap<String, usize> = HashMap::new();

    for decl in decls() {
        if let Decl::Type(typ) = decl {
            if typ.name.is_empty() || type_index.contains_key(&typ.name) {
                continue;
            }
            type_index.insert(typ.name.clone(), pkg.types.len());
            pkg.types.push(typ.clone());
        }
    }

    for decl in decls() {
        match decl {
            Decl::Type(_) => {}
            Decl::Const(group) => match const_owner(group, &type_index) {
                Some(i) => pkg.types[i].consts.push(group.clone()),
                None => pkg.consts.push(group.clone()),
            },
            Decl::Func(func) => {
                let owner = match &func.recv {
                    Some(recv) => recv
                        .ty
                        .base_ident()
                        .and_then(|name| type_index.get(name).copied()),
                    None => constructor_owner(func, &type_index),
                };

                match (owner, func.recv.is_some()) {
                    (Some(i), true) => pkg.types[i].methods.push(func.clone()),
                    (Some(i), false) => pkg.types[i].funcs.push(func.clone()),
                    (None, _) => pkg.funcs.push(func.clone()),
                }
            }
        }
    }

    pkg
}

/// The declared type at least 75% of the group's specs are typed with.
///
/// Specs without type or values carry the previous spec's type, as in an
/// `iota` sequence. Two different type names disqualify the group.
fn const_owner(group: &ValueGroup, types: &HashMap<String, usize>) -> Option<usize> {
    let mut dominant: Option<&str> = None;
    let mut freq = 0usize;
    let mut prev: Option<&str> = None;

    for spec in &group.specs {
        let name = match &spec.ty {
            Some(ty) => ty.base_ident(),
            None if spec.values.is_empty() => prev,
            None => None,
        };

        if let Some(name) = name {
            if dominant.is_some_and(|d| d != name) {
                return None;
            }
            dominant = Some(name);
            freq += 1;
        }

        prev = name;
    }

    let threshold = group.specs.len() * 3 / 4;
    dominant
        .filter(|_| freq >= threshold)
        .and_then(|name| types.get(name).copied())
}

/// The declared type a function constructs, if its results name exactly
/// one.
///
/// Slices and arrays of `T` (or `*T`) count as `T`; type parameters of the
/// function itself never do.
fn constructor_owner(func: &DocFunc, types: &HashMap<String, usize>) -> Option<usize> {
    let type_params = type_param_names(func.type_params.as_deref().unwrap_or_default());
    let mut owner = None;
    let mut count = 0;

    for result in &func.func.results {
        let ty = match &result.ty {
            TypeExpr::Array { elt, .. } => elt.as_ref(),
            ty => ty,
        };

        let Some(name) = ty.base_ident() else {
            continue;
        };
        if type_params.contains(&name) {
            continue;
        }

        if let Some(&index) = types.get(name) {
            owner = Some(index);
            count += 1;
            if count > 1 {
                break;
            }
        }
    }

    owner.filter(|_| count == 1)
}

/// `[K comparable, V any]` -> `["K", "V"]`
fn type_param_names(list: &str) -> Vec<&str> {
    list.trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .filter_map(|part| part.split_whitespace().next())
        .collect()
}
