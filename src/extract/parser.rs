use tracing::{debug, debug_span, trace};

use super::options::{DocMode, ParserOptions};
use crate::analyzers::go::ast::{
    DocFunc, DocPackage, DocType, Expr, FieldNode, InterfaceElem, TypeExpr, ValueGroup,
};
use crate::analyzers::go::printer::type_text;
use crate::core::entities::{Const, ConstGroup, Field, Func, Package, TypeDef, TypeShape, Value};
use crate::core::errors::ExtractError;
use crate::core::symbol::{Symbol, SymbolKind};

/// Turns a [`DocPackage`] into a filtered [`Package`].
///
/// A parser holds no state besides its options, so one instance can extract
/// any number of packages.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
    doc_mode: DocMode,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        let doc_mode = options.doc_mode();
        Self { options, doc_mode }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Whether the filters let a package with this name through.
    pub fn accepts_package(&self, name: &str) -> bool {
        self.include(&Package::new(name, ""))
    }

    /// Extracts the package, or fails without a partial result when a
    /// constant value has an unsupported shape.
    pub fn package(&self, dpkg: &DocPackage) -> Result<Package, ExtractError> {
        let span = debug_span!("extract_package", package = %dpkg.name);
        let _enter = span.enter();

        let mut pkg = Package::new(dpkg.name.as_str(), self.doc(&dpkg.doc));

        self.consts(&mut pkg, &dpkg.consts)
            .map_err(|e| e.context("parsing constants"))?;
        self.types(&mut pkg, &dpkg.types)
            .map_err(|e| e.context("parsing types"))?;
        self.funcs(&mut pkg, &dpkg.funcs);

        debug!(
            consts = pkg.consts.len(),
            types = pkg.types.len(),
            funcs = pkg.funcs.len(),
            "extracted package"
        );

        Ok(pkg)
    }

    fn include<S: Symbol + ?Sized>(&self, symbol: &S) -> bool {
        let included = self.options.filters.include(symbol);
        if !included {
            trace!(kind = %symbol.symbol_kind(), ident = symbol.ident(), "excluded symbol");
        }
        included
    }

    fn doc(&self, text: &str) -> String {
        self.doc_mode.apply(text)
    }

    fn consts(&self, pkg: &mut Package, groups: &[ValueGroup]) -> Result<(), ExtractError> {
        for group in groups {
            let group = self.const_group(group)?;
            if !group.consts.is_empty() {
                pkg.consts.push(group);
            }
        }

        Ok(())
    }

    fn const_group(&self, group: &ValueGroup) -> Result<ConstGroup, ExtractError> {
        let mut consts = Vec::with_capacity(group.specs.len());

        for spec in &group.specs {
            let mut c = Const {
                names: spec.names.clone(),
                type_text: spec.ty.as_ref().map(type_text),
                values: Vec::with_capacity(spec.values.len()),
            };

            if !self.include(&c) {
                continue;
            }

            for expr in &spec.values {
                let value = const_value(expr, spec.ty.as_ref())
                    .map_err(|e| e.context(format!("const {}", c.names.join(", "))))?;
                c.values.push(value);
            }

            consts.push(c);
        }

        Ok(ConstGroup {
            doc: self.doc(&group.doc),
            consts,
        })
    }

    fn types(&self, pkg: &mut Package, types: &[DocType]) -> Result<(), ExtractError> {
        for typ in types {
            self.consts(pkg, &typ.consts)
                .map_err(|e| e.context(format!("parsing consts for {} type", typ.name)))?;
            self.funcs(pkg, &typ.funcs);

            let typedef = self.shape(typ).map(|shape| TypeDef {
                name: typ.name.clone(),
                type_params: typ.type_params.clone(),
                doc: self.doc(&typ.doc),
                shape,
                methods: Vec::new(),
            });

            let mut typedef = match typedef {
                Some(td) if self.include(&td) => Some(td),
                Some(_) => None,
                None => {
                    debug!(name = %typ.name, ty = %type_text(&typ.ty), "skipping unsupported type shape");
                    None
                }
            };

            for method in &typ.methods {
                let method = self.func(method);
                if !self.include(&method) {
                    continue;
                }

                match typedef.as_mut() {
                    Some(td) => td.methods.push(method),
                    None => pkg.funcs.push(method),
                }
            }

            if let Some(td) = typedef {
                pkg.types.push(td);
            }
        }

        Ok(())
    }

    fn shape(&self, typ: &DocType) -> Option<TypeShape> {
        let shape = match &typ.ty {
            TypeExpr::Ident(_) | TypeExpr::Qualified { .. } | TypeExpr::Generic { .. } => {
                TypeShape::Alias {
                    target: type_text(&typ.ty),
                    assign: typ.assign,
                }
            }
            TypeExpr::Struct(fields) => TypeShape::Struct {
                fields: self.fields(fields, SymbolKind::StructField),
            },
            TypeExpr::Interface(elems) => TypeShape::Interface {
                signatures: elems.iter().filter_map(interface_method).collect(),
            },
            TypeExpr::Func(func) => TypeShape::Func {
                params: self.fields(&func.params, SymbolKind::ParamField),
                results: self.fields(&func.results, SymbolKind::ResultField),
            },
            TypeExpr::Map { key, value } => TypeShape::Map {
                key: type_text(key),
                value: type_text(value),
            },
            TypeExpr::Chan { dir, value } => TypeShape::Chan {
                dir: *dir,
                elt: type_text(value),
            },
            TypeExpr::Array { len, elt } => TypeShape::Array {
                len: len.clone(),
                elt: type_text(elt),
            },
            TypeExpr::Pointer(_)
            | TypeExpr::Ellipsis(_)
            | TypeExpr::Paren(_)
            | TypeExpr::Other(_) => return None,
        };

        Some(shape)
    }

    fn funcs(&self, pkg: &mut Package, funcs: &[DocFunc]) {
        for func in funcs {
            let func = self.func(func);
            if self.include(&func) {
                pkg.funcs.push(func);
            }
        }
    }

    fn func(&self, df: &DocFunc) -> Func {
        let mut func = Func::new(df.name.as_str());
        func.doc = self.doc(&df.doc);
        func.type_params = df.type_params.clone();
        func.receiver = df
            .recv
            .as_ref()
            .map(|recv| self.field(recv, SymbolKind::ReceiverField));
        func.params = self.fields(&df.func.params, SymbolKind::ParamField);
        func.results = self.fields(&df.func.results, SymbolKind::ResultField);
        func
    }

    fn fields(&self, nodes: &[FieldNode], kind: SymbolKind) -> Vec<Field> {
        nodes
            .iter()
            .map(|node| self.field(node, kind))
            .filter(|field| self.include(field))
            .collect()
    }

    fn field(&self, node: &FieldNode, kind: SymbolKind) -> Field {
        let mut field = Field::new(kind, node.names.clone(), type_text(&node.ty));
        field.doc = self.doc(&node.doc);
        field.comment = self.doc(&node.comment);

        match &node.tag {
            Some(tag) if !self.options.exclude_tags => field.with_tag(tag.trim_matches('`')),
            _ => field,
        }
    }
}

/// Interface methods carry no receiver, keyword or docs and are never
/// filtered. Embedded elements are dropped.
fn interface_method(elem: &InterfaceElem) -> Option<Func> {
    let InterfaceElem::Method { name, func } = elem else {
        return None;
    };

    let field = |node: &FieldNode, kind| Field::new(kind, node.names.clone(), type_text(&node.ty));

    let mut sig = Func::new(name.as_str());
    sig.func_keyword = false;
    sig.params = func
        .params
        .iter()
        .map(|p| field(p, SymbolKind::ParamField))
        .collect();
    sig.results = func
        .results
        .iter()
        .map(|r| field(r, SymbolKind::ResultField))
        .collect();
    Some(sig)
}

/// Value and type of one constant expression.
///
/// Literals take their default type, calls (conversions) the callee's name,
/// identifiers (`iota`, other constants) their own name. An explicit spec
/// type overrides all of these.
fn const_value(expr: &Expr, spec_type: Option<&TypeExpr>) -> Result<Value, ExtractError> {
    let mut value = match expr {
        Expr::BasicLit { kind, value } => Value {
            value: value.clone(),
            type_text: kind.default_type().to_string(),
            specific: false,
            expr: value.clone(),
        },
        Expr::Call { fun, args } => Value {
            value: match args.first() {
                Some(Expr::BasicLit { value, .. }) => value.clone(),
                _ => String::new(),
            },
            type_text: fun.clone(),
            specific: true,
            expr: expr.text(),
        },
        Expr::Ident(name) => Value {
            value: String::new(),
            type_text: name.clone(),
            specific: false,
            expr: name.clone(),
        },
        Expr::Other { kind, text } => {
            return Err(ExtractError::unsupported_value(kind.as_str(), text.as_str()))
        }
    };

    if let Some(ty) = spec_type {
        value.type_text = type_text(ty);
        value.specific = true;
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::go::load_source;
    use crate::core::filter::{FilterAction, SymbolFilter};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn extract(source: &str, options: ParserOptions) -> Result<Package, ExtractError> {
        let dpkg = load_source(source).unwrap();
        Parser::new(options).package(&dpkg)
    }

    fn exclude_unexported() -> ParserOptions {
        ParserOptions::new().with_symbol_filters([SymbolFilter::unexported(FilterAction::Exclude)])
    }

    #[test]
    fn test_const_value_inference() {
        let pkg = extract(
            indoc! {r#"
                package p

                const (
                    I = 1
                    F = 1.5
                    C = 2i
                    R = 'r'
                    S = "s"
                    D = Duration(5)
                    X = iota
                    T uint8 = 7
                )
            "#},
            ParserOptions::new(),
        )
        .unwrap();

        let values: Vec<(&str, &str, bool)> = pkg.consts[0]
            .consts
            .iter()
            .map(|c| {
                let v = &c.values[0];
                (v.value.as_str(), v.type_text.as_str(), v.specific)
            })
            .collect();

        assert_eq!(
            values,
            vec![
                ("1", "int", false),
                ("1.5", "float64", false),
                ("2i", "complex128", false),
                ("'r'", "rune", false),
                ("\"s\"", "string", false),
                ("5", "Duration", true),
                ("", "iota", false),
                ("7", "uint8", true),
            ]
        );
    }

    #[test]
    fn test_unsupported_const_value_is_fatal_with_context() {
        let err = extract("package p\n\nconst Shift = 1 << 3\n", ParserOptions::new()).unwrap_err();

        assert!(matches!(
            err.root(),
            ExtractError::UnsupportedConstValue { kind, .. } if kind == "binary_expression"
        ));
        assert_eq!(
            err.to_string(),
            "parsing constants: const Shift: unsupported const value `1 << 3` (binary_expression)"
        );
    }

    #[test]
    fn test_typed_const_error_names_type() {
        let err = extract(
            "package p\n\ntype Size int\n\nconst Big Size = 1 << 10\n",
            ParserOptions::new(),
        )
        .unwrap_err();

        assert!(err
            .to_string()
            .starts_with("parsing types: parsing consts for Size type: const Big:"));
    }

    #[test]
    fn test_excluded_const_values_are_not_evaluated() {
        let pkg = extract("package p\n\nconst shift = 1 << 3\n", exclude_unexported()).unwrap();
        assert!(pkg.consts.is_empty());
    }

    #[test]
    fn test_struct_fields_filtered_interface_methods_not() {
        let pkg = extract(
            indoc! {"
                package p

                type S struct {
                    Exported int
                    hidden   int
                }

                type I interface {
                    Public()
                    private()
                }
            "},
            exclude_unexported(),
        )
        .unwrap();

        let TypeShape::Struct { fields } = &pkg.types[0].shape else {
            panic!("expected struct");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].names, vec!["Exported"]);

        let TypeShape::Interface { signatures } = &pkg.types[1].shape else {
            panic!("expected interface");
        };
        let names: Vec<&str> = signatures.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Public", "private"]);
    }

    #[test]
    fn test_excluded_type_promotes_methods() {
        let pkg = extract(
            indoc! {"
                package p

                type S struct{}

                func NewS() *S { return nil }

                func (s S) First() {}
                func (s S) Second() {}

                func Later() {}
            "},
            ParserOptions::new().with_symbol_filters([SymbolFilter::kinds(
                FilterAction::Exclude,
                [SymbolKind::StructType],
            )]),
        )
        .unwrap();

        assert!(pkg.types.is_empty());
        let names: Vec<&str> = pkg.funcs.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["NewS", "First", "Second", "Later"]);
        assert_eq!(
            pkg.funcs[1].receiver.as_ref().map(|r| r.type_text.as_str()),
            Some("S")
        );
    }

    #[test]
    fn test_unsupported_type_shape_is_skipped_but_methods_kept() {
        let pkg = extract(
            indoc! {"
                package p

                type Ptr *int

                func (p Ptr) Deref() int { return 0 }
            "},
            ParserOptions::new(),
        )
        .unwrap();

        assert!(pkg.types.is_empty());
        assert_eq!(pkg.funcs.len(), 1);
        assert_eq!(pkg.funcs[0].name, "Deref");
    }

    #[test]
    fn test_field_tags_and_no_tags() {
        let source = indoc! {r#"
            package p

            type S struct {
                Name string `json:"name,omitempty"`
            }
        "#};

        let pkg = extract(source, ParserOptions::new()).unwrap();
        let TypeShape::Struct { fields } = &pkg.types[0].shape else {
            panic!("expected struct");
        };
        assert_eq!(fields[0].tag.as_deref(), Some(r#"json:"name,omitempty""#));
        assert_eq!(fields[0].tags[0].values, vec!["name", "omitempty"]);

        let pkg = extract(source, ParserOptions::new().with_no_tags()).unwrap();
        let TypeShape::Struct { fields } = &pkg.types[0].shape else {
            panic!("expected struct");
        };
        assert!(fields[0].tag.is_none());
        assert!(fields[0].tags.is_empty());
    }

    #[test]
    fn test_multi_line_field_comment_stays_commented() {
        let pkg = extract(
            "package p\n\ntype T struct {\n\tA int /* first\n\tsecond */\n}\n",
            ParserOptions::new().with_full_docs(),
        )
        .unwrap();

        let text = pkg.to_string();
        assert!(text.contains("A int // first second\n}"), "{text}");
        assert!(text.lines().all(|line| line.trim() != "second"), "{text}");
    }

    #[test]
    fn test_one_line_struct_comment_not_on_field() {
        let pkg = extract(
            "package p\n\ntype T struct{ A int } // about T\n",
            ParserOptions::new(),
        )
        .unwrap();

        let TypeShape::Struct { fields } = &pkg.types[0].shape else {
            panic!("expected struct");
        };
        assert_eq!(fields[0].comment, "");
        assert!(!pkg.to_string().contains("about T"));
    }

    #[test]
    fn test_accepts_package() {
        let parser = Parser::new(ParserOptions::new().with_symbol_filters([
            SymbolFilter::unexported(FilterAction::Exclude),
            SymbolFilter::packages(FilterAction::Exclude, ["main"]),
        ]));

        assert!(parser.accepts_package("lib"));
        assert!(!parser.accepts_package("main"));
    }

    #[test]
    fn test_doc_modes() {
        let source = "package p\n\n// Foo does X. It also does Y.\nfunc Foo() {}\n";

        let synopsis = extract(source, ParserOptions::new()).unwrap();
        let full = extract(source, ParserOptions::new().with_full_docs()).unwrap();
        let none = extract(source, ParserOptions::new().with_no_docs()).unwrap();

        assert_eq!(synopsis.funcs[0].doc, "Foo does X.");
        assert_eq!(full.funcs[0].doc, "Foo does X. It also does Y.");
        assert_eq!(none.funcs[0].doc, "");
    }
}
