//! Reads one Go source file into top-level declarations.
//!
//! Only what the documentation AST needs is kept: const declarations, type
//! specs and function/method signatures. Bodies, vars and imports are
//! skipped.

use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

use super::ast::{
    ChanDir, DocFunc, DocType, Expr, FieldNode, FuncType, InterfaceElem, LitKind, TypeExpr,
    ValueGroup, ValueSpec,
};
use super::comments::CommentIndex;
use crate::core::errors::SourceError;

/// A parsed file before declarations are associated across the package.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub package: String,
    pub doc: String,
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Const(ValueGroup),
    Type(DocType),
    Func(DocFunc),
}

pub fn new_parser() -> Result<Parser, SourceError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    Ok(parser)
}

/// Parses `source`, failing on any syntax error.
pub fn parse_source(parser: &mut Parser, path: &Path, source: &str) -> Result<SourceFile, SourceError> {
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| SourceError::NoTree {
            path: path.to_path_buf(),
        })?;

    check_syntax(&tree, path)?;

    let root = tree.root_node();
    let reader = Reader {
        source,
        comments: CommentIndex::build(root, source),
    };

    Ok(reader.file(root, path))
}

fn check_syntax(tree: &Tree, path: &Path) -> Result<(), SourceError> {
    let root = tree.root_node();
    if !root.has_error() {
        return Ok(());
    }

    let position = first_error(root)
        .unwrap_or(root)
        .start_position();

    Err(SourceError::Syntax {
        path: path.to_path_buf(),
        line: position.row + 1,
        column: position.column + 1,
    })
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

/// Named children without interleaved comments.
fn named<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

struct Reader<'a> {
    source: &'a str,
    comments: CommentIndex,
}

impl<'a> Reader<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|child| self.text(child).to_string())
    }

    fn field_names(&self, node: Node<'_>, field: &str) -> Vec<String> {
        let mut cursor = node.walk();
        node.children_by_field_name(field, &mut cursor)
            .map(|child| self.text(child).to_string())
            .collect()
    }

    fn file(&self, root: Node<'_>, path: &Path) -> SourceFile {
        let mut file = SourceFile {
            path: path.to_path_buf(),
            package: String::new(),
            doc: String::new(),
            decls: Vec::new(),
        };

        for node in named(root) {
            match node.kind() {
                "package_clause" => {
                    file.doc = self.comments.doc_for(node.start_position().row);
                    file.package = named(node)
                        .first()
                        .map(|ident| self.text(*ident).to_string())
                        .unwrap_or_default();
                }
                "const_declaration" => file.decls.push(Decl::Const(self.const_decl(node))),
                "type_declaration" => {
                    let decl_doc = self.comments.doc_for(node.start_position().row);
                    for spec in named(node) {
                        if matches!(spec.kind(), "type_spec" | "type_alias") {
                            file.decls.push(Decl::Type(self.type_spec(spec, &decl_doc)));
                        }
                    }
                }
                "function_declaration" | "method_declaration" => {
                    file.decls.push(Decl::Func(self.func_decl(node)));
                }
                _ => {}
            }
        }

        file
    }

    fn const_decl(&self, node: Node<'_>) -> ValueGroup {
        ValueGroup {
            doc: self.comments.doc_for(node.start_position().row),
            specs: named(node)
                .into_iter()
                .filter(|spec| spec.kind() == "const_spec")
                .map(|spec| self.const_spec(spec))
                .collect(),
        }
    }

    fn const_spec(&self, node: Node<'_>) -> ValueSpec {
        let values = node
            .child_by_field_name("value")
            .map(|list| named(list).into_iter().map(|v| self.expr(v)).collect())
            .unwrap_or_default();

        ValueSpec {
            names: self.field_names(node, "name"),
            ty: node.child_by_field_name("type").map(|t| self.type_expr(t)),
            values,
        }
    }

    fn expr(&self, node: Node<'_>) -> Expr {
        let lit = |kind| Expr::BasicLit {
            kind,
            value: self.text(node).to_string(),
        };

        match node.kind() {
            "int_literal" => lit(LitKind::Int),
            "float_literal" => lit(LitKind::Float),
            "imaginary_literal" => lit(LitKind::Imag),
            "rune_literal" => lit(LitKind::Char),
            "interpreted_string_literal" | "raw_string_literal" => lit(LitKind::String),
            "identifier" | "true" | "false" | "nil" | "iota" => {
                Expr::Ident(self.text(node).to_string())
            }
            "call_expression" => Expr::Call {
                fun: self.field_text(node, "function").unwrap_or_default(),
                args: node
                    .child_by_field_name("arguments")
                    .map(|args| named(args).into_iter().map(|a| self.expr(a)).collect())
                    .unwrap_or_default(),
            },
            "type_conversion_expression" => Expr::Call {
                fun: self.field_text(node, "type").unwrap_or_default(),
                args: node
                    .child_by_field_name("operand")
                    .map(|operand| vec![self.expr(operand)])
                    .unwrap_or_default(),
            },
            kind => Expr::Other {
                kind: kind.to_string(),
                text: self.text(node).to_string(),
            },
        }
    }

    fn type_spec(&self, node: Node<'_>, decl_doc: &str) -> DocType {
        let doc = self.comments.doc_for(node.start_position().row);
        let doc = if doc.is_empty() {
            decl_doc.to_string()
        } else {
            doc
        };

        DocType {
            name: self.field_text(node, "name").unwrap_or_default(),
            doc,
            type_params: self.field_text(node, "type_parameters"),
            assign: node.kind() == "type_alias",
            ty: node
                .child_by_field_name("type")
                .map(|t| self.type_expr(t))
                .unwrap_or_else(|| TypeExpr::Other(String::new())),
            consts: Vec::new(),
            funcs: Vec::new(),
            methods: Vec::new(),
        }
    }

    fn func_decl(&self, node: Node<'_>) -> DocFunc {
        let recv = node
            .child_by_field_name("receiver")
            .and_then(|list| self.params(list).into_iter().next());

        DocFunc {
            name: self.field_text(node, "name").unwrap_or_default(),
            doc: self.comments.doc_for(node.start_position().row),
            recv,
            type_params: self.field_text(node, "type_parameters"),
            func: self.signature(node),
        }
    }

    /// Parameters and results of a node with `parameters`/`result` fields.
    fn signature(&self, node: Node<'_>) -> FuncType {
        let params = node
            .child_by_field_name("parameters")
            .map(|list| self.params(list))
            .unwrap_or_default();

        let results = match node.child_by_field_name("result") {
            Some(list) if list.kind() == "parameter_list" => self.params(list),
            Some(ty) => vec![FieldNode::new(Vec::new(), self.type_expr(ty))],
            None => Vec::new(),
        };

        FuncType { params, results }
    }

    fn params(&self, list: Node<'_>) -> Vec<FieldNode> {
        named(list)
            .into_iter()
            .filter_map(|param| {
                let ty = param.child_by_field_name("type").map(|t| self.type_expr(t))?;
                let names = self.field_names(param, "name");

                match param.kind() {
                    "parameter_declaration" => Some(FieldNode::new(names, ty)),
                    "variadic_parameter_declaration" => {
                        Some(FieldNode::new(names, TypeExpr::Ellipsis(Box::new(ty))))
                    }
                    _ => None,
                }
            })
            .collect()
    }

    fn type_expr(&self, node: Node<'_>) -> TypeExpr {
        let child = |field: &str| {
            Box::new(
                node.child_by_field_name(field)
                    .map(|c| self.type_expr(c))
                    .unwrap_or_else(|| TypeExpr::Other(String::new())),
            )
        };
        let first_named = || {
            Box::new(
                named(node)
                    .first()
                    .map(|c| self.type_expr(*c))
                    .unwrap_or_else(|| TypeExpr::Other(String::new())),
            )
        };

        match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Ident(self.text(node).to_string()),
            "qualified_type" => TypeExpr::Qualified {
                package: self.field_text(node, "package").unwrap_or_default(),
                name: self.field_text(node, "name").unwrap_or_default(),
            },
            "pointer_type" => TypeExpr::Pointer(first_named()),
            "parenthesized_type" => TypeExpr::Paren(first_named()),
            "generic_type" => TypeExpr::Generic {
                base: child("type"),
                args: node
                    .child_by_field_name("type_arguments")
                    .map(|args| named(args).into_iter().map(|a| self.type_expr(a)).collect())
                    .unwrap_or_default(),
            },
            "type_elem" | "constraint_elem" => match named(node).as_slice() {
                [single] => self.type_expr(*single),
                _ => TypeExpr::Other(self.text(node).to_string()),
            },
            "array_type" => TypeExpr::Array {
                len: self.field_text(node, "length"),
                elt: child("element"),
            },
            "implicit_length_array_type" => TypeExpr::Array {
                len: Some("...".to_string()),
                elt: child("element"),
            },
            "slice_type" => TypeExpr::Array {
                len: None,
                elt: child("element"),
            },
            "map_type" => TypeExpr::Map {
                key: child("key"),
                value: child("value"),
            },
            "channel_type" => TypeExpr::Chan {
                dir: chan_dir(node),
                value: child("value"),
            },
            "function_type" => TypeExpr::Func(self.signature(node)),
            "struct_type" => TypeExpr::Struct(self.struct_fields(node)),
            "interface_type" => TypeExpr::Interface(self.interface_elems(node)),
            _ => TypeExpr::Other(self.text(node).to_string()),
        }
    }

    fn struct_fields(&self, node: Node<'_>) -> Vec<FieldNode> {
        let Some(list) = named(node)
            .into_iter()
            .find(|c| c.kind() == "field_declaration_list")
        else {
            return Vec::new();
        };

        named(list)
            .into_iter()
            .filter(|decl| decl.kind() == "field_declaration")
            .filter_map(|decl| {
                let names = self.field_names(decl, "name");
                let mut ty = decl.child_by_field_name("type").map(|t| self.type_expr(t))?;

                if names.is_empty() && has_token(decl, "*") {
                    ty = TypeExpr::Pointer(Box::new(ty));
                }

                let mut field = FieldNode::new(names, ty);
                field.tag = self.field_text(decl, "tag");
                field.doc = self.comments.doc_for(decl.start_position().row);
                field.comment = self
                    .comments
                    .trailing_before(decl.end_position().row, list.end_byte());
                Some(field)
            })
            .collect()
    }

    fn interface_elems(&self, node: Node<'_>) -> Vec<InterfaceElem> {
        named(node)
            .into_iter()
            .map(|elem| match elem.kind() {
                "method_elem" | "method_spec" => InterfaceElem::Method {
                    name: self.field_text(elem, "name").unwrap_or_default(),
                    func: self.signature(elem),
                },
                _ => InterfaceElem::Embedded(self.type_expr(elem)),
            })
            .collect()
    }
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == token);
    found
}

/// `chan T`, `chan<- T` or `<-chan T`.
fn chan_dir(node: Node<'_>) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node
        .children(&mut cursor)
        .filter(|c| !c.is_named())
        .map(|c| c.kind())
        .collect();

    match tokens.as_slice() {
        ["<-", "chan", ..] => ChanDir::Recv,
        ["chan", "<-", ..] => ChanDir::Send,
        _ => ChanDir::Both,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::go::printer::type_text;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn read(source: &str) -> SourceFile {
        let mut parser = new_parser().unwrap();
        parse_source(&mut parser, Path::new("test.go"), source).unwrap()
    }

    fn types(file: &SourceFile) -> Vec<&DocType> {
        file.decls
            .iter()
            .filter_map(|d| match d {
                Decl::Type(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_package_clause_and_doc() {
        let file = read(indoc! {"
            // Package demo does things.
            package demo
        "});

        assert_eq!(file.package, "demo");
        assert_eq!(file.doc, "Package demo does things.");
        assert!(file.decls.is_empty());
    }

    #[test]
    fn test_syntax_error_is_reported_with_position() {
        let mut parser = new_parser().unwrap();
        let err = parse_source(&mut parser, Path::new("bad.go"), "package p\n\nfunc (\n")
            .unwrap_err();

        assert!(matches!(err, SourceError::Syntax { .. }), "{err}");
    }

    #[test]
    fn test_const_values() {
        let file = read(indoc! {r#"
            package p

            // Group doc.
            const (
                A = 1
                B float32 = 2.5
                C = time.Duration(5)
                D = iota
                E
                F = 'x'
                G = "s"
            )
        "#});

        let Decl::Const(group) = &file.decls[0] else {
            panic!("expected const group");
        };

        assert_eq!(group.doc, "Group doc.");
        assert_eq!(group.specs.len(), 7);
        assert_eq!(
            group.specs[0].values,
            vec![Expr::BasicLit {
                kind: LitKind::Int,
                value: "1".into()
            }]
        );
        assert_eq!(group.specs[1].ty, Some(TypeExpr::Ident("float32".into())));
        assert_eq!(
            group.specs[2].values,
            vec![Expr::Call {
                fun: "time.Duration".into(),
                args: vec![Expr::BasicLit {
                    kind: LitKind::Int,
                    value: "5".into()
                }],
            }]
        );
        assert_eq!(group.specs[3].values, vec![Expr::Ident("iota".into())]);
        assert!(group.specs[4].values.is_empty());
        assert!(matches!(
            group.specs[5].values[0],
            Expr::BasicLit {
                kind: LitKind::Char,
                ..
            }
        ));
        assert!(matches!(
            group.specs[6].values[0],
            Expr::BasicLit {
                kind: LitKind::String,
                ..
            }
        ));
    }

    #[test]
    fn test_unsupported_const_value_is_other() {
        let file = read("package p\n\nconst Shift = 1 << 3\n");
        let Decl::Const(group) = &file.decls[0] else {
            panic!("expected const group");
        };

        assert!(matches!(
            &group.specs[0].values[0],
            Expr::Other { kind, text } if kind == "binary_expression" && text == "1 << 3"
        ));
    }

    #[test]
    fn test_type_shapes() {
        let file = read(indoc! {"
            package p

            type (
                // M doc.
                M map[string][]int
                S chan<- error
                R <-chan int
                B chan bool
                A [4]byte
                Sl []string
                F func(a, b int, rest ...string) (ok bool)
                Alias = io.Reader
                P *int
            )
        "});

        let ts = types(&file);
        let texts: Vec<String> = ts.iter().map(|t| type_text(&t.ty)).collect();
        assert_eq!(
            texts,
            vec![
                "map[string][]int",
                "chan<- error",
                "<-chan int",
                "chan bool",
                "[4]byte",
                "[]string",
                "func(a, b int, rest ...string) (ok bool)",
                "io.Reader",
                "*int",
            ]
        );
        assert_eq!(ts[0].doc, "M doc.");
        assert!(ts[7].assign);
        assert!(!ts[0].assign);
    }

    #[test]
    fn test_struct_fields_with_tags_and_comments() {
        let file = read(indoc! {r#"
            package p

            // T doc.
            type T struct {
                // Name doc.
                Name string `json:"name"` // the name
                a, b int
                *sync.Mutex
                io.Reader
            }
        "#});

        let ts = types(&file);
        assert_eq!(ts[0].doc, "T doc.");

        let TypeExpr::Struct(fields) = &ts[0].ty else {
            panic!("expected struct");
        };

        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0].names, vec!["Name"]);
        assert_eq!(fields[0].tag.as_deref(), Some("`json:\"name\"`"));
        assert_eq!(fields[0].doc, "Name doc.");
        assert_eq!(fields[0].comment, "the name");
        assert_eq!(fields[1].names, vec!["a", "b"]);
        assert_eq!(type_text(&fields[2].ty), "*sync.Mutex");
        assert!(fields[3].names.is_empty());
        assert_eq!(type_text(&fields[3].ty), "io.Reader");
    }

    #[test]
    fn test_one_line_struct_leaves_type_comment_off_fields() {
        let file = read(indoc! {"
            package p

            type T struct{ A int } // about T

            type U struct{ B int /* about B */ }
        "});

        let ts = types(&file);
        let TypeExpr::Struct(t_fields) = &ts[0].ty else {
            panic!("expected struct");
        };
        let TypeExpr::Struct(u_fields) = &ts[1].ty else {
            panic!("expected struct");
        };

        assert_eq!(t_fields[0].comment, "");
        assert_eq!(u_fields[0].comment.trim(), "about B");
    }

    #[test]
    fn test_interface_elements() {
        let file = read(indoc! {"
            package p

            type I interface {
                fmt.Stringer
                Do(ctx context.Context) error
            }
        "});

        let TypeExpr::Interface(elems) = &types(&file)[0].ty else {
            panic!("expected interface");
        };

        assert_eq!(elems.len(), 2);
        assert!(matches!(&elems[0], InterfaceElem::Embedded(_)));
        assert!(matches!(&elems[1], InterfaceElem::Method { name, .. } if name == "Do"));
    }

    #[test]
    fn test_functions_and_methods() {
        let file = read(indoc! {"
            package p

            // New builds a T.
            func New[K comparable](k K) (*T, error) { return nil, nil }

            func (t *T) Close() {}
        "});

        let funcs: Vec<&DocFunc> = file
            .decls
            .iter()
            .filter_map(|d| match d {
                Decl::Func(f) => Some(f),
                _ => None,
            })
            .collect();

        assert_eq!(funcs[0].name, "New");
        assert_eq!(funcs[0].doc, "New builds a T.");
        assert_eq!(funcs[0].type_params.as_deref(), Some("[K comparable]"));
        assert_eq!(funcs[0].func.results.len(), 2);
        assert!(funcs[0].recv.is_none());

        let recv = funcs[1].recv.as_ref().unwrap();
        assert_eq!(recv.names, vec!["t"]);
        assert_eq!(type_text(&recv.ty), "*T");
        assert!(funcs[1].func.results.is_empty());
    }
}
