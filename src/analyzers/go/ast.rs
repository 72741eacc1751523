//! Documentation AST of one Go package.
//!
//! This is the shape the extractor consumes: top-level declarations already
//! associated the way `go/doc` associates them (consts and constructor
//! functions under their type, methods under their receiver) with doc text
//! attached. Type expressions keep their structure; everything else is text.

pub use crate::core::entities::ChanDir;

/// A Go package after association.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocPackage {
    pub name: String,
    pub doc: String,
    /// Const groups not associated with any type.
    pub consts: Vec<ValueGroup>,
    pub types: Vec<DocType>,
    /// Functions not associated with any type, plus methods whose receiver
    /// type is not declared in the package.
    pub funcs: Vec<DocFunc>,
}

/// A `const` declaration, grouped or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueGroup {
    pub doc: String,
    pub specs: Vec<ValueSpec>,
}

/// `A, B T = x, y`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<String>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<Expr>,
}

/// Constant value expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    BasicLit { kind: LitKind, value: String },
    /// A call or conversion; `fun` is the source text of the callee.
    Call { fun: String, args: Vec<Expr> },
    Ident(String),
    /// Any other expression, by grammar node kind.
    Other { kind: String, text: String },
}

impl Expr {
    /// Source text of the expression.
    pub fn text(&self) -> String {
        match self {
            Self::BasicLit { value, .. } => value.clone(),
            Self::Call { fun, args } => {
                let args: Vec<String> = args.iter().map(Expr::text).collect();
                format!("{fun}({})", args.join(", "))
            }
            Self::Ident(name) => name.clone(),
            Self::Other { text, .. } => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

impl LitKind {
    /// Default type of an untyped constant of this kind.
    pub fn default_type(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float64",
            Self::Imag => "complex128",
            Self::Char => "rune",
            Self::String => "string",
        }
    }
}

/// A type spec with everything associated with it.
#[derive(Debug, Clone, PartialEq)]
pub struct DocType {
    pub name: String,
    pub doc: String,
    pub type_params: Option<String>,
    /// `type A = B`
    pub assign: bool,
    pub ty: TypeExpr,
    pub consts: Vec<ValueGroup>,
    /// Constructors: functions returning this type.
    pub funcs: Vec<DocFunc>,
    pub methods: Vec<DocFunc>,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DocFunc {
    pub name: String,
    pub doc: String,
    pub recv: Option<FieldNode>,
    pub type_params: Option<String>,
    pub func: FuncType,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuncType {
    pub params: Vec<FieldNode>,
    pub results: Vec<FieldNode>,
}

/// One entry of a parameter list or struct field list.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Raw tag literal including its quotes.
    pub tag: Option<String>,
    pub doc: String,
    pub comment: String,
}

impl FieldNode {
    pub fn new(names: Vec<String>, ty: TypeExpr) -> Self {
        Self {
            names,
            ty,
            tag: None,
            doc: String::new(),
            comment: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceElem {
    Method { name: String, func: FuncType },
    /// Embedded interfaces and type sets.
    Embedded(TypeExpr),
}

/// Type expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Ident(String),
    Qualified { package: String, name: String },
    Pointer(Box<TypeExpr>),
    /// `...T` in a variadic parameter.
    Ellipsis(Box<TypeExpr>),
    Generic { base: Box<TypeExpr>, args: Vec<TypeExpr> },
    Paren(Box<TypeExpr>),
    /// A slice when `len` is absent.
    Array { len: Option<String>, elt: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDir, value: Box<TypeExpr> },
    Func(FuncType),
    Struct(Vec<FieldNode>),
    Interface(Vec<InterfaceElem>),
    /// Anything else (type unions, `~T`), kept as source text.
    Other(String),
}

impl TypeExpr {
    /// Name of the declared type this expression refers to, looking through
    /// pointers, parentheses and type arguments.
    pub fn base_ident(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            Self::Pointer(inner) | Self::Paren(inner) => inner.base_ident(),
            Self::Generic { base, .. } => base.base_ident(),
            _ => None,
        }
    }
}
