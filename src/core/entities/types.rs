use serde::Serialize;
use std::fmt;

use super::{Field, Func};
use crate::core::render::{comment_block, signature_tail};
use crate::core::symbol::{Symbol, SymbolKind};

/// A type definition and the methods attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_params: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(flatten)]
    pub shape: TypeShape,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Func>,
}

/// Kind-specific shape of a [`TypeDef`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeShape {
    /// `type A B` or, with `assign`, `type A = B`.
    Alias { target: String, assign: bool },
    Struct { fields: Vec<Field> },
    Interface { signatures: Vec<Func> },
    Func {
        params: Vec<Field>,
        results: Vec<Field>,
    },
    Map { key: String, value: String },
    Chan { dir: ChanDir, elt: String },
    /// A slice when `len` is absent.
    Array {
        #[serde(skip_serializing_if = "Option::is_none")]
        len: Option<String>,
        elt: String,
    },
}

impl TypeShape {
    pub fn symbol_kind(&self) -> SymbolKind {
        match self {
            Self::Alias { .. } => SymbolKind::IdentType,
            Self::Struct { .. } => SymbolKind::StructType,
            Self::Interface { .. } => SymbolKind::InterfaceType,
            Self::Func { .. } => SymbolKind::FuncType,
            Self::Map { .. } => SymbolKind::MapType,
            Self::Chan { .. } => SymbolKind::ChanType,
            Self::Array { .. } => SymbolKind::ArrayType,
        }
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

impl ChanDir {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Both => "chan",
            Self::Send => "chan<-",
            Self::Recv => "<-chan",
        }
    }
}

impl Symbol for TypeDef {
    fn ident(&self) -> &str {
        &self.name
    }

    fn symbol_kind(&self) -> SymbolKind {
        self.shape.symbol_kind()
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&comment_block(&self.doc))?;
        write!(
            f,
            "type {}{} ",
            self.name,
            self.type_params.as_deref().unwrap_or_default()
        )?;

        match &self.shape {
            TypeShape::Alias { target, assign } => {
                if *assign {
                    f.write_str("= ")?;
                }
                f.write_str(target)?;
            }
            TypeShape::Struct { fields } => {
                f.write_str("struct {")?;
                if !fields.is_empty() {
                    f.write_str("\n")?;
                    for field in fields {
                        writeln!(f, "{field}")?;
                    }
                }
                f.write_str("}")?;
            }
            TypeShape::Interface { signatures } => {
                f.write_str("interface {")?;
                if !signatures.is_empty() {
                    f.write_str("\n")?;
                    for sig in signatures {
                        writeln!(f, "    {sig}")?;
                    }
                }
                f.write_str("}")?;
            }
            TypeShape::Func { params, results } => {
                write!(f, "func{}", signature_tail(params, results))?;
            }
            TypeShape::Map { key, value } => write!(f, "map[{key}]{value}")?,
            TypeShape::Chan { dir, elt } => write!(f, "{} {elt}", dir.prefix())?,
            TypeShape::Array { len, elt } => {
                write!(f, "[{}]{elt}", len.as_deref().unwrap_or_default())?;
            }
        }

        for method in &self.methods {
            write!(f, "\n\n{method}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typedef(name: &str, shape: TypeShape) -> TypeDef {
        TypeDef {
            name: name.to_string(),
            type_params: None,
            doc: String::new(),
            shape,
            methods: Vec::new(),
        }
    }

    #[test]
    fn test_map_type_display() {
        let m = typedef(
            "M",
            TypeShape::Map {
                key: "string".into(),
                value: "int".into(),
            },
        );
        assert_eq!(m.to_string(), "type M map[string]int");
        assert_eq!(m.symbol_kind(), SymbolKind::MapType);
    }

    #[test]
    fn test_chan_type_directions() {
        let cases = [
            (ChanDir::Both, "type C chan error"),
            (ChanDir::Send, "type C chan<- error"),
            (ChanDir::Recv, "type C <-chan error"),
        ];

        for (dir, want) in cases {
            let c = typedef(
                "C",
                TypeShape::Chan {
                    dir,
                    elt: "error".into(),
                },
            );
            assert_eq!(c.to_string(), want);
        }
    }

    #[test]
    fn test_array_and_slice_display() {
        let slice = typedef(
            "Names",
            TypeShape::Array {
                len: None,
                elt: "string".into(),
            },
        );
        let array = typedef(
            "Digest",
            TypeShape::Array {
                len: Some("32".into()),
                elt: "byte".into(),
            },
        );

        assert_eq!(slice.to_string(), "type Names []string");
        assert_eq!(array.to_string(), "type Digest [32]byte");
    }

    #[test]
    fn test_alias_display() {
        let named = typedef(
            "MyExportedType",
            TypeShape::Alias {
                target: "int".into(),
                assign: false,
            },
        );
        let alias = typedef(
            "Reader",
            TypeShape::Alias {
                target: "io.Reader".into(),
                assign: true,
            },
        );

        assert_eq!(named.to_string(), "type MyExportedType int");
        assert_eq!(alias.to_string(), "type Reader = io.Reader");
        assert_eq!(alias.symbol_kind(), SymbolKind::IdentType);
    }

    #[test]
    fn test_struct_display_with_methods() {
        let mut field = Field::new(
            SymbolKind::StructField,
            vec!["ExportedField".into()],
            "int",
        );
        field.comment = "exported field.".into();

        let mut method = Func::new("MyMethod");
        method.receiver = Some(Field::new(
            SymbolKind::ReceiverField,
            vec!["s".into()],
            "MyStruct",
        ));

        let mut s = typedef("MyStruct", TypeShape::Struct { fields: vec![field] });
        s.doc = "MyStruct is a struct.".into();
        s.methods = vec![method];

        assert_eq!(
            s.to_string(),
            "// MyStruct is a struct.\n\
             type MyStruct struct {\n\
             ExportedField int // exported field.\n\
             }\n\n\
             func (s MyStruct) MyMethod()"
        );
    }

    #[test]
    fn test_empty_struct_and_interface() {
        let s = typedef("Empty", TypeShape::Struct { fields: vec![] });
        let i = typedef("Any", TypeShape::Interface { signatures: vec![] });

        assert_eq!(s.to_string(), "type Empty struct {}");
        assert_eq!(i.to_string(), "type Any interface {}");
    }

    #[test]
    fn test_interface_display() {
        let mut sig = Func::new("MyMethod");
        sig.func_keyword = false;
        sig.results = vec![Field::new(SymbolKind::ResultField, vec![], "error")];

        let i = typedef(
            "MyInterface",
            TypeShape::Interface {
                signatures: vec![sig],
            },
        );

        assert_eq!(
            i.to_string(),
            "type MyInterface interface {\n    MyMethod() error\n}"
        );
    }

    #[test]
    fn test_func_type_display() {
        let f = typedef(
            "MyFunctionType",
            TypeShape::Func {
                params: vec![
                    Field::new(SymbolKind::ParamField, vec![], "int"),
                    Field::new(SymbolKind::ParamField, vec![], "int"),
                ],
                results: vec![Field::new(SymbolKind::ResultField, vec![], "bool")],
            },
        );

        assert_eq!(f.to_string(), "type MyFunctionType func(int, int) bool");
    }

    #[test]
    fn test_shape_serializes_with_kind_tag() {
        let m = typedef(
            "M",
            TypeShape::Map {
                key: "string".into(),
                value: "int".into(),
            },
        );

        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "M", "kind": "map", "key": "string", "value": "int"})
        );
    }
}
