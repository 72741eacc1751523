use serde::Serialize;
use std::fmt;

use super::Field;
use crate::core::render::{comment_block, signature_tail};
use crate::core::symbol::{Symbol, SymbolKind};

/// A function, a method (when `receiver` is set) or an interface method
/// signature (when `func_keyword` is false).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Func {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Field>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_params: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub doc: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<Field>,
    #[serde(skip)]
    pub func_keyword: bool,
}

impl Func {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            receiver: None,
            name: name.into(),
            type_params: None,
            doc: String::new(),
            params: Vec::new(),
            results: Vec::new(),
            func_keyword: true,
        }
    }

    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

impl Symbol for Func {
    fn ident(&self) -> &str {
        &self.name
    }

    fn symbol_kind(&self) -> SymbolKind {
        if self.is_method() {
            SymbolKind::Method
        } else {
            SymbolKind::Func
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&comment_block(&self.doc))?;

        if self.func_keyword {
            f.write_str("func ")?;
        }

        if let Some(receiver) = &self.receiver {
            write!(f, "({}) ", receiver.signature())?;
        }

        write!(
            f,
            "{}{}{}",
            self.name,
            self.type_params.as_deref().unwrap_or_default(),
            signature_tail(&self.params, &self.results)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn param(names: &[&str], ty: &str) -> Field {
        Field::new(
            SymbolKind::ParamField,
            names.iter().map(|n| n.to_string()).collect(),
            ty,
        )
    }

    fn result(ty: &str) -> Field {
        Field::new(SymbolKind::ResultField, vec![], ty)
    }

    #[test]
    fn test_function_display() {
        let mut func = Func::new("NewMyStruct");
        func.doc = "NewMyStruct is an example constructor function for [MyStruct]".into();
        func.params = vec![param(&["n"], "int")];
        func.results = vec![result("*MyStruct"), result("error")];

        assert_eq!(
            func.to_string(),
            "// NewMyStruct is an example constructor function for [MyStruct]\n\
             func NewMyStruct(n int) (*MyStruct, error)"
        );
        assert_eq!(func.symbol_kind(), SymbolKind::Func);
    }

    #[test]
    fn test_method_display() {
        let mut method = Func::new("myUnexportedMethod");
        method.receiver = Some(Field::new(
            SymbolKind::ReceiverField,
            vec!["s".into()],
            "MyStruct",
        ));
        method.params = vec![param(&["a", "b"], "string")];
        method.results = vec![result("string")];

        assert_eq!(
            method.to_string(),
            "func (s MyStruct) myUnexportedMethod(a, b string) string"
        );
        assert_eq!(method.symbol_kind(), SymbolKind::Method);
        assert!(!method.is_exported());
    }

    #[test]
    fn test_interface_signature_display() {
        let mut sig = Func::new("MyMethod");
        sig.func_keyword = false;
        sig.results = vec![result("error")];

        assert_eq!(sig.to_string(), "MyMethod() error");
    }

    #[test]
    fn test_generic_function_display() {
        let mut func = Func::new("Map");
        func.type_params = Some("[T, U any]".into());
        func.params = vec![param(&["in"], "[]T"), param(&["fn"], "func(T) U")];
        func.results = vec![result("[]U")];

        assert_eq!(
            func.to_string(),
            "func Map[T, U any](in []T, fn func(T) U) []U"
        );
    }
}
