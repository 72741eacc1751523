//! Prints [`TypeExpr`] trees back to Go source text.
//!
//! Output is the compact single-line form: nested struct and interface types
//! print as `struct{ A int; B string }`.

use super::ast::{FieldNode, FuncType, InterfaceElem, TypeExpr};

pub fn type_text(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Ident(name) => name.clone(),
        TypeExpr::Qualified { package, name } => format!("{package}.{name}"),
        TypeExpr::Pointer(inner) => format!("*{}", type_text(inner)),
        TypeExpr::Ellipsis(inner) => format!("...{}", type_text(inner)),
        TypeExpr::Generic { base, args } => {
            let args: Vec<String> = args.iter().map(type_text).collect();
            format!("{}[{}]", type_text(base), args.join(", "))
        }
        TypeExpr::Paren(inner) => format!("({})", type_text(inner)),
        TypeExpr::Array { len, elt } => {
            format!("[{}]{}", len.as_deref().unwrap_or_default(), type_text(elt))
        }
        TypeExpr::Map { key, value } => format!("map[{}]{}", type_text(key), type_text(value)),
        TypeExpr::Chan { dir, value } => format!("{} {}", dir.prefix(), type_text(value)),
        TypeExpr::Func(func) => format!("func{}", signature_text(func)),
        TypeExpr::Struct(fields) => {
            if fields.is_empty() {
                return "struct{}".to_string();
            }
            let fields: Vec<String> = fields.iter().map(struct_field_text).collect();
            format!("struct{{ {} }}", fields.join("; "))
        }
        TypeExpr::Interface(elems) => {
            if elems.is_empty() {
                return "interface{}".to_string();
            }
            let elems: Vec<String> = elems.iter().map(interface_elem_text).collect();
            format!("interface{{ {} }}", elems.join("; "))
        }
        TypeExpr::Other(text) => text.clone(),
    }
}

/// `(params) results`
pub fn signature_text(func: &FuncType) -> String {
    let params = field_list_text(&func.params);
    match func.results.as_slice() {
        [] => format!("({params})"),
        [single] if single.names.is_empty() => format!("({params}) {}", type_text(&single.ty)),
        results => format!("({params}) ({})", field_list_text(results)),
    }
}

fn field_list_text(fields: &[FieldNode]) -> String {
    fields
        .iter()
        .map(param_text)
        .collect::<Vec<_>>()
        .join(", ")
}

fn param_text(field: &FieldNode) -> String {
    if field.names.is_empty() {
        type_text(&field.ty)
    } else {
        format!("{} {}", field.names.join(", "), type_text(&field.ty))
    }
}

fn struct_field_text(field: &FieldNode) -> String {
    let text = param_text(field);
    match &field.tag {
        Some(tag) => format!("{text} {tag}"),
        None => text,
    }
}

fn interface_elem_text(elem: &InterfaceElem) -> String {
    match elem {
        InterfaceElem::Method { name, func } => format!("{name}{}", signature_text(func)),
        InterfaceElem::Embedded(ty) => type_text(ty),
    }
}
