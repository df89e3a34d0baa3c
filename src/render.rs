//! Type-detail rendering: classification plus canonical printing of type
//! expressions.

use crate::ast::{ChanDir, Field, FieldList, FuncSignature, OtherExpr, TypeExpr};
use crate::members;
use crate::types::{Symbol, SymbolKind};

/// Result of rendering a type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDetail {
    /// Members of struct and interface literals.
    pub children: Vec<Symbol>,
    /// Human-readable rendering.
    pub detail: String,
    /// Classification tag.
    pub kind: SymbolKind,
}

/// Print a type expression the way the Go toolchain prints it.
pub fn expr_string(expr: &TypeExpr) -> String {
    let mut buf = String::new();
    write_expr(&mut buf, expr);
    return buf;
}

/// Classify a type expression and render its detail. Struct and interface
/// literals also yield their flattened members; their detail is abbreviated.
pub fn render(expr: &TypeExpr) -> TypeDetail {
    return match expr {
        TypeExpr::Struct(fields) => {
            let children = members::flatten_members(Some(fields), SymbolKind::Field);
            let detail = if children.is_empty() { "struct{}" } else { "struct{...}" };
            TypeDetail { children, detail: detail.to_string(), kind: SymbolKind::Struct }
        },
        TypeExpr::Interface(methods) => {
            let children = members::flatten_members(Some(methods), SymbolKind::Method);
            let detail = if children.is_empty() { "interface{}" } else { "interface{...}" };
            TypeDetail { children, detail: detail.to_string(), kind: SymbolKind::Interface }
        },
        TypeExpr::FuncType(_) => TypeDetail {
            children: Vec::new(),
            detail: expr_string(expr),
            kind: SymbolKind::Function,
        },
        TypeExpr::Generic { .. }
        | TypeExpr::Named(_)
        | TypeExpr::Other(_)
        | TypeExpr::Pointer(_)
        | TypeExpr::Selector { .. } => TypeDetail {
            children: Vec::new(),
            detail: expr_string(expr),
            kind: SymbolKind::Type,
        },
    };
}

/// Append a comma-separated list of expressions.
fn write_expr_list(buf: &mut String, exprs: &[TypeExpr], sep: &str) {
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            buf.push_str(sep);
        }
        write_expr(buf, expr);
    }
}

/// Append the canonical rendering of `expr`.
fn write_expr(buf: &mut String, expr: &TypeExpr) {
    match expr {
        TypeExpr::FuncType(sig) => {
            buf.push_str("func");
            write_signature(buf, sig);
        },
        TypeExpr::Generic { args, base } => {
            write_expr(buf, base);
            buf.push('[');
            write_expr_list(buf, args, ", ");
            buf.push(']');
        },
        TypeExpr::Interface(methods) => {
            buf.push_str("interface{");
            write_field_list(buf, methods, "; ", true);
            buf.push('}');
        },
        TypeExpr::Named(name) => buf.push_str(name),
        TypeExpr::Other(other) => write_other(buf, other),
        TypeExpr::Pointer(inner) => {
            buf.push('*');
            write_expr(buf, inner);
        },
        TypeExpr::Selector { name, qualifier } => {
            write_expr(buf, qualifier);
            buf.push('.');
            buf.push_str(name);
        },
        TypeExpr::Struct(fields) => {
            buf.push_str("struct{");
            write_field_list(buf, fields, "; ", false);
            buf.push('}');
        },
    }
}

/// Append one field entry: names, then type. Interface methods drop the
/// `func` keyword.
fn write_field(buf: &mut String, field: &Field, iface: bool) {
    buf.push_str(&field.names.join(", "));
    if iface && let TypeExpr::FuncType(sig) = &field.ty {
        write_signature(buf, sig);
        return;
    }
    if !field.names.is_empty() {
        buf.push(' ');
    }
    write_expr(buf, &field.ty);
}

fn write_field_list(buf: &mut String, list: &FieldList, sep: &str, iface: bool) {
    for (i, field) in list.fields.iter().enumerate() {
        if i > 0 {
            buf.push_str(sep);
        }
        write_field(buf, field, iface);
    }
}

fn write_other(buf: &mut String, other: &OtherExpr) {
    match other {
        OtherExpr::Approx(inner) => {
            buf.push('~');
            write_expr(buf, inner);
        },
        OtherExpr::Array { elem, len } => {
            buf.push('[');
            buf.push_str(len);
            buf.push(']');
            write_expr(buf, elem);
        },
        OtherExpr::Chan { dir, elem } => {
            buf.push_str(match dir {
                ChanDir::Both => "chan ",
                ChanDir::Recv => "<-chan ",
                ChanDir::Send => "chan<- ",
            });
            write_expr(buf, elem);
        },
        OtherExpr::Ellipsis(elem) => {
            buf.push_str("...");
            write_expr(buf, elem);
        },
        OtherExpr::Map { key, value } => {
            buf.push_str("map[");
            write_expr(buf, key);
            buf.push(']');
            write_expr(buf, value);
        },
        OtherExpr::Paren(inner) => {
            buf.push('(');
            write_expr(buf, inner);
            buf.push(')');
        },
        OtherExpr::Raw(text) => buf.push_str(text),
        OtherExpr::Slice(elem) => {
            buf.push_str("[]");
            write_expr(buf, elem);
        },
        OtherExpr::Union(terms) => write_expr_list(buf, terms, " | "),
    }
}

/// Append `(params) results`. A single unnamed result is printed bare.
fn write_signature(buf: &mut String, sig: &FuncSignature) {
    buf.push('(');
    write_field_list(buf, &sig.params, ", ", false);
    buf.push(')');

    let Some(results) = &sig.results else {
        return;
    };
    if results.fields.is_empty() {
        return;
    }
    buf.push(' ');
    if let [only] = results.fields.as_slice()
        && only.names.is_empty()
    {
        write_expr(buf, &only.ty);
        return;
    }
    buf.push('(');
    write_field_list(buf, results, ", ", false);
    buf.push(')');
}
