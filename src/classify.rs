//! Declaration classification: one top-level declaration in, zero or more
//! symbols out.

use tracing::debug;

use crate::ast::{Declaration, FunctionDecl, TypeDecl, TypeExpr, ValueDecl};
use crate::render;
use crate::types::{Symbol, SymbolKind};

/// Decides whether a declared name is visible outside its package.
pub type ExportPredicate = fn(&str) -> bool;

/// Go's rule: a name is exported when its first character is upper case.
pub fn go_exported(name: &str) -> bool {
    return name.chars().next().is_some_and(char::is_uppercase);
}

/// Classify one declaration. Blank and unexported names produce nothing;
/// a value spec produces one symbol per exported name.
pub fn classify(decl: &Declaration, is_exported: ExportPredicate) -> Vec<Symbol> {
    let visible = |name: &str| return name != "_" && is_exported(name);

    return match decl {
        Declaration::Function(func) if visible(func.name.as_str()) => vec![function_symbol(func)],
        Declaration::Type(spec) if visible(spec.name.as_str()) => vec![type_symbol(spec)],
        Declaration::Value(spec) => spec
            .names
            .iter()
            .filter(|name| return visible(name.as_str()))
            .map(|name| return value_symbol(spec, name))
            .collect(),
        Declaration::Function(FunctionDecl { name, .. }) | Declaration::Type(TypeDecl { name, .. }) => {
            debug!(name = %name, "skipping unexported declaration");
            Vec::new()
        },
    };
}

/// Functions keep their name; methods are renamed `(Recv).Name`.
fn function_symbol(decl: &FunctionDecl) -> Symbol {
    let detail = render::expr_string(&TypeExpr::FuncType(decl.signature.clone()));
    let mut symbol = Symbol::new(decl.name.as_str(), SymbolKind::Function, detail);
    symbol.doc = decl.doc.clone().unwrap_or_default();

    if let Some(receiver) = &decl.receiver {
        symbol.kind = SymbolKind::Method;
        if let Some(first) = receiver.fields.first() {
            symbol.name = format!("({}).{}", render::expr_string(&first.ty), decl.name);
        }
    }
    return symbol;
}

fn type_symbol(decl: &TypeDecl) -> Symbol {
    let rendered = render::render(&decl.ty);
    let mut symbol = Symbol::new(decl.name.as_str(), rendered.kind, rendered.detail);
    symbol.children = rendered.children;
    symbol.doc = decl.doc.clone().unwrap_or_default();
    return symbol;
}

/// Without an explicit type the detail stays empty.
fn value_symbol(decl: &ValueDecl, name: &str) -> Symbol {
    let kind = if decl.is_const { SymbolKind::Constant } else { SymbolKind::Variable };
    let mut symbol = Symbol::new(name, kind, "");
    symbol.doc = decl.doc.clone().unwrap_or_default();

    if let Some(ty) = &decl.ty {
        let rendered = render::render(ty);
        symbol.detail = rendered.detail;
        symbol.children = rendered.children;
    }
    return symbol;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, FieldList, FuncSignature, Span};

    fn named(name: &str) -> TypeExpr {
        return TypeExpr::Named(name.to_string());
    }

    fn func(name: &str, receiver: Option<TypeExpr>) -> Declaration {
        return Declaration::Function(FunctionDecl {
            doc: Some("Does things.\n".to_string()),
            name: name.to_string(),
            receiver: receiver.map(|ty| return FieldList { fields: vec![Field { names: vec!["r".to_string()], ty }] }),
            signature: FuncSignature {
                params: FieldList { fields: vec![Field { names: vec!["n".to_string()], ty: named("int") }] },
                results: Some(FieldList { fields: vec![Field { names: Vec::new(), ty: named("error") }] }),
            },
            span: Span::default(),
        });
    }

    fn value(names: &[&str], is_const: bool, ty: Option<TypeExpr>) -> Declaration {
        return Declaration::Value(ValueDecl {
            doc: None,
            is_const,
            names: names.iter().map(|n| return (*n).to_string()).collect(),
            span: Span::default(),
            ty,
        });
    }

    #[test]
    fn exported_predicate() {
        assert!(go_exported("Config"));
        assert!(go_exported("Ünicode"));
        assert!(!go_exported("config"));
        assert!(!go_exported("_Hidden"));
        assert!(!go_exported(""));
    }

    #[test]
    fn plain_function() {
        let symbols = classify(&func("Open", None), go_exported);
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols[0].kind, SymbolKind::Function);
        assert_eq!(symbols[0].name, "Open");
        assert_eq!(symbols[0].detail, "func(n int) error");
        assert_eq!(symbols[0].doc, "Does things.\n");
    }

    #[test]
    fn value_receiver_method() {
        let symbols = classify(&func("Len", Some(named("T"))), go_exported);
        assert_eq!(symbols[0].kind, SymbolKind::Method);
        assert_eq!(symbols[0].name, "(T).Len");
        assert_eq!(symbols[0].detail, "func(n int) error");
    }

    #[test]
    fn pointer_receiver_method() {
        let recv = TypeExpr::Pointer(Box::new(TypeExpr::Generic {
            args: vec![named("K"), named("V")],
            base: Box::new(named("Map")),
        }));
        let symbols = classify(&func("Put", Some(recv)), go_exported);
        assert_eq!(symbols[0].name, "(*Map[K, V]).Put");
    }

    #[test]
    fn unexported_and_blank_are_skipped() {
        assert!(classify(&func("open", None), go_exported).is_empty());
        assert!(classify(&func("_", None), go_exported).is_empty());
        let symbols = classify(&value(&["_", "hidden", "Shown"], false, None), go_exported);
        let names: Vec<&str> = symbols.iter().map(|s| return s.name.as_str()).collect();
        assert_eq!(names, vec!["Shown"]);
    }

    #[test]
    fn constant_group_emits_one_symbol_per_name() {
        let symbols = classify(&value(&["A", "B"], true, Some(named("Mode"))), go_exported);
        assert_eq!(symbols.len(), 2);
        assert!(symbols.iter().all(|s| return s.kind == SymbolKind::Constant && s.detail == "Mode"));
    }

    #[test]
    fn inferred_variable_has_empty_detail() {
        let symbols = classify(&value(&["Default"], false, None), go_exported);
        assert_eq!(symbols[0].kind, SymbolKind::Variable);
        assert_eq!(symbols[0].detail, "");
        assert!(symbols[0].children.is_empty());
    }

    #[test]
    fn variable_of_struct_literal_gets_members() {
        let ty = TypeExpr::Struct(FieldList { fields: vec![Field { names: vec!["On".to_string()], ty: named("bool") }] });
        let symbols = classify(&value(&["Flags"], false, Some(ty)), go_exported);
        assert_eq!(symbols[0].detail, "struct{...}");
        assert_eq!(symbols[0].children, vec![Symbol::new("On", SymbolKind::Field, "bool")]);
    }

    #[test]
    fn type_declaration_delegates_to_renderer() {
        let decl = Declaration::Type(TypeDecl {
            doc: None,
            name: "Handler".to_string(),
            span: Span::default(),
            ty: TypeExpr::FuncType(FuncSignature::default()),
        });
        let symbols = classify(&decl, go_exported);
        assert_eq!(symbols[0].kind, SymbolKind::Function);
        assert_eq!(symbols[0].detail, "func()");
        assert_eq!(symbols[0].doc, "");
    }

    #[test]
    fn alternate_convention_can_be_substituted() {
        let everything: ExportPredicate = |_| return true;
        assert_eq!(classify(&func("open", None), everything).len(), 1);
        assert!(classify(&func("_", None), everything).is_empty());
    }
}
