//! Flattening of struct fields and interface elements into child symbols.

use tracing::debug;

use crate::ast::{FieldList, TypeExpr};
use crate::render;
use crate::types::{Symbol, SymbolKind};

/// Display identifier for an embedded member, or `None` when the embedding
/// is not a (possibly pointer-to, possibly instantiated, possibly qualified)
/// type name.
///
/// An embedded field must be a type name `T` or a pointer to a non-interface
/// type name `*T`. One layer of instantiation (`T[A]`) and one layer of
/// package qualification (`pkg.T`) are tolerated.
pub fn embedded_ident(expr: &TypeExpr) -> Option<&str> {
    let expr = match expr {
        TypeExpr::Pointer(inner) => inner.as_ref(),
        other => other,
    };
    let expr = match expr {
        TypeExpr::Generic { base, .. } => base.as_ref(),
        other => other,
    };
    return match expr {
        TypeExpr::Named(name) => Some(name.as_str()),
        TypeExpr::Selector { name, qualifier } if matches!(qualifier.as_ref(), TypeExpr::Named(_)) => {
            Some(name.as_str())
        },
        TypeExpr::FuncType(_)
        | TypeExpr::Generic { .. }
        | TypeExpr::Interface(_)
        | TypeExpr::Other(_)
        | TypeExpr::Pointer(_)
        | TypeExpr::Selector { .. }
        | TypeExpr::Struct(_) => None,
    };
}

/// Produce one child symbol per declared member name, in source order.
///
/// Named entries take `kind`; embedded entries are always fields. Only one
/// level is produced: the members' own members are dropped, so
/// self-referential types stay finite.
pub fn flatten_members(fields: Option<&FieldList>, kind: SymbolKind) -> Vec<Symbol> {
    let Some(fields) = fields else {
        return Vec::new();
    };

    let mut symbols = Vec::new();
    for field in &fields.fields {
        let detail = render::render(&field.ty).detail;

        if !field.names.is_empty() {
            for name in &field.names {
                symbols.push(Symbol::new(name.as_str(), kind, detail.as_str()));
            }
            continue;
        }

        let name = embedded_ident(&field.ty).map_or_else(|| return detail.clone(), str::to_string);
        if name.is_empty() {
            debug!("dropping embedded member with empty rendering");
            continue;
        }
        symbols.push(Symbol::new(name, SymbolKind::Field, detail));
    }
    return symbols;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, FuncSignature, OtherExpr};

    fn named(name: &str) -> TypeExpr {
        return TypeExpr::Named(name.to_string());
    }

    fn qualified(pkg: &str, name: &str) -> TypeExpr {
        return TypeExpr::Selector { name: name.to_string(), qualifier: Box::new(named(pkg)) };
    }

    fn embedded(ty: TypeExpr) -> Field {
        return Field { names: Vec::new(), ty };
    }

    #[test]
    fn bare_identifier_embedding() {
        assert_eq!(embedded_ident(&named("Foo")), Some("Foo"));
    }

    #[test]
    fn pointer_to_qualified_embedding() {
        let expr = TypeExpr::Pointer(Box::new(qualified("pkg", "Foo")));
        assert_eq!(embedded_ident(&expr), Some("Foo"));
    }

    #[test]
    fn instantiated_embedding_uses_base_name() {
        let expr = TypeExpr::Pointer(Box::new(TypeExpr::Generic {
            args: vec![named("T")],
            base: Box::new(qualified("list", "List")),
        }));
        assert_eq!(embedded_ident(&expr), Some("List"));
    }

    #[test]
    fn only_one_pointer_layer_is_stripped() {
        let expr = TypeExpr::Pointer(Box::new(TypeExpr::Pointer(Box::new(named("Foo")))));
        assert_eq!(embedded_ident(&expr), None);
    }

    #[test]
    fn nested_selector_is_rejected() {
        let expr = TypeExpr::Selector { name: "C".to_string(), qualifier: Box::new(qualified("a", "b")) };
        assert_eq!(embedded_ident(&expr), None);
    }

    #[test]
    fn absent_list_yields_nothing() {
        assert!(flatten_members(None, SymbolKind::Field).is_empty());
    }

    #[test]
    fn named_and_embedded_fields_in_order() {
        let list = FieldList {
            fields: vec![
                Field { names: vec!["Name".to_string()], ty: named("string") },
                embedded(named("Embedded")),
            ],
        };
        let children = flatten_members(Some(&list), SymbolKind::Field);
        assert_eq!(children, vec![
            Symbol::new("Name", SymbolKind::Field, "string"),
            Symbol::new("Embedded", SymbolKind::Field, "Embedded"),
        ]);
    }

    #[test]
    fn multi_name_entry_shares_detail() {
        let list = FieldList {
            fields: vec![Field { names: vec!["X".to_string(), "Y".to_string()], ty: named("float64") }],
        };
        let children = flatten_members(Some(&list), SymbolKind::Field);
        let names: Vec<&str> = children.iter().map(|c| return c.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y"]);
        assert!(children.iter().all(|c| return c.detail == "float64"));
    }

    #[test]
    fn embedded_interface_is_reported_as_field() {
        let list = FieldList {
            fields: vec![
                embedded(qualified("io", "Reader")),
                Field {
                    names: vec!["Close".to_string()],
                    ty: TypeExpr::FuncType(FuncSignature {
                        params: FieldList::default(),
                        results: Some(FieldList { fields: vec![embedded(named("error"))] }),
                    }),
                },
            ],
        };
        let children = flatten_members(Some(&list), SymbolKind::Method);
        assert_eq!(children, vec![
            Symbol::new("Reader", SymbolKind::Field, "io.Reader"),
            Symbol::new("Close", SymbolKind::Method, "func() error"),
        ]);
    }

    #[test]
    fn unusual_embedding_is_named_by_its_detail() {
        let union = TypeExpr::Other(OtherExpr::Union(vec![named("int"), named("string")]));
        let func = TypeExpr::FuncType(FuncSignature::default());
        let list = FieldList { fields: vec![embedded(union), embedded(func)] };
        let children = flatten_members(Some(&list), SymbolKind::Method);
        assert_eq!(children, vec![
            Symbol::new("int | string", SymbolKind::Field, "int | string"),
            Symbol::new("func()", SymbolKind::Field, "func()"),
        ]);
    }

    #[test]
    fn nested_struct_members_are_not_expanded() {
        let inner = FieldList { fields: vec![Field { names: vec!["A".to_string()], ty: named("int") }] };
        let list = FieldList {
            fields: vec![Field { names: vec!["Inner".to_string()], ty: TypeExpr::Struct(inner) }],
        };
        let children = flatten_members(Some(&list), SymbolKind::Field);
        assert_eq!(children, vec![Symbol::new("Inner", SymbolKind::Field, "struct{...}")]);
        assert!(children.iter().all(|c| return c.children.is_empty()));
    }
}
