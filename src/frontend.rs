//! Go front-end: parses source with tree-sitter and lowers the CST into
//! [`crate::ast`], attaching doc comments along the way.

use std::path::Path;

use tracing::{debug, warn};
use tree_sitter::{Node, Parser, Tree};

use crate::ast::{
    ChanDir, CompilationUnit, Declaration, Field, FieldList, FuncSignature, FunctionDecl,
    LineIndex, OtherExpr, Span, TypeDecl, TypeExpr, ValueDecl,
};
use crate::error::Error;
use crate::grammar;

/// Parse one Go source file into a compilation unit.
///
/// # Errors
///
/// Returns `Error::FileTooLarge` if the source exceeds `max_file_size`,
/// or `Error::ParseFailed` if tree-sitter cannot parse the source.
pub fn parse_unit(path: &Path, source: &str, max_file_size: u64) -> Result<CompilationUnit, Error> {
    let source_len: u64 = source.len().try_into().unwrap_or(u64::MAX);
    if source_len > max_file_size {
        return Err(Error::FileTooLarge {
            file: path.to_path_buf(),
            max_bytes: max_file_size,
            size_bytes: source_len,
        });
    }

    let tree = parse_source(path, source)?;
    let root = tree.root_node();
    if root.has_error() {
        warn!(file = %path.display(), "syntax errors present; affected declarations are skipped");
    }

    let mut unit = CompilationUnit {
        decls: Vec::new(),
        doc: None,
        lines: LineIndex::new(source),
        package: String::new(),
        path: path.to_path_buf(),
    };

    let mut cursor = root.walk();
    for node in root.named_children(&mut cursor) {
        match node.kind() {
            "package_clause" => {
                unit.doc = leading_doc(node, source);
                unit.package = package_name(node, source);
            },
            "function_declaration" | "method_declaration" => {
                if let Some(decl) = lower_function(node, source) {
                    unit.decls.push(decl);
                }
            },
            "type_declaration" => lower_type_declaration(node, source, &mut unit.decls),
            "const_declaration" => lower_value_declaration(node, source, true, &mut unit.decls),
            "var_declaration" => lower_value_declaration(node, source, false, &mut unit.decls),
            "ERROR" => debug!(file = %path.display(), offset = node.start_byte(), "skipping unparsable region"),
            _ => {},
        }
    }

    debug!(file = %path.display(), package = %unit.package, decls = unit.decls.len(), "lowered unit");
    return Ok(unit);
}

/// Parse source into a tree-sitter tree.
///
/// # Errors
///
/// Returns `Error::ParseFailed` if the language cannot be set or parsing fails.
fn parse_source(path: &Path, source: &str) -> Result<Tree, Error> {
    let mut parser = Parser::new();
    parser.set_language(&grammar::go()).map_err(|e| {
        return Error::ParseFailed {
            file: path.to_path_buf(),
            reason: e.to_string(),
        };
    })?;

    return parser.parse(source, None).ok_or_else(|| {
        return Error::ParseFailed {
            file: path.to_path_buf(),
            reason: "tree-sitter returned None".to_string(),
        };
    });
}

// ── Declarations ───────────────────────────────────────────────────────

/// Lower a function or method declaration.
fn lower_function(node: Node<'_>, source: &str) -> Option<Declaration> {
    let name = node_text(node.child_by_field_name("name")?, source);
    if name.is_empty() {
        return None;
    }

    return Some(Declaration::Function(FunctionDecl {
        doc: leading_doc(node, source),
        name: name.to_string(),
        receiver: node
            .child_by_field_name("receiver")
            .map(|receiver| return lower_parameters(receiver, source)),
        signature: lower_signature(node, source),
        span: span_of(node),
    }));
}

/// Lower every spec of a `type` declaration, grouped or not. Every spec
/// takes the doc of the declaration; comments inside a group are ignored.
fn lower_type_declaration(node: Node<'_>, source: &str, decls: &mut Vec<Declaration>) {
    let group_doc = leading_doc(node, source);
    let span = span_of(node);

    let mut cursor = node.walk();
    for spec in node.named_children(&mut cursor) {
        if !matches!(spec.kind(), "type_spec" | "type_alias") {
            continue;
        }
        let Some(name) = spec.child_by_field_name("name").map(|n| return node_text(n, source)) else {
            continue;
        };
        decls.push(Declaration::Type(TypeDecl {
            doc: group_doc.clone(),
            name: name.to_string(),
            span,
            ty: lower_field_type(spec, "type", source),
        }));
    }
}

/// Lower every spec of a `var` or `const` declaration, all sharing the
/// declaration's doc.
fn lower_value_declaration(node: Node<'_>, source: &str, is_const: bool, decls: &mut Vec<Declaration>) {
    let group_doc = leading_doc(node, source);
    lower_value_specs(node, source, is_const, group_doc.as_deref(), span_of(node), decls);
}

/// Walk `container` for value specs, descending into `var ( ... )` lists.
fn lower_value_specs(
    container: Node<'_>,
    source: &str,
    is_const: bool,
    group_doc: Option<&str>,
    span: Span,
    decls: &mut Vec<Declaration>,
) {
    let mut cursor = container.walk();
    for spec in container.named_children(&mut cursor) {
        match spec.kind() {
            "const_spec" | "var_spec" => {
                let mut names_cursor = spec.walk();
                let names: Vec<String> = spec
                    .children_by_field_name("name", &mut names_cursor)
                    .map(|n| return node_text(n, source).to_string())
                    .collect();
                decls.push(Declaration::Value(ValueDecl {
                    doc: group_doc.map(str::to_string),
                    is_const,
                    names,
                    span,
                    ty: spec.child_by_field_name("type").map(|ty| return lower_type(ty, source)),
                }));
            },
            "var_spec_list" => lower_value_specs(spec, source, is_const, group_doc, span, decls),
            _ => {},
        }
    }
}

/// Package name from a `package` clause.
fn package_name(node: Node<'_>, source: &str) -> String {
    let mut cursor = node.walk();
    return node
        .named_children(&mut cursor)
        .find(|child| return child.kind() == "package_identifier")
        .map(|child| return node_text(child, source).to_string())
        .unwrap_or_default();
}

// ── Types ──────────────────────────────────────────────────────────────

/// Lower a type node.
fn lower_type(node: Node<'_>, source: &str) -> TypeExpr {
    return match node.kind() {
        "type_identifier" | "identifier" | "package_identifier" => TypeExpr::Named(node_text(node, source).to_string()),
        "qualified_type" => TypeExpr::Selector {
            name: node
                .child_by_field_name("name")
                .map(|n| return node_text(n, source).to_string())
                .unwrap_or_default(),
            qualifier: Box::new(lower_field_type(node, "package", source)),
        },
        "pointer_type" => TypeExpr::Pointer(Box::new(lower_inner_type(node, source))),
        "generic_type" => TypeExpr::Generic {
            args: node
                .child_by_field_name("type_arguments")
                .map(|args| return lower_type_list(args, source))
                .unwrap_or_default(),
            base: Box::new(lower_field_type(node, "type", source)),
        },
        "struct_type" => TypeExpr::Struct(lower_struct_fields(node, source)),
        "interface_type" => TypeExpr::Interface(lower_interface_elems(node, source)),
        "function_type" => TypeExpr::FuncType(lower_signature(node, source)),
        "interface_type_name" => lower_inner_type(node, source),
        "type_elem" | "constraint_elem" | "type_constraint" => lower_type_elem(node, source),
        _ => TypeExpr::Other(lower_other(node, source)),
    };
}

/// Lower the shapes the renderer only prints.
fn lower_other(node: Node<'_>, source: &str) -> OtherExpr {
    let boxed = |field: &str| return Box::new(lower_field_type(node, field, source));

    return match node.kind() {
        "array_type" => OtherExpr::Array {
            elem: boxed("element"),
            len: node
                .child_by_field_name("length")
                .map(|len| return expr_text(len, source))
                .unwrap_or_default(),
        },
        "implicit_length_array_type" => OtherExpr::Array { elem: boxed("element"), len: "...".to_string() },
        "slice_type" => OtherExpr::Slice(boxed("element")),
        "map_type" => OtherExpr::Map { key: boxed("key"), value: boxed("value") },
        "channel_type" => OtherExpr::Chan { dir: channel_direction(node), elem: boxed("value") },
        "parenthesized_type" => OtherExpr::Paren(Box::new(lower_inner_type(node, source))),
        "negated_type" => OtherExpr::Approx(Box::new(lower_inner_type(node, source))),
        _ => OtherExpr::Raw(collapse_whitespace(node_text(node, source))),
    };
}

/// A `|`-separated constraint element; a single term is returned as-is.
fn lower_type_elem(node: Node<'_>, source: &str) -> TypeExpr {
    let mut terms = lower_type_list(node, source);
    if terms.len() == 1
        && let Some(only) = terms.pop()
    {
        return only;
    }
    return TypeExpr::Other(OtherExpr::Union(terms));
}

/// Lower every named, non-comment child of `node` as a type.
fn lower_type_list(node: Node<'_>, source: &str) -> Vec<TypeExpr> {
    let mut cursor = node.walk();
    return node
        .named_children(&mut cursor)
        .filter(|child| return child.kind() != "comment")
        .map(|child| return lower_type(child, source))
        .collect();
}

/// Lower the child stored under `field`, or an empty placeholder.
fn lower_field_type(node: Node<'_>, field: &str, source: &str) -> TypeExpr {
    return node.child_by_field_name(field).map_or_else(
        || return TypeExpr::Other(OtherExpr::Raw(String::new())),
        |child| return lower_type(child, source),
    );
}

/// Lower the first named, non-comment child (wrappers like `*T` and `(T)`).
fn lower_inner_type(node: Node<'_>, source: &str) -> TypeExpr {
    let mut cursor = node.walk();
    let inner = node
        .named_children(&mut cursor)
        .find(|child| return child.kind() != "comment");
    return inner.map_or_else(
        || return TypeExpr::Other(OtherExpr::Raw(String::new())),
        |child| return lower_type(child, source),
    );
}

/// Print a constant expression the way the canonical printer does: binary
/// operators spaced, everything else tight.
fn expr_text(node: Node<'_>, source: &str) -> String {
    let field = |name: &str| {
        return node.child_by_field_name(name).map(|child| return expr_text(child, source)).unwrap_or_default();
    };

    return match node.kind() {
        "binary_expression" => format!("{} {} {}", field("left"), field("operator"), field("right")),
        "unary_expression" => format!("{}{}", field("operator"), field("operand")),
        "selector_expression" => format!("{}.{}", field("operand"), field("field")),
        "parenthesized_expression" => {
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .find(|child| return child.kind() != "comment")
                .map(|child| return expr_text(child, source))
                .unwrap_or_default();
            format!("({inner})")
        },
        "call_expression" => {
            let args = node.child_by_field_name("arguments").map_or_else(Vec::new, |list| {
                let mut cursor = list.walk();
                return list
                    .named_children(&mut cursor)
                    .filter(|child| return child.kind() != "comment")
                    .map(|child| return expr_text(child, source))
                    .collect();
            });
            format!("{}({})", field("function"), args.join(", "))
        },
        _ => collapse_whitespace(node_text(node, source)),
    };
}

/// Read the arrow placement of a channel type.
fn channel_direction(node: Node<'_>) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node.children(&mut cursor).map(|c| return c.kind()).collect();
    return match tokens.as_slice() {
        ["<-", ..] => ChanDir::Recv,
        other if other.contains(&"<-") => ChanDir::Send,
        _ => ChanDir::Both,
    };
}

// ── Field lists ────────────────────────────────────────────────────────

/// Fields of a `struct_type` node. Tags are dropped.
fn lower_struct_fields(node: Node<'_>, source: &str) -> FieldList {
    let mut fields = Vec::new();
    let mut cursor = node.walk();
    let Some(list) = node
        .named_children(&mut cursor)
        .find(|child| return child.kind() == "field_declaration_list")
    else {
        return FieldList { fields };
    };

    let mut list_cursor = list.walk();
    for decl in list.named_children(&mut list_cursor) {
        if decl.kind() != "field_declaration" {
            continue;
        }
        let mut names_cursor = decl.walk();
        let names: Vec<String> = decl
            .children_by_field_name("name", &mut names_cursor)
            .map(|n| return node_text(n, source).to_string())
            .collect();

        let ty = lower_field_type(decl, "type", source);
        // An embedded `*T` keeps its star as a bare token beside the type.
        let mut star_cursor = decl.walk();
        let starred = names.is_empty() && decl.children(&mut star_cursor).any(|c| return c.kind() == "*");
        let ty = if starred { TypeExpr::Pointer(Box::new(ty)) } else { ty };

        fields.push(Field { names, ty });
    }
    return FieldList { fields };
}

/// Methods and embedded elements of an `interface_type` node.
fn lower_interface_elems(node: Node<'_>, source: &str) -> FieldList {
    let mut fields = Vec::new();
    let mut cursor = node.walk();
    for elem in node.named_children(&mut cursor) {
        match elem.kind() {
            "method_elem" | "method_spec" => {
                let name = elem
                    .child_by_field_name("name")
                    .map(|n| return node_text(n, source).to_string())
                    .unwrap_or_default();
                fields.push(Field {
                    names: vec![name],
                    ty: TypeExpr::FuncType(lower_signature(elem, source)),
                });
            },
            "comment" => {},
            _ => fields.push(Field { names: Vec::new(), ty: lower_type(elem, source) }),
        }
    }
    return FieldList { fields };
}

/// Entries of a `parameter_list` node.
fn lower_parameters(node: Node<'_>, source: &str) -> FieldList {
    let mut fields = Vec::new();
    let mut cursor = node.walk();
    for param in node.named_children(&mut cursor) {
        let mut names_cursor = param.walk();
        let names: Vec<String> = param
            .children_by_field_name("name", &mut names_cursor)
            .map(|n| return node_text(n, source).to_string())
            .collect();

        let ty = match param.kind() {
            "parameter_declaration" => lower_field_type(param, "type", source),
            "variadic_parameter_declaration" => {
                TypeExpr::Other(OtherExpr::Ellipsis(Box::new(lower_field_type(param, "type", source))))
            },
            _ => continue,
        };
        fields.push(Field { names, ty });
    }
    return FieldList { fields };
}

/// Read the `parameters` and `result` fields shared by functions, methods,
/// function types, and interface methods.
fn lower_signature(node: Node<'_>, source: &str) -> FuncSignature {
    let params = node
        .child_by_field_name("parameters")
        .map(|params| return lower_parameters(params, source))
        .unwrap_or_default();

    let results = node.child_by_field_name("result").map(|result| {
        if result.kind() == "parameter_list" {
            return lower_parameters(result, source);
        }
        return FieldList { fields: vec![Field { names: Vec::new(), ty: lower_type(result, source) }] };
    });

    return FuncSignature { params, results };
}

// ── Comments ───────────────────────────────────────────────────────────

/// Text of the comment group ending on the line right above `node`, with
/// comment markers and tool directives removed.
fn leading_doc(node: Node<'_>, source: &str) -> Option<String> {
    let mut comments = Vec::new();
    let mut next_row = node.start_position().row;
    let mut current = node.prev_sibling();

    while let Some(sibling) = current {
        if sibling.kind() != "comment" || sibling.end_position().row.saturating_add(1) != next_row {
            break;
        }
        // A comment sharing a line with earlier code belongs to that code.
        let trails_code = sibling.prev_named_sibling().is_some_and(|prev| {
            return prev.kind() != "comment" && prev.end_position().row == sibling.start_position().row;
        });
        if trails_code {
            break;
        }
        comments.push(node_text(sibling, source));
        next_row = sibling.start_position().row;
        current = sibling.prev_sibling();
    }

    if comments.is_empty() {
        return None;
    }
    comments.reverse();
    return Some(comment_text(&comments));
}

/// Strip markers from a comment group and normalise blank lines. Non-empty
/// results end with a newline.
fn comment_text(comments: &[&str]) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for raw in comments {
        let body = if let Some(rest) = raw.strip_prefix("//") {
            if is_directive(rest) {
                continue;
            }
            rest.strip_prefix(' ').unwrap_or(rest)
        } else {
            raw.strip_prefix("/*")
                .and_then(|rest| return rest.strip_suffix("*/"))
                .unwrap_or(raw)
        };
        lines.extend(body.split('\n').map(str::trim_end));
    }

    let mut kept: Vec<&str> = Vec::new();
    for line in lines {
        if line.is_empty() && kept.last().is_none_or(|prev| return prev.is_empty()) {
            continue;
        }
        kept.push(line);
    }
    while kept.last().is_some_and(|line| return line.is_empty()) {
        kept.pop();
    }
    if kept.is_empty() {
        return String::new();
    }
    kept.push("");
    return kept.join("\n");
}

/// `//line`, `//extern`, `//export`, and `//tool:directive` comments (with
/// the slashes already removed).
fn is_directive(text: &str) -> bool {
    if ["line ", "extern ", "export "].iter().any(|prefix| return text.starts_with(prefix)) {
        return true;
    }
    let Some((head, tail)) = text.split_once(':') else {
        return false;
    };
    let lower_alnum = |b: u8| return b.is_ascii_lowercase() || b.is_ascii_digit();
    return !head.is_empty() && head.bytes().all(lower_alnum) && tail.bytes().next().is_some_and(lower_alnum);
}

// ── Helpers ────────────────────────────────────────────────────────────

fn collapse_whitespace(text: &str) -> String {
    return text.split_whitespace().collect::<Vec<_>>().join(" ");
}

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    return source.get(node.start_byte()..node.end_byte()).unwrap_or("");
}

fn span_of(node: Node<'_>) -> Span {
    return Span { end: node.end_byte(), start: node.start_byte() };
}
