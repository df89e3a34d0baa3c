//! Syntax model for one Go compilation unit.
//!
//! The front-end lowers a tree-sitter CST into these types; the extraction
//! engine only ever reads them. Every node category is a closed enum so the
//! renderer and classifier match exhaustively.

use std::path::PathBuf;

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `<-chan T`
    Recv,
    /// `chan<- T`
    Send,
}

/// Byte range of a node in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Exclusive end offset.
    pub end: usize,
    /// Inclusive start offset.
    pub start: usize,
}

/// A type expression. Mirrors the shapes the renderer distinguishes; every
/// remaining shape is carried by [`OtherExpr`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `func(params) results`
    FuncType(FuncSignature),
    /// A type applied to type arguments: `List[T]`, `Map[K, V]`.
    Generic {
        /// Type arguments in source order.
        args: Vec<TypeExpr>,
        /// The instantiated type.
        base: Box<TypeExpr>,
    },
    /// `interface{ ... }`
    Interface(FieldList),
    /// A bare identifier: `string`, `Config`.
    Named(String),
    /// Anything the renderer treats as plain text.
    Other(OtherExpr),
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// A qualified reference `X.Y`.
    Selector {
        /// Trailing name (`Y`).
        name: String,
        /// Qualifier expression (`X`), normally a package identifier.
        qualifier: Box<TypeExpr>,
    },
    /// `struct{ ... }`
    Struct(FieldList),
}

/// Type expressions with no dedicated rendering rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherExpr {
    /// Approximation constraint `~T`.
    Approx(Box<TypeExpr>),
    /// `[N]T`; `len` is the length expression's source text (`...` when implicit).
    Array {
        /// Element type.
        elem: Box<TypeExpr>,
        /// Length expression text.
        len: String,
    },
    /// `chan T`, `<-chan T`, `chan<- T`.
    Chan {
        /// Channel direction.
        dir: ChanDir,
        /// Element type.
        elem: Box<TypeExpr>,
    },
    /// Variadic parameter type `...T`.
    Ellipsis(Box<TypeExpr>),
    /// `map[K]V`
    Map {
        /// Key type.
        key: Box<TypeExpr>,
        /// Value type.
        value: Box<TypeExpr>,
    },
    /// `(T)`
    Paren(Box<TypeExpr>),
    /// Source text of a node the front-end could not model.
    Raw(String),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// Constraint union `A | B`.
    Union(Vec<TypeExpr>),
}

/// One entry of a field list: a struct field line, an interface element,
/// or a parameter group. An entry without names is an embedding (or an
/// unnamed parameter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Declared names, in source order. Empty for embedded members.
    pub names: Vec<String>,
    /// The entry's type.
    pub ty: TypeExpr,
}

/// Ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldList {
    /// Entries in declaration order.
    pub fields: Vec<Field>,
}

/// Parameters and results of a function type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncSignature {
    /// Parameter entries.
    pub params: FieldList,
    /// Result entries; `None` when the function returns nothing.
    pub results: Option<FieldList>,
}

/// `func Name(...)` or `func (r T) Name(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// Attached doc comment text.
    pub doc: Option<String>,
    /// Declared identifier.
    pub name: String,
    /// Receiver list for methods.
    pub receiver: Option<FieldList>,
    /// Parameter/result signature (receiver excluded).
    pub signature: FuncSignature,
    /// Byte range of the whole declaration.
    pub span: Span,
}

/// One `type Name <expr>` spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Attached doc comment text.
    pub doc: Option<String>,
    /// Declared identifier.
    pub name: String,
    /// Byte range of the enclosing declaration.
    pub span: Span,
    /// Underlying type expression.
    pub ty: TypeExpr,
}

/// One `var`/`const` spec: `A, B T = ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDecl {
    /// Attached doc comment text.
    pub doc: Option<String>,
    /// `true` for `const` groups.
    pub is_const: bool,
    /// Declared names, in source order.
    pub names: Vec<String>,
    /// Byte range of the enclosing declaration.
    pub span: Span,
    /// Explicit type, absent when inferred from the value.
    pub ty: Option<TypeExpr>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// Function or method.
    Function(FunctionDecl),
    /// Type spec.
    Type(TypeDecl),
    /// Variable or constant spec.
    Value(ValueDecl),
}

impl Declaration {
    /// Byte range used for position reporting.
    pub const fn span(&self) -> Span {
        return match self {
            Self::Function(decl) => decl.span,
            Self::Type(decl) => decl.span,
            Self::Value(decl) => decl.span,
        };
    }
}

/// Offset to line/column map for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineIndex {
    /// Byte offset at which each line starts; always begins with 0.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Index every line start of `source`.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset.saturating_add(1));
            }
        }
        return Self { line_starts };
    }

    /// Resolve a byte offset to a 1-based `(line, column)` pair. Columns
    /// count bytes, like the Go toolchain.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self
            .line_starts
            .partition_point(|start| return *start <= offset)
            .max(1);
        let start = self
            .line_starts
            .get(line.saturating_sub(1))
            .copied()
            .unwrap_or(0);
        return (line, offset.saturating_sub(start).saturating_add(1));
    }
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Top-level declarations in source order.
    pub decls: Vec<Declaration>,
    /// Doc comment attached to the `package` clause.
    pub doc: Option<String>,
    /// Offset resolver for this file.
    pub lines: LineIndex,
    /// Name from the `package` clause.
    pub package: String,
    /// Path the unit was loaded from.
    pub path: PathBuf,
}
