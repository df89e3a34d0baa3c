/// Output schema for extracted symbols, packages, and toolchain facts.
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Go toolchain facts reported by `gosym env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoEnv {
    /// Absolute path of the `go` binary.
    pub gobin: PathBuf,
    /// Output of `go env GOROOT`.
    pub goroot: String,
    /// Version token such as `go1.22.3`.
    pub version: String,
}

/// A module used by a project, as reported by `go mod download -json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// Directory holding the module's files, if downloaded.
    pub dir: String,
    /// Path to the `go.mod` used when loading the module.
    pub go_mod: String,
    /// Go version declared by the module.
    pub go_version: String,
    /// Whether the module is only an indirect dependency of the main module.
    pub indirect: bool,
    /// Whether this is the main module.
    pub main: bool,
    /// Module path.
    pub path: String,
    /// Module version.
    pub version: String,
}

/// All exported symbols and docs of one package directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Aggregated package documentation.
    pub docs: String,
    /// Path of the module that owns the package, if known.
    #[serde(rename = "module")]
    pub module_name: String,
    /// Version of the owning module; empty for the main module.
    pub module_version: String,
    /// Package name from the `package` clause.
    pub name: String,
    /// Import path.
    pub path: String,
    /// Exported symbols in file order, then declaration order.
    pub symbols: Vec<Symbol>,
}

/// Source location of a symbol boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    /// One-based byte column.
    pub column: usize,
    /// File the symbol was declared in.
    pub file: PathBuf,
    /// One-based line.
    pub line: usize,
    /// Zero-based byte offset.
    pub offset: usize,
}

/// Packages of a project keyed by import path.
#[derive(Debug, Default, Serialize)]
pub struct ProjectPackages {
    /// Import path to package.
    pub packages: BTreeMap<String, Package>,
}

/// Standard library packages keyed by import path.
#[derive(Debug, Default, Serialize)]
pub struct StdPackages {
    /// Import path to package.
    pub stdlibs: BTreeMap<String, Package>,
}

/// One declaration or declaration member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Members of struct and interface symbols; empty for every other kind.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Symbol>,
    /// Rendered signature or type description.
    pub detail: String,
    /// Doc comment text, empty when absent.
    pub doc: String,
    /// End of the declaration, when positions were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Position>,
    /// Classification of the symbol.
    pub kind: SymbolKind,
    /// Display name; never empty.
    pub name: String,
    /// Start of the declaration, when positions were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Position>,
}

impl Symbol {
    /// A symbol with no doc, children, or positions.
    pub fn new(name: impl Into<String>, kind: SymbolKind, detail: impl Into<String>) -> Self {
        return Self {
            children: Vec::new(),
            detail: detail.into(),
            doc: String::new(),
            end: None,
            kind,
            name: name.into(),
            start: None,
        };
    }
}

/// Symbol classification, serialised in lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// `const` declaration.
    Constant,
    /// Struct field or embedded member.
    Field,
    /// Function declaration or function type.
    Function,
    /// Interface type.
    Interface,
    /// Method declaration or interface method.
    Method,
    /// Struct type.
    Struct,
    /// Any other named type.
    Type,
    /// `var` declaration.
    Variable,
}

/// Extraction result for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UnitSymbols {
    /// Unit-level documentation.
    pub doc: String,
    /// Exported symbols in declaration order.
    pub symbols: Vec<Symbol>,
}
