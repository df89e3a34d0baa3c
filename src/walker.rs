//! Unit walking: docs and ordered symbols for whole compilation units.

use tracing::debug;

use crate::ast::{CompilationUnit, Span};
use crate::classify::{self, ExportPredicate};
use crate::types::{Position, Symbol, UnitSymbols};

/// Knobs for one extraction call.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Attach start/end positions to top-level symbols.
    pub include_positions: bool,
    /// Visibility convention applied to declared names.
    pub is_exported: ExportPredicate,
    /// Collect docs only.
    pub skip_symbols: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        return Self {
            include_positions: false,
            is_exported: classify::go_exported,
            skip_symbols: false,
        };
    }
}

/// Docs and exported symbols of one compilation unit, in declaration order.
pub fn extract_symbols(unit: &CompilationUnit, options: &ExtractOptions) -> UnitSymbols {
    return extract_package(std::slice::from_ref(unit), options);
}

/// Docs and exported symbols of several units of one package. Unit docs are
/// concatenated in unit order, each followed by a newline, and the aggregate
/// is trimmed. Symbols are never sorted or deduplicated.
pub fn extract_package(units: &[CompilationUnit], options: &ExtractOptions) -> UnitSymbols {
    let mut doc = String::new();
    let mut symbols = Vec::new();

    for unit in units {
        if let Some(text) = &unit.doc {
            doc.push_str(text);
            doc.push('\n');
        }
        if options.skip_symbols {
            continue;
        }
        collect_unit_symbols(unit, options, &mut symbols);
    }

    return UnitSymbols { doc: doc.trim().to_string(), symbols };
}

/// Classify every declaration of `unit`, appending the results.
fn collect_unit_symbols(unit: &CompilationUnit, options: &ExtractOptions, symbols: &mut Vec<Symbol>) {
    let before = symbols.len();
    for decl in &unit.decls {
        for mut symbol in classify::classify(decl, options.is_exported) {
            if options.include_positions {
                let (start, end) = span_positions(unit, decl.span());
                symbol.start = Some(start);
                symbol.end = Some(end);
            }
            symbols.push(symbol);
        }
    }
    debug!(
        file = %unit.path.display(),
        decls = unit.decls.len(),
        symbols = symbols.len().saturating_sub(before),
        "extracted unit"
    );
}

/// Resolve both ends of a span through the unit's line index.
fn span_positions(unit: &CompilationUnit, span: Span) -> (Position, Position) {
    let resolve = |offset: usize| {
        let (line, column) = unit.lines.line_col(offset);
        return Position { column, file: unit.path.clone(), line, offset };
    };
    return (resolve(span.start), resolve(span.end));
}
