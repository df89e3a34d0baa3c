/// Tree-sitter grammar resolution for Go sources.
use std::path::Path;

use tree_sitter::Language;

use crate::error::Error;

/// The Go tree-sitter language.
pub fn go() -> Language {
    return tree_sitter_go::LANGUAGE.into();
}

/// Confirm a file is Go source by extension.
///
/// # Errors
///
/// Returns `Error::UnsupportedLanguage` for any extension other than `.go`.
pub fn ensure_go_path(path: &Path) -> Result<(), Error> {
    let ext = path.extension().and_then(|e| return e.to_str()).unwrap_or("");

    return match ext {
        "go" => Ok(()),
        _ => Err(Error::UnsupportedLanguage {
            ext: ext.to_string(),
        }),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_extension_is_accepted() {
        assert!(ensure_go_path(Path::new("pkg/server.go")).is_ok());
    }

    #[test]
    fn other_extensions_are_rejected() {
        let err = ensure_go_path(Path::new("lib.rs")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage { ext } if ext == "rs"));
    }
}
