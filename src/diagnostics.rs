use std::path::Path;

use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
    return;
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is
/// one, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::FileTooLarge { file, max_bytes, size_bytes } => render_file_too_large(file, *size_bytes, *max_bytes),
        Error::ModuleListFailed { dir, output } => render_module_list_failed(dir, output),
        Error::NoGoFiles { dir } => render_no_go_files(dir),
        Error::ToolchainNotFound => render_toolchain_not_found(),
        Error::UnsupportedLanguage { ext } => render_unsupported_language(ext),
        Error::FileNotFound { .. }
        | Error::Io(_)
        | Error::Json(_)
        | Error::ParseFailed { .. }
        | Error::TomlDe(_)
        | Error::ToolchainFailed { .. }
        | Error::VersionUnrecognised { .. } => render_generic(e),
    };
}

fn render_file_too_large(file: &Path, size_bytes: u64, max_bytes: u64) -> String {
    return format!("\
# Error: File Too Large

`{}` is {size_bytes} bytes (max {max_bytes}).

## Fix

Raise the limit in `.gosym.toml`:

    max_file_size = {size_bytes}
", file.display());
}

fn render_generic(e: &Error) -> String {
    return match e {
        Error::FileNotFound { path } => format!("\
# Error: File Not Found

`{}` does not exist.
", path.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::Json(e) => format!("\
# Error: Invalid JSON

The Go toolchain produced output that could not be decoded: {e}
"),

        Error::ParseFailed { file, reason } => format!("\
# Error: Parse Failed

Could not parse `{}`: {reason}
", file.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Check `.gosym.toml`. Allowed keys: `include`, `exclude`, `include_tests`, `positions`, `max_file_size`.
"),

        Error::ToolchainFailed { command, stderr } => format!("\
# Error: Toolchain Command Failed

`{command}` exited unsuccessfully.

    {stderr}
"),

        Error::VersionUnrecognised { output } => format!("\
# Error: Unrecognised Go Version

`go version` printed:

    {output}
"),

        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    };
}

fn render_module_list_failed(dir: &Path, output: &str) -> String {
    let mut out = format!("\
# Error: Module Listing Failed

`go mod download -json` failed in `{}`.
", dir.display());

    if !output.is_empty() {
        out.push_str("\n## Output\n\n");
        for line in output.lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }

    out.push_str("\
\n## Fix

Make sure the directory contains a `go.mod` and its dependencies are reachable.
");
    return out;
}

fn render_no_go_files(dir: &Path) -> String {
    return format!("\
# Error: No Go Files

`{}` contains no `.go` files.

## Fix

Point at a package directory. Test files are only loaded with `include_tests = true` in `.gosym.toml`.
", dir.display());
}

fn render_toolchain_not_found() -> String {
    return "\
# Error: Go Toolchain Not Found

No `go` binary was found on `PATH`.

## Fix

Install Go from https://go.dev/dl/ and make sure `go` is on `PATH`.
"
    .to_string();
}

fn render_unsupported_language(ext: &str) -> String {
    return format!(
        "\
# Error: Unsupported Language

`.{ext}` files are not Go source.

## Supported extensions

- `.go`
"
    );
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn every_block_starts_with_a_heading() {
        let errors = vec![
            Error::FileNotFound { path: PathBuf::from("missing.go") },
            Error::FileTooLarge { file: PathBuf::from("big.go"), max_bytes: 10, size_bytes: 20 },
            Error::ModuleListFailed { dir: PathBuf::from("proj"), output: "go: no go.mod".to_string() },
            Error::NoGoFiles { dir: PathBuf::from("empty") },
            Error::ToolchainNotFound,
            Error::UnsupportedLanguage { ext: "rs".to_string() },
            Error::VersionUnrecognised { output: "gccgo".to_string() },
        ];
        for e in &errors {
            assert!(render_error(e).starts_with("# Error"));
        }
    }

    #[test]
    fn module_failure_includes_output() {
        let md = render_error(&Error::ModuleListFailed {
            dir: PathBuf::from("proj"),
            output: "go: cannot find main module".to_string(),
        });
        assert!(md.contains("`proj`"));
        assert!(md.contains("    go: cannot find main module\n"));
    }

    #[test]
    fn file_too_large_suggests_limit() {
        let md = render_error(&Error::FileTooLarge { file: PathBuf::from("big.go"), max_bytes: 10, size_bytes: 20 });
        assert!(md.contains("max_file_size = 20"));
    }
}
