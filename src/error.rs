/// Crate-level error types for gosym diagnostics.
use std::path::PathBuf;

/// Every error names the file, command, or reason for failure so it can be
/// rendered as a diagnostic without a debugger. The extraction engine itself
/// never fails; these come from loading sources and talking to the toolchain.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A requested source file or directory does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Source file exceeds the configured size limit.
    #[error("file too large ({size_bytes} bytes, max {max_bytes}): {}", file.display())]
    FileTooLarge {
        /// File that exceeded the size limit.
        file: PathBuf,
        /// Maximum allowed file size in bytes.
        max_bytes: u64,
        /// Actual file size in bytes.
        size_bytes: u64,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON produced by the toolchain could not be decoded.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// `go mod download -json` exited unsuccessfully.
    #[error("module listing failed in {}: {output}", dir.display())]
    ModuleListFailed {
        /// Project directory the command ran in.
        dir: PathBuf,
        /// Combined stdout/stderr of the command.
        output: String,
    },

    /// A package directory holds no Go source files.
    #[error("no Go files in {}", dir.display())]
    NoGoFiles {
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// Tree-sitter failed to parse a source file.
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// A toolchain command ran but reported failure.
    #[error("`{command}` failed: {stderr}")]
    ToolchainFailed {
        /// Command line that was run.
        command: String,
        /// Captured standard error.
        stderr: String,
    },

    /// No `go` binary on `PATH`.
    #[error("go toolchain not found on PATH")]
    ToolchainNotFound,

    /// The requested file is not Go source.
    #[error("not a Go source file: .{ext}")]
    UnsupportedLanguage {
        /// File extension without the leading dot.
        ext: String,
    },

    /// `go version` printed something other than `go version goX.Y...`.
    #[error("unrecognised go version output: {output}")]
    VersionUnrecognised {
        /// Raw command output.
        output: String,
    },
}
