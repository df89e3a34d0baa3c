//! Module metadata: `go.mod` lookup and the project's module list.

use std::path::{Path, PathBuf};
use std::process::Command;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Error;
use crate::toolchain;
use crate::types::Module;

/// The module that owns a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRoot {
    /// Directory holding `go.mod`.
    pub dir: PathBuf,
    /// Module path declared by `go.mod`.
    pub path: String,
}

/// One JSON object of the `go mod download -json` stream.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DownloadEntry {
    #[serde(default)]
    dir: String,
    /// Either a string or an `{"Err": ...}` object depending on the Go release.
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    go_mod: String,
    #[serde(default)]
    go_version: String,
    #[serde(default)]
    indirect: bool,
    #[serde(default)]
    main: bool,
    #[serde(default)]
    path: String,
    #[serde(default)]
    version: String,
}

/// Nearest `go.mod` at or above `dir`.
///
/// # Errors
///
/// Returns `Error::Io` if a `go.mod` exists but cannot be read.
pub fn find_module_root(dir: &Path) -> Result<Option<ModuleRoot>, Error> {
    for candidate in dir.ancestors() {
        let go_mod = candidate.join("go.mod");
        let content = match std::fs::read_to_string(&go_mod) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        let Some(path) = module_path(&content) else {
            warn!(file = %go_mod.display(), "go.mod has no module directive");
            return Ok(None);
        };
        return Ok(Some(ModuleRoot { dir: candidate.to_path_buf(), path }));
    }
    return Ok(None);
}

/// Module path from the `module` directive of a `go.mod` file.
pub fn module_path(go_mod: &str) -> Option<String> {
    let re = Regex::new(r#"(?m)^\s*module\s+"?([^\s"/][^\s"]*)"?"#).ok()?;
    return re.captures(go_mod).and_then(|caps| return caps.get(1)).map(|m| return m.as_str().to_string());
}

/// Decode a concatenated stream of `go mod download -json` objects.
/// Entries that report an error are skipped.
///
/// # Errors
///
/// Returns `Error::Json` if the stream is not a sequence of JSON objects.
pub fn parse_module_stream(bytes: &[u8]) -> Result<Vec<Module>, Error> {
    let mut modules = Vec::new();
    for entry in serde_json::Deserializer::from_slice(bytes).into_iter::<DownloadEntry>() {
        let entry = entry?;
        if let Some(reason) = entry.error {
            debug!(module = %entry.path, %reason, "skipping module with error");
            continue;
        }
        modules.push(Module {
            dir: entry.dir,
            go_mod: entry.go_mod,
            go_version: entry.go_version,
            indirect: entry.indirect,
            main: entry.main,
            path: entry.path,
            version: entry.version,
        });
    }
    return Ok(modules);
}

/// Modules used by the project in `dir`, via `go mod download -json`.
///
/// # Errors
///
/// Returns `Error::ToolchainNotFound` if no `go` is on `PATH`,
/// `Error::ModuleListFailed` with the combined output if the command fails,
/// or `Error::Json` if its output cannot be decoded.
pub fn used_modules(dir: &Path) -> Result<Vec<Module>, Error> {
    let gobin = toolchain::find_go().ok_or(Error::ToolchainNotFound)?;
    let output = Command::new(&gobin).args(["mod", "download", "-json"]).current_dir(dir).output()?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(Error::ModuleListFailed { dir: dir.to_path_buf(), output: combined.trim().to_string() });
    }

    let modules = parse_module_stream(&output.stdout)?;
    debug!(dir = %dir.display(), count = modules.len(), "listed modules");
    return Ok(modules);
}
