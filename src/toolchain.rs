//! Locating and querying the installed Go toolchain.

use std::path::{Path, PathBuf};
use std::process::Command;

use regex::Regex;
use tracing::debug;

use crate::error::Error;
use crate::types::GoEnv;

/// Name of the Go binary on this platform.
const GO_BINARY: &str = if cfg!(windows) { "go.exe" } else { "go" };

/// First `go` executable found on `PATH`.
pub fn find_go() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    return std::env::split_paths(&path).map(|dir| return dir.join(GO_BINARY)).find(|candidate| return candidate.is_file());
}

/// Locate `go`, ask it for `GOROOT` and its version.
///
/// # Errors
///
/// Returns `Error::ToolchainNotFound` if no `go` is on `PATH`,
/// `Error::ToolchainFailed` if either query exits unsuccessfully,
/// or `Error::VersionUnrecognised` if `go version` prints something unexpected.
pub fn go_env() -> Result<GoEnv, Error> {
    let gobin = find_go().ok_or(Error::ToolchainNotFound)?;
    debug!(gobin = %gobin.display(), "found go toolchain");

    let goroot = run_go(&gobin, &["env", "GOROOT"])?;
    let version_output = run_go(&gobin, &["version"])?;
    let version = parse_go_version(&version_output)
        .ok_or_else(|| return Error::VersionUnrecognised { output: version_output.trim().to_string() })?;

    return Ok(GoEnv { gobin, goroot: goroot.trim().to_string(), version });
}

/// Extract the `goX.Y.Z` token from `go version` output.
pub fn parse_go_version(output: &str) -> Option<String> {
    let re = Regex::new(r"^go version (go[0-9.]+)").ok()?;
    return re.captures(output.trim_start()).and_then(|caps| return caps.get(1)).map(|m| return m.as_str().to_string());
}

/// Run `go` with `args` and return its stdout.
///
/// # Errors
///
/// Returns `Error::Io` if the process cannot be spawned,
/// or `Error::ToolchainFailed` if it exits unsuccessfully.
fn run_go(gobin: &Path, args: &[&str]) -> Result<String, Error> {
    let output = Command::new(gobin).args(args).output()?;
    if !output.status.success() {
        return Err(Error::ToolchainFailed {
            command: format!("go {}", args.join(" ")),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
}
