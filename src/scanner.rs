use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Error;

/// Go source files directly inside `dir`, sorted by file name.
/// `_test.go` files are only included when `include_tests` is set.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `dir` is not a directory,
/// or `Error::Io` if the directory cannot be read.
pub fn go_files(dir: &Path, include_tests: bool) -> Result<Vec<PathBuf>, Error> {
    if !dir.is_dir() {
        return Err(Error::FileNotFound { path: dir.to_path_buf() });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| return Error::Io(e.into()))?;
        if is_go_source(&entry, include_tests) {
            files.push(entry.into_path());
        }
    }
    return Ok(files);
}

/// Every directory under `root` holding at least one Go source file,
/// relative to `root` and sorted. Vendored code, `testdata`, and hidden or
/// underscore-prefixed directories are never entered. The config's
/// include/exclude prefixes are applied to the relative paths.
pub fn package_dirs(root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| return e.depth() == 0 || !is_ignored_dir(e));

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_dir() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path()).to_path_buf();
        if !config.should_scan(&relative.to_string_lossy()) {
            continue;
        }
        let has_go = go_files(entry.path(), config.include_tests).is_ok_and(|files| return !files.is_empty());
        if has_go {
            dirs.push(relative);
        }
    }
    return dirs;
}

/// Directories the Go tool never treats as packages.
fn is_ignored_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    return name == "vendor" || name == "testdata" || name.starts_with('.') || name.starts_with('_');
}

/// Regular `*.go` file, honouring the test-file switch.
fn is_go_source(entry: &DirEntry, include_tests: bool) -> bool {
    if !entry.file_type().is_file() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if !name.ends_with(".go") {
        return false;
    }
    return include_tests || !name.ends_with("_test.go");
}
