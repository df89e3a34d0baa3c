//! Package loading: a directory of Go files becomes one [`Package`].

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::ast::CompilationUnit;
use crate::config::Config;
use crate::error::Error;
use crate::frontend;
use crate::grammar;
use crate::modules::{self, ModuleRoot};
use crate::scanner;
use crate::types::{Package, ProjectPackages, StdPackages};
use crate::walker::{self, ExtractOptions};

/// Read and parse one Go source file.
///
/// # Errors
///
/// Returns `Error::UnsupportedLanguage` for non-Go files,
/// `Error::FileNotFound` if the file is missing,
/// or any error from [`frontend::parse_unit`].
pub fn read_unit(path: &Path, max_file_size: u64) -> Result<CompilationUnit, Error> {
    grammar::ensure_go_path(path)?;
    let source = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            return Error::FileNotFound { path: path.to_path_buf() };
        }
        return Error::Io(e);
    })?;
    return frontend::parse_unit(path, &source, max_file_size);
}

/// Load the package in `dir`: every Go file in name order, docs and
/// exported symbols aggregated, import path derived from the owning module.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `dir` is missing,
/// `Error::NoGoFiles` if it holds no Go sources,
/// or any error from reading and parsing a file.
pub fn load_package(dir: &Path, config: &Config, options: &ExtractOptions) -> Result<Package, Error> {
    let files = scanner::go_files(dir, config.include_tests)?;
    if files.is_empty() {
        return Err(Error::NoGoFiles { dir: dir.to_path_buf() });
    }

    let absolute = std::fs::canonicalize(dir)?;
    let mut units = files
        .iter()
        .map(|file| return read_unit(file, config.max_file_size))
        .collect::<Result<Vec<_>, _>>()?;
    let dir_name = absolute.file_name().map(|n| return n.to_string_lossy().into_owned()).unwrap_or_default();
    let name = primary_package_name(&units, &dir_name);
    units.retain(|unit| {
        let keep = unit.package == name;
        if !keep {
            debug!(file = %unit.path.display(), package = %unit.package, "skipping file of another package");
        }
        return keep;
    });

    let module = modules::find_module_root(&absolute)?;
    let extracted = walker::extract_package(&units, options);

    info!(dir = %dir.display(), files = units.len(), symbols = extracted.symbols.len(), "loaded package");
    return Ok(Package {
        docs: extracted.doc,
        module_name: module.as_ref().map(|m| return m.path.clone()).unwrap_or_default(),
        module_version: String::new(),
        name,
        path: import_path(dir, &absolute, module.as_ref()),
        symbols: extracted.symbols,
    });
}

/// Every package under `root`, keyed by import path, docs only. A package
/// that fails to load is logged and left out.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `root` is not a directory.
pub fn project_packages(root: &Path, config: &Config) -> Result<ProjectPackages, Error> {
    if !root.is_dir() {
        return Err(Error::FileNotFound { path: root.to_path_buf() });
    }

    let options = ExtractOptions { skip_symbols: true, ..ExtractOptions::default() };
    let mut project = ProjectPackages::default();
    for relative in scanner::package_dirs(root, config) {
        if let Some(package) = load_or_skip(&root.join(&relative), config, &options) {
            project.packages.insert(package.path.clone(), package);
        }
    }

    debug!(root = %root.display(), packages = project.packages.len(), "scanned project");
    return Ok(project);
}

/// Directory of a package named either by path or by import path within
/// the module that owns `base`.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `target` is neither an existing
/// directory nor an import path inside that module.
pub fn resolve_package_dir(target: &str, base: &Path) -> Result<PathBuf, Error> {
    let as_path = PathBuf::from(target);
    if as_path.is_dir() {
        return Ok(as_path);
    }

    let not_found = || return Error::FileNotFound { path: as_path.clone() };
    let absolute = std::fs::canonicalize(base)?;
    let Some(module) = modules::find_module_root(&absolute)? else {
        return Err(not_found());
    };
    let relative = if target == module.path {
        ""
    } else {
        let Some(rest) = target.strip_prefix(module.path.as_str()).and_then(|r| return r.strip_prefix('/')) else {
            return Err(not_found());
        };
        rest
    };

    let dir = module.dir.join(relative);
    if !dir.is_dir() {
        return Err(not_found());
    }
    debug!(import_path = target, dir = %dir.display(), "resolved import path");
    return Ok(dir);
}

/// Standard library packages under `$GOROOT/src`, keyed by import path.
/// `internal` trees at the top level and the `cmd` tree are not part of
/// the importable standard library and are left out, as is vendored code.
///
/// # Errors
///
/// Returns `Error::FileNotFound` if `$GOROOT/src` does not exist.
pub fn std_packages(goroot: &Path, max_file_size: u64, with_symbols: bool) -> Result<StdPackages, Error> {
    let src = goroot.join("src");
    if !src.is_dir() {
        return Err(Error::FileNotFound { path: src });
    }

    let mut config = Config::default();
    config.max_file_size = max_file_size;
    let options = ExtractOptions { skip_symbols: !with_symbols, ..ExtractOptions::default() };

    let mut stdlibs = BTreeMap::new();
    for relative in scanner::package_dirs(&src, &config) {
        let import_path = slash_path(&relative);
        let top = import_path.split('/').next().unwrap_or_default();
        if import_path.is_empty() || top == "internal" || top == "cmd" {
            continue;
        }
        if let Some(mut package) = load_or_skip(&src.join(&relative), &config, &options) {
            package.module_name = String::new();
            package.path.clone_from(&import_path);
            stdlibs.insert(import_path, package);
        }
    }

    info!(goroot = %goroot.display(), packages = stdlibs.len(), "loaded standard library");
    return Ok(StdPackages { stdlibs });
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Module path joined with the directory's path below the module root.
/// Without a module the directory is reported as given.
fn import_path(dir: &Path, absolute: &Path, module: Option<&ModuleRoot>) -> String {
    let Some(module) = module else {
        let given = slash_path(dir);
        return if given.is_empty() { ".".to_string() } else { given };
    };
    let relative = slash_path(absolute.strip_prefix(&module.dir).unwrap_or(Path::new("")));
    if relative.is_empty() {
        return module.path.clone();
    }
    return format!("{}/{relative}", module.path);
}

/// Load one package of a multi-package scan, logging instead of failing.
fn load_or_skip(dir: &Path, config: &Config, options: &ExtractOptions) -> Option<Package> {
    return match load_package(dir, config, options) {
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "skipping package");
            None
        },
        Ok(package) => Some(package),
    };
}

/// The package named after its directory wins; otherwise the first one
/// that is not an external test package (`foo_test`). Stray `package main`
/// generators beside a library are left out this way.
fn primary_package_name(units: &[CompilationUnit], dir_name: &str) -> String {
    let names = || return units.iter().map(|unit| return unit.package.as_str());
    return names()
        .find(|name| return *name == dir_name)
        .or_else(|| return names().find(|name| return !name.ends_with("_test")))
        .or_else(|| return names().next())
        .unwrap_or_default()
        .to_string();
}

/// Normal components joined with `/`, independent of the host separator.
fn slash_path(path: &Path) -> String {
    return path
        .components()
        .filter_map(|c| {
            return match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::CurDir | Component::ParentDir | Component::Prefix(_) | Component::RootDir => None,
            };
        })
        .collect::<Vec<_>>()
        .join("/");
}
