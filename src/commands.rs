//! CLI commands for gosym: symbols, package, project, std, env, modules.
//! Every command prints one pretty JSON document on stdout.

use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::error;
use crate::modules;
use crate::package;
use crate::toolchain;
use crate::types::Module;
use crate::walker::{self, ExtractOptions};

/// `gosym modules` output.
#[derive(Serialize)]
struct ModuleList {
    /// Modules in the order the toolchain reported them.
    modules: Vec<Module>,
}

/// Report the installed Go toolchain.
///
/// # Errors
///
/// Returns toolchain lookup or query errors.
pub fn env() -> Result<(), error::Error> {
    return print_json(&toolchain::go_env()?);
}

/// List the modules used by the project in `dir`.
///
/// # Errors
///
/// Returns toolchain or decoding errors from the module listing.
pub fn modules(dir: &Path) -> Result<(), error::Error> {
    let modules = modules::used_modules(dir)?;
    return print_json(&ModuleList { modules });
}

/// Exported symbols and docs of one package, named by directory or by
/// import path within the current module.
///
/// # Errors
///
/// Returns config, resolution, file reading, or parse errors.
pub fn package(target: &str, positions: bool, skip_symbols: bool) -> Result<(), error::Error> {
    let config = Config::load(Path::new("."))?;
    let dir = package::resolve_package_dir(target, Path::new("."))?;
    let options = ExtractOptions {
        include_positions: positions || config.positions,
        skip_symbols,
        ..ExtractOptions::default()
    };
    return print_json(&package::load_package(&dir, &config, &options)?);
}

/// Every package under `root` with its docs.
///
/// # Errors
///
/// Returns config errors, or `Error::FileNotFound` if `root` is missing.
pub fn project(root: &Path) -> Result<(), error::Error> {
    let config = Config::load(root)?;
    return print_json(&package::project_packages(root, &config)?);
}

/// Standard library packages of the installed toolchain, docs only unless
/// `with_symbols` is set.
///
/// # Errors
///
/// Returns config or toolchain errors, or `Error::FileNotFound` if
/// `$GOROOT/src` is missing.
pub fn stdlib(with_symbols: bool) -> Result<(), error::Error> {
    let config = Config::load(Path::new("."))?;
    let env = toolchain::go_env()?;
    let stdlibs = package::std_packages(Path::new(&env.goroot), config.max_file_size, with_symbols)?;
    return print_json(&stdlibs);
}

/// Exported symbols and docs of a single Go file.
///
/// # Errors
///
/// Returns config, file reading, language, or parse errors.
pub fn symbols(file: &Path, positions: bool) -> Result<(), error::Error> {
    let config = Config::load(Path::new("."))?;
    let unit = package::read_unit(file, config.max_file_size)?;
    let options = ExtractOptions { include_positions: positions || config.positions, ..ExtractOptions::default() };
    return print_json(&walker::extract_symbols(&unit, &options));
}

/// Serialize `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
fn print_json<T: Serialize>(value: &T) -> Result<(), error::Error> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    return Ok(());
}
