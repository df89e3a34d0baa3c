use std::path::Path;

use crate::error::Error;

/// Default per-file size limit (16 MiB).
const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Project configuration loaded from `.gosym.toml`.
/// Include/exclude patterns are directory prefixes relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory prefixes skipped during project scans.
    exclude: Vec<String>,
    /// Directory prefixes scanned during project scans; empty means everything.
    include: Vec<String>,
    /// Whether `_test.go` files belong to a package.
    pub include_tests: bool,
    /// Per-file size limit in bytes.
    pub max_file_size: u64,
    /// Attach source positions to symbols by default.
    pub positions: bool,
}

/// Raw TOML structure for `.gosym.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct GosymTomlConfig {
    /// See [`Config::exclude`].
    #[serde(default)]
    exclude: Vec<String>,
    /// See [`Config::include`].
    #[serde(default)]
    include: Vec<String>,
    /// See [`Config::include_tests`].
    #[serde(default)]
    include_tests: bool,
    /// See [`Config::max_file_size`].
    max_file_size: Option<u64>,
    /// See [`Config::positions`].
    #[serde(default)]
    positions: bool,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            exclude: Vec::new(),
            include: Vec::new(),
            include_tests: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            positions: false,
        };
    }
}

impl Config {
    /// Load config from `.gosym.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist.
    /// Returns an error if the file exists but is malformed; a config the
    /// user wrote is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".gosym.toml");
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: GosymTomlConfig = toml::from_str(&content)?;
        return Ok(Self {
            exclude: raw.exclude,
            include: raw.include,
            include_tests: raw.include_tests,
            max_file_size: raw.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE),
            positions: raw.positions,
        });
    }

    /// Check whether a package directory should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.should_scan("anything"));
    }

    #[test]
    fn reads_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".gosym.toml"),
            "include = [\"pkg/\"]\nexclude = [\"pkg/internal/\"]\ninclude_tests = true\npositions = true\nmax_file_size = 1024\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.include_tests);
        assert!(config.positions);
        assert_eq!(config.max_file_size, 1024);
        assert!(config.should_scan("pkg/server"));
        assert!(!config.should_scan("pkg/internal/db"));
        assert!(!config.should_scan("cmd/tool"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gosym.toml"), "include = 3\n").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }
}
