// src/config.rs
// =============================================================================
// Configuration: built-in defaults, an optional TOML file, then CLI flags.
//
// Precedence order (highest first):
// 1. Command-line arguments
// 2. Config file (--config FILE, or ./doclink-guardian.toml if present)
// 3. Built-in defaults
//
// Example doclink-guardian.toml:
//
//   roots = ["docs", ".cursor/rules"]
//   alias_roots = ["."]
//   extensions = ["md", "mdc"]
//   exclude = ["node_modules"]
//   fail_on_unreadable = true
//   jobs = 8
//   parser = "ast"
// =============================================================================

use crate::checker::ExtractMode;
use crate::scan::{default_exclude, default_extensions, ScanOptions};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when --config isn't given
pub const DEFAULT_CONFIG_FILE: &str = "doclink-guardian.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directories to scan for documents
    pub roots: Vec<PathBuf>,
    /// Directories `mdc:` targets are resolved against; empty means `roots`
    pub alias_roots: Vec<PathBuf>,
    /// Document extensions, without the dot
    pub extensions: Vec<String>,
    /// Directory names to skip while scanning
    pub exclude: Vec<String>,
    pub follow_symlinks: bool,
    /// Whether unreadable files fail the run like broken links do
    pub fail_on_unreadable: bool,
    /// Documents checked concurrently; 0 picks the number of CPUs
    pub jobs: usize,
    pub parser: ExtractMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("docs")],
            alias_roots: Vec::new(),
            extensions: default_extensions(),
            exclude: default_exclude(),
            follow_symlinks: true,
            fail_on_unreadable: true,
            jobs: 0,
            parser: ExtractMode::default(),
        }
    }
}

/// Settings given on the command line; None/empty means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub roots: Vec<PathBuf>,
    pub alias_roots: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub jobs: Option<usize>,
    pub parser: Option<ExtractMode>,
    pub allow_unreadable: bool,
}

impl Config {
    /// Loads the config file, if any.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config file");
        config.validated()
    }

    /// Applies command-line settings on top of this config
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if !overrides.roots.is_empty() {
            self.roots = overrides.roots;
        }
        if !overrides.alias_roots.is_empty() {
            self.alias_roots = overrides.alias_roots;
        }
        if !overrides.extensions.is_empty() {
            self.extensions = overrides.extensions;
        }
        if !overrides.exclude.is_empty() {
            self.exclude = overrides.exclude;
        }
        if let Some(jobs) = overrides.jobs {
            self.jobs = jobs;
        }
        if let Some(parser) = overrides.parser {
            self.parser = parser;
        }
        if overrides.allow_unreadable {
            self.fail_on_unreadable = false;
        }
        self.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.extensions.iter().all(|e| e.trim_start_matches('.').is_empty()) {
            bail!("at least one document extension must be configured");
        }
        Ok(self)
    }

    /// Roots used for `mdc:` links
    pub fn alias_roots(&self) -> Vec<PathBuf> {
        if self.alias_roots.is_empty() {
            self.roots.clone()
        } else {
            self.alias_roots.clone()
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extensions: self.extensions.clone(),
            exclude: self.exclude.clone(),
            follow_symlinks: self.follow_symlinks,
        }
    }

    /// Size of the worker pool, never zero
    pub fn worker_count(&self) -> usize {
        if self.jobs > 0 {
            self.jobs
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.roots, vec![PathBuf::from("docs")]);
        assert_eq!(config.alias_roots(), config.roots);
        assert!(config.fail_on_unreadable);
        assert_eq!(config.parser, ExtractMode::Pattern);
        assert!(config.worker_count() > 0);
    }

    #[test]
    fn test_parse_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doclink-guardian.toml");
        fs::write(
            &path,
            "roots = [\"docs\", \"rules\"]\nalias_roots = [\".\"]\nparser = \"ast\"\njobs = 3\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.roots, vec![PathBuf::from("docs"), PathBuf::from("rules")]);
        assert_eq!(config.alias_roots(), vec![PathBuf::from(".")]);
        assert_eq!(config.parser, ExtractMode::Ast);
        assert_eq!(config.worker_count(), 3);
        // Untouched keys keep their defaults
        assert_eq!(config.extensions, default_extensions());
        assert!(config.fail_on_unreadable);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "rootz = [\"docs\"]\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config {
            roots: vec![PathBuf::from("from-file")],
            jobs: 2,
            ..Config::default()
        };
        let config = config
            .with_overrides(Overrides {
                roots: vec![PathBuf::from("cli")],
                parser: Some(ExtractMode::Ast),
                allow_unreadable: true,
                ..Overrides::default()
            })
            .unwrap();

        assert_eq!(config.roots, vec![PathBuf::from("cli")]);
        assert_eq!(config.jobs, 2);
        assert_eq!(config.parser, ExtractMode::Ast);
        assert!(!config.fail_on_unreadable);
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let result = Config::default().with_overrides(Overrides {
            extensions: vec![".".to_string()],
            ..Overrides::default()
        });
        assert!(result.is_err());
    }
}
