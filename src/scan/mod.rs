// src/scan/mod.rs
// =============================================================================
// This module finds the documents to check.
//
// Features:
// - Recursive walk of every configured root directory
// - Markdown-family extension filter (md, mdc, mdx, markdown by default)
// - Skips excluded directory names like .git and node_modules
// - Unreadable directories are reported and skipped, never fatal
//
// The only fatal condition is a root that cannot be read at all.
// =============================================================================

mod error;
mod walk;

pub use error::ScanError;
pub use walk::{ensure_root, scan};

/// Knobs for the directory walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// File extensions (without the dot) that count as documents
    pub extensions: Vec<String>,
    /// Directory names that are never descended into
    pub exclude: Vec<String>,
    pub follow_symlinks: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
            follow_symlinks: true,
        }
    }
}

pub fn default_extensions() -> Vec<String> {
    ["md", "mdc", "mdx", "markdown"].iter().map(|e| e.to_string()).collect()
}

pub fn default_exclude() -> Vec<String> {
    [".git", "node_modules", "target"].iter().map(|e| e.to_string()).collect()
}
