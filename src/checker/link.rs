// src/checker/link.rs
// =============================================================================
// The data that flows through a validation run.
//
// - LinkFlavor: how a link target is resolved (relative or mdc: aliased)
// - LinkReference: one link extracted from one document
// - BrokenLink / UnreadableFile: what gets reported
//
// None of this is persisted; everything lives for a single run.
// =============================================================================

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix that marks an aliased link target, e.g. `[setup](mdc:guides/setup.md)`
pub const ALIAS_PREFIX: &str = "mdc:";

/// A Markdown-like document found by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// How a link target is resolved
//
// #[serde(rename_all = "snake_case")] gives "relative" / "aliased" in JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkFlavor {
    /// Resolved against the directory containing the document
    Relative,
    /// `mdc:` target, resolved against any configured alias root
    Aliased,
}

impl fmt::Display for LinkFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkFlavor::Relative => f.write_str("relative"),
            LinkFlavor::Aliased => f.write_str("aliased"),
        }
    }
}

/// A link extracted from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReference {
    /// The display text between the square brackets
    pub text: String,
    /// The target as written; for aliased links the `mdc:` prefix is removed
    pub target: String,
    pub flavor: LinkFlavor,
    /// The document the link was found in
    pub origin: PathBuf,
    /// 1-based line number of the link in `origin`
    pub line: usize,
}

impl LinkReference {
    /// The target the way it appears in the document
    pub fn written_target(&self) -> String {
        match self.flavor {
            LinkFlavor::Relative => self.target.clone(),
            LinkFlavor::Aliased => format!("{}{}", ALIAS_PREFIX, self.target),
        }
    }

    /// A link with nothing to resolve, like `[x]()` or `[x](mdc:)`
    pub fn is_malformed(&self) -> bool {
        file_part(&self.target).is_empty()
    }
}

/// Strips a `#fragment` or `?query` suffix, leaving the path to check
pub fn file_part(target: &str) -> &str {
    let end = target.find(['#', '?']).unwrap_or(target.len());
    target[..end].trim()
}

// Why a link was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokenReason {
    /// Nothing exists at the resolved location
    Missing,
    /// The link has an empty target
    EmptyTarget,
}

/// A link whose target could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    pub origin: PathBuf,
    pub line: usize,
    pub text: String,
    pub target: String,
    pub flavor: LinkFlavor,
    pub reason: BrokenReason,
}

impl BrokenLink {
    pub fn new(link: &LinkReference, reason: BrokenReason) -> Self {
        Self {
            origin: link.origin.clone(),
            line: link.line,
            text: link.text.clone(),
            target: link.written_target(),
            flavor: link.flavor,
            reason,
        }
    }
}

/// A file or directory that could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadableFile {
    pub path: PathBuf,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(target: &str, flavor: LinkFlavor) -> LinkReference {
        LinkReference {
            text: "x".to_string(),
            target: target.to_string(),
            flavor,
            origin: PathBuf::from("docs/README.md"),
            line: 3,
        }
    }

    #[test]
    fn test_file_part_strips_fragment_and_query() {
        assert_eq!(file_part("./b.md#intro"), "./b.md");
        assert_eq!(file_part("guide.md?plain=1"), "guide.md");
        assert_eq!(file_part("plain.md"), "plain.md");
    }

    #[test]
    fn test_written_target_restores_prefix() {
        assert_eq!(link("guides/setup.md", LinkFlavor::Aliased).written_target(), "mdc:guides/setup.md");
        assert_eq!(link("./b.md", LinkFlavor::Relative).written_target(), "./b.md");
    }

    #[test]
    fn test_empty_target_is_malformed() {
        assert!(link("", LinkFlavor::Relative).is_malformed());
        assert!(link("  ", LinkFlavor::Aliased).is_malformed());
        assert!(link("?only-query", LinkFlavor::Relative).is_malformed());
        assert!(!link("./b.md", LinkFlavor::Relative).is_malformed());
    }

    #[test]
    fn test_broken_link_copies_reference() {
        let broken = BrokenLink::new(&link("guides/x.md", LinkFlavor::Aliased), BrokenReason::Missing);
        assert_eq!(broken.origin, PathBuf::from("docs/README.md"));
        assert_eq!(broken.line, 3);
        assert_eq!(broken.target, "mdc:guides/x.md");
    }

    #[test]
    fn test_flavor_serializes_snake_case() {
        let json = serde_json::to_string(&LinkFlavor::Aliased).unwrap();
        assert_eq!(json, "\"aliased\"");
    }
}
