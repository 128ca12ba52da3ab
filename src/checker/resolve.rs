// src/checker/resolve.rs
// =============================================================================
// Resolves extracted links against the filesystem.
//
// - relative links: joined onto the directory of the document they live in
// - aliased links:  joined onto each alias root in turn, first hit wins
//
// Fragments and queries (`#intro`, `?plain=1`) are not part of the file path
// and are dropped before the lookup.
// =============================================================================

use super::link::{file_part, BrokenReason, LinkFlavor, LinkReference};
use std::path::{Path, PathBuf};

/// Answers "does this link point at something?"
#[derive(Debug, Clone)]
pub struct Resolver {
    alias_roots: Vec<PathBuf>,
}

impl Resolver {
    pub fn new(alias_roots: Vec<PathBuf>) -> Self {
        Self { alias_roots }
    }

    /// Returns true if an entry exists where the link points
    pub fn resolve(&self, link: &LinkReference) -> bool {
        let target = file_part(&link.target);
        if target.is_empty() {
            return false;
        }

        match link.flavor {
            LinkFlavor::Relative => {
                let base = link.origin.parent().unwrap_or(Path::new(""));
                base.join(target).exists()
            }
            LinkFlavor::Aliased => self.alias_roots.iter().any(|root| root.join(target).exists()),
        }
    }

    /// Like [`Resolver::resolve`], but says why a link is broken
    pub fn check(&self, link: &LinkReference) -> Option<BrokenReason> {
        if link.is_malformed() {
            Some(BrokenReason::EmptyTarget)
        } else if self.resolve(link) {
            None
        } else {
            Some(BrokenReason::Missing)
        }
    }
}
