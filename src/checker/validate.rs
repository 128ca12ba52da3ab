// src/checker/validate.rs
// =============================================================================
// Ties scanning, extraction and resolution together.
//
// Key functionality:
// - Every root is checked up front; an unreadable root aborts the run
// - Documents are checked concurrently on tokio's blocking pool, at most
//   `jobs` at a time (buffer_unordered)
// - Each document produces its own ValidationResult; results are merged,
//   so workers never share mutable state
// - The merged result is sorted, which makes repeated runs comparable
// =============================================================================

use super::extract::{extract_links, ExtractMode};
use super::link::{BrokenLink, DocumentFile, UnreadableFile};
use super::resolve::Resolver;
use crate::config::Config;
use crate::scan::{self, ScanError};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Outcome of validating one document, or a whole run once merged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub files_scanned: usize,
    pub links_checked: usize,
    pub broken: Vec<BrokenLink>,
    pub unreadable: Vec<UnreadableFile>,
}

impl ValidationResult {
    /// A result for a file that couldn't be read
    pub fn unreadable(path: &Path, error: impl ToString) -> Self {
        Self {
            unreadable: vec![UnreadableFile {
                path: path.to_path_buf(),
                error: error.to_string(),
            }],
            ..Self::default()
        }
    }

    /// Folds another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.files_scanned += other.files_scanned;
        self.links_checked += other.links_checked;
        self.broken.extend(other.broken);
        self.unreadable.extend(other.unreadable);
    }

    /// Puts diagnostics in a stable order regardless of worker scheduling
    pub fn sort(&mut self) {
        self.broken.sort_by(|a, b| {
            (&a.origin, a.line, &a.target, &a.text).cmp(&(&b.origin, b.line, &b.target, &b.text))
        });
        self.unreadable.sort_by(|a, b| a.path.cmp(&b.path));
    }

    pub fn broken_count(&self) -> usize {
        self.broken.len()
    }

    pub fn unreadable_count(&self) -> usize {
        self.unreadable.len()
    }

    /// Pass iff nothing is broken and, when `fail_on_unreadable` is set,
    /// every file could be read
    pub fn is_pass(&self, fail_on_unreadable: bool) -> bool {
        self.broken.is_empty() && (!fail_on_unreadable || self.unreadable.is_empty())
    }
}

/// Reads one document and checks every link in it
pub fn check_document(doc: &DocumentFile, resolver: &Resolver, mode: ExtractMode) -> ValidationResult {
    // Only I/O failures make a document unreadable; stray non-UTF-8 bytes
    // (e.g. Latin-1) are replaced so its links are still checked
    let content = match std::fs::read(doc.path()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::debug!(path = %doc.path().display(), error = %e, "cannot read document");
            return ValidationResult::unreadable(doc.path(), e);
        }
    };

    let links = extract_links(&content, doc.path(), mode);
    let mut result = ValidationResult {
        files_scanned: 1,
        links_checked: links.len(),
        ..ValidationResult::default()
    };

    for link in &links {
        if let Some(reason) = resolver.check(link) {
            tracing::debug!(
                origin = %link.origin.display(),
                line = link.line,
                target = %link.written_target(),
                ?reason,
                "broken link"
            );
            result.broken.push(BrokenLink::new(link, reason));
        }
    }

    tracing::trace!(path = %doc.path().display(), links = links.len(), "checked document");
    result
}

/// Validates every document under the configured roots
///
/// Returns Err only when a root itself can't be read.
pub async fn validate(config: &Config) -> Result<ValidationResult, ScanError> {
    for root in &config.roots {
        scan::ensure_root(root)?;
    }

    let resolver = Arc::new(Resolver::new(config.alias_roots()));
    let mode = config.parser;
    let jobs = config.worker_count();

    tracing::info!(roots = config.roots.len(), jobs, ?mode, "validating documentation links");

    let documents = scan::scan(&config.roots, &config.scan_options());

    // One future per document; buffer_unordered keeps at most `jobs` in
    // flight and yields results as they complete
    let checks = documents.map(|item| {
        let resolver = Arc::clone(&resolver);
        async move {
            match item {
                Ok(doc) => {
                    let path = doc.path().to_path_buf();
                    tokio::task::spawn_blocking(move || check_document(&doc, &resolver, mode))
                        .await
                        .unwrap_or_else(|e| ValidationResult::unreadable(&path, e))
                }
                Err(error) => ValidationResult::unreadable(error.path(), error.io_error()),
            }
        }
    });

    let mut result = stream::iter(checks)
        .buffer_unordered(jobs)
        .fold(ValidationResult::default(), |mut acc, outcome| async move {
            acc.merge(outcome);
            acc
        })
        .await;

    result.sort();

    tracing::info!(
        files = result.files_scanned,
        links = result.links_checked,
        broken = result.broken_count(),
        unreadable = result.unreadable_count(),
        "validation finished"
    );

    Ok(result)
}
