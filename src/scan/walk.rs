// src/scan/walk.rs
// =============================================================================
// Recursive walk over the documentation roots.
//
// How it works:
// 1. Each root is walked depth-first with walkdir, entries sorted by name
// 2. Excluded directory names are pruned before descending into them
// 3. Regular files with a Markdown-family extension are yielded
// 4. Walk errors (permissions, I/O, symlink loops) are yielded as
//    ScanError::Unreadable and the walk carries on
//
// Roots may overlap (nested, repeated, or reached through a symlink), so
// each document is yielded once, keyed by its canonical path.
//
// The returned iterator is lazy: nothing touches the disk until it's pulled.
// =============================================================================

use super::{ScanError, ScanOptions};
use crate::checker::DocumentFile;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Fails if `root` can't be listed (missing, not a directory, no permission)
pub fn ensure_root(root: &Path) -> Result<(), ScanError> {
    std::fs::read_dir(root)
        .map(|_| ())
        .map_err(|source| ScanError::Root {
            path: root.to_path_buf(),
            source,
        })
}

/// Walks every root and yields the documents found, root by root
///
/// A document reachable from several roots is yielded the first time only.
pub fn scan(
    roots: &[PathBuf],
    options: &ScanOptions,
) -> impl Iterator<Item = Result<DocumentFile, ScanError>> {
    let options = options.clone();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    roots
        .to_vec()
        .into_iter()
        .flat_map(move |root| walk_root(root, options.clone()))
        .filter(move |item| match item {
            Ok(doc) => {
                let first = seen.insert(canonical(doc.path()));
                if !first {
                    tracing::trace!(path = %doc.path().display(), "already scanned via another root");
                }
                first
            }
            Err(_) => true,
        })
}

// Falls back to the path as given when it can't be canonicalized
fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn walk_root(
    root: PathBuf,
    options: ScanOptions,
) -> impl Iterator<Item = Result<DocumentFile, ScanError>> {
    tracing::debug!(root = %root.display(), "scanning root");

    let ScanOptions {
        extensions,
        exclude,
        follow_symlinks,
    } = options;

    WalkDir::new(&root)
        .follow_links(follow_symlinks)
        .sort_by_file_name()
        .into_iter()
        // The root itself is never pruned, even if its name is excluded
        .filter_entry(move |entry| entry.depth() == 0 || !is_excluded(entry, &exclude))
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), &extensions) {
                    Some(Ok(DocumentFile::new(entry.into_path())))
                } else {
                    None
                }
            }
            Err(error) => {
                let error = ScanError::from_walk(&root, error);
                tracing::debug!(path = %error.path().display(), %error, "skipping unreadable entry");
                Some(Err(error))
            }
        })
}

fn is_excluded(entry: &DirEntry, exclude: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| exclude.iter().any(|x| x == name))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}
