// src/scan/error.rs
// =============================================================================
// Errors raised while walking the documentation roots.
//
// - Root: a configured root can't be listed; the run stops here
// - Unreadable: something below a root can't be read; it's skipped and
//   reported, and the walk goes on
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while walking the documentation roots
#[derive(Debug, Error)]
pub enum ScanError {
    /// A configured root can't be read; aborts the whole run
    #[error("cannot read root directory {}: {}", .path.display(), .source)]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file or directory below a root can't be read; only that entry is skipped
    #[error("cannot read {}: {}", .path.display(), .source)]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Builds the skip-and-continue variant from a walkdir error
    pub fn from_walk(root: &std::path::Path, error: walkdir::Error) -> Self {
        let path = error
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| root.to_path_buf());
        let message = error.to_string();
        let source = match error.into_io_error() {
            Some(io_error) => io_error,
            // Symlink loops carry no io::Error
            None => io::Error::other(message),
        };
        ScanError::Unreadable { path, source }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanError::Root { path, .. } | ScanError::Unreadable { path, .. } => path,
        }
    }

    pub fn io_error(&self) -> &io::Error {
        match self {
            ScanError::Root { source, .. } | ScanError::Unreadable { source, .. } => source,
        }
    }
}
