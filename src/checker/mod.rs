// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - link: the types that flow through a run
// - extract: regex extraction and link classification
// - markdown: pulldown-cmark based extraction
// - resolve: filesystem lookups for relative and mdc: links
// - validate: the concurrent scan -> extract -> resolve pipeline
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod extract;
mod link;
mod markdown;
mod resolve;
mod validate;

// Re-export public items from submodules
// This lets callers write `checker::validate()` instead of
// `checker::validate::validate()`
pub use extract::{extract_links, ExtractMode};
pub use link::{BrokenLink, BrokenReason, DocumentFile, LinkFlavor, LinkReference, UnreadableFile};
pub use validate::{validate, ValidationResult};
