// src/checker/extract.rs
// =============================================================================
// This module pulls checkable links out of raw document text.
//
// Two link flavors are recognised:
// - relative: [text](path/to/file.md)
// - aliased:  [text](mdc:path/under/a/root.md)
//
// The default `pattern` mode runs two independent regexes over the text, one
// per flavor. The `ast` mode (see markdown.rs) walks pulldown-cmark events
// instead and so ignores links inside code.
//
// Absolute URLs (anything with a scheme), protocol-relative `//host` targets
// and pure `#fragment` targets are never extracted.
// =============================================================================

use super::link::{LinkFlavor, LinkReference, ALIAS_PREFIX};
use super::markdown;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use url::Url;

// [text](target) - the relative matcher; mdc: targets are filtered out
static RELATIVE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());

// [text](mdc:target) - the aliased matcher, optionally angle-bracketed
static ALIASED_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(\s*(<?mdc:[^)]*)\)").unwrap());

/// Which extractor to run over a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractMode {
    /// Regex matchers over the raw text
    #[default]
    Pattern,
    /// CommonMark event walker; skips code spans and blocks
    Ast,
}

/// Extracts every checkable link from `content`, in document order
pub fn extract_links(content: &str, origin: &Path, mode: ExtractMode) -> Vec<LinkReference> {
    match mode {
        ExtractMode::Pattern => extract_with_patterns(content, origin),
        ExtractMode::Ast => markdown::extract_with_parser(content, origin),
    }
}

fn extract_with_patterns(content: &str, origin: &Path) -> Vec<LinkReference> {
    // Cheap pre-check, most lines never contain a link
    if !content.contains("](") {
        return Vec::new();
    }

    let lines = LineIndex::new(content);
    let mut found: Vec<(usize, LinkReference)> = Vec::new();

    for caps in RELATIVE_LINK.captures_iter(content) {
        let (Some(whole), Some(text), Some(dest)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if let Some((LinkFlavor::Relative, target)) = classify(dest.as_str()) {
            found.push((
                whole.start(),
                LinkReference {
                    text: text.as_str().to_string(),
                    target,
                    flavor: LinkFlavor::Relative,
                    origin: origin.to_path_buf(),
                    line: lines.line_of(whole.start()),
                },
            ));
        }
    }

    for caps in ALIASED_LINK.captures_iter(content) {
        let (Some(whole), Some(text), Some(dest)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if let Some((LinkFlavor::Aliased, target)) = classify(dest.as_str()) {
            found.push((
                whole.start(),
                LinkReference {
                    text: text.as_str().to_string(),
                    target,
                    flavor: LinkFlavor::Aliased,
                    origin: origin.to_path_buf(),
                    line: lines.line_of(whole.start()),
                },
            ));
        }
    }

    found.sort_by_key(|(offset, _)| *offset);
    found.into_iter().map(|(_, link)| link).collect()
}

/// Decides whether a link destination is checked, and how
///
/// Returns None for targets that are never checked (URLs, fragments).
/// For aliased links the returned target has the `mdc:` prefix removed.
pub(crate) fn classify(destination: &str) -> Option<(LinkFlavor, String)> {
    let dest = normalize_destination(destination);

    if let Some(rest) = dest.strip_prefix(ALIAS_PREFIX) {
        return Some((LinkFlavor::Aliased, rest.trim().to_string()));
    }
    if dest.starts_with('#') || dest.starts_with("//") || has_scheme(dest) {
        return None;
    }
    Some((LinkFlavor::Relative, dest.to_string()))
}

// Url::parse only succeeds for absolute URLs; relative paths fail with
// "relative URL without a base"
fn has_scheme(dest: &str) -> bool {
    !dest.is_empty() && Url::parse(dest).is_ok()
}

// Reduces `(<a b.md> "title")` or `(a.md "title")` to the bare destination
fn normalize_destination(raw: &str) -> &str {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix('<') {
        if let Some(end) = inner.find('>') {
            return inner[..end].trim();
        }
    }
    raw.split_whitespace().next().unwrap_or("")
}

/// Maps byte offsets to 1-based line numbers
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(content: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    pub(crate) fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Vec<LinkReference> {
        extract_links(content, Path::new("docs/a/README.md"), ExtractMode::Pattern)
    }

    #[test]
    fn test_extract_relative_link() {
        let links = extract("See [x](./b.md) for more.");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "x");
        assert_eq!(links[0].target, "./b.md");
        assert_eq!(links[0].flavor, LinkFlavor::Relative);
        assert_eq!(links[0].origin, Path::new("docs/a/README.md"));
    }

    #[test]
    fn test_extract_aliased_link() {
        let links = extract("Start with [y](mdc:guides/setup.md).");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].flavor, LinkFlavor::Aliased);
        assert_eq!(links[0].target, "guides/setup.md");
    }

    #[test]
    fn test_flavors_are_not_conflated() {
        let links = extract("[a](mdc:one.md) and [b](two.md) and [c]( mdc:three.md )");
        let flavors: Vec<_> = links.iter().map(|l| (l.target.as_str(), l.flavor)).collect();
        assert_eq!(
            flavors,
            vec![
                ("one.md", LinkFlavor::Aliased),
                ("two.md", LinkFlavor::Relative),
                ("three.md", LinkFlavor::Aliased),
            ]
        );
    }

    #[test]
    fn test_skip_absolute_urls() {
        let links = extract(
            "[Rust](https://www.rust-lang.org) [plain](http://example.com) \
             [mail](mailto:test@example.com) [cdn](//cdn.example.com/x.js)",
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only_links() {
        let links = extract("Jump to [section](#installation).");
        assert!(links.is_empty());
    }

    #[test]
    fn test_keep_fragment_on_file_link() {
        let links = extract("[intro](./b.md#intro)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "./b.md#intro");
    }

    #[test]
    fn test_empty_targets_are_extracted() {
        let links = extract("[nothing]() and [alias](mdc:)");
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.is_malformed()));
        assert_eq!(links[1].flavor, LinkFlavor::Aliased);
    }

    #[test]
    fn test_title_and_angle_brackets() {
        let links = extract(r#"[t](guide.md "The guide") and [s](<my notes.md>) and [a](<mdc:a b.md>)"#);
        let targets: Vec<_> = links.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["guide.md", "my notes.md", "a b.md"]);
        assert_eq!(links[2].flavor, LinkFlavor::Aliased);
    }

    #[test]
    fn test_images_are_checked() {
        let links = extract("![diagram](img/flow.png)");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "img/flow.png");
    }

    #[test]
    fn test_line_numbers() {
        let links = extract("# Title\n\nintro\n[a](a.md)\n\n[b](mdc:b.md)\n");
        assert_eq!(links[0].line, 4);
        assert_eq!(links[1].line, 6);
    }

    #[test]
    fn test_no_links() {
        assert!(extract("Just some prose with (parens) and [brackets].").is_empty());
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nb\n\nc");
        assert_eq!(index.line_of(0), 1);
        assert_eq!(index.line_of(2), 2);
        assert_eq!(index.line_of(4), 3);
        assert_eq!(index.line_of(5), 4);
    }
}
