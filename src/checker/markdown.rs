// src/checker/markdown.rs
// =============================================================================
// This module extracts links by actually parsing the Markdown.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// Unlike the regex matchers in extract.rs, the parser knows about code spans
// and fenced code blocks, so example links inside code are not checked.
// Classification (relative vs aliased, skipping URLs and fragments) is shared
// with the regex path.
// =============================================================================

use super::extract::{classify, LineIndex};
use super::link::LinkReference;
use pulldown_cmark::{Event, LinkType, Parser, Tag};
use std::path::Path;

// A link we're inside of, waiting for its End event
struct OpenLink {
    destination: String,
    text: String,
    offset: usize,
    // Autolinks like <https://...> or <me@example.com> are never files
    checkable: bool,
}

// Extracts relative and aliased links from Markdown text
//
// Example input:
//   "See [setup](mdc:guides/setup.md) and [Rust](https://www.rust-lang.org)"
//
// Example output:
//   one aliased link with target "guides/setup.md"
pub fn extract_with_parser(markdown: &str, origin: &Path) -> Vec<LinkReference> {
    let lines = LineIndex::new(markdown);
    let mut links = Vec::new();

    // Markdown parsing produces multiple events per link:
    // 1. Start(Link) - link begins
    // 2. Text - the link text (possibly several events)
    // 3. End(Link) - link ends
    // Links can nest (an image inside a link), hence a stack
    let mut open: Vec<OpenLink> = Vec::new();

    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::Link(link_type, dest_url, _)) => {
                open.push(OpenLink {
                    destination: dest_url.to_string(),
                    text: String::new(),
                    offset: range.start,
                    checkable: !matches!(link_type, LinkType::Autolink | LinkType::Email),
                });
            }

            Event::Start(Tag::Image(_, dest_url, _)) => {
                open.push(OpenLink {
                    destination: dest_url.to_string(),
                    text: String::new(),
                    offset: range.start,
                    checkable: true,
                });
            }

            Event::Text(text) | Event::Code(text) => {
                for link in open.iter_mut() {
                    link.text.push_str(&text);
                }
            }

            Event::End(Tag::Link(..)) | Event::End(Tag::Image(..)) => {
                let Some(link) = open.pop() else { continue };
                if !link.checkable {
                    continue;
                }
                if let Some((flavor, target)) = classify(&link.destination) {
                    links.push(LinkReference {
                        text: link.text,
                        target,
                        flavor,
                        origin: origin.to_path_buf(),
                        line: lines.line_of(link.offset),
                    });
                }
            }

            // We don't care about other events (headings, paragraphs, etc.)
            _ => {}
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::link::LinkFlavor;

    fn extract(markdown: &str) -> Vec<LinkReference> {
        extract_with_parser(markdown, Path::new("docs/index.md"))
    }

    #[test]
    fn test_extract_both_flavors() {
        let links = extract("See [setup](mdc:guides/setup.md) and [next](./next.md).");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].flavor, LinkFlavor::Aliased);
        assert_eq!(links[0].target, "guides/setup.md");
        assert_eq!(links[0].text, "setup");
        assert_eq!(links[1].flavor, LinkFlavor::Relative);
        assert_eq!(links[1].target, "./next.md");
    }

    #[test]
    fn test_skip_http_and_autolinks() {
        let links = extract(
            "Check out [Rust](https://www.rust-lang.org), <https://docs.rs> and <me@example.com>",
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_skip_fragment_links() {
        assert!(extract("[top](#top)").is_empty());
    }

    #[test]
    fn test_skip_links_in_code() {
        let markdown = "Inline `[x](./gone.md)` code.\n\n```md\n[y](mdc:gone.md)\n```\n";
        assert!(extract(markdown).is_empty());
    }

    #[test]
    fn test_text_with_code_span() {
        let links = extract("[the `setup` guide](setup.md)");
        assert_eq!(links[0].text, "the setup guide");
    }

    #[test]
    fn test_image_inside_link() {
        // The inner image closes first
        let links = extract("[![badge](img/badge.svg)](mdc:status.md)");
        let targets: Vec<_> = links.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["img/badge.svg", "status.md"]);
        assert_eq!(links[1].text, "badge");
    }

    #[test]
    fn test_line_numbers() {
        let links = extract("# Title\n\nSome text\n\n![img](pics/a.png)\n");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].line, 5);
    }
}
