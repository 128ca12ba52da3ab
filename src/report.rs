// src/report.rs
// =============================================================================
// Turns a ValidationResult into output for humans or machines.
//
// Text mode:
// - one stdout line per broken link:  origin:line: broken <flavor> link [text](target)
// - one stderr line per unreadable file
// - a summary line with all counts
//
// JSON mode prints the ValidationResult as-is, so stdout stays parseable.
// =============================================================================

use crate::checker::{BrokenLink, BrokenReason, LinkReference, UnreadableFile, ValidationResult};
use anyhow::Result;

pub fn print_results(result: &ValidationResult, json: bool, fail_on_unreadable: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_text(result, fail_on_unreadable);
    }
    Ok(())
}

fn print_text(result: &ValidationResult, fail_on_unreadable: bool) {
    for broken in &result.broken {
        println!("{}", format_broken(broken));
    }
    for unreadable in &result.unreadable {
        eprintln!("{}", format_unreadable(unreadable));
    }
    if !result.broken.is_empty() || !result.unreadable.is_empty() {
        println!();
    }
    println!("{}", format_summary(result, fail_on_unreadable));
}

pub fn format_broken(broken: &BrokenLink) -> String {
    let mut line = format!(
        "{}:{}: broken {} link [{}]({})",
        broken.origin.display(),
        broken.line,
        broken.flavor,
        broken.text,
        broken.target
    );
    if broken.reason == BrokenReason::EmptyTarget {
        line.push_str(" (empty target)");
    }
    line
}

pub fn format_unreadable(unreadable: &UnreadableFile) -> String {
    format!("{}: unreadable: {}", unreadable.path.display(), unreadable.error)
}

// The icon agrees with the exit status, so it honours the unreadable policy
pub fn format_summary(result: &ValidationResult, fail_on_unreadable: bool) -> String {
    let icon = if result.is_pass(fail_on_unreadable) {
        "✅"
    } else {
        "❌"
    };
    format!(
        "{} Scanned {} file(s), checked {} link(s): {} broken, {} unreadable",
        icon,
        result.files_scanned,
        result.links_checked,
        result.broken_count(),
        result.unreadable_count()
    )
}

// Output for the `links` subcommand
pub fn print_links(links: &[LinkReference], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(links)?);
        return Ok(());
    }

    for link in links {
        println!(
            "{}:{}\t{}\t{}",
            link.origin.display(),
            link.line,
            link.flavor,
            link.written_target()
        );
    }
    println!("🔗 {} link(s) found", links.len());
    Ok(())
}
