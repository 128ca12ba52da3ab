// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use crate::checker::ExtractMode;
use crate::config::Overrides;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "doclink-guardian",
    version,
    about = "A CLI tool to scan documentation trees for broken relative and mdc: links",
    long_about = "doclink-guardian walks your documentation directories, extracts relative \
                  Markdown links and mdc: aliased links, and reports the ones that point at \
                  files that don't exist. It exits non-zero when anything is broken, so it \
                  drops straight into CI."
)]
pub struct Cli {
    /// Config file (defaults to ./doclink-guardian.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every document under the roots for broken links
    ///
    /// Example: doclink-guardian check docs .cursor/rules
    Check {
        #[command(flatten)]
        scan: ScanArgs,

        /// Directory to resolve mdc: links against (repeatable; defaults to the roots)
        #[arg(long = "alias-root", value_name = "DIR")]
        alias_roots: Vec<PathBuf>,

        /// Number of documents checked concurrently (default: number of CPUs)
        #[arg(long, short = 'j')]
        jobs: Option<usize>,

        /// Don't fail the run because of unreadable files (they are still reported)
        #[arg(long)]
        allow_unreadable: bool,

        /// Output results in JSON format instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the links that would be checked, without resolving them
    ///
    /// Example: doclink-guardian links docs --parser ast
    Links {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output links in JSON format instead of text
        #[arg(long)]
        json: bool,
    },
}

// Arguments shared by both subcommands
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root directories to scan (default: docs, or `roots` from the config file)
    #[arg(value_name = "ROOT")]
    pub roots: Vec<PathBuf>,

    /// Document extension to scan, without the dot (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Directory name to skip (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Link extractor: regex patterns over raw text, or a CommonMark parser
    #[arg(long, value_enum)]
    pub parser: Option<ExtractMode>,
}

impl ScanArgs {
    pub fn overrides(self) -> Overrides {
        Overrides {
            roots: self.roots,
            extensions: self.extensions,
            exclude: self.exclude,
            parser: self.parser,
            ..Overrides::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_arguments() {
        let cli = Cli::try_parse_from([
            "doclink-guardian",
            "-vv",
            "check",
            "docs",
            "rules",
            "--alias-root",
            ".",
            "--parser",
            "ast",
            "--json",
            "-j",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Check { scan, alias_roots, jobs, json, allow_unreadable } => {
                assert_eq!(scan.roots, vec![PathBuf::from("docs"), PathBuf::from("rules")]);
                assert_eq!(scan.parser, Some(ExtractMode::Ast));
                assert_eq!(alias_roots, vec![PathBuf::from(".")]);
                assert_eq!(jobs, Some(2));
                assert!(json);
                assert!(!allow_unreadable);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_links_defaults() {
        let cli = Cli::try_parse_from(["doclink-guardian", "links"]).unwrap();
        match cli.command {
            Commands::Links { scan, json } => {
                assert!(scan.roots.is_empty());
                assert!(scan.parser.is_none());
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
