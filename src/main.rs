// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging and load the config file
// 3. Dispatch to the appropriate subcommand handler
// 4. Print results
// 5. Exit with proper code (0 = success, 1 = broken links, 2 = error)
// =============================================================================

mod checker; // src/checker/ - extraction, resolution, validation
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - config file + CLI overrides
mod report; // src/report.rs - text and JSON output
mod scan; // src/scan/ - finding documents on disk

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, Overrides};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every link resolves
//   Ok(1) = broken links (or unreadable files) found
//   Err   = fatal error, mapped to exit code 2
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            scan,
            alias_roots,
            jobs,
            allow_unreadable,
            json,
        } => {
            let config = config.with_overrides(Overrides {
                alias_roots,
                jobs,
                allow_unreadable,
                ..scan.overrides()
            })?;
            handle_check(&config, json).await
        }
        Commands::Links { scan, json } => {
            let config = config.with_overrides(scan.overrides())?;
            handle_links(&config, json)
        }
    }
}

// Logs go to stderr so they never mix with results on stdout
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Handles the 'check' subcommand
async fn handle_check(config: &Config, json: bool) -> Result<i32> {
    let result = checker::validate(config).await?;

    report::print_results(&result, json, config.fail_on_unreadable)?;

    if result.is_pass(config.fail_on_unreadable) {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Handles the 'links' subcommand: scan and extract, no resolution
fn handle_links(config: &Config, json: bool) -> Result<i32> {
    for root in &config.roots {
        scan::ensure_root(root)?;
    }

    let mut links = Vec::new();
    for item in scan::scan(&config.roots, &config.scan_options()) {
        let doc = match item {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("{}: unreadable: {}", e.path().display(), e.io_error());
                continue;
            }
        };
        match std::fs::read(doc.path()) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                links.extend(checker::extract_links(&content, doc.path(), config.parser));
            }
            Err(e) => eprintln!("{}: unreadable: {}", doc.path().display(), e),
        }
    }

    report::print_links(&links, json)?;
    Ok(0)
}
