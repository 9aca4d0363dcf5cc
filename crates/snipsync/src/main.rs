//! snipsync CLI.
//!
//! Discovers the snippets configured in `<ROOT>/snex.conf.yaml` and rewrites
//! the `<!-- include origin::name -->` regions of every Markdown file below
//! `<ROOT>` (except `<ROOT>/snippets/`) with the current snippet text.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=debug`) for detailed logs on stderr.

mod error;
mod output;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use snipsync_docs::Syncer;
use snipsync_snex::{DEFAULT_CONFIG_NAME, SnexSource};
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;

/// snipsync - keep documentation snippets in sync with source code.
#[derive(Parser)]
#[command(name = "snipsync", version, about)]
struct Cli {
    /// Project root holding the snippet configuration and the documents.
    root: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let mut output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cli.root, &mut output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Synchronize every document below `root`.
///
/// The discovered identifiers are printed before any document is touched.
fn run<W: Write>(root: &Path, output: &mut Output<W>) -> Result<(), CliError> {
    if !root.is_dir() {
        return Err(CliError::Validation(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let syncer = Syncer::new(SnexSource);
    let registry = syncer.load_registry(root, DEFAULT_CONFIG_NAME)?;
    output.snippets(&registry);

    let report = syncer.sync(root, &registry)?;
    tracing::info!(
        scanned = report.scanned,
        updated = report.updated.len(),
        unresolved = report.unresolved.len(),
        "Synchronization finished"
    );
    output.report(&report);
    Ok(())
}
