//! Main entry point for the zipls CLI application.
//!
//! Opens a local file or HTTP URL, lists its entries to stdout and reports
//! failures on stderr.

use std::io::{BufWriter, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use zipls::{Cli, HttpRangeReader, ListSummary, LocalFileReader, ReadAt, ZipReader, list_entries};

/// Application entry point.
///
/// Failures are logged through `tracing` and turn into exit status 1.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(file = %cli.file, "{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatch to the appropriate reader based on whether the input is a local
/// file or HTTP URL.
async fn run(cli: &Cli) -> Result<()> {
    if cli.is_http_url() {
        let reader = HttpRangeReader::new(cli.file.clone())
            .await
            .with_context(|| format!("cannot open {}", cli.file))?;
        let result = list_archive(&reader).await;
        info!(
            transferred = reader.transferred_bytes(),
            "total bytes transferred"
        );
        result?;
    } else {
        let reader = LocalFileReader::new(Path::new(&cli.file))
            .with_context(|| format!("cannot open {}", cli.file))?;
        list_archive(&reader).await?;
    }
    Ok(())
}

/// Install the stderr log subscriber.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_new(cli.log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Open the central directory and write the listing to stdout.
///
/// Rows written before a failure are flushed before the error is returned.
async fn list_archive<R: ReadAt>(source: &R) -> Result<ListSummary> {
    let mut reader = ZipReader::open(source).await?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    let result = list_entries(&mut reader, &mut out);
    out.flush()?;

    let summary = result?;
    info!(entries = summary.entries, "listed archive");
    Ok(summary)
}
