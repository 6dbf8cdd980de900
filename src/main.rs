//! CLI entry point for the Europeana search tool.

use std::io::{self, BufWriter, Write};
use std::pin::pin;

use anyhow::{Context, Result};
use clap::Parser;
use europeana::{CURSOR_START, Client};
use futures_util::TryStreamExt;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    // The API key stays out of the logs.
    debug!(
        query = ?args.query,
        filters = ?args.filters,
        rows = args.rows,
        max_records = ?args.max_records,
        "CLI arguments parsed"
    );

    let client = Client::new(args.api_key.clone()).context("failed to construct API client")?;

    let mut builder = client.query().rows(args.rows);
    if let Some(text) = &args.query {
        builder = builder.text_query(text.clone());
    }
    for (field, value) in &args.filters {
        builder = builder.filter(field.as_str(), value.clone());
    }
    if let Some(media_type) = args.media_type {
        builder = builder.media_type(media_type);
    }
    if let Some(level) = args.reusability {
        builder = builder.reusability(level);
    }
    if !args.facets.is_empty() {
        builder = builder
            .facets(args.facets.iter().copied())
            .context("facet selection rejected")?;
    }
    let request = builder.build();

    info!(query = %request.query(), "starting search");

    // Facet counts come from a zero-row probe so the record stream below
    // starts from a clean cursor.
    if !request.facets().is_empty() {
        let probe = client
            .search_raw(&request.with_rows(0), CURSOR_START)
            .await
            .context("facet request failed")?;
        info!(total = probe.total_results, "facet probe complete");
        for facet in probe.facets.iter().flatten() {
            for entry in &facet.fields {
                eprintln!("{}\t{}\t{}", facet.name, entry.label, entry.count);
            }
        }
    }

    // One JSON object per line on stdout; logs and facet counts go to stderr.
    let stream = client.search_all_raw(&request, args.max_records);
    let mut stream = pin!(stream);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut printed: usize = 0;

    while let Some(item) = stream.try_next().await.context("search stream failed")? {
        let line = serde_json::to_string(&item).context("failed to serialize record")?;
        writeln!(out, "{line}")?;
        printed += 1;
    }
    out.flush()?;

    info!(records = printed, "search complete");

    Ok(())
}
