//! Logging initialization

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Initialize logging based on debug flag
///
/// With `debug`, everything down to debug level goes to a temp file whose
/// path is returned. Otherwise warnings go to stderr, filtered by `RUST_LOG`.
pub fn init_logging(debug: bool) -> Result<Option<PathBuf>> {
    if !debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_target(false)
            .init();
        return Ok(None);
    }

    // Named temp file that outlives this process for post-mortem reading
    let temp_file = tempfile::Builder::new()
        .prefix("kubegraph-")
        .suffix(".log")
        .tempfile()
        .map(|f| {
            let path = f.path().to_path_buf();
            // Leak the handle so the file is not deleted on drop
            std::mem::forget(f);
            path
        })
        .unwrap_or_else(|_| {
            std::env::temp_dir().join(format!("kubegraph-{}.log", std::process::id()))
        });

    let file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&temp_file)
        .with_context(|| format!("Failed to open log file: {}", temp_file.display()))?;

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false) // No ANSI codes in log file
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(Some(temp_file))
}
