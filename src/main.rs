//! Main entry point for the assetprobe CLI application.
//!
//! Prints the detected container type of every file given on the
//! command line.

use anyhow::{Result, bail};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

use assetprobe::{Cli, FileReader, FileType, OpenError, SourceStream};

/// Application entry point.
///
/// Each file gets its own stream and is classified on the blocking pool,
/// so large zstd-wrapped inputs decompress in parallel. At most `--jobs`
/// files are open at once; a decompressed buffer is dropped as soon as its
/// verdict is known. Results are printed in the order the files were given.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let permits = Arc::new(Semaphore::new(cli.jobs()));
    let handles: Vec<_> = cli
        .files
        .iter()
        .map(|file| {
            let file = file.clone();
            let raw = cli.raw;
            let unwrap = cli.unwrap;
            let permits = permits.clone();
            tokio::spawn(async move {
                let _permit = permits.acquire_owned().await?;
                let verdict = tokio::task::spawn_blocking(move || {
                    inspect(Path::new(&file), raw, unwrap)
                        .map(|reader| (reader.file_type(), describe(&reader)))
                })
                .await?;
                anyhow::Ok(verdict)
            })
        })
        .collect();

    let mut counts: BTreeMap<FileType, usize> = BTreeMap::new();
    let mut failures = 0usize;

    for (file, handle) in cli.files.iter().zip(handles) {
        match handle.await?? {
            Ok((file_type, description)) => {
                println!("{}: {}", file, description);
                *counts.entry(file_type).or_default() += 1;
            }
            Err(e) => {
                failures += 1;
                if !cli.is_very_quiet() {
                    eprintln!("{}: {}", file, e);
                }
            }
        }
    }

    // Print summary table
    if cli.summary && !cli.is_quiet() {
        println!("{}", "-".repeat(30));
        for (file_type, count) in &counts {
            println!("{:>14}  {:>8}", file_type.as_str(), count);
        }
        println!("{:>14}  {:>8}", "total", counts.values().sum::<usize>());
    }

    if failures > 0 {
        bail!("{} of {} files could not be read", failures, cli.files.len());
    }

    Ok(())
}

/// Open and classify a single file.
///
/// # Arguments
///
/// * `path` - File to inspect
/// * `raw` - Skip the zstd front-end and classify the bytes as stored
/// * `unwrap` - Peel gzip/brotli web compression and classify the payload
fn inspect(path: &Path, raw: bool, unwrap: bool) -> Result<FileReader, OpenError> {
    let reader = if raw {
        FileReader::from_stream(path, SourceStream::open(path)?)
    } else {
        FileReader::open(path)?
    };

    if unwrap {
        reader.unwrap_web_container()
    } else {
        Ok(reader)
    }
}

/// Format a verdict with any stripped wrappers, e.g. `AssetsFile (zstd)`.
fn describe(reader: &FileReader) -> String {
    if reader.wrappers().is_empty() {
        return reader.file_type().to_string();
    }

    let wrappers: Vec<_> = reader.wrappers().iter().map(|c| c.as_str()).collect();
    format!("{} ({})", reader.file_type(), wrappers.join(", "))
}
