//! `resolve` and `scan` subcommands, writing to any output stream.

use crate::output;
use anyhow::Result;
use fileinfo_core::config::AppConfig;
use fileinfo_core::resolver::{self, LocalResolver};
use fileinfo_core::scanner::{self, ScanOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Resolves every input and prints the successes.
///
/// Errors after printing when any input failed to resolve.
pub async fn run_resolve<W: Write>(
    cfg: &AppConfig,
    uris: &[String],
    json: bool,
    out: &mut W,
) -> Result<()> {
    let resolver = LocalResolver::new(cfg.resolver.clone());
    let results = resolver::resolve_many(&resolver, uris).await;

    let mut records = Vec::with_capacity(results.len());
    let mut failed = 0usize;
    for (uri, result) in uris.iter().zip(results) {
        match result {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(uri = %uri, error = %err, "failed to resolve");
                failed += 1;
            }
        }
    }

    if json {
        writeln!(out, "{}", output::render_json(&records)?)?;
    } else if !records.is_empty() {
        writeln!(out, "{}", output::render_text(&records))?;
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} inputs could not be resolved", uris.len());
    }
    Ok(())
}

/// Roots and options for a scan: command-line roots win over `scan.include`,
/// extra excludes and `--hidden` add to the configured values.
pub fn scan_plan(
    cfg: &AppConfig,
    roots: Vec<PathBuf>,
    exclude: Vec<String>,
    hidden: bool,
) -> Result<(Vec<PathBuf>, ScanOptions)> {
    let roots: Vec<PathBuf> = if roots.is_empty() {
        cfg.scan.include.iter().map(PathBuf::from).collect()
    } else {
        roots
    };
    if roots.is_empty() {
        anyhow::bail!("no scan roots given and scan.include is empty");
    }

    let mut options = ScanOptions::from(&cfg.scan);
    options.exclude.extend(exclude);
    options.include_hidden |= hidden;
    Ok((roots, options))
}

pub async fn run_scan<W: Write>(
    cfg: &AppConfig,
    roots: Vec<PathBuf>,
    exclude: Vec<String>,
    hidden: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let (roots, options) = scan_plan(cfg, roots, exclude, hidden)?;
    let resolver = LocalResolver::new(cfg.resolver.clone());
    let records = scanner::scan(&roots, &options, &resolver).await?;

    if json {
        writeln!(out, "{}", output::render_scan_json(&records)?)?;
    } else {
        writeln!(out, "{}", output::render_scan_text(&records))?;
    }
    Ok(())
}
