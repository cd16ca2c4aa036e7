//! Walks directory trees and resolves every file found into a record.

use crate::models::FileRecord;
use crate::resolver::ContentResolver;
use crate::uri;
use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub exclude: Vec<String>,
    pub include_hidden: bool,
}

impl From<&crate::config::ScanConfig> for ScanOptions {
    fn from(cfg: &crate::config::ScanConfig) -> Self {
        Self {
            exclude: cfg.exclude.clone(),
            include_hidden: cfg.include_hidden,
        }
    }
}

pub async fn scan<R>(
    roots: &[PathBuf],
    options: &ScanOptions,
    resolver: &R,
) -> anyhow::Result<Vec<FileRecord>>
where
    R: ContentResolver + ?Sized,
{
    let mut absolute_roots = Vec::with_capacity(roots.len());
    for root in roots {
        if !root.exists() {
            anyhow::bail!("scan root does not exist: {}", root.display());
        }
        let canonical = std::fs::canonicalize(root)
            .with_context(|| format!("failed to canonicalize scan root: {}", root.display()))?;
        absolute_roots.push(canonical);
    }

    let (tx, mut rx) = mpsc::channel::<PathBuf>(100);
    let exclude_set = build_globset(&options.exclude)?;
    let include_hidden = options.include_hidden;
    let roots = absolute_roots;

    // Walker task
    let walker_handle = task::spawn_blocking(move || {
        for root in roots {
            for entry in WalkDir::new(&root)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || should_descend(e.path(), include_hidden, &exclude_set))
            {
                let entry = match entry {
                    Ok(e) => e,
                    Err(err) => {
                        warn!(error = %err, "skipping unreadable entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                if tx.blocking_send(entry.into_path()).is_err() {
                    // Receiver dropped, stop walking.
                    return;
                }
            }
        }
    });

    let mut records = Vec::new();
    let mut skipped = 0usize;
    while let Some(path) = rx.recv().await {
        // Paths travel as `file://` URIs so odd names never read as a scheme.
        let resolved = match uri::from_local_path(&path) {
            Ok(file_uri) => resolver.resolve(&file_uri).await,
            Err(err) => Err(err),
        };
        match resolved {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping file");
                skipped += 1;
            }
        }
    }

    walker_handle.await.context("scan walker task failed")?;
    info!(resolved = records.len(), skipped, "scan complete");
    Ok(records)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid exclude pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn should_descend(path: &Path, include_hidden: bool, excludes: &GlobSet) -> bool {
    if excludes.is_match(path) {
        return false;
    }
    if !include_hidden && is_hidden(path) {
        return false;
    }
    true
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::LocalResolver;
    use std::fs;
    use tempfile::tempdir;

    fn names(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.display_name()).collect()
    }

    #[tokio::test]
    async fn scans_files_in_name_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "bb").unwrap();
        fs::write(dir.path().join("a.png"), "a").unwrap();
        fs::write(dir.path().join("sub/c.pdf"), "ccc").unwrap();

        let records = scan(
            &[dir.path().to_path_buf()],
            &ScanOptions::default(),
            &LocalResolver::default(),
        )
        .await
        .unwrap();

        assert_eq!(names(&records), vec!["a.png", "b.txt", "c.pdf"]);
        assert_eq!(records[1].size(), 2);
        assert_eq!(records[2].mime_type(), Some("application/pdf"));
    }

    #[tokio::test]
    async fn honors_excludes_and_hidden() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".cache")).unwrap();
        fs::create_dir_all(dir.path().join("build")).unwrap();
        fs::write(dir.path().join(".cache/x.txt"), "x").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "h").unwrap();
        fs::write(dir.path().join("build/out.txt"), "o").unwrap();
        fs::write(dir.path().join("keep.txt"), "k").unwrap();
        fs::write(dir.path().join("drop.tmp"), "d").unwrap();

        let options = ScanOptions {
            exclude: vec!["**/build".to_string(), "**/*.tmp".to_string()],
            include_hidden: false,
        };
        let resolver = LocalResolver::default();
        let records = scan(&[dir.path().to_path_buf()], &options, &resolver).await.unwrap();
        assert_eq!(names(&records), vec!["keep.txt"]);

        let options = ScanOptions {
            include_hidden: true,
            ..options
        };
        let records = scan(&[dir.path().to_path_buf()], &options, &resolver).await.unwrap();
        assert_eq!(names(&records), vec!["x.txt", ".hidden.txt", "keep.txt"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn relative_root_with_colon_is_scanned() {
        // Lives under the working directory so the root stays relative.
        let dir = tempfile::Builder::new().prefix("backup:").tempdir_in(".").unwrap();
        fs::write(dir.path().join("a.txt"), "kept").unwrap();
        let root = PathBuf::from(dir.path().file_name().unwrap());
        assert!(root.is_relative());

        let records = scan(&[root], &ScanOptions::default(), &LocalResolver::default())
            .await
            .unwrap();
        assert_eq!(names(&records), vec!["a.txt"]);
        assert_eq!(records[0].size(), 4);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn non_utf8_names_are_scanned() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(dir.path().join(name), "latin-1").unwrap();

        let records = scan(
            &[dir.path().to_path_buf()],
            &ScanOptions::default(),
            &LocalResolver::default(),
        )
        .await
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_name(), "caf\u{FFFD}.txt");
        assert_eq!(records[0].mime_type(), Some("text/plain"));
        assert_eq!(records[0].size(), 7);
        assert!(records[0].uri().ends_with("/caf%E9.txt"));
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = scan(&[missing], &ScanOptions::default(), &LocalResolver::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn bad_glob_is_an_error() {
        let dir = tempdir().unwrap();
        let options = ScanOptions {
            exclude: vec!["[".to_string()],
            include_hidden: false,
        };
        assert!(scan(&[dir.path().to_path_buf()], &options, &LocalResolver::default())
            .await
            .is_err());
    }
}
