//! Content resolution: turning a URI into a [`FileRecord`].

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::models::FileRecord;
use crate::{mime, uri};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::debug;

#[async_trait::async_trait]
pub trait ContentResolver: Send + Sync {
    async fn resolve(&self, uri: &str) -> Result<FileRecord, ResolveError>;
}

/// Resolves `file:` URIs and bare paths against the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalResolver {
    config: ResolverConfig,
}

impl LocalResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl ContentResolver for LocalResolver {
    async fn resolve(&self, input: &str) -> Result<FileRecord, ResolveError> {
        let target = match uri::to_local_path(input) {
            Ok(path) if uri::scheme(input).is_some() => Target::Uri(input.to_string(), path),
            Ok(path) => Target::Path(path),
            // `notes:v2.txt` parses as a URI but may still name a local file
            Err(ResolveError::UnsupportedScheme(scheme)) => {
                Target::SchemeLike(PathBuf::from(input), scheme)
            }
            Err(err) => return Err(err),
        };
        let sniff_content = self.config.sniff_content;

        let record = task::spawn_blocking(move || read_target(target, sniff_content))
            .await
            .map_err(|e| ResolveError::Join(e.to_string()))??;

        debug!(uri = record.uri(), size = record.size(), "resolved");
        Ok(record)
    }
}

enum Target {
    /// A `file:` URI, kept verbatim in the record.
    Uri(String, PathBuf),
    /// A bare path, recorded under its canonical `file://` URI.
    Path(PathBuf),
    /// Input with a foreign scheme that is only resolved if it exists as a relative path.
    SchemeLike(PathBuf, String),
}

fn read_target(target: Target, sniff_content: bool) -> Result<FileRecord, ResolveError> {
    match target {
        Target::Uri(uri, path) => read_record(uri, &path, sniff_content),
        Target::Path(path) => read_canonical(&path, sniff_content),
        Target::SchemeLike(path, scheme) => {
            if path.exists() {
                read_canonical(&path, sniff_content)
            } else {
                Err(ResolveError::UnsupportedScheme(scheme))
            }
        }
    }
}

fn read_canonical(path: &Path, sniff_content: bool) -> Result<FileRecord, ResolveError> {
    let canonical = fs::canonicalize(path).map_err(|e| ResolveError::io(path.to_path_buf(), e))?;
    let uri = uri::from_local_path(&canonical)?;
    read_record(uri, &canonical, sniff_content)
}

/// Resolves each input in order, one result per input.
pub async fn resolve_many<R, S>(resolver: &R, uris: &[S]) -> Vec<Result<FileRecord, ResolveError>>
where
    R: ContentResolver + ?Sized,
    S: AsRef<str>,
{
    let mut results = Vec::with_capacity(uris.len());
    for u in uris {
        results.push(resolver.resolve(u.as_ref()).await);
    }
    results
}

fn read_record(uri: String, path: &Path, sniff_content: bool) -> Result<FileRecord, ResolveError> {
    let meta = fs::metadata(path).map_err(|e| ResolveError::io(path.to_path_buf(), e))?;
    if !meta.is_file() {
        return Err(ResolveError::NotAFile(path.to_path_buf()));
    }
    let display_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = mime::detect(path, sniff_content);
    Ok(FileRecord::new(uri, display_name, mime_type, meta.len() as i64))
}
