//! Core library: file records, content resolution, MIME detection, scanning.

pub mod config;
pub mod error;
pub mod mime;
pub mod models;
pub mod resolver;
pub mod scanner;
pub mod uri;

pub use error::ResolveError;
pub use models::FileRecord;
pub use resolver::{ContentResolver, LocalResolver};
