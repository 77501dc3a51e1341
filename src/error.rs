use std::path::PathBuf;

use thiserror::Error;

use crate::instapaper::ServiceError;

/// Failures that abort a migration run.
///
/// Per-article failures never show up here; they are recorded in the
/// [`MigrationReport`](crate::models::MigrationReport) instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open archive {}: {source}", path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to read archive entry {name}: {source}")]
    ArchiveEntry {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list folders: {0}")]
    FolderLookup(#[source] ServiceError),

    #[error("failed to create folder {title:?}: {source}")]
    FolderCreate {
        title: String,
        #[source]
        source: ServiceError,
    },

    #[error("failed to write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
