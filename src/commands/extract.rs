use std::path::PathBuf;

use anyhow::Result;

use crate::archive;
use crate::config::Settings;
use crate::models::ArticleRecord;

/// Lists what the archive would migrate. Needs no credentials.
pub fn run(archive_path: Option<PathBuf>) -> Result<Vec<ArticleRecord>> {
    let path = archive_path.unwrap_or_else(|| Settings::from_env().archive_path);
    Ok(archive::extract(&path)?)
}
