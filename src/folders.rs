use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::helpers::find_similar_title;
use crate::instapaper::BookmarkService;
use crate::models::Folder;

/// The destination folder after provisioning.
#[derive(Debug, Clone, Serialize)]
pub struct EnsuredFolder {
    pub folder: Folder,
    /// Whether this call created the folder.
    pub created: bool,
}

/// Makes sure a folder titled exactly `title` exists, creating it if not.
///
/// Lookup and creation are two separate calls, so a concurrent writer on the
/// same account could still produce a duplicate.
pub fn ensure_folder(service: &dyn BookmarkService, title: &str) -> Result<EnsuredFolder> {
    let folders = service.list_folders().map_err(Error::FolderLookup)?;

    if let Some(existing) = folders.iter().find(|f| f.title() == title) {
        info!(folder = title, id = existing.id(), "destination folder already exists");
        return Ok(EnsuredFolder {
            folder: existing.clone(),
            created: false,
        });
    }

    let titles: Vec<&str> = folders.iter().map(Folder::title).collect();
    if let Some(similar) = find_similar_title(title, &titles) {
        warn!(
            folder = title,
            similar, "no folder with this exact title; creating a new one"
        );
    }

    let folder = service
        .create_folder(title)
        .map_err(|source| Error::FolderCreate {
            title: title.to_string(),
            source,
        })?;
    info!(folder = title, id = folder.id(), "created destination folder");

    Ok(EnsuredFolder {
        folder,
        created: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instapaper::testing::FakeService;

    #[test]
    fn creates_missing_folder() {
        let service = FakeService::with_folders(&["Reading"]);
        let ensured = ensure_folder(&service, "Medium").unwrap();

        assert!(ensured.created);
        assert_eq!(ensured.folder.title(), "Medium");
        assert_eq!(service.folder_titles(), vec!["Reading", "Medium"]);
    }

    #[test]
    fn reuses_existing_folder() {
        let service = FakeService::with_folders(&["Reading", "Medium"]);
        let ensured = ensure_folder(&service, "Medium").unwrap();

        assert!(!ensured.created);
        assert_eq!(ensured.folder.id(), "2");
        assert_eq!(service.create_calls.get(), 0);
    }

    // Running twice against the same account leaves exactly one folder.
    #[test]
    fn is_idempotent() {
        let service = FakeService::default();
        let first = ensure_folder(&service, "Medium").unwrap();
        let second = ensure_folder(&service, "Medium").unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.folder, second.folder);
        assert_eq!(service.folder_titles(), vec!["Medium"]);
        assert_eq!(service.create_calls.get(), 1);
    }

    // Identity is exact title equality; a case variant is a different folder.
    #[test]
    fn title_match_is_case_sensitive() {
        let service = FakeService::with_folders(&["medium"]);
        let ensured = ensure_folder(&service, "Medium").unwrap();

        assert!(ensured.created);
        assert_eq!(service.folder_titles(), vec!["medium", "Medium"]);
    }

    #[test]
    fn lookup_failure_is_surfaced() {
        let service = FakeService::failing_lookup("rate limited");
        let err = ensure_folder(&service, "Medium").unwrap_err();

        assert!(matches!(err, Error::FolderLookup(_)));
        assert!(err.to_string().contains("rate limited"));
        assert_eq!(service.create_calls.get(), 0);
    }

    #[test]
    fn create_failure_is_surfaced() {
        let service = FakeService::failing_create("folder limit reached");
        let err = ensure_folder(&service, "Medium").unwrap_err();

        assert!(matches!(err, Error::FolderCreate { ref title, .. } if title == "Medium"));
        assert!(err.to_string().contains("folder limit reached"));
    }
}
