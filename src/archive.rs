use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use scraper::{Html, Selector};
use tracing::{debug, info};
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::models::ArticleRecord;

/// Entries whose name starts with this prefix hold the saved bookmarks.
/// Large exports split the listing across several such files.
pub const BOOKMARKS_ENTRY_PREFIX: &str = "bookmarks";

/// Reads every bookmark-listing document in the export archive at `path`
/// and returns the articles in the order they appear.
pub fn extract(path: &Path) -> Result<Vec<ArticleRecord>> {
    let file = File::open(path).map_err(|e| Error::ArchiveOpen {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|source| Error::ArchiveOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut articles = Vec::new();
    let mut documents = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|source| Error::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;

        if !entry.name().starts_with(BOOKMARKS_ENTRY_PREFIX) {
            continue;
        }

        let name = entry.name().to_string();
        // Declared sizes are untrusted: never preallocate from them.
        let declared = entry.size();
        let mut content = Vec::new();
        entry
            .read_to_end(&mut content)
            .map_err(|source| Error::ArchiveEntry {
                name: name.clone(),
                source,
            })?;
        if content.len() as u64 != declared {
            return Err(Error::ArchiveEntry {
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("read {} bytes, archive declares {declared}", content.len()),
                ),
                name,
            });
        }

        let found = extract_articles(&String::from_utf8_lossy(&content));
        debug!(entry = %name, articles = found.len(), "parsed bookmark listing");
        documents += 1;
        articles.extend(found);
    }

    info!(
        archive = %path.display(),
        documents,
        articles = articles.len(),
        "extracted saved articles"
    );
    Ok(articles)
}

/// Pulls every anchor nested in a `ul` list out of a bookmark-listing
/// document. Malformed markup is repaired by the parser rather than
/// rejected, so this never fails.
pub fn extract_articles(html: &str) -> Vec<ArticleRecord> {
    let document = Html::parse_document(html);
    let (Ok(lists), Ok(anchors)) = (Selector::parse("ul"), Selector::parse("a")) else {
        return Vec::new();
    };

    document
        .select(&lists)
        .flat_map(|list| list.select(&anchors))
        .map(|anchor| {
            let title = anchor.text().collect::<String>();
            let url = anchor.value().attr("href").unwrap_or_default();
            ArticleRecord::new(title.trim(), url)
        })
        .collect()
}
