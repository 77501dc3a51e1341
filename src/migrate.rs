use tracing::{debug, info};

use crate::instapaper::{AddBookmark, BookmarkService};
use crate::models::{ArticleRecord, Folder, MigrationReport, Outcome};

/// Attached to every migrated bookmark so it can be traced back to this tool.
pub const PROVENANCE: &str = "Added by medium-to-instapaper";

/// Saves each article into `destination`, one request at a time, in input
/// order. A rejected article is recorded with the service's message and the
/// batch moves on; this never fails as a whole.
pub fn migrate(
    service: &dyn BookmarkService,
    articles: &[ArticleRecord],
    destination: &Folder,
) -> MigrationReport {
    let mut report = MigrationReport::default();
    let total = articles.len();

    for (index, article) in articles.iter().enumerate() {
        info!(
            "adding article {}/{total}: {} ({})",
            index + 1,
            article.title(),
            article.url()
        );

        let request = AddBookmark {
            url: article.url(),
            title: article.title(),
            folder: destination,
            description: PROVENANCE,
        };

        let outcome = match service.add_bookmark(&request) {
            Ok(_) => Outcome::Succeeded {
                article: article.clone(),
            },
            Err(e) => Outcome::Failed {
                article: article.clone(),
                reason: e.to_string(),
            },
        };
        let status: &str = outcome.as_ref();
        debug!(status, url = article.url(), "recorded outcome");
        report.record(outcome);
    }

    info!(
        succeeded = report.succeeded().len(),
        failed = report.failed().len(),
        "finished adding articles"
    );
    report
}
