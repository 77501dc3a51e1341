use anyhow::Result;
use console::{Term, style};
use serde::Serialize;

use crate::commands::migrate::MigrationSummary;
use crate::models::{ArticleRecord, Folder, Outcome};

pub struct Output {
    term: Term,
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self {
            term: Term::stdout(),
            json,
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let output = serde_json::to_string_pretty(value)?;
        self.term.write_line(&output)?;
        Ok(())
    }

    pub fn articles(&self, articles: &[ArticleRecord]) -> Result<()> {
        if self.json {
            return self.print_json(articles);
        }

        if articles.is_empty() {
            self.term.write_line("No saved articles found.")?;
            return Ok(());
        }

        for article in articles {
            self.term
                .write_line(&style(article.title()).cyan().bold().to_string())?;
            self.term.write_line(&format!("  {}", article.url()))?;
        }
        self.term.write_line("")?;
        self.term.write_line(&format!(
            "{} article(s) found",
            style(articles.len()).green().bold()
        ))?;
        Ok(())
    }

    pub fn folders(&self, folders: &[Folder]) -> Result<()> {
        if self.json {
            return self.print_json(folders);
        }

        if folders.is_empty() {
            self.term.write_line("No folders found.")?;
            return Ok(());
        }

        for folder in folders {
            self.term.write_line(&format!(
                "{} [{}]",
                style(folder.title()).cyan().bold(),
                style(folder.id()).dim()
            ))?;
        }
        Ok(())
    }

    pub fn migration_summary(&self, summary: &MigrationSummary) -> Result<()> {
        if self.json {
            return self.print_json(summary);
        }

        let folder = summary.folder();
        let verb = if summary.folder_created() {
            "Created folder:"
        } else {
            "Using folder:"
        };
        self.term.write_line(&format!(
            "{} {} [{}]",
            style(verb).green(),
            style(folder.title()).cyan().bold(),
            style(folder.id()).dim()
        ))?;

        let report = summary.report();
        self.term.write_line(&format!(
            "  Added: {}",
            style(report.succeeded().len()).green().bold()
        ))?;
        self.term.write_line(&format!(
            "  Failed: {}",
            style(report.failed().len()).red().bold()
        ))?;

        if !report.failed().is_empty() {
            self.term.write_line("")?;
            self.term.write_line(&style("Failures:").bold().to_string())?;
            for outcome in report.failed() {
                self.print_failure(outcome)?;
            }
        }

        let reports = summary.reports();
        self.term.write_line("")?;
        self.term
            .write_line(&format!("Report: {}", reports.succeeded.display()))?;
        self.term
            .write_line(&format!("Report: {}", reports.failed.display()))?;
        Ok(())
    }

    fn print_failure(&self, outcome: &Outcome) -> Result<()> {
        let article = outcome.article();
        self.term.write_line(&format!(
            "  {} - {}",
            style(article.title()).cyan(),
            style(outcome.reason().unwrap_or_default()).red()
        ))?;
        self.term.write_line(&format!("    {}", article.url()))?;
        Ok(())
    }
}
