use anyhow::Result;
use jiff::Timestamp;
use serde::Serialize;
use tracing::info;

use crate::archive;
use crate::cli::MigrateArgs;
use crate::config::{Config, Settings};
use crate::folders::ensure_folder;
use crate::instapaper::BookmarkService;
use crate::ledger::{self, ReportPaths};
use crate::migrate::migrate;
use crate::models::{Folder, MigrationReport};

#[derive(Debug, Serialize)]
pub struct MigrationSummary {
    folder: Folder,
    folder_created: bool,
    started_at: Timestamp,
    finished_at: Timestamp,
    #[serde(flatten)]
    report: MigrationReport,
    reports: ReportPaths,
}

impl MigrationSummary {
    pub fn folder(&self) -> &Folder {
        &self.folder
    }

    pub fn folder_created(&self) -> bool {
        self.folder_created
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn finished_at(&self) -> Timestamp {
        self.finished_at
    }

    pub fn report(&self) -> &MigrationReport {
        &self.report
    }

    pub fn reports(&self) -> &ReportPaths {
        &self.reports
    }
}

pub fn run(args: MigrateArgs) -> Result<MigrationSummary> {
    let mut config = Config::from_env()?;
    apply_overrides(&mut config.settings, args);

    let client = super::connect(&config)?;
    execute(&client, &config.settings)
}

fn apply_overrides(settings: &mut Settings, args: MigrateArgs) {
    if let Some(archive) = args.archive {
        settings.archive_path = archive;
    }
    if let Some(folder) = args.folder {
        settings.folder_name = folder;
    }
    if let Some(out_dir) = args.out_dir {
        settings.report_dir = out_dir;
    }
}

/// Provisions the folder, extracts the archive, adds every article and
/// writes both reports. Item failures end up in the report; anything else
/// aborts the run.
pub fn execute(service: &dyn BookmarkService, settings: &Settings) -> Result<MigrationSummary> {
    let started_at = Timestamp::now();

    let ensured = ensure_folder(service, &settings.folder_name)?;
    let articles = archive::extract(&settings.archive_path)?;
    let report = migrate(service, &articles, &ensured.folder);
    let reports = ledger::flush(&report, &settings.report_dir)?;

    let finished_at = Timestamp::now();
    info!(
        folder = %settings.folder_name,
        succeeded = report.succeeded().len(),
        failed = report.failed().len(),
        elapsed = %finished_at.duration_since(started_at),
        "migration finished"
    );

    Ok(MigrationSummary {
        folder: ensured.folder,
        folder_created: ensured.created,
        started_at,
        finished_at,
        report,
        reports,
    })
}
