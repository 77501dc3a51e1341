use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{MigrationReport, Outcome};

pub const SUCCEEDED_REPORT: &str = "succeed.csv";
pub const FAILED_REPORT: &str = "failed.csv";

const SUCCEEDED_HEADER: [&str; 2] = ["url", "title"];
const FAILED_HEADER: [&str; 3] = ["url", "title", "error_reason"];

/// Where the two reports of a run were written.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPaths {
    pub succeeded: PathBuf,
    pub failed: PathBuf,
}

/// Atomically write content to a file using a temporary file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let temp = path.with_extension("csv.tmp");
    let mut file = File::create(&temp)?;
    file.lock_exclusive()?;
    let written = file
        .write_all(content)
        .and_then(|()| file.sync_all())
        .and_then(|()| file.unlock());
    drop(file);

    if let Err(e) = written.and_then(|()| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }
    Ok(())
}

/// Writes the succeeded and failed tables into `dir`. Both always carry a
/// header row; each file is either fully written or left untouched.
pub fn flush(report: &MigrationReport, dir: &Path) -> Result<ReportPaths> {
    let paths = ReportPaths {
        succeeded: dir.join(SUCCEEDED_REPORT),
        failed: dir.join(FAILED_REPORT),
    };

    write_table(&paths.succeeded, &SUCCEEDED_HEADER, report.succeeded(), |o| {
        vec![o.article().url(), o.article().title()]
    })?;
    write_table(&paths.failed, &FAILED_HEADER, report.failed(), |o| {
        vec![
            o.article().url(),
            o.article().title(),
            o.reason().unwrap_or_default(),
        ]
    })?;

    info!(
        succeeded = %paths.succeeded.display(),
        failed = %paths.failed.display(),
        "wrote migration reports"
    );
    Ok(paths)
}

fn write_table<'a>(
    path: &Path,
    header: &[&str],
    outcomes: &'a [Outcome],
    row: impl Fn(&'a Outcome) -> Vec<&'a str>,
) -> Result<()> {
    let render = || -> io::Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(header)?;
        for outcome in outcomes {
            writer.write_record(row(outcome))?;
        }
        writer.into_inner().map_err(|e| e.into_error())
    };

    render()
        .and_then(|content| atomic_write(path, &content))
        .map_err(|source| Error::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
}
