use serde::Serialize;
use strum::AsRefStr;

use super::ArticleRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(tag = "status", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Succeeded { article: ArticleRecord },
    Failed { article: ArticleRecord, reason: String },
}

impl Outcome {
    pub fn article(&self) -> &ArticleRecord {
        match self {
            Outcome::Succeeded { article } | Outcome::Failed { article, .. } => article,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Succeeded { .. } => None,
            Outcome::Failed { reason, .. } => Some(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded { .. })
    }
}

/// Per-item results of one migration run, split by kind.
///
/// Both lists keep the order in which items were processed. Only the
/// migration executor appends to a report; once it is handed back to the
/// caller it is read-only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    succeeded: Vec<Outcome>,
    failed: Vec<Outcome>,
}

impl MigrationReport {
    pub(crate) fn record(&mut self, outcome: Outcome) {
        if outcome.is_success() {
            self.succeeded.push(outcome);
        } else {
            self.failed.push(outcome);
        }
    }

    pub fn succeeded(&self) -> &[Outcome] {
        &self.succeeded
    }

    pub fn failed(&self) -> &[Outcome] {
        &self.failed
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}
