mod article;
mod folder;
mod outcome;

pub use article::ArticleRecord;
pub use folder::Folder;
pub use outcome::{MigrationReport, Outcome};
