//! The remote bookmarking service: Instapaper's Full API.

mod client;
pub mod oauth;

pub use client::{DEFAULT_API_URL, InstapaperClient};

use serde::Serialize;
use thiserror::Error;

use crate::models::Folder;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// An `error` object returned by the API. Displays as the remote message
    /// alone so it can be recorded verbatim as a failure reason.
    #[error("{message}")]
    Api { code: i64, message: String },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response from {endpoint}: {detail}")]
    UnexpectedResponse { endpoint: String, detail: String },

    #[error("client is not authenticated")]
    NotAuthenticated,
}

/// The fields sent when saving one article.
#[derive(Debug, Clone, Copy)]
pub struct AddBookmark<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub folder: &'a Folder,
    pub description: &'a str,
}

/// The service's acknowledgement of a saved bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    pub id: i64,
    pub url: String,
    pub title: String,
}

/// Operations the migration needs from the remote service. Each call blocks
/// until the service answers.
pub trait BookmarkService {
    fn list_folders(&self) -> Result<Vec<Folder>, ServiceError>;

    fn create_folder(&self, title: &str) -> Result<Folder, ServiceError>;

    fn add_bookmark(&self, request: &AddBookmark<'_>) -> Result<Bookmark, ServiceError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::*;

    /// A bookmark request as the fake service received it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentBookmark {
        pub url: String,
        pub title: String,
        pub folder_id: String,
        pub description: String,
    }

    /// In-memory stand-in for the remote service.
    #[derive(Default)]
    pub struct FakeService {
        folders: RefCell<Vec<Folder>>,
        next_id: Cell<i64>,
        pub sent: RefCell<Vec<SentBookmark>>,
        pub create_calls: Cell<usize>,
        /// Titles whose add call is rejected, with the message to reject with.
        pub rejections: HashMap<String, String>,
        fail_listing: Option<String>,
        fail_creating: Option<String>,
    }

    impl FakeService {
        pub fn with_folders(titles: &[&str]) -> Self {
            let service = Self::default();
            for title in titles {
                service.insert_folder(title);
            }
            service
        }

        pub fn reject(mut self, title: &str, message: &str) -> Self {
            self.rejections
                .insert(title.to_string(), message.to_string());
            self
        }

        pub fn failing_lookup(message: &str) -> Self {
            Self {
                fail_listing: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn failing_create(message: &str) -> Self {
            Self {
                fail_creating: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn folder_titles(&self) -> Vec<String> {
            self.folders
                .borrow()
                .iter()
                .map(|f| f.title().to_string())
                .collect()
        }

        fn insert_folder(&self, title: &str) -> Folder {
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            let folder = Folder::new(id.to_string(), title);
            self.folders.borrow_mut().push(folder.clone());
            folder
        }
    }

    impl BookmarkService for FakeService {
        fn list_folders(&self) -> Result<Vec<Folder>, ServiceError> {
            if let Some(message) = &self.fail_listing {
                return Err(ServiceError::Api {
                    code: 500,
                    message: message.clone(),
                });
            }
            Ok(self.folders.borrow().clone())
        }

        fn create_folder(&self, title: &str) -> Result<Folder, ServiceError> {
            self.create_calls.set(self.create_calls.get() + 1);
            if let Some(message) = &self.fail_creating {
                return Err(ServiceError::Api {
                    code: 1251,
                    message: message.clone(),
                });
            }
            Ok(self.insert_folder(title))
        }

        fn add_bookmark(&self, request: &AddBookmark<'_>) -> Result<Bookmark, ServiceError> {
            self.sent.borrow_mut().push(SentBookmark {
                url: request.url.to_string(),
                title: request.title.to_string(),
                folder_id: request.folder.id().to_string(),
                description: request.description.to_string(),
            });

            if let Some(message) = self.rejections.get(request.title) {
                return Err(ServiceError::Api {
                    code: 1240,
                    message: message.clone(),
                });
            }

            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            Ok(Bookmark {
                id,
                url: request.url.to_string(),
                title: request.title.to_string(),
            })
        }
    }
}
