use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::debug;

use super::oauth::{self, Freshness, KeyPair};
use super::{AddBookmark, Bookmark, BookmarkService, ServiceError};
use crate::models::Folder;

pub const DEFAULT_API_URL: &str = "https://www.instapaper.com";

const USER_AGENT: &str = concat!("medium-to-instapaper/", env!("CARGO_PKG_VERSION"));

/// Objects in an API response array, discriminated by their `type` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ApiObject {
    Folder {
        folder_id: i64,
        title: String,
    },
    Bookmark {
        bookmark_id: i64,
        #[serde(default)]
        url: String,
        #[serde(default)]
        title: String,
    },
    Error {
        error_code: i64,
        message: String,
    },
    #[serde(other)]
    Other,
}

/// Blocking Instapaper client. Signs every request with the application's
/// consumer credentials and, once [`authenticate`](Self::authenticate) has
/// succeeded, the user's access token.
pub struct InstapaperClient {
    http: Client,
    base_url: String,
    consumer: KeyPair,
    token: Option<KeyPair>,
}

impl InstapaperClient {
    pub fn new(consumer: KeyPair, base_url: &str) -> Result<Self, ServiceError> {
        Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map(|http| Self::with_http(http, consumer, base_url))
            .map_err(|source| ServiceError::Transport {
                endpoint: base_url.to_string(),
                source,
            })
    }

    pub(crate) fn with_http(http: Client, consumer: KeyPair, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            consumer,
            token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Exchanges the user's credentials for an access token (xAuth).
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<(), ServiceError> {
        let endpoint = "oauth/access_token";
        let body = self.post(
            endpoint,
            &[
                ("x_auth_username", username),
                ("x_auth_password", password),
                ("x_auth_mode", "client_auth"),
            ],
        )?;
        self.token = Some(parse_access_token(endpoint, &body)?);
        debug!(username, "authenticated with instapaper");
        Ok(())
    }

    fn post(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, ServiceError> {
        let url = format!("{}/api/1/{endpoint}", self.base_url);
        let header = oauth::authorization_header(
            "POST",
            &url,
            params,
            &self.consumer,
            self.token.as_ref(),
            &Freshness::generate(),
        );

        debug!(endpoint, "calling instapaper");
        let transport = |source: reqwest::Error| ServiceError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, header)
            .form(params)
            .send()
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().map_err(transport)?;

        if !status.is_success() {
            if let Some(error) = find_error(&body) {
                return Err(error);
            }
            return Err(ServiceError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(body)
    }

    fn call(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<ApiObject>, ServiceError> {
        if self.token.is_none() {
            return Err(ServiceError::NotAuthenticated);
        }
        let body = self.post(endpoint, params)?;
        parse_objects(endpoint, &body)
    }
}

impl BookmarkService for InstapaperClient {
    fn list_folders(&self) -> Result<Vec<Folder>, ServiceError> {
        let objects = self.call("folders/list", &[])?;
        Ok(objects
            .into_iter()
            .filter_map(|object| match object {
                ApiObject::Folder { folder_id, title } => {
                    Some(Folder::new(folder_id.to_string(), title))
                }
                _ => None,
            })
            .collect())
    }

    fn create_folder(&self, title: &str) -> Result<Folder, ServiceError> {
        let endpoint = "folders/add";
        self.call(endpoint, &[("title", title)])?
            .into_iter()
            .find_map(|object| match object {
                ApiObject::Folder { folder_id, title } => {
                    Some(Folder::new(folder_id.to_string(), title))
                }
                _ => None,
            })
            .ok_or_else(|| missing(endpoint, "folder"))
    }

    fn add_bookmark(&self, request: &AddBookmark<'_>) -> Result<Bookmark, ServiceError> {
        let endpoint = "bookmarks/add";
        self.call(
            endpoint,
            &[
                ("url", request.url),
                ("title", request.title),
                ("description", request.description),
                ("folder_id", request.folder.id()),
            ],
        )?
        .into_iter()
        .find_map(|object| match object {
            ApiObject::Bookmark {
                bookmark_id,
                url,
                title,
            } => Some(Bookmark {
                id: bookmark_id,
                url,
                title,
            }),
            _ => None,
        })
        .ok_or_else(|| missing(endpoint, "bookmark"))
    }
}

fn missing(endpoint: &str, kind: &str) -> ServiceError {
    ServiceError::UnexpectedResponse {
        endpoint: endpoint.to_string(),
        detail: format!("no {kind} object in response"),
    }
}

fn parse_objects(endpoint: &str, body: &str) -> Result<Vec<ApiObject>, ServiceError> {
    let objects: Vec<ApiObject> =
        serde_json::from_str(body).map_err(|e| ServiceError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        })?;

    // Errors may arrive inside an otherwise successful response.
    for object in &objects {
        if let ApiObject::Error {
            error_code,
            message,
        } = object
        {
            return Err(ServiceError::Api {
                code: *error_code,
                message: message.clone(),
            });
        }
    }
    Ok(objects)
}

fn find_error(body: &str) -> Option<ServiceError> {
    let objects: Vec<ApiObject> = serde_json::from_str(body).ok()?;
    objects.into_iter().find_map(|object| match object {
        ApiObject::Error {
            error_code,
            message,
        } => Some(ServiceError::Api {
            code: error_code,
            message,
        }),
        _ => None,
    })
}

fn parse_access_token(endpoint: &str, body: &str) -> Result<KeyPair, ServiceError> {
    let mut key = None;
    let mut secret = None;
    for (name, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        match name.as_ref() {
            "oauth_token" => key = Some(value.into_owned()),
            "oauth_token_secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }

    match (key, secret) {
        (Some(key), Some(secret)) => Ok(KeyPair::new(key, secret)),
        _ => Err(ServiceError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            detail: "missing oauth_token or oauth_token_secret".to_string(),
        }),
    }
}
