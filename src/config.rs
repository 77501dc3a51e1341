use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::instapaper::DEFAULT_API_URL;
use crate::instapaper::oauth::KeyPair;

pub const DEFAULT_FOLDER: &str = "Medium";
pub const DEFAULT_ARCHIVE: &str = "Medium";

/// Non-secret settings for a run. CLI flags may override these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub folder_name: String,
    pub archive_path: PathBuf,
    pub report_dir: PathBuf,
    pub api_url: String,
}

impl Settings {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            folder_name: var("INSTAPAPER_MEDIUM_FOLDER").unwrap_or_else(|| DEFAULT_FOLDER.into()),
            archive_path: var("MEDIUM_ZIP_NAME")
                .unwrap_or_else(|| DEFAULT_ARCHIVE.into())
                .into(),
            report_dir: var("M2I_REPORT_DIR").unwrap_or_else(|| ".".into()).into(),
            api_url: var("INSTAPAPER_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
        }
    }

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }
}

/// Application and user credentials for the Instapaper API.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    /// Instapaper accounts may have no password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| var(key).with_context(|| format!("{key} must be set"));

        Ok(Self {
            client_id: required("INSTAPAPER_CLIENT_ID")?,
            client_secret: required("INSTAPAPER_CLIENT_SECRET")?,
            username: required("INSTAPAPER_USERNAME")?,
            password: var("INSTAPAPER_PASSWORD").unwrap_or_default(),
        })
    }

    pub fn consumer(&self) -> KeyPair {
        KeyPair::new(&self.client_id, &self.client_secret)
    }
}

/// Everything a migration run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub credentials: Credentials,
}

impl Config {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            credentials: Credentials::from_lookup(&lookup)?,
            settings: Settings::from_lookup(&lookup),
        })
    }

    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }
}
