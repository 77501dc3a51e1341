#![allow(clippy::needless_pass_by_value)]

pub mod extract;
pub mod folders;
pub mod migrate;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::instapaper::InstapaperClient;

/// Builds a client for the configured API and signs the user in.
pub(crate) fn connect(config: &Config) -> Result<InstapaperClient> {
    let credentials = &config.credentials;
    let mut client = InstapaperClient::new(credentials.consumer(), &config.settings.api_url)
        .context("failed to build Instapaper client")?;
    client
        .authenticate(&credentials.username, &credentials.password)
        .context("failed to authenticate with Instapaper")?;
    info!(username = %credentials.username, "signed in to Instapaper");
    Ok(client)
}
