use anyhow::Result;

use crate::config::Config;
use crate::instapaper::BookmarkService;
use crate::models::Folder;

pub fn run() -> Result<Vec<Folder>> {
    let config = Config::from_env()?;
    let client = super::connect(&config)?;
    Ok(client.list_folders()?)
}
