//! Environment-backed configuration.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PRODUCTS_FILE: &str = "data/products.json";

/// Everything the bot needs from the environment, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    /// Telegram user ids allowed to use the admin commands.
    pub admin_ids: Vec<i64>,
    pub manager_username: String,
    /// When set, products live in Postgres; otherwise in the JSON file.
    pub database_url: Option<String>,
    pub products_file: PathBuf,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        let bot_token = env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?;

        let admin_ids = env::var("ADMIN_IDS")
            .context("ADMIN_IDS must be set (comma-separated Telegram user ids)")?
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<i64>()
                    .with_context(|| format!("invalid admin id '{}'", part.trim()))
            })
            .collect::<Result<Vec<i64>>>()?;

        let manager_username =
            env::var("MANAGER_USERNAME").unwrap_or_else(|_| "your_manager".to_string());

        let database_url = env::var("DATABASE_URL").ok();
        let products_file = env::var("PRODUCTS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PRODUCTS_FILE));

        let cloudinary_cloud_name =
            env::var("CLOUDINARY_CLOUD_NAME").context("CLOUDINARY_CLOUD_NAME must be set")?;
        let cloudinary_api_key =
            env::var("CLOUDINARY_API_KEY").context("CLOUDINARY_API_KEY must be set")?;
        let cloudinary_api_secret =
            env::var("CLOUDINARY_API_SECRET").context("CLOUDINARY_API_SECRET must be set")?;

        Ok(Config {
            bot_token,
            admin_ids,
            manager_username,
            database_url,
            products_file,
            cloudinary_cloud_name,
            cloudinary_api_key,
            cloudinary_api_secret,
        })
    }
}
