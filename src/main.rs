use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;

use shopbot::bot::{callback_handler, message_handler, AdminEngine, TelegramOutbox};
use shopbot::config::Config;
use shopbot::media::CloudinaryUploader;
use shopbot::session::SessionStore;
use shopbot::storage::{JsonProductStore, PgProductStore, ProductStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting shop admin bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    // Pick the persistence backend: Postgres when DATABASE_URL is set,
    // otherwise the flat JSON file.
    let store: Arc<dyn ProductStore> = match &config.database_url {
        Some(url) => {
            info!("Using Postgres product store");
            Arc::new(PgProductStore::connect(url).await?)
        }
        None => {
            info!(path = %config.products_file.display(), "Using JSON file product store");
            Arc::new(JsonProductStore::new(config.products_file.clone()))
        }
    };

    let uploader = Arc::new(CloudinaryUploader::new(
        config.cloudinary_cloud_name.clone(),
        config.cloudinary_api_key.clone(),
        config.cloudinary_api_secret.clone(),
    ));

    let bot = Bot::new(&config.bot_token);
    let outbox = Arc::new(TelegramOutbox::new(bot.clone()));

    let engine = Arc::new(AdminEngine::new(
        SessionStore::new(),
        store,
        uploader,
        outbox,
        config.admin_ids.clone(),
        config.manager_username.clone(),
    ));

    info!(admins = config.admin_ids.len(), "Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let engine = Arc::clone(&engine);
            move |bot: Bot, msg: Message| {
                let engine = Arc::clone(&engine);
                async move { message_handler(bot, msg, engine).await }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let engine = Arc::clone(&engine);
            move |bot: Bot, q: teloxide::types::CallbackQuery| {
                let engine = Arc::clone(&engine);
                async move { callback_handler(bot, q, engine).await }
            }
        }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
