//! Callback Handler module: forwards inline keyboard presses to the engine.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

use super::engine::{AdminEngine, Event};

pub async fn callback_handler(
    bot: Bot,
    q: teloxide::types::CallbackQuery,
    engine: Arc<AdminEngine>,
) -> Result<()> {
    // Stop the client-side spinner whatever happens next.
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(message) = q.message.as_ref() else {
        debug!(user_id = %q.from.id, "Callback query without a message, ignoring");
        return Ok(());
    };
    let chat_id = message.chat().id.0;
    let sender_id = q.from.id.0 as i64;

    let Some(token) = q.data.clone() else {
        debug!(chat_id, "Callback query without data, ignoring");
        return Ok(());
    };

    debug!(chat_id, sender_id, token = %token, "Received callback query");
    engine
        .handle_event(chat_id, sender_id, Event::Selection(token))
        .await
}
