//! Message Handler module: maps incoming Telegram messages to engine events.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, error};

use super::engine::{AdminEngine, Event};

/// Splits a leading-slash message into a command event; anything else is
/// plain text. A `@botname` suffix on the command is stripped so commands
/// keep working in group chats.
pub fn parse_text_event(text: &str) -> Event {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Event::Text(trimmed.to_string());
    };

    let mut parts = rest.split_whitespace();
    let raw_name = parts.next().unwrap_or_default();
    let name = raw_name
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string();
    let args = parts.map(|s| s.to_string()).collect();

    Event::Command { name, args }
}

/// Builds the public download URL for a Telegram file, the form the media
/// upload port expects as its source reference.
async fn resolve_photo_source(bot: &Bot, file_id: teloxide::types::FileId) -> Result<String> {
    let file = bot.get_file(file_id).await?;
    Ok(format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    ))
}

pub async fn message_handler(bot: Bot, msg: Message, engine: Arc<AdminEngine>) -> Result<()> {
    let chat_id = msg.chat.id.0;
    let Some(user) = msg.from.as_ref() else {
        // Channel posts and service messages carry no sender; nothing to do.
        return Ok(());
    };
    let sender_id = user.id.0 as i64;

    if let Some(text) = msg.text() {
        debug!(chat_id, sender_id, "Received text message");
        return engine
            .handle_event(chat_id, sender_id, parse_text_event(text))
            .await;
    }

    if let Some(photos) = msg.photo() {
        if let Some(largest) = photos.last() {
            debug!(chat_id, sender_id, "Received photo message");
            match resolve_photo_source(&bot, largest.file.id.clone()).await {
                Ok(source) => {
                    return engine
                        .handle_event(chat_id, sender_id, Event::Photo { source })
                        .await;
                }
                Err(e) => {
                    error!(chat_id, error = %e, "Failed to resolve Telegram file URL");
                    bot.send_message(msg.chat.id, "❌ Could not fetch that photo, send it again")
                        .await?;
                    return Ok(());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_args() {
        assert_eq!(
            parse_text_event("/edit_product 12345"),
            Event::Command {
                name: "edit_product".to_string(),
                args: vec!["12345".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_command_strips_bot_name() {
        assert_eq!(
            parse_text_event("/add_product@shop_admin_bot"),
            Event::Command {
                name: "add_product".to_string(),
                args: vec![],
            }
        );
    }

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(
            parse_text_event("Blue Jacket"),
            Event::Text("Blue Jacket".to_string())
        );
    }
}
