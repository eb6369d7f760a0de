//! Outbound chat port and its Telegram implementation.
//!
//! The engine talks to the chat through [`ChatOutbox`] only, so tests can
//! swap in a recorder and run the wizards without a live transport.

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, InputFile};
use url::Url;

#[async_trait]
pub trait ChatOutbox: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;

    async fn send_text_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<()>;

    async fn send_photo_card(
        &self,
        chat_id: i64,
        photo_url: &str,
        caption: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()>;
}

/// Production outbox over the Telegram Bot API.
pub struct TelegramOutbox {
    bot: Bot,
}

impl TelegramOutbox {
    pub fn new(bot: Bot) -> Self {
        TelegramOutbox { bot }
    }
}

#[async_trait]
impl ChatOutbox for TelegramOutbox {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot.send_message(ChatId(chat_id), text).await?;
        Ok(())
    }

    async fn send_text_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: InlineKeyboardMarkup,
    ) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_markup(keyboard)
            .await?;
        Ok(())
    }

    async fn send_photo_card(
        &self,
        chat_id: i64,
        photo_url: &str,
        caption: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        let url = Url::parse(photo_url)?;
        let request = self
            .bot
            .send_photo(ChatId(chat_id), InputFile::url(url))
            .caption(caption.to_string());

        match keyboard {
            Some(keyboard) => {
                request.reply_markup(keyboard).await?;
            }
            None => {
                request.await?;
            }
        }
        Ok(())
    }
}
