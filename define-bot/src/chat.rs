//! # Chat
//!
//! Outbound side of the messaging platform. Handlers only see [`ChatSink`], the Telegram
//! implementation lives in [`TelegramChat`].

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode, ReplyParameters};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Where the replies to one inbound message go.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Send a message to the chat.
    async fn send(&self, text: &str) -> Result<(), ChatError>;

    /// Send a message quoting the inbound one.
    async fn reply(&self, text: &str) -> Result<(), ChatError>;
}

pub struct TelegramChat {
    bot: Bot,
    chat_id: ChatId,
    message_id: MessageId,
}

impl TelegramChat {
    pub fn new(bot: Bot, message: &Message) -> Self {
        Self {
            bot,
            chat_id: message.chat.id,
            message_id: message.id,
        }
    }
}

#[async_trait]
impl ChatSink for TelegramChat {
    async fn send(&self, text: &str) -> Result<(), ChatError> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }

    async fn reply(&self, text: &str) -> Result<(), ChatError> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html)
            .reply_parameters(ReplyParameters::new(self.message_id))
            .await?;
        Ok(())
    }
}
