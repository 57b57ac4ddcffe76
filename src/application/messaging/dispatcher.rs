//! Message dispatcher - Routes parsed commands to the image library and back to the chat

use std::sync::Arc;
use crate::domain::entities::{Category, Command, Image};
use crate::domain::traits::{Bot, ImageLibrary};
use crate::application::errors::BotError;
use super::parser::CommandParser;
use super::replies;

/// The single reply produced for one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Images(Vec<Image>),
}

/// Message dispatcher - binds commands to the library and the outbound channel
pub struct Dispatcher {
    parser: CommandParser,
    library: Arc<dyn ImageLibrary>,
}

impl Dispatcher {
    pub fn new(library: Arc<dyn ImageLibrary>) -> Self {
        Self {
            parser: CommandParser::new(),
            library,
        }
    }

    /// Parse `text` against the categories on disk and build the reply
    pub async fn reply_to(&self, text: &str) -> Result<Reply, BotError> {
        let result = match self.library.categories().await {
            Ok(categories) => {
                let command = self.parser.parse(text, &categories);
                tracing::debug!("Parsed {:?} as {:?}", text, command);
                self.reply_for(&command, &categories).await
            }
            Err(e) => Err(e.into()),
        };

        match result {
            Err(BotError::Library(e)) => {
                tracing::error!("Image library failed: {}", e);
                Ok(Reply::Text(replies::UNAVAILABLE.to_string()))
            }
            other => other,
        }
    }

    /// Build the reply for an already parsed command
    pub async fn reply_for(&self, command: &Command, categories: &[Category]) -> Result<Reply, BotError> {
        match command {
            Command::Info => Ok(Reply::Text(replies::info(categories))),
            Command::Invalid(reason) => {
                tracing::debug!("Rejected message: {}", reason.as_str());
                Ok(Reply::Text(replies::rejection(*reason)))
            }
            Command::CategoryQuantity { category, quantity } => {
                self.images(category, *quantity).await
            }
            Command::CategorySingle(category) => self.images(category, 1).await,
        }
    }

    async fn images(&self, category: &Category, quantity: u32) -> Result<Reply, BotError> {
        if quantity == 0 {
            return Ok(Reply::Text(replies::NOTHING_REQUESTED.to_string()));
        }
        let images = self.library.pick(category, quantity).await?;
        if images.is_empty() {
            return Ok(Reply::Text(replies::EMPTY_CATEGORY.to_string()));
        }
        tracing::info!("Picked {} of {} requested from {}", images.len(), quantity, category);
        Ok(Reply::Images(images))
    }

    /// Handle one message: build the reply and send it to `chat_id`
    pub async fn handle(&self, bot: &dyn Bot, chat_id: &str, text: &str) -> Result<(), BotError> {
        match self.reply_to(text).await? {
            Reply::Text(response) => {
                tracing::info!(
                    "Sending response to chat_id {}: {}",
                    chat_id,
                    response.chars().take(100).collect::<String>()
                );
                bot.send_message(chat_id, &response).await?;
            }
            Reply::Images(images) => {
                tracing::info!("Sending {} images to chat_id {}", images.len(), chat_id);
                bot.send_photos(chat_id, &images).await?;
            }
        }
        Ok(())
    }
}
