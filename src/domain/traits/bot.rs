use async_trait::async_trait;
use crate::domain::entities::{Image, Update};
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Connect to the platform and resolve the bot account
    async fn start(&mut self) -> Result<(), BotError>;

    /// Pull the next batch of inbound updates (may block until some arrive)
    async fn poll_updates(&mut self) -> Result<Vec<Update>, BotError>;

    /// Send a message to a chat
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError>;

    /// Send images to a chat, one attachment per image
    async fn send_photos(&self, chat_id: &str, images: &[Image]) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
