//! Telegram adapter

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::entities::{self, Image, UpdateKind};
use crate::domain::traits::{Bot, BotInfo};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub edited_message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
    offset: i64,
    poll_timeout: u64,
    attachment_name: String,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "picbot".to_string(),
                username: "picbot".to_string(),
            },
            offset: 0,
            poll_timeout: 30,
            attachment_name: "picture.jpg".to_string(),
        }
    }

    pub fn with_poll_timeout(mut self, seconds: u64) -> Self {
        self.poll_timeout = seconds;
        self
    }

    pub fn with_attachment_name(mut self, name: impl Into<String>) -> Self {
        self.attachment_name = name.into();
        self
    }

    /// First characters of the token, safe to log
    fn token_preview(&self) -> String {
        self.token.chars().take(8).collect()
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    /// Check the HTTP status and unwrap the Bot API envelope
    async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BotError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND {
            // Telegram answers 404 for a malformed token and 401 for a revoked one
            return Err(BotError::Auth(format!("Telegram API rejected token: {}", status)));
        }

        let data: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        if !status.is_success() || !data.ok {
            let description = data.description.unwrap_or_else(|| status.to_string());
            return Err(BotError::Network(format!("Telegram API error: {}", description)));
        }

        data.result
            .ok_or_else(|| BotError::Parse("Telegram API response without result".to_string()))
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        let url = self.api_url("getMe");
        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let me: User = Self::read_response(response).await?;

        self.info = BotInfo {
            id: me.id.to_string(),
            name: me.first_name.unwrap_or_default(),
            username: me.username.unwrap_or_default(),
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<String>,
        }

        let url = self.api_url("getUpdates");
        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string(), "edited_message".to_string()],
        };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        Self::read_response(response).await
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update]) -> Option<i64> {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
    }

    /// Convert a Bot API update into the domain update
    pub fn to_domain(&self, update: Update) -> entities::Update {
        let (kind, message) = match (update.message, update.edited_message) {
            (Some(message), _) => (UpdateKind::NewMessage, Some(message)),
            (None, Some(message)) => (UpdateKind::EditedMessage, Some(message)),
            (None, None) => (UpdateKind::Other("unsupported".to_string()), None),
        };

        let Some(message) = message else {
            return entities::Update::new(update.update_id, kind, "");
        };

        let mut domain = entities::Update::new(update.update_id, kind, message.chat.id.to_string());
        if let Some(text) = message.text {
            domain = domain.with_text(text);
        }
        if let Some(from) = message.from {
            let mut user = entities::User::new(from.id.to_string());
            if let Some(username) = from.username {
                user = user.with_username(username);
            }
            if let Some(first) = from.first_name {
                user = user.with_first_name(first);
            }
            domain = domain.with_sender(user);
        }
        domain
    }

    /// Send a plain text message
    pub async fn send_message_api(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            text: &'a str,
        }

        let url = self.api_url("sendMessage");
        let request = SendMessageRequest { chat_id, text };

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let sent: Message = Self::read_response(response).await?;
        Ok(sent.message_id.to_string())
    }

    /// Upload one image with sendPhoto
    pub async fn send_photo_api(&self, chat_id: &str, image: &Image) -> Result<String, BotError> {
        let part = Part::bytes(image.bytes.clone()).file_name(self.attachment_name.clone());
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", part);

        let url = self.api_url("sendPhoto");
        let response = self.client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let sent: Message = Self::read_response(response).await?;
        Ok(sent.message_id.to_string())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&mut self) -> Result<(), BotError> {
        tracing::info!("Starting Telegram bot (token: {}...)", self.token_preview());
        self.fetch_bot_info().await?;
        tracing::info!("Bot started: @{}", self.info.username);
        Ok(())
    }

    async fn poll_updates(&mut self) -> Result<Vec<entities::Update>, BotError> {
        let updates = self.get_updates(self.offset, self.poll_timeout).await?;
        if let Some(next) = Self::get_next_offset(&updates) {
            self.offset = next;
        }
        Ok(updates.into_iter().map(|u| self.to_domain(u)).collect())
    }

    async fn send_message(&self, chat_id: &str, text: &str) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, text);
        self.send_message_api(chat_id, text).await
    }

    async fn send_photos(&self, chat_id: &str, images: &[Image]) -> Result<(), BotError> {
        let mut last_error = None;
        let mut sent = 0;

        for image in images {
            match self.send_photo_api(chat_id, image).await {
                Ok(_) => sent += 1,
                Err(e) => {
                    tracing::error!("Failed to send {} to {}: {}", image.file_name, chat_id, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if sent == 0 => Err(e),
            _ => Ok(()),
        }
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPDATES: &str = r#"{
        "ok": true,
        "result": [
            {
                "update_id": 100,
                "message": {
                    "message_id": 1,
                    "from": {"id": 42, "is_bot": false, "first_name": "Ivan", "username": "ivan"},
                    "chat": {"id": 42, "type": "private"},
                    "date": 1700000000,
                    "text": "Cats 3"
                }
            },
            {
                "update_id": 101,
                "edited_message": {
                    "message_id": 1,
                    "chat": {"id": 42, "type": "private"},
                    "text": "cats 4"
                }
            },
            {
                "update_id": 102,
                "message": {
                    "message_id": 2,
                    "from": {"id": 7, "is_bot": true, "first_name": "picbot"},
                    "chat": {"id": 42, "type": "private"},
                    "text": "echo"
                }
            }
        ]
    }"#;

    fn updates() -> Vec<Update> {
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(UPDATES).unwrap();
        assert!(response.ok);
        response.result.unwrap()
    }

    #[test]
    fn test_next_offset() {
        assert_eq!(TelegramAdapter::get_next_offset(&updates()), Some(103));
        assert_eq!(TelegramAdapter::get_next_offset(&[]), None);
    }

    #[test]
    fn test_to_domain() {
        let mut adapter = TelegramAdapter::new("123456789:secret");
        adapter.info.id = "7".to_string();
        let bot_id = adapter.bot_info().id;

        let converted: Vec<_> = updates().into_iter().map(|u| adapter.to_domain(u)).collect();

        assert_eq!(converted[0].kind, UpdateKind::NewMessage);
        assert_eq!(converted[0].chat_id, "42");
        assert_eq!(converted[0].dispatchable_text(&bot_id), Some("Cats 3"));
        assert_eq!(converted[0].sender.as_ref().unwrap().display_name(), "@ivan");

        assert_eq!(converted[1].kind, UpdateKind::EditedMessage);
        assert_eq!(converted[1].dispatchable_text(&bot_id), None);

        assert!(converted[2].is_from(&bot_id));
        assert_eq!(converted[2].dispatchable_text(&bot_id), None);
    }

    #[test]
    fn test_token_preview_handles_non_ascii() {
        let adapter = TelegramAdapter::new("abcdefgé:xyz");
        assert_eq!(adapter.token_preview(), "abcdefgé");

        let adapter = TelegramAdapter::new("123");
        assert_eq!(adapter.token_preview(), "123");
    }

    #[test]
    fn test_api_url() {
        let adapter = TelegramAdapter::new("123:abc");
        assert_eq!(adapter.api_url("getMe"), "https://api.telegram.org/bot123:abc/getMe");
    }

    #[test]
    fn test_error_envelope() {
        let response: ApiResponse<Message> =
            serde_json::from_str(r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#)
                .unwrap();
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.description.as_deref(), Some("Bad Request: chat not found"));
    }
}
