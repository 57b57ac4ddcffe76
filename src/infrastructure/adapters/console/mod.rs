//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use crate::application::errors::BotError;
use crate::domain::entities::{Image, Update, User};
use crate::domain::traits::{Bot, BotInfo};

/// Chat id used for every console message
pub const CONSOLE_CHAT: &str = "console";

type Input = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;

/// Console bot adapter for local development: one stdin line is one message
pub struct ConsoleAdapter {
    info: BotInfo,
    input: Mutex<Input>,
    next_id: i64,
    /// Cancelled once the input is exhausted
    shutdown: CancellationToken,
}

impl ConsoleAdapter {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()), shutdown)
    }

    pub fn from_reader<R>(reader: R, shutdown: CancellationToken) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let boxed: Box<dyn AsyncBufRead + Unpin + Send> = Box::new(reader);
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "picbot".to_string(),
                username: "console".to_string(),
            },
            input: Mutex::new(boxed.lines()),
            next_id: 0,
            shutdown,
        }
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&mut self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn poll_updates(&mut self) -> Result<Vec<Update>, BotError> {
        let line = self
            .input
            .get_mut()
            .next_line()
            .await
            .map_err(|e| BotError::Internal(format!("Failed to read stdin: {}", e)))?;

        match line {
            Some(text) => {
                self.next_id += 1;
                let update = Update::message(self.next_id, CONSOLE_CHAT, text)
                    .with_sender(User::new("local").with_username("you"));
                Ok(vec![update])
            }
            None => {
                tracing::info!("Console input closed");
                self.shutdown.cancel();
                Ok(Vec::new())
            }
        }
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    async fn send_photos(&self, _chat_id: &str, images: &[Image]) -> Result<(), BotError> {
        for image in images {
            println!("[BOT] <photo {} ({} bytes)>", image.file_name, image.bytes.len());
        }
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
