//! Update loop - pulls inbound updates from the platform and dispatches them

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use crate::application::errors::BotError;
use crate::application::messaging::Dispatcher;
use crate::domain::entities::Update;
use crate::domain::traits::Bot;

/// Pause after a failed poll before asking the platform again
pub const POLL_ERROR_DELAY: Duration = Duration::from_secs(5);

/// Drives one bot adapter until the shutdown token is cancelled
pub struct UpdateLoop<B: Bot> {
    bot: B,
    dispatcher: Dispatcher,
    shutdown: CancellationToken,
    poll_error_delay: Duration,
}

impl<B: Bot> UpdateLoop<B> {
    pub fn new(bot: B, dispatcher: Dispatcher, shutdown: CancellationToken) -> Self {
        Self {
            bot,
            dispatcher,
            shutdown,
            poll_error_delay: POLL_ERROR_DELAY,
        }
    }

    pub fn with_poll_error_delay(mut self, delay: Duration) -> Self {
        self.poll_error_delay = delay;
        self
    }

    pub fn into_bot(self) -> B {
        self.bot
    }

    /// Run until cancelled. Returns the number of dispatched messages.
    ///
    /// Only an authentication failure while polling ends the loop with an error;
    /// everything else is logged and the loop carries on.
    pub async fn run(&mut self) -> Result<usize, BotError> {
        tracing::info!("Starting message loop...");
        let mut handled = 0;

        loop {
            let polled = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                polled = self.bot.poll_updates() => polled,
            };

            match polled {
                Ok(updates) => {
                    if !updates.is_empty() {
                        tracing::debug!("Received {} updates", updates.len());
                    }
                    for update in &updates {
                        match self.handle_update(update).await {
                            Ok(true) => handled += 1,
                            Ok(false) => {}
                            Err(e) => {
                                tracing::error!("Failed to handle update {}: {}", update.id, e);
                            }
                        }
                    }
                }
                Err(BotError::Auth(e)) => {
                    tracing::error!("Platform rejected credentials: {}", e);
                    return Err(BotError::Auth(e));
                }
                Err(e) => {
                    tracing::error!("Failed to get updates: {}", e);
                    tokio::select! {
                        _ = self.shutdown.cancelled() => break,
                        _ = tokio::time::sleep(self.poll_error_delay) => {}
                    }
                }
            }
        }

        tracing::info!("Message loop stopped after {} messages", handled);
        Ok(handled)
    }

    /// Dispatch a single update. Returns `false` when the update was skipped.
    pub async fn handle_update(&self, update: &Update) -> Result<bool, BotError> {
        let bot_id = self.bot.bot_info().id;
        let Some(text) = update.dispatchable_text(&bot_id) else {
            tracing::debug!("Skipping update {} ({})", update.id, update.kind.as_str());
            return Ok(false);
        };

        let sender = update
            .sender
            .as_ref()
            .map(|u| u.display_name())
            .unwrap_or_else(|| "unknown".to_string());
        tracing::info!("[{}] {}: {}", update.chat_id, sender, text);

        self.dispatcher.handle(&self.bot, &update.chat_id, text).await?;
        Ok(true)
    }
}
