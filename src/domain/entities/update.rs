use super::User;

/// Kind of inbound platform event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateKind {
    NewMessage,
    EditedMessage,
    Other(String),
}

impl UpdateKind {
    pub fn as_str(&self) -> &str {
        match self {
            UpdateKind::NewMessage => "new_message",
            UpdateKind::EditedMessage => "edited_message",
            UpdateKind::Other(s) => s,
        }
    }
}

/// One inbound event delivered by a platform adapter
#[derive(Debug, Clone)]
pub struct Update {
    pub id: i64,
    pub kind: UpdateKind,
    pub chat_id: String,
    pub sender: Option<User>,
    pub text: Option<String>,
}

impl Update {
    pub fn new(id: i64, kind: UpdateKind, chat_id: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            chat_id: chat_id.into(),
            sender: None,
            text: None,
        }
    }

    pub fn message(id: i64, chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, UpdateKind::NewMessage, chat_id).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_sender(mut self, user: User) -> Self {
        self.sender = Some(user);
        self
    }

    pub fn is_new_message(&self) -> bool {
        self.kind == UpdateKind::NewMessage
    }

    /// Whether the bot account `bot_id` sent this message itself
    pub fn is_from(&self, bot_id: &str) -> bool {
        self.sender.as_ref().is_some_and(|u| u.id == bot_id)
    }

    /// Text worth dispatching: a non-blank new message not sent by `bot_id`
    pub fn dispatchable_text(&self, bot_id: &str) -> Option<&str> {
        if !self.is_new_message() || self.is_from(bot_id) {
            return None;
        }
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "7";

    #[test]
    fn test_dispatchable_text() {
        let update = Update::message(1, "10", "cats 3").with_sender(User::new("42"));
        assert_eq!(update.dispatchable_text(BOT), Some("cats 3"));

        let echo = Update::message(2, "10", "cats").with_sender(User::new(BOT));
        assert!(echo.is_from(BOT));
        assert_eq!(echo.dispatchable_text(BOT), None);

        let edited = Update::new(3, UpdateKind::EditedMessage, "10").with_text("cats");
        assert_eq!(edited.dispatchable_text(BOT), None);

        let blank = Update::message(4, "10", "   ");
        assert_eq!(blank.dispatchable_text(BOT), None);

        let no_text = Update::new(5, UpdateKind::NewMessage, "10");
        assert_eq!(no_text.dispatchable_text(BOT), None);
    }

    #[test]
    fn test_message_without_sender_is_not_an_echo() {
        let update = Update::message(1, "10", "cats");
        assert!(!update.is_from(BOT));
        assert_eq!(update.dispatchable_text(BOT), Some("cats"));
    }
}
