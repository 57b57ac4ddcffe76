//! Command parser - Turns raw message text into a `Command`

use crate::domain::entities::{Category, Command, Rejection, MAX_QUANTITY};

/// Keywords that open the info message
pub const START_KEYWORDS: &[&str] = &["/start", "начать"];
pub const INFO_KEYWORD: &str = "/info";

/// Outcome of validating the quantity word on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuantityCheck {
    Valid(u32),
    Malformed,
    TooLarge,
}

impl QuantityCheck {
    fn of(word: &str) -> Self {
        match word.parse::<u64>() {
            Ok(n) if n > u64::from(MAX_QUANTITY) => QuantityCheck::TooLarge,
            Ok(n) => u32::try_from(n).map_or(QuantityCheck::TooLarge, QuantityCheck::Valid),
            // A digit string that overflows u64 is still a number, just far too big
            Err(_) if !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) => {
                QuantityCheck::TooLarge
            }
            Err(_) => QuantityCheck::Malformed,
        }
    }
}

/// Parses inbound text against the categories currently on disk
pub struct CommandParser {
    start_keywords: Vec<String>,
    info_keyword: String,
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            start_keywords: START_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            info_keyword: INFO_KEYWORD.to_string(),
        }
    }

    /// Parse a text message
    pub fn parse(&self, text: &str, categories: &[Category]) -> Command {
        let message = text.to_lowercase();
        let words: Vec<&str> = message.split_whitespace().collect();

        match words.as_slice() {
            [] => Command::Invalid(Rejection::Empty),
            [word] => {
                if self.is_info_keyword(message.trim()) {
                    return Command::Info;
                }
                match resolve(word, categories) {
                    Some(category) => Command::CategorySingle(category.clone()),
                    None => Command::Invalid(Rejection::UnknownCategory),
                }
            }
            [word, quantity] => {
                let category = resolve(word, categories);
                match (category, QuantityCheck::of(quantity)) {
                    (_, QuantityCheck::Malformed) => Command::Invalid(Rejection::MalformedQuantity),
                    (_, QuantityCheck::TooLarge) => Command::Invalid(Rejection::QuantityTooLarge),
                    (None, QuantityCheck::Valid(_)) => Command::Invalid(Rejection::UnknownCategory),
                    (Some(category), QuantityCheck::Valid(quantity)) => Command::CategoryQuantity {
                        category: category.clone(),
                        quantity,
                    },
                }
            }
            _ => Command::Invalid(Rejection::TooManyWords),
        }
    }

    fn is_info_keyword(&self, message: &str) -> bool {
        message == self.info_keyword || self.start_keywords.iter().any(|k| k == message)
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

/// First category whose key equals the word
fn resolve<'a>(word: &str, categories: &'a [Category]) -> Option<&'a Category> {
    categories.iter().find(|c| c.matches(word))
}
