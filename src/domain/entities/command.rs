use super::Category;

/// Upper bound for the number of images in one request
pub const MAX_QUANTITY: u32 = 50;

/// Parsed meaning of an inbound text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start or info keyword: list categories and usage
    Info,
    /// `<category> <quantity>`
    CategoryQuantity { category: Category, quantity: u32 },
    /// `<category>` alone, one image
    CategorySingle(Category),
    Invalid(Rejection),
}

impl Command {
    /// Category and number of images to send, if the command asks for any
    pub fn image_request(&self) -> Option<(&Category, u32)> {
        match self {
            Command::CategoryQuantity { category, quantity } => Some((category, *quantity)),
            Command::CategorySingle(category) => Some((category, 1)),
            _ => None,
        }
    }
}

/// Why a message could not be turned into a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    TooManyWords,
    MalformedQuantity,
    QuantityTooLarge,
    UnknownCategory,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::Empty => "empty",
            Rejection::TooManyWords => "too_many_words",
            Rejection::MalformedQuantity => "malformed_quantity",
            Rejection::QuantityTooLarge => "quantity_too_large",
            Rejection::UnknownCategory => "unknown_category",
        }
    }
}
