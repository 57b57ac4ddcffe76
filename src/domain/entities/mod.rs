//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod update;
pub mod command;
pub mod category;

pub use user::User;
pub use update::{Update, UpdateKind};
pub use command::{Command, Rejection, MAX_QUANTITY};
pub use category::{Category, Image};
