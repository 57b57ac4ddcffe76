//! Message handling - Parsing, replies and dispatching

pub mod dispatcher;
pub mod parser;
pub mod replies;

pub use dispatcher::{Dispatcher, Reply};
pub use parser::CommandParser;
