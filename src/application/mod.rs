//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: The update loop
//! - Errors: Error classes for startup and per-message failures
//! - Messaging: Command parsing, replies, dispatching

pub mod errors;
pub mod services;
pub mod messaging;
