//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Library: The image folder tree on disk
//! - Adapters: Platform integrations (Telegram, console)

pub mod config;
pub mod library;
pub mod adapters;
