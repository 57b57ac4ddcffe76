//! picbot - sends random pictures from a folder tree in reply to chat messages

pub mod domain;
pub mod application;
pub mod infrastructure;
