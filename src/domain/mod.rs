//! Domain layer - Core business objects with no external dependencies
//! 
//! This layer contains:
//! - Entities: Categories, images, commands and inbound updates
//! - Traits: Abstractions for infrastructure (Bot, ImageLibrary)

pub mod entities;
pub mod traits;
