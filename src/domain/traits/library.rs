use async_trait::async_trait;
use crate::domain::entities::{Category, Image};
use crate::application::errors::LibraryError;

/// Read-only access to the category folders and their images
#[async_trait]
pub trait ImageLibrary: Send + Sync {
    /// Categories currently present on disk, in directory order
    async fn categories(&self) -> Result<Vec<Category>, LibraryError>;

    /// Up to `quantity` distinct random images from `category`
    async fn pick(&self, category: &Category, quantity: u32) -> Result<Vec<Image>, LibraryError>;
}
