//! Filesystem image library: `<root>/<category>/<image>`

pub mod category_store;
pub mod picker;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::errors::LibraryError;
use crate::domain::entities::{Category, Image};
use crate::domain::traits::ImageLibrary;

pub use category_store::list_categories;
pub use picker::ImagePicker;

/// Image library backed by a folder tree, re-read on every request
pub struct FsLibrary {
    root: PathBuf,
    picker: ImagePicker,
}

impl FsLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            picker: ImagePicker::new(),
        }
    }

    pub fn with_picker(mut self, picker: ImagePicker) -> Self {
        self.picker = picker;
        self
    }

    /// Check the root can be listed; used once at startup
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let library = Self::new(root);
        let categories = list_categories(&library.root).await?;
        tracing::info!("Image library {:?} has {} categories", library.root, categories.len());
        Ok(library)
    }
}

#[async_trait]
impl ImageLibrary for FsLibrary {
    async fn categories(&self) -> Result<Vec<Category>, LibraryError> {
        list_categories(&self.root).await
    }

    async fn pick(&self, category: &Category, quantity: u32) -> Result<Vec<Image>, LibraryError> {
        self.picker.pick(&self.root.join(category.folder()), quantity).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_fails_on_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsLibrary::open(dir.path().join("missing")).await.is_err());
    }

    #[tokio::test]
    async fn test_pick_uses_folder_name_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("Cats");
        std::fs::create_dir(&folder).unwrap();
        std::fs::write(folder.join("a.jpg"), b"a").unwrap();

        let library = FsLibrary::open(dir.path()).await.unwrap().with_picker(ImagePicker::with_seed(5));
        let categories = library.categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].key(), "cats");

        let images = library.pick(&categories[0], 4).await.unwrap();
        assert_eq!(images, vec![Image::new("a.jpg", b"a".to_vec())]);
    }
}
