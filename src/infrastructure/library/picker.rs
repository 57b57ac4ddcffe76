//! Image picker - random distinct files from a category folder

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use crate::application::errors::LibraryError;
use crate::domain::entities::Image;

/// Picks images with one RNG seeded once for the whole process
pub struct ImagePicker {
    rng: Mutex<StdRng>,
}

impl ImagePicker {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic picker for tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Read `min(quantity, files)` distinct random files from `folder`.
    ///
    /// Files that fail to read are skipped and replaced by the next candidate.
    pub async fn pick(&self, folder: &Path, quantity: u32) -> Result<Vec<Image>, LibraryError> {
        let mut candidates = list_files(folder).await?;
        self.shuffle(&mut candidates);

        let wanted = (quantity as usize).min(candidates.len());
        let mut images = Vec::with_capacity(wanted);

        for path in candidates {
            if images.len() == wanted {
                break;
            }
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    images.push(Image::new(file_name, bytes));
                }
                Err(e) => tracing::warn!("Skipping unreadable image {:?}: {}", path, e),
            }
        }

        Ok(images)
    }

    fn shuffle(&self, paths: &mut [PathBuf]) {
        let mut rng = match self.rng.lock() {
            Ok(rng) => rng,
            Err(poisoned) => poisoned.into_inner(),
        };
        paths.shuffle(&mut *rng);
    }
}

impl Default for ImagePicker {
    fn default() -> Self {
        Self::new()
    }
}

async fn list_files(folder: &Path) -> Result<Vec<PathBuf>, LibraryError> {
    let unavailable = |source| LibraryError::CategoryUnavailable {
        path: folder.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(folder).await.map_err(unavailable)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
        let path = entry.path();
        // Follows symlinks, so a link to an image counts as an image
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("Skipping {:?}: {}", path, e),
        }
    }

    Ok(files)
}
