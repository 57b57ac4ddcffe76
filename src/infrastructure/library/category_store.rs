//! Category store - subfolders of the image root

use std::path::Path;
use crate::application::errors::LibraryError;
use crate::domain::entities::Category;

/// List the direct subdirectories of `root` as categories, in directory order
pub async fn list_categories(root: &Path) -> Result<Vec<Category>, LibraryError> {
    let unavailable = |source| LibraryError::RootUnavailable {
        path: root.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(root).await.map_err(unavailable)?;
    let mut categories = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
        let file_type = match entry.file_type().await {
            Ok(file_type) => file_type,
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", entry.path(), e);
                continue;
            }
        };
        if !file_type.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => categories.push(Category::new(name)),
            Err(name) => tracing::warn!("Skipping non UTF-8 category folder {:?}", name),
        }
    }

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_only_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("cats")).unwrap();
        std::fs::create_dir(dir.path().join("People")).unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"not a category").unwrap();

        let mut names: Vec<String> = list_categories(dir.path())
            .await
            .unwrap()
            .iter()
            .map(|c| c.folder().to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["People".to_string(), "cats".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_categories(&dir.path().join("nope")).await.unwrap_err();
        assert!(matches!(err, LibraryError::RootUnavailable { .. }));
    }
}
