use std::fmt;

/// A named folder of images under the library root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    folder: String,
    key: String,
}

impl Category {
    pub fn new(folder: impl Into<String>) -> Self {
        let folder = folder.into();
        let key = folder.trim().to_lowercase();
        Self { folder, key }
    }

    /// Folder name exactly as it appears on disk
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Lowercased, trimmed name used for matching user input
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matches(&self, input: &str) -> bool {
        self.key == input.trim().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.folder)
    }
}

/// An image file read from a category folder
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Image {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_matching_ignores_case_and_padding() {
        let cat = Category::new(" Cats ");
        assert_eq!(cat.key(), "cats");
        assert_eq!(cat.folder(), " Cats ");
        assert!(cat.matches("CATS"));
        assert!(cat.matches("  cats\t"));
        assert!(!cat.matches("cat"));
    }

    #[test]
    fn test_image_debug_hides_bytes() {
        let image = Image::new("a.jpg", vec![1, 2, 3]);
        assert_eq!(format!("{:?}", image), "Image { file_name: \"a.jpg\", len: 3 }");
    }
}
