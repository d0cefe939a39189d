//! Named image storage.
//!
//! Front ends keep every loaded or produced image here under a name. The
//! registry only stores and hands out images; it never runs operations
//! itself.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::raster::Image;

/// Errors raised by registry lookups and inserts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No image is stored under this name.
    #[error("No image named '{0}'")]
    NotFound(String),

    /// An image is already stored under this name.
    #[error("An image named '{0}' already exists")]
    OverwriteRejected(String),
}

/// A mapping from image names to images.
#[derive(Debug, Clone, Default)]
pub struct ImageRegistry {
    images: BTreeMap<String, Image>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an image by name.
    pub fn get(&self, name: &str) -> Result<&Image, RegistryError> {
        self.images
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Store an image under a new name.
    ///
    /// # Errors
    ///
    /// `OverwriteRejected` if the name is taken. The stored image is left
    /// unchanged.
    pub fn insert(&mut self, name: impl Into<String>, image: Image) -> Result<(), RegistryError> {
        let name = name.into();
        if self.images.contains_key(&name) {
            return Err(RegistryError::OverwriteRejected(name));
        }
        tracing::debug!(name = %name, height = image.height(), width = image.width(), "storing image");
        self.images.insert(name, image);
        Ok(())
    }

    /// Store an image, replacing any image with the same name.
    ///
    /// Returns the previous image, if there was one.
    pub fn replace(&mut self, name: impl Into<String>, image: Image) -> Option<Image> {
        let name = name.into();
        tracing::debug!(name = %name, "replacing image");
        self.images.insert(name, image)
    }

    pub fn remove(&mut self, name: &str) -> Result<Image, RegistryError> {
        self.images
            .remove(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    /// Stored names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(v: i32) -> Image {
        Image::filled(1, 1, 1, v).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let mut reg = ImageRegistry::new();
        reg.insert("koala", image(1)).unwrap();
        assert_eq!(reg.get("koala").unwrap(), &image(1));
        assert!(reg.contains("koala"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let reg = ImageRegistry::new();
        assert_eq!(
            reg.get("missing"),
            Err(RegistryError::NotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_overwrite_rejected() {
        let mut reg = ImageRegistry::new();
        reg.insert("a", image(1)).unwrap();
        assert_eq!(
            reg.insert("a", image(2)),
            Err(RegistryError::OverwriteRejected("a".to_string()))
        );
        assert_eq!(reg.get("a").unwrap(), &image(1));
    }

    #[test]
    fn test_replace_and_remove() {
        let mut reg = ImageRegistry::new();
        assert!(reg.replace("a", image(1)).is_none());
        assert_eq!(reg.replace("a", image(2)), Some(image(1)));
        assert_eq!(reg.remove("a").unwrap(), image(2));
        assert!(reg.is_empty());
        assert!(reg.remove("a").is_err());
    }

    #[test]
    fn test_names_sorted() {
        let mut reg = ImageRegistry::new();
        reg.insert("b", image(0)).unwrap();
        reg.insert("a", image(0)).unwrap();
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
