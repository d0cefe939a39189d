//! Named image store WASM bindings.
//!
//! A GUI keeps its working set of images in a `JsImageStore` and refers to
//! them by name. Operations read their sources from the store and write the
//! result under a new name, so images only cross into JavaScript when they
//! are displayed or saved.
//!
//! # Example
//!
//! ```typescript
//! import { JsImageStore } from '@pixelkit/wasm';
//!
//! const store = new JsImageStore();
//! store.load('koala', bytes, 'ppm');
//! store.apply({ op: 'sepia', split: 50 }, ['koala'], 'koala-sepia');
//! const png = store.save('koala-sepia', 'png');
//! ```

use crate::decode::decode_bytes;
use crate::types::{to_js, JsImage};
use pixelkit_core::decode::{DecodeError, ImageFormat};
use pixelkit_core::encode::{self, EncodeError};
use pixelkit_core::{ImageRegistry, Operation, OperationError, RegistryError};
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Anything a store call can fail with.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Images kept in WASM memory under unique names.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsImageStore {
    registry: ImageRegistry,
}

#[wasm_bindgen]
impl JsImageStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and store the image as `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded or `name` is taken.
    pub fn load(
        &mut self,
        name: String,
        bytes: &[u8],
        extension: Option<String>,
    ) -> Result<(), JsValue> {
        self.load_bytes(name, bytes, extension.as_deref())
            .map_err(to_js)
    }

    /// Encode the image stored as `name`.
    pub fn save(&self, name: &str, extension: &str) -> Result<Vec<u8>, JsValue> {
        self.save_bytes(name, extension).map_err(to_js)
    }

    /// Copy the image stored as `name` out to JavaScript.
    pub fn get(&self, name: &str) -> Result<JsImage, JsValue> {
        self.registry
            .get(name)
            .map(|image| JsImage::from_image(image.clone()))
            .map_err(to_js)
    }

    /// Store an image built in JavaScript.
    pub fn insert(&mut self, name: String, image: JsImage) -> Result<(), JsValue> {
        self.registry
            .insert(name, image.into_image())
            .map_err(to_js)
    }

    pub fn remove(&mut self, name: &str) -> Result<(), JsValue> {
        self.registry.remove(name).map(drop).map_err(to_js)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Stored names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.registry.names().map(str::to_string).collect()
    }

    /// Run an operation on stored images and store the result as `target`.
    ///
    /// `operation` is an object such as `{ op: 'brighten', amount: 10 }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation object is invalid, a source is
    /// missing, `target` is taken, or the operation itself fails.
    pub fn apply(
        &mut self,
        operation: JsValue,
        sources: Vec<String>,
        target: String,
    ) -> Result<(), JsValue> {
        let operation: Operation = serde_wasm_bindgen::from_value(operation)
            .map_err(|e| JsValue::from_str(&format!("Invalid operation: {}", e)))?;
        self.apply_operation(&operation, &sources, target)
            .map_err(to_js)
    }
}

impl JsImageStore {
    fn load_bytes(
        &mut self,
        name: String,
        bytes: &[u8],
        extension: Option<&str>,
    ) -> Result<(), StoreError> {
        if self.registry.contains(&name) {
            return Err(RegistryError::OverwriteRejected(name).into());
        }
        let image = decode_bytes(bytes, extension)?;
        self.registry.insert(name, image)?;
        Ok(())
    }

    fn save_bytes(&self, name: &str, extension: &str) -> Result<Vec<u8>, StoreError> {
        let image = self.registry.get(name)?;
        let format = ImageFormat::from_extension(extension)?;
        Ok(encode::encode_image(image, format)?)
    }

    pub(crate) fn apply_operation(
        &mut self,
        operation: &Operation,
        sources: &[String],
        target: String,
    ) -> Result<(), StoreError> {
        if self.registry.contains(&target) {
            return Err(RegistryError::OverwriteRejected(target).into());
        }
        let images = sources
            .iter()
            .map(|name| self.registry.get(name))
            .collect::<Result<Vec<_>, _>>()?;
        let result = operation.apply(&images)?;
        self.registry.insert(target, result)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelkit_core::{ChannelIndex, Image, Percentage};

    const RGB_PPM: &[u8] = b"P3\n2 1\n255\n10 20 30 40 50 60\n";

    fn store() -> JsImageStore {
        let mut store = JsImageStore::new();
        store.load_bytes("src".to_string(), RGB_PPM, Some("ppm")).unwrap();
        store
    }

    #[test]
    fn test_load_and_get() {
        let store = store();
        assert!(store.contains("src"));
        assert_eq!(store.get("src").unwrap().pixels(), vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(store.names(), vec!["src".to_string()]);
    }

    #[test]
    fn test_load_rejects_taken_name() {
        let mut store = store();
        assert!(matches!(
            store.load_bytes("src".to_string(), RGB_PPM, Some("ppm")),
            Err(StoreError::Registry(RegistryError::OverwriteRejected(_)))
        ));
    }

    #[test]
    fn test_apply_stores_result() {
        let mut store = store();
        let op = Operation::Brighten {
            amount: 10,
            split: None,
        };
        store
            .apply_operation(&op, &["src".to_string()], "bright".to_string())
            .unwrap();
        assert_eq!(
            store.get("bright").unwrap().pixels(),
            vec![20, 30, 40, 50, 60, 70]
        );
        // Source untouched
        assert_eq!(store.get("src").unwrap().pixels(), vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_apply_merge_from_names() {
        let mut store = store();
        for (c, name) in ["r", "g", "b"].iter().enumerate() {
            let op = Operation::SplitChannel {
                channel: ChannelIndex::new(c as i64).unwrap(),
            };
            store
                .apply_operation(&op, &["src".to_string()], name.to_string())
                .unwrap();
        }
        let names = ["r", "g", "b"].map(String::from);
        store
            .apply_operation(&Operation::Merge, &names, "merged".to_string())
            .unwrap();
        assert_eq!(store.get("merged").unwrap().pixels(), store.get("src").unwrap().pixels());
    }

    #[test]
    fn test_apply_errors() {
        let mut store = store();
        let op = Operation::Sepia {
            split: Some(Percentage::FULL),
        };
        assert!(matches!(
            store.apply_operation(&op, &["missing".to_string()], "out".to_string()),
            Err(StoreError::Registry(RegistryError::NotFound(_)))
        ));
        assert!(matches!(
            store.apply_operation(&op, &["src".to_string()], "src".to_string()),
            Err(StoreError::Registry(RegistryError::OverwriteRejected(_)))
        ));

        let grey = Image::filled(1, 2, 1, 5).unwrap();
        store.registry.insert("grey", grey).unwrap();
        assert!(matches!(
            store.apply_operation(&op, &["grey".to_string()], "out".to_string()),
            Err(StoreError::Operation(OperationError::InvalidChannelCount { .. }))
        ));
        assert!(!store.contains("out"));
    }

    #[test]
    fn test_save_round_trip() {
        let store = store();
        let bytes = store.save_bytes("src", "png").unwrap();
        let decoded = decode_bytes(&bytes, Some("png")).unwrap();
        assert_eq!(&decoded, store.registry.get("src").unwrap());
    }
}
