//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@pixelkit/wasm';
//!
//! const png = encode_image(image, 'png');
//! const jpeg = encode_image(image, 'jpg', 85);
//! ```

use crate::types::{to_js, JsImage};
use pixelkit_core::decode::ImageFormat;
use pixelkit_core::encode::{self, DEFAULT_JPEG_QUALITY};
use wasm_bindgen::prelude::*;

/// Encode an image as PPM, PNG or JPEG bytes.
///
/// `quality` (1-100) only affects JPEG and defaults to 90. Greyscale images
/// are written as 8-bit luma where the format allows it.
///
/// # Errors
///
/// Returns an error if the extension is not supported or encoding fails.
#[wasm_bindgen]
pub fn encode_image(
    image: &JsImage,
    extension: &str,
    quality: Option<u8>,
) -> Result<Vec<u8>, JsValue> {
    let format = ImageFormat::from_extension(extension).map_err(to_js)?;
    encode::encode_image_with_quality(
        image.image(),
        format,
        quality.unwrap_or(DEFAULT_JPEG_QUALITY),
    )
    .map_err(to_js)
}
