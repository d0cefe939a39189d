//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@pixelkit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes, file.name.split('.').pop());
//! console.log(`Decoded ${image.width}x${image.height}, ${image.channel_count} channel(s)`);
//! ```

use crate::types::{to_js, JsImage};
use pixelkit_core::decode::{self, DecodeError, ImageFormat};
use pixelkit_core::Image;
use wasm_bindgen::prelude::*;

/// Decode PPM, PNG or JPEG bytes.
///
/// `extension` selects the codec (`ppm`, `png`, `jpg` or `jpeg`). When it is
/// omitted the format is guessed from the bytes. Images whose pixels are all
/// grey decode to one channel, everything else to three.
///
/// # Errors
///
/// Returns an error if the extension is not supported or the bytes cannot be
/// decoded.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], extension: Option<String>) -> Result<JsImage, JsValue> {
    decode_bytes(bytes, extension.as_deref())
        .map(JsImage::from_image)
        .map_err(to_js)
}

pub(crate) fn decode_bytes(bytes: &[u8], extension: Option<&str>) -> Result<Image, DecodeError> {
    match extension {
        Some(ext) => decode::decode_image(bytes, ImageFormat::from_extension(ext)?),
        None => decode::decode_image_guessed(bytes),
    }
}
