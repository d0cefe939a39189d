//! Pixelkit WASM - WebAssembly bindings for pixelkit
//!
//! This crate provides WASM bindings to expose the pixelkit-core engine
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - `JsImage`, the interleaved image wrapper
//! - `operations` - One binding per engine operation
//! - `decode` / `encode` - PPM, PNG and JPEG codecs
//! - `store` - `JsImageStore`, a named working set of images
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, sepia, encode_image } from '@pixelkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()), 'png');
//! const toned = sepia(image, 50);
//! const bytes = encode_image(toned, 'png');
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod operations;
mod store;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use encode::encode_image;
pub use operations::{
    adjust_levels, blur, brighten, channel_component, color_correct, color_transform, compress,
    convolve, flip_horizontal, flip_vertical, greyscale, histogram, intensity_component,
    luma_component, merge_channels, sepia, sharpen, split_channel, value_component,
};
pub use store::JsImageStore;
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
