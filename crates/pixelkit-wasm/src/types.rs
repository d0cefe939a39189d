//! WASM-compatible wrapper types for image data.
//!
//! The engine stores channel planes; JavaScript wants one flat buffer. This
//! module converts between the two and maps engine errors to `JsValue`.

use std::fmt::Display;

use pixelkit_core::raster::pixel_area;
use pixelkit_core::{Image, OperationError, Percentage};
use wasm_bindgen::prelude::*;

/// An engine image wrapper for JavaScript.
///
/// Pixels cross the boundary as an `Int32Array` in interleaved row-major
/// order: `channel_count` samples per pixel. A 3-channel image is RGB; a
/// 1-channel image is greyscale.
#[wasm_bindgen]
pub struct JsImage {
    inner: Image,
}

#[wasm_bindgen]
impl JsImage {
    /// Create an image from interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not
    /// `width * height * channel_count` or the channel count is not 1 or 3.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channel_count: u32,
        pixels: Vec<i32>,
    ) -> Result<JsImage, JsValue> {
        deinterleave(width as usize, height as usize, channel_count as usize, &pixels)
            .map(Self::from_image)
            .map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn channel_count(&self) -> u32 {
        self.inner.channel_count() as u32
    }

    /// Returns interleaved samples as an `Int32Array`.
    ///
    /// Note: This creates a copy of the sample data.
    pub fn pixels(&self) -> Vec<i32> {
        interleave(&self.inner)
    }

    /// Samples clamped to `[0, 255]` as RGBA bytes, ready for `ImageData`.
    pub fn rgba(&self) -> Vec<u8> {
        let image = self.inner.clamped();
        let mut out = Vec::with_capacity(image.pixel_count() * 4);
        for i in 0..image.pixel_count() {
            let sample = |c: usize| image.channel(c.min(image.channel_count() - 1))[i] as u8;
            out.extend_from_slice(&[sample(0), sample(1), sample(2), 255]);
        }
        out
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsImage {
    pub(crate) fn from_image(inner: Image) -> Self {
        Self { inner }
    }

    pub(crate) fn image(&self) -> &Image {
        &self.inner
    }

    pub(crate) fn into_image(self) -> Image {
        self.inner
    }
}

/// Split an interleaved buffer into channel planes.
pub(crate) fn deinterleave(
    width: usize,
    height: usize,
    channel_count: usize,
    pixels: &[i32],
) -> Result<Image, OperationError> {
    let expected = pixel_area(height, width)?
        .checked_mul(channel_count)
        .ok_or_else(|| {
            OperationError::InvalidDimensions(format!(
                "{width}x{height}x{channel_count} image is too large"
            ))
        })?;
    if pixels.len() != expected {
        return Err(OperationError::InvalidDimensions(format!(
            "expected {expected} samples for {width}x{height}x{channel_count}, got {}",
            pixels.len()
        )));
    }
    let channels = (0..channel_count)
        .map(|c| pixels.iter().skip(c).step_by(channel_count).copied().collect())
        .collect();
    Image::new(height, width, channels)
}

pub(crate) fn interleave(image: &Image) -> Vec<i32> {
    let mut out = Vec::with_capacity(image.pixel_count() * image.channel_count());
    for i in 0..image.pixel_count() {
        out.extend(image.channels().iter().map(|c| c[i]));
    }
    out
}

/// Convert an optional JS split value into a preview percentage.
pub(crate) fn split_from(value: Option<u8>) -> Result<Option<Percentage>, OperationError> {
    value.map(|v| Percentage::new(i64::from(v))).transpose()
}

pub(crate) fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
