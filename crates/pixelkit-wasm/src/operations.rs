//! Engine operation WASM bindings.
//!
//! One binding per engine operation. Each takes its source image(s) by
//! reference and returns a new `JsImage`; sources are never modified.
//! Filter, color and tone bindings accept an optional `split` percentage for
//! before/after previews.
//!
//! # Example
//!
//! ```typescript
//! import { sepia, brighten, adjust_levels } from '@pixelkit/wasm';
//!
//! const toned = sepia(image, 50);          // left half sepia
//! const lighter = brighten(image, 10);
//! const levelled = adjust_levels(image, 20, 100, 240);
//! ```

use crate::types::{split_from, to_js, JsImage};
use pixelkit_core::{ChannelIndex, ColorMatrix, Kernel, Levels, Operation, Percentage};
use wasm_bindgen::prelude::*;

fn run(operation: Operation, sources: &[&JsImage]) -> Result<JsImage, JsValue> {
    let images: Vec<_> = sources.iter().map(|s| s.image()).collect();
    operation
        .apply(&images)
        .map(JsImage::from_image)
        .map_err(to_js)
}

/// Gaussian blur (3x3).
#[wasm_bindgen]
pub fn blur(image: &JsImage, split: Option<u8>) -> Result<JsImage, JsValue> {
    let split = split_from(split).map_err(to_js)?;
    run(Operation::Blur { split }, &[image])
}

/// Sharpen (5x5).
#[wasm_bindgen]
pub fn sharpen(image: &JsImage, split: Option<u8>) -> Result<JsImage, JsValue> {
    let split = split_from(split).map_err(to_js)?;
    run(Operation::Sharpen { split }, &[image])
}

/// Convolve with a caller-supplied kernel given as nested rows.
///
/// # Errors
///
/// Returns an error if the kernel is not an odd-sized square.
#[wasm_bindgen]
pub fn convolve(image: &JsImage, kernel: JsValue, split: Option<u8>) -> Result<JsImage, JsValue> {
    let kernel: Kernel = serde_wasm_bindgen::from_value(kernel)
        .map_err(|e| JsValue::from_str(&format!("Invalid kernel: {}", e)))?;
    let split = split_from(split).map_err(to_js)?;
    run(Operation::Convolve { kernel, split }, &[image])
}

#[wasm_bindgen]
pub fn sepia(image: &JsImage, split: Option<u8>) -> Result<JsImage, JsValue> {
    let split = split_from(split).map_err(to_js)?;
    run(Operation::Sepia { split }, &[image])
}

/// Luma greyscale, kept as three channels.
#[wasm_bindgen]
pub fn greyscale(image: &JsImage, split: Option<u8>) -> Result<JsImage, JsValue> {
    let split = split_from(split).map_err(to_js)?;
    run(Operation::Greyscale { split }, &[image])
}

/// Apply a 3x3 color matrix given as nested rows.
#[wasm_bindgen]
pub fn color_transform(
    image: &JsImage,
    matrix: JsValue,
    split: Option<u8>,
) -> Result<JsImage, JsValue> {
    let matrix: ColorMatrix = serde_wasm_bindgen::from_value(matrix)
        .map_err(|e| JsValue::from_str(&format!("Invalid color matrix: {}", e)))?;
    let split = split_from(split).map_err(to_js)?;
    run(Operation::ColorTransform { matrix, split }, &[image])
}

/// Per-pixel maximum across channels.
#[wasm_bindgen]
pub fn value_component(image: &JsImage) -> Result<JsImage, JsValue> {
    run(Operation::ValueComponent, &[image])
}

/// Per-pixel mean across channels.
#[wasm_bindgen]
pub fn intensity_component(image: &JsImage) -> Result<JsImage, JsValue> {
    run(Operation::IntensityComponent, &[image])
}

#[wasm_bindgen]
pub fn luma_component(image: &JsImage) -> Result<JsImage, JsValue> {
    run(Operation::LumaComponent, &[image])
}

/// Single-channel image of channel 0 (red), 1 (green) or 2 (blue).
#[wasm_bindgen]
pub fn channel_component(image: &JsImage, channel: u8) -> Result<JsImage, JsValue> {
    let operation = match ChannelIndex::new(i64::from(channel)).map_err(to_js)? {
        ChannelIndex::RED => Operation::RedComponent,
        ChannelIndex::GREEN => Operation::GreenComponent,
        _ => Operation::BlueComponent,
    };
    run(operation, &[image])
}

/// Add `amount` to every sample, clamping to `[0, 255]`.
#[wasm_bindgen]
pub fn brighten(image: &JsImage, amount: i32, split: Option<u8>) -> Result<JsImage, JsValue> {
    let split = split_from(split).map_err(to_js)?;
    run(Operation::Brighten { amount, split }, &[image])
}

/// Haar wavelet compression dropping `percentage` of the coefficients.
#[wasm_bindgen]
pub fn compress(image: &JsImage, percentage: u8) -> Result<JsImage, JsValue> {
    let percentage = Percentage::new(i64::from(percentage)).map_err(to_js)?;
    run(Operation::Compress { percentage }, &[image])
}

/// Render a 256x256 RGB histogram plot of an RGB image.
#[wasm_bindgen]
pub fn histogram(image: &JsImage) -> Result<JsImage, JsValue> {
    run(Operation::Histogram, &[image])
}

/// Remap tones so `black`, `mid` and `white` land on 0, 128 and 255.
///
/// # Errors
///
/// Returns an error unless `black < mid < white`, all within `[0, 255]`.
#[wasm_bindgen]
pub fn adjust_levels(
    image: &JsImage,
    black: i32,
    mid: i32,
    white: i32,
    split: Option<u8>,
) -> Result<JsImage, JsValue> {
    let levels = Levels::new(black, mid, white).map_err(to_js)?;
    let split = split_from(split).map_err(to_js)?;
    run(Operation::LevelsAdjust { levels, split }, &[image])
}

/// Align the histogram peaks of the three channels.
#[wasm_bindgen]
pub fn color_correct(image: &JsImage, split: Option<u8>) -> Result<JsImage, JsValue> {
    let split = split_from(split).map_err(to_js)?;
    run(Operation::ColorCorrect { split }, &[image])
}

/// Keep one channel of an RGB image, zeroing the others.
#[wasm_bindgen]
pub fn split_channel(image: &JsImage, channel: u8) -> Result<JsImage, JsValue> {
    let channel = ChannelIndex::new(i64::from(channel)).map_err(to_js)?;
    run(Operation::SplitChannel { channel }, &[image])
}

/// Merge three images into one RGB image.
///
/// Single-channel inputs are stacked as red, green and blue. Three-channel
/// inputs contribute red, green and blue respectively.
#[wasm_bindgen]
pub fn merge_channels(
    red: &JsImage,
    green: &JsImage,
    blue: &JsImage,
) -> Result<JsImage, JsValue> {
    run(Operation::Merge, &[red, green, blue])
}

#[wasm_bindgen]
pub fn flip_horizontal(image: &JsImage) -> Result<JsImage, JsValue> {
    run(Operation::HorizontalFlip, &[image])
}

#[wasm_bindgen]
pub fn flip_vertical(image: &JsImage) -> Result<JsImage, JsValue> {
    run(Operation::VerticalFlip, &[image])
}

#[cfg(test)]
mod tests {
    use super::*;

    // Success paths only; error paths build a JsValue, which needs a wasm target.

    fn rgb() -> JsImage {
        #[rustfmt::skip]
        let pixels = vec![
            255, 0, 254,   255, 0, 254,   255, 0, 240,
            255, 0, 240,   255, 0, 0,     255, 0, 90,
            255, 0, 83,    255, 86, 255,  255, 0, 44,
        ];
        JsImage::new(3, 3, 3, pixels).unwrap()
    }

    #[test]
    fn test_brighten() {
        let out = brighten(&rgb(), 10, None).unwrap();
        assert_eq!(&out.pixels()[..3], &[255, 10, 255]);
        assert_eq!(out.pixels()[22], 96);
    }

    #[test]
    fn test_sepia_split() {
        let src = rgb();
        let out = sepia(&src, Some(50)).unwrap();
        assert_eq!(out.pixels()[0], 148);
        // Column 1 onward keeps the original
        assert_eq!(&out.pixels()[3..6], &src.pixels()[3..6]);
    }

    #[test]
    fn test_components() {
        let src = rgb();
        let value = value_component(&src).unwrap();
        assert_eq!(value.channel_count(), 1);
        assert_eq!(value.pixels(), vec![255; 9]);
        let green = channel_component(&src, 1).unwrap();
        assert_eq!(green.pixels()[7], 86);
    }

    #[test]
    fn test_split_and_merge() {
        let src = rgb();
        let parts: Vec<JsImage> = (0..3).map(|c| split_channel(&src, c).unwrap()).collect();
        let merged = merge_channels(&parts[0], &parts[1], &parts[2]).unwrap();
        assert_eq!(merged.pixels(), src.pixels());
    }

    #[test]
    fn test_histogram_size() {
        let out = histogram(&rgb()).unwrap();
        assert_eq!((out.width(), out.height(), out.channel_count()), (256, 256, 3));
    }

    #[test]
    fn test_levels_and_compress_keep_shape() {
        let src = rgb();
        let levelled = adjust_levels(&src, 20, 100, 240, None).unwrap();
        assert_eq!(levelled.pixels().len(), 27);
        let compressed = compress(&src, 0).unwrap();
        assert_eq!(compressed.pixels(), src.pixels());
    }

    #[test]
    fn test_flips() {
        let src = JsImage::new(2, 1, 1, vec![1, 2]).unwrap();
        assert_eq!(flip_horizontal(&src).unwrap().pixels(), vec![2, 1]);
        assert_eq!(flip_vertical(&src).unwrap().pixels(), vec![1, 2]);
    }
}
