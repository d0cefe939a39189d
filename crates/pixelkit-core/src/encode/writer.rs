//! Encoding [`Image`]s to PPM, PNG and JPEG bytes.
//!
//! Samples are clamped to `[0, 255]` on the way out. Greyscale images are
//! written as 8-bit luma where the format supports it; PPM has no greyscale
//! variant, so the grey channel is replicated into red, green and blue.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::ImageFormat;
use crate::raster::{clamp_sample, Image};

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Image dimensions do not fit the encoder's `u32` sizes.
    #[error("Invalid dimensions: {height}x{width} is too large to encode")]
    InvalidDimensions { height: usize, width: usize },

    /// The underlying encoder failed.
    #[error("{format:?} encoding failed: {message}")]
    EncodingFailed { format: ImageFormat, message: String },
}

/// Encode an image in the given format.
pub fn encode_image(image: &Image, format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
    encode_image_with_quality(image, format, DEFAULT_JPEG_QUALITY)
}

/// Encode an image, using `quality` (1-100) when the format is JPEG.
pub fn encode_image_with_quality(
    image: &Image,
    format: ImageFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = match (u32::try_from(image.width()), u32::try_from(image.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(EncodeError::InvalidDimensions {
                height: image.height(),
                width: image.width(),
            })
        }
    };

    // PPM is always a pixmap, so grey images are widened to RGB.
    let (pixels, color) = if image.channel_count() == 1 && format != ImageFormat::Ppm {
        (luma_bytes(image), ExtendedColorType::L8)
    } else {
        (rgb_bytes(image), ExtendedColorType::Rgb8)
    };

    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        ImageFormat::Ppm => PnmEncoder::new(&mut buffer)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Ascii))
            .write_image(&pixels, width, height, color),
        ImageFormat::Png => PngEncoder::new(&mut buffer).write_image(&pixels, width, height, color),
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
            .write_image(&pixels, width, height, color),
    };
    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}

fn luma_bytes(image: &Image) -> Vec<u8> {
    image
        .channel(0)
        .iter()
        .map(|&v| clamp_sample(v) as u8)
        .collect()
}

/// Interleave channels as RGB bytes, replicating a single grey channel.
fn rgb_bytes(image: &Image) -> Vec<u8> {
    let channels = image.channels();
    let pick = |c: usize| if channels.len() == 1 { 0 } else { c };
    let mut out = Vec::with_capacity(image.pixel_count() * 3);
    for i in 0..image.pixel_count() {
        for c in 0..3 {
            out.push(clamp_sample(channels[pick(c)][i]) as u8);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    fn color_image() -> Image {
        Image::from_grids(vec![
            vec![vec![255, 0], vec![10, 300]],
            vec![vec![0, 255], vec![20, 30]],
            vec![vec![0, 0], vec![-5, 40]],
        ])
        .unwrap()
    }

    #[test]
    fn test_ppm_is_ascii_pixmap() {
        let bytes = encode_image(&color_image(), ImageFormat::Ppm).unwrap();
        assert_eq!(&bytes[0..2], b"P3");
    }

    #[test]
    fn test_ppm_round_trip_clamps() {
        let bytes = encode_image(&color_image(), ImageFormat::Ppm).unwrap();
        let back = decode_image(&bytes, ImageFormat::Ppm).unwrap();
        assert_eq!(back, color_image().clamped());
    }

    #[test]
    fn test_png_round_trip() {
        let img = color_image().clamped();
        let bytes = encode_image(&img, ImageFormat::Png).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(decode_image(&bytes, ImageFormat::Png).unwrap(), img);
    }

    #[test]
    fn test_grey_png_stays_grey() {
        let grey = Image::new(2, 2, vec![vec![0, 64, 128, 255]]).unwrap();
        let bytes = encode_image(&grey, ImageFormat::Png).unwrap();
        let back = decode_image(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(back, grey);
    }

    #[test]
    fn test_grey_ppm_replicates_channel() {
        let grey = Image::new(1, 2, vec![vec![7, 9]]).unwrap();
        assert_eq!(rgb_bytes(&grey), vec![7, 7, 7, 9, 9, 9]);
        let bytes = encode_image(&grey, ImageFormat::Ppm).unwrap();
        // Decoding detects the replicated channels and collapses them again
        assert_eq!(decode_image(&bytes, ImageFormat::Ppm).unwrap(), grey);
    }

    #[test]
    fn test_jpeg_markers() {
        let img = Image::filled(16, 16, 3, 128).unwrap();
        let bytes = encode_image_with_quality(&img, ImageFormat::Jpeg, 0).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        let len = bytes.len();
        assert_eq!(&bytes[len - 2..], &[0xFF, 0xD9]);
    }
}
