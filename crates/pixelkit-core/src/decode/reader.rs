//! Decoding PPM, PNG and JPEG files into [`Image`]s.

use std::io::Cursor;

use image::{ImageReader, RgbImage};

use super::{DecodeError, ImageFormat};
use crate::raster::Image;

/// Decode image bytes of a known format.
///
/// Images whose pixels all have equal red, green and blue values are
/// returned as single-channel greyscale; everything else has three channels.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes cannot be decoded.
pub fn decode_image(bytes: &[u8], format: ImageFormat) -> Result<Image, DecodeError> {
    let img = image::load_from_memory_with_format(bytes, format.to_image_format())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    from_rgb_image(img.into_rgb8())
}

/// Decode image bytes, guessing the format from their contents.
pub fn decode_image_guessed(bytes: &[u8]) -> Result<Image, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    from_rgb_image(img.into_rgb8())
}

/// Convert an `image::RgbImage` into an [`Image`], collapsing grey images to
/// one channel.
pub fn from_rgb_image(img: RgbImage) -> Result<Image, DecodeError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    let n = (width as usize) * (height as usize);
    let is_grey = img.pixels().all(|p| p[0] == p[1] && p[1] == p[2]);

    let channels = if is_grey {
        vec![img.pixels().map(|p| p[0] as i32).collect()]
    } else {
        let mut channels = vec![Vec::with_capacity(n); 3];
        for p in img.pixels() {
            for (channel, &v) in channels.iter_mut().zip(p.0.iter()) {
                channel.push(v as i32);
            }
        }
        channels
    };

    Ok(Image::from_parts(height as usize, width as usize, channels))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Binary PPM (P6), 2x1: red, blue
    const COLOR_PPM: &[u8] = b"P6\n2 1\n255\n\xff\x00\x00\x00\x00\xff";

    // ASCII PPM (P3), 2x2 grey levels
    const GREY_PPM: &[u8] = b"P3\n2 2\n255\n10 10 10 20 20 20\n30 30 30 40 40 40\n";

    #[test]
    fn test_decode_color_ppm() {
        let img = decode_image(COLOR_PPM, ImageFormat::Ppm).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 1);
        assert_eq!(img.channel_count(), 3);
        assert_eq!(img.channel(0), &[255, 0]);
        assert_eq!(img.channel(2), &[0, 255]);
    }

    #[test]
    fn test_decode_grey_ppm_collapses_channels() {
        let img = decode_image(GREY_PPM, ImageFormat::Ppm).unwrap();
        assert_eq!(img.channel_count(), 1);
        assert_eq!(img.channel_grid(0), vec![vec![10, 20], vec![30, 40]]);
    }

    #[test]
    fn test_decode_guessed() {
        let img = decode_image_guessed(COLOR_PPM).unwrap();
        assert_eq!(img.channel_count(), 3);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03], ImageFormat::Png);
        match result {
            Err(DecodeError::CorruptedFile(_)) => {}
            Err(e) => panic!("Expected CorruptedFile error, got: {:?}", e),
            Ok(_) => panic!("Expected error, got success"),
        }
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[], ImageFormat::Jpeg).is_err());
        assert!(decode_image_guessed(&[]).is_err());
    }

    #[test]
    fn test_from_rgb_image() {
        let rgb = RgbImage::from_raw(1, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let img = from_rgb_image(rgb).unwrap();
        assert_eq!(img.height(), 2);
        assert_eq!(img.width(), 1);
        assert_eq!(img.channel(1), &[2, 5]);
    }
}
