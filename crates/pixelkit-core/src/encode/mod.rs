//! Image encoding for pixelkit.
//!
//! Writes finished images back to PPM, PNG or JPEG bytes. The format is
//! normally chosen with [`ImageFormat::from_extension`](crate::decode::ImageFormat::from_extension)
//! from the destination file name.

mod writer;

pub use writer::{encode_image, encode_image_with_quality, EncodeError, DEFAULT_JPEG_QUALITY};
