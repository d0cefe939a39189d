//! Image decoding for pixelkit.
//!
//! This module provides functionality for:
//! - Choosing a codec from a file extension
//! - Decoding PPM, PNG and JPEG bytes into an [`Image`](crate::Image)
//! - Detecting greyscale sources so they load as single-channel images
//!
//! The engine itself never decodes; front ends call this layer before
//! handing images to an operation.

mod reader;
mod types;

pub use reader::{decode_image, decode_image_guessed, from_rgb_image};
pub use types::{DecodeError, ImageFormat};
