//! Split-preview compositing.
//!
//! A split preview shows an operation applied to the left part of an image
//! only, which drives the before/after slider in the GUI. Every operation
//! that supports a preview computes its full result first and then calls
//! [`composite`] with the original.

use crate::error::{OperationError, Result};
use crate::operator::Percentage;
use crate::raster::Image;

/// Combine the left `⌊W·p/100⌋` columns of `transformed` with the remaining
/// columns of `original`.
///
/// # Errors
///
/// * `InvalidDimensions` if the two images differ in height or width
/// * `InvalidChannelCount` if they differ in channel count
pub fn composite(original: &Image, transformed: &Image, percentage: Percentage) -> Result<Image> {
    if !original.same_shape(transformed) {
        return Err(OperationError::InvalidDimensions(format!(
            "cannot composite {}x{} over {}x{}",
            transformed.height(),
            transformed.width(),
            original.height(),
            original.width()
        )));
    }
    if original.channel_count() != transformed.channel_count() {
        return Err(OperationError::channels(
            original.channel_count().to_string(),
            transformed.channel_count(),
        ));
    }

    let width = original.width();
    let split = percentage.split_column(width);
    if split == width {
        return Ok(transformed.clone());
    }

    let channels = transformed
        .channels()
        .iter()
        .zip(original.channels())
        .map(|(after, before)| {
            let mut out = after.clone();
            for (dst, src) in out
                .chunks_exact_mut(width)
                .zip(before.chunks_exact(width))
            {
                dst[split..].copy_from_slice(&src[split..]);
            }
            out
        })
        .collect();

    Ok(Image::from_parts(original.height(), width, channels))
}

/// Apply `percentage` to a finished transform, skipping the copy when it
/// covers the whole image.
pub(crate) fn with_split(
    original: &Image,
    transformed: Image,
    percentage: Option<Percentage>,
) -> Result<Image> {
    match percentage {
        None => Ok(transformed),
        Some(p) if p.is_full() => Ok(transformed),
        Some(p) => composite(original, &transformed, p),
    }
}
