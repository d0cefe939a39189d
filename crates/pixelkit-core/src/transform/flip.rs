//! Mirror images horizontally or vertically.
//!
//! Flips work on any channel count and never change the dimensions.

use crate::raster::Image;

/// Mirror left-to-right.
pub fn flip_horizontal(image: &Image) -> Image {
    let width = image.width();
    let channels = image
        .channels()
        .iter()
        .map(|c| {
            let mut out = c.clone();
            for row in out.chunks_exact_mut(width) {
                row.reverse();
            }
            out
        })
        .collect();
    Image::from_parts(image.height(), width, channels)
}

/// Mirror top-to-bottom.
pub fn flip_vertical(image: &Image) -> Image {
    let width = image.width();
    let channels = image
        .channels()
        .iter()
        .map(|c| c.chunks_exact(width).rev().flatten().copied().collect())
        .collect();
    Image::from_parts(image.height(), width, channels)
}
