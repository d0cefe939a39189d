//! Per-pixel additive adjustment (brightness).

use crate::error::Result;
use crate::operator::Percentage;
use crate::preview::with_split;
use crate::raster::{clamp_sample, Image};

/// Add `factor` to every sample, clamping to `[0, 255]`.
///
/// Negative factors darken. Arithmetic saturates, so any `i32` factor is
/// accepted.
pub fn apply_brightness(image: &Image, factor: i32) -> Image {
    image.map_samples(|v| clamp_sample(v.saturating_add(factor)))
}

/// Brighten, then show the result only in the left `percentage` of the image.
pub fn apply_brightness_with_split(
    image: &Image,
    factor: i32,
    percentage: Percentage,
) -> Result<Image> {
    with_split(image, apply_brightness(image, factor), Some(percentage))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every output sample lies in [0, 255] for any factor.
        #[test]
        fn prop_output_in_range(
            samples in proptest::collection::vec(0i32..=255, 12),
            factor in any::<i32>(),
        ) {
            let img = Image::new(3, 4, vec![samples]).unwrap();
            let out = apply_brightness(&img, factor);
            prop_assert!(out.channel(0).iter().all(|v| (0..=255).contains(v)));
        }

        /// Property: brightness never reorders samples.
        #[test]
        fn prop_monotonic(
            a in 0i32..=255,
            b in 0i32..=255,
            factor in -300i32..=300,
        ) {
            let img = Image::new(1, 2, vec![vec![a, b]]).unwrap();
            let out = apply_brightness(&img, factor);
            if a <= b {
                prop_assert!(out.sample(0, 0, 0) <= out.sample(0, 0, 1));
            } else {
                prop_assert!(out.sample(0, 0, 0) >= out.sample(0, 0, 1));
            }
        }
    }
}
