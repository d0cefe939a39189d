//! Lossy compression with a 2-D Haar wavelet.
//!
//! Each channel is padded to a power-of-two square, decomposed into Haar
//! coefficients, thresholded, and reconstructed. The threshold is chosen
//! jointly over every channel: the distinct rounded magnitudes of all
//! non-zero coefficients are sorted, and the `percentage` quantile of that
//! list becomes the cut-off. Coefficients below it are dropped.
//!
//! ## Decomposition
//!
//! At each level the active `c`x`c` square is transformed row by row, then
//! the first `c/2` columns are transformed column by column, and `c` halves.
//! A pair `(a, b)` becomes `((a + b) / √2, (a - b) / √2)` with all averages
//! written before all differences. The inverse walks the levels from `c = 2`
//! upwards, undoing the column pass before the row pass.

use std::collections::BTreeSet;
use std::f64::consts::SQRT_2;

use crate::error::Result;
use crate::operator::Percentage;
use crate::raster::{round_sample, Image};

/// Compress `image` by discarding the smallest `percentage` of distinct
/// Haar coefficient magnitudes.
///
/// At 0% the image is reproduced within rounding error. At 100% every
/// coefficient is dropped.
pub fn compress(image: &Image, percentage: Percentage) -> Result<Image> {
    let (height, width) = (image.height(), image.width());
    let side = padded_side(height, width);

    let mut planes: Vec<Vec<f64>> = image
        .channels()
        .iter()
        .map(|c| {
            let mut plane = pad_square(c, height, width, side);
            haar_forward(&mut plane, side);
            plane
        })
        .collect();

    let zeroed = threshold_coefficients(&mut planes, percentage);
    tracing::debug!(
        percentage = percentage.value(),
        side,
        zeroed,
        "thresholded wavelet coefficients"
    );

    let channels = planes
        .into_iter()
        .map(|mut plane| {
            haar_inverse(&mut plane, side);
            crop(&plane, side, height, width)
        })
        .collect();

    Ok(Image::from_parts(height, width, channels))
}

/// Smallest power of two that is at least `max(height, width)`.
fn padded_side(height: usize, width: usize) -> usize {
    height.max(width).next_power_of_two()
}

fn pad_square(samples: &[i32], height: usize, width: usize, side: usize) -> Vec<f64> {
    let mut plane = vec![0.0; side * side];
    for (row, src) in samples.chunks_exact(width).take(height).enumerate() {
        for (dst, &v) in plane[row * side..row * side + width].iter_mut().zip(src) {
            *dst = v as f64;
        }
    }
    plane
}

fn crop(plane: &[f64], side: usize, height: usize, width: usize) -> Vec<i32> {
    let mut out = Vec::with_capacity(height * width);
    for row in 0..height {
        out.extend(plane[row * side..row * side + width].iter().map(|&v| round_sample(v)));
    }
    out
}

/// Zero every coefficient below the `percentage` threshold and return how
/// many non-zero coefficients were dropped.
fn threshold_coefficients(planes: &mut [Vec<f64>], percentage: Percentage) -> usize {
    let magnitudes: BTreeSet<u64> = planes
        .iter()
        .flatten()
        .filter(|&&v| v != 0.0)
        .map(|&v| rounded_magnitude(v))
        .collect();
    if magnitudes.is_empty() {
        return 0;
    }

    let index = percentage.value() as usize * magnitudes.len() / 100;
    let cutoff = magnitudes.iter().nth(index).copied().unwrap_or(u64::MAX);

    let mut zeroed = 0;
    for v in planes.iter_mut().flatten() {
        if *v != 0.0 && rounded_magnitude(*v) < cutoff {
            *v = 0.0;
            zeroed += 1;
        }
    }
    zeroed
}

#[inline]
fn rounded_magnitude(v: f64) -> u64 {
    v.abs().round() as u64
}

fn haar_forward(plane: &mut [f64], side: usize) {
    let mut line = vec![0.0; side];
    let mut scratch = vec![0.0; side];
    let mut c = side;
    while c > 1 {
        for row in 0..c {
            forward_pairs(&mut plane[row * side..row * side + c], &mut scratch);
        }
        for col in 0..c / 2 {
            gather_column(plane, side, col, &mut line[..c]);
            forward_pairs(&mut line[..c], &mut scratch);
            scatter_column(plane, side, col, &line[..c]);
        }
        c /= 2;
    }
}

fn haar_inverse(plane: &mut [f64], side: usize) {
    let mut line = vec![0.0; side];
    let mut scratch = vec![0.0; side];
    let mut c = 2;
    while c <= side {
        for col in 0..c / 2 {
            gather_column(plane, side, col, &mut line[..c]);
            inverse_pairs(&mut line[..c], &mut scratch);
            scatter_column(plane, side, col, &line[..c]);
        }
        for row in 0..c {
            inverse_pairs(&mut plane[row * side..row * side + c], &mut scratch);
        }
        c *= 2;
    }
}

fn forward_pairs(values: &mut [f64], scratch: &mut [f64]) {
    let half = values.len() / 2;
    for k in 0..half {
        let (a, b) = (values[2 * k], values[2 * k + 1]);
        scratch[k] = (a + b) / SQRT_2;
        scratch[half + k] = (a - b) / SQRT_2;
    }
    values.copy_from_slice(&scratch[..values.len()]);
}

fn inverse_pairs(values: &mut [f64], scratch: &mut [f64]) {
    let half = values.len() / 2;
    for k in 0..half {
        let (avg, diff) = (values[k], values[half + k]);
        scratch[2 * k] = (avg + diff) / SQRT_2;
        scratch[2 * k + 1] = (avg - diff) / SQRT_2;
    }
    values.copy_from_slice(&scratch[..values.len()]);
}

fn gather_column(plane: &[f64], side: usize, col: usize, out: &mut [f64]) {
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = plane[row * side + col];
    }
}

fn scatter_column(plane: &mut [f64], side: usize, col: usize, values: &[f64]) {
    for (row, &v) in values.iter().enumerate() {
        plane[row * side + col] = v;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coefficients(samples: &[i32], height: usize, width: usize) -> Vec<Vec<f64>> {
        let side = padded_side(height, width);
        let mut plane = pad_square(samples, height, width, side);
        haar_forward(&mut plane, side);
        vec![plane]
    }

    proptest! {
        /// Property: compression at 0% reproduces every sample within ±1.
        #[test]
        fn prop_zero_percent_lossless(
            height in 1usize..10,
            width in 1usize..10,
            seed in any::<u16>(),
        ) {
            let samples: Vec<i32> = (0..height * width)
                .map(|i| ((i * 97 + seed as usize) % 256) as i32)
                .collect();
            let img = Image::new(height, width, vec![samples]).unwrap();
            let out = compress(&img, Percentage::ZERO).unwrap();
            for (a, b) in img.channel(0).iter().zip(out.channel(0)) {
                prop_assert!((a - b).abs() <= 1);
            }
        }

        /// Property: the number of dropped coefficients never decreases as
        /// the percentage grows.
        #[test]
        fn prop_dropped_count_monotonic(
            samples in proptest::collection::vec(0i32..=255, 36),
            p in 0i64..100,
        ) {
            let mut lower = coefficients(&samples, 6, 6);
            let mut higher = lower.clone();
            let a = threshold_coefficients(&mut lower, Percentage::new(p).unwrap());
            let b = threshold_coefficients(&mut higher, Percentage::new(p + 1).unwrap());
            prop_assert!(a <= b);
        }
    }
}
