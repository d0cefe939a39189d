//! Level adjustment through a quadratic tone curve.
//!
//! The curve `f(x) = A·x² + B·x + C` passes through `(black, 0)`,
//! `(mid, 128)` and `(white, 255)`. Its coefficients come from the closed-form
//! Lagrange solution of the 3x3 system, so no iterative solver is needed.

use crate::error::Result;
use crate::operator::{Levels, Percentage};
use crate::preview::with_split;
use crate::raster::{round_sample, Image};

/// Output value the mid point is mapped to.
const MID_TARGET: f64 = 128.0;
/// Output value the white point is mapped to.
const WHITE_TARGET: f64 = 255.0;

/// Quadratic coefficients fitted to a set of levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelsCurve {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LevelsCurve {
    /// Fit the curve through the black, mid and white points.
    pub fn fit(levels: Levels) -> Self {
        let (x1, x2, x3) = (
            levels.black() as f64,
            levels.mid() as f64,
            levels.white() as f64,
        );
        let (y1, y2, y3) = (0.0, MID_TARGET, WHITE_TARGET);

        // Non-zero because Levels guarantees x1 < x2 < x3.
        let denom = (x1 - x2) * (x1 - x3) * (x2 - x3);
        let a = (x3 * (y2 - y1) + x2 * (y1 - y3) + x1 * (y3 - y2)) / denom;
        let b = (x3 * x3 * (y1 - y2) + x2 * x2 * (y3 - y1) + x1 * x1 * (y2 - y3)) / denom;
        let c = (x2 * x3 * (x2 - x3) * y1 + x3 * x1 * (x3 - x1) * y2 + x1 * x2 * (x1 - x2) * y3)
            / denom;

        Self { a, b, c }
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }

    /// Precompute rounded, clamped outputs for every 8-bit input.
    pub fn lut(&self) -> [i32; 256] {
        let mut lut = [0i32; 256];
        for (i, value) in lut.iter_mut().enumerate() {
            *value = round_sample(self.evaluate(i as f64));
        }
        lut
    }
}

/// Remap every sample of every channel through the fitted levels curve.
///
/// Outputs are rounded to the nearest integer and clamped to `[0, 255]`.
pub fn adjust_levels(image: &Image, levels: Levels) -> Image {
    let curve = LevelsCurve::fit(levels);
    let lut = curve.lut();
    image.map_samples(|v| match usize::try_from(v) {
        Ok(i) if i < lut.len() => lut[i],
        _ => round_sample(curve.evaluate(v as f64)),
    })
}

/// Adjust levels, then show the result only in the left `percentage` of the image.
pub fn adjust_levels_with_split(
    image: &Image,
    levels: Levels,
    percentage: Percentage,
) -> Result<Image> {
    with_split(image, adjust_levels(image, levels), Some(percentage))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(b: i32, m: i32, w: i32) -> Levels {
        Levels::new(b, m, w).unwrap()
    }

    #[test]
    fn test_curve_hits_control_points() {
        let curve = LevelsCurve::fit(levels(20, 50, 100));
        assert!(curve.evaluate(20.0).abs() < 1e-9);
        assert!((curve.evaluate(50.0) - 128.0).abs() < 1e-9);
        assert!((curve.evaluate(100.0) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_collinear_points_give_linear_curve() {
        let curve = LevelsCurve::fit(levels(0, 128, 255));
        assert!(curve.a.abs() < 1e-4);
        assert!(curve.c.abs() < 1e-9);
    }

    #[test]
    fn test_adjust_levels_values() {
        let img = Image::new(1, 6, vec![vec![0, 20, 50, 75, 100, 255]]).unwrap();
        let out = adjust_levels(&img, levels(20, 50, 100));
        // f(0) and f(255) fall below zero and clamp; f(75) = 204.99
        assert_eq!(out.channel(0), &[0, 0, 128, 205, 255, 0]);
    }

    #[test]
    fn test_identity_levels() {
        let samples: Vec<i32> = (0..=255).collect();
        let img = Image::new(1, 256, vec![samples.clone()]).unwrap();
        let out = adjust_levels(&img, levels(0, 128, 255));
        for (a, b) in samples.iter().zip(out.channel(0)) {
            assert!((a - b).abs() <= 1);
        }
    }

    #[test]
    fn test_out_of_range_samples_evaluated() {
        let img = Image::new(1, 2, vec![vec![-10, 400]]).unwrap();
        let out = adjust_levels(&img, levels(0, 128, 255));
        assert_eq!(out.channel(0), &[0, 255]);
    }

    #[test]
    fn test_split() {
        let img = Image::new(1, 4, vec![vec![50; 4]]).unwrap();
        let out = adjust_levels_with_split(&img, levels(20, 50, 100), Percentage::new(50).unwrap()).unwrap();
        assert_eq!(out.channel(0), &[128, 128, 50, 50]);
    }
}
