//! Convolution filtering (blur and sharpen).
//!
//! A filter is a square kernel of real coefficients applied independently to
//! every channel. Taps that fall outside the image contribute zero, so edge
//! pixels darken slightly under blur rather than being reflected or wrapped.

use serde::{Deserialize, Serialize};

use crate::error::{OperationError, Result};
use crate::operator::Percentage;
use crate::preview::with_split;
use crate::raster::{truncate_sample, Image};

/// An odd-sized square convolution kernel stored row-major.
///
/// Serializes as nested rows, and deserialization runs the same validation
/// as [`Kernel::from_rows`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Kernel {
    size: usize,
    coefficients: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from `size * size` row-major coefficients.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if `size` is zero or even, or if the coefficient
    /// count is not `size * size`.
    pub fn new(size: usize, coefficients: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(OperationError::InvalidDimensions(
                "kernel must not be empty".to_string(),
            ));
        }
        if size % 2 == 0 {
            return Err(OperationError::InvalidDimensions(format!(
                "kernel size must be odd, got {size}"
            )));
        }
        if coefficients.len() != size * size {
            return Err(OperationError::InvalidDimensions(format!(
                "kernel of size {size} needs {} coefficients, got {}",
                size * size,
                coefficients.len()
            )));
        }
        Ok(Self { size, coefficients })
    }

    /// Create a kernel from nested rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return Err(OperationError::InvalidDimensions(
                "kernel must be square".to_string(),
            ));
        }
        Self::new(size, rows.concat())
    }

    /// The 1x1 identity kernel.
    pub fn identity() -> Self {
        Self {
            size: 1,
            coefficients: vec![1.0],
        }
    }

    /// 3x3 Gaussian blur: `[[1,2,1],[2,4,2],[1,2,1]] / 16`.
    pub fn gaussian_blur() -> Self {
        let weights = [1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0];
        Self {
            size: 3,
            coefficients: weights.iter().map(|w| w / 16.0).collect(),
        }
    }

    /// 5x5 sharpen: centre 1, inner ring 1/4, outer ring -1/8.
    pub fn sharpen() -> Self {
        let mut coefficients = Vec::with_capacity(25);
        for row in 0..5i32 {
            for col in 0..5i32 {
                let ring = (row - 2).abs().max((col - 2).abs());
                coefficients.push(match ring {
                    0 => 1.0,
                    1 => 0.25,
                    _ => -0.125,
                });
            }
        }
        Self {
            size: 5,
            coefficients,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.coefficients[row * self.size + col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Kernel {
    type Error = OperationError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<Kernel> for Vec<Vec<f64>> {
    fn from(kernel: Kernel) -> Self {
        kernel
            .coefficients
            .chunks_exact(kernel.size)
            .map(<[f64]>::to_vec)
            .collect()
    }
}

/// Convolve every channel of `image` with `kernel`.
///
/// When the kernel is larger than the image in either dimension, the image is
/// zero-padded on the bottom/right to at least `size - 1` in that dimension
/// and the result keeps the padded size.
pub fn apply_filter(image: &Image, kernel: &Kernel) -> Result<Image> {
    let n = kernel.size();
    let (height, width) = if n > image.height() || n > image.width() {
        (image.height().max(n - 1), image.width().max(n - 1))
    } else {
        (image.height(), image.width())
    };

    tracing::debug!(
        kernel = n,
        height,
        width,
        channels = image.channel_count(),
        "convolving image"
    );

    let channels = image
        .channels()
        .iter()
        .map(|c| {
            let padded = pad_channel(c, image.height(), image.width(), height, width);
            convolve_channel(&padded, height, width, kernel)
        })
        .collect();

    Ok(Image::from_parts(height, width, channels))
}

/// Convolve, then show the result only in the left `percentage` of the image.
///
/// A kernel larger than the image changes the output size, which cannot be
/// composited against the original; that case fails with `InvalidDimensions`.
pub fn apply_filter_with_split(
    image: &Image,
    kernel: &Kernel,
    percentage: Percentage,
) -> Result<Image> {
    let filtered = apply_filter(image, kernel)?;
    with_split(image, filtered, Some(percentage))
}

/// Gaussian blur convenience wrapper.
pub fn blur(image: &Image) -> Result<Image> {
    apply_filter(image, &Kernel::gaussian_blur())
}

/// Sharpen convenience wrapper.
pub fn sharpen(image: &Image) -> Result<Image> {
    apply_filter(image, &Kernel::sharpen())
}

fn pad_channel(
    samples: &[i32],
    height: usize,
    width: usize,
    padded_height: usize,
    padded_width: usize,
) -> Vec<i32> {
    if height == padded_height && width == padded_width {
        return samples.to_vec();
    }
    let mut out = vec![0; padded_height * padded_width];
    for (dst, src) in out
        .chunks_exact_mut(padded_width)
        .zip(samples.chunks_exact(width))
    {
        dst[..width].copy_from_slice(src);
    }
    out
}

fn convolve_channel(samples: &[i32], height: usize, width: usize, kernel: &Kernel) -> Vec<i32> {
    let n = kernel.size();
    let half = (n / 2) as isize;
    let mut out = Vec::with_capacity(height * width);

    for i in 0..height as isize {
        for j in 0..width as isize {
            let mut sum = 0.0;
            for k in 0..n {
                let y = i - half + k as isize;
                if y < 0 || y >= height as isize {
                    continue;
                }
                let row = &samples[y as usize * width..(y as usize + 1) * width];
                for l in 0..n {
                    let x = j - half + l as isize;
                    if x < 0 || x >= width as isize {
                        continue;
                    }
                    sum += kernel.at(k, l) * row[x as usize] as f64;
                }
            }
            out.push(truncate_sample(sum));
        }
    }

    out
}
