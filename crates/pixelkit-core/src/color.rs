//! Linear color transforms (sepia, luma greyscale).
//!
//! A color transform multiplies every RGB pixel by a 3x3 matrix. The
//! coefficients for luma are the ITU-R BT.709 weights from
//! [`crate::luminance`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::luminance::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::operator::Percentage;
use crate::preview::with_split;
use crate::raster::{truncate_sample, Image};

/// A 3x3 matrix applied to `[R, G, B]` column vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// Classic sepia tone.
    pub const SEPIA: ColorMatrix = ColorMatrix([
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ]);

    /// BT.709 luma replicated into all three channels.
    pub const LUMA: ColorMatrix = ColorMatrix([
        [LUMINANCE_R, LUMINANCE_G, LUMINANCE_B],
        [LUMINANCE_R, LUMINANCE_G, LUMINANCE_B],
        [LUMINANCE_R, LUMINANCE_G, LUMINANCE_B],
    ]);

    pub const IDENTITY: ColorMatrix = ColorMatrix([
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);

    /// Multiply one pixel, truncating and clamping each component.
    #[inline]
    pub fn transform(&self, rgb: [i32; 3]) -> [i32; 3] {
        let [r, g, b] = rgb.map(f64::from);
        self.0
            .map(|row| truncate_sample(row[0] * r + row[1] * g + row[2] * b))
    }
}

/// Apply `matrix` to every pixel of a three-channel image.
///
/// With a `percentage` below 100 only the left part of the image is
/// transformed; the rest keeps its original values.
///
/// # Errors
///
/// `InvalidChannelCount` unless the image has exactly three channels.
pub fn apply_color_transform(
    image: &Image,
    matrix: &ColorMatrix,
    percentage: Option<Percentage>,
) -> Result<Image> {
    image.require_channels(3)?;

    let n = image.pixel_count();
    let (red, green, blue) = (image.channel(0), image.channel(1), image.channel(2));
    let mut out = vec![Vec::with_capacity(n), Vec::with_capacity(n), Vec::with_capacity(n)];

    for i in 0..n {
        let [r, g, b] = matrix.transform([red[i], green[i], blue[i]]);
        out[0].push(r);
        out[1].push(g);
        out[2].push(b);
    }

    let transformed = Image::from_parts(image.height(), image.width(), out);
    with_split(image, transformed, percentage)
}

/// Sepia tone at full width.
pub fn sepia(image: &Image) -> Result<Image> {
    apply_color_transform(image, &ColorMatrix::SEPIA, None)
}

/// Luma greyscale at full width.
pub fn greyscale(image: &Image) -> Result<Image> {
    apply_color_transform(image, &ColorMatrix::LUMA, None)
}
