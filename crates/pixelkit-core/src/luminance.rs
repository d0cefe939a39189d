//! Luma weights using ITU-R BT.709 coefficients.
//!
//! Shared by the luma color matrix and the luma component image.

/// ITU-R BT.709 coefficient for the red channel.
pub const LUMINANCE_R: f64 = 0.2126;

/// ITU-R BT.709 coefficient for the green channel.
pub const LUMINANCE_G: f64 = 0.7152;

/// ITU-R BT.709 coefficient for the blue channel.
pub const LUMINANCE_B: f64 = 0.0722;

/// Weighted luma of one RGB sample triple, before any rounding.
#[inline]
pub fn calculate_luminance(r: i32, g: i32, b: i32) -> f64 {
    LUMINANCE_R * r as f64 + LUMINANCE_G * g as f64 + LUMINANCE_B * b as f64
}
