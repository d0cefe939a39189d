//! Geometric transforms.
//!
//! Only mirror flips are provided; they keep the image size and touch every
//! channel the same way.

mod flip;

pub use flip::{flip_horizontal, flip_vertical};
