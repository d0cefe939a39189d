//! Pixelkit Core - Image operation engine
//!
//! This crate provides the image operations behind pixelkit: convolution
//! filters, color transforms, single-channel representations, brightness
//! offset, wavelet compression, histogram rendering, levels, color correction
//! and channel split/merge. Every operation takes source images by reference
//! and returns a freshly allocated result.
//!
//! Images are stored as a list of channel planes of `i32` samples, see
//! [`Image`]. Operator values are validated when they are constructed (or
//! deserialized), see [`operator`]. The [`operation::Operation`] enum ties the
//! two together for front ends that describe work as data.

pub mod channels;
pub mod color;
pub mod compress;
pub mod decode;
pub mod encode;
pub mod error;
pub mod filter;
pub mod luminance;
pub mod offset;
pub mod operation;
pub mod operator;
pub mod preview;
pub mod raster;
pub mod registry;
pub mod representation;
pub mod transform;
pub mod visualize;

pub use channels::{merge, split_channel, split_rgb};
pub use color::{apply_color_transform, greyscale, sepia, ColorMatrix};
pub use compress::compress;
pub use error::{OperationError, Result};
pub use filter::{apply_filter, apply_filter_with_split, blur, sharpen, Kernel};
pub use offset::{apply_brightness, apply_brightness_with_split};
pub use operation::{Arity, Operation};
pub use operator::{ChannelIndex, Levels, Percentage};
pub use preview::composite;
pub use raster::{Image, MAX_SAMPLE};
pub use registry::{ImageRegistry, RegistryError};
pub use representation::{channel_component, intensity_component, luma_component, value_component};
pub use transform::{flip_horizontal, flip_vertical};
pub use visualize::{
    adjust_levels, adjust_levels_with_split, color_correct, color_correct_with_split,
    render_histogram,
};
