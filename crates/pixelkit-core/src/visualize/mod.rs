//! Histogram-driven visualization and tonal correction.
//!
//! - [`histogram`] renders per-channel line plots of the tonal distribution
//! - [`levels`] remaps tones through a quadratic fitted to black/mid/white points
//! - [`correction`] aligns the histogram peaks of the three channels
//!
//! All three share the normalized histogram computed by
//! [`histogram::channel_histograms`].

pub mod correction;
pub mod histogram;
pub mod levels;

pub use correction::{color_correct, color_correct_with_split, channel_peaks, PEAK_BAND};
pub use histogram::{channel_histograms, render_histogram, Histogram, PLOT_SIZE};
pub use levels::{adjust_levels, adjust_levels_with_split, LevelsCurve};
