//! Histogram computation and rendering.
//!
//! Samples are first normalized against the brightest sample in the whole
//! image, so images whose samples never reach 255 still spread across all
//! bins. The rendered plot is a 256x256 RGB image with one line per channel
//! drawn in that channel.

use crate::error::Result;
use crate::raster::{clamp_sample, Image, MAX_SAMPLE};

/// Width and height of the rendered histogram plot.
pub const PLOT_SIZE: usize = 256;

const BINS: usize = 256;

/// Per-channel frequency counts over normalized samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Red channel histogram (256 bins)
    pub red: [u32; BINS],
    /// Green channel histogram (256 bins)
    pub green: [u32; BINS],
    /// Blue channel histogram (256 bins)
    pub blue: [u32; BINS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            red: [0; BINS],
            green: [0; BINS],
            blue: [0; BINS],
        }
    }
}

impl Histogram {
    pub fn channels(&self) -> [&[u32; BINS]; 3] {
        [&self.red, &self.green, &self.blue]
    }

    /// Find the maximum bin across all channels for normalization
    pub fn max_value(&self) -> u32 {
        self.channels()
            .iter()
            .flat_map(|c| c.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Bin heights scaled so the tallest bin across all channels is 255.
    pub fn scaled_heights(&self) -> [[i32; BINS]; 3] {
        let max = self.max_value() as u64;
        self.channels().map(|bins| {
            let mut heights = [0i32; BINS];
            if max > 0 {
                for (h, &count) in heights.iter_mut().zip(bins.iter()) {
                    *h = (count as u64 * MAX_SAMPLE as u64 / max) as i32;
                }
            }
            heights
        })
    }
}

/// Count normalized samples of a three-channel image.
///
/// Every sample is rescaled to `v * 255 / max`, where `max` is the largest
/// sample across all channels, before it is binned.
///
/// # Errors
///
/// `InvalidChannelCount` unless the image has exactly three channels.
pub fn channel_histograms(image: &Image) -> Result<Histogram> {
    image.require_channels(3)?;

    let global_max = image
        .channels()
        .iter()
        .flatten()
        .map(|&v| clamp_sample(v))
        .max()
        .unwrap_or(0);

    let mut hist = Histogram::default();
    let bins = [&mut hist.red, &mut hist.green, &mut hist.blue];
    for (channel, bins) in image.channels().iter().zip(bins) {
        for &v in channel {
            bins[normalize(clamp_sample(v), global_max)] += 1;
        }
    }
    Ok(hist)
}

#[inline]
fn normalize(value: i32, max: i32) -> usize {
    if max == 0 {
        0
    } else {
        (value * MAX_SAMPLE / max) as usize
    }
}

/// Render the red, green and blue histograms as a 256x256 line plot.
///
/// Bin `x` of each channel is plotted at column `x`, with height 0 on the
/// bottom row. Where two curves overlap and the third does not, the
/// lower-priority curve is hidden (red below green below blue) so the
/// overlap never shows as a blended color.
pub fn render_histogram(image: &Image) -> Result<Image> {
    let heights = channel_histograms(image)?.scaled_heights();

    let mut plots: Vec<Vec<i32>> = heights
        .iter()
        .map(|h| {
            let mut plot = vec![0; PLOT_SIZE * PLOT_SIZE];
            for x in 0..BINS - 1 {
                draw_line(
                    &mut plot,
                    (x as i32, plot_row(h[x])),
                    (x as i32 + 1, plot_row(h[x + 1])),
                );
            }
            plot
        })
        .collect();

    for i in 0..PLOT_SIZE * PLOT_SIZE {
        let [r, g, b] = resolve_overlap([plots[0][i], plots[1][i], plots[2][i]]);
        plots[0][i] = r;
        plots[1][i] = g;
        plots[2][i] = b;
    }

    Ok(Image::from_parts(PLOT_SIZE, PLOT_SIZE, plots))
}

#[inline]
fn plot_row(height: i32) -> i32 {
    (PLOT_SIZE as i32 - 1) - height
}

/// Hide the lower-priority channel when exactly two channels coincide.
#[inline]
fn resolve_overlap(pixel: [i32; 3]) -> [i32; 3] {
    let [r, g, b] = pixel;
    let mut out = pixel;
    if (r == g && g != b) || (r == b && b != g) {
        out[0] = 0;
    } else if g == b && r != g {
        out[1] = 0;
    }
    out
}

/// Bresenham line between two points of a `PLOT_SIZE` square raster.
fn draw_line(plot: &mut [i32], from: (i32, i32), to: (i32, i32)) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot[y as usize * PLOT_SIZE + x as usize] = MAX_SAMPLE;
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
