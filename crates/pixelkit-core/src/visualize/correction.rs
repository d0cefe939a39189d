//! Color correction by histogram peak alignment.
//!
//! A color cast shows up as the red, green and blue histograms peaking at
//! different tones. Each channel is shifted so its peak lands on the average
//! peak of the three channels.

use std::ops::Range;

use crate::channels::{merge, split_rgb};
use crate::error::Result;
use crate::offset::apply_brightness;
use crate::operator::Percentage;
use crate::preview::with_split;
use crate::raster::Image;

use super::histogram::channel_histograms;

/// Bins searched for a channel's peak. Peaks in the near-black and
/// near-white extremes are ignored.
pub const PEAK_BAND: Range<usize> = 10..245;

/// Bin with the highest count inside [`PEAK_BAND`] for red, green and blue.
///
/// Ties resolve to the lowest bin.
pub fn channel_peaks(image: &Image) -> Result<[usize; 3]> {
    let hist = channel_histograms(image)?;
    Ok(hist.channels().map(|bins| {
        let mut peak = PEAK_BAND.start;
        for bin in PEAK_BAND {
            if bins[bin] > bins[peak] {
                peak = bin;
            }
        }
        peak
    }))
}

/// Shift every channel so the histogram peaks of all three coincide.
///
/// # Errors
///
/// `InvalidChannelCount` unless the image has exactly three channels.
pub fn color_correct(image: &Image) -> Result<Image> {
    let peaks = channel_peaks(image)?;
    let average = (peaks.iter().sum::<usize>() / peaks.len()) as i32;
    tracing::debug!(?peaks, average, "aligning histogram peaks");

    let parts = split_rgb(image)?;
    let corrected: Vec<Image> = parts
        .iter()
        .zip(peaks)
        .map(|(channel, peak)| apply_brightness(channel, average - peak as i32))
        .collect();
    let refs: Vec<&Image> = corrected.iter().collect();
    merge(&refs)
}

/// Color-correct, then show the result only in the left `percentage` of the image.
pub fn color_correct_with_split(image: &Image, percentage: Percentage) -> Result<Image> {
    with_split(image, color_correct(image)?, Some(percentage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OperationError;

    /// 255 in one pixel anchors normalization; the rest sit at the given tones.
    fn cast_image(r: i32, g: i32, b: i32) -> Image {
        let mut channels = vec![vec![r; 16], vec![g; 16], vec![b; 16]];
        channels[0][15] = 255;
        Image::new(4, 4, channels).unwrap()
    }

    #[test]
    fn test_peaks() {
        let img = cast_image(100, 120, 140);
        assert_eq!(channel_peaks(&img).unwrap(), [100, 120, 140]);
    }

    #[test]
    fn test_peaks_ignore_extremes() {
        // Green is all zero except one pixel; its peak falls back to the band start.
        let mut channels = vec![vec![100; 16], vec![0; 16], vec![140; 16]];
        channels[1][0] = 255;
        let img = Image::new(4, 4, channels).unwrap();
        let peaks = channel_peaks(&img).unwrap();
        assert_eq!(peaks[1], PEAK_BAND.start);
    }

    #[test]
    fn test_correct_aligns_peaks() {
        let img = cast_image(100, 120, 140);
        let out = color_correct(&img).unwrap();
        // Average peak 120: red +20, green unchanged, blue -20
        assert_eq!(out.sample(0, 0, 0), 120);
        assert_eq!(out.sample(1, 0, 0), 120);
        assert_eq!(out.sample(2, 0, 0), 120);
        // The anchor pixel stays clamped at 255
        assert_eq!(out.sample(0, 3, 3), 255);
    }

    #[test]
    fn test_correct_split() {
        let img = cast_image(100, 120, 140);
        let out = color_correct_with_split(&img, Percentage::new(50).unwrap()).unwrap();
        assert_eq!(out.sample(2, 0, 1), 120);
        assert_eq!(out.sample(2, 0, 2), 140);
    }

    #[test]
    fn test_requires_three_channels() {
        let grey = Image::filled(2, 2, 1, 0).unwrap();
        assert!(matches!(
            color_correct(&grey),
            Err(OperationError::InvalidChannelCount { .. })
        ));
    }
}
