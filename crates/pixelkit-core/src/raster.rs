//! The in-memory image representation shared by every operation.
//!
//! An [`Image`] is a stack of equally sized channels stored as row-major
//! `i32` samples. Single-channel images are greyscale; three-channel images
//! are red, green and blue in that order.

use crate::error::{OperationError, Result};

/// Largest sample value of a finished image.
pub const MAX_SAMPLE: i32 = 255;

/// An immutable multi-channel image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    height: usize,
    width: usize,
    channels: Vec<Vec<i32>>,
}

impl Image {
    /// Create an image from row-major channel buffers.
    ///
    /// # Errors
    ///
    /// * `InvalidDimensions` if `height` or `width` is zero or a channel's
    ///   length is not `height * width`
    /// * `InvalidChannelCount` if there are not exactly 1 or 3 channels
    pub fn new(height: usize, width: usize, channels: Vec<Vec<i32>>) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(OperationError::InvalidDimensions(format!(
                "height ({height}) and width ({width}) must be non-zero"
            )));
        }
        if channels.len() != 1 && channels.len() != 3 {
            return Err(OperationError::channels("1 or 3", channels.len()));
        }
        let expected = pixel_area(height, width)?;
        if let Some(bad) = channels.iter().find(|c| c.len() != expected) {
            return Err(OperationError::InvalidDimensions(format!(
                "channel has {} samples, expected {height}x{width} = {expected}",
                bad.len()
            )));
        }
        Ok(Self {
            height,
            width,
            channels,
        })
    }

    /// Create an image from nested grids indexed as `[channel][row][column]`.
    pub fn from_grids(grids: Vec<Vec<Vec<i32>>>) -> Result<Self> {
        let height = grids.first().map_or(0, Vec::len);
        let width = grids
            .first()
            .and_then(|rows| rows.first())
            .map_or(0, Vec::len);

        let mut channels = Vec::with_capacity(grids.len());
        for rows in grids {
            if rows.len() != height || rows.iter().any(|r| r.len() != width) {
                return Err(OperationError::InvalidDimensions(
                    "channels must be rectangular grids of equal size".to_string(),
                ));
            }
            channels.push(rows.into_iter().flatten().collect());
        }
        Self::new(height, width, channels)
    }

    /// Create an image where every sample holds `value`.
    pub fn filled(height: usize, width: usize, channel_count: usize, value: i32) -> Result<Self> {
        let area = pixel_area(height, width)?;
        Self::new(height, width, vec![vec![value; area]; channel_count])
    }

    /// Build an image whose shape has already been validated by the caller.
    pub(crate) fn from_parts(height: usize, width: usize, channels: Vec<Vec<i32>>) -> Self {
        debug_assert!(height > 0 && width > 0);
        debug_assert!(channels.len() == 1 || channels.len() == 3);
        debug_assert!(channels.iter().all(|c| c.len() == height * width));
        Self {
            height,
            width,
            channels,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of pixels in one channel.
    pub fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    /// Returns true for a three-channel (RGB) image.
    pub fn is_rgb(&self) -> bool {
        self.channels.len() == 3
    }

    /// Row-major samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index >= channel_count()`.
    pub fn channel(&self, index: usize) -> &[i32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<i32>] {
        &self.channels
    }

    /// One row of one channel.
    pub fn row(&self, channel: usize, row: usize) -> &[i32] {
        let start = row * self.width;
        &self.channels[channel][start..start + self.width]
    }

    /// Sample at `(row, column)` of `channel`.
    pub fn sample(&self, channel: usize, row: usize, column: usize) -> i32 {
        self.channels[channel][row * self.width + column]
    }

    /// Copy one channel out as `[row][column]`.
    pub fn channel_grid(&self, channel: usize) -> Vec<Vec<i32>> {
        self.channels[channel]
            .chunks_exact(self.width)
            .map(<[i32]>::to_vec)
            .collect()
    }

    pub fn into_channels(self) -> Vec<Vec<i32>> {
        self.channels
    }

    /// Apply `f` to every sample of every channel, producing a new image.
    pub fn map_samples(&self, f: impl Fn(i32) -> i32) -> Image {
        let channels = self
            .channels
            .iter()
            .map(|c| c.iter().map(|&v| f(v)).collect())
            .collect();
        Self::from_parts(self.height, self.width, channels)
    }

    /// Copy of this image with every sample clamped to `[0, 255]`.
    pub fn clamped(&self) -> Image {
        self.map_samples(clamp_sample)
    }

    /// Fail with `InvalidChannelCount` unless the image has exactly `count` channels.
    pub fn require_channels(&self, count: usize) -> Result<()> {
        if self.channel_count() != count {
            return Err(OperationError::channels(count.to_string(), self.channel_count()));
        }
        Ok(())
    }

    /// Fail with `InvalidChannelCount` unless the image has at least `count` channels.
    pub fn require_min_channels(&self, count: usize) -> Result<()> {
        if self.channel_count() < count {
            return Err(OperationError::channels(
                format!("at least {count}"),
                self.channel_count(),
            ));
        }
        Ok(())
    }

    pub(crate) fn same_shape(&self, other: &Image) -> bool {
        self.height == other.height && self.width == other.width
    }
}

/// `height * width`, or `InvalidDimensions` if it does not fit in `usize`.
pub fn pixel_area(height: usize, width: usize) -> Result<usize> {
    height.checked_mul(width).ok_or_else(|| {
        OperationError::InvalidDimensions(format!("{height}x{width} image is too large"))
    })
}

/// Clamp an integer sample to `[0, 255]`.
#[inline]
pub fn clamp_sample(value: i32) -> i32 {
    value.clamp(0, MAX_SAMPLE)
}

/// Truncate a real value toward zero and clamp it to `[0, 255]`.
#[inline]
pub fn truncate_sample(value: f64) -> i32 {
    value.clamp(0.0, MAX_SAMPLE as f64) as i32
}

/// Round a real value to the nearest integer and clamp it to `[0, 255]`.
#[inline]
pub fn round_sample(value: f64) -> i32 {
    value.round().clamp(0.0, MAX_SAMPLE as f64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_preserves_values() {
        let img = Image::new(2, 3, vec![vec![1, 2, 3, 4, 5, 6]]).unwrap();
        assert_eq!(img.height(), 2);
        assert_eq!(img.width(), 3);
        assert_eq!(img.channel_count(), 1);
        assert_eq!(img.channel(0), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(img.sample(0, 1, 2), 6);
        assert_eq!(img.row(0, 1), &[4, 5, 6]);
    }

    #[test]
    fn test_from_grids_round_trip() {
        let grids = vec![
            vec![vec![1, 2], vec![3, 4]],
            vec![vec![5, 6], vec![7, 8]],
            vec![vec![9, 10], vec![11, 12]],
        ];
        let img = Image::from_grids(grids.clone()).unwrap();
        assert!(img.is_rgb());
        for (c, grid) in grids.iter().enumerate() {
            assert_eq!(&img.channel_grid(c), grid);
        }
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = Image::new(0, 3, vec![vec![]]).unwrap_err();
        assert!(matches!(err, OperationError::InvalidDimensions(_)));
    }

    #[test]
    fn test_rejects_two_channels() {
        let err = Image::new(1, 1, vec![vec![0], vec![0]]).unwrap_err();
        assert!(matches!(err, OperationError::InvalidChannelCount { actual: 2, .. }));
    }

    #[test]
    fn test_rejects_mismatched_channel_length() {
        let err = Image::new(2, 2, vec![vec![0; 4], vec![0; 3], vec![0; 4]]).unwrap_err();
        assert!(matches!(err, OperationError::InvalidDimensions(_)));
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let huge = usize::MAX / 2 + 1;
        let err = Image::new(huge, 2, vec![vec![]]).unwrap_err();
        assert!(matches!(err, OperationError::InvalidDimensions(_)));
        let err = Image::filled(huge, 4, 1, 0).unwrap_err();
        assert!(matches!(err, OperationError::InvalidDimensions(_)));
        assert_eq!(pixel_area(3, 4).unwrap(), 12);
    }

    #[test]
    fn test_from_grids_rejects_ragged_rows() {
        let err = Image::from_grids(vec![vec![vec![1, 2], vec![3]]]).unwrap_err();
        assert!(matches!(err, OperationError::InvalidDimensions(_)));
    }

    #[test]
    fn test_clamped() {
        let img = Image::new(1, 3, vec![vec![-5, 100, 300]]).unwrap();
        assert_eq!(img.clamped().channel(0), &[0, 100, 255]);
        // Original untouched
        assert_eq!(img.channel(0), &[-5, 100, 300]);
    }

    #[test]
    fn test_require_channels() {
        let grey = Image::filled(2, 2, 1, 0).unwrap();
        assert!(grey.require_channels(1).is_ok());
        assert!(grey.require_channels(3).is_err());
        assert!(grey.require_min_channels(2).is_err());
    }

    #[test]
    fn test_sample_helpers() {
        assert_eq!(truncate_sample(148.9), 148);
        assert_eq!(truncate_sample(-3.2), 0);
        assert_eq!(truncate_sample(400.0), 255);
        assert_eq!(round_sample(127.5), 128);
        assert_eq!(round_sample(-0.4), 0);
    }
}
