//! Single-channel representations of multi-channel images.
//!
//! Each function collapses the channels of an image into one greyscale
//! channel, pixel by pixel.

use crate::error::{OperationError, Result};
use crate::luminance::calculate_luminance;
use crate::operator::ChannelIndex;
use crate::raster::{truncate_sample, Image};

/// Per-pixel maximum across channels.
pub fn value_component(image: &Image) -> Result<Image> {
    collapse(image, |samples| samples.iter().copied().max().unwrap_or(0))
}

/// Per-pixel arithmetic mean across channels, rounded down.
pub fn intensity_component(image: &Image) -> Result<Image> {
    collapse(image, |samples| {
        let sum: i64 = samples.iter().map(|&v| v as i64).sum();
        sum.div_euclid(samples.len() as i64) as i32
    })
}

/// Per-pixel BT.709 luma, truncated.
pub fn luma_component(image: &Image) -> Result<Image> {
    image.require_channels(3)?;
    collapse(image, |s| truncate_sample(calculate_luminance(s[0], s[1], s[2])))
}

/// One channel of the image as a greyscale image.
pub fn channel_component(image: &Image, channel: ChannelIndex) -> Result<Image> {
    image.require_min_channels(2)?;
    let index = channel.index();
    if index >= image.channel_count() {
        return Err(OperationError::InvalidOperatorValue(format!(
            "channel {index} does not exist in a {}-channel image",
            image.channel_count()
        )));
    }
    Ok(Image::from_parts(
        image.height(),
        image.width(),
        vec![image.channel(index).to_vec()],
    ))
}

fn collapse(image: &Image, f: impl Fn(&[i32]) -> i32) -> Result<Image> {
    image.require_min_channels(2)?;

    let channels = image.channels();
    let mut pixel = vec![0; channels.len()];
    let mut out = Vec::with_capacity(image.pixel_count());
    for i in 0..image.pixel_count() {
        for (slot, channel) in pixel.iter_mut().zip(channels) {
            *slot = channel[i];
        }
        out.push(f(&pixel));
    }

    Ok(Image::from_parts(image.height(), image.width(), vec![out]))
}
