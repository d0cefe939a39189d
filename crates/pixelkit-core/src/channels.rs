//! Splitting images into channels and merging them back.

use crate::error::{OperationError, Result};
use crate::operator::ChannelIndex;
use crate::raster::Image;

/// Keep one channel and zero the others.
///
/// The result has the same channel count as the input.
///
/// # Errors
///
/// * `InvalidChannelCount` for single-channel images
/// * `InvalidOperatorValue` if `channel` does not exist in the image
pub fn split_channel(image: &Image, channel: ChannelIndex) -> Result<Image> {
    image.require_min_channels(2)?;
    let keep = channel.index();
    if keep >= image.channel_count() {
        return Err(OperationError::InvalidOperatorValue(format!(
            "channel {keep} does not exist in a {}-channel image",
            image.channel_count()
        )));
    }

    let channels = image
        .channels()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i == keep {
                c.clone()
            } else {
                vec![0; c.len()]
            }
        })
        .collect();
    Ok(Image::from_parts(image.height(), image.width(), channels))
}

/// Split a three-channel image into red, green and blue greyscale images.
pub fn split_rgb(image: &Image) -> Result<[Image; 3]> {
    image.require_channels(3)?;
    Ok([0, 1, 2].map(|c| {
        Image::from_parts(image.height(), image.width(), vec![image.channel(c).to_vec()])
    }))
}

/// Merge channels from several images into one.
///
/// Either every input is single-channel, in which case each contributes its
/// only channel in order, or every input has as many channels as there are
/// inputs, in which case input `i` contributes its channel `i`.
///
/// # Errors
///
/// * `InvalidArgument` for fewer than two inputs or inputs that fit neither layout
/// * `InvalidDimensions` if the inputs differ in height or width
/// * `InvalidChannelCount` if the merged image would not have 1 or 3 channels
pub fn merge(images: &[&Image]) -> Result<Image> {
    let Some((first, rest)) = images.split_first() else {
        return Err(OperationError::InvalidArgument(
            "merge needs at least two images".to_string(),
        ));
    };
    if rest.is_empty() {
        return Err(OperationError::InvalidArgument(
            "merge needs at least two images".to_string(),
        ));
    }
    if let Some(bad) = rest.iter().find(|img| !img.same_shape(first)) {
        return Err(OperationError::InvalidDimensions(format!(
            "cannot merge a {}x{} image with a {}x{} image",
            bad.height(),
            bad.width(),
            first.height(),
            first.width()
        )));
    }

    let count = images.len();
    let all_single = images.iter().all(|img| img.channel_count() == 1);
    let all_matching = images.iter().all(|img| img.channel_count() == count);

    let channels: Vec<Vec<i32>> = if all_single {
        images.iter().map(|img| img.channel(0).to_vec()).collect()
    } else if all_matching {
        images
            .iter()
            .enumerate()
            .map(|(i, img)| img.channel(i).to_vec())
            .collect()
    } else {
        return Err(OperationError::InvalidArgument(format!(
            "expected {count} single-channel images or {count} images with {count} channels"
        )));
    };

    Image::new(first.height(), first.width(), channels)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: merging the three split channels reproduces the image.
        #[test]
        fn prop_split_merge_identity(
            samples in proptest::collection::vec(0i32..=255, 3 * 12),
        ) {
            let channels: Vec<Vec<i32>> = samples.chunks(12).map(<[i32]>::to_vec).collect();
            let img = Image::new(3, 4, channels).unwrap();
            let parts: Vec<Image> = (0..3)
                .map(|c| split_channel(&img, ChannelIndex::new(c).unwrap()).unwrap())
                .collect();
            let refs: Vec<&Image> = parts.iter().collect();
            prop_assert_eq!(merge(&refs).unwrap(), img);
        }
    }
}
