//! Serializable operation requests and their dispatch.
//!
//! Front ends describe what to run as an [`Operation`] value, typically
//! deserialized from JSON or a JavaScript object:
//!
//! ```json
//! { "op": "brighten", "amount": 10, "split": 50 }
//! { "op": "levels-adjust", "levels": { "black": 20, "mid": 100, "white": 240 } }
//! { "op": "merge" }
//! ```
//!
//! Operator fields use the validated types from [`crate::operator`], so a
//! request with an out-of-range value fails to deserialize instead of
//! reaching the engine. `split` is an optional preview percentage.

use serde::{Deserialize, Serialize};

use crate::channels::{merge, split_channel};
use crate::color::{apply_color_transform, ColorMatrix};
use crate::compress::compress;
use crate::error::{OperationError, Result};
use crate::filter::{apply_filter, Kernel};
use crate::offset::apply_brightness;
use crate::operator::{ChannelIndex, Levels, Percentage};
use crate::preview::with_split;
use crate::raster::Image;
use crate::representation::{
    channel_component, intensity_component, luma_component, value_component,
};
use crate::transform::{flip_horizontal, flip_vertical};
use crate::visualize::{adjust_levels, color_correct, render_histogram};

/// One engine operation with its operator values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Operation {
    Blur {
        split: Option<Percentage>,
    },
    Sharpen {
        split: Option<Percentage>,
    },
    /// Convolution with a caller-supplied kernel.
    Convolve {
        kernel: Kernel,
        split: Option<Percentage>,
    },
    Sepia {
        split: Option<Percentage>,
    },
    /// Luma greyscale replicated into all three channels.
    Greyscale {
        split: Option<Percentage>,
    },
    /// Color transform with a caller-supplied matrix.
    ColorTransform {
        matrix: ColorMatrix,
        split: Option<Percentage>,
    },
    ValueComponent,
    IntensityComponent,
    LumaComponent,
    RedComponent,
    GreenComponent,
    BlueComponent,
    Brighten {
        amount: i32,
        split: Option<Percentage>,
    },
    Compress {
        percentage: Percentage,
    },
    Histogram,
    LevelsAdjust {
        levels: Levels,
        split: Option<Percentage>,
    },
    ColorCorrect {
        split: Option<Percentage>,
    },
    /// Keep one channel, zeroing the others.
    SplitChannel {
        channel: ChannelIndex,
    },
    /// Combine channels from several source images.
    Merge,
    HorizontalFlip,
    VerticalFlip,
}

/// How many source images an operation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    AtLeastTwo,
}

impl Operation {
    /// Kebab-case name, as used in the `op` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Blur { .. } => "blur",
            Operation::Sharpen { .. } => "sharpen",
            Operation::Convolve { .. } => "convolve",
            Operation::Sepia { .. } => "sepia",
            Operation::Greyscale { .. } => "greyscale",
            Operation::ColorTransform { .. } => "color-transform",
            Operation::ValueComponent => "value-component",
            Operation::IntensityComponent => "intensity-component",
            Operation::LumaComponent => "luma-component",
            Operation::RedComponent => "red-component",
            Operation::GreenComponent => "green-component",
            Operation::BlueComponent => "blue-component",
            Operation::Brighten { .. } => "brighten",
            Operation::Compress { .. } => "compress",
            Operation::Histogram => "histogram",
            Operation::LevelsAdjust { .. } => "levels-adjust",
            Operation::ColorCorrect { .. } => "color-correct",
            Operation::SplitChannel { .. } => "split-channel",
            Operation::Merge => "merge",
            Operation::HorizontalFlip => "horizontal-flip",
            Operation::VerticalFlip => "vertical-flip",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operation::Merge => Arity::AtLeastTwo,
            _ => Arity::One,
        }
    }

    /// Run the operation on `sources`, returning a new image.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the number of sources does not match
    /// [`Operation::arity`]; otherwise whatever the operation itself reports.
    #[tracing::instrument(level = "debug", skip_all, fields(op = self.name(), sources = sources.len()))]
    pub fn apply(&self, sources: &[&Image]) -> Result<Image> {
        let image = match (self.arity(), sources) {
            (Arity::AtLeastTwo, _) => return merge(sources),
            (Arity::One, [image]) => *image,
            (Arity::One, _) => {
                return Err(OperationError::InvalidArgument(format!(
                    "{} takes exactly one source image, got {}",
                    self.name(),
                    sources.len()
                )))
            }
        };

        match self {
            Operation::Blur { split } => filtered(image, &Kernel::gaussian_blur(), *split),
            Operation::Sharpen { split } => filtered(image, &Kernel::sharpen(), *split),
            Operation::Convolve { kernel, split } => filtered(image, kernel, *split),
            Operation::Sepia { split } => {
                apply_color_transform(image, &ColorMatrix::SEPIA, *split)
            }
            Operation::Greyscale { split } => {
                apply_color_transform(image, &ColorMatrix::LUMA, *split)
            }
            Operation::ColorTransform { matrix, split } => {
                apply_color_transform(image, matrix, *split)
            }
            Operation::ValueComponent => value_component(image),
            Operation::IntensityComponent => intensity_component(image),
            Operation::LumaComponent => luma_component(image),
            Operation::RedComponent => channel_component(image, ChannelIndex::RED),
            Operation::GreenComponent => channel_component(image, ChannelIndex::GREEN),
            Operation::BlueComponent => channel_component(image, ChannelIndex::BLUE),
            Operation::Brighten { amount, split } => {
                with_split(image, apply_brightness(image, *amount), *split)
            }
            Operation::Compress { percentage } => compress(image, *percentage),
            Operation::Histogram => render_histogram(image),
            Operation::LevelsAdjust { levels, split } => {
                with_split(image, adjust_levels(image, *levels), *split)
            }
            Operation::ColorCorrect { split } => with_split(image, color_correct(image)?, *split),
            Operation::SplitChannel { channel } => split_channel(image, *channel),
            Operation::HorizontalFlip => Ok(flip_horizontal(image)),
            Operation::VerticalFlip => Ok(flip_vertical(image)),
            // Handled above by arity.
            Operation::Merge => merge(sources),
        }
    }
}

fn filtered(image: &Image, kernel: &Kernel, split: Option<Percentage>) -> Result<Image> {
    with_split(image, apply_filter(image, kernel)?, split)
}
