//! Validated operator values.
//!
//! Each operation family takes a typed operator instead of a loosely typed
//! parameter. Values are checked once, at construction, so the operations
//! themselves never see an out-of-range operator. All operator types
//! deserialize through `TryFrom`, so the same checks apply to configuration
//! coming in as JSON or JavaScript objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{OperationError, Result};

/// An integer percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Percentage(u8);

impl Percentage {
    pub const FULL: Percentage = Percentage(100);
    pub const ZERO: Percentage = Percentage(0);

    /// Validate a percentage.
    ///
    /// # Errors
    ///
    /// `InvalidOperatorValue` if `value` is outside `[0, 100]`.
    pub fn new(value: i64) -> Result<Self> {
        if !(0..=100).contains(&value) {
            return Err(OperationError::InvalidOperatorValue(format!(
                "percentage must be between 0 and 100, got {value}"
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The split column `⌊width · p / 100⌋` for an image of the given width.
    pub fn split_column(self, width: usize) -> usize {
        width * self.0 as usize / 100
    }

    pub fn is_full(self) -> bool {
        self.0 == 100
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<i64> for Percentage {
    type Error = OperationError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Percentage> for i64 {
    fn from(p: Percentage) -> Self {
        p.0 as i64
    }
}

impl FromStr for Percentage {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(parse_int(s)?)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Index of a color channel: 0 = red, 1 = green, 2 = blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ChannelIndex(u8);

impl ChannelIndex {
    pub const RED: ChannelIndex = ChannelIndex(0);
    pub const GREEN: ChannelIndex = ChannelIndex(1);
    pub const BLUE: ChannelIndex = ChannelIndex(2);

    pub fn new(value: i64) -> Result<Self> {
        if !(0..=2).contains(&value) {
            return Err(OperationError::InvalidOperatorValue(format!(
                "channel index must be 0, 1 or 2, got {value}"
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<i64> for ChannelIndex {
    type Error = OperationError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ChannelIndex> for i64 {
    fn from(c: ChannelIndex) -> Self {
        c.0 as i64
    }
}

impl FromStr for ChannelIndex {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Self::RED),
            "green" => Ok(Self::GREEN),
            "blue" => Ok(Self::BLUE),
            other => Self::new(parse_int(other)?),
        }
    }
}

/// Black, mid and white control points for level adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevels")]
pub struct Levels {
    black: i32,
    mid: i32,
    white: i32,
}

#[derive(Deserialize)]
struct RawLevels {
    black: i32,
    mid: i32,
    white: i32,
}

impl Levels {
    /// Validate level control points.
    ///
    /// # Errors
    ///
    /// * `InvalidOperatorValue` if any point lies outside `[0, 255]`
    /// * `InvalidOrdering` unless `black < mid < white`
    pub fn new(black: i32, mid: i32, white: i32) -> Result<Self> {
        for (name, v) in [("black", black), ("mid", mid), ("white", white)] {
            if !(0..=255).contains(&v) {
                return Err(OperationError::InvalidOperatorValue(format!(
                    "{name} level must be between 0 and 255, got {v}"
                )));
            }
        }
        if !(black < mid && mid < white) {
            return Err(OperationError::InvalidOrdering { black, mid, white });
        }
        Ok(Self { black, mid, white })
    }

    pub fn black(self) -> i32 {
        self.black
    }

    pub fn mid(self) -> i32 {
        self.mid
    }

    pub fn white(self) -> i32 {
        self.white
    }
}

impl TryFrom<RawLevels> for Levels {
    type Error = OperationError;

    fn try_from(raw: RawLevels) -> Result<Self> {
        Self::new(raw.black, raw.mid, raw.white)
    }
}

impl FromStr for Levels {
    type Err = OperationError;

    /// Parse three whitespace- or comma-separated integers.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 {
            return Err(OperationError::InvalidOperatorValue(format!(
                "expected three level values, got {:?}",
                s
            )));
        }
        let level = |s: &str| -> Result<i32> {
            let value = parse_int(s)?;
            i32::try_from(value).map_err(|_| {
                OperationError::InvalidOperatorValue(format!("level {value} is out of range"))
            })
        };
        Self::new(level(parts[0])?, level(parts[1])?, level(parts[2])?)
    }
}

/// Parse a signed integer operator, mapping failures to `InvalidOperatorValue`.
pub fn parse_int(s: &str) -> Result<i64> {
    s.trim().parse::<i64>().map_err(|_| {
        OperationError::InvalidOperatorValue(format!("expected an integer, got {:?}", s))
    })
}
