// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Physical container specification: size, height and type.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Nominal container length in feet. Only 20 and 40 foot boxes are stacked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum ContainerSize {
    Twenty,
    Forty,
}

impl ContainerSize {
    #[inline]
    pub const fn feet(self) -> u16 {
        match self {
            ContainerSize::Twenty => 20,
            ContainerSize::Forty => 40,
        }
    }

    #[inline]
    pub const fn is_pair(self) -> bool {
        matches!(self, ContainerSize::Forty)
    }
}

impl TryFrom<u16> for ContainerSize {
    type Error = UnsupportedContainerSizeError;

    fn try_from(feet: u16) -> Result<Self, Self::Error> {
        match feet {
            20 => Ok(ContainerSize::Twenty),
            40 => Ok(ContainerSize::Forty),
            other => Err(UnsupportedContainerSizeError::new(other)),
        }
    }
}

impl From<ContainerSize> for u16 {
    fn from(size: ContainerSize) -> Self {
        size.feet()
    }
}

impl Display for ContainerSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ft", self.feet())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("Unsupported container size {feet}ft (expected 20 or 40)")]
pub struct UnsupportedContainerSizeError {
    feet: u16,
}

impl UnsupportedContainerSizeError {
    #[inline]
    pub fn new(feet: u16) -> Self {
        Self { feet }
    }

    #[inline]
    pub fn feet(&self) -> u16 {
        self.feet
    }
}

const TENTHS_TOLERANCE: f64 = 1e-6;

/// Container height, held as tenths of a foot so that plan matching is an
/// exact integer comparison (`8.5` feet is `85`).
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ContainerHeight(u16);

impl ContainerHeight {
    #[inline]
    pub const fn from_tenths(tenths: u16) -> Self {
        ContainerHeight(tenths)
    }

    #[inline]
    pub const fn tenths(self) -> u16 {
        self.0
    }

    /// Converts `feet` to tenths. Values that are not a whole number of
    /// tenths, beyond float noise, are rejected rather than rounded.
    pub fn from_feet(feet: f64) -> Result<Self, InvalidContainerHeightError> {
        if !feet.is_finite() || feet <= 0.0 {
            return Err(InvalidContainerHeightError::new(feet));
        }
        let scaled = feet * 10.0;
        let tenths = scaled.round();
        if (scaled - tenths).abs() > TENTHS_TOLERANCE
            || tenths < 1.0
            || tenths > f64::from(u16::MAX)
        {
            return Err(InvalidContainerHeightError::new(feet));
        }
        Ok(ContainerHeight(tenths as u16))
    }

    #[inline]
    pub fn feet(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl TryFrom<f64> for ContainerHeight {
    type Error = InvalidContainerHeightError;

    fn try_from(feet: f64) -> Result<Self, Self::Error> {
        ContainerHeight::from_feet(feet)
    }
}

impl From<ContainerHeight> for f64 {
    fn from(h: ContainerHeight) -> Self {
        h.feet()
    }
}

impl Display for ContainerHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}ft", self.0 / 10, self.0 % 10)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("Invalid container height {feet} feet")]
pub struct InvalidContainerHeightError {
    feet: f64,
}

impl InvalidContainerHeightError {
    #[inline]
    pub fn new(feet: f64) -> Self {
        Self { feet }
    }

    #[inline]
    pub fn feet(&self) -> f64 {
        self.feet
    }
}

/// ISO type group of a container, e.g. `GP`, `HC` or `RF`. Compared verbatim.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerType(String);

impl ContainerType {
    #[inline]
    pub fn new(code: impl Into<String>) -> Self {
        ContainerType(code.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContainerType {
    fn from(code: &str) -> Self {
        ContainerType::new(code)
    }
}

impl Display for ContainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a plan matches a container on.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContainerSpec {
    size: ContainerSize,
    height: ContainerHeight,
    #[serde(rename = "type")]
    kind: ContainerType,
}

impl ContainerSpec {
    #[inline]
    pub fn new(size: ContainerSize, height: ContainerHeight, kind: ContainerType) -> Self {
        Self { size, height, kind }
    }

    #[inline]
    pub fn size(&self) -> ContainerSize {
        self.size
    }

    #[inline]
    pub fn height(&self) -> ContainerHeight {
        self.height
    }

    #[inline]
    pub fn kind(&self) -> &ContainerType {
        &self.kind
    }
}

impl Display for ContainerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.size, self.height, self.kind)
    }
}
