//! Core data types flowing through the Framer pipeline.

use std::fmt;

use crate::codec::ImageHandle;
use crate::error::GeometryError;

/// Pixel dimensions of an image. Ordered by width, then height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Resolution {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Target aspect as a pair of positive integers, not necessarily reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    width: u32,
    height: u32,
}

impl Ratio {
    /// Build a ratio, rejecting zero parts.
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::NonPositive(width, height));
        }
        Ok(Self { width, height })
    }

    /// Compile-time constructor for preset tables. Panics during const
    /// evaluation if either part is zero.
    pub(crate) const fn of(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "ratio parts must be positive");
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The same aspect in lowest terms.
    pub fn reduced(&self) -> Self {
        // Both parts are positive, so reduction cannot fail.
        crate::geometry::reduce_to_ratio(self.width, self.height).unwrap_or(*self)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// One image travelling through the pipeline.
///
/// `data` is a lazy codec handle: nothing is decoded until a stage asks for
/// metadata or the writer encodes it. Images move by value between stages, so
/// exactly one stage owns a given handle at any time.
#[derive(Debug)]
pub struct Image {
    /// File name (no directory), preserved across stages
    pub file_name: String,
    /// Lazy codec handle
    pub data: Box<dyn ImageHandle>,
}

impl Image {
    pub fn new(file_name: impl Into<String>, data: Box<dyn ImageHandle>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }
}
