//! Per-stage parameters collected before any image is touched.

use std::fmt;

use crate::types::{Ratio, Resolution};

/// Resolution filter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionFilter {
    Off,
    /// Both sides at least as large as the target
    AtLeast(Resolution),
    /// Both sides equal to the target
    Exactly(Resolution),
}

impl ResolutionFilter {
    /// Whether an image of `resolution` survives the filter.
    pub fn passes(&self, resolution: Resolution) -> bool {
        match *self {
            ResolutionFilter::Off => true,
            ResolutionFilter::AtLeast(target) => {
                resolution.width >= target.width && resolution.height >= target.height
            }
            ResolutionFilter::Exactly(target) => resolution == target,
        }
    }
}

impl fmt::Display for ResolutionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionFilter::Off => write!(f, "off"),
            ResolutionFilter::AtLeast(r) => write!(f, "at least {r}"),
            ResolutionFilter::Exactly(r) => write!(f, "exactly {r}"),
        }
    }
}

/// Ratio stage settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioStage {
    Off,
    /// Crop every image to the largest exact fit of the ratio
    Crop(Ratio),
    /// Keep only images whose reduced ratio already matches; no pixels change
    FilterOnly(Ratio),
}

impl fmt::Display for RatioStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioStage::Off => write!(f, "off"),
            RatioStage::Crop(r) => write!(f, "crop to {r}"),
            RatioStage::FilterOnly(r) => write!(f, "only {r}"),
        }
    }
}

/// Closed set of parameters, one variant per stage kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageParams {
    ResolutionFilter(ResolutionFilter),
    Ratio(RatioStage),
}

impl StageParams {
    /// True when the stage should hand its input through untouched.
    pub fn is_off(&self) -> bool {
        matches!(
            self,
            StageParams::ResolutionFilter(ResolutionFilter::Off) | StageParams::Ratio(RatioStage::Off)
        )
    }
}

impl From<ResolutionFilter> for StageParams {
    fn from(filter: ResolutionFilter) -> Self {
        StageParams::ResolutionFilter(filter)
    }
}

impl From<RatioStage> for StageParams {
    fn from(stage: RatioStage) -> Self {
        StageParams::Ratio(stage)
    }
}

impl fmt::Display for StageParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageParams::ResolutionFilter(p) => write!(f, "resolution filter {p}"),
            StageParams::Ratio(p) => write!(f, "ratio {p}"),
        }
    }
}
