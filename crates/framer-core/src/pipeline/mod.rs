//! Stage-based image pipeline.
//!
//! - **params**: per-stage parameter types
//! - **stages**: built-in resolution filter and ratio processors
//! - **processor**: stage registry and the load / collect / process / write run

pub mod params;
pub mod processor;
pub mod stages;

pub use params::{RatioStage, ResolutionFilter, StageParams};
pub use processor::{Pipeline, PipelineStage, RunSummary};
pub use stages::{apply_ratio, filter_by_resolution};
