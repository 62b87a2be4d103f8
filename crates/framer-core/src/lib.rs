//! Framer Core - batch image framing library.
//!
//! Framer scans a directory for images, runs them through an ordered list of
//! stages (resolution filter, exact-ratio crop) and writes the survivors to an
//! output directory.
//!
//! # Architecture
//!
//! ```text
//! Scan → collect stage parameters → filter → crop → concurrent write
//! ```
//!
//! Every stage's parameters are collected before any image is touched. Per-image
//! failures drop that image (or count as a failed write) and never abort the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use framer_core::{Config, Pipeline, RatioStage, Ratio};
//!
//! #[tokio::main]
//! async fn main() -> framer_core::Result<()> {
//!     let ratio = Ratio::new(21, 9).expect("positive");
//!     let summary = Pipeline::new(Config::load()?)
//!         .register_ratio(move || async move { Ok(RatioStage::Crop(ratio).into()) })
//!         .run(
//!             || async { Ok("~/Pictures".to_string()) },
//!             || async { Ok("~/Pictures/framed".to_string()) },
//!             |_| {},
//!         )
//!         .await?;
//!     println!("Wrote {} image(s)", summary.written);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod catalog;
pub mod codec;
pub mod combinators;
pub mod config;
pub mod error;
pub mod geometry;
pub mod paths;
pub mod pipeline;
pub mod presets;
pub mod prompt;
pub mod scan;
pub mod types;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use catalog::ImageCatalog;
pub use codec::{ImageHandle, LazyImage};
pub use combinators::CancelFlag;
pub use config::Config;
pub use error::{
    ConfigError, FramerError, GeometryError, PipelineError, PipelineResult, PromptError, Result,
};
pub use pipeline::{Pipeline, RatioStage, ResolutionFilter, RunSummary, StageParams};
pub use prompt::{Prompter, SerialPrompter};
pub use types::{Image, Ratio, Resolution};
pub use writer::{write_images, WriteOptions, WriteOutcome};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_default_pipeline_is_empty() {
        let pipeline = Pipeline::new(Config::default());
        assert!(pipeline.is_empty());
        assert!(!pipeline.cancel_flag().is_cancelled());
    }
}
