//! Error types for the Framer image pipeline.
//!
//! Fatal errors (`FramerError`) abort a run and surface at the entry point.
//! Per-image errors (`PipelineError`) stay inside the stage that produced them:
//! the image is dropped (filter/crop) or reported as failed (write).

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{Ratio, Resolution};

/// Top-level error type for Framer operations.
#[derive(Error, Debug)]
pub enum FramerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input path is missing or is not a directory
    #[error("Input path is not an existing directory: {}", path.display())]
    InputPath { path: PathBuf },

    /// Scanning the input directory failed
    #[error("Failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An interactive parameter step failed
    #[error("Failed to collect {step}: {source}")]
    ParamProvider {
        step: String,
        #[source]
        source: PromptError,
    },

    /// Output directory could not be prepared
    #[error("Cannot prepare output directory {}: {reason}", path.display())]
    OutputDirectory { path: PathBuf, reason: String },

    /// The run was interrupted before the output directory was touched
    #[error("Run cancelled")]
    Cancelled,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-image failures. Never abort a run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Reading the image header failed
    #[error("Metadata read failed for {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// Encoding or saving the result failed
    #[error("Encode failed for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// The ratio does not fit even once into the image
    #[error("Cannot crop {file_name} ({resolution}) to {ratio}: ratio exceeds image size")]
    DegenerateCrop {
        file_name: String,
        resolution: Resolution,
        ratio: Ratio,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {path} after {timeout_ms}ms")]
    Timeout {
        path: PathBuf,
        stage: String,
        timeout_ms: u64,
    },

    /// A spawned per-image task died before reporting
    #[error("Task failed: {0}")]
    Task(String),

    /// The run was cancelled before this image was handled
    #[error("Cancelled before processing {file_name}")]
    Cancelled { file_name: String },
}

/// Errors from the ratio arithmetic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("ratio and gcd operands must be positive (got {0} and {1})")]
    NonPositive(u32, u32),
}

/// Errors from the interactive collaborator.
#[derive(Error, Debug)]
pub enum PromptError {
    /// The user pressed Ctrl+C / Esc
    #[error("interrupted by user")]
    Interrupted,

    /// The user declined to continue
    #[error("declined by user")]
    Declined,

    /// The answer was not acceptable
    #[error("invalid answer: {0}")]
    InvalidAnswer(String),

    /// Terminal I/O failed
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    /// The prompt task died
    #[error("prompt task failed: {0}")]
    Task(String),
}

/// Convenience type alias for Framer results.
pub type Result<T> = std::result::Result<T, FramerError>;

/// Convenience type alias for per-image results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
