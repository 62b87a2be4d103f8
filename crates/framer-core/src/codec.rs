//! Lazy image handles backed by the `image` crate.
//!
//! A handle records transforms without touching pixels. Header reads are cheap
//! and run on the blocking pool with a timeout; the full decode happens once,
//! inside `encode_to_file`.

use async_trait::async_trait;
use image::imageops::FilterType;
use image::{GenericImageView, ImageReader};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::timeout;

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::Resolution;

/// Codec capability set every image handle provides.
#[async_trait]
pub trait ImageHandle: Send + Sync + fmt::Debug {
    /// Current resolution, including any pending transforms.
    async fn read_metadata(&self) -> PipelineResult<Resolution>;

    /// A new handle that fills `target` exactly (scale, then trim around the
    /// center). `self` is left untouched.
    fn resize(&self, target: Resolution) -> Box<dyn ImageHandle>;

    /// Decode, apply pending transforms and write to `path`. Returns the
    /// resolution written.
    async fn encode_to_file(&self, path: &Path) -> PipelineResult<Resolution>;

    /// File the pixels come from, when the handle is file-backed.
    fn source_path(&self) -> Option<&Path> {
        None
    }
}

/// File-backed handle with a queue of pending resizes.
#[derive(Debug, Clone)]
pub struct LazyImage {
    source: PathBuf,
    resizes: Vec<Resolution>,
    limits: LimitsConfig,
}

impl LazyImage {
    /// Wrap a file. Nothing is read until the handle is queried.
    pub fn open(source: impl Into<PathBuf>, limits: LimitsConfig) -> Self {
        Self {
            source: source.into(),
            resizes: Vec::new(),
            limits,
        }
    }

    /// Path of the source file.
    pub fn source(&self) -> &Path {
        &self.source
    }

    fn check_dimensions(&self, resolution: Resolution) -> PipelineResult<()> {
        let max_dim = self.limits.max_image_dimension;
        if resolution.width > max_dim || resolution.height > max_dim {
            return Err(PipelineError::ImageTooLarge {
                path: self.source.clone(),
                width: resolution.width,
                height: resolution.height,
                max_dim,
            });
        }
        Ok(())
    }

    /// Header-only dimension read (runs in spawn_blocking).
    fn read_dimensions_sync(path: &Path) -> PipelineResult<Resolution> {
        let reader = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| PipelineError::Metadata {
                path: path.to_path_buf(),
                message: format!("Cannot open image: {}", e),
            })?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| PipelineError::Metadata {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Resolution::new(width, height))
    }

    /// Full decode, transform and save (runs in spawn_blocking).
    fn encode_sync(
        source: &Path,
        resizes: &[Resolution],
        target: &Path,
        max_dim: u32,
    ) -> PipelineResult<Resolution> {
        let reader = ImageReader::open(source)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| PipelineError::Decode {
                path: source.to_path_buf(),
                message: format!("Cannot open image: {}", e),
            })?;
        let mut image = reader.decode().map_err(|e| PipelineError::Decode {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        if width > max_dim || height > max_dim {
            return Err(PipelineError::ImageTooLarge {
                path: source.to_path_buf(),
                width,
                height,
                max_dim,
            });
        }

        for size in resizes {
            image = image.resize_to_fill(size.width, size.height, FilterType::Lanczos3);
        }

        image.save(target).map_err(|e| PipelineError::Encode {
            path: target.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(Resolution::new(width, height))
    }
}

#[async_trait]
impl ImageHandle for LazyImage {
    async fn read_metadata(&self) -> PipelineResult<Resolution> {
        if let Some(last) = self.resizes.last() {
            return Ok(*last);
        }

        let path = self.source.clone();
        let timeout_ms = self.limits.decode_timeout_ms;
        let read_result = timeout(Duration::from_millis(timeout_ms), async {
            tokio::task::spawn_blocking(move || Self::read_dimensions_sync(&path)).await
        })
        .await;

        let resolution = match read_result {
            Ok(Ok(result)) => result?,
            Ok(Err(e)) => {
                return Err(PipelineError::Metadata {
                    path: self.source.clone(),
                    message: format!("Task join error: {}", e),
                })
            }
            Err(_) => {
                return Err(PipelineError::Timeout {
                    path: self.source.clone(),
                    stage: "metadata".to_string(),
                    timeout_ms,
                })
            }
        };

        self.check_dimensions(resolution)?;
        Ok(resolution)
    }

    fn source_path(&self) -> Option<&Path> {
        Some(&self.source)
    }

    fn resize(&self, target: Resolution) -> Box<dyn ImageHandle> {
        let mut next = self.clone();
        next.resizes.push(target);
        Box::new(next)
    }

    async fn encode_to_file(&self, path: &Path) -> PipelineResult<Resolution> {
        let source = self.source.clone();
        let resizes = self.resizes.clone();
        let target = path.to_path_buf();
        let max_dim = self.limits.max_image_dimension;
        let timeout_ms = self.limits.encode_timeout_ms;

        let encode_result = timeout(Duration::from_millis(timeout_ms), async {
            tokio::task::spawn_blocking(move || {
                Self::encode_sync(&source, &resizes, &target, max_dim)
            })
            .await
        })
        .await;

        match encode_result {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(PipelineError::Encode {
                path: path.to_path_buf(),
                message: format!("Task join error: {}", e),
            }),
            Err(_) => Err(PipelineError::Timeout {
                path: self.source.clone(),
                stage: "encode".to_string(),
                timeout_ms,
            }),
        }
    }
}
