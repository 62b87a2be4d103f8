//! In-memory image handles for unit tests.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::codec::ImageHandle;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{Image, Resolution};

/// Handle with a fixed resolution and switchable failures.
#[derive(Debug, Clone)]
pub(crate) struct MockImage {
    resolution: Resolution,
    fail_metadata: bool,
    fail_encode: bool,
}

impl MockImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: Resolution::new(width, height),
            fail_metadata: false,
            fail_encode: false,
        }
    }

    pub fn broken_metadata() -> Self {
        Self {
            fail_metadata: true,
            ..Self::new(1, 1)
        }
    }

    pub fn failing_encode(width: u32, height: u32) -> Self {
        Self {
            fail_encode: true,
            ..Self::new(width, height)
        }
    }
}

#[async_trait]
impl ImageHandle for MockImage {
    async fn read_metadata(&self) -> PipelineResult<Resolution> {
        if self.fail_metadata {
            return Err(PipelineError::Metadata {
                path: PathBuf::from("mock"),
                message: "corrupt header".to_string(),
            });
        }
        Ok(self.resolution)
    }

    fn resize(&self, target: Resolution) -> Box<dyn ImageHandle> {
        Box::new(Self {
            resolution: target,
            ..self.clone()
        })
    }

    async fn encode_to_file(&self, path: &Path) -> PipelineResult<Resolution> {
        if self.fail_encode {
            return Err(PipelineError::Encode {
                path: path.to_path_buf(),
                message: "disk full".to_string(),
            });
        }
        tokio::fs::write(path, self.resolution.to_string())
            .await
            .map_err(|e| PipelineError::Encode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(self.resolution)
    }
}

/// Build an `Image` around a mock handle.
pub(crate) fn mock(name: &str, handle: MockImage) -> Image {
    Image::new(name, Box::new(handle))
}

/// File names of a list of images, in order.
pub(crate) fn names(images: &[Image]) -> Vec<&str> {
    images.iter().map(|i| i.file_name.as_str()).collect()
}
