//! Concurrent delivery of the final image list.
//!
//! The output directory is prepared first (fatal on failure), then every image
//! is encoded in its own task. All outcomes are collected; one failing or slow
//! image never hides the others.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::combinators::{settle_all, CancelFlag};
use crate::error::{FramerError, PipelineError, Result};
use crate::paths;
use crate::types::{Image, Resolution};

/// How the output directory is treated before writing.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Remove existing entries first
    pub clear_existing: bool,
    /// Refuse an output directory that equals or contains this path
    pub input_dir: Option<PathBuf>,
}

/// Outcome of one image's write, reported as soon as it settles.
#[derive(Debug)]
pub enum WriteOutcome<'a> {
    Written {
        image: &'a Image,
        path: &'a Path,
        resolution: Resolution,
    },
    Failed {
        image: &'a Image,
        error: &'a PipelineError,
    },
}

/// Prepare `dir`, then write every image concurrently.
///
/// `on_outcome` runs inside each write task once that image settles. Returns
/// the number of images written successfully. A run cancelled before this
/// point fails with [`FramerError::Cancelled`] and leaves `dir` alone.
pub async fn write_images<F>(
    images: Vec<Image>,
    dir: &Path,
    options: &WriteOptions,
    cancel: &CancelFlag,
    on_outcome: F,
) -> Result<usize>
where
    F: Fn(WriteOutcome<'_>) + Send + Sync + 'static,
{
    if cancel.is_cancelled() {
        return Err(FramerError::Cancelled);
    }
    prepare_output_dir(dir, options).await?;

    let attempted = images.len();
    let targets = unique_targets(&images, dir);
    let on_outcome = Arc::new(on_outcome);

    let jobs: Vec<(Image, PathBuf)> = images.into_iter().zip(targets).collect();
    let outcomes = settle_all(jobs, |(image, target)| {
        let cancel = cancel.clone();
        let on_outcome = on_outcome.clone();
        async move {
            let result = match cancel.check(&image.file_name) {
                Ok(()) => image.data.encode_to_file(&target).await,
                Err(e) => Err(e),
            };
            match &result {
                Ok(resolution) => on_outcome(WriteOutcome::Written {
                    image: &image,
                    path: &target,
                    resolution: *resolution,
                }),
                Err(error) => on_outcome(WriteOutcome::Failed {
                    image: &image,
                    error,
                }),
            }
            result
        }
    })
    .await;

    let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
    let failed = attempted - succeeded;
    tracing::info!(
        "Wrote {}/{} image(s) to {:?}",
        succeeded,
        attempted,
        dir
    );
    if failed > 0 {
        tracing::warn!("{} image(s) failed to write", failed);
    }

    Ok(succeeded)
}

/// Create `dir` if missing, or clear it if `options.clear_existing`.
pub async fn prepare_output_dir(dir: &Path, options: &WriteOptions) -> Result<()> {
    let fail = |reason: String| FramerError::OutputDirectory {
        path: dir.to_path_buf(),
        reason,
    };

    if let Some(input) = &options.input_dir {
        if paths::contains(dir, input) {
            return Err(fail(format!(
                "it contains the input directory {}",
                input.display()
            )));
        }
    }

    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {
            if options.clear_existing {
                tracing::debug!("Clearing output directory {:?}", dir);
                clear_dir(dir).await.map_err(|e| fail(e.to_string()))?;
            }
        }
        Ok(_) => return Err(fail("path exists and is not a directory".to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Creating output directory {:?}", dir);
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| fail(e.to_string()))?;
        }
        Err(e) => return Err(fail(e.to_string())),
    }

    Ok(())
}

async fn clear_dir(dir: &Path) -> std::io::Result<()> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            tokio::fs::remove_dir_all(entry.path()).await?;
        } else {
            tokio::fs::remove_file(entry.path()).await?;
        }
    }
    Ok(())
}

/// One target path per image; repeated names get `-1`, `-2`, ... before the
/// extension. `Image::file_name` itself is left alone.
fn unique_targets(images: &[Image], dir: &Path) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    images
        .iter()
        .map(|image| {
            let mut name = image.file_name.clone();
            let mut n = 0;
            while !taken.insert(name.clone()) {
                n += 1;
                name = numbered(&image.file_name, n);
            }
            dir.join(name)
        })
        .collect()
}

fn numbered(file_name: &str, n: usize) -> String {
    let path = Path::new(file_name);
    match (
        path.file_stem().and_then(|s| s.to_str()),
        path.extension().and_then(|e| e.to_str()),
    ) {
        (Some(stem), Some(ext)) => format!("{stem}-{n}.{ext}"),
        _ => format!("{file_name}-{n}"),
    }
}
