//! Pipeline orchestration - collects every stage's parameters, then folds the
//! catalog through the processors and hands the result to the writer.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::future::Future;
use std::time::{Duration, Instant};

use crate::catalog::ImageCatalog;
use crate::combinators::{reduce_sequential, try_collect_sequential, CancelFlag};
use crate::config::Config;
use crate::error::{FramerError, PromptError, Result};
use crate::paths::{expand_path, resolve_dir};
use crate::types::Image;
use crate::writer::{write_images, WriteOptions, WriteOutcome};

use super::params::StageParams;
use super::stages::{process_ratio_stage, process_resolution_stage};

type ProviderFn = Box<dyn FnOnce() -> BoxFuture<'static, std::result::Result<StageParams, PromptError>> + Send>;
type ProcessorFn = Box<dyn FnOnce(Vec<Image>, StageParams) -> BoxFuture<'static, Vec<Image>> + Send>;

/// A registered stage: where its parameters come from and what it does with
/// them.
pub struct PipelineStage {
    provider: ProviderFn,
    processor: ProcessorFn,
}

impl std::fmt::Debug for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineStage").finish_non_exhaustive()
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Images found by the scan
    pub scanned: usize,
    /// Images left after every processor
    pub kept: usize,
    /// Images written successfully
    pub written: usize,
    /// Images whose write failed
    pub failed: usize,
    /// Wall-clock time for the whole run
    pub elapsed: Duration,
}

/// Ordered list of stages plus the shared run state.
///
/// Stages are appended while configuring and consumed by [`Pipeline::run`].
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    cancel: CancelFlag,
    stages: Vec<PipelineStage>,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
            stages: Vec::new(),
        }
    }

    /// Flag shared with every per-image task of this pipeline.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Append a stage. The provider runs during parameter collection, the
    /// processor during processing; both exactly once.
    pub fn register<P, PF, F, FF>(mut self, provider: P, processor: F) -> Self
    where
        P: FnOnce() -> PF + Send + 'static,
        PF: Future<Output = std::result::Result<StageParams, PromptError>> + Send + 'static,
        F: FnOnce(Vec<Image>, StageParams) -> FF + Send + 'static,
        FF: Future<Output = Vec<Image>> + Send + 'static,
    {
        self.stages.push(PipelineStage {
            provider: Box::new(move || provider().boxed()),
            processor: Box::new(move |images, params| processor(images, params).boxed()),
        });
        self
    }

    /// Append the built-in resolution filter with its parameters from `provider`.
    pub fn register_resolution_filter<P, PF>(self, provider: P) -> Self
    where
        P: FnOnce() -> PF + Send + 'static,
        PF: Future<Output = std::result::Result<StageParams, PromptError>> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.register(provider, move |images, params| {
            process_resolution_stage(images, params, cancel)
        })
    }

    /// Append the built-in ratio stage with its parameters from `provider`.
    pub fn register_ratio<P, PF>(self, provider: P) -> Self
    where
        P: FnOnce() -> PF + Send + 'static,
        PF: Future<Output = std::result::Result<StageParams, PromptError>> + Send + 'static,
    {
        let cancel = self.cancel.clone();
        self.register(provider, move |images, params| {
            process_ratio_stage(images, params, cancel)
        })
    }

    /// Collect every stage's parameters in order, then run the processors.
    ///
    /// No processor starts before all parameters are known. A provider
    /// failure aborts with [`FramerError::ParamProvider`].
    pub async fn process(self, images: Vec<Image>) -> Result<Vec<Image>> {
        let (_, images) = self.process_inner(images).await?;
        Ok(images)
    }

    async fn process_inner(self, images: Vec<Image>) -> Result<(Config, Vec<Image>)> {
        let (providers, processors): (Vec<_>, Vec<_>) = self
            .stages
            .into_iter()
            .map(|stage| (stage.provider, stage.processor))
            .unzip();

        let params = try_collect_sequential(providers, |index, provider| async move {
            provider().await.map_err(|source| FramerError::ParamProvider {
                step: format!("stage {} parameters", index + 1),
                source,
            })
        })
        .await?;

        for (index, p) in params.iter().enumerate() {
            tracing::debug!("Stage {}: {}", index + 1, p);
        }

        let images = reduce_sequential(
            processors.into_iter().zip(params).enumerate(),
            images,
            |images, (index, (processor, params))| async move {
                let start = Instant::now();
                let before = images.len();
                let out = if params.is_off() {
                    images
                } else {
                    processor(images, params).await
                };
                tracing::debug!(
                    "Stage {} ({}) kept {}/{} in {:?}",
                    index + 1,
                    params,
                    out.len(),
                    before,
                    start.elapsed()
                );
                out
            },
        )
        .await;

        Ok((self.config, images))
    }

    fn bail_if_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(FramerError::Cancelled);
        }
        Ok(())
    }

    /// Run the whole job: load, collect parameters, process, write.
    ///
    /// `input` and `output` supply the raw directory strings. `on_write` is
    /// called once per image as its write settles. Images already inside the
    /// output directory are left out of the run. Cancelling before the write
    /// starts fails with [`FramerError::Cancelled`] and leaves the output
    /// directory untouched.
    pub async fn run<I, IF, O, OF, W>(self, input: I, output: O, on_write: W) -> Result<RunSummary>
    where
        I: FnOnce() -> IF,
        IF: Future<Output = std::result::Result<String, PromptError>>,
        O: FnOnce() -> OF,
        OF: Future<Output = std::result::Result<String, PromptError>>,
        W: Fn(WriteOutcome<'_>) + Send + Sync + 'static,
    {
        let start = Instant::now();

        // Load
        let raw_input = input().await.map_err(|source| FramerError::ParamProvider {
            step: "input path".to_string(),
            source,
        })?;
        let input_dir = resolve_dir(&raw_input)?;
        let mut catalog = ImageCatalog::load(&input_dir, &self.config).await?;
        self.bail_if_cancelled()?;

        // Parameters
        let raw_output = output().await.map_err(|source| FramerError::ParamProvider {
            step: "output path".to_string(),
            source,
        })?;
        let output_dir = expand_path(&raw_output);
        self.bail_if_cancelled()?;

        let excluded = catalog.exclude_under(&output_dir);
        if excluded > 0 {
            tracing::info!(
                "Skipping {} image(s) already inside output directory {:?}",
                excluded,
                output_dir
            );
        }
        let scanned = catalog.len();
        tracing::info!("Found {} image(s) in {:?}", scanned, input_dir);

        let cancel = self.cancel.clone();
        let (config, images) = self.process_inner(catalog.into_images()).await?;
        let kept = images.len();
        tracing::info!("{}/{} image(s) left after processing", kept, scanned);
        if cancel.is_cancelled() {
            return Err(FramerError::Cancelled);
        }

        // Delivery
        let options = WriteOptions {
            clear_existing: config.output.clear_existing,
            input_dir: Some(input_dir),
        };
        let written = write_images(images, &output_dir, &options, &cancel, on_write).await?;

        let summary = RunSummary {
            scanned,
            kept,
            written,
            failed: kept - written,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            "Done: {} scanned, {} kept, {} written, {} failed in {:?}",
            summary.scanned,
            summary.kept,
            summary.written,
            summary.failed,
            summary.elapsed
        );
        Ok(summary)
    }
}
