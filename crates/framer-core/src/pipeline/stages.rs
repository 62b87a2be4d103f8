//! Built-in processors: resolution filter and ratio crop/filter.
//!
//! Per-image failures never escape these functions. The image is dropped and
//! a warning is logged; everything else keeps its relative order.

use crate::combinators::{filter_concurrent, settle_all, CancelFlag};
use crate::error::PipelineResult;
use crate::geometry::{crop_by_ratio, reduce_to_ratio};
use crate::types::{Image, Ratio, Resolution};

use super::params::{RatioStage, ResolutionFilter, StageParams};

/// Keep images whose resolution passes `filter`.
pub async fn filter_by_resolution(
    images: Vec<Image>,
    filter: ResolutionFilter,
    cancel: &CancelFlag,
) -> Vec<Image> {
    if filter == ResolutionFilter::Off {
        return images;
    }
    keep_where(images, cancel, move |resolution| filter.passes(resolution)).await
}

/// Apply a ratio stage: pass through, crop, or filter by exact ratio.
pub async fn apply_ratio(images: Vec<Image>, stage: RatioStage, cancel: &CancelFlag) -> Vec<Image> {
    match stage {
        RatioStage::Off => images,
        RatioStage::Crop(ratio) => crop_all(images, ratio, cancel).await,
        RatioStage::FilterOnly(ratio) => {
            let target = ratio.reduced();
            keep_where(images, cancel, move |resolution| {
                reduce_to_ratio(resolution.width, resolution.height)
                    .map(|r| r == target)
                    .unwrap_or(false)
            })
            .await
        }
    }
}

/// Processor for a resolution-filter stage.
pub async fn process_resolution_stage(
    images: Vec<Image>,
    params: StageParams,
    cancel: CancelFlag,
) -> Vec<Image> {
    match params {
        StageParams::ResolutionFilter(filter) => filter_by_resolution(images, filter, &cancel).await,
        other => {
            tracing::error!("Resolution stage got {other}; passing images through");
            images
        }
    }
}

/// Processor for a ratio stage.
pub async fn process_ratio_stage(
    images: Vec<Image>,
    params: StageParams,
    cancel: CancelFlag,
) -> Vec<Image> {
    match params {
        StageParams::Ratio(stage) => apply_ratio(images, stage, &cancel).await,
        other => {
            tracing::error!("Ratio stage got {other}; passing images through");
            images
        }
    }
}

/// Concurrent metadata read + predicate; unreadable images are dropped.
async fn keep_where<P>(images: Vec<Image>, cancel: &CancelFlag, predicate: P) -> Vec<Image>
where
    P: Fn(Resolution) -> bool + Copy,
{
    let before = images.len();
    let kept = filter_concurrent(images, |image| async move {
        let verdict = match cancel.check(&image.file_name) {
            Ok(()) => image.data.read_metadata().await,
            Err(e) => Err(e),
        };
        let keep = match verdict {
            Ok(resolution) => predicate(resolution),
            Err(e) => {
                tracing::warn!("Dropping {}: {}", image.file_name, e);
                false
            }
        };
        (image, keep)
    })
    .await;
    tracing::debug!("  Filter kept {}/{} image(s)", kept.len(), before);
    kept
}

/// Crop every image concurrently; failures drop only that image.
async fn crop_all(images: Vec<Image>, ratio: Ratio, cancel: &CancelFlag) -> Vec<Image> {
    let before = images.len();
    let names: Vec<String> = images.iter().map(|i| i.file_name.clone()).collect();

    let outcomes = settle_all(images, |image| {
        let cancel = cancel.clone();
        async move { crop_one(image, ratio, &cancel).await }
    })
    .await;

    let cropped: Vec<Image> = outcomes
        .into_iter()
        .zip(names)
        .filter_map(|(outcome, name)| match outcome {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("Dropping {}: {}", name, e);
                None
            }
        })
        .collect();
    tracing::debug!("  Cropped {}/{} image(s) to {}", cropped.len(), before, ratio);
    cropped
}

async fn crop_one(image: Image, ratio: Ratio, cancel: &CancelFlag) -> PipelineResult<Image> {
    cancel.check(&image.file_name)?;
    crop_by_ratio(image, ratio).await
}
