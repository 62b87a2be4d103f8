//! The fixed question sequence of an interactive run.
//!
//! Each function is one parameter provider: input path, output path,
//! resolution filter, ratio stage.

use framer_core::paths::expand_path;
use framer_core::presets::{self, RATIOS};
use framer_core::{PromptError, Prompter, RatioStage, ResolutionFilter, SerialPrompter, StageParams};
use std::path::Path;

const FILTER_MODES: &[&str] = &["Off", "At least", "Exactly"];
const RATIO_MODES: &[&str] = &["Off", "Crop to ratio", "Only keep images already at ratio"];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pick<T: Copy>(choices: &[T], index: usize) -> Result<T, PromptError> {
    choices
        .get(index)
        .copied()
        .ok_or_else(|| PromptError::InvalidAnswer(format!("no choice at index {index}")))
}

pub async fn input_path<P: Prompter>(prompter: SerialPrompter<P>) -> Result<String, PromptError> {
    prompter.text("Input directory").await
}

/// Ask for the output directory. When it will be cleared and already has
/// entries, the user must confirm; declining aborts the run.
pub async fn output_path<P: Prompter>(
    prompter: SerialPrompter<P>,
    clear_existing: bool,
) -> Result<String, PromptError> {
    let raw = prompter.text("Output directory").await?;
    if clear_existing && has_entries(&expand_path(&raw)) {
        let message = format!("{} is not empty. Delete its contents?", raw.trim());
        if !prompter.confirm(&message, false).await? {
            return Err(PromptError::Declined);
        }
    }
    Ok(raw)
}

fn has_entries(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

pub async fn resolution_filter<P: Prompter>(
    prompter: SerialPrompter<P>,
) -> Result<StageParams, PromptError> {
    let mode = prompter
        .select("Filter by resolution", owned(FILTER_MODES))
        .await?;
    if mode == 0 {
        return Ok(ResolutionFilter::Off.into());
    }

    let choices: Vec<_> = presets::all_resolutions().collect();
    let labels = choices
        .iter()
        .map(|(resolution, group)| format!("{resolution} ({group})"))
        .collect();
    let index = prompter.autocomplete("Resolution", labels).await?;
    let (resolution, _) = pick(&choices, index)?;

    let filter = match mode {
        1 => ResolutionFilter::AtLeast(resolution),
        2 => ResolutionFilter::Exactly(resolution),
        other => return Err(PromptError::InvalidAnswer(format!("filter mode {other}"))),
    };
    Ok(filter.into())
}

pub async fn ratio_stage<P: Prompter>(
    prompter: SerialPrompter<P>,
) -> Result<StageParams, PromptError> {
    let mode = prompter.select("Aspect ratio", owned(RATIO_MODES)).await?;
    if mode == 0 {
        return Ok(RatioStage::Off.into());
    }

    let labels = RATIOS
        .iter()
        .map(|(ratio, hint)| format!("{ratio} ({hint})"))
        .collect();
    let index = prompter.autocomplete("Ratio", labels).await?;
    let (ratio, _) = pick(RATIOS, index)?;

    let stage = match mode {
        1 => RatioStage::Crop(ratio),
        2 => RatioStage::FilterOnly(ratio),
        other => return Err(PromptError::InvalidAnswer(format!("ratio mode {other}"))),
    };
    Ok(stage.into())
}
