//! The interactive run behind bare `framer`.
//!
//! Asks every question up front, then filters, crops and writes, printing one
//! line per written file and a summary box at the end.

use console::Style;
use framer_core::{Config, Pipeline, RunSummary, SerialPrompter, WriteOutcome};
use indicatif::{ProgressBar, ProgressStyle};

use super::prompter::DialoguerPrompter;
use super::questions;
use super::theme::print_banner;

/// Execute an interactive run.
pub async fn execute(config: Config) -> anyhow::Result<()> {
    print_banner();

    let prompter = SerialPrompter::new(DialoguerPrompter::new());
    let clear_existing = config.output.clear_existing;

    let pipeline = Pipeline::new(config)
        .register_resolution_filter({
            let prompter = prompter.clone();
            move || questions::resolution_filter(prompter)
        })
        .register_ratio({
            let prompter = prompter.clone();
            move || questions::ratio_stage(prompter)
        });

    // Ctrl+C during processing stops images that have not started yet.
    // While a prompt is active the terminal is in raw mode and dialoguer
    // reports the key itself.
    let cancel = pipeline.cancel_flag();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted; finishing images already in flight");
            cancel.cancel();
        }
    });

    let progress = create_progress_spinner();
    let on_write = {
        let progress = progress.clone();
        move |outcome: WriteOutcome<'_>| {
            progress.inc(1);
            progress.println(describe(&outcome));
        }
    };

    let result = pipeline
        .run(
            {
                let prompter = prompter.clone();
                move || questions::input_path(prompter)
            },
            move || questions::output_path(prompter, clear_existing),
            on_write,
        )
        .await;

    progress.finish_and_clear();
    interrupt.abort();

    let summary = result?;
    print_summary(&summary);
    Ok(())
}

fn describe(outcome: &WriteOutcome<'_>) -> String {
    match outcome {
        WriteOutcome::Written {
            image,
            path,
            resolution,
        } => {
            let ok = Style::new().for_stderr().green();
            let dim = Style::new().for_stderr().dim();
            format!(
                "  {} {} {}",
                ok.apply_to("✓"),
                path.display(),
                dim.apply_to(format!("({} from {})", resolution, image.file_name))
            )
        }
        WriteOutcome::Failed { image, error } => {
            let err = Style::new().for_stderr().red();
            format!("  {} {}: {}", err.apply_to("✗"), image.file_name, error)
        }
    }
}

/// Spinner for the write phase. The total is not known until processing ends.
fn create_progress_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {pos} written {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb
}

/// Print a formatted summary table after the run.
fn print_summary(summary: &RunSummary) {
    let dropped = summary.scanned - summary.kept;

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Scanned:      {:>8}", summary.scanned);
    if dropped > 0 {
        eprintln!("    Dropped:      {:>8}", dropped);
    }
    eprintln!("    Written:      {:>8}", summary.written);
    if summary.failed > 0 {
        eprintln!("    Failed:       {:>8}", summary.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:     {:>7.1}s", summary.elapsed.as_secs_f64());
    eprintln!("  ====================================");
}
