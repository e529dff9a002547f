//! CLI output formatting

use crate::core::Pipeline;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");

/// Format a discovered pipeline for display
pub fn format_pipeline(pipeline: &Pipeline) -> String {
    let status = if pipeline.enabled() {
        style("enabled").green().to_string()
    } else {
        style("disabled").dim().to_string()
    };

    let mut line = format!(
        "{} {} ({}) - {}",
        CHECK,
        style(pipeline.name()).bold(),
        status,
        style(pipeline.source().display()).dim()
    );

    if !pipeline.matchers().is_empty() {
        line.push_str(&format!(
            "\n    matchers: {}",
            style(pipeline.matchers().join(", ")).cyan()
        ));
    }
    if let Some(contents_file) = pipeline.contents_file() {
        line.push_str(&format!(
            "\n    contents: {}",
            style(contents_file.display()).dim()
        ));
    }

    line
}

/// Format a count of pipelines with the right plural
pub fn format_pipeline_count(count: usize) -> String {
    let noun = if count == 1 { "pipeline" } else { "pipelines" };
    format!("{} {}", style(count).cyan(), noun)
}
