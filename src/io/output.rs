use std::path::Path;

use anyhow::{Context, Result};

use crate::labels::NameResolver;
use crate::models::LabeledOutput;
use crate::stages::{format_time_range, segment_text};

/// Write the output document as pretty-printed JSON.
pub fn write_output_json(output: &LabeledOutput, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, output).context("Failed to write output JSON")?;
    Ok(())
}

/// Render the plain-text report: the labeled transcript, the raw full
/// transcript, and (when the job produced speaker segments) a detailed
/// per-segment listing with time ranges and resolved display names.
pub fn render_report(output: &LabeledOutput, resolver: &NameResolver) -> String {
    let mut report = String::new();

    report.push_str("=== Labeled Transcript ===\n");
    report.push_str(&output.labeled_transcript);
    report.push_str("\n\n");

    report.push_str("=== Full Transcript ===\n");
    report.push_str(&output.transcript);
    report.push('\n');

    if !output.speaker_segments.is_empty() {
        report.push_str("\n=== Speaker Segments ===\n");
        for segment in &output.speaker_segments {
            let name = resolver.speaker_name(&segment.speaker_label);
            let range = format_time_range(segment.start_time, segment.end_time);
            let text = segment_text(&segment.items);
            report.push_str(&format!("{name} {range}: {text}\n"));
        }
    }

    report
}

/// Write the plain-text report to a file.
pub fn write_report(output: &LabeledOutput, resolver: &NameResolver, path: &Path) -> Result<()> {
    std::fs::write(path, render_report(output, resolver))
        .with_context(|| format!("Failed to write report: {:?}", path))
}
