use serde_json::Value;
use tracing::{info, warn};

use crate::labels::{LabelConfig, NameResolver};
use crate::models::{LabeledOutput, Strategy};
use crate::stages::{assemble, extract_lines, normalize_results};

/// Sentinel emitted when no strategy recovers any text. The formatting
/// path always produces a string, never an error.
pub const PROCESSING_FAILED: &str = "[transcript processing completely failed]";

/// Tuning knobs for a labeling run.
#[derive(Debug, Clone, Default)]
pub struct LabelerOptions {
    /// Apply the alternating-speaker sentence split to otherwise
    /// unlabeled transcripts. Off by default; see
    /// [`crate::stages::alternating_sentences`].
    pub split_sentences: bool,
}

/// Turns one raw transcription result into a speaker-attributed output
/// document.
///
/// Pure and synchronous: no I/O, no shared state, safe to invoke
/// concurrently on different inputs. Malformed input degrades through
/// the strategy chain instead of erroring.
pub struct TranscriptLabeler {
    resolver: NameResolver,
    options: LabelerOptions,
}

impl TranscriptLabeler {
    pub fn new(config: LabelConfig) -> Self {
        Self::with_options(config, LabelerOptions::default())
    }

    pub fn with_options(config: LabelConfig, options: LabelerOptions) -> Self {
        Self {
            resolver: NameResolver::new(config),
            options,
        }
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// Label one raw result document. Infallible: the worst malformed
    /// input still yields an output whose labeled transcript is the
    /// failure sentinel.
    pub fn label(&self, raw: Value) -> LabeledOutput {
        let results = normalize_results(&raw);
        let (strategy, lines) = extract_lines(
            results.as_ref(),
            &raw,
            &self.resolver,
            self.options.split_sentences,
        );
        info!(strategy = %strategy, lines = lines.len(), "labeled transcript");

        let transcript = results
            .as_ref()
            .and_then(|r| r.first_transcript())
            .map(str::to_string)
            .or_else(|| {
                raw.get("transcript")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let labeled_transcript = if lines.is_empty() {
            warn!("no text recoverable from any strategy");
            PROCESSING_FAILED.to_string()
        } else {
            assemble(&lines)
        };

        let speaker_segments = results
            .as_ref()
            .and_then(|r| r.speaker_labels.as_ref())
            .map(|labels| labels.segments.clone())
            .unwrap_or_default();

        // Channel streams are echoed only when the speaker branch was
        // not the one used.
        let channel_segments = if strategy == Strategy::SpeakerLabels {
            Vec::new()
        } else {
            results
                .as_ref()
                .and_then(|r| r.channel_labels.as_ref())
                .map(|labels| labels.channels.clone())
                .unwrap_or_default()
        };

        LabeledOutput {
            transcript,
            labeled_transcript,
            speaker_segments,
            channel_segments,
            full_result: raw,
        }
    }
}
