use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ChannelStream, SpeakerSegment};

/// One speaker-attributed line of the labeled transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledLine {
    /// Friendly display label, already resolved.
    pub label: String,
    /// Trimmed text: words joined by single spaces, punctuation attached
    /// without a preceding space.
    pub text: String,
}

/// Which label source produced the transcript, selected once per
/// invocation in fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Diarization segments were present and usable.
    SpeakerLabels,
    /// No usable speaker segments; turns derived from channel streams.
    ChannelLabels,
    /// Neither label source usable; the flat transcript text as one line.
    FlatFallback,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::SpeakerLabels => "speaker_labels",
            Strategy::ChannelLabels => "channel_labels",
            Strategy::FlatFallback => "flat_fallback",
        };
        f.write_str(name)
    }
}

/// The persisted labeling result for one transcription job.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LabeledOutput {
    /// Plain full transcript as delivered by the job.
    pub transcript: String,
    /// Speaker-attributed rendering, one blank-line-separated line per turn.
    pub labeled_transcript: String,
    /// Diarization segments, empty when the job produced none.
    #[serde(default)]
    pub speaker_segments: Vec<SpeakerSegment>,
    /// Channel streams, carried only when the speaker-label branch was
    /// not used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_segments: Vec<ChannelStream>,
    /// The raw result document, verbatim, for audit and re-processing.
    pub full_result: Value,
}
