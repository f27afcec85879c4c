use serde::{Deserialize, Deserializer, Serialize};

/// Normalized `results` payload of a batch transcription job.
///
/// Any of the three label sources may be absent; the extractor decides
/// which one to trust. All fields default so that a sparse or partial
/// document still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TranscriptionResults {
    #[serde(default)]
    pub transcripts: Vec<TranscriptAlternative>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_labels: Option<SpeakerLabels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_labels: Option<ChannelLabels>,
}

/// One full-text transcription hypothesis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TranscriptAlternative {
    #[serde(default)]
    pub transcript: String,
}

/// Speaker-diarization block: time-bounded segments attributed to speakers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SpeakerLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speakers: Option<u32>,
    #[serde(default)]
    pub segments: Vec<SpeakerSegment>,
}

/// A contiguous time span attributed to one speaker.
///
/// Items arrive time-ordered within the segment and are never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SpeakerSegment {
    #[serde(default)]
    pub speaker_label: String,
    /// Start offset in seconds.
    #[serde(default, deserialize_with = "de_seconds")]
    pub start_time: f64,
    /// End offset in seconds. start_time <= end_time as delivered.
    #[serde(default, deserialize_with = "de_seconds")]
    pub end_time: f64,
    #[serde(default)]
    pub items: Vec<WordItem>,
}

/// Channel-identification block: one word stream per audio channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ChannelLabels {
    #[serde(default)]
    pub channels: Vec<ChannelStream>,
}

/// All words recognized on a single audio channel, grouped by channel
/// rather than by time. There is no stream-level time range; boundaries
/// come from per-item timestamps.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ChannelStream {
    #[serde(default)]
    pub channel_label: String,
    #[serde(default)]
    pub items: Vec<WordItem>,
}

/// A single recognized token: a word or a punctuation mark.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WordItem {
    /// Start offset in seconds. Present on channel items; speaker-segment
    /// items carry no per-item guarantee.
    #[serde(
        default,
        deserialize_with = "de_opt_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<f64>,
    #[serde(
        default,
        deserialize_with = "de_opt_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_label: Option<String>,
    #[serde(rename = "type", default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

/// One candidate transcription hypothesis for a token.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Alternative {
    #[serde(default)]
    pub content: String,
}

/// Token kind. A missing `type` field means pronunciation; unrecognized
/// kinds map to `Other` and are neither concatenated as words nor
/// attached as punctuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Pronunciation,
    Punctuation,
    #[serde(other)]
    Other,
}

impl TranscriptionResults {
    /// First (best) full-text transcript, if the job produced one.
    pub fn first_transcript(&self) -> Option<&str> {
        self.transcripts.first().map(|t| t.transcript.as_str())
    }
}

impl WordItem {
    /// Best transcription hypothesis: the first alternative, single-best
    /// policy. No other index is ever read.
    pub fn best_content(&self) -> Option<&str> {
        self.alternatives.first().map(|a| a.content.as_str())
    }
}

/// The service serializes time offsets as JSON strings ("15.23"); tooling
/// that re-emits the document often turns them back into numbers. Both
/// forms are accepted, and a string that does not parse degrades to the
/// field default instead of failing the whole document.
#[derive(Deserialize)]
#[serde(untagged)]
enum SecondsRepr {
    Num(f64),
    Text(String),
}

impl SecondsRepr {
    fn into_f64(self) -> Option<f64> {
        match self {
            SecondsRepr::Num(n) => Some(n),
            SecondsRepr::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn de_seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<SecondsRepr>::deserialize(deserializer)?;
    Ok(repr.and_then(SecondsRepr::into_f64).unwrap_or_default())
}

fn de_opt_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<SecondsRepr>::deserialize(deserializer)?;
    Ok(repr.and_then(SecondsRepr::into_f64))
}
