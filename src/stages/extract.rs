use serde_json::Value;
use tracing::debug;

use crate::labels::NameResolver;
use crate::models::{
    ChannelLabels, ItemType, LabeledLine, SpeakerLabels, Strategy, TranscriptionResults, WordItem,
};

/// Label wrapped around the flat-fallback transcript when no speaker or
/// channel attribution exists.
pub const UNRECOGNIZED_SPEAKER: &str = "[unrecognized speaker]";

const SENTENCE_TERMINATORS: [char; 6] = ['.', '!', '?', '。', '！', '？'];

/// Produce the labeled lines for one document, selecting exactly one
/// strategy in fixed priority order: speaker segments, then channel
/// streams, then the flat transcript. A strategy that yields no usable
/// line falls through to the next.
pub fn extract_lines(
    results: Option<&TranscriptionResults>,
    raw: &Value,
    resolver: &NameResolver,
    split_sentences: bool,
) -> (Strategy, Vec<LabeledLine>) {
    if let Some(results) = results {
        if let Some(labels) = &results.speaker_labels {
            let lines = speaker_lines(labels, resolver);
            if !lines.is_empty() {
                return (Strategy::SpeakerLabels, lines);
            }
            debug!("speaker labels present but yielded no lines");
        }
        if let Some(labels) = &results.channel_labels {
            let lines = channel_lines(labels, resolver);
            if !lines.is_empty() {
                return (Strategy::ChannelLabels, lines);
            }
            debug!("channel labels present but yielded no lines");
        }
    }
    (
        Strategy::FlatFallback,
        flat_lines(results, raw, resolver, split_sentences),
    )
}

/// Strategy A: one line per diarization segment, in delivery order.
/// Segments whose items carry no usable text are dropped entirely.
pub fn speaker_lines(labels: &SpeakerLabels, resolver: &NameResolver) -> Vec<LabeledLine> {
    let mut lines = Vec::new();
    for segment in &labels.segments {
        let text = segment_text(&segment.items);
        if text.is_empty() {
            continue;
        }
        lines.push(LabeledLine {
            label: resolver.speaker_name(&segment.speaker_label),
            text,
        });
    }
    lines
}

/// Concatenate a segment's items into display text. Words get a trailing
/// space; punctuation attaches directly to the preceding word. Items
/// without a first alternative contribute nothing.
pub fn segment_text(items: &[WordItem]) -> String {
    let mut text = String::new();
    for item in items {
        let Some(content) = item.best_content() else {
            continue;
        };
        if item.item_type == ItemType::Punctuation {
            while text.ends_with(' ') {
                text.pop();
            }
        }
        text.push_str(content);
        text.push(' ');
    }
    let trimmed = text.trim_end().len();
    text.truncate(trimmed);
    text
}

/// Strategy B: rebuild speaking turns from per-channel word streams.
///
/// Channel items arrive grouped by channel, not by time, so this is the
/// one place the pipeline reorders globally: the pooled words are
/// stable-sorted by start time and a turn ends exactly when the next
/// word's channel differs. There is deliberately no silence/gap
/// threshold, so adjacent-channel words a millisecond apart still break
/// the turn while a long same-channel pause does not; changing that
/// needs product guidance, not a quiet fix.
///
/// Only pronunciation items carrying a start time and an alternative
/// take part; channel punctuation is discarded, unlike on the
/// speaker-segment path.
pub fn channel_lines(labels: &ChannelLabels, resolver: &NameResolver) -> Vec<LabeledLine> {
    struct PooledWord<'a> {
        start: f64,
        label: String,
        content: &'a str,
    }

    let mut pool = Vec::new();
    for channel in &labels.channels {
        let label = resolver.channel_name(&channel.channel_label);
        for item in &channel.items {
            if item.item_type != ItemType::Pronunciation {
                continue;
            }
            let Some(start) = item.start_time else {
                continue;
            };
            let Some(content) = item.best_content() else {
                continue;
            };
            pool.push(PooledWord {
                start,
                label: label.clone(),
                content,
            });
        }
    }
    debug!(words = pool.len(), "pooled channel words");

    // Stable: ties keep the original per-channel order.
    pool.sort_by(|a, b| a.start.total_cmp(&b.start));

    fn flush(lines: &mut Vec<LabeledLine>, label: String, text: &str) {
        let text = text.trim_end();
        if !text.is_empty() {
            lines.push(LabeledLine {
                label,
                text: text.to_string(),
            });
        }
    }

    let mut lines = Vec::new();
    let mut current: Option<String> = None;
    let mut text = String::new();
    for word in &pool {
        if current.as_deref() != Some(word.label.as_str()) {
            if let Some(label) = current.take() {
                flush(&mut lines, label, &text);
            }
            current = Some(word.label.clone());
            text.clear();
        }
        text.push_str(word.content);
        text.push(' ');
    }
    if let Some(label) = current {
        flush(&mut lines, label, &text);
    }
    lines
}

/// Strategy C: wrap the flat transcript in a single line under the
/// fixed unrecognized-speaker label. Text comes from the first
/// transcripts element, or from the `transcript` field of a previously
/// labeled document being re-processed. Empty text yields no line.
pub fn flat_lines(
    results: Option<&TranscriptionResults>,
    raw: &Value,
    resolver: &NameResolver,
    split_sentences: bool,
) -> Vec<LabeledLine> {
    let Some(text) = flat_text(results, raw) else {
        return Vec::new();
    };
    if split_sentences {
        return alternating_sentences(&text, resolver);
    }
    vec![LabeledLine {
        label: UNRECOGNIZED_SPEAKER.to_string(),
        text,
    }]
}

fn flat_text(results: Option<&TranscriptionResults>, raw: &Value) -> Option<String> {
    if let Some(text) = results.and_then(TranscriptionResults::first_transcript) {
        if !text.is_empty() {
            return Some(text.to_string());
        }
    }
    raw.get("transcript")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Sentence-splitting sub-strategy for otherwise unlabeled transcripts:
/// split on sentence-terminal punctuation and hand out alternating
/// speaker labels (spk_0, spk_1, spk_0, ...) to successive non-empty
/// sentences.
///
/// This is a readability aid, not diarization: the assignment encodes no
/// timing or content evidence and is frequently wrong. It stays opt-in
/// and must not be presented as equivalent to the labeled strategies.
pub fn alternating_sentences(text: &str, resolver: &NameResolver) -> Vec<LabeledLine> {
    text.split_inclusive(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.chars().all(|c| SENTENCE_TERMINATORS.contains(&c)))
        .enumerate()
        .map(|(i, sentence)| LabeledLine {
            label: resolver.speaker_name(if i % 2 == 0 { "spk_0" } else { "spk_1" }),
            text: sentence.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> NameResolver {
        NameResolver::default()
    }

    fn word(content: &str) -> WordItem {
        serde_json::from_value(json!({"alternatives": [{"content": content}]})).unwrap()
    }

    fn punct(content: &str) -> WordItem {
        serde_json::from_value(
            json!({"type": "punctuation", "alternatives": [{"content": content}]}),
        )
        .unwrap()
    }

    #[test]
    fn test_punctuation_attaches_without_space() {
        let items = vec![word("Hello"), punct(","), word("world"), punct(".")];
        assert_eq!(segment_text(&items), "Hello, world.");
    }

    #[test]
    fn test_items_without_alternatives_are_skipped() {
        let items = vec![word("uno"), WordItem::default(), word("dos")];
        assert_eq!(segment_text(&items), "uno dos");
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        let labels: SpeakerLabels = serde_json::from_value(json!({
            "segments": [
                {"speaker_label": "spk_0", "items": [{"alternatives": []}, {}]},
                {"speaker_label": "spk_1", "items": [{"alternatives": [{"content": "sí"}]}]}
            ]
        }))
        .unwrap();

        let lines = speaker_lines(&labels, &resolver());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, "Customer");
        assert_eq!(lines[0].text, "sí");
    }

    #[test]
    fn test_channel_turn_merge() {
        let labels: ChannelLabels = serde_json::from_value(json!({
            "channels": [
                {
                    "channel_label": "ch_0",
                    "items": [
                        {"start_time": "0.0", "type": "pronunciation", "alternatives": [{"content": "Hi"}]},
                        {"start_time": "0.5", "type": "pronunciation", "alternatives": [{"content": "there"}]}
                    ]
                },
                {
                    "channel_label": "ch_1",
                    "items": [
                        {"start_time": "1.0", "type": "pronunciation", "alternatives": [{"content": "Hello"}]},
                        {"start_time": "1.5", "type": "pronunciation", "alternatives": [{"content": "back"}]}
                    ]
                }
            ]
        }))
        .unwrap();

        let lines = channel_lines(&labels, &resolver());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].label, "Channel 1 - Agent");
        assert_eq!(lines[0].text, "Hi there");
        assert_eq!(lines[1].label, "Channel 2 - Customer");
        assert_eq!(lines[1].text, "Hello back");
    }

    #[test]
    fn test_channel_interleaving_breaks_turns() {
        let labels: ChannelLabels = serde_json::from_value(json!({
            "channels": [
                {
                    "channel_label": "ch_0",
                    "items": [
                        {"start_time": 0.0, "type": "pronunciation", "alternatives": [{"content": "a"}]},
                        {"start_time": 2.0, "type": "pronunciation", "alternatives": [{"content": "c"}]}
                    ]
                },
                {
                    "channel_label": "ch_1",
                    "items": [
                        {"start_time": 1.0, "type": "pronunciation", "alternatives": [{"content": "b"}]}
                    ]
                }
            ]
        }))
        .unwrap();

        let lines = channel_lines(&labels, &resolver());
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_channel_punctuation_and_untimed_items_discarded() {
        let labels: ChannelLabels = serde_json::from_value(json!({
            "channels": [{
                "channel_label": "ch_0",
                "items": [
                    {"start_time": 0.0, "type": "pronunciation", "alternatives": [{"content": "ok"}]},
                    {"type": "punctuation", "alternatives": [{"content": "."}]},
                    {"type": "pronunciation", "alternatives": [{"content": "untimed"}]}
                ]
            }]
        }))
        .unwrap();

        let lines = channel_lines(&labels, &resolver());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "ok");
    }

    #[test]
    fn test_speaker_labels_take_priority_over_channels() {
        let results: TranscriptionResults = serde_json::from_value(json!({
            "speaker_labels": {
                "segments": [
                    {"speaker_label": "spk_0", "items": [{"alternatives": [{"content": "hola"}]}]}
                ]
            },
            "channel_labels": {
                "channels": [{
                    "channel_label": "ch_0",
                    "items": [
                        {"start_time": 0.0, "type": "pronunciation", "alternatives": [{"content": "ignored"}]}
                    ]
                }]
            }
        }))
        .unwrap();

        let (strategy, lines) =
            extract_lines(Some(&results), &json!({}), &resolver(), false);
        assert_eq!(strategy, Strategy::SpeakerLabels);
        assert_eq!(lines, speaker_lines(results.speaker_labels.as_ref().unwrap(), &resolver()));
    }

    #[test]
    fn test_unusable_speaker_labels_fall_through_to_channels() {
        let results: TranscriptionResults = serde_json::from_value(json!({
            "speaker_labels": {"segments": [{"speaker_label": "spk_0", "items": []}]},
            "channel_labels": {
                "channels": [{
                    "channel_label": "ch_1",
                    "items": [
                        {"start_time": 0.0, "type": "pronunciation", "alternatives": [{"content": "aquí"}]}
                    ]
                }]
            }
        }))
        .unwrap();

        let (strategy, lines) =
            extract_lines(Some(&results), &json!({}), &resolver(), false);
        assert_eq!(strategy, Strategy::ChannelLabels);
        assert_eq!(lines[0].label, "Channel 2 - Customer");
    }

    #[test]
    fn test_flat_fallback_wraps_whole_transcript() {
        let results: TranscriptionResults =
            serde_json::from_value(json!({"transcripts": [{"transcript": "hola mundo"}]}))
                .unwrap();

        let (strategy, lines) =
            extract_lines(Some(&results), &json!({}), &resolver(), false);
        assert_eq!(strategy, Strategy::FlatFallback);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, UNRECOGNIZED_SPEAKER);
        assert_eq!(lines[0].text, "hola mundo");
    }

    #[test]
    fn test_flat_fallback_reads_reprocessed_transcript_field() {
        let raw = json!({"transcript": "texto guardado"});
        let (strategy, lines) = extract_lines(None, &raw, &resolver(), false);
        assert_eq!(strategy, Strategy::FlatFallback);
        assert_eq!(lines[0].text, "texto guardado");
    }

    #[test]
    fn test_no_recoverable_text_yields_no_lines() {
        let (_, lines) = extract_lines(None, &json!({}), &resolver(), false);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_alternating_sentences() {
        let lines = alternating_sentences("Buenos días. En qué puedo ayudar? Quiero pagar.", &resolver());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].label, "Agent");
        assert_eq!(lines[0].text, "Buenos días.");
        assert_eq!(lines[1].label, "Customer");
        assert_eq!(lines[1].text, "En qué puedo ayudar?");
        assert_eq!(lines[2].label, "Agent");
        assert_eq!(lines[2].text, "Quiero pagar.");
    }

    #[test]
    fn test_alternating_sentences_cjk_terminators() {
        let lines = alternating_sentences("你好。请问有什么可以帮您！好的。", &resolver());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "请问有什么可以帮您！");
    }

    #[test]
    fn test_alternating_sentences_skips_bare_terminators() {
        let lines = alternating_sentences("Hola!! Adiós.", &resolver());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hola!");
        assert_eq!(lines[1].label, "Customer");
        assert_eq!(lines[1].text, "Adiós.");
    }
}
