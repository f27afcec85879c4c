pub mod io;
pub mod labeler;
pub mod labels;
pub mod models;
pub mod stages;

pub use io::{parse_raw_json, read_raw_file, render_report, write_output_json, write_report, InputError};
pub use labeler::{LabelerOptions, TranscriptLabeler, PROCESSING_FAILED};
pub use labels::{LabelConfig, NameResolver};
pub use models::{
    ChannelLabels, ChannelStream, LabeledLine, LabeledOutput, SpeakerLabels, SpeakerSegment,
    Strategy, TranscriptionResults, WordItem,
};
pub use stages::{
    assemble, extract_lines, format_time_range, normalize_results, UNRECOGNIZED_SPEAKER,
};
