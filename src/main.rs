use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use whosaid::{
    extract_lines, normalize_results, read_raw_file, write_output_json, write_report,
    LabelConfig, LabelerOptions, NameResolver, TranscriptLabeler,
};

#[derive(Parser)]
#[command(name = "whosaid")]
#[command(author, version, about = "Speaker-attribution labeling for speech-to-text transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce a speaker-attributed transcript from a raw result file
    Label {
        /// Input raw transcription result (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the labeled document (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a plain-text report
        #[arg(long)]
        report: Option<PathBuf>,

        /// Split an unlabeled transcript into alternating-speaker
        /// sentences (low-confidence readability aid, not diarization)
        #[arg(long)]
        split_sentences: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Report which label sources a raw result carries, without writing anything
    Inspect {
        /// Input raw transcription result (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Label {
            input,
            output,
            report,
            split_sentences,
            verbose,
        } => {
            setup_logging(verbose);
            label_transcript(input, output, report, split_sentences)
        }
        Commands::Inspect { input, verbose } => {
            setup_logging(verbose);
            inspect_transcript(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn label_transcript(
    input: PathBuf,
    output: PathBuf,
    report: Option<PathBuf>,
    split_sentences: bool,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let raw = read_raw_file(&input).context("Failed to load input transcript")?;

    let labeler = TranscriptLabeler::with_options(
        LabelConfig::from_env(),
        LabelerOptions { split_sentences },
    );
    let labeled = labeler.label(raw);

    write_output_json(&labeled, &output)?;
    info!("Output written to {:?}", output);

    if let Some(path) = report {
        write_report(&labeled, labeler.resolver(), &path)?;
        info!("Report written to {:?}", path);
    }

    Ok(())
}

fn inspect_transcript(input: PathBuf) -> Result<()> {
    let raw = read_raw_file(&input).context("Failed to load input transcript")?;
    let results = normalize_results(&raw);

    println!("Transcript Inspection");
    println!("=====================");
    match &results {
        None => println!("No usable results payload"),
        Some(results) => {
            println!("Transcript alternatives: {}", results.transcripts.len());

            match &results.speaker_labels {
                Some(labels) => {
                    let items: usize = labels.segments.iter().map(|s| s.items.len()).sum();
                    println!(
                        "Speaker labels: {} segments, {} items{}",
                        labels.segments.len(),
                        items,
                        labels
                            .speakers
                            .map(|n| format!(", {} speakers", n))
                            .unwrap_or_default()
                    );
                }
                None => println!("Speaker labels: none"),
            }

            match &results.channel_labels {
                Some(labels) => {
                    let items: usize = labels.channels.iter().map(|c| c.items.len()).sum();
                    println!(
                        "Channel labels: {} channels, {} items",
                        labels.channels.len(),
                        items
                    );
                }
                None => println!("Channel labels: none"),
            }
        }
    }

    let resolver = NameResolver::new(LabelConfig::from_env());
    let (strategy, lines) = extract_lines(results.as_ref(), &raw, &resolver, false);
    println!();
    println!("Selected strategy: {}", strategy);
    println!("Labeled lines: {}", lines.len());

    Ok(())
}
