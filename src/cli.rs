//! CLI argument parser.
//!
//! Flags override values taken from the environment, which override the
//! built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::MetronomeConfig;

/// click-track: write a metronome click track as 8-bit mono WAV
#[derive(Parser, Debug, Default)]
#[command(name = "click-track")]
#[command(about = "Write a metronome click track as 8-bit mono WAV")]
#[command(version)]
pub struct Cli {
    /// Filename of output WAV file (default: output to standard output)
    #[arg(short, long = "output-file", visible_alias = "output")]
    pub output_file: Option<PathBuf>,

    /// Beats per minute (1-1000, default 170)
    #[arg(short, long)]
    pub bpm: Option<u32>,

    /// Duration in seconds (default 60). If the duration is 0 it will run indefinitely.
    #[arg(short, long)]
    pub duration: Option<u32>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Applies the flags that were given on top of `base`.
    ///
    /// No range checks happen here; the result still needs
    /// [`MetronomeConfig::validate`].
    pub fn apply(&self, base: MetronomeConfig) -> MetronomeConfig {
        MetronomeConfig {
            tempo_bpm: self.bpm.unwrap_or(base.tempo_bpm),
            duration_secs: self.duration.unwrap_or(base.duration_secs),
            output: self.output_file.clone().or(base.output),
        }
    }
}
