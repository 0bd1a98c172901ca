//! click-track: writes a metronome click track as WAV.
//!
//! Audio goes to the file given with `--output-file`, or to standard output.
//! Log messages always go to standard error.

use std::io::ErrorKind;

use click_track::audio::write_click_track_with_progress;
use click_track::cli::Cli;
use click_track::config::MetronomeConfig;
use click_track::error::Result;
use click_track::output::{describe_sink, open_sink};
use click_track::PlaybackLength;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        if e.code.is_configuration() {
            tracing::error!("Invalid argument: {}", e);
        } else {
            tracing::error!("{}", e);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = cli.apply(MetronomeConfig::from_env());

    // Configuration errors are reported before the output is touched.
    let spec = config.to_audio_spec()?;
    let output = config.output.as_deref();

    tracing::info!("Beats per minute: {}", spec.tempo_bpm());
    match spec.length() {
        PlaybackLength::Continuous => tracing::info!("Continuous play"),
        PlaybackLength::Seconds(secs) => tracing::info!("Duration: {} seconds", secs),
    }
    tracing::info!("Output: {}", describe_sink(output));

    let mut sink = open_sink(output)?;

    let result = write_click_track_with_progress(&spec, &mut sink, |second| {
        if second % 60 == 0 {
            tracing::info!("Progress: {} seconds written", second);
        }
    });

    match result {
        Ok(summary) => {
            tracing::info!(
                "Wrote {} seconds ({} bytes)",
                summary.seconds_written,
                summary.total_bytes()
            );
            Ok(())
        }
        // A continuous stream ends when the reader goes away.
        Err(e)
            if spec.length() == PlaybackLength::Continuous
                && e.io_kind() == Some(ErrorKind::BrokenPipe) =>
        {
            tracing::warn!("Output closed, stopping continuous play");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
