//! Output sink selection.
//!
//! The track goes either to a file or to standard output. Either way the
//! encoder only sees a buffered `Write`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{MetronomeError, Result};

/// Opens the destination for the WAV stream.
///
/// A path is created or truncated. `None` selects standard output.
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                MetronomeError::output_open_failed(path.display().to_string(), e)
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Human-readable name of the destination for log messages.
pub fn describe_sink(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<stdout>".to_string(),
    }
}
