/*!
 * Error types for the captionflow library.
 *
 * Loading failures use `TranscriptError`, a closed taxonomy the caller can match on.
 * Pipeline failures use `PipelineError`, which carries collaborator errors through
 * untouched.
 */

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::PipelineState;

/// Errors that can occur while detecting, parsing or loading a transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// The transcript path does not exist
    #[error("Transcription file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The source has the wrong type for the requested operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The payload is structurally malformed (e.g. no `segments` array)
    #[error("Invalid transcript shape: {0}")]
    InvalidShape(String),

    /// The requested format name is not one of the known values
    #[error("Invalid transcript format '{value}'. Expected one of: {expected}")]
    UnsupportedFormat {
        /// The rejected format name
        value: String,
        /// Comma-separated list of accepted names
        expected: String,
    },

    /// Malformed timestamp, timing line or JSON content
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The transcript file exists but could not be read
    #[error("Failed to read transcript file {}: {source}", .path.display())]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while building or running a caption pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stage collaborator failed; its error is surfaced unchanged
    #[error(transparent)]
    Stage(anyhow::Error),

    /// Loading an external transcript at build time failed
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// A stage was invoked out of order
    #[error("Cannot {action} while pipeline is {state}")]
    InvalidState {
        /// The operation that was attempted
        action: &'static str,
        /// The state the pipeline was in
        state: PipelineState,
    },

    /// A collaborator required by the resolved strategy was not supplied
    #[error("Missing pipeline collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// The pipeline configuration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TranscriptError {
    /// Build a `ParseError` that names the offending literal
    pub(crate) fn parse(what: &str, value: &str) -> Self {
        Self::ParseError(format!("{}: '{}'", what, value))
    }
}
