use std::fmt;
use std::path::PathBuf;

use crate::document::Document;

// @module: How a pipeline obtains the document it renders

/// Document acquisition strategy, resolved once when the pipeline is built.
///
/// Precedence: an external document, then a loaded transcript, then persisted
/// data, then transcription.
#[derive(Debug, Clone)]
pub enum AcquisitionStrategy {
    /// Render a caller-supplied document as-is
    ExternalDocument(Document),
    /// Process a transcript loaded from a file, without transcribing
    LoadedTranscript(Document),
    /// Load previously persisted subtitle data
    PersistedData(PathBuf),
    /// Transcribe the prepared audio, then process the result
    Transcribe,
}

/// Tag of an `AcquisitionStrategy` without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    ExternalDocument,
    LoadedTranscript,
    PersistedData,
    Transcribe,
}

impl AcquisitionStrategy {
    /// Pick the strategy from the available inputs
    pub fn resolve(
        document: Option<Document>,
        loaded_transcript: Option<Document>,
        subtitle_data_path: Option<PathBuf>,
    ) -> Self {
        match (document, loaded_transcript, subtitle_data_path) {
            (Some(document), _, _) => Self::ExternalDocument(document),
            (None, Some(transcript), _) => Self::LoadedTranscript(transcript),
            (None, None, Some(path)) => Self::PersistedData(path),
            (None, None, None) => Self::Transcribe,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::ExternalDocument(_) => StrategyKind::ExternalDocument,
            Self::LoadedTranscript(_) => StrategyKind::LoadedTranscript,
            Self::PersistedData(_) => StrategyKind::PersistedData,
            Self::Transcribe => StrategyKind::Transcribe,
        }
    }
}

impl StrategyKind {
    /// Transcribed and file-loaded transcripts go through the processor
    pub fn runs_processor(&self) -> bool {
        matches!(self, Self::Transcribe | Self::LoadedTranscript)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ExternalDocument => "external document",
            Self::LoadedTranscript => "loaded transcript",
            Self::PersistedData => "persisted subtitle data",
            Self::Transcribe => "transcription",
        };
        write!(f, "{}", name)
    }
}
