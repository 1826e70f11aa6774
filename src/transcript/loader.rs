/*!
 * Transcript loading facade.
 *
 * `TranscriptLoader` accepts an in-memory document, a decoded JSON payload or a file
 * path, resolves the format (explicitly requested or detected) and always returns a
 * normalized `Document`.
 */

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;

use crate::document::Document;
use crate::errors::TranscriptError;
use crate::file_utils::FileManager;
use super::format::{FormatDetector, RequestedFormat, TranscriptFormat};
use super::json::{parse_native_json, parse_recognizer_json};
use super::srt::parse_srt;
use super::vtt::parse_vtt;

/// Anything a transcript can be loaded from
#[derive(Debug, Clone)]
pub enum TranscriptSource {
    /// An already-built document, only normalized
    Document(Document),
    /// Decoded JSON content
    Payload(Value),
    /// A transcript file on disk
    Path(PathBuf),
}

impl From<Document> for TranscriptSource {
    fn from(document: Document) -> Self {
        Self::Document(document)
    }
}

impl From<Value> for TranscriptSource {
    fn from(payload: Value) -> Self {
        Self::Payload(payload)
    }
}

impl From<PathBuf> for TranscriptSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for TranscriptSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for TranscriptSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

/// Stateless transcript loader
pub struct TranscriptLoader;

impl TranscriptLoader {
    /// Load and normalize a transcript from `source`.
    pub fn load<S: Into<TranscriptSource>>(
        source: S,
        requested: RequestedFormat,
    ) -> Result<Document, TranscriptError> {
        let document = match source.into() {
            TranscriptSource::Document(document) => document,
            TranscriptSource::Payload(payload) => Self::load_payload(&payload, requested)?,
            TranscriptSource::Path(path) => Self::load_path(&path, requested)?,
        };
        Ok(document.normalize())
    }

    /// Load with a format given by name, e.g. `"auto"` or `"srt"`.
    pub fn load_named<S: Into<TranscriptSource>>(
        source: S,
        format_name: &str,
    ) -> Result<Document, TranscriptError> {
        let requested = format_name.parse::<RequestedFormat>()?;
        Self::load(source, requested)
    }

    fn load_payload(payload: &Value, requested: RequestedFormat) -> Result<Document, TranscriptError> {
        let format = match requested {
            RequestedFormat::Auto => FormatDetector::detect_payload(payload)?,
            RequestedFormat::Explicit(format) if format.is_cue_based() => {
                return Err(TranscriptError::InvalidInput(format!(
                    "Format '{}' requires a transcript file path, not a JSON payload",
                    format
                )));
            }
            RequestedFormat::Explicit(format) => format,
        };
        debug!("Loading transcript payload as {}", format);
        parse_json_as(payload, format)
    }

    fn load_path(path: &Path, requested: RequestedFormat) -> Result<Document, TranscriptError> {
        if !path.exists() {
            return Err(TranscriptError::NotFound(path.to_path_buf()));
        }
        if !FileManager::file_exists(path) {
            return Err(TranscriptError::InvalidInput(format!(
                "Transcription path is not a file: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|source| TranscriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let explicit = match requested {
            RequestedFormat::Explicit(format) => Some(format),
            RequestedFormat::Auto => FormatDetector::detect_from_extension(path),
        };

        match explicit {
            Some(TranscriptFormat::Srt) => {
                debug!("Loading {} as srt", path.display());
                parse_srt(&content)
            }
            Some(TranscriptFormat::Vtt) => {
                debug!("Loading {} as vtt", path.display());
                parse_vtt(&content)
            }
            Some(format) => {
                debug!("Loading {} as {}", path.display(), format);
                parse_json_as(&decode_json(path, &content)?, format)
            }
            None => {
                let payload = decode_json(path, &content)?;
                let format = FormatDetector::detect_payload(&payload)?;
                debug!("Detected {} for {}", format, path.display());
                parse_json_as(&payload, format)
            }
        }
    }
}

/// Load and normalize a transcript.
pub fn load_transcription<S: Into<TranscriptSource>>(
    source: S,
    requested: RequestedFormat,
) -> Result<Document, TranscriptError> {
    TranscriptLoader::load(source, requested)
}

fn decode_json(path: &Path, content: &str) -> Result<Value, TranscriptError> {
    serde_json::from_str(content).map_err(|e| {
        TranscriptError::ParseError(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

fn parse_json_as(payload: &Value, format: TranscriptFormat) -> Result<Document, TranscriptError> {
    match format {
        TranscriptFormat::RecognizerJson => parse_recognizer_json(payload),
        TranscriptFormat::NativeJson => parse_native_json(payload),
        TranscriptFormat::Srt | TranscriptFormat::Vtt => Err(TranscriptError::InvalidInput(format!(
            "Format '{}' cannot be read from JSON",
            format
        ))),
    }
}
