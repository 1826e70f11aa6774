use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::errors::TranscriptError;
use crate::file_utils::FileManager;

// @module: Transcript format identification and detection

const VALID_FORMAT_NAMES: &str = "auto, recognizer_json, native_json, srt, vtt";

/// Concrete transcript format understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptFormat {
    /// Speech-recognizer output: `segments[].words[].{word,start,end}`
    RecognizerJson,
    /// Native document JSON: `segments[].lines[].words[]` or `segments[].words[]`
    NativeJson,
    /// SubRip subtitles
    Srt,
    /// WebVTT subtitles
    Vtt,
}

impl TranscriptFormat {
    // @returns: Canonical lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecognizerJson => "recognizer_json",
            Self::NativeJson => "native_json",
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }

    /// True for the cue-based text formats that need a file's raw content
    pub fn is_cue_based(&self) -> bool {
        matches!(self, Self::Srt | Self::Vtt)
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Format requested by a caller: either detect it, or use the given one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RequestedFormat {
    #[default]
    Auto,
    Explicit(TranscriptFormat),
}

impl RequestedFormat {
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl From<TranscriptFormat> for RequestedFormat {
    fn from(format: TranscriptFormat) -> Self {
        Self::Explicit(format)
    }
}

impl fmt::Display for RequestedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Explicit(format) => write!(f, "{}", format),
        }
    }
}

impl FromStr for RequestedFormat {
    type Err = TranscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "recognizer_json" | "whisper_json" => Ok(Self::Explicit(TranscriptFormat::RecognizerJson)),
            "native_json" | "pycaps_json" => Ok(Self::Explicit(TranscriptFormat::NativeJson)),
            "srt" => Ok(Self::Explicit(TranscriptFormat::Srt)),
            "vtt" => Ok(Self::Explicit(TranscriptFormat::Vtt)),
            _ => Err(TranscriptError::UnsupportedFormat {
                value: s.to_string(),
                expected: VALID_FORMAT_NAMES.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for RequestedFormat {
    type Error = TranscriptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RequestedFormat> for String {
    fn from(format: RequestedFormat) -> Self {
        format.to_string()
    }
}

/// Stateless format classifier
pub struct FormatDetector;

impl FormatDetector {
    /// Classify a path by extension alone.
    ///
    /// Returns `None` when the extension does not name a subtitle dialect, in which
    /// case the content has to be sniffed as structured data.
    pub fn detect_from_extension(path: &Path) -> Option<TranscriptFormat> {
        match FileManager::lowercase_extension(path).as_deref() {
            Some("srt") => Some(TranscriptFormat::Srt),
            Some("vtt") => Some(TranscriptFormat::Vtt),
            _ => None,
        }
    }

    /// Classify a decoded JSON payload by its structure.
    ///
    /// Recognizer output is told apart from flat native JSON by document-level
    /// `language`, segment-level `text`/`id`, or a first word that uses `word`
    /// without a nested `time`. Payloads with none of those markers are read as
    /// native JSON.
    pub fn detect_payload(payload: &Value) -> Result<TranscriptFormat, TranscriptError> {
        let segments = payload
            .get("segments")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                TranscriptError::InvalidShape(
                    "expected a top-level 'segments' array".to_string(),
                )
            })?;

        let Some(first_segment) = segments.iter().find_map(Value::as_object) else {
            return Ok(TranscriptFormat::NativeJson);
        };

        if first_segment.get("lines").is_some_and(Value::is_array) {
            return Ok(TranscriptFormat::NativeJson);
        }

        let Some(words) = first_segment.get("words").and_then(Value::as_array) else {
            return Ok(TranscriptFormat::NativeJson);
        };

        if payload.get("language").is_some()
            || first_segment.contains_key("text")
            || first_segment.contains_key("id")
        {
            return Ok(TranscriptFormat::RecognizerJson);
        }

        let recognizer_word = words
            .iter()
            .find_map(Value::as_object)
            .is_some_and(|word| word.contains_key("word") && !word.contains_key("time"));

        if recognizer_word {
            Ok(TranscriptFormat::RecognizerJson)
        } else {
            Ok(TranscriptFormat::NativeJson)
        }
    }
}
