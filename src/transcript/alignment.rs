/*!
 * Character-aligned speech data.
 *
 * Text-to-speech services can return per-character timing instead of words:
 *
 * ```json
 * {
 *   "alignment": {
 *     "characters": ["H", "i", " ", "y", "o", "u"],
 *     "character_start_times_seconds": [0.0, 0.1, 0.2, 0.3, 0.4, 0.5],
 *     "character_end_times_seconds": [0.1, 0.2, 0.3, 0.4, 0.5, 0.6]
 *   },
 *   "normalized_alignment": { ... }
 * }
 * ```
 *
 * Characters are folded into words at whitespace boundaries. Malformed data never
 * fails: it is logged and produces an empty document.
 */

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, warn};
use serde_json::Value;

use crate::document::{Document, TimeFragment, Word};
use crate::pipeline::Transcriber;

/// Accumulator for the character fold
#[derive(Debug, Clone, PartialEq)]
enum WordState {
    Idle,
    Accumulating { start: f64, end: f64, buffer: String },
}

impl WordState {
    /// Consume one timed character, emitting a finished word on whitespace
    fn step(self, character: &str, start: f64, end: f64, words: &mut Vec<Word>) -> Self {
        if is_separator(character) {
            self.flush(words);
            return WordState::Idle;
        }

        match self {
            WordState::Idle => WordState::Accumulating {
                start,
                end,
                buffer: character.to_string(),
            },
            WordState::Accumulating { start: first, mut buffer, .. } => {
                buffer.push_str(character);
                WordState::Accumulating { start: first, end, buffer }
            }
        }
    }

    fn flush(self, words: &mut Vec<Word>) {
        if let WordState::Accumulating { start, end, buffer } = self {
            if let Some(word) = Word::new(&buffer, TimeFragment::new(start, end)) {
                words.push(word);
            }
        }
    }
}

fn is_separator(character: &str) -> bool {
    !character.is_empty() && character.chars().all(char::is_whitespace)
}

/// Build a document from a character alignment payload.
///
/// `normalized_alignment` is preferred when it is a non-empty object. All words land
/// in a single segment with a single line.
pub fn parse_alignment(payload: &Value) -> Document {
    let alignment = payload
        .get("normalized_alignment")
        .filter(|value| value.as_object().is_some_and(|obj| !obj.is_empty()))
        .or_else(|| payload.get("alignment"));

    let Some(alignment) = alignment.filter(|value| value.is_object()) else {
        warn!("No alignment or normalized_alignment found in alignment data");
        return Document::new();
    };

    let characters = string_array(alignment.get("characters"));
    let starts = number_array(alignment.get("character_start_times_seconds"));
    let ends = number_array(alignment.get("character_end_times_seconds"));

    let (Some(characters), Some(starts), Some(ends)) = (characters, starts, ends) else {
        warn!("Alignment data is missing or has non-numeric timing arrays");
        return Document::new();
    };

    if characters.is_empty() || starts.is_empty() || ends.is_empty() {
        warn!("Empty alignment data");
        return Document::new();
    }

    if characters.len() != starts.len() || characters.len() != ends.len() {
        warn!(
            "Mismatched lengths in alignment data: {} characters, {} start times, {} end times",
            characters.len(),
            starts.len(),
            ends.len()
        );
        return Document::new();
    }

    let mut words = Vec::new();
    let last_state = characters
        .iter()
        .zip(starts.iter().zip(&ends))
        .fold(WordState::Idle, |state, (character, (&start, &end))| {
            state.step(character, start, end, &mut words)
        });
    last_state.flush(&mut words);

    if words.is_empty() {
        warn!("No words extracted from alignment data");
        return Document::new();
    }

    debug!("Parsed {} words from alignment data", words.len());
    let mut document = Document::new();
    document.push_words(words);
    document
}

fn string_array(value: Option<&Value>) -> Option<Vec<String>> {
    value?
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn number_array(value: Option<&Value>) -> Option<Vec<f64>> {
    value?.as_array()?.iter().map(Value::as_f64).collect()
}

/// Where an `AlignmentTranscriber` gets its data from
#[derive(Debug, Clone)]
enum AlignmentSource {
    Payload(Value),
    File(PathBuf),
    Missing,
}

/// Transcriber that replays character alignment data instead of listening to audio.
///
/// The audio path passed to `transcribe` is ignored.
#[derive(Debug, Clone)]
pub struct AlignmentTranscriber {
    source: AlignmentSource,
}

impl AlignmentTranscriber {
    /// Use an in-memory alignment payload
    pub fn from_payload(payload: Value) -> Self {
        Self { source: AlignmentSource::Payload(payload) }
    }

    /// Read alignment data from a JSON file at transcription time
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self { source: AlignmentSource::File(path.as_ref().to_path_buf()) }
    }

    /// A transcriber with no data; it always yields an empty document
    pub fn empty() -> Self {
        Self { source: AlignmentSource::Missing }
    }

    async fn load_payload(&self) -> Option<Value> {
        match &self.source {
            AlignmentSource::Payload(payload) => Some(payload.clone()),
            AlignmentSource::File(path) => {
                let content = match tokio::fs::read_to_string(path).await {
                    Ok(content) => content,
                    Err(e) => {
                        error!("Error loading alignment file {}: {}", path.display(), e);
                        return None;
                    }
                };
                match serde_json::from_str(&content) {
                    Ok(payload) => Some(payload),
                    Err(e) => {
                        error!("Error parsing alignment file {}: {}", path.display(), e);
                        None
                    }
                }
            }
            AlignmentSource::Missing => None,
        }
    }
}

#[async_trait]
impl Transcriber for AlignmentTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> Result<Document> {
        match self.load_payload().await {
            Some(payload) => Ok(parse_alignment(&payload)),
            None => {
                warn!("No alignment data provided to the alignment transcriber");
                Ok(Document::new())
            }
        }
    }
}
