/*!
 * JSON transcript parsers.
 *
 * Two JSON dialects are supported:
 * - Recognizer output: `segments[].words[].{word|text, start, end}`, with a
 *   segment-level `text/start/end` fallback when word timing is absent
 * - Native documents: `segments[].lines[].words[]` or flat `segments[].words[]`,
 *   each word timed either by a nested `time` object or flat `start/end`
 */

use serde_json::{Map, Value};

use crate::document::{Document, TimeFragment, Word};
use crate::errors::TranscriptError;
use super::timing::distribute_proportionally;

type JsonObject = Map<String, Value>;

/// Parse speech-recognizer JSON output.
pub fn parse_recognizer_json(payload: &Value) -> Result<Document, TranscriptError> {
    let segments = segments_of(payload, "recognizer_json")?;

    let mut document = Document::new();
    for segment in segments.iter().filter_map(Value::as_object) {
        let mut words = parse_word_entries(segment.get("words"));
        if words.is_empty() {
            words = words_from_segment_text(segment, flat_time(segment));
        }
        document.push_words(words);
    }
    Ok(document)
}

/// Parse native document JSON, nested or flat.
pub fn parse_native_json(payload: &Value) -> Result<Document, TranscriptError> {
    let segments = segments_of(payload, "native_json")?;

    let mut document = Document::new();
    for segment in segments.iter().filter_map(Value::as_object) {
        let words = if let Some(lines) = segment.get("lines").and_then(Value::as_array) {
            lines
                .iter()
                .filter_map(Value::as_object)
                .flat_map(|line| parse_word_entries(line.get("words")))
                .collect()
        } else if segment.get("words").is_some_and(Value::is_array) {
            parse_word_entries(segment.get("words"))
        } else if segment.contains_key("text") {
            words_from_segment_text(segment, entry_time(segment))
        } else {
            Vec::new()
        };
        document.push_words(words);
    }
    Ok(document)
}

fn segments_of<'a>(payload: &'a Value, format_name: &str) -> Result<&'a Vec<Value>, TranscriptError> {
    payload
        .get("segments")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            TranscriptError::InvalidShape(format!("Invalid {}: expected 'segments' array", format_name))
        })
}

/// Synthesize words for a segment that only carries text and a span.
fn words_from_segment_text(segment: &JsonObject, span: (Option<f64>, Option<f64>)) -> Vec<Word> {
    let text = segment.get("text").map(value_as_text).unwrap_or_default();
    match span {
        (Some(start), Some(end)) if !text.trim().is_empty() => {
            distribute_proportionally(&text, start, end)
        }
        _ => Vec::new(),
    }
}

/// Parse a list of word objects, skipping entries without text or timing.
fn parse_word_entries(entries: Option<&Value>) -> Vec<Word> {
    let Some(entries) = entries.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|entry| {
            let text = entry
                .get("text")
                .or_else(|| entry.get("word"))
                .map(value_as_text)
                .unwrap_or_default();
            match entry_time(entry) {
                (Some(start), Some(end)) => Word::new(&text, TimeFragment::new(start, end)),
                _ => None,
            }
        })
        .collect()
}

/// Timing from a nested `time` object if present, else from flat `start/end`.
fn entry_time(entry: &JsonObject) -> (Option<f64>, Option<f64>) {
    match entry.get("time").and_then(Value::as_object) {
        Some(time) => flat_time(time),
        None => flat_time(entry),
    }
}

fn flat_time(entry: &JsonObject) -> (Option<f64>, Option<f64>) {
    (
        entry.get("start").and_then(value_as_seconds),
        entry.get("end").and_then(value_as_seconds),
    )
}

/// Numbers and numeric strings are both accepted as seconds.
fn value_as_seconds(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
