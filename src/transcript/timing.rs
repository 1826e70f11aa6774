/*!
 * Timing reconstruction helpers shared by every parser.
 *
 * - Proportional distribution of a span across the words of a text
 * - Subtitle timestamp parsing (`H:MM:SS.mmm`, `MM:SS.mmm`, comma or dot)
 * - Caption text cleanup (markup stripping and entity decoding)
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{sanitize_range, TimeFragment, Word};
use crate::errors::TranscriptError;

static MARKUP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[^>]+>").expect("valid markup tag regex")
});

/// Split `text` into words and spread `[start, end)` across them.
///
/// Each word gets a share proportional to its character count (minimum 1). The
/// boundaries are computed from cumulative weights, so consecutive words share their
/// boundary exactly, and the last word always ends at `end`.
pub fn distribute_proportionally(text: &str, start: f64, end: f64) -> Vec<Word> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let (start, end) = sanitize_range(start, end);
    if tokens.len() == 1 {
        return Word::new(tokens[0], TimeFragment::new(start, end))
            .into_iter()
            .collect();
    }

    let weights: Vec<usize> = tokens.iter().map(|t| t.chars().count().max(1)).collect();
    let total_weight: usize = weights.iter().sum();
    let duration = end - start;
    let last_index = tokens.len() - 1;

    let mut consumed = 0usize;
    let mut words = Vec::with_capacity(tokens.len());
    for (index, (token, weight)) in tokens.iter().zip(&weights).enumerate() {
        let word_start = start + duration * (consumed as f64 / total_weight as f64);
        consumed += weight;
        let word_end = if index == last_index {
            end
        } else {
            start + duration * (consumed as f64 / total_weight as f64)
        };
        if let Some(word) = Word::new(token, TimeFragment::new(word_start, word_end)) {
            words.push(word);
        }
    }
    words
}

/// Parse a subtitle timestamp into seconds.
///
/// Accepts `H:MM:SS.fff` and `MM:SS.fff`, with either `.` or `,` as the decimal
/// separator.
pub fn parse_timestamp(value: &str) -> Result<f64, TranscriptError> {
    let cleaned = value.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Err(TranscriptError::ParseError("Invalid empty timestamp".to_string()));
    }

    let parts: Vec<&str> = cleaned.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => ("0", *m, *s),
        _ => return Err(TranscriptError::parse("Invalid timestamp format", value)),
    };

    let hours: u64 = hours
        .trim()
        .parse()
        .map_err(|_| TranscriptError::parse("Invalid hours in timestamp", value))?;
    let minutes: u64 = minutes
        .trim()
        .parse()
        .map_err(|_| TranscriptError::parse("Invalid minutes in timestamp", value))?;
    let seconds: f64 = seconds
        .trim()
        .parse()
        .map_err(|_| TranscriptError::parse("Invalid seconds in timestamp", value))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(TranscriptError::parse("Invalid seconds in timestamp", value));
    }

    let whole_seconds = hours
        .checked_mul(3600)
        .zip(minutes.checked_mul(60))
        .and_then(|(h, m)| h.checked_add(m))
        .ok_or_else(|| TranscriptError::parse("Invalid timestamp", value))?;

    Ok(whole_seconds as f64 + seconds)
}

/// Remove markup tags, decode entities and trim.
pub fn clean_caption_text(text: &str) -> String {
    let stripped = MARKUP_TAG_REGEX.replace_all(text, "");
    unescape_entities(&stripped).trim().to_string()
}

/// Decode HTML character references against the full HTML5 entity table.
/// Unknown named entities are kept verbatim.
pub fn unescape_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
