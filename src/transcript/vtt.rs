/*!
 * WebVTT parser with support for inline word timestamps.
 *
 * Karaoke-style cues embed `<HH:MM:SS.mmm>` tags inside the cue text. When present,
 * each chunk of text between two tags gets its own sub-interval of the cue;
 * otherwise the cleaned cue text is spread proportionally across the whole cue.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{Document, TimeFragment, Word};
use crate::errors::TranscriptError;
use super::cues::{parse_cues, CueDialect};
use super::timing::{clean_caption_text, distribute_proportionally, parse_timestamp};

static INLINE_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<((?:\d{2}:)?\d{2}:\d{2}\.\d{3})>").expect("valid inline timestamp regex")
});

/// Parse WebVTT content into a document.
pub fn parse_vtt(content: &str) -> Result<Document, TranscriptError> {
    let cues = parse_cues(content, CueDialect::Vtt)?;
    debug!("Parsed {} VTT cues", cues.len());

    let mut document = Document::new();
    for cue in cues {
        let mut words = parse_inline_words(&cue.text, cue.time)?;
        if words.is_empty() {
            let cleaned = clean_caption_text(&cue.text);
            words = distribute_proportionally(&cleaned, cue.time.start(), cue.time.end());
        }
        document.push_words(words);
    }
    Ok(document)
}

/// Build words from inline timestamp tags. Returns no words if the cue has no tags.
fn parse_inline_words(cue_text: &str, cue: TimeFragment) -> Result<Vec<Word>, TranscriptError> {
    let content = cue_text.replace('\n', " ");
    let matches: Vec<_> = INLINE_TIMESTAMP_REGEX.captures_iter(&content).collect();
    if matches.is_empty() {
        return Ok(Vec::new());
    }

    let anchors = matches
        .iter()
        .map(|caps| parse_timestamp(&caps[1]))
        .collect::<Result<Vec<f64>, _>>()?;
    let tag_spans: Vec<_> = matches
        .iter()
        .map(|caps| caps.get(0).map_or((0, 0), |m| (m.start(), m.end())))
        .collect();

    let mut words = Vec::new();

    let prefix = clean_caption_text(&content[..tag_spans[0].0]);
    words.extend(distribute_proportionally(&prefix, cue.start(), clamp_to(anchors[0], cue)));

    for (index, &(_, tag_end)) in tag_spans.iter().enumerate() {
        let interval_start = clamp_to(anchors[index], cue);
        let (interval_end, chunk_end) = match tag_spans.get(index + 1) {
            Some(&(next_start, _)) => (clamp_to(anchors[index + 1], cue), next_start),
            None => (cue.end(), content.len()),
        };

        let chunk = clean_caption_text(&content[tag_end..chunk_end]);
        words.extend(distribute_proportionally(&chunk, interval_start, interval_end));
    }

    Ok(words)
}

fn clamp_to(seconds: f64, cue: TimeFragment) -> f64 {
    seconds.clamp(cue.start(), cue.end())
}
