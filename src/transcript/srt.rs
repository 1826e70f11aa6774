use log::debug;

use crate::document::Document;
use crate::errors::TranscriptError;
use super::cues::{parse_cues, CueDialect};
use super::timing::distribute_proportionally;

/// Parse SubRip content.
///
/// SRT carries no word timing, so every cue's words are spread proportionally
/// across the cue's span.
pub fn parse_srt(content: &str) -> Result<Document, TranscriptError> {
    let cues = parse_cues(content, CueDialect::Srt)?;
    debug!("Parsed {} SRT cues", cues.len());

    let mut document = Document::new();
    for cue in cues {
        document.push_words(distribute_proportionally(&cue.text, cue.time.start(), cue.time.end()));
    }
    Ok(document)
}
