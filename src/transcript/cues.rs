use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::TimeFragment;
use crate::errors::TranscriptError;
use super::timing::parse_timestamp;

// @module: Cue block parsing shared by SRT and WebVTT

// @const: Blank-line block separator
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").expect("valid block separator regex")
});

const TIMING_ARROW: &str = "-->";

/// Subtitle dialect controlling which non-cue blocks are skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueDialect {
    Srt,
    Vtt,
}

/// A single subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Sanitized cue interval
    pub time: TimeFragment,

    // @field: Raw cue text, lines joined with '\n'
    pub text: String,
}

/// Split subtitle content into timed cues.
///
/// Blocks without a timing line are skipped. A timing line that is present but
/// malformed fails the whole parse.
pub fn parse_cues(content: &str, dialect: CueDialect) -> Result<Vec<Cue>, TranscriptError> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized.trim_start_matches('\u{FEFF}').trim();

    let mut cues = Vec::new();
    for block in BLOCK_SEPARATOR.split(normalized) {
        let lines: Vec<&str> = block
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::trim_end)
            .collect();

        let Some(first_line) = lines.first() else {
            continue;
        };

        if dialect == CueDialect::Vtt && is_vtt_metadata_block(first_line) {
            continue;
        }

        let timing_index = if lines[0].contains(TIMING_ARROW) {
            0
        } else if lines.len() > 1 && lines[1].contains(TIMING_ARROW) {
            1
        } else {
            continue;
        };

        let time = parse_timing_line(lines[timing_index])?;
        let text = lines[timing_index + 1..].join("\n").trim().to_string();
        if text.is_empty() {
            continue;
        }

        cues.push(Cue { time, text });
    }

    Ok(cues)
}

fn is_vtt_metadata_block(first_line: &str) -> bool {
    let first_line = first_line.trim().trim_start_matches('\u{FEFF}');
    ["WEBVTT", "NOTE", "STYLE", "REGION"]
        .iter()
        .any(|marker| first_line.starts_with(marker))
}

/// Parse `start --> end [cue settings]` into a sanitized interval.
pub fn parse_timing_line(line: &str) -> Result<TimeFragment, TranscriptError> {
    let parts: Vec<&str> = line.split(TIMING_ARROW).collect();
    if parts.len() != 2 {
        return Err(TranscriptError::parse("Invalid subtitle timing line", line));
    }

    let start_raw = parts[0].split_whitespace().next().unwrap_or_default();
    let end_raw = parts[1].split_whitespace().next().unwrap_or_default();
    if start_raw.is_empty() || end_raw.is_empty() {
        return Err(TranscriptError::parse("Invalid subtitle timing line", line));
    }

    let start = parse_timestamp(start_raw)?;
    let end = parse_timestamp(end_raw)?;
    Ok(TimeFragment::new(start, end))
}
