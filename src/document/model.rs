/*!
 * Timed-text document model.
 *
 * A `Document` owns its `Segment`s, which own their `Line`s, which own their `Word`s.
 * Every level carries a `TimeFragment`; line and segment fragments are derived from
 * their children and never set directly.
 */

use serde::{Deserialize, Serialize};

/// Minimum duration, in seconds, that an interval is clamped to.
pub const TIME_EPSILON: f64 = 0.01;

/// A `[start, end)` interval in seconds.
///
/// Construction always sanitizes: negative or non-finite bounds become `0.0`
/// and an empty or inverted interval becomes `[start, start + TIME_EPSILON)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTimeFragment")]
pub struct TimeFragment {
    start: f64,
    end: f64,
}

#[derive(Deserialize)]
struct RawTimeFragment {
    start: f64,
    end: f64,
}

impl From<RawTimeFragment> for TimeFragment {
    fn from(raw: RawTimeFragment) -> Self {
        TimeFragment::new(raw.start, raw.end)
    }
}

impl TimeFragment {
    /// Creates a sanitized interval
    pub fn new(start: f64, end: f64) -> Self {
        let (start, end) = sanitize_range(start, end);
        Self { start, end }
    }

    /// Start of the interval in seconds
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End of the interval in seconds
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the interval in seconds, always positive
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Clamp a raw `(start, end)` pair so that `0 <= start < end`.
pub fn sanitize_range(start: f64, end: f64) -> (f64, f64) {
    // f64::max returns the non-NaN operand, so NaN collapses to 0.0
    let start = if start.is_finite() { start.max(0.0) } else { 0.0 };
    let end = if end.is_finite() { end.max(0.0) } else { 0.0 };
    if end <= start {
        (start, start + TIME_EPSILON)
    } else {
        (start, end)
    }
}

/// A single timed word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWord")]
pub struct Word {
    text: String,
    time: TimeFragment,
}

#[derive(Deserialize)]
struct RawWord {
    text: String,
    time: TimeFragment,
}

impl TryFrom<RawWord> for Word {
    type Error = String;

    fn try_from(raw: RawWord) -> Result<Self, Self::Error> {
        Word::new(&raw.text, raw.time).ok_or_else(|| "Word text must not be blank".to_string())
    }
}

impl Word {
    /// Creates a word from trimmed text, or `None` if the text is blank.
    pub fn new(text: &str, time: TimeFragment) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            text: trimmed.to_string(),
            time,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn time(&self) -> TimeFragment {
        self.time
    }
}

/// An ordered run of words in reading order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    time: TimeFragment,
    words: Vec<Word>,
}

impl Line {
    /// Creates a line whose timing spans its first to its last word.
    /// Returns `None` when `words` is empty.
    pub fn from_words(words: Vec<Word>) -> Option<Self> {
        let time = span_of(words.iter().map(Word::time))?;
        Some(Self { time, words })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn time(&self) -> TimeFragment {
        self.time
    }
}

/// A group of lines shown together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    time: TimeFragment,
    lines: Vec<Line>,
}

impl Segment {
    /// Creates a segment whose timing spans its first to its last line.
    /// Returns `None` when `lines` is empty.
    pub fn from_lines(lines: Vec<Line>) -> Option<Self> {
        let time = span_of(lines.iter().map(Line::time))?;
        Some(Self { time, lines })
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn time(&self) -> TimeFragment {
        self.time
    }

    /// All words of this segment across its lines
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.lines.iter().flat_map(|line| line.words.iter())
    }
}

/// Interval from the first fragment's start to the last fragment's end.
fn span_of(mut fragments: impl Iterator<Item = TimeFragment>) -> Option<TimeFragment> {
    let first = fragments.next()?;
    let last = fragments.last().unwrap_or(first);
    Some(TimeFragment::new(first.start(), last.end()))
}

/// A full timed transcript.
///
/// This is the unit handed between parsers and pipeline stages. It owns its whole
/// subtree and serializes as a plain value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    segments: Vec<Segment>,
}

impl Document {
    /// Creates an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from already-built segments
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Appends one segment holding a single line made of `words`.
    ///
    /// Blank words are dropped and the segment is skipped entirely if none remain.
    pub fn push_words(&mut self, words: Vec<Word>) {
        let cleaned: Vec<Word> = words
            .into_iter()
            .filter_map(|word| Word::new(&word.text, TimeFragment::new(word.time.start, word.time.end)))
            .collect();

        if let Some(segment) = Line::from_words(cleaned).and_then(|line| Segment::from_lines(vec![line])) {
            self.segments.push(segment);
        }
    }

    /// Iterates every word in reading order
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.segments.iter().flat_map(Segment::words)
    }

    /// Total number of words
    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// True if the document contains no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Interval from the first segment's start to the last segment's end
    pub fn time(&self) -> Option<TimeFragment> {
        span_of(self.segments.iter().map(Segment::time))
    }

    /// Returns the canonical shape of this document.
    ///
    /// Each source segment becomes one segment with one line holding all of its
    /// non-blank words, with every fragment re-sanitized. Applying this twice yields
    /// the same document.
    pub fn normalize(&self) -> Document {
        let mut normalized = Document::new();
        for segment in &self.segments {
            normalized.push_words(segment.words().cloned().collect());
        }
        normalized
    }
}
