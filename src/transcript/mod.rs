/*!
 * Transcript ingestion: format detection, parsers and the loading facade.
 */

pub mod alignment;
pub mod cues;
pub mod format;
pub mod json;
pub mod loader;
pub mod srt;
pub mod timing;
pub mod vtt;

pub use alignment::{parse_alignment, AlignmentTranscriber};
pub use format::{FormatDetector, RequestedFormat, TranscriptFormat};
pub use loader::{load_transcription, TranscriptLoader, TranscriptSource};
