/*!
 * Stage collaborators used by the caption pipeline.
 *
 * The pipeline itself only sequences stages; the actual work of opening media,
 * transcribing audio, rewriting the document and rendering is delegated to
 * implementations of these traits:
 * - `Renderer`: opens the media, renders the final document, releases resources
 * - `Transcriber`: turns an audio file into a timed document
 * - `DocumentProcessor`: rewrites a freshly transcribed document
 * - `SubtitleDataStore`: loads a previously persisted document
 */

use anyhow::Result;
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::app_config::MediaSettings;
use crate::document::Document;

/// Media resources opened by a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedMedia {
    /// Audio track extracted for transcription
    pub audio_path: PathBuf,
}

/// Renders a document onto the input media
///
/// `close` must be safe to call more than once and after a failed `open`.
#[async_trait]
pub trait Renderer: Send + Sync + Debug {
    /// Open the input media and output target
    ///
    /// # Arguments
    /// * `media` - Input and output locations
    ///
    /// # Returns
    /// * `Result<PreparedMedia>` - The audio to transcribe, or an error
    async fn open(&mut self, media: &MediaSettings) -> Result<PreparedMedia>;

    /// Render the final document and return the output location
    async fn render(&mut self, document: Document) -> Result<PathBuf>;

    /// Release everything acquired by `open`
    async fn close(&mut self) -> Result<()>;
}

/// Produces a timed document from audio
#[async_trait]
pub trait Transcriber: Send + Sync + Debug {
    async fn transcribe(&self, audio_path: &Path) -> Result<Document>;
}

/// Rewrites a transcribed document before rendering
#[async_trait]
pub trait DocumentProcessor: Send + Sync + Debug {
    async fn process(&self, document: Document) -> Result<Document>;
}

/// Loads persisted subtitle data
#[async_trait]
pub trait SubtitleDataStore: Send + Sync + Debug {
    async fn load(&self, path: &Path) -> Result<Document>;
}

/// Processor that returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughProcessor;

#[async_trait]
impl DocumentProcessor for PassThroughProcessor {
    async fn process(&self, document: Document) -> Result<Document> {
        Ok(document)
    }
}
