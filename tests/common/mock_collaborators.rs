/*!
 * Mock pipeline collaborators for testing
 *
 * Every mock records its calls into a shared `CallLog`, so a test can check which
 * stages ran and in what order after the pipeline has taken ownership of the mocks.
 */

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use captionflow::pipeline::{DocumentProcessor, PreparedMedia, Renderer, SubtitleDataStore, Transcriber};
use captionflow::{Document, MediaSettings};

/// Ordered record of collaborator calls
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: &str) {
        self.events.lock().unwrap().push(event.to_string());
    }

    /// All recorded events in call order
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Number of times `event` was recorded
    pub fn count(&self, event: &str) -> usize {
        self.events.lock().unwrap().iter().filter(|e| e.as_str() == event).count()
    }
}

/// Which renderer call should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererFailure {
    None,
    Open,
    Render,
    Close,
}

/// Renderer that keeps every document it renders
#[derive(Debug, Clone)]
pub struct MockRenderer {
    log: CallLog,
    failure: RendererFailure,
    rendered: Arc<Mutex<Vec<Document>>>,
    opened_with: Arc<Mutex<Option<MediaSettings>>>,
}

impl MockRenderer {
    pub fn new(log: &CallLog) -> Self {
        Self::failing(log, RendererFailure::None)
    }

    pub fn failing(log: &CallLog, failure: RendererFailure) -> Self {
        Self {
            log: log.clone(),
            failure,
            rendered: Arc::new(Mutex::new(Vec::new())),
            opened_with: Arc::new(Mutex::new(None)),
        }
    }

    /// Documents passed to `render`, in order
    pub fn rendered_documents(&self) -> Vec<Document> {
        self.rendered.lock().unwrap().clone()
    }

    /// Media settings passed to `open`
    pub fn opened_with(&self) -> Option<MediaSettings> {
        self.opened_with.lock().unwrap().clone()
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn open(&mut self, media: &MediaSettings) -> Result<PreparedMedia> {
        self.log.record("open");
        *self.opened_with.lock().unwrap() = Some(media.clone());
        if self.failure == RendererFailure::Open {
            return Err(anyhow!("cannot open media"));
        }
        Ok(PreparedMedia { audio_path: PathBuf::from("extracted_audio.wav") })
    }

    async fn render(&mut self, document: Document) -> Result<PathBuf> {
        self.log.record("render");
        if self.failure == RendererFailure::Render {
            return Err(anyhow!("renderer crashed"));
        }
        self.rendered.lock().unwrap().push(document);
        Ok(PathBuf::from("captioned.mp4"))
    }

    async fn close(&mut self) -> Result<()> {
        self.log.record("close");
        if self.failure == RendererFailure::Close {
            return Err(anyhow!("temporary audio could not be removed"));
        }
        Ok(())
    }
}

/// Transcriber returning a fixed document
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    log: CallLog,
    document: Document,
    fail: bool,
    audio_paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockTranscriber {
    pub fn new(log: &CallLog, document: Document) -> Self {
        Self {
            log: log.clone(),
            document,
            fail: false,
            audio_paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(log: &CallLog) -> Self {
        Self { fail: true, ..Self::new(log, Document::new()) }
    }

    /// Audio paths passed to `transcribe`
    pub fn audio_paths(&self) -> Vec<PathBuf> {
        self.audio_paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Document> {
        self.log.record("transcribe");
        self.audio_paths.lock().unwrap().push(audio_path.to_path_buf());
        if self.fail {
            return Err(anyhow!("speech model unavailable"));
        }
        Ok(self.document.clone())
    }
}

/// Processor replacing its input with a fixed document
#[derive(Debug, Clone)]
pub struct MockProcessor {
    log: CallLog,
    replacement: Document,
    received: Arc<Mutex<Vec<Document>>>,
}

impl MockProcessor {
    pub fn new(log: &CallLog, replacement: Document) -> Self {
        Self {
            log: log.clone(),
            replacement,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Documents passed to `process`
    pub fn received_documents(&self) -> Vec<Document> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentProcessor for MockProcessor {
    async fn process(&self, document: Document) -> Result<Document> {
        self.log.record("process");
        self.received.lock().unwrap().push(document);
        Ok(self.replacement.clone())
    }
}

/// Subtitle data store returning a fixed document
#[derive(Debug, Clone)]
pub struct MockSubtitleStore {
    log: CallLog,
    document: Document,
}

impl MockSubtitleStore {
    pub fn new(log: &CallLog, document: Document) -> Self {
        Self { log: log.clone(), document }
    }
}

#[async_trait]
impl SubtitleDataStore for MockSubtitleStore {
    async fn load(&self, _path: &Path) -> Result<Document> {
        self.log.record("load_subtitle_data");
        Ok(self.document.clone())
    }
}
