/*!
 * Caption pipeline orchestrator.
 *
 * The orchestrator drives one caption run through a fixed sequence of stages:
 * 1. Prepare: open the input media and extract the audio track
 * 2. Acquire: obtain the document from the resolved `AcquisitionStrategy`
 * 3. Process: rewrite a transcribed or file-loaded document (skipped for
 *    supplied documents and persisted data)
 * 4. Render: render the document onto the media
 * 5. Close: release media resources, always, even after a failure
 *
 * Each stage can also be driven individually; calling one out of order fails with
 * `PipelineError::InvalidState`.
 */

use log::{debug, error, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::{Config, MediaSettings};
use crate::document::Document;
use crate::errors::PipelineError;
use crate::transcript::{RequestedFormat, TranscriptLoader};

use super::collaborators::{
    DocumentProcessor, PassThroughProcessor, PreparedMedia, Renderer, SubtitleDataStore, Transcriber,
};
use super::strategy::{AcquisitionStrategy, StrategyKind};
use super::subtitle_data::JsonSubtitleDataStore;

/// Lifecycle state of a caption pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Built, nothing opened yet
    Idle,
    /// Media opened and audio extracted
    Prepared,
    /// A document has been obtained
    DocumentAcquired,
    /// The document is ready to render
    Processed,
    /// Output has been written
    Rendered,
    /// Resources released; the pipeline cannot be reused
    Closed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Prepared => "prepared",
            Self::DocumentAcquired => "document-acquired",
            Self::Processed => "processed",
            Self::Rendered => "rendered",
            Self::Closed => "closed",
        };
        write!(f, "{}", name)
    }
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// How the document was obtained
    pub strategy: StrategyKind,

    /// Whether the document processor ran
    pub processed: bool,

    /// Location returned by the renderer
    pub output_path: PathBuf,

    /// Number of words handed to the renderer
    pub word_count: usize,

    /// Total duration of the run, teardown included
    pub duration: Duration,
}

impl PipelineReport {
    /// Get a one-line summary of the run.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        parts.push(format!("Duration: {:.2}s", self.duration.as_secs_f32()));
        parts.push(format!("Source: {}", self.strategy));
        if self.processed {
            parts.push("Processed".to_string());
        }
        parts.push(format!("Words: {}", self.word_count));
        parts.push(format!("Output: {}", self.output_path.display()));

        parts.join(" | ")
    }
}

/// The caption pipeline state machine.
#[derive(Debug)]
pub struct CaptionPipeline {
    media: MediaSettings,
    strategy: Option<AcquisitionStrategy>,
    strategy_kind: StrategyKind,
    renderer: Box<dyn Renderer>,
    transcriber: Option<Box<dyn Transcriber>>,
    processor: Box<dyn DocumentProcessor>,
    subtitle_data_store: Box<dyn SubtitleDataStore>,
    state: PipelineState,
    prepared: Option<PreparedMedia>,
    document: Option<Document>,
    processed: bool,
    output_path: Option<PathBuf>,
    rendered_words: usize,
}

impl CaptionPipeline {
    /// Start building a pipeline for the given media.
    pub fn builder(media: MediaSettings) -> PipelineBuilder {
        PipelineBuilder::new(media)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The strategy resolved at build time.
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy_kind
    }

    /// Run every stage in order and always close afterwards.
    ///
    /// A stage failure is returned unchanged; a failure while closing is only
    /// logged so it never hides the original error.
    pub async fn run(&mut self) -> Result<PipelineReport, PipelineError> {
        self.require_state("run", PipelineState::Idle)?;
        let start_time = Instant::now();

        let result = self.run_stages().await;

        if let Err(e) = self.close().await {
            warn!("Failed to close caption pipeline: {}", e);
        }

        let output_path = match result {
            Ok(output_path) => output_path,
            Err(e) => {
                error!("Caption pipeline failed: {}", e);
                return Err(e);
            }
        };

        let report = PipelineReport {
            strategy: self.strategy_kind,
            processed: self.processed,
            output_path,
            word_count: self.rendered_words,
            duration: start_time.elapsed(),
        };
        info!("Caption pipeline complete: {}", report.summary());
        Ok(report)
    }

    async fn run_stages(&mut self) -> Result<PathBuf, PipelineError> {
        self.prepare().await?;
        self.acquire_document().await?;
        self.process_document().await?;
        self.render().await
    }

    /// Open the input media and extract the audio track.
    pub async fn prepare(&mut self) -> Result<(), PipelineError> {
        self.require_state("prepare", PipelineState::Idle)?;

        let prepared = self.renderer.open(&self.media).await.map_err(PipelineError::Stage)?;
        debug!("Prepared media, audio at {}", prepared.audio_path.display());

        self.prepared = Some(prepared);
        self.transition(PipelineState::Prepared);
        Ok(())
    }

    /// Obtain the document using the resolved strategy.
    pub async fn acquire_document(&mut self) -> Result<(), PipelineError> {
        self.require_state("acquire a document", PipelineState::Prepared)?;
        let Some(strategy) = self.strategy.take() else {
            return Err(PipelineError::InvalidState {
                action: "acquire a document",
                state: self.state,
            });
        };

        let document = match strategy {
            AcquisitionStrategy::ExternalDocument(document) => {
                debug!("Using external document, skipping transcription");
                document
            }
            AcquisitionStrategy::LoadedTranscript(document) => {
                debug!("Using loaded transcript ({} words), skipping transcription", document.word_count());
                document
            }
            AcquisitionStrategy::PersistedData(path) => {
                debug!("Loading subtitle data from {}", path.display());
                self.subtitle_data_store.load(&path).await.map_err(PipelineError::Stage)?
            }
            AcquisitionStrategy::Transcribe => {
                let transcriber = self
                    .transcriber
                    .as_ref()
                    .ok_or(PipelineError::MissingCollaborator("transcriber"))?;
                let audio_path = self
                    .prepared
                    .as_ref()
                    .map(|prepared| prepared.audio_path.as_path())
                    .unwrap_or_else(|| Path::new(""));
                debug!("Transcribing {}", audio_path.display());
                transcriber.transcribe(audio_path).await.map_err(PipelineError::Stage)?
            }
        };

        self.document = Some(document);
        self.transition(PipelineState::DocumentAcquired);
        Ok(())
    }

    /// Run the document processor on a transcribed or loaded document.
    pub async fn process_document(&mut self) -> Result<(), PipelineError> {
        self.require_state("process the document", PipelineState::DocumentAcquired)?;
        let document = self.take_document("process the document")?;

        let document = if self.strategy_kind.runs_processor() {
            let processed = self.processor.process(document).await.map_err(PipelineError::Stage)?;
            self.processed = true;
            processed
        } else {
            debug!("Skipping processing for {}", self.strategy_kind);
            document
        };

        self.document = Some(document);
        self.transition(PipelineState::Processed);
        Ok(())
    }

    /// Render the document and return the output location.
    pub async fn render(&mut self) -> Result<PathBuf, PipelineError> {
        self.require_state("render", PipelineState::Processed)?;
        let document = self.take_document("render")?;
        let word_count = document.word_count();

        let output_path = self.renderer.render(document).await.map_err(PipelineError::Stage)?;

        self.rendered_words = word_count;
        self.output_path = Some(output_path.clone());
        self.transition(PipelineState::Rendered);
        Ok(output_path)
    }

    /// Release media resources. Calling this again is a no-op.
    pub async fn close(&mut self) -> Result<(), PipelineError> {
        if self.state == PipelineState::Closed {
            return Ok(());
        }

        // Closed even if teardown fails, so it is never retried.
        self.transition(PipelineState::Closed);
        self.prepared = None;
        self.document = None;
        self.renderer.close().await.map_err(PipelineError::Stage)
    }

    /// Output location of the last render, if any.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    fn require_state(&self, action: &'static str, expected: PipelineState) -> Result<(), PipelineError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(PipelineError::InvalidState { action, state: self.state })
        }
    }

    fn take_document(&mut self, action: &'static str) -> Result<Document, PipelineError> {
        self.document
            .take()
            .ok_or(PipelineError::InvalidState { action, state: self.state })
    }

    fn transition(&mut self, next: PipelineState) {
        debug!("Caption pipeline: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Builder resolving collaborators and the acquisition strategy.
#[derive(Debug)]
pub struct PipelineBuilder {
    media: MediaSettings,
    document: Option<Document>,
    transcript_file: Option<(PathBuf, RequestedFormat)>,
    subtitle_data_path: Option<PathBuf>,
    renderer: Option<Box<dyn Renderer>>,
    transcriber: Option<Box<dyn Transcriber>>,
    processor: Option<Box<dyn DocumentProcessor>>,
    subtitle_data_store: Option<Box<dyn SubtitleDataStore>>,
}

impl PipelineBuilder {
    /// Create a builder for the given media.
    pub fn new(media: MediaSettings) -> Self {
        Self {
            media,
            document: None,
            transcript_file: None,
            subtitle_data_path: None,
            renderer: None,
            transcriber: None,
            processor: None,
            subtitle_data_store: None,
        }
    }

    /// Create a builder from a validated configuration.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        config.validate().map_err(|e| PipelineError::Config(e.to_string()))?;

        let mut builder = Self::new(config.media.clone());
        if let Some(path) = &config.transcript.path {
            builder = builder.with_transcript_file(path, config.transcript.format);
        }
        if let Some(path) = &config.subtitle_data_path {
            builder = builder.with_subtitle_data_path(path);
        }
        Ok(builder)
    }

    /// Render this document instead of transcribing.
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    /// Load a transcript file at build time and process it instead of transcribing.
    pub fn with_transcript_file<P: AsRef<Path>>(mut self, path: P, format: RequestedFormat) -> Self {
        self.transcript_file = Some((path.as_ref().to_path_buf(), format));
        self
    }

    /// Render persisted subtitle data instead of transcribing.
    pub fn with_subtitle_data_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.subtitle_data_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_renderer<R: Renderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_transcriber<T: Transcriber + 'static>(mut self, transcriber: T) -> Self {
        self.transcriber = Some(Box::new(transcriber));
        self
    }

    pub fn with_processor<P: DocumentProcessor + 'static>(mut self, processor: P) -> Self {
        self.processor = Some(Box::new(processor));
        self
    }

    pub fn with_subtitle_data_store<S: SubtitleDataStore + 'static>(mut self, store: S) -> Self {
        self.subtitle_data_store = Some(Box::new(store));
        self
    }

    /// Resolve the acquisition strategy and build the pipeline.
    pub fn build(self) -> Result<CaptionPipeline, PipelineError> {
        let renderer = self.renderer.ok_or(PipelineError::MissingCollaborator("renderer"))?;

        let loaded_transcript = match (&self.document, self.transcript_file) {
            (None, Some((path, format))) => {
                debug!("Loading transcript {} ({})", path.display(), format);
                Some(TranscriptLoader::load(path, format)?)
            }
            _ => None,
        };

        let strategy = AcquisitionStrategy::resolve(self.document, loaded_transcript, self.subtitle_data_path);
        let strategy_kind = strategy.kind();
        if strategy_kind == StrategyKind::Transcribe && self.transcriber.is_none() {
            return Err(PipelineError::MissingCollaborator("transcriber"));
        }
        debug!("Resolved acquisition strategy: {}", strategy_kind);

        let processor: Box<dyn DocumentProcessor> = match self.processor {
            Some(processor) => processor,
            None => Box::new(PassThroughProcessor),
        };
        let subtitle_data_store: Box<dyn SubtitleDataStore> = match self.subtitle_data_store {
            Some(store) => store,
            None => Box::new(JsonSubtitleDataStore),
        };

        Ok(CaptionPipeline {
            media: self.media,
            strategy: Some(strategy),
            strategy_kind,
            renderer,
            transcriber: self.transcriber,
            processor,
            subtitle_data_store,
            state: PipelineState::Idle,
            prepared: None,
            document: None,
            processed: false,
            output_path: None,
            rendered_words: 0,
        })
    }
}
