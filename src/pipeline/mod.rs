/*!
 * Caption pipeline.
 *
 * The pipeline turns input media into captioned output:
 * 1. **Prepare**: open the media through the `Renderer`
 * 2. **Acquire**: use a supplied document, load persisted data, or transcribe
 * 3. **Process**: rewrite a transcribed document
 * 4. **Render** and **Close**
 */

pub mod collaborators;
pub mod orchestrator;
pub mod strategy;
pub mod subtitle_data;

pub use collaborators::{
    DocumentProcessor, PassThroughProcessor, PreparedMedia, Renderer, SubtitleDataStore, Transcriber,
};
pub use orchestrator::{CaptionPipeline, PipelineBuilder, PipelineReport, PipelineState};
pub use strategy::{AcquisitionStrategy, StrategyKind};
pub use subtitle_data::JsonSubtitleDataStore;
