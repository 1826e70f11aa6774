use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::transcript::RequestedFormat;

/// Pipeline configuration module
/// This module handles loading and validating the settings a caption pipeline
/// is built from.
/// Represents the pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Input media and output target
    pub media: MediaSettings,

    /// Optional external transcript
    #[serde(default)]
    pub transcript: TranscriptSettings,

    /// Optional persisted subtitle data to render instead of transcribing
    #[serde(default)]
    pub subtitle_data_path: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Media the pipeline reads from and renders into
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct MediaSettings {
    // @field: Source video or audio file
    pub input_path: PathBuf,

    // @field: Rendered output location
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl MediaSettings {
    pub fn new<P1: AsRef<Path>, P2: AsRef<Path>>(input_path: P1, output_path: P2) -> Self {
        Self {
            input_path: input_path.as_ref().to_path_buf(),
            output_path: output_path.as_ref().to_path_buf(),
        }
    }
}

/// External transcript settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TranscriptSettings {
    // @field: Transcript file, if one is supplied
    #[serde(default)]
    pub path: Option<PathBuf>,

    // @field: Format name, `auto` to detect
    #[serde(default)]
    pub format: RequestedFormat,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn as_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output.mp4")
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.media.input_path.as_os_str().is_empty() {
            return Err(anyhow!("Input media path is required"));
        }

        if self.transcript.path.is_none() && !self.transcript.format.is_auto() {
            return Err(anyhow!(
                "Transcript format '{}' was given without a transcript path",
                self.transcript.format
            ));
        }

        if let (Some(transcript), Some(subtitle_data)) = (&self.transcript.path, &self.subtitle_data_path) {
            return Err(anyhow!(
                "A transcript ({}) and subtitle data ({}) cannot be used together",
                transcript.display(),
                subtitle_data.display()
            ));
        }

        Ok(())
    }
}
