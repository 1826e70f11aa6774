use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::path::Path;

use crate::document::Document;
use crate::file_utils::FileManager;
use super::collaborators::SubtitleDataStore;

// @module: JSON persistence for rendered documents

/// Stores documents as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSubtitleDataStore;

impl JsonSubtitleDataStore {
    /// Persist `document`, creating parent directories as needed
    pub async fn save(&self, path: &Path, document: &Document) -> Result<()> {
        let json = serde_json::to_string_pretty(document).context("Failed to serialize subtitle data")?;
        FileManager::write_to_file(path, &json)
            .with_context(|| format!("Failed to write subtitle data: {:?}", path))?;
        debug!("Saved {} words of subtitle data to {:?}", document.word_count(), path);
        Ok(())
    }
}

#[async_trait]
impl SubtitleDataStore for JsonSubtitleDataStore {
    async fn load(&self, path: &Path) -> Result<Document> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read subtitle data: {:?}", path))?;
        let document: Document = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse subtitle data: {:?}", path))?;
        Ok(document.normalize())
    }
}
