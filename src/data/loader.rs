//! CSV Data Loader Module
//! Reads affiliate CSV sources with Polars and hands them to the processor.

use super::{DataProcessor, RegistryError};
use polars::prelude::*;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::Cursor;
use std::path::Path;

/// Loads and cleans affiliate tables, caching the most recent source by content.
pub struct DataLoader {
    cache: Option<(u64, DataFrame)>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// Load a CSV file from disk.
    pub fn load_path(&mut self, path: &Path) -> Result<DataFrame, RegistryError> {
        let bytes = std::fs::read(path)
            .map_err(|e| RegistryError::Load(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read affiliate file");
        self.load_bytes(bytes)
    }

    /// Load a CSV from an in-memory byte source (e.g. an uploaded file).
    pub fn load_bytes(&mut self, bytes: Vec<u8>) -> Result<DataFrame, RegistryError> {
        let key = Self::content_key(&bytes);
        if let Some((cached, df)) = &self.cache {
            if *cached == key {
                tracing::debug!(rows = df.height(), "affiliate table served from cache");
                return Ok(df.clone());
            }
        }

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(RegistryError::Load("el archivo está vacío".into()));
        }
        // Polars decodes invalid UTF-8 lossily instead of failing
        if let Err(e) = std::str::from_utf8(&bytes) {
            return Err(RegistryError::Load(format!("el archivo no está en UTF-8: {e}")));
        }

        // Every column is read as text; typing happens in the processor
        let raw = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(|e| RegistryError::Load(e.to_string()))?;

        let missing = DataProcessor::missing_columns(&raw);
        if !missing.is_empty() {
            tracing::warn!(?missing, "affiliate file lacks expected columns, defaulting them");
        }

        let df = DataProcessor::normalize(raw)?;
        tracing::info!(rows = df.height(), columns = df.width(), "affiliate table loaded");

        self.cache = Some((key, df.clone()));
        Ok(df)
    }

    /// Whether `bytes` is the source currently held in the cache.
    #[cfg(test)]
    pub fn is_cached(&self, bytes: &[u8]) -> bool {
        let key = Self::content_key(bytes);
        self.cache.as_ref().is_some_and(|(cached, _)| *cached == key)
    }

    fn content_key(bytes: &[u8]) -> u64 {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        hasher.finish()
    }
}
