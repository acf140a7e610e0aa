//! Application configuration, read from an optional JSON file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "sintraopo.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Affiliate CSV loaded at startup.
    pub data_file: PathBuf,
    /// Branding image shown above the menu; a text title is used when absent.
    pub logo_file: PathBuf,
    /// Suggested name for the export dialog.
    pub export_file_name: String,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("DB_AFILIADOS.csv"),
            logo_file: PathBuf::from("Logo-Sintraopo.jpeg"),
            export_file_name: "DB_AFILIADOS_ACTUALIZADA.csv".to_string(),
            log_filter: "info".to_string(),
            window_size: [1400.0, 850.0],
        }
    }
}

impl AppConfig {
    /// Read `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/sintraopo.json")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_file": "otra.csv", "log_filter": "debug" }}"#).unwrap();

        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.data_file, PathBuf::from("otra.csv"));
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.export_file_name, "DB_AFILIADOS_ACTUALIZADA.csv");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(AppConfig::load(file.path()).is_err());
    }
}
