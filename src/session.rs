//! Session State
//! Explicit application state: which table is loaded and how each user action
//! moves it forward.

use crate::config::AppConfig;
use crate::data::{DataLoader, NewAffiliate, Registry, RegistryError};
use std::path::{Path, PathBuf};

/// Where the current table came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataOrigin {
    Unloaded,
    File(PathBuf),
    Upload(String),
    /// Startup load failed; the registry is the empty header-only table.
    Fallback,
}

/// A file chosen for import but not yet confirmed.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// One interactive session over the affiliate registry.
pub struct Session {
    loader: DataLoader,
    registry: Registry,
    origin: DataOrigin,
    pending: Option<PendingUpload>,
    revision: u64,
    startup_warning: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            loader: DataLoader::new(),
            registry: Registry::empty(),
            origin: DataOrigin::Unloaded,
            pending: None,
            revision: 0,
            startup_warning: None,
        }
    }

    /// Start a session from the configured data file. A failed load leaves an
    /// empty table and a warning instead of an error.
    pub fn open(config: &AppConfig) -> Self {
        let mut session = Self::new();
        if let Err(e) = session.load_path(&config.data_file) {
            tracing::warn!(error = %e, "startup load failed, using empty registry");
            session.origin = DataOrigin::Fallback;
            session.startup_warning = Some(format!(
                "{e}. Por favor, asegúrate de que '{}' esté en la misma carpeta que la aplicación.",
                config.data_file.display()
            ));
        }
        session
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn origin(&self) -> &DataOrigin {
        &self.origin
    }

    /// Bumped on every change to the table; views use it to refresh caches.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn startup_warning(&self) -> Option<&str> {
        self.startup_warning.as_deref()
    }

    pub fn pending_upload(&self) -> Option<&PendingUpload> {
        self.pending.as_ref()
    }

    /// Unloaded/any -> Loaded from a file on disk.
    pub fn load_path(&mut self, path: &Path) -> Result<usize, RegistryError> {
        let df = self.loader.load_path(path)?;
        self.replace(Registry::from_cleaned(df), DataOrigin::File(path.to_path_buf()));
        self.startup_warning = None;
        Ok(self.registry.height())
    }

    /// Loaded -> Loaded' with one more record.
    pub fn append(&mut self, record: &NewAffiliate) -> Result<(), RegistryError> {
        self.registry.append(record)?;
        self.revision += 1;
        tracing::info!(
            cedula = %record.cedula,
            regional = %record.regional,
            rows = self.registry.height(),
            "affiliate appended"
        );
        Ok(())
    }

    /// Keep an uploaded file until the user confirms the import.
    pub fn stage_upload(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        tracing::debug!(file = %name, bytes = bytes.len(), "upload staged");
        self.pending = Some(PendingUpload { name, bytes });
    }

    pub fn discard_upload(&mut self) {
        self.pending = None;
    }

    /// Loaded -> Loaded'' replacing the whole table with the staged upload.
    /// A bad upload keeps the current table and stays staged.
    pub fn confirm_import(&mut self) -> Result<usize, RegistryError> {
        let pending = self.pending.as_ref().ok_or(RegistryError::NothingStaged)?;
        let df = self.loader.load_bytes(pending.bytes.clone())?;
        let origin = DataOrigin::Upload(pending.name.clone());
        self.pending = None;
        self.replace(Registry::from_cleaned(df), origin);
        tracing::info!(rows = self.registry.height(), "registry replaced from upload");
        Ok(self.registry.height())
    }

    /// Current table as CSV bytes. Does not change state.
    pub fn export_csv(&self) -> Result<Vec<u8>, RegistryError> {
        self.registry.to_csv_bytes()
    }

    /// Export straight to a file.
    pub fn export_to(&self, path: &Path) -> Result<usize, RegistryError> {
        let bytes = self.export_csv()?;
        std::fs::write(path, &bytes)?;
        tracing::info!(path = %path.display(), rows = self.registry.height(), "registry exported");
        Ok(self.registry.height())
    }

    fn replace(&mut self, registry: Registry, origin: DataOrigin) {
        self.registry = registry;
        self.origin = origin;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{DUES, TEXT_COLUMNS};
    use crate::data::AffiliateStatus;
    use std::io::Write;

    const SAMPLE: &str = "CEDULA,APELLIDOS / NOMBRES,REGIONAL,CIUDAD AFILIACION,ESTADO_AFILIADO,SUMA_CUOTAS\n\
        1,Ana,SUR,Pasto,ACTIVO,\"$1,000.00\"\n\
        2,Beto,ORIENTE,Cali,RETIRADO,$250.00\n";

    fn record() -> NewAffiliate {
        NewAffiliate {
            cedula: "3".into(),
            full_name: "Carla".into(),
            regional: "SUR".into(),
            status: AffiliateStatus::Active,
            dues: 500.0,
        }
    }

    fn session_from_file() -> (tempfile::NamedTempFile, Session) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = AppConfig {
            data_file: file.path().to_path_buf(),
            ..AppConfig::default()
        };
        let session = Session::open(&config);
        (file, session)
    }

    #[test]
    fn open_loads_configured_file() {
        let (file, session) = session_from_file();
        assert_eq!(session.registry().height(), 2);
        assert_eq!(session.origin(), &DataOrigin::File(file.path().to_path_buf()));
        assert!(session.startup_warning().is_none());
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn open_falls_back_to_empty_table() {
        let config = AppConfig {
            data_file: PathBuf::from("/nonexistent/DB_AFILIADOS.csv"),
            ..AppConfig::default()
        };
        let session = Session::open(&config);
        assert!(session.registry().is_empty());
        assert_eq!(session.origin(), &DataOrigin::Fallback);
        assert!(session.startup_warning().unwrap().contains("DB_AFILIADOS.csv"));
    }

    #[test]
    fn open_falls_back_on_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"CEDULA,REGIONAL\n1,SUR,EXTRA\n").unwrap();
        let config = AppConfig {
            data_file: file.path().to_path_buf(),
            ..AppConfig::default()
        };
        let session = Session::open(&config);

        assert_eq!(session.origin(), &DataOrigin::Fallback);
        assert!(session.registry().is_empty());
        assert!(session.startup_warning().is_some());
        let names = session.registry().column_names();
        for name in TEXT_COLUMNS.iter().chain([&DUES]) {
            assert!(names.iter().any(|n| n == name), "missing {name}");
        }
    }

    #[test]
    fn append_bumps_revision() {
        let (_file, mut session) = session_from_file();
        let before = session.revision();
        session.append(&record()).unwrap();
        assert_eq!(session.registry().height(), 3);
        assert_eq!(session.revision(), before + 1);
    }

    #[test]
    fn import_replaces_and_discards_appends() {
        let (_file, mut session) = session_from_file();
        session.append(&record()).unwrap();

        session.stage_upload("nuevo.csv", b"CEDULA,REGIONAL\n9,NORTE\n".to_vec());
        assert_eq!(session.confirm_import().unwrap(), 1);
        assert!(session.pending_upload().is_none());
        assert_eq!(session.origin(), &DataOrigin::Upload("nuevo.csv".into()));
        assert_eq!(session.registry().regionals(), vec!["NORTE".to_string()]);
    }

    #[test]
    fn bad_upload_keeps_current_table() {
        let (_file, mut session) = session_from_file();
        session.stage_upload("vacio.csv", Vec::new());
        assert!(session.confirm_import().is_err());
        assert_eq!(session.registry().height(), 2);
        assert!(session.pending_upload().is_some());
    }

    #[test]
    fn confirm_without_upload_is_an_error() {
        let mut session = Session::new();
        assert!(matches!(
            session.confirm_import(),
            Err(RegistryError::NothingStaged)
        ));
    }

    #[test]
    fn export_is_a_pure_read() {
        let (_file, session) = session_from_file();
        let revision = session.revision();
        let bytes = session.export_csv().unwrap();
        assert_eq!(session.revision(), revision);

        let text = String::from_utf8(bytes).unwrap();
        // header + 2 rows
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn export_to_writes_file() {
        let (_file, session) = session_from_file();
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("DB_AFILIADOS_ACTUALIZADA.csv");
        assert_eq!(session.export_to(&out).unwrap(), 2);
        assert!(std::fs::read_to_string(out).unwrap().starts_with("CEDULA,"));
    }
}
