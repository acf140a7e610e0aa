//! Sintraopo Main Application
//! Main window with control panel and the view for the selected section.

use crate::config::AppConfig;
use crate::data::NewAffiliate;
use crate::gui::{
    AffiliatesAction, AffiliatesView, ControlPanel, DashboardView, ReportsView, Section,
    StatusKind, TransferAction, TransferView,
};
use crate::session::Session;
use egui::SidePanel;

/// Main application window.
pub struct SintraopoApp {
    config: AppConfig,
    session: Session,
    control_panel: ControlPanel,
    dashboard: DashboardView,
    affiliates: AffiliatesView,
    reports: ReportsView,
}

impl SintraopoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let session = Session::open(&config);
        let mut control_panel = ControlPanel::new(&cc.egui_ctx, &config.logo_file);

        match session.startup_warning() {
            Some(warning) => control_panel.set_status(StatusKind::Warning, warning),
            None => control_panel.set_status(
                StatusKind::Info,
                format!("{} registros cargados", session.registry().height()),
            ),
        }

        Self {
            config,
            session,
            control_panel,
            dashboard: DashboardView::new(),
            affiliates: AffiliatesView::new(),
            reports: ReportsView::new(),
        }
    }

    fn handle_submit(&mut self, record: NewAffiliate) {
        match self.session.append(&record) {
            Ok(()) => {
                self.affiliates.reset_form();
                self.control_panel.set_status(
                    StatusKind::Success,
                    format!("Afiliado {} registrado con éxito", record.full_name.trim()),
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "affiliate rejected");
                self.control_panel.set_status(StatusKind::Error, e.to_string());
            }
        }
    }

    /// Handle CSV upload selection
    fn handle_pick_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return; // User cancelled
        };

        match std::fs::read(&path) {
            Ok(bytes) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.session.stage_upload(name, bytes);
                self.control_panel
                    .set_status(StatusKind::Info, "Archivo listo para importar");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "upload unreadable");
                self.control_panel
                    .set_status(StatusKind::Error, format!("Error: {e}"));
            }
        }
    }

    fn handle_confirm_import(&mut self) {
        match self.session.confirm_import() {
            Ok(rows) => self.control_panel.set_status(
                StatusKind::Success,
                format!("Base de datos actualizada con {rows} registros."),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "import rejected");
                self.control_panel.set_status(StatusKind::Error, e.to_string());
            }
        }
    }

    fn handle_export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&self.config.export_file_name)
            .save_file()
        else {
            return; // User cancelled
        };

        match self.session.export_to(&path) {
            Ok(rows) => self.control_panel.set_status(
                StatusKind::Success,
                format!("Exportados {rows} registros a {}", path.display()),
            ),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "export failed");
                self.control_panel.set_status(StatusKind::Error, e.to_string());
            }
        }
    }
}

impl eframe::App for SintraopoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let rows = self.session.registry().height();
                    if self.control_panel.show(ui, self.session.origin(), rows) {
                        tracing::debug!(section = ?self.control_panel.section, "section changed");
                    }
                });
            });

        // Central panel - selected section
        egui::CentralPanel::default().show(ctx, |ui| {
            let revision = self.session.revision();
            match self.control_panel.section {
                Section::Dashboard => {
                    self.dashboard.show(ui, self.session.registry(), revision);
                }
                Section::Affiliates => {
                    let action = self.affiliates.show(ui, self.session.registry(), revision);
                    if let AffiliatesAction::Submit(record) = action {
                        self.handle_submit(record);
                    }
                }
                Section::Reports => {
                    self.reports.show(ui, self.session.registry(), revision);
                }
                Section::Transfer => {
                    let rows = self.session.registry().height();
                    match TransferView::show(ui, self.session.pending_upload(), rows) {
                        TransferAction::PickFile => self.handle_pick_file(),
                        TransferAction::ConfirmImport => self.handle_confirm_import(),
                        TransferAction::DiscardUpload => self.session.discard_upload(),
                        TransferAction::Export => self.handle_export(),
                        TransferAction::None => {}
                    }
                }
            }
        });
    }
}
