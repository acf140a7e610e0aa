//! Control Panel Widget
//! Left side panel: branding, section menu, data source and status line.

use crate::session::DataOrigin;
use egui::{Color32, RichText, TextureHandle};
use std::path::Path;

/// Mutually exclusive sections of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Affiliates,
    Reports,
    Transfer,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::Affiliates,
        Section::Reports,
        Section::Transfer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "📊 Dashboard",
            Section::Affiliates => "👥 Gestión de Afiliados",
            Section::Reports => "📈 Reportes por Regional",
            Section::Transfer => "📥 Importar/Exportar",
        }
    }
}

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Left side panel with the navigation menu.
pub struct ControlPanel {
    pub section: Section,
    logo: Option<TextureHandle>,
    status: String,
    status_kind: StatusKind,
}

impl ControlPanel {
    pub fn new(ctx: &egui::Context, logo_file: &Path) -> Self {
        Self {
            section: Section::default(),
            logo: Self::load_logo(ctx, logo_file),
            status: "Listo".to_string(),
            status_kind: StatusKind::Info,
        }
    }

    /// Logo texture, or `None` when the image is missing or unreadable.
    fn load_logo(ctx: &egui::Context, path: &Path) -> Option<TextureHandle> {
        let image = match image::open(path) {
            Ok(image) => image.to_rgba8(),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "logo not available, using text");
                return None;
            }
        };
        let size = [image.width() as usize, image.height() as usize];
        let pixels = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        Some(ctx.load_texture("logo", pixels, egui::TextureOptions::default()))
    }

    pub fn set_status(&mut self, kind: StatusKind, status: impl Into<String>) {
        self.status_kind = kind;
        self.status = status.into();
    }

    /// Draw the panel. Returns `true` when the section changed.
    pub fn show(&mut self, ui: &mut egui::Ui, origin: &DataOrigin, rows: usize) -> bool {
        let before = self.section;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            match &self.logo {
                Some(texture) => {
                    let size = texture.size_vec2();
                    let scale = (150.0 / size.x).min(1.0);
                    ui.add(egui::Image::new((texture.id(), size * scale)));
                }
                None => {
                    ui.label(
                        RichText::new("SINTRAOPO")
                            .size(24.0)
                            .strong()
                            .color(Color32::from_rgb(100, 149, 237)),
                    );
                }
            }
            ui.label(
                RichText::new("Gestión de Afiliados y Aportes")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Menu =====
        ui.label(RichText::new("Panel de Acciones").size(14.0).strong());
        ui.add_space(5.0);
        for section in Section::ALL {
            ui.radio_value(&mut self.section, section, section.label());
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Fuente de datos").size(14.0).strong());
        ui.add_space(5.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let source = match origin {
                    DataOrigin::Unloaded => "Sin cargar".to_string(),
                    DataOrigin::File(path) => path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string()),
                    DataOrigin::Upload(name) => format!("{name} (importado)"),
                    DataOrigin::Fallback => "Tabla vacía".to_string(),
                };
                ui.label(RichText::new(source).size(12.0));
                ui.label(
                    RichText::new(format!("{rows} registros"))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = match self.status_kind {
            StatusKind::Info => Color32::GRAY,
            StatusKind::Success => Color32::from_rgb(40, 167, 69),
            StatusKind::Warning => Color32::from_rgb(243, 156, 18),
            StatusKind::Error => Color32::from_rgb(220, 53, 69),
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        ui.add_space(10.0);
        ui.label(
            RichText::new("Sistema de gestión administrativa para el sindicato.")
                .size(10.0)
                .italics()
                .color(Color32::GRAY),
        );

        self.section != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_have_distinct_labels() {
        let labels: std::collections::HashSet<_> = Section::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels.len(), Section::ALL.len());
    }

    #[test]
    fn missing_logo_falls_back_to_text() {
        let ctx = egui::Context::default();
        let panel = ControlPanel::new(&ctx, Path::new("/nonexistent/Logo-Sintraopo.jpeg"));
        assert!(panel.logo.is_none());
        assert_eq!(panel.section, Section::Dashboard);
    }
}
