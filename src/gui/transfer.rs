//! Import/Export View
//! Bulk replacement from an uploaded CSV and download of the current table.

use crate::session::PendingUpload;
use egui::{Color32, RichText};

/// Actions triggered by the import/export view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    None,
    PickFile,
    ConfirmImport,
    DiscardUpload,
    Export,
}

pub struct TransferView;

impl TransferView {
    pub fn show(ui: &mut egui::Ui, pending: Option<&PendingUpload>, rows: usize) -> TransferAction {
        let mut action = TransferAction::None;

        ui.heading("Gestión de Archivos CSV");
        ui.add_space(8.0);

        ui.columns(2, |cols| {
            let ui = &mut cols[0];
            ui.label(RichText::new("Actualización Masiva").size(16.0).strong());
            ui.add_space(5.0);
            if ui.button("📂 Subir nuevo archivo .csv").clicked() {
                action = TransferAction::PickFile;
            }
            if let Some(upload) = pending {
                ui.add_space(5.0);
                ui.label(format!("{} ({} bytes)", upload.name, upload.bytes.len()));
                ui.horizontal(|ui| {
                    if ui.button("Confirmar Importación").clicked() {
                        action = TransferAction::ConfirmImport;
                    }
                    if ui.small_button("Cancelar").clicked() {
                        action = TransferAction::DiscardUpload;
                    }
                });
            }

            let ui = &mut cols[1];
            ui.label(RichText::new("Descargar Base de Datos").size(16.0).strong());
            ui.add_space(5.0);
            ui.label(
                RichText::new(format!("{rows} registros en memoria"))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
            if ui.button("📥 Exportar a CSV").clicked() {
                action = TransferAction::Export;
            }
        });

        ui.add_space(10.0);
        ui.separator();
        ui.colored_label(
            Color32::from_rgb(243, 156, 18),
            "Nota: La actualización masiva reemplazará los datos actuales en pantalla.",
        );

        action
    }
}
