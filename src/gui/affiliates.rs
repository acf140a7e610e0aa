//! Affiliate Management View
//! New-affiliate form, search box and the filtered affiliate list.

use super::table::TableView;
use crate::data::schema::KNOWN_REGIONALS;
use crate::data::{AffiliateStatus, NewAffiliate, Registry};
use egui::{Color32, ComboBox, RichText};

/// Actions triggered by the affiliate view
#[derive(Debug, Clone, PartialEq)]
pub enum AffiliatesAction {
    None,
    Submit(NewAffiliate),
}

/// Form fields, kept between frames.
#[derive(Debug, Clone, Default)]
struct AffiliateForm {
    cedula: String,
    full_name: String,
    regional: String,
    status: AffiliateStatus,
    dues: f64,
}

impl AffiliateForm {
    fn to_record(&self) -> NewAffiliate {
        NewAffiliate {
            cedula: self.cedula.clone(),
            full_name: self.full_name.clone(),
            regional: self.regional.clone(),
            status: self.status,
            dues: self.dues,
        }
    }
}

#[derive(Default)]
pub struct AffiliatesView {
    form: AffiliateForm,
    search: String,
    table: Option<((u64, String), TableView)>,
    table_error: Option<String>,
}

/// Regionals offered by the form: the known set plus any value in the data.
pub fn regional_options(registry: &Registry) -> Vec<String> {
    let mut options: Vec<String> = KNOWN_REGIONALS.iter().map(|s| s.to_string()).collect();
    for regional in registry.regionals() {
        if !options.contains(&regional) {
            options.push(regional);
        }
    }
    options
}

impl AffiliatesView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the form after a successful submission.
    pub fn reset_form(&mut self) {
        self.form = AffiliateForm::default();
    }

    pub fn show(&mut self, ui: &mut egui::Ui, registry: &Registry, revision: u64) -> AffiliatesAction {
        let mut action = AffiliatesAction::None;

        ui.heading("Administración de Registros");
        ui.add_space(8.0);

        egui::CollapsingHeader::new("➕ Registrar Nuevo Afiliado")
            .default_open(false)
            .show(ui, |ui| {
                if self.show_form(ui, registry) {
                    action = AffiliatesAction::Submit(self.form.to_record());
                }
            });

        ui.add_space(10.0);
        ui.label(RichText::new("Base de Datos Actual").size(16.0).strong());
        ui.horizontal(|ui| {
            ui.label("🔍 Buscar por Nombre o Cédula");
            ui.text_edit_singleline(&mut self.search);
        });
        ui.add_space(5.0);

        self.refresh_table(registry, revision);
        if let Some(error) = &self.table_error {
            ui.colored_label(Color32::from_rgb(220, 53, 69), error);
        }
        if let Some((_, table)) = &self.table {
            ui.label(
                RichText::new(format!("{} de {} registros", table.len(), registry.height()))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
            table.show(ui, "affiliates_table");
        }

        action
    }

    /// Returns `true` when the form was submitted.
    fn show_form(&mut self, ui: &mut egui::Ui, registry: &Registry) -> bool {
        let options = regional_options(registry);
        if self.form.regional.is_empty() {
            if let Some(first) = options.first() {
                self.form.regional = first.clone();
            }
        }

        let label_width = 110.0;
        egui::Grid::new("new_affiliate_form")
            .num_columns(2)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Cédula (ID)"));
                ui.text_edit_singleline(&mut self.form.cedula);
                ui.end_row();

                ui.add_sized([label_width, 20.0], egui::Label::new("Nombre Completo"));
                ui.text_edit_singleline(&mut self.form.full_name);
                ui.end_row();

                ui.add_sized([label_width, 20.0], egui::Label::new("Regional"));
                ComboBox::from_id_salt("form_regional")
                    .width(180.0)
                    .selected_text(&self.form.regional)
                    .show_ui(ui, |ui| {
                        for option in &options {
                            ui.selectable_value(&mut self.form.regional, option.clone(), option);
                        }
                    });
                ui.end_row();

                ui.add_sized([label_width, 20.0], egui::Label::new("Estado Inicial"));
                ComboBox::from_id_salt("form_status")
                    .width(180.0)
                    .selected_text(self.form.status.as_str())
                    .show_ui(ui, |ui| {
                        for status in AffiliateStatus::ALL {
                            ui.selectable_value(&mut self.form.status, status, status.as_str());
                        }
                    });
                ui.end_row();

                ui.add_sized([label_width, 20.0], egui::Label::new("Valor Cuota"));
                ui.add(
                    egui::DragValue::new(&mut self.form.dues)
                        .range(0.0..=f64::MAX)
                        .speed(100.0)
                        .prefix("$"),
                );
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.button("Guardar Afiliado").clicked()
    }

    fn refresh_table(&mut self, registry: &Registry, revision: u64) {
        let key = (revision, self.search.clone());
        if matches!(&self.table, Some((cached, _)) if *cached == key) {
            return;
        }
        match registry.search(&self.search) {
            Ok(df) => {
                self.table = Some((key, TableView::from_dataframe(&df)));
                self.table_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "affiliate search failed");
                self.table = None;
                self.table_error = Some(e.to_string());
            }
        }
    }
}
