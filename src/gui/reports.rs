//! Regional Reports View
//! Per-regional summary table and collected-dues comparison.

use crate::charts::{ChartData, ChartPlotter};
use crate::data::Registry;
use crate::stats::{format_currency, KpiCalculator, RegionalSummary};
use egui::{Color32, RichText};

#[derive(Default)]
pub struct ReportsView {
    cache: Option<(u64, Vec<RegionalSummary>)>,
}

impl ReportsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, registry: &Registry, revision: u64) {
        ui.heading("Análisis Detallado por Regional");
        ui.add_space(8.0);

        let rows = match self.cache.take() {
            Some((rev, rows)) if rev == revision => rows,
            _ => match KpiCalculator::regional_breakdown(registry.dataframe()) {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::error!(error = %e, "regional breakdown failed");
                    ui.colored_label(Color32::from_rgb(220, 53, 69), format!("Error: {e}"));
                    return;
                }
            },
        };

        egui::ScrollArea::vertical().show(ui, |ui| {
            Self::draw_summary_table(ui, &rows);

            ui.add_space(15.0);
            ui.label(RichText::new("Recaudo de Cuotas por Regional").size(16.0).strong());
            let chart = ChartData::from_pairs(rows.iter().map(|r| (r.regional.clone(), r.collected)));
            ChartPlotter::draw_bar_chart(ui, "reports_collected", &chart, "Recaudo_Total");
        });

        self.cache = Some((revision, rows));
    }

    fn draw_summary_table(ui: &mut egui::Ui, rows: &[RegionalSummary]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("regional_summary")
                    .striped(true)
                    .min_col_width(110.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("REGIONAL").strong());
                        ui.label(RichText::new("Afiliados").strong());
                        ui.label(RichText::new("Activos").strong());
                        ui.label(RichText::new("Recaudo_Total").strong());
                        ui.end_row();

                        for row in rows {
                            ui.label(&row.regional);
                            ui.label(row.affiliates.to_string());
                            ui.label(row.active.to_string());
                            ui.label(format_currency(row.collected));
                            ui.end_row();
                        }
                    });
            });
    }
}
