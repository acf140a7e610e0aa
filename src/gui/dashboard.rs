//! Dashboard View
//! KPI cards plus affiliates-by-regional, status and dues charts.

use crate::charts::{ChartData, ChartPlotter};
use crate::data::Registry;
use crate::stats::{format_currency, format_percent, KpiCalculator, Kpis};
use egui::{Color32, RichText};
use polars::prelude::PolarsResult;

/// Aggregates backing one render of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub kpis: Kpis,
    pub by_regional: ChartData,
    pub by_status: ChartData,
    pub collected_by_regional: ChartData,
}

impl DashboardData {
    pub fn compute(registry: &Registry) -> PolarsResult<Self> {
        let df = registry.dataframe();
        let kpis = KpiCalculator::compute_kpis(df)?;
        let by_regional = ChartData::from_pairs(
            KpiCalculator::regional_counts(df)?
                .into_iter()
                .map(|(regional, count)| (regional, count as f64)),
        );
        let by_status = ChartData::from_pairs(
            KpiCalculator::status_distribution(df)?
                .into_iter()
                .map(|s| (s.status, s.count as f64)),
        );
        let collected_by_regional = ChartData::from_pairs(
            KpiCalculator::regional_breakdown(df)?
                .into_iter()
                .map(|r| (r.regional, r.collected)),
        );
        Ok(Self {
            kpis,
            by_regional,
            by_status,
            collected_by_regional,
        })
    }
}

#[derive(Default)]
pub struct DashboardView {
    cache: Option<(u64, DashboardData)>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    fn data(&mut self, registry: &Registry, revision: u64) -> PolarsResult<&DashboardData> {
        let data = match self.cache.take() {
            Some((rev, data)) if rev == revision => data,
            _ => DashboardData::compute(registry)?,
        };
        Ok(&self.cache.insert((revision, data)).1)
    }

    pub fn show(&mut self, ui: &mut egui::Ui, registry: &Registry, revision: u64) {
        ui.heading("Indicadores Clave de Desempeño (KPIs)");
        ui.add_space(8.0);

        let data = match self.data(registry, revision) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(error = %e, "dashboard aggregation failed");
                ui.colored_label(Color32::from_rgb(220, 53, 69), format!("Error: {e}"));
                return;
            }
        };

        let kpis = &data.kpis;
        ui.columns(4, |cols| {
            Self::metric(&mut cols[0], "Total Afiliados", &kpis.total.to_string(), None);
            Self::metric(
                &mut cols[1],
                "Activos",
                &kpis.active.to_string(),
                kpis.active_percent().map(format_percent),
            );
            Self::metric(&mut cols[2], "Retirados", &kpis.retired.to_string(), None);
            Self::metric(
                &mut cols[3],
                "Recaudo Total",
                &format_currency(kpis.total_collected),
                None,
            );
        });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.columns(2, |cols| {
                cols[0].label(RichText::new("Afiliados por Regional").size(16.0).strong());
                ChartPlotter::draw_bar_chart(
                    &mut cols[0],
                    "dashboard_regional_counts",
                    &data.by_regional,
                    "Cantidad",
                );

                cols[1].label(RichText::new("Distribución por Estado").size(16.0).strong());
                ChartPlotter::draw_donut_chart(&mut cols[1], &data.by_status, |v| {
                    format!("{v:.0}")
                });
            });

            ui.add_space(15.0);
            ui.label(RichText::new("Recaudo por Regional").size(16.0).strong());
            ChartPlotter::draw_donut_chart(ui, &data.collected_by_regional, format_currency);
        });
    }

    fn metric(ui: &mut egui::Ui, label: &str, value: &str, delta: Option<String>) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(26.0).strong());
                if let Some(delta) = delta {
                    ui.label(
                        RichText::new(format!("↑ {delta}"))
                            .size(12.0)
                            .color(Color32::from_rgb(40, 167, 69)),
                    );
                }
            });
    }
}
