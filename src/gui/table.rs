//! Table Widget
//! Read-only, virtualised rendering of a registry slice.

use crate::data::schema::DUES;
use crate::data::DataProcessor;
use crate::stats::format_currency;
use egui::{RichText, ScrollArea};
use polars::prelude::DataFrame;

const ROW_HEIGHT: f32 = 20.0;
const COLUMN_WIDTH: f32 = 160.0;

/// Display-ready copy of a table: headers plus one string per cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_dataframe(df: &DataFrame) -> Self {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let columns: Vec<Vec<String>> = headers
            .iter()
            .map(|name| {
                if name == DUES {
                    DataProcessor::dues_column(df)
                        .into_iter()
                        .map(format_currency)
                        .collect()
                } else {
                    DataProcessor::text_values(df, name)
                        .into_iter()
                        .map(Option::unwrap_or_default)
                        .collect()
                }
            })
            .collect();

        let rows = (0..df.height())
            .map(|i| columns.iter().map(|c| c[i].clone()).collect())
            .collect();

        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn show(&self, ui: &mut egui::Ui, id: &str) {
        ScrollArea::horizontal().id_salt(id).show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    for header in &self.headers {
                        ui.add_sized(
                            [COLUMN_WIDTH, ROW_HEIGHT],
                            egui::Label::new(RichText::new(header).strong()).truncate(),
                        );
                    }
                });
                ui.separator();

                ScrollArea::vertical()
                    .id_salt(format!("{id}_rows"))
                    .auto_shrink([false, false])
                    .show_rows(ui, ROW_HEIGHT, self.rows.len(), |ui, row_range| {
                        for row in &self.rows[row_range] {
                            ui.horizontal(|ui| {
                                for cell in row {
                                    ui.add_sized(
                                        [COLUMN_WIDTH, ROW_HEIGHT],
                                        egui::Label::new(cell.as_str()).truncate(),
                                    );
                                }
                            });
                        }
                    });
            });
        });
    }
}
