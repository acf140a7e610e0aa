//! Chart Plotter Module
//! Bar charts via egui_plot and donut charts painted with egui shapes.

use crate::stats::format_compact;
use egui::{Color32, Pos2, RichText, Sense, Shape, Stroke};
use egui_plot::{Bar, BarChart, Plot};
use std::f32::consts::TAU;

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Labelled values for one chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn from_pairs<I, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        let (labels, values) = pairs.into_iter().map(|(l, v)| (l.into(), v)).unzip();
        Self { labels, values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().filter(|v| **v > 0.0).sum()
    }
}

/// Angular extent of one donut slice, in radians from 12 o'clock clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutSlice {
    pub start: f32,
    pub sweep: f32,
    pub fraction: f64,
}

/// Renders the dashboard and report charts.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Slice geometry for `values`. Non-positive values get an empty slice;
    /// an all-zero input yields all-empty slices.
    pub fn donut_slices(values: &[f64]) -> Vec<DonutSlice> {
        let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
        let mut start = 0.0f32;
        values
            .iter()
            .map(|&v| {
                let fraction = if total > 0.0 && v > 0.0 { v / total } else { 0.0 };
                let sweep = fraction as f32 * TAU;
                let slice = DonutSlice {
                    start,
                    sweep,
                    fraction,
                };
                start += sweep;
                slice
            })
            .collect()
    }

    /// Vertical bar chart, one coloured bar per label.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, data: &ChartData, y_label: &str) {
        if data.is_empty() {
            ui.label(RichText::new("Sin datos").color(Color32::GRAY));
            return;
        }

        let x_labels = data.labels.clone();
        let bars: Vec<Bar> = data
            .values
            .iter()
            .zip(data.labels.iter())
            .enumerate()
            .map(|(i, (&value, label))| {
                Bar::new(i as f64, value)
                    .width(0.6)
                    .name(label)
                    .fill(Self::color(i))
            })
            .collect();

        Plot::new(id)
            .height(300.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_grid([false, true])
            .include_y(0.0)
            .x_axis_label("Regional")
            .y_axis_label(y_label)
            .y_axis_formatter(|mark, _range| format_compact(mark.value))
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    x_labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).element_formatter(Box::new(
                    |bar, _chart| format!("{}\n{}", bar.name, format_compact(bar.value)),
                )));
            });
    }

    /// Donut chart with a legend listing each label and its share.
    pub fn draw_donut_chart(ui: &mut egui::Ui, data: &ChartData, value_fmt: fn(f64) -> String) {
        if data.is_empty() || data.total() <= 0.0 {
            ui.label(RichText::new("Sin datos").color(Color32::GRAY));
            return;
        }

        let slices = Self::donut_slices(&data.values);

        ui.horizontal(|ui| {
            let diameter = 220.0;
            let (rect, _) = ui.allocate_exact_size(egui::vec2(diameter, diameter), Sense::hover());
            let center = rect.center();
            let outer = diameter / 2.0 - 4.0;
            // 0.4 hole, as in the original dashboards
            let inner = outer * 0.4;

            let painter = ui.painter();
            for (i, slice) in slices.iter().enumerate() {
                if slice.sweep <= 0.0 {
                    continue;
                }
                let steps = ((slice.sweep / TAU) * 96.0).ceil().max(1.0) as usize;
                let step = slice.sweep / steps as f32;
                for s in 0..steps {
                    let a0 = slice.start + step * s as f32;
                    let a1 = a0 + step;
                    let quad = vec![
                        Self::polar(center, inner, a0),
                        Self::polar(center, outer, a0),
                        Self::polar(center, outer, a1),
                        Self::polar(center, inner, a1),
                    ];
                    painter.add(Shape::convex_polygon(quad, Self::color(i), Stroke::NONE));
                }
            }

            ui.add_space(12.0);
            ui.vertical(|ui| {
                for (i, (label, value)) in data.labels.iter().zip(data.values.iter()).enumerate() {
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
                        ui.painter().rect_filled(rect, 3.0, Self::color(i));
                        let fraction = slices.get(i).map(|s| s.fraction).unwrap_or(0.0);
                        ui.label(
                            RichText::new(format!(
                                "{label}: {} ({:.1}%)",
                                value_fmt(*value),
                                fraction * 100.0
                            ))
                            .size(12.0),
                        );
                    });
                }
            });
        });
    }

    fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
        // Angle 0 points up, growing clockwise
        Pos2::new(
            center.x + radius * angle.sin(),
            center.y - radius * angle.cos(),
        )
    }
}
