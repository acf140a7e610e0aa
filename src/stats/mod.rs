//! Stats module - KPI aggregation and display formatting

mod calculator;
mod format;

pub use calculator::{KpiCalculator, Kpis, RegionalSummary};
pub use format::{format_compact, format_currency, format_percent};
