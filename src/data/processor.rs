//! Data Processor Module
//! Cleans a raw affiliate table: currency parsing, sentinel defaults and
//! guaranteed columns.

use super::schema::{DEFAULT_REGIONAL, DEFAULT_STATUS, DUES, DUES_RAW, REGIONAL, STATUS, TEXT_COLUMNS};
use polars::prelude::*;

/// Parse a currency-formatted value such as `"$17,509.00"`.
///
/// Every `$` and `,` is removed before parsing; anything that still fails to
/// parse, or parses to a non-finite value, counts as zero.
pub fn clean_currency(raw: &str) -> f64 {
    let stripped: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    match stripped.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Handles data cleaning for the affiliate registry.
pub struct DataProcessor;

impl DataProcessor {
    /// Turn a freshly parsed table into the cleaned registry shape.
    ///
    /// Output columns: every input column as text, any missing entry of
    /// [`TEXT_COLUMNS`] appended as nulls, then [`DUES`] as `f64`.
    pub fn normalize(df: DataFrame) -> PolarsResult<DataFrame> {
        let height = df.height();
        let dues = Self::dues_values(&df);

        let mut columns: Vec<Column> = Vec::with_capacity(df.width() + TEXT_COLUMNS.len());
        for column in df.get_columns() {
            if column.name().as_str() == DUES {
                continue;
            }
            columns.push(column.cast(&DataType::String)?);
        }
        for name in TEXT_COLUMNS {
            if !columns.iter().any(|c| c.name().as_str() == name) {
                columns.push(Column::full_null(name.into(), height, &DataType::String));
            }
        }
        columns.push(Column::new(DUES.into(), dues));

        let mut cleaned = DataFrame::new(columns)?;

        let status: Vec<String> = Self::text_values(&cleaned, STATUS)
            .into_iter()
            .map(|v| Self::fill_blank(v, DEFAULT_STATUS).to_uppercase())
            .collect();
        cleaned.with_column(Column::new(STATUS.into(), status))?;

        let regional: Vec<String> = Self::text_values(&cleaned, REGIONAL)
            .into_iter()
            .map(|v| Self::fill_blank(v, DEFAULT_REGIONAL))
            .collect();
        cleaned.with_column(Column::new(REGIONAL.into(), regional))?;

        Ok(cleaned)
    }

    /// Numeric dues for every row, preferring the raw currency column.
    fn dues_values(df: &DataFrame) -> Vec<f64> {
        let source = if df.column(DUES_RAW).is_ok() {
            DUES_RAW
        } else {
            DUES
        };
        Self::text_values(df, source)
            .into_iter()
            .map(|v| v.as_deref().map(clean_currency).unwrap_or(0.0))
            .collect()
    }

    /// Column values as owned text; an absent column reads as all nulls.
    pub fn text_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        let Ok(column) = df.column(name).and_then(|c| c.cast(&DataType::String)) else {
            return vec![None; df.height()];
        };
        let Ok(ca) = column.str() else {
            return vec![None; df.height()];
        };
        ca.into_iter().map(|v| v.map(str::to_string)).collect()
    }

    /// Numeric dues column, zeros when absent.
    pub fn dues_column(df: &DataFrame) -> Vec<f64> {
        df.column(DUES)
            .ok()
            .and_then(|c| c.f64().ok())
            .map(|ca| ca.into_iter().map(|v| v.unwrap_or(0.0)).collect())
            .unwrap_or_else(|| vec![0.0; df.height()])
    }

    fn fill_blank(value: Option<String>, default: &str) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => default.to_string(),
        }
    }

    /// Expected columns absent from the raw table, for the load report.
    pub fn missing_columns(df: &DataFrame) -> Vec<&'static str> {
        TEXT_COLUMNS
            .into_iter()
            .filter(|name| df.column(name).is_err())
            .collect()
    }
}
