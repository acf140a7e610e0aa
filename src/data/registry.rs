//! Affiliate Registry
//! The cleaned in-memory table plus the operations the views perform on it.

use super::schema::{CEDULA, DUES, DUES_RAW, FULL_NAME, REGIONAL, STATUS};
use super::{DataProcessor, NewAffiliate, RegistryError};
use crate::stats::format_currency;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Cleaned affiliate table. Always carries every expected column.
#[derive(Debug, Clone)]
pub struct Registry {
    df: DataFrame,
}

impl Default for Registry {
    fn default() -> Self {
        Self::empty()
    }
}

impl Registry {
    /// Wrap a table that already went through [`DataProcessor::normalize`].
    pub fn from_cleaned(df: DataFrame) -> Self {
        Self { df }
    }

    /// Header-only table used when nothing could be loaded.
    pub fn empty() -> Self {
        let df = DataProcessor::normalize(DataFrame::empty())
            .unwrap_or_else(|_| DataFrame::empty());
        Self { df }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Append one record from the form. Columns the form does not know stay null.
    pub fn append(&mut self, record: &NewAffiliate) -> Result<(), RegistryError> {
        record.validate()?;

        let columns: Vec<Column> = self
            .df
            .get_columns()
            .iter()
            .map(|c| {
                let name = c.name().clone();
                if name.as_str() == DUES {
                    return Column::new(name, [record.dues]);
                }
                let value = match name.as_str() {
                    CEDULA => Some(record.cedula.trim().to_string()),
                    FULL_NAME => Some(record.full_name.trim().to_string()),
                    REGIONAL => Some(record.regional.trim().to_string()),
                    STATUS => Some(record.status.as_str().to_string()),
                    DUES_RAW => Some(format_currency(record.dues)),
                    _ => None,
                };
                Column::new(name, [value])
            })
            .collect();

        let row = DataFrame::new(columns)?;
        self.df.vstack_mut(&row)?;
        Ok(())
    }

    /// Rows whose name contains `query` (case-insensitive) or whose cedula
    /// contains it. An empty query keeps every row.
    pub fn search(&self, query: &str) -> Result<DataFrame, RegistryError> {
        if query.is_empty() {
            return Ok(self.df.clone());
        }

        // Null names or cedulas never match
        let name_hit = col(FULL_NAME)
            .str()
            .to_lowercase()
            .str()
            .contains_literal(lit(query.to_lowercase()))
            .fill_null(lit(false));
        let cedula_hit = col(CEDULA)
            .str()
            .contains_literal(lit(query.to_string()))
            .fill_null(lit(false));

        let filtered = self
            .df
            .clone()
            .lazy()
            .filter(name_hit.or(cedula_hit))
            .collect()?;
        Ok(filtered)
    }

    /// Distinct regional values, sorted.
    pub fn regionals(&self) -> Vec<String> {
        DataProcessor::text_values(&self.df, REGIONAL)
            .into_iter()
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Serialize the whole table: UTF-8, header row, no index column.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, RegistryError> {
        let mut buf: Vec<u8> = Vec::new();
        let mut df = self.df.clone();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut df)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{CITY, TEXT_COLUMNS};
    use crate::data::{AffiliateStatus, DataLoader};

    const SAMPLE: &str = "CEDULA,APELLIDOS / NOMBRES,REGIONAL,CIUDAD AFILIACION,ESTADO_AFILIADO,SUMA_CUOTAS\n\
        123,Juan Perez,SUR,Pasto,activo,\"$1,000.00\"\n\
        456,Ana Gomez,ORIENTE,Cali,RETIRADO,\"$2,500.50\"\n\
        789,Pedro Juanes,SUR,Ipiales,ACTIVO,$300.00\n";

    fn registry() -> Registry {
        let df = DataLoader::new()
            .load_bytes(SAMPLE.as_bytes().to_vec())
            .unwrap();
        Registry::from_cleaned(df)
    }

    fn new_affiliate() -> NewAffiliate {
        NewAffiliate {
            cedula: "999".into(),
            full_name: "Maria Lopez".into(),
            regional: "SUR".into(),
            status: AffiliateStatus::Active,
            dues: 500.0,
        }
    }

    #[test]
    fn empty_registry_has_expected_headers() {
        let registry = Registry::empty();
        assert!(registry.is_empty());
        let names = registry.column_names();
        for name in TEXT_COLUMNS {
            assert!(names.iter().any(|n| n == name));
        }
        assert!(names.iter().any(|n| n == DUES));
    }

    #[test]
    fn append_adds_one_typed_row() {
        let mut registry = registry();
        registry.append(&new_affiliate()).unwrap();

        assert_eq!(registry.height(), 4);
        let df = registry.dataframe();
        assert_eq!(DataProcessor::dues_column(df)[3], 500.0);
        assert_eq!(
            DataProcessor::text_values(df, DUES_RAW)[3].as_deref(),
            Some("$500.00")
        );
        assert_eq!(
            DataProcessor::text_values(df, STATUS)[3].as_deref(),
            Some("ACTIVO")
        );
        assert_eq!(DataProcessor::text_values(df, CITY)[3], None);
    }

    #[test]
    fn append_to_empty_registry() {
        let mut registry = Registry::empty();
        registry.append(&new_affiliate()).unwrap();
        assert_eq!(registry.height(), 1);
        assert_eq!(registry.regionals(), vec!["SUR".to_string()]);
    }

    #[test]
    fn invalid_append_leaves_table_untouched() {
        let mut registry = registry();
        let mut record = new_affiliate();
        record.cedula.clear();
        assert!(registry.append(&record).is_err());
        assert_eq!(registry.height(), 3);
    }

    #[test]
    fn search_matches_name_or_cedula() {
        let registry = registry();

        // "juan" hits "Juan Perez" and "Pedro Juanes" case-insensitively
        assert_eq!(registry.search("juan").unwrap().height(), 2);
        assert_eq!(registry.search("45").unwrap().height(), 1);
        assert_eq!(registry.search("zzz").unwrap().height(), 0);
        assert_eq!(registry.search("").unwrap().height(), 3);
    }

    #[test]
    fn search_skips_null_fields() {
        let df = DataLoader::new()
            .load_bytes(b"CEDULA,APELLIDOS / NOMBRES\n11,\n,Luz Mora\n".to_vec())
            .unwrap();
        let registry = Registry::from_cleaned(df);

        assert_eq!(registry.search("11").unwrap().height(), 1);
        assert_eq!(registry.search("MORA").unwrap().height(), 1);
        assert_eq!(registry.search("x").unwrap().height(), 0);
    }

    #[test]
    fn regionals_are_distinct_and_sorted() {
        assert_eq!(
            registry().regionals(),
            vec!["ORIENTE".to_string(), "SUR".to_string()]
        );
    }

    #[test]
    fn export_round_trips_rows_and_columns() {
        let registry = registry();
        let bytes = registry.to_csv_bytes().unwrap();

        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("CEDULA,APELLIDOS / NOMBRES,REGIONAL"));

        let reloaded = Registry::from_cleaned(DataLoader::new().load_bytes(bytes).unwrap());
        assert_eq!(reloaded.height(), registry.height());
        assert_eq!(reloaded.column_names(), registry.column_names());
        assert_eq!(
            DataProcessor::dues_column(reloaded.dataframe()),
            DataProcessor::dues_column(registry.dataframe())
        );
    }
}
