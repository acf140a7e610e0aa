//! KPI Calculator Module
//! Column-wise aggregations over the cleaned affiliate table.

use crate::data::schema::{DUES, REGIONAL, STATUS};
use polars::prelude::*;

pub const ACTIVE: &str = "ACTIVO";
pub const RETIRED: &str = "RETIRADO";

/// Headline indicators for the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kpis {
    pub total: usize,
    pub active: usize,
    pub retired: usize,
    pub total_collected: f64,
}

impl Kpis {
    /// Active affiliates as a percentage of the total, `None` for an empty table.
    pub fn active_percent(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.active as f64 / self.total as f64 * 100.0)
        }
    }
}

/// One row of the per-regional report.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalSummary {
    pub regional: String,
    pub affiliates: usize,
    pub active: usize,
    pub collected: f64,
}

/// Number of affiliates carrying one status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusShare {
    pub status: String,
    pub count: usize,
}

/// Computes dashboard aggregates with Polars lazy expressions.
pub struct KpiCalculator;

impl KpiCalculator {
    pub fn compute_kpis(df: &DataFrame) -> PolarsResult<Kpis> {
        if df.column(STATUS).is_err() {
            return Ok(Kpis {
                total: df.height(),
                total_collected: Self::sum_dues(df)?,
                ..Kpis::default()
            });
        }

        let out = df
            .clone()
            .lazy()
            .select([
                col(STATUS).eq(lit(ACTIVE)).sum().alias("active"),
                col(STATUS).eq(lit(RETIRED)).sum().alias("retired"),
            ])
            .collect()?;

        Ok(Kpis {
            total: df.height(),
            active: Self::first_count(&out, "active")?,
            retired: Self::first_count(&out, "retired")?,
            total_collected: Self::sum_dues(df)?,
        })
    }

    /// Sum of numeric dues; zero when the column is absent.
    pub fn sum_dues(df: &DataFrame) -> PolarsResult<f64> {
        let Ok(column) = df.column(DUES) else {
            return Ok(0.0);
        };
        let values = column.cast(&DataType::Float64)?;
        Ok(values.f64()?.into_iter().flatten().sum())
    }

    /// Per-regional affiliates, active count and collected dues, sorted by regional.
    pub fn regional_breakdown(df: &DataFrame) -> PolarsResult<Vec<RegionalSummary>> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(REGIONAL)])
            .agg([
                len().alias("Afiliados"),
                col(STATUS).eq(lit(ACTIVE)).sum().alias("Activos"),
                col(DUES).sum().alias("Recaudo_Total"),
            ])
            .collect()?;

        let regionals = grouped.column(REGIONAL)?.cast(&DataType::String)?;
        let affiliates = grouped.column("Afiliados")?.cast(&DataType::UInt64)?;
        let active = grouped.column("Activos")?.cast(&DataType::UInt64)?;
        let collected = grouped.column("Recaudo_Total")?.cast(&DataType::Float64)?;

        let mut rows: Vec<RegionalSummary> = regionals
            .str()?
            .into_iter()
            .zip(affiliates.u64()?.into_iter())
            .zip(active.u64()?.into_iter())
            .zip(collected.f64()?.into_iter())
            .map(|(((regional, n), a), sum)| RegionalSummary {
                regional: regional.unwrap_or_default().to_string(),
                affiliates: n.unwrap_or(0) as usize,
                active: a.unwrap_or(0) as usize,
                collected: sum.unwrap_or(0.0),
            })
            .collect();

        rows.sort_by(|a, b| a.regional.cmp(&b.regional));
        Ok(rows)
    }

    /// Affiliates per regional, largest first (value-count order).
    pub fn regional_counts(df: &DataFrame) -> PolarsResult<Vec<(String, usize)>> {
        let mut counts: Vec<(String, usize)> = Self::regional_breakdown(df)?
            .into_iter()
            .map(|row| (row.regional, row.affiliates))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(counts)
    }

    /// Affiliates per status, largest first.
    pub fn status_distribution(df: &DataFrame) -> PolarsResult<Vec<StatusShare>> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(STATUS)])
            .agg([len().alias("count")])
            .collect()?;

        let statuses = grouped.column(STATUS)?.cast(&DataType::String)?;
        let counts = grouped.column("count")?.cast(&DataType::UInt64)?;

        let mut shares: Vec<StatusShare> = statuses
            .str()?
            .into_iter()
            .zip(counts.u64()?.into_iter())
            .map(|(status, count)| StatusShare {
                status: status.unwrap_or_default().to_string(),
                count: count.unwrap_or(0) as usize,
            })
            .collect();

        shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
        Ok(shares)
    }

    fn first_count(df: &DataFrame, name: &str) -> PolarsResult<usize> {
        let column = df.column(name)?.cast(&DataType::UInt64)?;
        Ok(column.u64()?.get(0).unwrap_or(0) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AffiliateStatus, DataLoader, NewAffiliate, Registry};

    const SAMPLE: &str = "CEDULA,APELLIDOS / NOMBRES,REGIONAL,CIUDAD AFILIACION,ESTADO_AFILIADO,SUMA_CUOTAS\n\
        1,Ana,SUR,Pasto,ACTIVO,\"$1,000.00\"\n\
        2,Beto,SUR,Pasto,retirado,$250.25\n\
        3,Carla,ORIENTE,Cali,ACTIVO,\"$2,000.00\"\n\
        4,Dario,,Cali,,N/A\n\
        5,Elena,ORIENTE,Cali,SUSPENDIDO,$10.00\n";

    fn load(csv: &str) -> DataFrame {
        DataLoader::new().load_bytes(csv.as_bytes().to_vec()).unwrap()
    }

    #[test]
    fn single_row_scenario() {
        let df = load(
            "CEDULA,APELLIDOS / NOMBRES,REGIONAL,ESTADO_AFILIADO,SUMA_CUOTAS\n\
             123,Juan Perez,SUR,activo,\"$1,000.00\"\n",
        );
        let kpis = KpiCalculator::compute_kpis(&df).unwrap();
        assert_eq!(kpis.total, 1);
        assert_eq!(kpis.active, 1);
        assert_eq!(crate::stats::format_currency(kpis.total_collected), "$1,000.00");
        assert_eq!(kpis.active_percent(), Some(100.0));
    }

    #[test]
    fn kpis_count_statuses() {
        let kpis = KpiCalculator::compute_kpis(&load(SAMPLE)).unwrap();
        assert_eq!(kpis.total, 5);
        assert_eq!(kpis.active, 2);
        assert_eq!(kpis.retired, 1);
        assert!(kpis.active + kpis.retired <= kpis.total);
        assert!((kpis.total_collected - 3260.25).abs() < 1e-9);
    }

    #[test]
    fn empty_table_kpis_are_zero() {
        let kpis = KpiCalculator::compute_kpis(Registry::empty().dataframe()).unwrap();
        assert_eq!(kpis, Kpis::default());
        assert_eq!(kpis.active_percent(), None);
    }

    #[test]
    fn breakdown_sums_match_total() {
        let df = load(SAMPLE);
        let rows = KpiCalculator::regional_breakdown(&df).unwrap();
        let total = KpiCalculator::compute_kpis(&df).unwrap().total_collected;

        let names: Vec<&str> = rows.iter().map(|r| r.regional.as_str()).collect();
        assert_eq!(names, vec!["ORIENTE", "SIN ASIGNAR", "SUR"]);

        let sum: f64 = rows.iter().map(|r| r.collected).sum();
        assert!((sum - total).abs() < 1e-9);
        assert_eq!(rows.iter().map(|r| r.affiliates).sum::<usize>(), 5);

        let sur = rows.iter().find(|r| r.regional == "SUR").unwrap();
        assert_eq!(sur.affiliates, 2);
        assert_eq!(sur.active, 1);
    }

    #[test]
    fn append_moves_regional_totals() {
        let mut registry = Registry::from_cleaned(load(SAMPLE));
        let before = KpiCalculator::regional_breakdown(registry.dataframe()).unwrap();
        let sur_before = before.iter().find(|r| r.regional == "SUR").unwrap().clone();

        registry
            .append(&NewAffiliate {
                cedula: "6".into(),
                full_name: "Fabio".into(),
                regional: "SUR".into(),
                status: AffiliateStatus::Active,
                dues: 500.0,
            })
            .unwrap();

        let after = KpiCalculator::regional_breakdown(registry.dataframe()).unwrap();
        let sur_after = after.iter().find(|r| r.regional == "SUR").unwrap();
        assert_eq!(sur_after.affiliates, sur_before.affiliates + 1);
        assert!((sur_after.collected - sur_before.collected - 500.0).abs() < 1e-9);
    }

    #[test]
    fn counts_and_statuses_are_ordered_by_size() {
        let df = load(SAMPLE);
        let counts = KpiCalculator::regional_counts(&df).unwrap();
        assert_eq!(counts[0], ("ORIENTE".to_string(), 2));
        assert_eq!(counts[2], ("SIN ASIGNAR".to_string(), 1));

        let shares = KpiCalculator::status_distribution(&df).unwrap();
        assert_eq!(shares[0].status, "ACTIVO");
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares.iter().map(|s| s.count).sum::<usize>(), 5);
        assert!(shares.iter().any(|s| s.status == "DESCONOCIDO"));
    }
}
