//! Registry Schema
//! Column names, sentinel values and the typed record accepted by the form.

use super::RegistryError;

pub const CEDULA: &str = "CEDULA";
pub const FULL_NAME: &str = "APELLIDOS / NOMBRES";
pub const REGIONAL: &str = "REGIONAL";
pub const CITY: &str = "CIUDAD AFILIACION";
pub const STATUS: &str = "ESTADO_AFILIADO";
pub const DUES_RAW: &str = "SUMA_CUOTAS";
/// Numeric dues, derived from [`DUES_RAW`] at load time.
pub const DUES: &str = "SUMA_CUOTAS_NUM";

/// Text columns every cleaned table carries, in header order.
pub const TEXT_COLUMNS: [&str; 6] = [CEDULA, FULL_NAME, REGIONAL, CITY, STATUS, DUES_RAW];

pub const DEFAULT_STATUS: &str = "DESCONOCIDO";
pub const DEFAULT_REGIONAL: &str = "SIN ASIGNAR";

/// Regionals offered by the form even before any data mentions them.
pub const KNOWN_REGIONALS: [&str; 5] = ["CENTRO A", "EJE CAFETERO", "NOROCCIDENTE", "SUR", "ORIENTE"];

/// Status a new affiliate can be registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AffiliateStatus {
    #[default]
    Active,
    Retired,
}

impl AffiliateStatus {
    pub const ALL: [AffiliateStatus; 2] = [AffiliateStatus::Active, AffiliateStatus::Retired];

    pub fn as_str(&self) -> &'static str {
        match self {
            AffiliateStatus::Active => "ACTIVO",
            AffiliateStatus::Retired => "RETIRADO",
        }
    }
}

impl std::fmt::Display for AffiliateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record submitted through the new-affiliate form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAffiliate {
    pub cedula: String,
    pub full_name: String,
    pub regional: String,
    pub status: AffiliateStatus,
    pub dues: f64,
}

impl NewAffiliate {
    /// Reject records that would break the cleaned-table invariants.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let blank = |field: &str| field.trim().is_empty();

        if blank(&self.cedula) {
            return Err(RegistryError::InvalidRecord("la cédula es obligatoria".into()));
        }
        if blank(&self.full_name) {
            return Err(RegistryError::InvalidRecord("el nombre es obligatorio".into()));
        }
        if blank(&self.regional) {
            return Err(RegistryError::InvalidRecord("la regional es obligatoria".into()));
        }
        if !self.dues.is_finite() || self.dues < 0.0 {
            return Err(RegistryError::InvalidRecord(format!(
                "valor de cuota inválido: {}",
                self.dues
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NewAffiliate {
        NewAffiliate {
            cedula: "123".into(),
            full_name: "Juan Perez".into(),
            regional: "SUR".into(),
            status: AffiliateStatus::Active,
            dues: 500.0,
        }
    }

    #[test]
    fn valid_record_passes() {
        assert!(record().validate().is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut r = record();
        r.cedula = "  ".into();
        assert!(matches!(r.validate(), Err(RegistryError::InvalidRecord(_))));

        let mut r = record();
        r.full_name.clear();
        assert!(r.validate().is_err());

        let mut r = record();
        r.regional.clear();
        assert!(r.validate().is_err());
    }

    #[test]
    fn negative_or_nan_dues_are_rejected() {
        let mut r = record();
        r.dues = -1.0;
        assert!(r.validate().is_err());
        r.dues = f64::NAN;
        assert!(r.validate().is_err());
    }

    #[test]
    fn status_labels() {
        assert_eq!(AffiliateStatus::Active.as_str(), "ACTIVO");
        assert_eq!(AffiliateStatus::Retired.to_string(), "RETIRADO");
    }
}
