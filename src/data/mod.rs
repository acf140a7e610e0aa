//! Data module - CSV loading, cleaning and the in-memory registry

mod loader;
mod processor;
mod registry;
pub mod schema;

pub use loader::DataLoader;
pub use processor::DataProcessor;
pub use registry::Registry;
pub use schema::{AffiliateStatus, NewAffiliate};

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Error al cargar el archivo: {0}")]
    Load(String),
    #[error("Error al leer el archivo: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de datos: {0}")]
    Polars(#[from] PolarsError),
    #[error("Registro inválido: {0}")]
    InvalidRecord(String),
    #[error("No hay archivo pendiente de importación")]
    NothingStaged,
}
