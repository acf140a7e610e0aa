//! GUI module - User interface components

mod affiliates;
mod app;
mod control_panel;
mod dashboard;
mod reports;
mod table;
mod transfer;

pub use affiliates::{AffiliatesAction, AffiliatesView};
pub use app::SintraopoApp;
pub use control_panel::{ControlPanel, Section, StatusKind};
pub use dashboard::DashboardView;
pub use reports::ReportsView;
pub use transfer::{TransferAction, TransferView};
