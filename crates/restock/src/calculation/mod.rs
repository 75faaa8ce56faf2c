//! Reposition calculation: sales velocity, stock and BOM to purchase quantities.

mod engine;
mod params;
mod report;

pub use engine::{RepositionCalculator, compute, reserve_30d, target_stock};
pub use params::{RESERVE_DAYS, ReplenishmentParams, SALES_WINDOW_DAYS};
pub use report::{
    ReportDiagnostics, RepositionReport, RepositionRow, round_cents, write_delimited,
};
