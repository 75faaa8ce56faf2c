//! Planning on top of calculated reports.
//!
//! Consolidates several companies against one catalog, filters the result,
//! splits received stock between companies and drafts purchase orders.

mod allocation;
mod consolidate;
mod filter;
mod order;

pub use allocation::{AllocationShare, allocate, allocate_by_sales};
pub use consolidate::{
    CompanyInputs, CompanyRow, ConsolidatedReport, consolidate, consolidate_with,
};
pub use filter::ReportFilter;
pub use order::{DraftItem, PurchaseDraft, PurchaseOrder, order_number};
