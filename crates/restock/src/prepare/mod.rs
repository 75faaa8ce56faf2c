//! Table preparators: raw uploaded tables to canonical typed records.
//!
//! Each preparator resolves its alias table, normalizes SKUs and coerces
//! numeric columns strictly (null-like cells are zero, anything else that
//! does not parse is an error).

mod tables;

pub use tables::{
    DIRECT_SALES_ALIASES, DirectSaleRecord, FULFILLMENT_ALIASES, FulfillmentRecord,
    PHYSICAL_ALIASES, PhysicalRecord, prepare_direct_sales, prepare_fulfillment,
    prepare_physical,
};
