//! Kit expansion: kit-level quantities to component quantities.

mod expand;

pub use expand::{Expansion, ExpansionDiagnostics, expand, expand_table};
