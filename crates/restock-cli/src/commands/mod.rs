//! CLI command implementations.

pub mod allocate;
pub mod calculate;
pub mod consolidate;
pub mod order;
pub mod output;

#[cfg(test)]
mod fixtures;
