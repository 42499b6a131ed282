//! AWS Cost Explorer provider for costtag
//!
//! This crate implements the `BillingSource` trait on top of the
//! `GetCostAndUsage` API.

pub mod cost_explorer;

pub use cost_explorer::CostExplorerSource;
