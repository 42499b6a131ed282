//! Core types, traits, and aggregation for costtag
//!
//! This crate provides the request and report types, the error type, the
//! `BillingSource` trait, and the extraction pipeline that turns a grouped
//! cost report into a label x month matrix.

pub mod aggregate;
pub mod error;
pub mod extractor;
pub mod source;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use aggregate::Aggregate;
pub use error::{CosttagError, Result};
pub use extractor::Extractor;
pub use source::BillingSource;
pub use types::{GroupingSelector, QueryConfig, RawUsageReport, UsageRequest};
