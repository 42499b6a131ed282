//! Billing-data source trait
//!
//! This module defines the `BillingSource` trait implemented by every backend
//! able to answer a cost-and-usage request. The AWS Cost Explorer backend lives
//! in the `costtag-aws` crate; tests provide in-memory implementations.

use crate::error::Result;
use crate::types::{RawUsageReport, UsageRequest};
use async_trait::async_trait;

/// Trait for billing-data sources.
///
/// Implementations perform exactly one round trip per call and report remote
/// failures as `CosttagError::Source` carrying the source's code and message.
#[async_trait]
pub trait BillingSource: Send + Sync {
    /// Fetch grouped cost data for the request.
    async fn get_cost_and_usage(&self, request: &UsageRequest) -> Result<RawUsageReport>;
}

