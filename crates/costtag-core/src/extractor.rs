//! Extractor: one source round trip, one aggregate
//!
//! The extractor owns a billing-data source and the fixed query parameters.
//! Each call to [`Extractor::extract`] issues a single monthly request for the
//! chosen grouping dimension and aggregates whatever comes back.
//!
//! Remote failures are not fatal. The code and message are logged for the
//! operator and the aggregate is built from an empty report, so the caller
//! always receives a well-formed (possibly empty) result.
//!
//! # Examples
//!
//! ```no_run
//! use costtag_core::extractor::Extractor;
//! use costtag_core::source::BillingSource;
//! use costtag_core::types::GroupingSelector;
//!
//! # async fn example(source: impl BillingSource) {
//! let extractor = Extractor::new(source);
//! let aggregate = extractor.extract(GroupingSelector::Team).await;
//! println!("{} labels", aggregate.series.len());
//! # }
//! ```

use crate::aggregate::Aggregate;
use crate::error::CosttagError;
use crate::source::BillingSource;
use crate::types::{GroupingSelector, QueryConfig, RawUsageReport, UsageRequest};
use tracing::{debug, error, info};

/// Fetches and aggregates grouped cost data
pub struct Extractor<S> {
    source: S,
    config: QueryConfig,
}

impl<S: BillingSource> Extractor<S> {
    /// Create an extractor with the default query configuration
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: QueryConfig::default(),
        }
    }

    /// Replace the query configuration
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the query configuration
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Get the underlying billing source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch one report for `selector` and aggregate it
    pub async fn extract(&self, selector: GroupingSelector) -> Aggregate {
        let request = UsageRequest::new(selector, &self.config);
        info!(
            "Fetching {} costs by {} from {} to {}",
            request.group_type, request.group_key, request.start, request.end
        );

        let report = match self.source.get_cost_and_usage(&request).await {
            Ok(report) => {
                debug!("Source returned {} time periods", report.periods.len());
                report
            }
            Err(CosttagError::Source { code, message }) => {
                error!("{} {}", code, message);
                RawUsageReport::default()
            }
            Err(e) => {
                error!("Cost and usage request failed: {}", e);
                RawUsageReport::default()
            }
        };

        Aggregate::from_report(selector, &self.config.metric, &report)
    }
}
