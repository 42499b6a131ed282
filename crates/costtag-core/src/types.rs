//! Core domain types for costtag
//!
//! This module contains the request-side types (grouping selectors, query
//! configuration, the usage request) and the raw report shape returned by a
//! billing-data source.

use crate::error::{CosttagError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Tag key carrying the owning team of a resource
pub const TEAM_TAG_KEY: &str = "billed-team";

/// Tag key carrying the service a resource belongs to
pub const SERVICE_TAG_KEY: &str = "billed-service";

/// Cost metric requested when no other is configured
pub const DEFAULT_METRIC: &str = "BlendedCost";

/// Kind of a group definition understood by the billing-data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupType {
    /// Group by a cost allocation tag
    Tag,
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupType::Tag => write!(f, "TAG"),
        }
    }
}

/// Time granularity of the returned periods
///
/// Reports always use one bucket per calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    #[default]
    Monthly,
}

/// The billing dimension a report is grouped by
///
/// # Examples
/// ```
/// use costtag_core::types::{GroupingSelector, GroupType};
///
/// let selector = GroupingSelector::Service;
/// assert_eq!(selector.key(), "billed-service");
/// assert_eq!(selector.group_type(), GroupType::Tag);
/// assert_eq!(selector.dimension_name(), "SERVICE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingSelector {
    /// Group by the `billed-team` tag
    Team,
    /// Group by the `billed-service` tag
    Service,
}

impl GroupingSelector {
    /// All selectors, in report order
    pub const ALL: [GroupingSelector; 2] = [GroupingSelector::Team, GroupingSelector::Service];

    /// Tag key sent to the billing-data source
    pub fn key(&self) -> &'static str {
        match self {
            GroupingSelector::Team => TEAM_TAG_KEY,
            GroupingSelector::Service => SERVICE_TAG_KEY,
        }
    }

    /// Group definition type sent to the billing-data source
    pub fn group_type(&self) -> GroupType {
        GroupType::Tag
    }

    /// Name shown in the first header cell of a report
    pub fn dimension_name(&self) -> &'static str {
        match self {
            GroupingSelector::Service => "SERVICE",
            _ => "TEAM",
        }
    }
}

impl fmt::Display for GroupingSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupingSelector::Team => write!(f, "team"),
            GroupingSelector::Service => write!(f, "service"),
        }
    }
}

/// Fixed query parameters injected into the extractor
///
/// The default covers the 2019-12-01 .. 2020-03-08 window with the
/// `BlendedCost` metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Inclusive start of the queried interval
    pub start: NaiveDate,
    /// Exclusive end of the queried interval
    pub end: NaiveDate,
    /// Name of the single cost metric requested
    pub metric: String,
}

impl QueryConfig {
    /// Create a validated query configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the interval is empty or the metric name is blank
    pub fn new(start: NaiveDate, end: NaiveDate, metric: impl Into<String>) -> Result<Self> {
        let metric = metric.into();
        if start >= end {
            return Err(CosttagError::InvalidArgument(format!(
                "start date {start} must be before end date {end}"
            )));
        }
        if metric.trim().is_empty() {
            return Err(CosttagError::InvalidArgument(
                "metric name must not be empty".to_string(),
            ));
        }
        Ok(Self { start, end, metric })
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2019, 12, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2020, 3, 8).unwrap_or_default(),
            metric: DEFAULT_METRIC.to_string(),
        }
    }
}

/// A single cost-and-usage request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRequest {
    /// Metric names to return
    pub metrics: Vec<String>,
    /// Group definition key (tag name)
    pub group_key: String,
    /// Group definition type
    pub group_type: GroupType,
    pub granularity: Granularity,
    /// Interval start, `YYYY-MM-DD`
    pub start: String,
    /// Interval end, `YYYY-MM-DD`
    pub end: String,
}

impl UsageRequest {
    /// Build the monthly request for a selector under the given configuration
    pub fn new(selector: GroupingSelector, config: &QueryConfig) -> Self {
        Self {
            metrics: vec![config.metric.clone()],
            group_key: selector.key().to_string(),
            group_type: selector.group_type(),
            granularity: Granularity::Monthly,
            start: config.start.format("%Y-%m-%d").to_string(),
            end: config.end.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Amount of one metric for one group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricValue {
    /// Decimal string as returned by the source
    pub amount: Option<String>,
    /// Currency unit, e.g. `USD`
    pub unit: Option<String>,
}

impl MetricValue {
    pub fn new(amount: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            amount: Some(amount.into()),
            unit: Some(unit.into()),
        }
    }
}

/// One group within a time period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Composite keys, `<prefix>$<label>`
    pub keys: Vec<String>,
    /// Metric name to value
    pub metrics: HashMap<String, MetricValue>,
}

impl Group {
    /// Amount string for a metric, if the source reported one
    pub fn amount(&self, metric: &str) -> Option<&str> {
        self.metrics.get(metric).and_then(|m| m.amount.as_deref())
    }
}

/// One time bucket of a raw report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub start: String,
    pub end: String,
    pub groups: Vec<Group>,
}

/// Result set returned by a billing-data source
///
/// Periods are kept in the order the source returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUsageReport {
    pub periods: Vec<TimePeriod>,
}

impl RawUsageReport {
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}
