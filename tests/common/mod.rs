//! Common test utilities and helpers for costtag tests
//!
//! Mock billing sources and builders for raw cost reports.

#![allow(dead_code)]

use async_trait::async_trait;
use costtag::{
    error::{CosttagError, Result},
    source::BillingSource,
    types::{Group, MetricValue, RawUsageReport, TimePeriod, UsageRequest},
};
use std::sync::Mutex;

/// Metric every builder reports amounts under
pub const TEST_METRIC: &str = "BlendedCost";

/// Builder for raw reports, one period at a time
#[derive(Default)]
pub struct ReportBuilder {
    periods: Vec<TimePeriod>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new period; following `group` calls add to it
    pub fn period(mut self, start: &str, end: &str) -> Self {
        self.periods.push(TimePeriod {
            start: start.to_string(),
            end: end.to_string(),
            groups: Vec::new(),
        });
        self
    }

    /// Add a single-key group to the current period
    pub fn group(self, key: &str, amount: &str) -> Self {
        self.group_with_keys(&[key], amount)
    }

    /// Add a group carrying several composite keys
    pub fn group_with_keys(mut self, keys: &[&str], amount: &str) -> Self {
        let mut group = Group {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        };
        group
            .metrics
            .insert(TEST_METRIC.to_string(), MetricValue::new(amount, "USD"));
        self.push_group(group)
    }

    /// Add a group that reports no amount at all
    pub fn group_without_amount(self, key: &str) -> Self {
        let group = Group {
            keys: vec![key.to_string()],
            ..Default::default()
        };
        self.push_group(group)
    }

    fn push_group(mut self, group: Group) -> Self {
        match self.periods.last_mut() {
            Some(period) => period.groups.push(group),
            None => panic!("call period() before adding groups"),
        }
        self
    }

    pub fn build(self) -> RawUsageReport {
        RawUsageReport {
            periods: self.periods,
        }
    }
}

/// In-memory source returning a canned response
pub struct MockSource {
    response: std::result::Result<RawUsageReport, (String, String)>,
    requests: Mutex<Vec<UsageRequest>>,
}

impl MockSource {
    pub fn returning(report: RawUsageReport) -> Self {
        Self {
            response: Ok(report),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(code: &str, message: &str) -> Self {
        Self {
            response: Err((code.to_string(), message.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<UsageRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl BillingSource for MockSource {
    async fn get_cost_and_usage(&self, request: &UsageRequest) -> Result<RawUsageReport> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Ok(report) => Ok(report.clone()),
            Err((code, message)) => Err(CosttagError::remote(code, message)),
        }
    }
}
