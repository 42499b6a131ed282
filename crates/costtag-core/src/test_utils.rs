//! Shared test utilities for unit tests
//!
//! Integration tests cannot reach this module because it is `#[cfg(test)]`;
//! they keep their own helpers in `tests/common/mod.rs`.

use crate::error::{CosttagError, Result};
use crate::source::BillingSource;
use crate::types::{Group, MetricValue, RawUsageReport, TimePeriod, UsageRequest};
use async_trait::async_trait;
use std::sync::Mutex;

/// Group with one key and a `BlendedCost` amount
pub fn team_group(key: &str, amount: &str) -> Group {
    let mut group = Group {
        keys: vec![key.to_string()],
        ..Default::default()
    };
    group
        .metrics
        .insert("BlendedCost".to_string(), MetricValue::new(amount, "USD"));
    group
}

pub fn period(start: &str, end: &str, groups: Vec<Group>) -> TimePeriod {
    TimePeriod {
        start: start.to_string(),
        end: end.to_string(),
        groups,
    }
}

pub fn report(periods: Vec<TimePeriod>) -> RawUsageReport {
    RawUsageReport { periods }
}

/// Source that always returns the same report and records requests
pub struct StaticSource {
    report: RawUsageReport,
    requests: Mutex<Vec<UsageRequest>>,
}

impl StaticSource {
    pub fn new(report: RawUsageReport) -> Self {
        Self {
            report,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<UsageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BillingSource for StaticSource {
    async fn get_cost_and_usage(&self, request: &UsageRequest) -> Result<RawUsageReport> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.report.clone())
    }
}

/// Source that always fails with a remote error
pub struct FailingSource {
    code: String,
    message: String,
}

impl FailingSource {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl BillingSource for FailingSource {
    async fn get_cost_and_usage(&self, _request: &UsageRequest) -> Result<RawUsageReport> {
        Err(CosttagError::remote(&self.code, &self.message))
    }
}
