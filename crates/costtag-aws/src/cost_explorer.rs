//! AWS Cost Explorer billing source
//!
//! Wraps `aws_sdk_costexplorer::Client` behind the [`BillingSource`] trait.
//! Credentials and region come from the SDK default provider chain, including
//! the shared `~/.aws/config` and `~/.aws/credentials` files.

use async_trait::async_trait;
use aws_sdk_costexplorer::{
    Client,
    error::ProvideErrorMetadata,
    operation::get_cost_and_usage::GetCostAndUsageOutput,
    types::{DateInterval, GroupDefinition, GroupDefinitionType},
};
use costtag_core::error::{CosttagError, Result};
use costtag_core::source::BillingSource;
use costtag_core::types::{
    Granularity, Group, GroupType, MetricValue, RawUsageReport, TimePeriod, UsageRequest,
};
use tracing::{debug, info};

/// Code reported when the SDK error carries none (e.g. dispatch failures)
const UNKNOWN_ERROR_CODE: &str = "Unknown";

/// AWS Cost Explorer client wrapper
pub struct CostExplorerSource {
    client: Client,
}

impl CostExplorerSource {
    /// Create a source using the default AWS configuration
    pub async fn new() -> Self {
        Self::from_settings(None, None).await
    }

    /// Create a source with an optional region and shared-config profile override
    pub async fn from_settings(region: Option<String>, profile: Option<String>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            debug!("Using AWS region override: {}", region);
            loader = loader.region(aws_config::Region::new(region));
        }
        if let Some(profile) = profile {
            debug!("Using AWS profile: {}", profile);
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;
        Self::from_client(Client::new(&config))
    }

    /// Wrap an already configured client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BillingSource for CostExplorerSource {
    async fn get_cost_and_usage(&self, request: &UsageRequest) -> Result<RawUsageReport> {
        let interval = DateInterval::builder()
            .start(&request.start)
            .end(&request.end)
            .build()
            .map_err(|e| CosttagError::InvalidRequest(e.to_string()))?;

        let group_by = GroupDefinition::builder()
            .r#type(group_definition_type(request.group_type))
            .key(&request.group_key)
            .build();

        let output = self
            .client
            .get_cost_and_usage()
            .time_period(interval)
            .granularity(granularity(request.granularity))
            .group_by(group_by)
            .set_metrics(Some(request.metrics.clone()))
            .send()
            .await
            .map_err(|e| {
                let code = e.code().unwrap_or(UNKNOWN_ERROR_CODE).to_string();
                let message = e.message().map(str::to_string).unwrap_or_else(|| e.to_string());
                CosttagError::remote(code, message)
            })?;

        let report = report_from_output(&output);
        info!(
            "Cost Explorer returned {} time periods for {}",
            report.periods.len(),
            request.group_key
        );
        Ok(report)
    }
}

fn group_definition_type(group_type: GroupType) -> GroupDefinitionType {
    match group_type {
        GroupType::Tag => GroupDefinitionType::Tag,
    }
}

fn granularity(granularity: Granularity) -> aws_sdk_costexplorer::types::Granularity {
    match granularity {
        Granularity::Monthly => aws_sdk_costexplorer::types::Granularity::Monthly,
    }
}

/// Convert an SDK response into the source-independent report shape
pub fn report_from_output(output: &GetCostAndUsageOutput) -> RawUsageReport {
    let periods = output
        .results_by_time()
        .iter()
        .map(|result| {
            let (start, end) = result
                .time_period()
                .map(|p| (p.start().to_string(), p.end().to_string()))
                .unwrap_or_default();

            let groups = result
                .groups()
                .iter()
                .map(|group| Group {
                    keys: group.keys().to_vec(),
                    metrics: group
                        .metrics()
                        .map(|metrics| {
                            metrics
                                .iter()
                                .map(|(name, value)| {
                                    (
                                        name.clone(),
                                        MetricValue {
                                            amount: value.amount().map(str::to_string),
                                            unit: value.unit().map(str::to_string),
                                        },
                                    )
                                })
                                .collect()
                        })
                        .unwrap_or_default(),
                })
                .collect();

            TimePeriod { start, end, groups }
        })
        .collect();

    RawUsageReport { periods }
}
