//! Aggregation of raw cost reports
//!
//! Turns the nested result set of a billing-data source (periods -> groups ->
//! metric amounts keyed by composite tag strings) into a dense label x
//! time-bucket matrix with per-bucket totals.
//!
//! Two behaviors here are part of the report contract and are kept on purpose:
//!
//! - amounts that fail to parse count as zero, without any diagnostic;
//! - a label's slot in a bucket is overwritten, not accumulated, so when
//!   several groups resolve to the same label in one period the last one wins.
//!   Column totals, on the other hand, sum every contribution.
//!
//! # Examples
//!
//! ```
//! use costtag_core::aggregate::Aggregate;
//! use costtag_core::types::{Group, GroupingSelector, MetricValue, RawUsageReport, TimePeriod};
//!
//! let mut group = Group { keys: vec!["billed-team$core".to_string()], ..Default::default() };
//! group.metrics.insert("BlendedCost".to_string(), MetricValue::new("42.00", "USD"));
//!
//! let report = RawUsageReport {
//!     periods: vec![TimePeriod {
//!         start: "2020-01-01".to_string(),
//!         end: "2020-02-01".to_string(),
//!         groups: vec![group],
//!     }],
//! };
//!
//! let aggregate = Aggregate::from_report(GroupingSelector::Team, "BlendedCost", &report);
//! assert_eq!(aggregate.dimension_name, "TEAM");
//! assert_eq!(aggregate.series["core"], vec![42.0]);
//! assert_eq!(aggregate.column_totals, vec![42.0]);
//! ```

use crate::types::{GroupingSelector, RawUsageReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Delimiter between the tag prefix and the label in a composite key
pub const KEY_DELIMITER: char = '$';

/// Label used for keys that carry no usable label
pub const UNKNOWN_LABEL: &str = "unknown";

/// Dense, label-indexed cost matrix for one grouping dimension
///
/// Every vector in `series` and `column_totals` has one entry per
/// `time_buckets` entry. Buckets where a label reported nothing hold `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// What the rows represent, `TEAM` or `SERVICE`
    pub dimension_name: String,
    /// `<start>/<end>` labels in source order
    pub time_buckets: Vec<String>,
    /// Label to per-bucket amount, iterated in label order
    pub series: BTreeMap<String, Vec<f64>>,
    /// Sum of every group amount per bucket
    pub column_totals: Vec<f64>,
}

impl Aggregate {
    /// Empty aggregate for a selector with `bucket_count` time buckets
    pub fn new(selector: GroupingSelector, bucket_count: usize) -> Self {
        Self {
            dimension_name: selector.dimension_name().to_string(),
            time_buckets: vec![String::new(); bucket_count],
            series: BTreeMap::new(),
            column_totals: vec![0.0; bucket_count],
        }
    }

    /// Build the aggregate for `metric` from a raw report
    pub fn from_report(selector: GroupingSelector, metric: &str, report: &RawUsageReport) -> Self {
        let bucket_count = report.periods.len();
        let mut aggregate = Self::new(selector, bucket_count);

        for (index, period) in report.periods.iter().enumerate() {
            aggregate.time_buckets[index] = format!("{}/{}", period.start, period.end);

            for group in &period.groups {
                let amount = parse_amount_or_zero(group.amount(metric));

                for key in &group.keys {
                    let label = label_from_key(key);
                    let slots = aggregate
                        .series
                        .entry(label.to_string())
                        .or_insert_with(|| vec![0.0; bucket_count]);
                    // Overwrite: last group seen for a label in this bucket wins.
                    slots[index] = amount;
                    aggregate.column_totals[index] += amount;
                }
            }
        }

        debug!(
            "Aggregated {} buckets into {} {} labels",
            bucket_count,
            aggregate.series.len(),
            aggregate.dimension_name
        );

        aggregate
    }

    /// Number of time buckets
    pub fn bucket_count(&self) -> usize {
        self.time_buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_buckets.is_empty() && self.series.is_empty()
    }

    /// Sum of all column totals
    pub fn grand_total(&self) -> f64 {
        self.column_totals.iter().sum()
    }
}

/// Extract the label from a composite `<prefix>$<label>` key
///
/// The key is split after every delimiter and only the second segment is used,
/// so `a$b$c` yields `b$`. Keys without a delimiter, or with nothing after the
/// first one, fall back to [`UNKNOWN_LABEL`].
///
/// ```
/// use costtag_core::aggregate::label_from_key;
///
/// assert_eq!(label_from_key("billed-team$core"), "core");
/// assert_eq!(label_from_key("billed-team$"), "unknown");
/// assert_eq!(label_from_key("no-delimiter"), "unknown");
/// assert_eq!(label_from_key("a$b$c"), "b$");
/// ```
pub fn label_from_key(key: &str) -> &str {
    key.split_inclusive(KEY_DELIMITER)
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .unwrap_or(UNKNOWN_LABEL)
}

/// Parse a decimal amount, treating missing or malformed input as zero
pub fn parse_amount_or_zero(amount: Option<&str>) -> f64 {
    amount.and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{period, report, team_group};

    #[test]
    fn test_label_from_key() {
        assert_eq!(label_from_key("billed-service$checkout"), "checkout");
        assert_eq!(label_from_key("$leading"), "leading");
        assert_eq!(label_from_key("billed-service$"), UNKNOWN_LABEL);
        assert_eq!(label_from_key("billed-service"), UNKNOWN_LABEL);
        assert_eq!(label_from_key(""), UNKNOWN_LABEL);
        assert_eq!(label_from_key("x$y$z"), "y$");
        assert_eq!(label_from_key("x$$z"), "$");
    }

    #[test]
    fn test_parse_amount_or_zero() {
        assert_eq!(parse_amount_or_zero(Some("100.00")), 100.0);
        assert_eq!(parse_amount_or_zero(Some("-3.5")), -3.5);
        assert_eq!(parse_amount_or_zero(Some("1e2")), 100.0);
        assert_eq!(parse_amount_or_zero(Some("12,50")), 0.0);
        assert_eq!(parse_amount_or_zero(Some("")), 0.0);
        assert_eq!(parse_amount_or_zero(None), 0.0);
    }

    #[test]
    fn test_end_to_end_example() {
        let raw = report(vec![period(
            "2020-01-01",
            "2020-02-01",
            vec![team_group("acct$alpha", "100.00"), team_group("acct$beta", "50.50")],
        )]);

        let aggregate = Aggregate::from_report(GroupingSelector::Team, "BlendedCost", &raw);

        assert_eq!(aggregate.dimension_name, "TEAM");
        assert_eq!(aggregate.time_buckets, vec!["2020-01-01/2020-02-01"]);
        assert_eq!(aggregate.series.len(), 2);
        assert_eq!(aggregate.series["alpha"], vec![100.0]);
        assert_eq!(aggregate.series["beta"], vec![50.5]);
        assert_eq!(aggregate.column_totals, vec![150.5]);
    }

    #[test]
    fn test_last_write_wins_within_bucket() {
        let raw = report(vec![period(
            "2020-01-01",
            "2020-02-01",
            vec![team_group("acct$X", "10"), team_group("acct$X", "20")],
        )]);

        let aggregate = Aggregate::from_report(GroupingSelector::Team, "BlendedCost", &raw);

        assert_eq!(aggregate.series["X"], vec![20.0]);
        assert_eq!(aggregate.column_totals, vec![30.0]);
    }

    #[test]
    fn test_sparse_labels_are_zero_filled() {
        let raw = report(vec![
            period("2020-01-01", "2020-02-01", vec![team_group("t$a", "1")]),
            period("2020-02-01", "2020-03-01", vec![team_group("t$b", "2")]),
            period("2020-03-01", "2020-03-08", vec![team_group("t$a", "3")]),
        ]);

        let aggregate = Aggregate::from_report(GroupingSelector::Team, "BlendedCost", &raw);

        assert_eq!(aggregate.series["a"], vec![1.0, 0.0, 3.0]);
        assert_eq!(aggregate.series["b"], vec![0.0, 2.0, 0.0]);
        assert_eq!(aggregate.column_totals, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_malformed_keys_collapse_into_unknown() {
        let raw = report(vec![period(
            "2020-01-01",
            "2020-02-01",
            vec![team_group("untagged", "7"), team_group("billed-team$", "5")],
        )]);

        let aggregate = Aggregate::from_report(GroupingSelector::Team, "BlendedCost", &raw);

        assert_eq!(aggregate.series.len(), 1);
        assert_eq!(aggregate.series[UNKNOWN_LABEL], vec![5.0]);
        assert_eq!(aggregate.column_totals, vec![12.0]);
    }

    #[test]
    fn test_other_metric_counts_as_zero() {
        let raw = report(vec![period(
            "2020-01-01",
            "2020-02-01",
            vec![team_group("t$a", "9")],
        )]);

        let aggregate = Aggregate::from_report(GroupingSelector::Team, "UnblendedCost", &raw);

        assert_eq!(aggregate.series["a"], vec![0.0]);
        assert_eq!(aggregate.column_totals, vec![0.0]);
    }

    #[test]
    fn test_empty_report() {
        let raw = RawUsageReport::default();
        let aggregate = Aggregate::from_report(GroupingSelector::Service, "BlendedCost", &raw);

        assert_eq!(aggregate.dimension_name, "SERVICE");
        assert!(aggregate.is_empty());
        assert!(aggregate.column_totals.is_empty());
        assert_eq!(aggregate.grand_total(), 0.0);
    }
}
