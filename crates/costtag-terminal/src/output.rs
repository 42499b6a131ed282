//! Output formatting module for costtag
//!
//! This module renders an [`Aggregate`] in one of two formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output
//!
//! # Examples
//!
//! ```
//! use costtag_core::aggregate::Aggregate;
//! use costtag_core::types::GroupingSelector;
//! use costtag_terminal::output::get_formatter;
//!
//! let aggregate = Aggregate::new(GroupingSelector::Team, 0);
//!
//! let formatter = get_formatter(false, false);
//! println!("{}", formatter.format_report(&aggregate));
//!
//! let json_formatter = get_formatter(true, false);
//! println!("{}", json_formatter.format_report(&aggregate));
//! ```

use colored::*;
use costtag_core::aggregate::Aggregate;
use prettytable::{Cell, Row, Table, format};
use serde_json::json;
use tracing::debug;

/// Currency symbol placed before every amount
const CURRENCY_SYMBOL: &str = "$";

/// Thousands separator used in amounts
const THOUSANDS_SEPARATOR: char = '.';

/// Decimal separator used in amounts
const DECIMAL_SEPARATOR: char = ',';

/// Cells longer than this many characters are wrapped onto several lines
pub const MAX_COLUMN_WIDTH: usize = 80;

/// Label of the trailing totals row
pub const TOTALS_LABEL: &str = "Tot";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format an aggregate as a complete report
    fn format_report(&self, aggregate: &Aggregate) -> String;

    /// Format several reports, one after the other
    fn format_reports(&self, aggregates: &[Aggregate]) -> String {
        aggregates
            .iter()
            .map(|aggregate| self.format_report(aggregate))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Table formatter for human-readable output
///
/// The header row holds the dimension name followed by the time buckets,
/// then one row per label and a final `Tot` row with the column totals.
pub struct TableFormatter {
    /// Whether to emit ANSI colors
    pub colored_output: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new(colored_output: bool) -> Self {
        Self { colored_output }
    }

    fn paint(&self, text: &str, paint: fn(&str) -> ColoredString) -> String {
        let text = wrap_cell(text, MAX_COLUMN_WIDTH);
        if self.colored_output {
            paint(&text).to_string()
        } else {
            text
        }
    }

    fn label_cell(&self, text: &str, paint: fn(&str) -> ColoredString) -> Cell {
        Cell::new(&self.paint(text, paint))
    }

    fn money_cell(&self, amount: f64, paint: Option<fn(&str) -> ColoredString>) -> Cell {
        let text = format_money(amount);
        let text = match paint {
            Some(paint) => self.paint(&text, paint),
            None => text,
        };
        Cell::new(&text).style_spec("r")
    }
}

impl OutputFormatter for TableFormatter {
    fn format_report(&self, aggregate: &Aggregate) -> String {
        debug!(
            "Rendering {} {} rows over {} buckets",
            aggregate.series.len(),
            aggregate.dimension_name,
            aggregate.bucket_count()
        );

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        let mut titles = vec![self.label_cell(&aggregate.dimension_name, |s| s.red())];
        titles.extend(
            aggregate
                .time_buckets
                .iter()
                .map(|bucket| self.label_cell(bucket, |s| s.yellow())),
        );
        table.set_titles(Row::new(titles));

        for (label, values) in &aggregate.series {
            let mut cells = vec![self.label_cell(label, |s| s.green())];
            cells.extend(values.iter().map(|amount| self.money_cell(*amount, None)));
            table.add_row(Row::new(cells));
        }

        let mut totals = vec![self.label_cell(TOTALS_LABEL, |s| s.bright_magenta())];
        totals.extend(
            aggregate
                .column_totals
                .iter()
                .map(|amount| self.money_cell(*amount, Some(|s| s.bright_magenta()))),
        );
        table.add_row(Row::new(totals));

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn report_value(aggregate: &Aggregate) -> serde_json::Value {
        json!({
            "dimension": aggregate.dimension_name,
            "time_buckets": aggregate.time_buckets,
            "rows": aggregate.series.iter().map(|(label, values)| {
                json!({
                    "label": label,
                    "values": values,
                })
            }).collect::<Vec<_>>(),
            "totals": aggregate.column_totals,
            "grand_total": aggregate.grand_total(),
        })
    }

    fn pretty(value: serde_json::Value) -> String {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, aggregate: &Aggregate) -> String {
        Self::pretty(Self::report_value(aggregate))
    }

    /// A single report stays a bare object; several become one JSON array
    fn format_reports(&self, aggregates: &[Aggregate]) -> String {
        match aggregates {
            [aggregate] => self.format_report(aggregate),
            _ => Self::pretty(serde_json::Value::Array(
                aggregates.iter().map(Self::report_value).collect(),
            )),
        }
    }
}

/// Get appropriate formatter based on JSON flag
pub fn get_formatter(json: bool, colored_output: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(colored_output))
    }
}

/// Write a formatted aggregate to stdout
pub fn render(aggregate: &Aggregate, formatter: &dyn OutputFormatter) {
    println!("{}", formatter.format_report(aggregate));
}

/// Write several formatted aggregates to stdout
pub fn render_all(aggregates: &[Aggregate], formatter: &dyn OutputFormatter) {
    println!("{}", formatter.format_reports(aggregates));
}

/// Format an amount as `$1.234,56`
///
/// Two decimals, `.` between thousands and `,` before the cents. Negative
/// amounts get a leading minus (`-$12,00`), even when they round to zero.
///
/// ```
/// use costtag_terminal::output::format_money;
///
/// assert_eq!(format_money(1234567.891), "$1.234.567,89");
/// assert_eq!(format_money(0.5), "$0,50");
/// assert_eq!(format_money(-12.0), "-$12,00");
/// assert_eq!(format_money(-0.001), "-$0,00");
/// ```
pub fn format_money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (count, ch) in whole.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    let sign = if amount < 0.0 { "-" } else { "" };

    format!("{sign}{CURRENCY_SYMBOL}{grouped}{DECIMAL_SEPARATOR}{cents}")
}

/// Break `text` into lines of at most `width` characters
fn wrap_cell(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
