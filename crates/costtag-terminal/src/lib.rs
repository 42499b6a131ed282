//! Terminal output formatting for costtag
//!
//! This crate provides the table and JSON report formatters and the
//! `render` entry point used by the binary.

pub mod output;

pub use output::{
    JsonFormatter, OutputFormatter, TableFormatter, format_money, get_formatter, render, render_all,
};
