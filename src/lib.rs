//! costtag - Monthly AWS cost reports grouped by team or service tag
//!
//! This library ties the workspace crates together:
//! - fetch grouped monthly costs from AWS Cost Explorer
//! - aggregate them into a label x month matrix with per-month totals
//! - render the matrix as a table or as JSON
//!
//! # Examples
//!
//! ```no_run
//! use costtag::{
//!     cost_explorer::CostExplorerSource,
//!     extractor::Extractor,
//!     output::{get_formatter, render},
//!     types::GroupingSelector,
//! };
//!
//! #[tokio::main]
//! async fn main() -> costtag::Result<()> {
//!     let extractor = Extractor::new(CostExplorerSource::new().await);
//!
//!     let aggregate = extractor.extract(GroupingSelector::Team).await;
//!     render(&aggregate, get_formatter(false, true).as_ref());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;

pub use costtag_aws::cost_explorer;
pub use costtag_core::{aggregate, error, extractor, source, types};
pub use costtag_terminal::output;

// Re-export commonly used types
pub use error::{CosttagError, Result};
pub use types::{GroupingSelector, QueryConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
