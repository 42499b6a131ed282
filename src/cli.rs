//! CLI interface for costtag
//!
//! This module defines the command-line interface using clap. The report
//! window and metric are fixed; the only choice is the grouping dimension.
//!
//! # Example
//!
//! ```bash
//! # Monthly costs per team, then per service
//! costtag
//!
//! # Only the team report, as JSON
//! costtag team --json
//!
//! # Service report against a specific shared-config profile
//! costtag service --profile billing
//! ```

use crate::types::GroupingSelector;
use clap::{Parser, Subcommand};

/// Monthly AWS cost reports grouped by team or service tag
#[derive(Parser, Debug, Clone)]
#[command(name = "costtag")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default shows only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// AWS region to send the request to (defaults to the SDK configuration)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Shared-config profile to load credentials from
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Report to produce (defaults to all)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available reports
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Costs grouped by the billed-team tag
    Team,
    /// Costs grouped by the billed-service tag
    Service,
    /// Team report followed by the service report
    All,
}

impl Command {
    /// Grouping selectors to extract, in output order
    pub fn selectors(&self) -> &'static [GroupingSelector] {
        match self {
            Command::Team => &[GroupingSelector::Team],
            Command::Service => &[GroupingSelector::Service],
            Command::All => &GroupingSelector::ALL,
        }
    }
}

impl Cli {
    /// Selectors for the requested report, `all` when no subcommand is given
    pub fn selectors(&self) -> &'static [GroupingSelector] {
        self.command.unwrap_or(Command::All).selectors()
    }

    /// Whether table output should carry ANSI colors
    ///
    /// Colors need a terminal on stdout, no `NO_COLOR` in the environment,
    /// no `--no-color` and no `--json`.
    pub fn colored_output(&self, stdout_is_terminal: bool, no_color_env: bool) -> bool {
        stdout_is_terminal && !no_color_env && !self.no_color && !self.json
    }
}
