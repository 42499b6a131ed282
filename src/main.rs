//! costtag - Monthly AWS cost reports grouped by team or service tag

use clap::Parser;
use costtag::{
    cli::Cli,
    cost_explorer::CostExplorerSource,
    error::Result,
    extractor::Extractor,
    output::{get_formatter, render_all},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet unless --verbose; RUST_LOG only applies in verbose mode.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("costtag=info,costtag_core=info,costtag_aws=info")
        })
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let colored_output = cli.colored_output(
        is_terminal::is_terminal(std::io::stdout()),
        std::env::var_os("NO_COLOR").is_some(),
    );

    let source = CostExplorerSource::from_settings(cli.region.clone(), cli.profile.clone()).await;
    let extractor = Extractor::new(source);
    let config = extractor.config();
    info!(
        "Reporting {} from {} to {}",
        config.metric, config.start, config.end
    );

    let mut aggregates = Vec::new();
    for selector in cli.selectors() {
        info!("Running {} cost report", selector);
        aggregates.push(extractor.extract(*selector).await);
    }

    let formatter = get_formatter(cli.json, colored_output);
    render_all(&aggregates, formatter.as_ref());

    Ok(())
}
