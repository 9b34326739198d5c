//! Command routing and execution
//!
//! Resolves the effective configuration, loads and joins the tables once,
//! then assembles every requested report over the same row snapshot.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::aggregate::SalesAnalytics;
use crate::cli::args::{Cli, Commands};
use crate::config::AnalyticsConfig;
use crate::join::{resolve, JoinPolicy};
use crate::loader::load_csv_dir;
use crate::report::{assemble, render_all, ReportTable};

/// Layer command-line flags over the file and environment configuration
pub fn resolve_config(cli: &Cli) -> Result<AnalyticsConfig> {
    let mut config = AnalyticsConfig::load(cli.config.as_deref())?;

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if cli.lenient_joins {
        config.join_policy = JoinPolicy::DropUnmatched;
    }

    match cli.command {
        Some(Commands::TopQuantity { limit: Some(n) })
        | Some(Commands::TopRevenue { limit: Some(n) }) => config.top_n = n,
        Some(Commands::TopPerCategory { limit: Some(n) }) => config.per_category_limit = n,
        _ => {}
    }

    config.validate()?;
    Ok(config)
}

/// Run the parsed command and return the rendered output
pub fn execute_command(cli: &Cli, config: &AnalyticsConfig) -> Result<String> {
    let command = cli.command.clone().unwrap_or(Commands::Summary);

    let data = load_csv_dir(&config.data_dir)
        .with_context(|| format!("loading sales data from {}", config.data_dir.display()))?;
    let rows = resolve(&data, config.join_policy)?;
    info!(
        "Joined {} order lines ({} dropped)",
        rows.len(),
        rows.dropped()
    );

    let analytics = SalesAnalytics::new(rows.rows());
    let options = config.report_options();

    let tables = command
        .report_kinds()
        .into_iter()
        .map(|kind| assemble(kind, &data, &analytics, &options))
        .collect::<crate::error::Result<Vec<ReportTable>>>()?;

    debug!(
        "Rendering {} report(s) as {}",
        tables.len(),
        config.output_format
    );
    Ok(render_all(&tables, config.output_format)?)
}
