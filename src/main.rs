use clap::Parser;
use pizza_analytics::cli::{execute_command, get_log_level, resolve_config, Cli};
use pizza_analytics::error::AnalyticsError;
use tracing::{debug, error, trace};

fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    };

    // -v flags win over the configured level
    let log_level = if cli.verbose == 0 {
        config.log_level.as_str()
    } else {
        get_log_level(cli.verbose)
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2) // Show target module for -vv and above
        .with_line_number(cli.verbose >= 2)
        .init();

    debug!("pizza-analytics started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    match execute_command(&cli, &config) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AnalyticsError>()
        .map(AnalyticsError::exit_code)
        .unwrap_or(1)
}
