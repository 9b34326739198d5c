//! CLI command handlers
//!
//! - Argument parsing structures
//! - Command routing over the analytics library

pub mod args;
pub mod router;

pub use args::{Cli, Commands};
pub use router::{execute_command, resolve_config};

/// Map `-v` occurrences to a tracing filter
pub fn get_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
