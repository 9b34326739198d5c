//! # pizza-analytics
//!
//! Reporting metrics over a four-table pizza sales data set: orders,
//! order details, pizzas and pizza types.
//!
//! ## Usage
//!
//! ```bash
//! pizza-analytics --data-dir data [--format table|csv|json] <report>
//! ```
//!
//! ## Modules
//!
//! - `model` - Typed records and the validated, indexed `SalesData` tables
//! - `loader` - CSV reader for the four tables
//! - `join` - Denormalizes order details into `JoinedRow`s
//! - `aggregate` - The reporting operations over joined rows
//! - `window` - Ordered prefix sums and partitioned competition ranking
//! - `report` - Rounding, report tables and text/CSV/JSON rendering
//! - `config` - Layered configuration (defaults, TOML, environment)
//! - `cli` - Argument parsing and command routing for the binary
//! - `error` - The crate error type and error codes
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod join;
pub mod loader;
pub mod model;
pub mod report;
pub mod window;

#[cfg(test)]
pub mod testing;

pub use aggregate::SalesAnalytics;
pub use error::{AnalyticsError, Result};
pub use join::{resolve, JoinPolicy, JoinedRow, RowSet};
pub use loader::load_csv_dir;
pub use model::SalesData;
