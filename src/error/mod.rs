//! Error types and error codes for loading, analysing and rendering sales data

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

use crate::model::{Entity, MAX_PRICE, MAX_QUANTITY};

/// The unified error type for loading and analysing sales data
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Failed to read {}: {source}", .path.display(), code = ErrorCode::INPUT_IO_ERROR)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[E{code:04}] Malformed CSV in {table}: {source}", code = ErrorCode::INPUT_CSV_ERROR)]
    Csv {
        table: String,
        #[source]
        source: csv::Error,
    },

    #[error("[E{code:04}] {entity} '{key}' is referenced but does not exist", code = ErrorCode::DATA_MISSING_REFERENCE)]
    MissingReference { entity: Entity, key: String },

    #[error("[E{code:04}] Order detail {order_details_id} has quantity {quantity}, expected 1 to {max}", code = ErrorCode::DATA_INVALID_QUANTITY, max = MAX_QUANTITY)]
    InvalidQuantity {
        order_details_id: u64,
        quantity: i64,
    },

    #[error("[E{code:04}] Pizza '{pizza_id}' has price {price}, expected 0 to {max}", code = ErrorCode::DATA_INVALID_PRICE, max = MAX_PRICE)]
    InvalidPrice { pizza_id: String, price: Decimal },

    #[error("[E{code:04}] Duplicate {entity} key '{key}'", code = ErrorCode::DATA_DUPLICATE_KEY)]
    DuplicateKey { entity: Entity, key: String },

    #[error("[E{code:04}] No data: {operation} requires at least one row", code = ErrorCode::AGG_EMPTY_INPUT)]
    EmptyInput { operation: &'static str },

    #[error("[E{code:04}] Failed to serialize report: {0}", code = ErrorCode::OUTPUT_SERIALIZATION)]
    Serialization(#[from] serde_json::Error),
}

impl AnalyticsError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message)
    }

    /// A configuration value that parsed but is out of range or unknown
    pub fn invalid_config_value(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_INVALID_VALUE, message)
    }

    fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to a configuration error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        if let Self::Config { source: src, .. } = &mut self {
            *src = Some(source.into());
        }
        self
    }

    pub fn missing_reference(entity: Entity, key: impl Into<String>) -> Self {
        Self::MissingReference {
            entity,
            key: key.into(),
        }
    }

    pub fn duplicate_key(entity: Entity, key: impl ToString) -> Self {
        Self::DuplicateKey {
            entity,
            key: key.to_string(),
        }
    }

    pub fn empty_input(operation: &'static str) -> Self {
        Self::EmptyInput { operation }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. } => *code,
            Self::Io { .. } => ErrorCode::INPUT_IO_ERROR,
            Self::Csv { .. } => ErrorCode::INPUT_CSV_ERROR,
            Self::MissingReference { .. } => ErrorCode::DATA_MISSING_REFERENCE,
            Self::InvalidQuantity { .. } => ErrorCode::DATA_INVALID_QUANTITY,
            Self::InvalidPrice { .. } => ErrorCode::DATA_INVALID_PRICE,
            Self::DuplicateKey { .. } => ErrorCode::DATA_DUPLICATE_KEY,
            Self::EmptyInput { .. } => ErrorCode::AGG_EMPTY_INPUT,
            Self::Serialization(_) => ErrorCode::OUTPUT_SERIALIZATION,
        }
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } | Self::Csv { .. } => 3,
            Self::MissingReference { .. }
            | Self::InvalidQuantity { .. }
            | Self::InvalidPrice { .. }
            | Self::DuplicateKey { .. } => 4,
            Self::EmptyInput { .. } => 5,
            Self::Serialization(_) => 1,
        }
    }

    /// Whether the error describes bad input data rather than an environment problem
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MissingReference { .. }
                | Self::InvalidQuantity { .. }
                | Self::InvalidPrice { .. }
                | Self::DuplicateKey { .. }
        )
    }
}

impl From<toml::de::Error> for AnalyticsError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_PARSE_ERROR, "invalid TOML").with_source(err)
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
