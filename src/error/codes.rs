/// Error code registry for pizza-analytics
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Input (loader) errors
/// - 3000-3999: Data integrity errors
/// - 4000-4999: Aggregation errors
/// - 5000-5999: Output errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_PARSE_ERROR: u16 = 1001;
    pub const CONFIG_INVALID_VALUE: u16 = 1002;

    // Input errors (2000-2999)
    pub const INPUT_IO_ERROR: u16 = 2001;
    pub const INPUT_CSV_ERROR: u16 = 2002;

    // Data integrity errors (3000-3999)
    pub const DATA_MISSING_REFERENCE: u16 = 3001;
    pub const DATA_INVALID_QUANTITY: u16 = 3002;
    pub const DATA_INVALID_PRICE: u16 = 3003;
    pub const DATA_DUPLICATE_KEY: u16 = 3004;

    // Aggregation errors (4000-4999)
    pub const AGG_EMPTY_INPUT: u16 = 4001;

    // Output errors (5000-5999)
    pub const OUTPUT_SERIALIZATION: u16 = 5001;
}

/// Get a human-readable description of an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Failed to parse configuration",
        1002 => "Invalid value in configuration",

        2001 => "Failed to read input data",
        2002 => "Malformed CSV input",

        3001 => "Foreign key does not resolve",
        3002 => "Quantity must be between 1 and 4294967295",
        3003 => "Price must be between 0 and 1000000000",
        3004 => "Primary key appears more than once",

        4001 => "Aggregate requested over zero rows",

        5001 => "Failed to serialize report output",

        _ => "Unknown error code",
    }
}
