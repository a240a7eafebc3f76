/// Error types for the flight delay dashboard
use thiserror::Error;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashError {
    /// A control value, reduction method, chart kind or column name was not recognized
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Carrier code has no entry in the carrier directory
    #[error("Unknown carrier: {0}")]
    UnknownCarrier(String),

    /// A required CSV column is missing from the header row
    #[error("Missing column in {table} data: {column}")]
    MissingColumn { table: &'static str, column: String },

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    InvalidDate(String),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read a data file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashError {
    /// Build an `InvalidArgument` error for a value that is not one of `expected`.
    pub fn invalid(what: &str, value: &str, expected: &[&str]) -> Self {
        DashError::InvalidArgument(format!(
            "unrecognized {} '{}' (expected one of: {})",
            what,
            value,
            expected.join(", ")
        ))
    }
}

/// Type alias for Results using DashError
pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::DashError;

    #[test]
    fn invalid_argument_lists_expected_values() {
        let err = DashError::invalid("reduction method", "median", &["mean", "sum"]);
        assert_eq!(
            err.to_string(),
            "Invalid argument: unrecognized reduction method 'median' (expected one of: mean, sum)"
        );
    }
}
