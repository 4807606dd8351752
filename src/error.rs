use thiserror::Error;

/// Errors returned by this crate.
///
/// The ordering and extraction passes are total and never fail; errors come
/// from loading point records and from validating a configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A record does not carry enough coordinates.
    #[error("line {line}: dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// 1-based line number.
        line: usize,
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A coordinate field could not be parsed as a number.
    #[error("line {line}, field {field}: cannot parse {value:?} as a coordinate")]
    ParseRecord {
        /// 1-based line number.
        line: usize,
        /// 0-based field index within the line.
        field: usize,
        /// The offending text.
        value: String,
    },

    /// Reading the underlying source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
