//! # Error Types
//!
//! Structured error types for quote_core. Every failure of an estimate is
//! terminal for that call and carries enough context (which field, which
//! record, which formats) for a caller to turn it into a transport-level
//! response without string matching.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{CalcError, CalcResult, ErrorKind};
//!
//! fn validate_quantity(quantity: i64) -> CalcResult<u64> {
//!     if quantity <= 0 {
//!         return Err(CalcError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity must be a positive whole number",
//!         ));
//!     }
//!     Ok(quantity as u64)
//! }
//!
//! let err = validate_quantity(-5).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Coarse classification of a [`CalcError`].
///
/// `Validation`, `NotFound` and `Conflict` are the outcomes of an estimate
/// call; `Io` and `Internal` only come from catalog files and storage
/// backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Io,
    Internal,
}

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A required field is missing, null or blank
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// An input value is present but malformed or out of range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A referenced record does not exist for the calling tenant
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The product does not fit on the material sheet in either orientation
    #[error("Product format {product} is larger than material format {sheet}")]
    ProductTooLarge { product: String, sheet: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Catalog schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Storage backend failure or broken invariant (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        CalcError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a ProductTooLarge error
    pub fn product_too_large(product: impl Into<String>, sheet: impl Into<String>) -> Self {
        CalcError::ProductTooLarge {
            product: product.into(),
            sheet: sheet.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::MissingField { .. } | CalcError::InvalidInput { .. } => ErrorKind::Validation,
            CalcError::NotFound { .. } => ErrorKind::NotFound,
            CalcError::ProductTooLarge { .. } => ErrorKind::Conflict,
            CalcError::FileError { .. }
            | CalcError::SerializationError { .. }
            | CalcError::VersionMismatch { .. } => ErrorKind::Io,
            CalcError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::NotFound { .. } => "NOT_FOUND",
            CalcError::ProductTooLarge { .. } => "PRODUCT_TOO_LARGE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
