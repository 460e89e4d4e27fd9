//! # Error Types
//!
//! Structured error types for ceiling_core. Every variant carries enough
//! context for a front end to show a user-facing message, and serializes to
//! JSON so the same error can be handed to other tools unchanged.
//!
//! ## Example
//!
//! ```rust
//! use ceiling_core::errors::{CalcError, CalcResult};
//!
//! fn validate_wall(length_ft: f64) -> CalcResult<()> {
//!     if length_ft < 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "length1".to_string(),
//!             value: length_ft.to_string(),
//!             reason: "Wall length cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ceiling_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for estimator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (negative, non-numeric, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Measurement unit name not recognised
    #[error("Unknown unit: '{unit}' (expected one of ft, mm, cm, in, m, yd)")]
    UnknownUnit { unit: String },

    /// Room not present in the estimate
    #[error("Room not found: {room_id}")]
    RoomNotFound { room_id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit { unit: unit.into() }
    }

    /// Create a RoomNotFound error
    pub fn room_not_found(room_id: impl ToString) -> Self {
        CalcError::RoomNotFound {
            room_id: room_id.to_string(),
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

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::RoomNotFound { .. } => "ROOM_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("linter_spacing", "0", "Linter spacing must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("width1").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::unknown_unit("furlong").error_code(), "UNKNOWN_UNIT");
        assert_eq!(CalcError::room_not_found("abc").error_code(), "ROOM_NOT_FOUND");
    }

    #[test]
    fn test_only_locks_are_recoverable() {
        assert!(CalcError::file_locked("a.fce", "someone", "now").is_recoverable());
        assert!(!CalcError::unknown_unit("x").is_recoverable());
    }

    #[test]
    fn test_display_mentions_field() {
        let msg = CalcError::invalid_input("width2", "abc", "Not a number").to_string();
        assert!(msg.contains("width2"));
        assert!(msg.contains("Not a number"));
    }
}
