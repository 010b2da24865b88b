//! # Error Types
//!
//! Structured error types for check_core. Every capacity check fails for the
//! whole batch when a precondition does not hold: there are no partial
//! results and no per-member correction.
//!
//! ## Example
//!
//! ```rust
//! use check_core::errors::{CheckError, CheckResult};
//!
//! fn validate_length(lb_in: f64) -> CheckResult<()> {
//!     if lb_in <= 0.0 {
//!         return Err(CheckError::InvalidInput {
//!             field: "Lb".to_string(),
//!             value: lb_in.to_string(),
//!             reason: "Unbraced length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for check_core operations
pub type CheckResult<T> = Result<T, CheckError>;

/// Structured error type for capacity checks.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CheckError {
    /// An input value is invalid (non-positive, non-finite, empty batch)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A property bundle lacks a required column
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Two batch parameters disagree on the number of members
    #[error("Length mismatch for '{field}': expected {expected} members, found {found}")]
    LengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },

    /// Axial forces in one batch are not all of one sign
    #[error(
        "Axial forces in '{field}' are not uniformly signed ({positive} positive, {negative} negative, {zero} zero); are some columns in tension?"
    )]
    NonUniformSign {
        field: String,
        positive: usize,
        negative: usize,
        zero: usize,
    },

    /// A member falls outside the validity range of a provision
    #[error("{provision} does not apply to member {member}: {reason}")]
    NotApplicable {
        provision: String,
        member: usize,
        reason: String,
    },

    /// A section family the provision does not cover
    #[error("{provision} is not defined for {kind} sections (member {member})")]
    UnsupportedSection {
        provision: String,
        member: usize,
        kind: String,
    },

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
}

impl CheckError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CheckError::MissingField {
            field: field.into(),
        }
    }

    /// Create a LengthMismatch error
    pub fn length_mismatch(field: impl Into<String>, expected: usize, found: usize) -> Self {
        CheckError::LengthMismatch {
            field: field.into(),
            expected,
            found,
        }
    }

    /// Create a NotApplicable error
    pub fn not_applicable(provision: impl Into<String>, member: usize, reason: impl Into<String>) -> Self {
        CheckError::NotApplicable {
            provision: provision.into(),
            member,
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedSection error
    pub fn unsupported_section(provision: impl Into<String>, member: usize, kind: impl Into<String>) -> Self {
        CheckError::UnsupportedSection {
            provision: provision.into(),
            member,
            kind: kind.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CheckError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's batch rather than by the environment
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CheckError::InvalidInput { .. }
                | CheckError::MissingField { .. }
                | CheckError::LengthMismatch { .. }
                | CheckError::NonUniformSign { .. }
                | CheckError::NotApplicable { .. }
                | CheckError::UnsupportedSection { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CheckError::InvalidInput { .. } => "INVALID_INPUT",
            CheckError::MissingField { .. } => "MISSING_FIELD",
            CheckError::LengthMismatch { .. } => "LENGTH_MISMATCH",
            CheckError::NonUniformSign { .. } => "NON_UNIFORM_SIGN",
            CheckError::NotApplicable { .. } => "NOT_APPLICABLE",
            CheckError::UnsupportedSection { .. } => "UNSUPPORTED_SECTION",
            CheckError::FileError { .. } => "FILE_ERROR",
            CheckError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CheckError {
    fn from(e: serde_json::Error) -> Self {
        CheckError::SerializationError {
            reason: e.to_string(),
        }
    }
}
