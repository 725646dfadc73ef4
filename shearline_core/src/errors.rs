//! # Error Types
//!
//! Structured error types for shearline_core. Each variant carries enough
//! context for a caller (or an LLM consuming the JSON form) to understand
//! and correct the offending input without re-running the solve blind.
//!
//! ## Example
//!
//! ```rust
//! use shearline_core::errors::{ShearError, ShearResult};
//!
//! fn validate_span(start_ft: f64, end_ft: f64) -> ShearResult<()> {
//!     if end_ft <= start_ft {
//!         return Err(ShearError::invalid_span(start_ft, end_ft));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for shearline_core operations
pub type ShearResult<T> = Result<T, ShearError>;

/// Structured error type for the shear distribution engine.
///
/// Solver failures are local to the call that raised them: the wall system
/// itself is never left in a partially-updated state, so callers recover by
/// correcting the input and re-invoking.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ShearError {
    /// A wall's geometry is unusable (coincident endpoints, non-positive height)
    #[error("Invalid geometry for wall '{label}': {reason}")]
    InvalidGeometry { label: String, reason: String },

    /// An axis has no resisting walls, so the system cannot be solved
    #[error("Degenerate system: {axis} axis - {reason}")]
    DegenerateSystem { axis: String, reason: String },

    /// Fewer than two braced wall lines on the axis being distributed
    #[error("Insufficient supports on {axis} axis: found {count}, need at least 2")]
    InsufficientSupports { axis: String, count: usize },

    /// Diaphragm span end does not lie strictly after its start
    #[error("Invalid span: end {end_ft} ft must be strictly after start {start_ft} ft")]
    InvalidSpan { start_ft: f64, end_ft: f64 },

    /// Support placement produced a negative tributary interval
    #[error("Negative tributary width {width_ft} ft at support {support_ft} ft")]
    NegativeTributaryWidth { support_ft: f64, width_ft: f64 },

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

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

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ShearError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(label: impl Into<String>, reason: impl Into<String>) -> Self {
        ShearError::InvalidGeometry {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateSystem error
    pub fn degenerate_system(axis: impl Into<String>, reason: impl Into<String>) -> Self {
        ShearError::DegenerateSystem {
            axis: axis.into(),
            reason: reason.into(),
        }
    }

    /// Create an InsufficientSupports error
    pub fn insufficient_supports(axis: impl Into<String>, count: usize) -> Self {
        ShearError::InsufficientSupports {
            axis: axis.into(),
            count,
        }
    }

    /// Create an InvalidSpan error
    pub fn invalid_span(start_ft: f64, end_ft: f64) -> Self {
        ShearError::InvalidSpan { start_ft, end_ft }
    }

    /// Create a NegativeTributaryWidth error
    pub fn negative_tributary_width(support_ft: f64, width_ft: f64) -> Self {
        ShearError::NegativeTributaryWidth {
            support_ft,
            width_ft,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ShearError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ShearError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        ShearError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry after releasing a lock)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ShearError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ShearError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            ShearError::DegenerateSystem { .. } => "DEGENERATE_SYSTEM",
            ShearError::InsufficientSupports { .. } => "INSUFFICIENT_SUPPORTS",
            ShearError::InvalidSpan { .. } => "INVALID_SPAN",
            ShearError::NegativeTributaryWidth { .. } => "NEGATIVE_TRIBUTARY_WIDTH",
            ShearError::InvalidInput { .. } => "INVALID_INPUT",
            ShearError::FileError { .. } => "FILE_ERROR",
            ShearError::FileLocked { .. } => "FILE_LOCKED",
            ShearError::SerializationError { .. } => "SERIALIZATION_ERROR",
            ShearError::VersionMismatch { .. } => "VERSION_MISMATCH",
            ShearError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
