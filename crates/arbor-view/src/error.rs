// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! View service error types.
//!
//! Per-operation protocol failures are carried as [`StatusCode`]s inside the
//! service results; [`ViewError`] covers the API-level failures of the
//! convenience surface (for example parsing a browse-path string).

use thiserror::Error;

use arbor_core::StatusCode;

/// Convenient result alias for view-service API calls.
pub type ViewResult<T> = Result<T, ViewError>;

// =============================================================================
// ViewError
// =============================================================================

/// Errors of the view-service convenience API.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A browse-path string could not be parsed.
    #[error("invalid browse path `{path}`: {reason}")]
    InvalidPath {
        /// The offending path string.
        path: String,
        /// Why parsing failed.
        reason: String,
    },
}

impl ViewError {
    /// Creates an invalid-path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Maps the error into the protocol status-code taxonomy.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPath { .. } => StatusCode::BAD_BROWSE_NAME_INVALID,
        }
    }
}
