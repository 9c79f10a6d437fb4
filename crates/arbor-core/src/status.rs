// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC UA status codes.
//!
//! A [`StatusCode`] is a 32-bit value whose top two bits carry the severity
//! (good / uncertain / bad). The constants below are the subset of Part 4
//! codes the view services report; unknown codes still round-trip through
//! the raw value.
//!
//! # Examples
//!
//! ```
//! use arbor_core::StatusCode;
//!
//! assert!(StatusCode::GOOD.is_good());
//! assert!(StatusCode::BAD_NODE_ID_UNKNOWN.is_bad());
//! assert_eq!(StatusCode::BAD_NO_MATCH.to_string(), "BadNoMatch");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// StatusCode
// =============================================================================

/// A 32-bit OPC UA status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCode(u32);

impl StatusCode {
    // =========================================================================
    // Constants
    // =========================================================================

    /// The operation succeeded.
    pub const GOOD: StatusCode = StatusCode(0x0000_0000);

    /// An internal error occurred as a result of a programming or
    /// configuration error.
    pub const BAD_INTERNAL_ERROR: StatusCode = StatusCode(0x8002_0000);

    /// Not enough memory to complete the operation.
    pub const BAD_OUT_OF_MEMORY: StatusCode = StatusCode(0x8003_0000);

    /// There was nothing to do because the request specified an empty list
    /// of operations.
    pub const BAD_NOTHING_TO_DO: StatusCode = StatusCode(0x800F_0000);

    /// The request could not be processed because it specified too many
    /// operations.
    pub const BAD_TOO_MANY_OPERATIONS: StatusCode = StatusCode(0x8010_0000);

    /// The node id refers to a node that does not exist in the address space.
    pub const BAD_NODE_ID_UNKNOWN: StatusCode = StatusCode(0x8034_0000);

    /// The continuation point provided is no longer valid.
    pub const BAD_CONTINUATION_POINT_INVALID: StatusCode = StatusCode(0x804A_0000);

    /// The operation could not be processed because all continuation points
    /// have been allocated.
    pub const BAD_NO_CONTINUATION_POINTS: StatusCode = StatusCode(0x804B_0000);

    /// The reference type id does not refer to a valid reference type node.
    pub const BAD_REFERENCE_TYPE_ID_INVALID: StatusCode = StatusCode(0x804C_0000);

    /// The browse direction is not valid.
    pub const BAD_BROWSE_DIRECTION_INVALID: StatusCode = StatusCode(0x804D_0000);

    /// The browse name is invalid.
    pub const BAD_BROWSE_NAME_INVALID: StatusCode = StatusCode(0x8060_0000);

    /// The view id does not refer to a valid view node.
    pub const BAD_VIEW_ID_UNKNOWN: StatusCode = StatusCode(0x806B_0000);

    /// The requested operation has no match to return.
    pub const BAD_NO_MATCH: StatusCode = StatusCode(0x806F_0000);

    // =========================================================================
    // Construction & Access
    // =========================================================================

    /// Wraps a raw 32-bit status code.
    #[inline]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw 32-bit value.
    #[inline]
    pub const fn raw(&self) -> u32 {
        self.0
    }

    // =========================================================================
    // Severity
    // =========================================================================

    /// Returns `true` if the severity is good (top two bits `00`).
    #[inline]
    pub const fn is_good(&self) -> bool {
        self.0 & 0xC000_0000 == 0
    }

    /// Returns `true` if the severity is bad (top bit set).
    #[inline]
    pub const fn is_bad(&self) -> bool {
        self.0 & 0x8000_0000 != 0
    }

    /// Returns the symbolic name, or `None` for codes outside the view
    /// service vocabulary.
    pub const fn name(&self) -> Option<&'static str> {
        match self.0 {
            0x0000_0000 => Some("Good"),
            0x8002_0000 => Some("BadInternalError"),
            0x8003_0000 => Some("BadOutOfMemory"),
            0x800F_0000 => Some("BadNothingToDo"),
            0x8010_0000 => Some("BadTooManyOperations"),
            0x8034_0000 => Some("BadNodeIdUnknown"),
            0x804A_0000 => Some("BadContinuationPointInvalid"),
            0x804B_0000 => Some("BadNoContinuationPoints"),
            0x804C_0000 => Some("BadReferenceTypeIdInvalid"),
            0x804D_0000 => Some("BadBrowseDirectionInvalid"),
            0x8060_0000 => Some("BadBrowseNameInvalid"),
            0x806B_0000 => Some("BadViewIdUnknown"),
            0x806F_0000 => Some("BadNoMatch"),
            _ => None,
        }
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::GOOD
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:08X}", self.0),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
