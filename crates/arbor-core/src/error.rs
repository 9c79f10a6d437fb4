// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Address-space error types.
//!
//! Protocol-level per-operation failures travel as [`crate::StatusCode`]s
//! inside service results; this module covers the errors of manipulating the
//! address space itself (parsing node identifiers, populating a store).

use thiserror::Error;

use crate::types::NodeId;

/// Convenient result alias for address-space operations.
pub type AddressSpaceResult<T> = Result<T, AddressSpaceError>;

// =============================================================================
// AddressSpaceError
// =============================================================================

/// Errors raised while building or mutating an address space.
#[derive(Debug, Error)]
pub enum AddressSpaceError {
    /// A node-id string could not be parsed.
    #[error("invalid node id `{input}`: {reason}")]
    InvalidNodeId {
        /// The offending input.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A node with the same id already exists in the store.
    #[error("node `{node_id}` already exists in the address space")]
    DuplicateNode {
        /// The duplicated id.
        node_id: NodeId,
    },

    /// The referenced node does not exist in the store.
    #[error("node `{node_id}` does not exist in the address space")]
    NodeNotFound {
        /// The missing id.
        node_id: NodeId,
    },
}

impl AddressSpaceError {
    /// Creates an invalid-node-id error.
    pub fn invalid_node_id(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNodeId {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate-node error.
    pub fn duplicate_node(node_id: NodeId) -> Self {
        Self::DuplicateNode { node_id }
    }

    /// Creates a node-not-found error.
    pub fn node_not_found(node_id: NodeId) -> Self {
        Self::NodeNotFound { node_id }
    }
}
