// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # arbor-core
//!
//! Address-space data model and node store for the Arbor OPC UA server core.
//!
//! This crate provides the foundational types used across all Arbor
//! components:
//!
//! - **Types**: `NodeId`, `ExpandedNodeId`, `QualifiedName`, `LocalizedText`,
//!   `NodeClass`, `BrowseDirection` and the well-known ns=0 identifiers
//! - **Status**: the OPC UA `StatusCode` space with symbolic names
//! - **Node**: nodes and their grouped outgoing references
//! - **Store**: the `NodeStore` contract, an in-memory implementation, and
//!   the shared traversal helpers (`is_node_in_tree`, `type_definition_of`)
//! - **Error**: unified error hierarchy for address-space manipulation
//!
//! ## Example
//!
//! ```
//! use arbor_core::{LocalizedText, MemoryNodeStore, Node, NodeClass, NodeId, QualifiedName};
//!
//! let store = MemoryNodeStore::new();
//! let folder = Node::new(
//!     NodeId::numeric(1, 100),
//!     NodeClass::Object,
//!     QualifiedName::new(1, "Plant"),
//!     LocalizedText::english("Plant"),
//! );
//! store.insert(folder).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// =============================================================================
// Core Modules
// =============================================================================

pub mod error;
pub mod node;
pub mod status;
pub mod store;
pub mod types;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use error::{AddressSpaceError, AddressSpaceResult};
pub use node::{Node, ReferenceKind};
pub use status::StatusCode;
pub use store::{is_node_in_tree, type_definition_of, MemoryNodeStore, NodeStore};
pub use types::{
    reference_type_ids, BrowseDirection, ExpandedNodeId, LocalizedText, NodeClass, NodeId,
    NodeIdentifier, QualifiedName,
};
