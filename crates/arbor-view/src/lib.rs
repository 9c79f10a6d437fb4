// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # arbor-view
//!
//! OPC UA View Services for the Arbor server core.
//!
//! This crate answers client queries about the structure of the server
//! address space:
//!
//! - **Browse** — enumerate the references of a starting node, filtered by
//!   direction, reference type and node class, paginated through per-session
//!   continuation points
//! - **BrowseNext** — resume or release a paginated browse
//! - **TranslateBrowsePathsToNodeIds** — resolve a chain of qualified-name
//!   hops into concrete node identifiers
//! - **RegisterNodes / UnregisterNodes** — the echo services of the view
//!   service set
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        ViewServices                             │
//! │        (store + limits + admin session, service façade)         │
//! └─────────────────────────────────────────────────────────────────┘
//!            │                 │                     │
//!            ▼                 ▼                     ▼
//!     Browse iterator    Path resolver     Continuation registry
//!     (browse)           (translate)       (session)
//!            │                 │
//!            └────────┬────────┘
//!                     ▼
//!          Subtype oracle + descriptor builder
//!          (subtype, description)
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arbor_core::{MemoryNodeStore, Node, NodeClass, NodeId, QualifiedName, LocalizedText};
//! use arbor_view::{BrowseDescription, ViewLimits, ViewServices};
//!
//! let store = Arc::new(MemoryNodeStore::new());
//! store.insert(Node::new(
//!     NodeId::OBJECTS_FOLDER,
//!     NodeClass::Object,
//!     QualifiedName::standard("Objects"),
//!     LocalizedText::english("Objects"),
//! )).unwrap();
//!
//! let services = ViewServices::new(store, ViewLimits::default());
//! let result = services.browse(0, &BrowseDescription::new(NodeId::OBJECTS_FOLDER));
//! assert!(result.status_code.is_good());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// =============================================================================
// Modules
// =============================================================================

pub mod browse;
pub mod description;
pub mod error;
pub mod limits;
pub mod register;
pub mod service;
pub mod session;
pub mod subtype;
pub mod translate;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use browse::{
    BrowseDescription, BrowseNextRequest, BrowseNextResponse, BrowseRequest, BrowseResponse,
    BrowseResult,
};
pub use description::{BrowseResultMask, ReferenceDescription};
pub use error::{ViewError, ViewResult};
pub use limits::ViewLimits;
pub use register::{
    RegisterNodesRequest, RegisterNodesResponse, UnregisterNodesRequest, UnregisterNodesResponse,
};
pub use service::{ResponseHeader, ViewDescription, ViewServices};
pub use session::Session;
pub use translate::{
    BrowsePath, BrowsePathResult, BrowsePathTarget, RelativePathElement,
    TranslateBrowsePathsRequest, TranslateBrowsePathsResponse,
};
