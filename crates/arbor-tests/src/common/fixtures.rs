// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Canned address spaces for the end-to-end view-service scenarios.
//!
//! ## Design Principles
//!
//! - Each fixture is a realistic, self-contained scenario
//! - Node ids are exposed as constants so tests read declaratively
//! - Fixtures compose the shared [`AddressSpaceBuilder`]

use std::sync::Arc;

use arbor_core::{
    reference_type_ids, ExpandedNodeId, MemoryNodeStore, NodeId,
};

use super::builders::AddressSpaceBuilder;

// =============================================================================
// AddressSpaceFixtures
// =============================================================================

/// Canned address spaces.
pub struct AddressSpaceFixtures;

impl AddressSpaceFixtures {
    /// The parent node of [`AddressSpaceFixtures::paginated_plant`].
    pub const PARENT: NodeId = NodeId::numeric(1, 100);

    /// The folder type every plant object is an instance of.
    pub const FOLDER_TYPE: NodeId = NodeId::numeric(1, 60);

    /// The gateway node of [`AddressSpaceFixtures::cross_server`].
    pub const GATEWAY: NodeId = NodeId::numeric(1, 200);

    /// The remote node referenced from the gateway, on server 7.
    pub const REMOTE_SERVER_INDEX: u32 = 7;

    /// The i-th child of the paginated plant (1-based, 1..=5).
    pub fn child(i: u32) -> NodeId {
        NodeId::numeric(1, 100 + i)
    }

    /// A parent with five Organizes children `Child1..Child5`, all typed by
    /// [`AddressSpaceFixtures::FOLDER_TYPE`], on top of the standard
    /// reference-type hierarchy. This is the pagination scenario.
    pub fn paginated_plant() -> Arc<MemoryNodeStore> {
        let mut builder = AddressSpaceBuilder::with_standard_reference_types()
            .object_type(Self::FOLDER_TYPE, "PlantFolderType")
            .object(Self::PARENT, "Plant");
        for i in 1..=5 {
            let child = Self::child(i);
            builder = builder
                .object(child.clone(), &format!("Child{}", i))
                .reference(Self::PARENT, reference_type_ids::ORGANIZES, child.clone())
                .type_definition(child, Self::FOLDER_TYPE);
        }
        builder.build()
    }

    /// A gateway node whose only forward reference points at
    /// `ns=3;s=Remote` on server 7. This is the cross-server hop scenario.
    pub fn cross_server() -> Arc<MemoryNodeStore> {
        AddressSpaceBuilder::with_standard_reference_types()
            .object(Self::GATEWAY, "Gateway")
            .forward_reference(
                Self::GATEWAY,
                reference_type_ids::HAS_CHILD,
                ExpandedNodeId::remote(NodeId::string(3, "Remote"), Self::REMOTE_SERVER_INDEX),
            )
            .build()
    }

    /// A parent with one Organizes child plus a dangling reference to a
    /// node that was never inserted. Exercises the skip-silently rule.
    pub fn with_dangling_reference() -> Arc<MemoryNodeStore> {
        AddressSpaceBuilder::with_standard_reference_types()
            .object(Self::PARENT, "Plant")
            .object(Self::child(1), "Child1")
            .reference(Self::PARENT, reference_type_ids::ORGANIZES, Self::child(1))
            .forward_reference(
                Self::PARENT,
                reference_type_ids::ORGANIZES,
                ExpandedNodeId::local(NodeId::numeric(1, 999)),
            )
            .build()
    }
}
