// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builder for constructing test address spaces with sensible defaults.
//!
//! ## Design Principles
//!
//! - References are added bidirectionally, the way a real server models them
//! - Chainable methods for fluent construction
//! - Panics on inconsistent input; these are test-only helpers

use std::collections::HashMap;
use std::sync::Arc;

use arbor_core::{
    reference_type_ids, ExpandedNodeId, LocalizedText, MemoryNodeStore, Node, NodeClass, NodeId,
    QualifiedName,
};

// =============================================================================
// AddressSpaceBuilder
// =============================================================================

/// Builder for test address spaces.
///
/// Nodes accumulate in the builder so references can mutate both endpoints;
/// `build` freezes everything into a [`MemoryNodeStore`].
#[derive(Debug, Default)]
pub struct AddressSpaceBuilder {
    nodes: HashMap<NodeId, Node>,
}

impl AddressSpaceBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-seeded with the standard reference-type
    /// hierarchy used by the scenarios:
    ///
    /// ```text
    /// References
    /// ├── HierarchicalReferences
    /// │   └── HasChild
    /// │       ├── Organizes
    /// │       ├── HasSubtype
    /// │       └── Aggregates
    /// │           ├── HasComponent
    /// │           └── HasProperty
    /// └── NonHierarchicalReferences
    ///     └── HasTypeDefinition
    /// ```
    pub fn with_standard_reference_types() -> Self {
        use reference_type_ids as ids;
        Self::new()
            .reference_type(ids::REFERENCES, "References")
            .reference_type(ids::HIERARCHICAL_REFERENCES, "HierarchicalReferences")
            .reference_type(ids::NON_HIERARCHICAL_REFERENCES, "NonHierarchicalReferences")
            .reference_type(ids::HAS_CHILD, "HasChild")
            .reference_type(ids::ORGANIZES, "Organizes")
            .reference_type(ids::HAS_SUBTYPE, "HasSubtype")
            .reference_type(ids::AGGREGATES, "Aggregates")
            .reference_type(ids::HAS_COMPONENT, "HasComponent")
            .reference_type(ids::HAS_PROPERTY, "HasProperty")
            .reference_type(ids::HAS_TYPE_DEFINITION, "HasTypeDefinition")
            .subtype(ids::REFERENCES, ids::HIERARCHICAL_REFERENCES)
            .subtype(ids::REFERENCES, ids::NON_HIERARCHICAL_REFERENCES)
            .subtype(ids::HIERARCHICAL_REFERENCES, ids::HAS_CHILD)
            .subtype(ids::HAS_CHILD, ids::ORGANIZES)
            .subtype(ids::HAS_CHILD, ids::HAS_SUBTYPE)
            .subtype(ids::HAS_CHILD, ids::AGGREGATES)
            .subtype(ids::AGGREGATES, ids::HAS_COMPONENT)
            .subtype(ids::AGGREGATES, ids::HAS_PROPERTY)
            .subtype(ids::NON_HIERARCHICAL_REFERENCES, ids::HAS_TYPE_DEFINITION)
    }

    // =========================================================================
    // Node helpers
    // =========================================================================

    /// Adds a prebuilt node.
    pub fn node(mut self, node: Node) -> Self {
        self.nodes.insert(node.node_id.clone(), node);
        self
    }

    /// Adds an Object node named `name` in the id's namespace.
    pub fn object(self, node_id: NodeId, name: &str) -> Self {
        self.classed(node_id, NodeClass::Object, name)
    }

    /// Adds a Variable node.
    pub fn variable(self, node_id: NodeId, name: &str) -> Self {
        self.classed(node_id, NodeClass::Variable, name)
    }

    /// Adds an ObjectType node.
    pub fn object_type(self, node_id: NodeId, name: &str) -> Self {
        self.classed(node_id, NodeClass::ObjectType, name)
    }

    /// Adds a ReferenceType node.
    pub fn reference_type(self, node_id: NodeId, name: &str) -> Self {
        self.classed(node_id, NodeClass::ReferenceType, name)
    }

    /// Adds a node of the given class.
    pub fn classed(mut self, node_id: NodeId, node_class: NodeClass, name: &str) -> Self {
        let ns = node_id.namespace_index;
        let node = Node::new(
            node_id.clone(),
            node_class,
            QualifiedName::new(ns, name),
            LocalizedText::english(name),
        );
        self.nodes.insert(node_id, node);
        self
    }

    // =========================================================================
    // Reference helpers
    // =========================================================================

    /// Adds a bidirectional reference: forward on `source`, inverse on
    /// `target`. Both nodes must already exist.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint was not added to the builder.
    pub fn reference(mut self, source: NodeId, reference_type: NodeId, target: NodeId) -> Self {
        self.nodes
            .get_mut(&source)
            .unwrap_or_else(|| panic!("source node {} not in builder", source))
            .add_reference(
                reference_type.clone(),
                false,
                ExpandedNodeId::local(target.clone()),
            );
        self.nodes
            .get_mut(&target)
            .unwrap_or_else(|| panic!("target node {} not in builder", target))
            .add_reference(reference_type, true, ExpandedNodeId::local(source));
        self
    }

    /// Adds a HasSubtype reference between two reference types.
    pub fn subtype(self, supertype: NodeId, subtype: NodeId) -> Self {
        self.reference(supertype, reference_type_ids::HAS_SUBTYPE, subtype)
    }

    /// Adds a HasTypeDefinition reference from an instance to its type.
    pub fn type_definition(self, instance: NodeId, type_node: NodeId) -> Self {
        self.reference(instance, reference_type_ids::HAS_TYPE_DEFINITION, type_node)
    }

    /// Adds a forward-only reference, e.g. to a node on another server or to
    /// a deliberately missing node.
    ///
    /// # Panics
    ///
    /// Panics if the source was not added to the builder.
    pub fn forward_reference(
        mut self,
        source: NodeId,
        reference_type: NodeId,
        target: ExpandedNodeId,
    ) -> Self {
        self.nodes
            .get_mut(&source)
            .unwrap_or_else(|| panic!("source node {} not in builder", source))
            .add_reference(reference_type, false, target);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Freezes the accumulated nodes into a store.
    pub fn build(self) -> Arc<MemoryNodeStore> {
        let store = MemoryNodeStore::new();
        for (_, node) in self.nodes {
            store.upsert(node);
        }
        Arc::new(store)
    }
}
