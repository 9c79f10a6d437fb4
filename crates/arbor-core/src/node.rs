// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Address-space nodes and their outgoing references.
//!
//! A [`Node`] carries the attributes the View Services read (node id, class,
//! browse name, display name) plus its outgoing references grouped into
//! [`ReferenceKind`]s. All references sharing the same
//! `(reference_type_id, is_inverse)` key live in one kind, and the order of
//! kinds as well as the order of targets within a kind is stable: browse
//! continuation points address references by `(kind index, target index)`.

use serde::{Deserialize, Serialize};

use crate::types::{ExpandedNodeId, LocalizedText, NodeClass, NodeId, QualifiedName};

// =============================================================================
// ReferenceKind
// =============================================================================

/// All outgoing references of a node that share a reference type and
/// direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceKind {
    /// The reference type of every target in this kind.
    pub reference_type_id: NodeId,

    /// `true` if these are inverse references.
    pub is_inverse: bool,

    /// Ordered reference targets. Entries with a non-zero server index point
    /// at nodes on other servers.
    pub targets: Vec<ExpandedNodeId>,
}

impl ReferenceKind {
    /// Creates an empty reference kind.
    pub fn new(reference_type_id: NodeId, is_inverse: bool) -> Self {
        Self {
            reference_type_id,
            is_inverse,
            targets: Vec::new(),
        }
    }

    /// Returns `true` if this kind groups references of the given type and
    /// direction.
    #[inline]
    pub fn matches(&self, reference_type_id: &NodeId, is_inverse: bool) -> bool {
        self.is_inverse == is_inverse && &self.reference_type_id == reference_type_id
    }
}

// =============================================================================
// Node
// =============================================================================

/// A node in the server address space.
///
/// Only the attributes consumed by the View Services are modeled; value,
/// access-level and type-specific attributes belong to the data-access layer.
///
/// # Examples
///
/// ```
/// use arbor_core::{Node, NodeClass, NodeId, QualifiedName, LocalizedText};
/// use arbor_core::{ExpandedNodeId, reference_type_ids};
///
/// let node = Node::new(
///     NodeId::numeric(1, 10),
///     NodeClass::Object,
///     QualifiedName::new(1, "Boiler"),
///     LocalizedText::english("Boiler"),
/// )
/// .with_reference(
///     reference_type_ids::HAS_COMPONENT,
///     false,
///     ExpandedNodeId::local(NodeId::numeric(1, 11)),
/// );
/// assert_eq!(node.references.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// The node's identifier.
    pub node_id: NodeId,

    /// The node's class.
    pub node_class: NodeClass,

    /// The namespace-qualified browse name.
    pub browse_name: QualifiedName,

    /// The localized display name.
    pub display_name: LocalizedText,

    /// Outgoing references, grouped by `(reference type, direction)` in
    /// first-insertion order.
    pub references: Vec<ReferenceKind>,
}

impl Node {
    /// Creates a node without references.
    pub fn new(
        node_id: NodeId,
        node_class: NodeClass,
        browse_name: QualifiedName,
        display_name: LocalizedText,
    ) -> Self {
        Self {
            node_id,
            node_class,
            browse_name,
            display_name,
            references: Vec::new(),
        }
    }

    /// Adds an outgoing reference, grouping it into the matching
    /// [`ReferenceKind`] or appending a new kind.
    pub fn add_reference(
        &mut self,
        reference_type_id: NodeId,
        is_inverse: bool,
        target: ExpandedNodeId,
    ) {
        if let Some(kind) = self
            .references
            .iter_mut()
            .find(|rk| rk.matches(&reference_type_id, is_inverse))
        {
            kind.targets.push(target);
            return;
        }
        let mut kind = ReferenceKind::new(reference_type_id, is_inverse);
        kind.targets.push(target);
        self.references.push(kind);
    }

    /// Chainable variant of [`Node::add_reference`].
    pub fn with_reference(
        mut self,
        reference_type_id: NodeId,
        is_inverse: bool,
        target: ExpandedNodeId,
    ) -> Self {
        self.add_reference(reference_type_id, is_inverse, target);
        self
    }

    /// Iterates the targets of every kind matching the given type and
    /// direction.
    pub fn targets_of<'a>(
        &'a self,
        reference_type_id: &'a NodeId,
        is_inverse: bool,
    ) -> impl Iterator<Item = &'a ExpandedNodeId> + 'a {
        self.references
            .iter()
            .filter(move |rk| rk.matches(reference_type_id, is_inverse))
            .flat_map(|rk| rk.targets.iter())
    }

    /// Total number of outgoing references across all kinds.
    pub fn reference_count(&self) -> usize {
        self.references.iter().map(|rk| rk.targets.len()).sum()
    }
}

// =============================================================================
// Tests
// =============================================================================
