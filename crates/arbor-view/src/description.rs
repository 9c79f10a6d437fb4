// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Reference descriptions and the result-mask bitfield.
//!
//! A browse returns one [`ReferenceDescription`] per matching reference. The
//! client selects the fields it wants through the [`BrowseResultMask`]
//! bitfield; unselected fields stay at their protocol defaults. The target
//! node id itself is always populated.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use arbor_core::{
    type_definition_of, ExpandedNodeId, LocalizedText, Node, NodeClass, NodeId, NodeStore,
    QualifiedName, ReferenceKind,
};

// =============================================================================
// BrowseResultMask
// =============================================================================

/// Bitfield selecting which [`ReferenceDescription`] fields a browse
/// populates (Part 4 BrowseResultMask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BrowseResultMask(u32);

impl BrowseResultMask {
    /// Populate nothing beyond the target node id.
    pub const NONE: Self = Self(0x00);

    /// Populate `reference_type_id`.
    pub const REFERENCE_TYPE_ID: Self = Self(0x01);

    /// Populate `is_forward`.
    pub const IS_FORWARD: Self = Self(0x02);

    /// Populate `node_class`.
    pub const NODE_CLASS: Self = Self(0x04);

    /// Populate `browse_name`.
    pub const BROWSE_NAME: Self = Self(0x08);

    /// Populate `display_name`.
    pub const DISPLAY_NAME: Self = Self(0x10);

    /// Populate `type_definition`.
    pub const TYPE_DEFINITION: Self = Self(0x20);

    /// Populate every field.
    pub const ALL: Self = Self(0x3F);

    /// Creates a mask from the raw wire bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw wire bits.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for BrowseResultMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for BrowseResultMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// =============================================================================
// ReferenceDescription
// =============================================================================

/// A reference returned by a browse.
///
/// Fields other than `node_id` carry their defaults unless the result mask
/// selected them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceDescription {
    /// The target node; always populated, always with server index zero.
    pub node_id: ExpandedNodeId,

    /// The type of the reference that reached the target.
    pub reference_type_id: NodeId,

    /// `true` if the reference was followed in its forward direction.
    pub is_forward: bool,

    /// The target's node class.
    pub node_class: NodeClass,

    /// The target's browse name.
    pub browse_name: QualifiedName,

    /// The target's display name.
    pub display_name: LocalizedText,

    /// The target's type definition; only resolved for Object and Variable
    /// targets, and left null when the target carries none.
    pub type_definition: ExpandedNodeId,
}

// =============================================================================
// Descriptor Builder
// =============================================================================

/// Materializes the client-facing description of `target`, reached through a
/// reference of kind `reaching`, populating the fields selected by `mask`.
pub(crate) fn fill_reference_description(
    store: &dyn NodeStore,
    target: &Node,
    reaching: &ReferenceKind,
    mask: BrowseResultMask,
) -> ReferenceDescription {
    let mut descr = ReferenceDescription {
        node_id: ExpandedNodeId::local(target.node_id.clone()),
        ..ReferenceDescription::default()
    };

    if mask.contains(BrowseResultMask::REFERENCE_TYPE_ID) {
        descr.reference_type_id = reaching.reference_type_id.clone();
    }
    if mask.contains(BrowseResultMask::IS_FORWARD) {
        descr.is_forward = !reaching.is_inverse;
    }
    if mask.contains(BrowseResultMask::NODE_CLASS) {
        descr.node_class = target.node_class;
    }
    if mask.contains(BrowseResultMask::BROWSE_NAME) {
        descr.browse_name = target.browse_name.clone();
    }
    if mask.contains(BrowseResultMask::DISPLAY_NAME) {
        descr.display_name = target.display_name.clone();
    }
    if mask.contains(BrowseResultMask::TYPE_DEFINITION) {
        if let Some(ty) = type_definition_of(store, target) {
            descr.type_definition = ExpandedNodeId::local(ty.node_id.clone());
        }
    }

    descr
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::{reference_type_ids, MemoryNodeStore, NodeId};

    fn store_with_typed_object() -> (MemoryNodeStore, Node, ReferenceKind) {
        let store = MemoryNodeStore::new();
        let ty = Node::new(
            NodeId::numeric(0, 61),
            NodeClass::ObjectType,
            QualifiedName::standard("FolderType"),
            LocalizedText::english("FolderType"),
        );
        let target = Node::new(
            NodeId::numeric(1, 7),
            NodeClass::Object,
            QualifiedName::new(1, "Pump"),
            LocalizedText::english("Pump"),
        )
        .with_reference(
            reference_type_ids::HAS_TYPE_DEFINITION,
            false,
            ExpandedNodeId::local(NodeId::numeric(0, 61)),
        );
        store.insert(ty).unwrap();
        store.insert(target.clone()).unwrap();

        let mut reaching = ReferenceKind::new(reference_type_ids::ORGANIZES, false);
        reaching
            .targets
            .push(ExpandedNodeId::local(target.node_id.clone()));
        (store, target, reaching)
    }

    #[test]
    fn test_mask_zero_populates_only_node_id() {
        let (store, target, reaching) = store_with_typed_object();
        let descr =
            fill_reference_description(&store, &target, &reaching, BrowseResultMask::NONE);

        assert_eq!(descr.node_id, ExpandedNodeId::local(NodeId::numeric(1, 7)));
        assert!(descr.reference_type_id.is_null());
        assert!(!descr.is_forward);
        assert_eq!(descr.node_class, NodeClass::Unspecified);
        assert!(descr.browse_name.is_null());
        assert!(descr.display_name.text.is_empty());
        assert!(descr.type_definition.node_id.is_null());
    }

    #[test]
    fn test_mask_all_populates_everything() {
        let (store, target, reaching) = store_with_typed_object();
        let descr = fill_reference_description(&store, &target, &reaching, BrowseResultMask::ALL);

        assert_eq!(descr.reference_type_id, reference_type_ids::ORGANIZES);
        assert!(descr.is_forward);
        assert_eq!(descr.node_class, NodeClass::Object);
        assert_eq!(descr.browse_name, QualifiedName::new(1, "Pump"));
        assert_eq!(descr.display_name.text, "Pump");
        assert_eq!(
            descr.type_definition,
            ExpandedNodeId::local(NodeId::numeric(0, 61))
        );
    }

    #[test]
    fn test_type_definition_omitted_when_absent() {
        let store = MemoryNodeStore::new();
        let target = Node::new(
            NodeId::numeric(1, 8),
            NodeClass::Object,
            QualifiedName::new(1, "Bare"),
            LocalizedText::english("Bare"),
        );
        store.insert(target.clone()).unwrap();
        let reaching = ReferenceKind::new(reference_type_ids::ORGANIZES, false);

        let descr =
            fill_reference_description(&store, &target, &reaching, BrowseResultMask::ALL);
        assert!(descr.type_definition.node_id.is_null());
    }

    #[test]
    fn test_mask_bit_operations() {
        let mask = BrowseResultMask::NODE_CLASS | BrowseResultMask::BROWSE_NAME;
        assert!(mask.contains(BrowseResultMask::NODE_CLASS));
        assert!(!mask.contains(BrowseResultMask::DISPLAY_NAME));
        assert_eq!(mask.bits(), 0x0C);
        assert!(BrowseResultMask::ALL.contains(mask));
    }
}
