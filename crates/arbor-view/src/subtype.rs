// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Reference-type subtype oracle.
//!
//! Browse descriptions and relative-path elements may restrict the walk to a
//! reference type and, optionally, its subtypes. The oracle answers whether a
//! concrete reference kind passes that filter using the HasSubtype hierarchy
//! in the node store.

use arbor_core::{is_node_in_tree, reference_type_ids, NodeId, NodeStore};

/// Returns `true` if `candidate` is the requested reference type or, when
/// `include_subtypes` is set, lies in its HasSubtype closure.
///
/// The caller holds no node handle across this call; the oracle performs its
/// own store lookups.
pub fn relevant_reference(
    store: &dyn NodeStore,
    include_subtypes: bool,
    root: &NodeId,
    candidate: &NodeId,
) -> bool {
    if !include_subtypes {
        return root == candidate;
    }
    is_node_in_tree(store, candidate, root, &[reference_type_ids::HAS_SUBTYPE])
}

// =============================================================================
// Tests
// =============================================================================
