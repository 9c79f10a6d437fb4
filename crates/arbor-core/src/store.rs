// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Node store contract and the in-memory implementation.
//!
//! The View Services consume nodes through the narrow [`NodeStore`] trait:
//! `get` hands out an [`Arc<Node>`] snapshot whose `Drop` is the release, so
//! every exit path releases its handle by construction. A store
//! implementation is free to serve clones, memory-mapped data, or generated
//! nodes, as long as a handle stays internally consistent for its lifetime.
//!
//! The module also hosts the traversal helpers shared by the services:
//! [`is_node_in_tree`] (reachability over a set of reference types, with
//! cycle protection) and [`type_definition_of`] (HasTypeDefinition
//! resolution).

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::error::{AddressSpaceError, AddressSpaceResult};
use crate::node::Node;
use crate::types::{reference_type_ids, NodeClass, NodeId};

// =============================================================================
// NodeStore Trait
// =============================================================================

/// Read access to the server address space.
///
/// `get` returns `None` for unknown ids. The returned handle is a stable
/// snapshot of the node; concurrent mutations of the store do not change a
/// handle that has already been obtained.
pub trait NodeStore: Send + Sync {
    /// Looks up a node by id.
    fn get(&self, node_id: &NodeId) -> Option<Arc<Node>>;
}

// =============================================================================
// MemoryNodeStore
// =============================================================================

/// Heap-backed node store.
///
/// Nodes are stored behind `Arc`s in a hash map; `get` clones the `Arc`, so
/// readers never block each other beyond the map lock.
#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    nodes: RwLock<HashMap<NodeId, Arc<Node>>>,
}

impl MemoryNodeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node.
    ///
    /// # Errors
    ///
    /// Returns [`AddressSpaceError::DuplicateNode`] if a node with the same
    /// id is already present.
    pub fn insert(&self, node: Node) -> AddressSpaceResult<()> {
        let mut nodes = self.nodes.write();
        if nodes.contains_key(&node.node_id) {
            return Err(AddressSpaceError::duplicate_node(node.node_id));
        }
        nodes.insert(node.node_id.clone(), Arc::new(node));
        Ok(())
    }

    /// Inserts a node, replacing any previous node with the same id.
    pub fn upsert(&self, node: Node) {
        self.nodes
            .write()
            .insert(node.node_id.clone(), Arc::new(node));
    }

    /// Removes a node, returning its last snapshot.
    pub fn remove(&self, node_id: &NodeId) -> Option<Arc<Node>> {
        self.nodes.write().remove(node_id)
    }

    /// Returns `true` if a node with the given id exists.
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.read().contains_key(node_id)
    }

    /// Number of nodes in the store.
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Returns `true` if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

impl NodeStore for MemoryNodeStore {
    fn get(&self, node_id: &NodeId) -> Option<Arc<Node>> {
        self.nodes.read().get(node_id).cloned()
    }
}

// =============================================================================
// Traversal Helpers
// =============================================================================

/// Returns `true` if `node_id` equals `root` or is reachable from `root`
/// via forward references of the given types.
///
/// The walk runs upward from `node_id` along inverse references, which is
/// equivalent and touches only the candidate's ancestor chain. Reference-type
/// hierarchies are DAGs by contract; a visited set guards against cycles in
/// corrupted models.
pub fn is_node_in_tree(
    store: &dyn NodeStore,
    node_id: &NodeId,
    root: &NodeId,
    reference_types: &[NodeId],
) -> bool {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<NodeId> = vec![node_id.clone()];

    while let Some(current) = stack.pop() {
        if &current == root {
            return true;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        let Some(node) = store.get(&current) else {
            continue;
        };
        for rk in &node.references {
            if !rk.is_inverse || !reference_types.contains(&rk.reference_type_id) {
                continue;
            }
            for target in &rk.targets {
                if target.is_local() {
                    stack.push(target.node_id.clone());
                }
            }
        }
    }

    trace!(node = %node_id, root = %root, "node not in tree");
    false
}

/// Resolves the type definition of an Object or Variable node.
///
/// Follows the node's forward HasTypeDefinition reference; returns `None`
/// when the node carries none or the target vanished.
pub fn type_definition_of(store: &dyn NodeStore, node: &Node) -> Option<Arc<Node>> {
    if !matches!(node.node_class, NodeClass::Object | NodeClass::Variable) {
        return None;
    }
    node.targets_of(&reference_type_ids::HAS_TYPE_DEFINITION, false)
        .find(|t| t.is_local())
        .and_then(|t| store.get(&t.node_id))
}

// =============================================================================
// Tests
// =============================================================================
