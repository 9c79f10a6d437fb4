// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The TranslateBrowsePathsToNodeIds service.
//!
//! A browse path names a starting node and a chain of qualified-name hops.
//! Resolution is a breadth-first walk over path depth with two frontier
//! buffers exchanged after every element: `current` holds the candidates of
//! the previous depth, `next` collects the nodes their matching references
//! reach. Targets on other servers are recorded immediately with the depth
//! at which they were found so the client can continue the walk there;
//! local candidates surviving the final browse-name filter become fully
//! resolved targets.

use std::mem;

use serde::{Deserialize, Serialize};
use tracing::debug;

use arbor_core::{
    ExpandedNodeId, NodeClass, NodeId, NodeStore, QualifiedName, ReferenceKind, StatusCode,
};

use crate::error::{ViewError, ViewResult};
use crate::service::{process_service_operations, ResponseHeader, ViewServices};
use crate::session::Session;
use crate::subtype::relevant_reference;

// =============================================================================
// RelativePathElement
// =============================================================================

/// One hop of a browse path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativePathElement {
    /// Reference type to follow; the null node id means "any reference".
    pub reference_type_id: NodeId,

    /// Follow the reference in its inverse direction.
    pub is_inverse: bool,

    /// Whether subtypes of `reference_type_id` also match.
    pub include_subtypes: bool,

    /// Browse name the hop's target must carry. Must not be null.
    pub target_name: QualifiedName,
}

impl RelativePathElement {
    /// Creates a forward hop over any reference type.
    pub fn new(target_name: impl Into<QualifiedName>) -> Self {
        Self {
            reference_type_id: NodeId::null(),
            is_inverse: false,
            include_subtypes: true,
            target_name: target_name.into(),
        }
    }

    /// Restricts the hop to a reference type.
    pub fn with_reference_type(mut self, reference_type_id: NodeId) -> Self {
        self.reference_type_id = reference_type_id;
        self
    }

    /// Sets the hop direction.
    pub fn with_inverse(mut self, is_inverse: bool) -> Self {
        self.is_inverse = is_inverse;
        self
    }

    /// Sets whether reference subtypes match.
    pub fn with_include_subtypes(mut self, include: bool) -> Self {
        self.include_subtypes = include;
        self
    }
}

// =============================================================================
// BrowsePath
// =============================================================================

/// A starting node plus a non-empty chain of relative-path elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowsePath {
    /// The node resolution starts from.
    pub starting_node: NodeId,

    /// The hops to follow, in order.
    pub relative_path: Vec<RelativePathElement>,
}

impl BrowsePath {
    /// Creates a browse path.
    pub fn new(starting_node: NodeId, relative_path: Vec<RelativePathElement>) -> Self {
        Self {
            starting_node,
            relative_path,
        }
    }

    /// Parses a slash-separated path such as `"Objects/Server/ServerStatus"`.
    ///
    /// A leading `Objects`, `Root`, `Types` or `Views` segment selects the
    /// corresponding standard folder as the starting node; otherwise the
    /// path starts at the Objects folder. Each remaining segment becomes a
    /// forward any-reference hop, with an optional `ns:` prefix on the name
    /// (`"2:Machine"`).
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidPath`] when no segments remain.
    pub fn from_string(path: &str) -> ViewResult<Self> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.is_empty() {
            return Err(ViewError::invalid_path(path, "empty path"));
        }

        let (starting_node, skip) = match parts[0].to_lowercase().as_str() {
            "objects" => (NodeId::OBJECTS_FOLDER, 1),
            "root" => (NodeId::ROOT_FOLDER, 1),
            "types" => (NodeId::TYPES_FOLDER, 1),
            "views" => (NodeId::VIEWS_FOLDER, 1),
            _ => (NodeId::OBJECTS_FOLDER, 0),
        };

        let relative_path: Vec<RelativePathElement> = parts
            .iter()
            .skip(skip)
            .map(|name| RelativePathElement::new(QualifiedName::from(*name)))
            .collect();
        if relative_path.is_empty() {
            return Err(ViewError::invalid_path(path, "no path elements after prefix"));
        }

        Ok(Self::new(starting_node, relative_path))
    }
}

// =============================================================================
// BrowsePathTarget & Result
// =============================================================================

/// One node a browse path resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsePathTarget {
    /// The resolved node, possibly on another server.
    pub target_id: ExpandedNodeId,

    /// Depth at which resolution was handed over to another server, or
    /// [`BrowsePathTarget::REMAINING_PATH_NONE`] for a fully resolved local
    /// target.
    pub remaining_path_index: u32,
}

impl BrowsePathTarget {
    /// Sentinel for targets with no remaining path.
    pub const REMAINING_PATH_NONE: u32 = u32::MAX;

    /// Returns `true` when the whole path was resolved locally.
    #[inline]
    pub const fn is_fully_resolved(&self) -> bool {
        self.remaining_path_index == Self::REMAINING_PATH_NONE
    }
}

/// The outcome of resolving one browse path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrowsePathResult {
    /// Operation status; `BadNoMatch` when nothing survived.
    pub status_code: StatusCode,

    /// The resolved targets; empty on any failure.
    pub targets: Vec<BrowsePathTarget>,
}

impl BrowsePathResult {
    fn error(status_code: StatusCode) -> Self {
        Self {
            status_code,
            targets: Vec::new(),
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Collects one reference kind's targets: external ones go straight into the
/// result with the current element depth, local ones join the next frontier.
fn walk_reference_kind_targets(
    targets: &mut Vec<BrowsePathTarget>,
    next: &mut Vec<NodeId>,
    depth: u32,
    rk: &ReferenceKind,
) {
    for target in &rk.targets {
        if !target.is_local() {
            targets.push(BrowsePathTarget {
                target_id: target.clone(),
                remaining_path_index: depth,
            });
            continue;
        }
        next.push(target.node_id.clone());
    }
}

/// Expands one path element: every node of the current frontier that passes
/// the previous element's browse-name filter contributes the targets of its
/// matching reference kinds.
fn walk_path_element(
    store: &dyn NodeStore,
    status: &mut StatusCode,
    targets: &mut Vec<BrowsePathTarget>,
    element: &RelativePathElement,
    depth: u32,
    previous_name: Option<&QualifiedName>,
    current: &[NodeId],
    next: &mut Vec<NodeId>,
) {
    let all_references = element.reference_type_id.is_null();
    if !all_references {
        // A missing or non-ReferenceType filter dead-ends the walk; the
        // caller turns the empty frontier into BadNoMatch.
        match store.get(&element.reference_type_id) {
            Some(node) if node.node_class == NodeClass::ReferenceType => {}
            _ => return,
        }
    }

    for node_id in current {
        let Some(node) = store.get(node_id) else {
            // Only a missing starting node is an error; deeper candidates
            // may have vanished under a mutating model.
            if depth == 0 {
                *status = StatusCode::BAD_NODE_ID_UNKNOWN;
            }
            continue;
        };

        if let Some(name) = previous_name {
            if name.namespace_index != node.browse_name.namespace_index
                || name.name != node.browse_name.name
            {
                continue;
            }
        }

        for rk in &node.references {
            if !status.is_good() {
                break;
            }
            if rk.is_inverse != element.is_inverse {
                continue;
            }
            if !all_references
                && !relevant_reference(
                    store,
                    element.include_subtypes,
                    &element.reference_type_id,
                    &rk.reference_type_id,
                )
            {
                continue;
            }
            walk_reference_kind_targets(targets, next, depth, rk);
        }
    }
}

/// Moves the final frontier into the result: candidates whose browse name
/// matches the last element become fully resolved targets.
fn commit_final_targets(
    store: &dyn NodeStore,
    targets: &mut Vec<BrowsePathTarget>,
    target_name: &QualifiedName,
    current: &mut Vec<NodeId>,
) {
    targets.reserve(current.len());
    for node_id in current.drain(..) {
        let Some(node) = store.get(&node_id) else {
            continue;
        };
        let matches = node.browse_name.namespace_index == target_name.namespace_index
            && node.browse_name.name == target_name.name;
        if matches {
            targets.push(BrowsePathTarget {
                target_id: ExpandedNodeId::local(node_id),
                remaining_path_index: BrowsePathTarget::REMAINING_PATH_NONE,
            });
        }
    }
}

/// Resolves one browse path against the store.
pub(crate) fn resolve_browse_path(store: &dyn NodeStore, path: &BrowsePath) -> BrowsePathResult {
    if path.relative_path.is_empty() {
        return BrowsePathResult::error(StatusCode::BAD_NOTHING_TO_DO);
    }
    // Checked up front, before any store access.
    if path
        .relative_path
        .iter()
        .any(|element| element.target_name.is_null())
    {
        return BrowsePathResult::error(StatusCode::BAD_BROWSE_NAME_INVALID);
    }

    let mut status = StatusCode::GOOD;
    let mut targets: Vec<BrowsePathTarget> = Vec::with_capacity(10);
    let mut current: Vec<NodeId> = Vec::with_capacity(10);
    let mut next: Vec<NodeId> = Vec::with_capacity(10);
    current.push(path.starting_node.clone());

    let mut walked_all_elements = true;
    for (depth, element) in path.relative_path.iter().enumerate() {
        let previous_name = depth
            .checked_sub(1)
            .map(|i| &path.relative_path[i].target_name);

        walk_path_element(
            store,
            &mut status,
            &mut targets,
            element,
            depth as u32,
            previous_name,
            &current,
            &mut next,
        );

        current.clear();
        if next.is_empty() || !status.is_good() {
            walked_all_elements = false;
            break;
        }
        mem::swap(&mut current, &mut next);
    }

    if walked_all_elements && status.is_good() {
        if let Some(last) = path.relative_path.last() {
            commit_final_targets(store, &mut targets, &last.target_name, &mut current);
        }
    }

    if targets.is_empty() && status.is_good() {
        status = StatusCode::BAD_NO_MATCH;
    }
    if !status.is_good() {
        targets.clear();
    }

    BrowsePathResult {
        status_code: status,
        targets,
    }
}

// =============================================================================
// Service Envelopes
// =============================================================================

/// TranslateBrowsePathsToNodeIds service request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranslateBrowsePathsRequest {
    /// The paths to resolve.
    pub browse_paths: Vec<BrowsePath>,
}

/// TranslateBrowsePathsToNodeIds service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateBrowsePathsResponse {
    /// Service-level outcome.
    pub response_header: ResponseHeader,

    /// One result per path, in request order.
    pub results: Vec<BrowsePathResult>,
}

// =============================================================================
// Service Entry Points
// =============================================================================

impl ViewServices {
    /// The TranslateBrowsePathsToNodeIds service.
    pub fn service_translate_browse_paths(
        &self,
        session: &Session,
        request: &TranslateBrowsePathsRequest,
    ) -> TranslateBrowsePathsResponse {
        debug!(
            session = %session.id(),
            paths = request.browse_paths.len(),
            "processing translate browse paths request"
        );

        match process_service_operations(
            &request.browse_paths,
            self.limits.max_nodes_per_translate_browse_paths_to_node_ids,
            |path| resolve_browse_path(self.store.as_ref(), path),
        ) {
            Ok(results) => TranslateBrowsePathsResponse {
                response_header: ResponseHeader::good(),
                results,
            },
            Err(status) => TranslateBrowsePathsResponse {
                response_header: ResponseHeader::new(status),
                results: Vec::new(),
            },
        }
    }

    /// Single-shot path resolution, bypassing request batching.
    pub fn translate_browse_path(&self, path: &BrowsePath) -> BrowsePathResult {
        resolve_browse_path(self.store.as_ref(), path)
    }
}

// =============================================================================
// Tests
// =============================================================================
