// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The Browse and BrowseNext services.
//!
//! A browse walks the reference kinds of a single node, applies the
//! direction, reference-type and node-class filters, and fills a result up
//! to the effective reference budget. When the budget truncates the walk,
//! the `(kind, target)` cursor is parked in a session continuation point and
//! BrowseNext resumes from exactly those coordinates, so the concatenation
//! of the paginated arrays equals a single uncapped browse.

use serde::{Deserialize, Serialize};
use tracing::debug;

use arbor_core::{
    BrowseDirection, Node, NodeClass, NodeId, NodeStore, StatusCode,
};

use crate::description::{fill_reference_description, BrowseResultMask, ReferenceDescription};
use crate::limits::ViewLimits;
use crate::service::{process_service_operations, ResponseHeader, ViewDescription, ViewServices};
use crate::session::Session;
use crate::subtype::relevant_reference;

// =============================================================================
// BrowseDescription
// =============================================================================

/// One Browse operation: the starting node and the reference filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseDescription {
    /// The node whose references are enumerated.
    pub node_id: NodeId,

    /// Which direction of references to follow.
    pub browse_direction: BrowseDirection,

    /// Reference type filter; the null node id means "all references".
    pub reference_type_id: NodeId,

    /// Whether subtypes of `reference_type_id` also match.
    pub include_subtypes: bool,

    /// Node-class bit mask filter; zero means "all classes".
    pub node_class_mask: u32,

    /// Which description fields to populate.
    pub result_mask: BrowseResultMask,
}

impl BrowseDescription {
    /// Creates a description that follows all forward references of a node
    /// and populates every description field.
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            browse_direction: BrowseDirection::Forward,
            reference_type_id: NodeId::null(),
            include_subtypes: true,
            node_class_mask: 0,
            result_mask: BrowseResultMask::ALL,
        }
    }

    /// Sets the browse direction.
    pub fn with_direction(mut self, direction: BrowseDirection) -> Self {
        self.browse_direction = direction;
        self
    }

    /// Restricts the walk to a reference type.
    pub fn with_reference_type(mut self, reference_type_id: NodeId) -> Self {
        self.reference_type_id = reference_type_id;
        self
    }

    /// Sets whether subtypes of the reference type match.
    pub fn with_include_subtypes(mut self, include: bool) -> Self {
        self.include_subtypes = include;
        self
    }

    /// Sets the node-class mask.
    pub fn with_node_class_mask(mut self, mask: u32) -> Self {
        self.node_class_mask = mask;
        self
    }

    /// Sets the result mask.
    pub fn with_result_mask(mut self, mask: BrowseResultMask) -> Self {
        self.result_mask = mask;
        self
    }
}

// =============================================================================
// BrowseResult
// =============================================================================

/// The outcome of one Browse or BrowseNext operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrowseResult {
    /// Operation status.
    pub status_code: StatusCode,

    /// The matching references. `None` is the protocol null used by error
    /// results; `Some` with an empty vector is the distinguished empty array
    /// of a successful browse that matched nothing.
    pub references: Option<Vec<ReferenceDescription>>,

    /// Identifier to pass to BrowseNext when the walk was truncated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_point: Option<Vec<u8>>,
}

impl BrowseResult {
    /// Creates an error result with a null reference array.
    pub(crate) fn error(status_code: StatusCode) -> Self {
        Self {
            status_code,
            references: None,
            continuation_point: None,
        }
    }

    /// The reference array, empty when null.
    pub fn references(&self) -> &[ReferenceDescription] {
        self.references.as_deref().unwrap_or(&[])
    }
}

// =============================================================================
// Browse Cursor & Iterator
// =============================================================================

/// Resumable coordinates into a node's reference list: the next unexamined
/// `(reference kind, target)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct BrowseCursor {
    /// Index into the node's reference kinds.
    pub reference_kind_index: usize,

    /// Index into the current kind's targets.
    pub target_index: usize,
}

/// Resolves the effective per-node reference budget from the client's
/// request and the server configuration. Zero means "server decides" on the
/// client side and "no cap" on the server side.
fn effective_max_references(requested: u32, configured: u32) -> usize {
    if requested == 0 {
        if configured != 0 {
            configured as usize
        } else {
            u32::MAX as usize
        }
    } else if configured != 0 {
        requested.min(configured) as usize
    } else {
        requested as usize
    }
}

/// Validates the browse filters and fetches the starting node.
fn validate_and_get_node(
    store: &dyn NodeStore,
    descr: &BrowseDescription,
) -> Result<std::sync::Arc<Node>, StatusCode> {
    if !descr.browse_direction.is_valid() {
        return Err(StatusCode::BAD_BROWSE_DIRECTION_INVALID);
    }

    if !descr.reference_type_id.is_null() {
        match store.get(&descr.reference_type_id) {
            Some(reftype) if reftype.node_class == NodeClass::ReferenceType => {}
            _ => return Err(StatusCode::BAD_REFERENCE_TYPE_ID_INVALID),
        }
    }

    store
        .get(&descr.node_id)
        .ok_or(StatusCode::BAD_NODE_ID_UNKNOWN)
}

/// Walks the node's references from the cursor position, collecting up to
/// the effective budget. Returns the collected descriptions and whether the
/// node is done; on truncation the cursor holds the resume coordinates.
fn browse_references(
    store: &dyn NodeStore,
    limits: &ViewLimits,
    node: &Node,
    descr: &BrowseDescription,
    cursor: &mut BrowseCursor,
    requested_max: u32,
) -> (Vec<ReferenceDescription>, bool) {
    if node.references.is_empty() {
        return (Vec::new(), true);
    }

    let browse_all = descr.reference_type_id.is_null();
    let max_references = effective_max_references(requested_max, limits.max_references_per_node);

    let mut references: Vec<ReferenceDescription> = Vec::with_capacity(2);
    let mut kind_index = cursor.reference_kind_index;
    let mut target_index = cursor.target_index;

    while kind_index < node.references.len() {
        let rk = &node.references[kind_index];

        let direction_matches = match descr.browse_direction {
            BrowseDirection::Forward => !rk.is_inverse,
            BrowseDirection::Inverse => rk.is_inverse,
            // Invalid directions were rejected before the walk.
            BrowseDirection::Both | BrowseDirection::Invalid => true,
        };
        let type_matches = browse_all
            || relevant_reference(
                store,
                descr.include_subtypes,
                &descr.reference_type_id,
                &rk.reference_type_id,
            );
        if !direction_matches || !type_matches {
            kind_index += 1;
            target_index = 0;
            continue;
        }

        while target_index < rk.targets.len() {
            // Vanished targets are skipped silently; the model may mutate
            // between requests.
            let Some(target) = store.get(&rk.targets[target_index].node_id) else {
                target_index += 1;
                continue;
            };

            if !target.node_class.matches_mask(descr.node_class_mask) {
                target_index += 1;
                continue;
            }

            if references.len() >= max_references {
                cursor.reference_kind_index = kind_index;
                cursor.target_index = target_index;
                return (references, false);
            }

            references.push(fill_reference_description(
                store,
                &target,
                rk,
                descr.result_mask,
            ));
            target_index += 1;
        }

        target_index = 0;
        kind_index += 1;
    }

    (references, true)
}

// =============================================================================
// Per-Operation Functions
// =============================================================================

impl ViewServices {
    /// Runs a fresh browse for one description, creating a continuation
    /// point when the budget truncates the walk.
    fn browse_fresh(
        &self,
        session: &mut Session,
        descr: &BrowseDescription,
        requested_max: u32,
    ) -> BrowseResult {
        let node = match validate_and_get_node(self.store.as_ref(), descr) {
            Ok(node) => node,
            Err(status) => return BrowseResult::error(status),
        };

        let mut cursor = BrowseCursor::default();
        let (references, done) = browse_references(
            self.store.as_ref(),
            &self.limits,
            &node,
            descr,
            &mut cursor,
            requested_max,
        );

        let mut result = BrowseResult {
            status_code: StatusCode::GOOD,
            references: Some(references),
            continuation_point: None,
        };

        if !done {
            match session.create_continuation_point(descr.clone(), requested_max, cursor) {
                Ok(identifier) => result.continuation_point = Some(identifier),
                // All slots taken: the partial array is returned as-is and
                // the client must reissue the full query.
                Err(status) => result.status_code = status,
            }
        }

        result
    }

    /// Resumes or releases one continuation point.
    fn browse_next_one(
        &self,
        session: &mut Session,
        continuation_point: &[u8],
        release: bool,
    ) -> BrowseResult {
        let Some(mut entry) = session.take_continuation_point(continuation_point) else {
            return BrowseResult::error(StatusCode::BAD_CONTINUATION_POINT_INVALID);
        };

        if release {
            session.discard_continuation_point(entry);
            return BrowseResult::default();
        }

        let node = match validate_and_get_node(self.store.as_ref(), &entry.browse_description) {
            Ok(node) => node,
            Err(status) => {
                // The model changed under the cursor; the entry stays live
                // until the client releases it or the session ends.
                session.put_back_continuation_point(entry);
                return BrowseResult::error(status);
            }
        };

        let mut cursor = entry.cursor;
        let (references, done) = browse_references(
            self.store.as_ref(),
            &self.limits,
            &node,
            &entry.browse_description,
            &mut cursor,
            entry.max_references,
        );

        let mut result = BrowseResult {
            status_code: StatusCode::GOOD,
            references: Some(references),
            continuation_point: None,
        };

        if done {
            session.discard_continuation_point(entry);
        } else {
            entry.cursor = cursor;
            result.continuation_point = Some(entry.identifier.clone());
            session.put_back_continuation_point(entry);
        }

        result
    }
}

// =============================================================================
// Service Envelopes
// =============================================================================

/// Browse service request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrowseRequest {
    /// View to browse; must be the null view here.
    pub view: ViewDescription,

    /// Per-node reference budget requested by the client; zero lets the
    /// server decide.
    pub requested_max_references_per_node: u32,

    /// The per-node browse operations.
    pub nodes_to_browse: Vec<BrowseDescription>,
}

/// Browse service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseResponse {
    /// Service-level outcome.
    pub response_header: ResponseHeader,

    /// One result per browse description, in request order.
    pub results: Vec<BrowseResult>,
}

impl BrowseResponse {
    fn service_fault(status: StatusCode) -> Self {
        Self {
            response_header: ResponseHeader::new(status),
            results: Vec::new(),
        }
    }
}

/// BrowseNext service request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrowseNextRequest {
    /// When set, the named continuation points are freed instead of resumed.
    pub release_continuation_points: bool,

    /// Continuation-point identifiers from prior Browse/BrowseNext calls.
    pub continuation_points: Vec<Vec<u8>>,
}

/// BrowseNext service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseNextResponse {
    /// Service-level outcome.
    pub response_header: ResponseHeader,

    /// One result per continuation point, in request order.
    pub results: Vec<BrowseResult>,
}

impl BrowseNextResponse {
    fn service_fault(status: StatusCode) -> Self {
        Self {
            response_header: ResponseHeader::new(status),
            results: Vec::new(),
        }
    }
}

// =============================================================================
// Service Entry Points
// =============================================================================

impl ViewServices {
    /// The Browse service: one result per description in the request.
    ///
    /// Request-wide failures (non-null view, empty array, too many
    /// operations) produce a service fault with no per-item results.
    pub fn service_browse(&self, session: &mut Session, request: &BrowseRequest) -> BrowseResponse {
        debug!(
            session = %session.id(),
            nodes = request.nodes_to_browse.len(),
            "processing browse request"
        );

        if !request.view.is_null() {
            return BrowseResponse::service_fault(StatusCode::BAD_VIEW_ID_UNKNOWN);
        }

        match process_service_operations(
            &request.nodes_to_browse,
            self.limits.max_nodes_per_browse,
            |descr| self.browse_fresh(session, descr, request.requested_max_references_per_node),
        ) {
            Ok(results) => BrowseResponse {
                response_header: ResponseHeader::good(),
                results,
            },
            Err(status) => BrowseResponse::service_fault(status),
        }
    }

    /// The BrowseNext service: resumes or releases continuation points.
    pub fn service_browse_next(
        &self,
        session: &mut Session,
        request: &BrowseNextRequest,
    ) -> BrowseNextResponse {
        debug!(
            session = %session.id(),
            continuation_points = request.continuation_points.len(),
            release = request.release_continuation_points,
            "processing browse next request"
        );

        let release = request.release_continuation_points;
        match process_service_operations(&request.continuation_points, 0, |cp| {
            self.browse_next_one(session, cp, release)
        }) {
            Ok(results) => BrowseNextResponse {
                response_header: ResponseHeader::good(),
                results,
            },
            Err(status) => BrowseNextResponse::service_fault(status),
        }
    }

    /// Single-shot browse on the admin session, bypassing request batching.
    pub fn browse(&self, requested_max: u32, descr: &BrowseDescription) -> BrowseResult {
        let mut session = self.admin_session.lock();
        self.browse_fresh(&mut session, descr, requested_max)
    }

    /// Single-shot BrowseNext on the admin session.
    pub fn browse_next(&self, release: bool, continuation_point: &[u8]) -> BrowseResult {
        let mut session = self.admin_session.lock();
        self.browse_next_one(&mut session, continuation_point, release)
    }
}

// =============================================================================
// Tests
// =============================================================================
