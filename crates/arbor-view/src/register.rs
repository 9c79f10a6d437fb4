// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The RegisterNodes and UnregisterNodes services.
//!
//! Both services share the view-service request validation but keep no
//! per-session state: RegisterNodes echoes the input identifiers as the
//! registered handles, UnregisterNodes acknowledges the request. A server
//! may later attach real bookkeeping without changing the envelope.

use serde::{Deserialize, Serialize};
use tracing::debug;

use arbor_core::{NodeId, StatusCode};

use crate::service::{ResponseHeader, ViewServices};
use crate::session::Session;

// =============================================================================
// Service Envelopes
// =============================================================================

/// RegisterNodes service request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegisterNodesRequest {
    /// The node ids to register.
    pub nodes_to_register: Vec<NodeId>,
}

/// RegisterNodes service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterNodesResponse {
    /// Service-level outcome.
    pub response_header: ResponseHeader,

    /// The registered handles, one per input id in request order.
    pub registered_node_ids: Vec<NodeId>,
}

/// UnregisterNodes service request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnregisterNodesRequest {
    /// The node ids to unregister.
    pub nodes_to_unregister: Vec<NodeId>,
}

/// UnregisterNodes service response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnregisterNodesResponse {
    /// Service-level outcome.
    pub response_header: ResponseHeader,
}

// =============================================================================
// Service Entry Points
// =============================================================================

impl ViewServices {
    /// The RegisterNodes service: validates the envelope and echoes the
    /// input identifiers as pseudo-handles.
    pub fn service_register_nodes(
        &self,
        session: &Session,
        request: &RegisterNodesRequest,
    ) -> RegisterNodesResponse {
        debug!(
            session = %session.id(),
            nodes = request.nodes_to_register.len(),
            "processing register nodes request"
        );

        let status = self.validate_register_envelope(request.nodes_to_register.len());
        RegisterNodesResponse {
            response_header: ResponseHeader::new(status),
            registered_node_ids: if status.is_good() {
                request.nodes_to_register.clone()
            } else {
                Vec::new()
            },
        }
    }

    /// The UnregisterNodes service: validates the envelope and acknowledges.
    pub fn service_unregister_nodes(
        &self,
        session: &Session,
        request: &UnregisterNodesRequest,
    ) -> UnregisterNodesResponse {
        debug!(
            session = %session.id(),
            nodes = request.nodes_to_unregister.len(),
            "processing unregister nodes request"
        );

        let status = self.validate_register_envelope(request.nodes_to_unregister.len());
        UnregisterNodesResponse {
            response_header: ResponseHeader::new(status),
        }
    }

    fn validate_register_envelope(&self, operations: usize) -> StatusCode {
        if operations == 0 {
            return StatusCode::BAD_NOTHING_TO_DO;
        }
        let cap = self.limits.max_nodes_per_register_nodes;
        if cap != 0 && operations > cap as usize {
            return StatusCode::BAD_TOO_MANY_OPERATIONS;
        }
        StatusCode::GOOD
    }
}

// =============================================================================
// Tests
// =============================================================================
