// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The view-service façade and the shared service plumbing.
//!
//! [`ViewServices`] owns the node store handle, the configured limits, and a
//! privileged admin session used by the single-shot API variants. Each
//! service validates its request envelope, then maps the per-operation
//! function over the input array through [`process_service_operations`];
//! per-item failures land in the item results while request-wide failures
//! become the service result in the [`ResponseHeader`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use arbor_core::{NodeId, NodeStore, StatusCode};

use crate::limits::ViewLimits;
use crate::session::Session;

// =============================================================================
// ResponseHeader
// =============================================================================

/// Service-level response header.
///
/// Only the fields the view services populate are modeled; diagnostics and
/// request-handle echoing belong to the outer dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseHeader {
    /// Time the response was produced.
    pub timestamp: DateTime<Utc>,

    /// Request-wide outcome; `Good` when per-item results were produced.
    pub service_result: StatusCode,
}

impl ResponseHeader {
    /// Creates a header with the given service result, stamped now.
    pub fn new(service_result: StatusCode) -> Self {
        Self {
            timestamp: Utc::now(),
            service_result,
        }
    }

    /// Creates a `Good` header.
    pub fn good() -> Self {
        Self::new(StatusCode::GOOD)
    }
}

// =============================================================================
// ViewDescription
// =============================================================================

/// The view a browse runs against.
///
/// View-scoped browsing is not supported; only the null view is accepted
/// and any other view id is rejected with `BadViewIdUnknown`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewDescription {
    /// Node id of the view; null selects the whole address space.
    pub view_id: NodeId,

    /// Server timestamp of the view snapshot to browse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Version of the view; zero means the current version.
    pub view_version: u32,
}

impl ViewDescription {
    /// Returns `true` for the null view (browse the whole address space).
    #[inline]
    pub fn is_null(&self) -> bool {
        self.view_id.is_null()
    }
}

// =============================================================================
// Operation Dispatcher
// =============================================================================

/// Applies `op` to every element of `inputs`, enforcing the request-wide
/// envelope rules: an empty array is `BadNothingToDo` and, when
/// `max_operations` is non-zero, an oversized array is
/// `BadTooManyOperations`.
///
/// Operation-specific context (such as the BrowseNext release flag) is
/// captured by the closure rather than smuggled through shared state.
pub(crate) fn process_service_operations<I, O>(
    inputs: &[I],
    max_operations: u32,
    mut op: impl FnMut(&I) -> O,
) -> Result<Vec<O>, StatusCode> {
    if inputs.is_empty() {
        return Err(StatusCode::BAD_NOTHING_TO_DO);
    }
    if max_operations != 0 && inputs.len() > max_operations as usize {
        return Err(StatusCode::BAD_TOO_MANY_OPERATIONS);
    }
    Ok(inputs.iter().map(|input| op(input)).collect())
}

// =============================================================================
// ViewServices
// =============================================================================

/// The view service set over a node store.
///
/// Cheap to share behind an `Arc`; the services themselves are read-only
/// over the store, and all mutable state (continuation points) lives in the
/// per-call [`Session`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use arbor_core::MemoryNodeStore;
/// use arbor_view::{ViewLimits, ViewServices};
///
/// let store = Arc::new(MemoryNodeStore::new());
/// let services = ViewServices::new(store, ViewLimits::default());
/// let session = services.new_session();
/// assert_eq!(
///     session.max_continuation_points(),
///     services.limits().max_continuation_points_per_session,
/// );
/// ```
pub struct ViewServices {
    pub(crate) store: Arc<dyn NodeStore>,
    pub(crate) limits: ViewLimits,
    pub(crate) admin_session: Mutex<Session>,
}

impl ViewServices {
    /// Creates the service set over a store with the given limits.
    pub fn new(store: Arc<dyn NodeStore>, limits: ViewLimits) -> Self {
        let admin_session = Mutex::new(Session::new(limits.max_continuation_points_per_session));
        Self {
            store,
            limits,
            admin_session,
        }
    }

    /// The underlying node store.
    pub fn store(&self) -> &Arc<dyn NodeStore> {
        &self.store
    }

    /// The configured limits.
    pub fn limits(&self) -> &ViewLimits {
        &self.limits
    }

    /// Creates a client session with the configured continuation-point cap.
    pub fn new_session(&self) -> Session {
        Session::new(self.limits.max_continuation_points_per_session)
    }
}

impl std::fmt::Debug for ViewServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewServices")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_empty_input() {
        let result: Result<Vec<u32>, StatusCode> =
            process_service_operations(&[] as &[u32], 0, |x| *x);
        assert_eq!(result.unwrap_err(), StatusCode::BAD_NOTHING_TO_DO);
    }

    #[test]
    fn test_dispatcher_cap() {
        let inputs = [1u32, 2, 3];
        let result = process_service_operations(&inputs, 2, |x| *x);
        assert_eq!(result.unwrap_err(), StatusCode::BAD_TOO_MANY_OPERATIONS);

        let result = process_service_operations(&inputs, 3, |x| x * 10);
        assert_eq!(result.unwrap(), vec![10, 20, 30]);

        // Zero cap means uncapped
        let result = process_service_operations(&inputs, 0, |x| *x);
        assert_eq!(result.unwrap().len(), 3);
    }

    #[test]
    fn test_view_description_null() {
        assert!(ViewDescription::default().is_null());
        let view = ViewDescription {
            view_id: NodeId::numeric(2, 4),
            ..ViewDescription::default()
        };
        assert!(!view.is_null());
    }
}
