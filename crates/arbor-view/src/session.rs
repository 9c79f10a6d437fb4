// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Per-session state and the continuation-point registry.
//!
//! A truncated browse parks its cursor in a [`ContinuationPointEntry`] owned
//! by the session. Entries are keyed by a random 16-byte identifier, and the
//! session keeps a slot counter so that
//! `available == configured cap − live entries` at all times. Operations on
//! one session's continuation points must be serialized by the caller; the
//! registry itself never blocks.

use std::collections::HashMap;

use tracing::trace;
use uuid::Uuid;

use arbor_core::StatusCode;

use crate::browse::{BrowseCursor, BrowseDescription};

// =============================================================================
// ContinuationPointEntry
// =============================================================================

/// A paused browse: the deep-copied description, the requested per-call
/// reference budget, and the `(kind, target)` cursor naming the next
/// unexamined reference.
#[derive(Debug, Clone)]
pub(crate) struct ContinuationPointEntry {
    /// Opaque identifier echoed to the client.
    pub identifier: Vec<u8>,

    /// The browse description the pagination continues.
    pub browse_description: BrowseDescription,

    /// The `requestedMaxReferencesPerNode` of the originating call.
    pub max_references: u32,

    /// Next unexamined `(reference kind, target)` coordinates.
    pub cursor: BrowseCursor,
}

// =============================================================================
// Session
// =============================================================================

/// Client session state consumed by the view services.
///
/// Session lifecycle (authentication, timeouts) is managed elsewhere; the
/// view services only need the continuation-point registry.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    continuation_points: HashMap<Vec<u8>, ContinuationPointEntry>,
    available_continuation_points: usize,
    max_continuation_points: usize,
}

impl Session {
    /// Creates a session with the given continuation-point slot count.
    pub fn new(max_continuation_points: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            continuation_points: HashMap::new(),
            available_continuation_points: max_continuation_points,
            max_continuation_points,
        }
    }

    /// The session identifier (used in log output).
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of continuation-point slots still free.
    #[inline]
    pub fn available_continuation_points(&self) -> usize {
        self.available_continuation_points
    }

    /// Number of live continuation points.
    #[inline]
    pub fn live_continuation_points(&self) -> usize {
        self.continuation_points.len()
    }

    /// The configured slot count.
    #[inline]
    pub fn max_continuation_points(&self) -> usize {
        self.max_continuation_points
    }

    /// Drops every continuation point and resets the slot counter. Called
    /// when the session is torn down.
    pub fn release_all_continuation_points(&mut self) {
        self.continuation_points.clear();
        self.available_continuation_points = self.max_continuation_points;
    }

    // =========================================================================
    // Registry operations (crate-internal)
    // =========================================================================

    /// Stores a new continuation point and returns its identifier.
    ///
    /// Fails with `BadNoContinuationPoints` when every slot is taken; the
    /// caller returns the partial result as-is in that case.
    pub(crate) fn create_continuation_point(
        &mut self,
        browse_description: BrowseDescription,
        max_references: u32,
        cursor: BrowseCursor,
    ) -> Result<Vec<u8>, StatusCode> {
        if self.available_continuation_points == 0 {
            return Err(StatusCode::BAD_NO_CONTINUATION_POINTS);
        }
        let identifier = Uuid::new_v4().as_bytes().to_vec();
        let entry = ContinuationPointEntry {
            identifier: identifier.clone(),
            browse_description,
            max_references,
            cursor,
        };
        self.continuation_points.insert(identifier.clone(), entry);
        self.available_continuation_points -= 1;
        trace!(
            session = %self.id,
            live = self.continuation_points.len(),
            "stored continuation point"
        );
        Ok(identifier)
    }

    /// Removes and returns the entry with the given identifier, leaving the
    /// slot counter untouched. The caller either puts the entry back or
    /// discards it.
    pub(crate) fn take_continuation_point(
        &mut self,
        identifier: &[u8],
    ) -> Option<ContinuationPointEntry> {
        self.continuation_points.remove(identifier)
    }

    /// Reinserts an entry previously taken with
    /// [`Session::take_continuation_point`].
    pub(crate) fn put_back_continuation_point(&mut self, entry: ContinuationPointEntry) {
        self.continuation_points
            .insert(entry.identifier.clone(), entry);
    }

    /// Consumes a taken entry and frees its slot.
    pub(crate) fn discard_continuation_point(&mut self, entry: ContinuationPointEntry) {
        trace!(session = %self.id, "released continuation point");
        drop(entry);
        self.available_continuation_points += 1;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::NodeId;

    fn descr() -> BrowseDescription {
        BrowseDescription::new(NodeId::numeric(1, 1))
    }

    #[test]
    fn test_counter_tracks_live_entries() {
        let mut session = Session::new(2);
        assert_eq!(session.available_continuation_points(), 2);

        let a = session
            .create_continuation_point(descr(), 0, BrowseCursor::default())
            .unwrap();
        let _b = session
            .create_continuation_point(descr(), 0, BrowseCursor::default())
            .unwrap();
        assert_eq!(session.available_continuation_points(), 0);
        assert_eq!(session.live_continuation_points(), 2);

        assert_eq!(
            session.create_continuation_point(descr(), 0, BrowseCursor::default()),
            Err(StatusCode::BAD_NO_CONTINUATION_POINTS)
        );

        let entry = session.take_continuation_point(&a).unwrap();
        session.discard_continuation_point(entry);
        assert_eq!(session.available_continuation_points(), 1);
        assert_eq!(session.live_continuation_points(), 1);
    }

    #[test]
    fn test_identifiers_are_unique_and_opaque() {
        let mut session = Session::new(8);
        let a = session
            .create_continuation_point(descr(), 0, BrowseCursor::default())
            .unwrap();
        let b = session
            .create_continuation_point(descr(), 0, BrowseCursor::default())
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_take_unknown_identifier_is_none() {
        let mut session = Session::new(1);
        assert!(session.take_continuation_point(b"nope").is_none());
        // No state was disturbed.
        assert_eq!(session.available_continuation_points(), 1);
    }

    #[test]
    fn test_put_back_preserves_identifier() {
        let mut session = Session::new(1);
        let id = session
            .create_continuation_point(descr(), 5, BrowseCursor::default())
            .unwrap();
        let mut entry = session.take_continuation_point(&id).unwrap();
        entry.cursor.target_index = 3;
        session.put_back_continuation_point(entry);

        let entry = session.take_continuation_point(&id).unwrap();
        assert_eq!(entry.cursor.target_index, 3);
        assert_eq!(entry.max_references, 5);
    }

    #[test]
    fn test_release_all_resets_counter() {
        let mut session = Session::new(3);
        for _ in 0..3 {
            session
                .create_continuation_point(descr(), 0, BrowseCursor::default())
                .unwrap();
        }
        session.release_all_continuation_points();
        assert_eq!(session.available_continuation_points(), 3);
        assert_eq!(session.live_continuation_points(), 0);
    }
}
