// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Test Assertions
//!
//! Domain-specific assertion helpers for view-service integration tests.
//!
//! ## Design Principles
//!
//! - Clear, informative failure messages
//! - Assertions speak the protocol's vocabulary (status codes, targets)

use arbor_core::{NodeId, StatusCode};
use arbor_view::{BrowsePathResult, BrowseResult};

// =============================================================================
// BrowseResult Assertions
// =============================================================================

/// Assertion extensions for [`BrowseResult`].
pub trait BrowseResultAssertions {
    /// Asserts the result is `Good`.
    fn assert_good(&self);

    /// Asserts a specific status code.
    fn assert_status(&self, expected: StatusCode);

    /// Asserts the target node ids of the reference array, in order.
    fn assert_target_ids(&self, expected: &[NodeId]);

    /// Asserts no continuation point was produced.
    fn assert_no_continuation(&self);

    /// Asserts a continuation point was produced and returns it.
    fn assert_continuation(&self) -> Vec<u8>;
}

impl BrowseResultAssertions for BrowseResult {
    fn assert_good(&self) {
        assert!(
            self.status_code.is_good(),
            "Expected Good browse result, got {}",
            self.status_code
        );
    }

    fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status_code, expected,
            "Expected status {}, got {}",
            expected, self.status_code
        );
    }

    fn assert_target_ids(&self, expected: &[NodeId]) {
        let actual: Vec<NodeId> = self
            .references()
            .iter()
            .map(|r| r.node_id.node_id.clone())
            .collect();
        assert_eq!(
            actual, expected,
            "Browse returned unexpected targets (status {})",
            self.status_code
        );
    }

    fn assert_no_continuation(&self) {
        assert!(
            self.continuation_point.is_none(),
            "Expected no continuation point, got one of {} bytes",
            self.continuation_point.as_ref().map(Vec::len).unwrap_or(0)
        );
    }

    fn assert_continuation(&self) -> Vec<u8> {
        self.continuation_point
            .clone()
            .unwrap_or_else(|| panic!("Expected a continuation point (status {})", self.status_code))
    }
}

// =============================================================================
// BrowsePathResult Assertions
// =============================================================================

/// Assertion extensions for [`BrowsePathResult`].
pub trait BrowsePathResultAssertions {
    /// Asserts the result is `Good`.
    fn assert_good(&self);

    /// Asserts a specific status code.
    fn assert_status(&self, expected: StatusCode);

    /// Asserts the fully resolved local targets, in order.
    fn assert_resolved_targets(&self, expected: &[NodeId]);
}

impl BrowsePathResultAssertions for BrowsePathResult {
    fn assert_good(&self) {
        assert!(
            self.status_code.is_good(),
            "Expected Good path result, got {}",
            self.status_code
        );
    }

    fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status_code, expected,
            "Expected status {}, got {}",
            expected, self.status_code
        );
    }

    fn assert_resolved_targets(&self, expected: &[NodeId]) {
        let actual: Vec<NodeId> = self
            .targets
            .iter()
            .filter(|t| t.is_fully_resolved())
            .map(|t| t.target_id.node_id.clone())
            .collect();
        assert_eq!(
            actual, expected,
            "Path resolved to unexpected targets (status {})",
            self.status_code
        );
    }
}
