// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! View service operational limits.
//!
//! All per-request caps follow the Part 4 convention that zero means "no
//! limit". The continuation-point cap is per session and always enforced.
//!
//! # Examples
//!
//! ```
//! use arbor_view::ViewLimits;
//!
//! let limits = ViewLimits::builder()
//!     .max_references_per_node(1000)
//!     .max_nodes_per_browse(64)
//!     .build();
//! assert_eq!(limits.max_nodes_per_browse, 64);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Constants
// =============================================================================

/// Default number of continuation-point slots per session.
pub const DEFAULT_MAX_CONTINUATION_POINTS_PER_SESSION: usize = 16;

// =============================================================================
// ViewLimits
// =============================================================================

/// Server-configured limits for the view service set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewLimits {
    /// Maximum references returned per browsed node; zero means uncapped.
    #[serde(default)]
    pub max_references_per_node: u32,

    /// Maximum operations per Browse request; zero means uncapped.
    #[serde(default)]
    pub max_nodes_per_browse: u32,

    /// Maximum operations per TranslateBrowsePathsToNodeIds request; zero
    /// means uncapped.
    #[serde(default)]
    pub max_nodes_per_translate_browse_paths_to_node_ids: u32,

    /// Maximum operations per RegisterNodes/UnregisterNodes request; zero
    /// means uncapped.
    #[serde(default)]
    pub max_nodes_per_register_nodes: u32,

    /// Continuation-point slots available to each session.
    #[serde(default = "default_continuation_points")]
    pub max_continuation_points_per_session: usize,
}

fn default_continuation_points() -> usize {
    DEFAULT_MAX_CONTINUATION_POINTS_PER_SESSION
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            max_references_per_node: 0,
            max_nodes_per_browse: 0,
            max_nodes_per_translate_browse_paths_to_node_ids: 0,
            max_nodes_per_register_nodes: 0,
            max_continuation_points_per_session: DEFAULT_MAX_CONTINUATION_POINTS_PER_SESSION,
        }
    }
}

impl ViewLimits {
    /// Creates a builder with default settings.
    pub fn builder() -> ViewLimitsBuilder {
        ViewLimitsBuilder::default()
    }
}

// =============================================================================
// ViewLimitsBuilder
// =============================================================================

/// Builder for [`ViewLimits`].
#[derive(Debug, Clone, Default)]
pub struct ViewLimitsBuilder {
    limits: ViewLimits,
}

impl ViewLimitsBuilder {
    /// Sets the per-node reference cap.
    pub fn max_references_per_node(mut self, max: u32) -> Self {
        self.limits.max_references_per_node = max;
        self
    }

    /// Sets the per-request Browse cap.
    pub fn max_nodes_per_browse(mut self, max: u32) -> Self {
        self.limits.max_nodes_per_browse = max;
        self
    }

    /// Sets the per-request translate cap.
    pub fn max_nodes_per_translate_browse_paths_to_node_ids(mut self, max: u32) -> Self {
        self.limits.max_nodes_per_translate_browse_paths_to_node_ids = max;
        self
    }

    /// Sets the per-request RegisterNodes/UnregisterNodes cap.
    pub fn max_nodes_per_register_nodes(mut self, max: u32) -> Self {
        self.limits.max_nodes_per_register_nodes = max;
        self
    }

    /// Sets the per-session continuation-point slot count.
    pub fn max_continuation_points_per_session(mut self, max: usize) -> Self {
        self.limits.max_continuation_points_per_session = max;
        self
    }

    /// Builds the limits.
    pub fn build(self) -> ViewLimits {
        self.limits
    }
}

// =============================================================================
// Tests
// =============================================================================
