// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Core OPC UA address-space types.
//!
//! This module provides the identifier and naming types every Arbor component
//! builds on:
//!
//! - **NodeId**: all four OPC UA node identifier kinds with parsing and display
//! - **ExpandedNodeId**: a `NodeId` qualified by a server index for
//!   cross-server references
//! - **QualifiedName / LocalizedText**: browse and display names
//! - **NodeClass**: the eight node classes plus the wire `Unspecified` value
//! - **BrowseDirection**: reference traversal direction
//!
//! # Examples
//!
//! ```
//! use arbor_core::types::NodeId;
//!
//! // Numeric node ID (most common)
//! let numeric = NodeId::numeric(2, 1001);
//!
//! // Parse from the standard string form
//! let parsed: NodeId = "ns=2;s=Machine.Temperature".parse().unwrap();
//! assert!(parsed.is_string());
//! ```

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AddressSpaceError;

// =============================================================================
// NodeId
// =============================================================================

/// OPC UA node identifier.
///
/// A `NodeId` uniquely identifies a node within a server. It consists of a
/// namespace index and an identifier which can be numeric, string, GUID, or
/// opaque (byte string).
///
/// # Examples
///
/// ```
/// use arbor_core::types::NodeId;
///
/// let numeric = NodeId::numeric(2, 1001);
/// let string = NodeId::string(2, "Machine.Temperature");
///
/// let parsed: NodeId = "ns=2;i=1001".parse().unwrap();
/// assert_eq!(parsed, numeric);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    /// Namespace index (0 = OPC UA standard namespace).
    pub namespace_index: u16,

    /// The node identifier.
    pub identifier: NodeIdentifier,
}

impl NodeId {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a numeric node ID.
    #[inline]
    pub const fn numeric(namespace_index: u16, value: u32) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Numeric(value),
        }
    }

    /// Creates a string node ID.
    #[inline]
    pub fn string(namespace_index: u16, value: impl Into<String>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::String(value.into()),
        }
    }

    /// Creates a GUID node ID.
    #[inline]
    pub const fn guid(namespace_index: u16, value: Uuid) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Guid(value),
        }
    }

    /// Creates an opaque (byte string) node ID.
    #[inline]
    pub const fn opaque(namespace_index: u16, value: Vec<u8>) -> Self {
        Self {
            namespace_index,
            identifier: NodeIdentifier::Opaque(value),
        }
    }

    /// Creates an opaque node ID from a base64-encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid base64.
    pub fn opaque_from_base64(
        namespace_index: u16,
        value: &str,
    ) -> Result<Self, AddressSpaceError> {
        let bytes = BASE64.decode(value).map_err(|e| {
            AddressSpaceError::invalid_node_id(value, format!("invalid base64: {}", e))
        })?;
        Ok(Self::opaque(namespace_index, bytes))
    }

    /// Returns the null node ID (ns=0, i=0).
    #[inline]
    pub const fn null() -> Self {
        Self::numeric(0, 0)
    }

    // =========================================================================
    // Standard Node IDs
    // =========================================================================

    /// Root folder node (ns=0, i=84).
    pub const ROOT_FOLDER: NodeId = NodeId::numeric(0, 84);

    /// Objects folder node (ns=0, i=85).
    pub const OBJECTS_FOLDER: NodeId = NodeId::numeric(0, 85);

    /// Types folder node (ns=0, i=86).
    pub const TYPES_FOLDER: NodeId = NodeId::numeric(0, 86);

    /// Views folder node (ns=0, i=87).
    pub const VIEWS_FOLDER: NodeId = NodeId::numeric(0, 87);

    /// Server object node (ns=0, i=2253).
    pub const SERVER: NodeId = NodeId::numeric(0, 2253);

    // =========================================================================
    // Properties
    // =========================================================================

    /// Returns `true` if this is a numeric identifier.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::Numeric(_))
    }

    /// Returns `true` if this is a string identifier.
    #[inline]
    pub const fn is_string(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::String(_))
    }

    /// Returns `true` if this is a GUID identifier.
    #[inline]
    pub const fn is_guid(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::Guid(_))
    }

    /// Returns `true` if this is an opaque identifier.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        matches!(self.identifier, NodeIdentifier::Opaque(_))
    }

    /// Returns `true` if this is the null node ID (ns=0, i=0).
    ///
    /// The null node ID doubles as the "no filter" marker in browse
    /// descriptions and relative-path elements.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && matches!(self.identifier, NodeIdentifier::Numeric(0))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index != 0 {
            write!(f, "ns={};", self.namespace_index)?;
        }
        match &self.identifier {
            NodeIdentifier::Numeric(v) => write!(f, "i={}", v),
            NodeIdentifier::String(v) => write!(f, "s={}", v),
            NodeIdentifier::Guid(v) => write!(f, "g={}", v),
            NodeIdentifier::Opaque(v) => write!(f, "b={}", BASE64.encode(v)),
        }
    }
}

impl FromStr for NodeId {
    type Err = AddressSpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut namespace_index = 0u16;
        let mut rest = s;

        if let Some(stripped) = rest.strip_prefix("ns=") {
            let (ns, tail) = stripped.split_once(';').ok_or_else(|| {
                AddressSpaceError::invalid_node_id(s, "missing `;` after namespace")
            })?;
            namespace_index = ns.parse::<u16>().map_err(|e| {
                AddressSpaceError::invalid_node_id(s, format!("invalid namespace index: {}", e))
            })?;
            rest = tail;
        }

        let (kind, value) = rest
            .split_once('=')
            .ok_or_else(|| AddressSpaceError::invalid_node_id(s, "missing identifier kind"))?;

        match kind {
            "i" => {
                let v = value.parse::<u32>().map_err(|e| {
                    AddressSpaceError::invalid_node_id(s, format!("invalid numeric value: {}", e))
                })?;
                Ok(Self::numeric(namespace_index, v))
            }
            "s" => Ok(Self::string(namespace_index, value)),
            "g" => {
                let uuid = Uuid::parse_str(value).map_err(|e| {
                    AddressSpaceError::invalid_node_id(s, format!("invalid GUID: {}", e))
                })?;
                Ok(Self::guid(namespace_index, uuid))
            }
            "b" => Self::opaque_from_base64(namespace_index, value),
            other => Err(AddressSpaceError::invalid_node_id(
                s,
                format!("unknown identifier kind `{}`", other),
            )),
        }
    }
}

// =============================================================================
// NodeIdentifier
// =============================================================================

/// The identifier part of a [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeIdentifier {
    /// Numeric identifier.
    Numeric(u32),

    /// String identifier.
    String(String),

    /// GUID identifier.
    Guid(Uuid),

    /// Opaque (byte string) identifier.
    Opaque(Vec<u8>),
}

// =============================================================================
// ExpandedNodeId
// =============================================================================

/// A [`NodeId`] that may point to a node on another server.
///
/// A `server_index` of zero means the node is local. Non-zero indices refer
/// to entries in the server's ServerArray; the View Services surface such
/// targets to the client unchanged instead of resolving them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ExpandedNodeId {
    /// The node identifier, interpreted on the server named by `server_index`.
    pub node_id: NodeId,

    /// Explicit namespace URI; when set it supersedes the namespace index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_uri: Option<String>,

    /// Index into the ServerArray; zero means the local server.
    pub server_index: u32,
}

impl ExpandedNodeId {
    /// Creates an expanded node ID for a local node.
    #[inline]
    pub const fn local(node_id: NodeId) -> Self {
        Self {
            node_id,
            namespace_uri: None,
            server_index: 0,
        }
    }

    /// Creates an expanded node ID pointing at another server.
    #[inline]
    pub const fn remote(node_id: NodeId, server_index: u32) -> Self {
        Self {
            node_id,
            namespace_uri: None,
            server_index,
        }
    }

    /// Returns `true` if the target lives on the local server.
    #[inline]
    pub const fn is_local(&self) -> bool {
        self.server_index == 0
    }
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self::local(node_id)
    }
}

impl fmt::Display for ExpandedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.server_index != 0 {
            write!(f, "svr={};", self.server_index)?;
        }
        write!(f, "{}", self.node_id)
    }
}

// =============================================================================
// QualifiedName
// =============================================================================

/// OPC UA qualified name (namespace index + name).
///
/// Browse names are qualified names; path resolution compares both the
/// namespace index and the name string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Namespace index.
    pub namespace_index: u16,

    /// The name string.
    pub name: String,
}

impl QualifiedName {
    /// Creates a new qualified name.
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }

    /// Creates a qualified name in namespace 0.
    pub fn standard(name: impl Into<String>) -> Self {
        Self::new(0, name)
    }

    /// Returns `true` if this is the null qualified name.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.namespace_index == 0 && self.name.is_empty()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index == 0 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}:{}", self.namespace_index, self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        if let Some((ns, name)) = s.split_once(':') {
            if let Ok(ns_idx) = ns.parse::<u16>() {
                return Self::new(ns_idx, name);
            }
        }
        Self::standard(s)
    }
}

// =============================================================================
// LocalizedText
// =============================================================================

/// OPC UA localized text (locale + text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Locale identifier, e.g. `en-US`. Empty means unspecified.
    pub locale: String,

    /// The text in the given locale.
    pub text: String,
}

impl LocalizedText {
    /// Creates a new localized text.
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }

    /// Creates an English (`en`) localized text.
    pub fn english(text: impl Into<String>) -> Self {
        Self::new("en", text)
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

// =============================================================================
// NodeClass
// =============================================================================

/// OPC UA node class.
///
/// The discriminant values are the wire bit-mask values, so a node-class
/// filter mask is built by or-ing [`NodeClass::mask_bit`] results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeClass {
    /// No node class specified (wire value 0).
    #[default]
    Unspecified,
    /// Object node.
    Object,
    /// Variable node.
    Variable,
    /// Method node.
    Method,
    /// Object type node.
    ObjectType,
    /// Variable type node.
    VariableType,
    /// Reference type node.
    ReferenceType,
    /// Data type node.
    DataType,
    /// View node.
    View,
}

impl NodeClass {
    /// Returns the OPC UA bit-mask value.
    pub const fn mask_bit(&self) -> u32 {
        match self {
            Self::Unspecified => 0,
            Self::Object => 1,
            Self::Variable => 2,
            Self::Method => 4,
            Self::ObjectType => 8,
            Self::VariableType => 16,
            Self::ReferenceType => 32,
            Self::DataType => 64,
            Self::View => 128,
        }
    }

    /// Creates from the OPC UA wire value.
    pub const fn from_mask_bit(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Unspecified),
            1 => Some(Self::Object),
            2 => Some(Self::Variable),
            4 => Some(Self::Method),
            8 => Some(Self::ObjectType),
            16 => Some(Self::VariableType),
            32 => Some(Self::ReferenceType),
            64 => Some(Self::DataType),
            128 => Some(Self::View),
            _ => None,
        }
    }

    /// Returns `true` if this class is selected by the given node-class mask.
    ///
    /// A mask of zero selects every class.
    #[inline]
    pub const fn matches_mask(&self, mask: u32) -> bool {
        mask == 0 || (self.mask_bit() & mask) != 0
    }
}

// =============================================================================
// BrowseDirection
// =============================================================================

/// OPC UA browse direction.
///
/// `Invalid` is the Part 4 wire value 3; requests decoded with an unknown
/// direction carry it so the browse pre-filters can reject them with
/// `BadBrowseDirectionInvalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowseDirection {
    /// Follow forward references.
    #[default]
    Forward,

    /// Follow inverse references.
    Inverse,

    /// Follow references in both directions.
    Both,

    /// No valid direction; rejected by the services.
    Invalid,
}

impl BrowseDirection {
    /// Returns the OPC UA wire value.
    pub const fn value(&self) -> u32 {
        match self {
            Self::Forward => 0,
            Self::Inverse => 1,
            Self::Both => 2,
            Self::Invalid => 3,
        }
    }

    /// Creates from the OPC UA wire value; unknown values map to `Invalid`.
    pub const fn from_value(value: u32) -> Self {
        match value {
            0 => Self::Forward,
            1 => Self::Inverse,
            2 => Self::Both,
            _ => Self::Invalid,
        }
    }

    /// Returns `true` for the three directions a browse may request.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

// =============================================================================
// Well-Known Reference Types
// =============================================================================

/// Standard OPC UA reference-type node IDs (Part 5).
pub mod reference_type_ids {
    use super::NodeId;

    /// References (abstract base type) - i=31.
    pub const REFERENCES: NodeId = NodeId::numeric(0, 31);

    /// NonHierarchicalReferences (abstract) - i=32.
    pub const NON_HIERARCHICAL_REFERENCES: NodeId = NodeId::numeric(0, 32);

    /// HierarchicalReferences (abstract) - i=33.
    pub const HIERARCHICAL_REFERENCES: NodeId = NodeId::numeric(0, 33);

    /// HasChild (abstract) - i=34.
    pub const HAS_CHILD: NodeId = NodeId::numeric(0, 34);

    /// Organizes - i=35.
    pub const ORGANIZES: NodeId = NodeId::numeric(0, 35);

    /// HasTypeDefinition - i=40.
    pub const HAS_TYPE_DEFINITION: NodeId = NodeId::numeric(0, 40);

    /// Aggregates (abstract) - i=44.
    pub const AGGREGATES: NodeId = NodeId::numeric(0, 44);

    /// HasSubtype - i=45.
    pub const HAS_SUBTYPE: NodeId = NodeId::numeric(0, 45);

    /// HasProperty - i=46.
    pub const HAS_PROPERTY: NodeId = NodeId::numeric(0, 46);

    /// HasComponent - i=47.
    pub const HAS_COMPONENT: NodeId = NodeId::numeric(0, 47);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_parse_numeric() {
        let id: NodeId = "ns=2;i=1001".parse().unwrap();
        assert_eq!(id, NodeId::numeric(2, 1001));

        let id: NodeId = "i=85".parse().unwrap();
        assert_eq!(id, NodeId::OBJECTS_FOLDER);
    }

    #[test]
    fn test_node_id_parse_string() {
        let id: NodeId = "ns=3;s=Machine.Temperature".parse().unwrap();
        assert_eq!(id, NodeId::string(3, "Machine.Temperature"));
    }

    #[test]
    fn test_node_id_parse_rejects_garbage() {
        assert!("".parse::<NodeId>().is_err());
        assert!("ns=2".parse::<NodeId>().is_err());
        assert!("ns=x;i=1".parse::<NodeId>().is_err());
        assert!("q=12".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_node_id_display_round_trip() {
        for id in [
            NodeId::numeric(0, 84),
            NodeId::numeric(7, 12),
            NodeId::string(2, "a/b"),
            NodeId::opaque(4, vec![1, 2, 3]),
        ] {
            let parsed: NodeId = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_node_id_null() {
        assert!(NodeId::null().is_null());
        assert!(!NodeId::OBJECTS_FOLDER.is_null());
        // A string id in ns=0 is not null even when empty-adjacent
        assert!(!NodeId::string(0, "").is_null());
    }

    #[test]
    fn test_expanded_node_id_locality() {
        let local = ExpandedNodeId::local(NodeId::numeric(1, 5));
        assert!(local.is_local());

        let remote = ExpandedNodeId::remote(NodeId::numeric(1, 5), 7);
        assert!(!remote.is_local());
        assert_eq!(remote.to_string(), "svr=7;ns=1;i=5");
    }

    #[test]
    fn test_qualified_name_null() {
        assert!(QualifiedName::default().is_null());
        assert!(!QualifiedName::standard("x").is_null());
        assert!(!QualifiedName::new(2, "").is_null());
    }

    #[test]
    fn test_qualified_name_parsing() {
        let qn = QualifiedName::from("2:Temperature");
        assert_eq!(qn.namespace_index, 2);
        assert_eq!(qn.name, "Temperature");

        let qn = QualifiedName::from("Temperature");
        assert_eq!(qn.namespace_index, 0);
    }

    #[test]
    fn test_node_class_mask() {
        assert!(NodeClass::Variable.matches_mask(0));
        assert!(NodeClass::Variable.matches_mask(NodeClass::Variable.mask_bit()));
        assert!(!NodeClass::Variable.matches_mask(NodeClass::Object.mask_bit()));
        assert_eq!(NodeClass::from_mask_bit(32), Some(NodeClass::ReferenceType));
        assert_eq!(NodeClass::from_mask_bit(3), None);
    }

    #[test]
    fn test_browse_direction_values() {
        assert_eq!(BrowseDirection::from_value(2), BrowseDirection::Both);
        assert_eq!(BrowseDirection::from_value(17), BrowseDirection::Invalid);
        assert!(BrowseDirection::Both.is_valid());
        assert!(!BrowseDirection::Invalid.is_valid());
    }
}
