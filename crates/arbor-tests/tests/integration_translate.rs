// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Path-Resolution Integration Tests
//!
//! End-to-end TranslateBrowsePathsToNodeIds scenarios:
//!
//! - `test_translate_equivalence_*`: path resolution vs filtered browse
//! - `test_translate_cross_server_*`: external-target forwarding
//! - `test_translate_error_*`: the error taxonomy

use arbor_core::{reference_type_ids, NodeId, QualifiedName, StatusCode};
use arbor_view::{
    BrowseDescription, BrowsePath, BrowsePathTarget, RelativePathElement,
    TranslateBrowsePathsRequest, ViewLimits, ViewServices,
};

use arbor_tests::common::{
    AddressSpaceFixtures, BrowsePathResultAssertions, BrowseResultAssertions,
};

fn plant_services() -> ViewServices {
    ViewServices::new(AddressSpaceFixtures::paginated_plant(), ViewLimits::default())
}

// =============================================================================
// Equivalence
// =============================================================================

#[test]
fn test_translate_equivalence_with_filtered_browse() {
    let services = plant_services();

    // Resolve [HasChild (with subtypes), targetName=Child3] from the parent.
    let path = BrowsePath::new(
        AddressSpaceFixtures::PARENT,
        vec![RelativePathElement::new(QualifiedName::new(1, "Child3"))
            .with_reference_type(reference_type_ids::HAS_CHILD)],
    );
    let resolved = services.translate_browse_path(&path);
    resolved.assert_good();

    // Browse the same node forward on HasChild and filter by browse name.
    let browse = services.browse(
        0,
        &BrowseDescription::new(AddressSpaceFixtures::PARENT)
            .with_reference_type(reference_type_ids::HAS_CHILD),
    );
    browse.assert_good();
    let browsed: Vec<NodeId> = browse
        .references()
        .iter()
        .filter(|r| r.browse_name == QualifiedName::new(1, "Child3"))
        .map(|r| r.node_id.node_id.clone())
        .collect();

    resolved.assert_resolved_targets(&browsed);
    assert_eq!(browsed, vec![AddressSpaceFixtures::child(3)]);
}

#[test]
fn test_translate_multi_hop_through_inverse_reference() {
    let services = plant_services();

    // Child1 -> (inverse Organizes) Plant -> (forward Organizes) Child5
    let path = BrowsePath::new(
        AddressSpaceFixtures::child(1),
        vec![
            RelativePathElement::new(QualifiedName::new(1, "Plant"))
                .with_reference_type(reference_type_ids::ORGANIZES)
                .with_inverse(true),
            RelativePathElement::new(QualifiedName::new(1, "Child5"))
                .with_reference_type(reference_type_ids::ORGANIZES),
        ],
    );
    let result = services.translate_browse_path(&path);
    result.assert_good();
    result.assert_resolved_targets(&[AddressSpaceFixtures::child(5)]);
}

// =============================================================================
// Cross-Server Forwarding
// =============================================================================

#[test]
fn test_translate_cross_server_hop() {
    let services = ViewServices::new(AddressSpaceFixtures::cross_server(), ViewLimits::default());

    let path = BrowsePath::new(
        AddressSpaceFixtures::GATEWAY,
        vec![RelativePathElement::new(QualifiedName::new(3, "Remote"))
            .with_reference_type(reference_type_ids::HAS_CHILD)],
    );
    let result = services.translate_browse_path(&path);
    result.assert_good();

    assert_eq!(result.targets.len(), 1);
    let target = &result.targets[0];
    assert_eq!(target.remaining_path_index, 0);
    assert_eq!(
        target.target_id.server_index,
        AddressSpaceFixtures::REMOTE_SERVER_INDEX
    );
    // No local targets at all.
    result.assert_resolved_targets(&[]);
}

#[test]
fn test_translate_remaining_path_correlates_with_server_index() {
    let services = ViewServices::new(AddressSpaceFixtures::cross_server(), ViewLimits::default());

    let path = BrowsePath::new(
        AddressSpaceFixtures::GATEWAY,
        vec![RelativePathElement::new(QualifiedName::new(3, "Remote"))],
    );
    let result = services.translate_browse_path(&path);
    for target in &result.targets {
        if target.remaining_path_index == BrowsePathTarget::REMAINING_PATH_NONE {
            assert_eq!(target.target_id.server_index, 0);
        } else {
            assert_ne!(target.target_id.server_index, 0);
        }
    }
}

// =============================================================================
// Error Taxonomy
// =============================================================================

#[test]
fn test_translate_error_no_match_on_final_hop() {
    let services = plant_services();
    let path = BrowsePath::new(
        AddressSpaceFixtures::PARENT,
        vec![RelativePathElement::new(QualifiedName::new(1, "Child9"))
            .with_reference_type(reference_type_ids::ORGANIZES)],
    );
    let result = services.translate_browse_path(&path);
    result.assert_status(StatusCode::BAD_NO_MATCH);
    assert!(result.targets.is_empty());
}

#[test]
fn test_translate_error_empty_path() {
    let services = plant_services();
    let path = BrowsePath::new(AddressSpaceFixtures::PARENT, Vec::new());
    services
        .translate_browse_path(&path)
        .assert_status(StatusCode::BAD_NOTHING_TO_DO);
}

#[test]
fn test_translate_error_null_browse_name_checked_first() {
    let services = plant_services();
    // Even with an unknown starting node, the null name wins.
    let path = BrowsePath::new(
        NodeId::numeric(9, 999),
        vec![RelativePathElement::new(QualifiedName::default())],
    );
    services
        .translate_browse_path(&path)
        .assert_status(StatusCode::BAD_BROWSE_NAME_INVALID);
}

#[test]
fn test_translate_error_unknown_starting_node() {
    let services = plant_services();
    let path = BrowsePath::new(
        NodeId::numeric(9, 999),
        vec![RelativePathElement::new(QualifiedName::new(1, "Child1"))],
    );
    services
        .translate_browse_path(&path)
        .assert_status(StatusCode::BAD_NODE_ID_UNKNOWN);
}

// =============================================================================
// Service Envelope
// =============================================================================

#[test]
fn test_translate_service_batches_independent_items() {
    let services = plant_services();
    let session = services.new_session();

    let good_path = BrowsePath::new(
        AddressSpaceFixtures::PARENT,
        vec![RelativePathElement::new(QualifiedName::new(1, "Child1"))],
    );
    let bad_path = BrowsePath::new(
        AddressSpaceFixtures::PARENT,
        vec![RelativePathElement::new(QualifiedName::new(1, "Nope"))],
    );

    let request = TranslateBrowsePathsRequest {
        browse_paths: vec![good_path, bad_path],
    };
    let response = services.service_translate_browse_paths(&session, &request);
    assert!(response.response_header.service_result.is_good());
    response.results[0].assert_good();
    response.results[0].assert_resolved_targets(&[AddressSpaceFixtures::child(1)]);
    response.results[1].assert_status(StatusCode::BAD_NO_MATCH);
}

#[test]
fn test_translate_service_empty_request() {
    let services = plant_services();
    let session = services.new_session();
    let response =
        services.service_translate_browse_paths(&session, &TranslateBrowsePathsRequest::default());
    assert_eq!(
        response.response_header.service_result,
        StatusCode::BAD_NOTHING_TO_DO
    );
    assert!(response.results.is_empty());
}
