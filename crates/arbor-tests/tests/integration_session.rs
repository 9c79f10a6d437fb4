// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Session & Continuation-Point Integration Tests
//!
//! Exercises the per-session continuation-point registry through the public
//! service surface:
//!
//! - `test_session_counter_*`: the `available == cap − live` invariant
//! - `test_session_isolation_*`: continuation points never cross sessions
//! - `test_session_release_*`: release semantics and idempotence

use arbor_core::StatusCode;
use arbor_view::{
    BrowseDescription, BrowseNextRequest, BrowseRequest, ViewLimits, ViewServices,
};

use arbor_tests::common::{AddressSpaceFixtures, BrowseResultAssertions};

fn truncating_services(slots: usize) -> ViewServices {
    let limits = ViewLimits::builder()
        .max_references_per_node(2)
        .max_continuation_points_per_session(slots)
        .build();
    ViewServices::new(AddressSpaceFixtures::paginated_plant(), limits)
}

fn browse_request() -> BrowseRequest {
    BrowseRequest {
        nodes_to_browse: vec![BrowseDescription::new(AddressSpaceFixtures::PARENT)],
        ..BrowseRequest::default()
    }
}

#[test]
fn test_session_counter_tracks_live_continuation_points() {
    let services = truncating_services(2);
    let mut session = services.new_session();
    assert_eq!(session.available_continuation_points(), 2);

    let response = services.service_browse(&mut session, &browse_request());
    let cp1 = response.results[0].assert_continuation();
    assert_eq!(session.available_continuation_points(), 1);
    assert_eq!(session.live_continuation_points(), 1);

    let response = services.service_browse(&mut session, &browse_request());
    let _cp2 = response.results[0].assert_continuation();
    assert_eq!(session.available_continuation_points(), 0);

    // Draining cp1 to completion returns its slot.
    for _ in 0..2 {
        services.service_browse_next(
            &mut session,
            &BrowseNextRequest {
                release_continuation_points: false,
                continuation_points: vec![cp1.clone()],
            },
        );
    }
    assert_eq!(session.available_continuation_points(), 1);
    assert_eq!(session.live_continuation_points(), 1);
    assert_eq!(
        session.max_continuation_points() - session.live_continuation_points(),
        session.available_continuation_points()
    );
}

#[test]
fn test_session_counter_exhaustion_returns_partial_result() {
    let services = truncating_services(1);
    let mut session = services.new_session();

    let response = services.service_browse(&mut session, &browse_request());
    response.results[0].assert_continuation();

    // No slot left: the second truncated browse still returns its partial
    // array but no cursor is stored.
    let response = services.service_browse(&mut session, &browse_request());
    let starved = &response.results[0];
    starved.assert_status(StatusCode::BAD_NO_CONTINUATION_POINTS);
    assert_eq!(starved.references().len(), 2);
    starved.assert_no_continuation();
    assert_eq!(session.live_continuation_points(), 1);
}

#[test]
fn test_session_unknown_identifier_does_not_mutate_state() {
    let services = truncating_services(4);
    let mut session = services.new_session();

    let response = services.service_browse(&mut session, &browse_request());
    let cp = response.results[0].assert_continuation();
    let available_before = session.available_continuation_points();

    let response = services.service_browse_next(
        &mut session,
        &BrowseNextRequest {
            release_continuation_points: false,
            continuation_points: vec![vec![0xFF; 16]],
        },
    );
    response.results[0].assert_status(StatusCode::BAD_CONTINUATION_POINT_INVALID);
    assert_eq!(session.available_continuation_points(), available_before);

    // The real continuation point still resumes.
    let response = services.service_browse_next(
        &mut session,
        &BrowseNextRequest {
            release_continuation_points: false,
            continuation_points: vec![cp],
        },
    );
    response.results[0].assert_good();
}

#[test]
fn test_session_isolation_between_sessions() {
    let services = truncating_services(4);
    let mut alice = services.new_session();
    let mut bob = services.new_session();

    let response = services.service_browse(&mut alice, &browse_request());
    let cp = response.results[0].assert_continuation();

    // Bob cannot resume Alice's pagination.
    let response = services.service_browse_next(
        &mut bob,
        &BrowseNextRequest {
            release_continuation_points: false,
            continuation_points: vec![cp.clone()],
        },
    );
    response.results[0].assert_status(StatusCode::BAD_CONTINUATION_POINT_INVALID);
    assert_eq!(bob.live_continuation_points(), 0);
    assert_eq!(alice.live_continuation_points(), 1);
}

#[test]
fn test_session_release_is_idempotent_in_effect() {
    let services = truncating_services(4);
    let mut session = services.new_session();

    let response = services.service_browse(&mut session, &browse_request());
    let cp = response.results[0].assert_continuation();

    let release = BrowseNextRequest {
        release_continuation_points: true,
        continuation_points: vec![cp],
    };
    let response = services.service_browse_next(&mut session, &release);
    response.results[0].assert_status(StatusCode::GOOD);
    assert_eq!(session.available_continuation_points(), 4);

    let response = services.service_browse_next(&mut session, &release);
    response.results[0].assert_status(StatusCode::BAD_CONTINUATION_POINT_INVALID);
    assert_eq!(session.available_continuation_points(), 4);
}

#[test]
fn test_session_teardown_releases_everything() {
    let services = truncating_services(2);
    let mut session = services.new_session();

    services.service_browse(&mut session, &browse_request());
    services.service_browse(&mut session, &browse_request());
    assert_eq!(session.available_continuation_points(), 0);

    session.release_all_continuation_points();
    assert_eq!(session.available_continuation_points(), 2);
    assert_eq!(session.live_continuation_points(), 0);
}

#[test]
fn test_session_mixed_release_and_resume_in_one_request() {
    let services = truncating_services(4);
    let mut session = services.new_session();

    let response = services.service_browse(&mut session, &browse_request());
    let cp = response.results[0].assert_continuation();

    // Release and a stale identifier in the same request: items are
    // independent.
    let response = services.service_browse_next(
        &mut session,
        &BrowseNextRequest {
            release_continuation_points: true,
            continuation_points: vec![cp.clone(), cp],
        },
    );
    response.results[0].assert_status(StatusCode::GOOD);
    response.results[1].assert_status(StatusCode::BAD_CONTINUATION_POINT_INVALID);
}
