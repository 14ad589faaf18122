use std::collections::HashSet;

use super::*;
use crate::net::types::{RecordId, User};

fn make_user() -> User {
    User {
        id: RecordId::Number(1),
        email: "u@example.com".to_owned(),
        username: Some("u".to_owned()),
        first_name: None,
        last_name: None,
    }
}

#[test]
fn initializing_shows_loading_placeholder() {
    assert_eq!(guard_outcome(&AuthState::default()), GuardOutcome::Loading);
}

#[test]
fn unauthenticated_redirects_to_login() {
    assert_eq!(guard_outcome(&AuthState::unauthenticated()), GuardOutcome::Redirect);
}

#[test]
fn authenticated_renders_content() {
    assert_eq!(guard_outcome(&AuthState::authenticated(make_user())), GuardOutcome::Render);
}

#[test]
fn each_state_maps_to_a_distinct_outcome() {
    let outcomes: HashSet<_> = [
        AuthState::default(),
        AuthState::unauthenticated(),
        AuthState::authenticated(make_user()),
    ]
    .iter()
    .map(guard_outcome)
    .collect();
    assert_eq!(outcomes.len(), 3);
}

#[test]
fn background_logout_flips_content_to_redirect() {
    let mut state = AuthState::authenticated(make_user());
    assert_eq!(guard_outcome(&state), GuardOutcome::Render);

    state = AuthState::unauthenticated();
    assert_eq!(guard_outcome(&state), GuardOutcome::Redirect);
}

#[test]
fn startup_success_never_passes_through_redirect() {
    let states = [
        AuthState::default(),
        AuthState::default().settle_startup(AuthState::authenticated(make_user())),
    ];
    let outcomes: Vec<_> = states.iter().map(guard_outcome).collect();
    assert_eq!(outcomes, vec![GuardOutcome::Loading, GuardOutcome::Render]);
}
