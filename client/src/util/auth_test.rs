use std::cell::{Cell, RefCell};

use futures::executor::block_on;
use futures::future::{pending, ready};
use metro_session::UserRecord;

use super::*;
use crate::net::api::ApiError;

#[derive(Clone, Copy)]
enum Reply {
    User,
    Unauthorized,
    Network,
    BadPayload,
    Hang,
}

struct FakeApi {
    me: Reply,
    logout: Reply,
    me_calls: Cell<u32>,
    logout_calls: Cell<u32>,
}

impl FakeApi {
    fn new(me: Reply, logout: Reply) -> Self {
        Self { me, logout, me_calls: Cell::new(0), logout_calls: Cell::new(0) }
    }
}

fn admin() -> UserRecord {
    UserRecord {
        id: "1".to_owned(),
        username: "admin".to_owned(),
        display_name: "Administrador".to_owned(),
        role: "admin".to_owned(),
        email: None,
    }
}

impl AuthApi for FakeApi {
    async fn current_user(&self) -> Result<UserRecord, ApiError> {
        self.me_calls.set(self.me_calls.get() + 1);
        match self.me {
            Reply::User => Ok(admin()),
            Reply::Unauthorized => Err(ApiError::Status(401)),
            Reply::Network => Err(ApiError::Transport("connection refused".to_owned())),
            Reply::BadPayload => crate::net::api::parse_me_response(r#"{"user":{}}"#),
            Reply::Hang => pending().await,
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.logout_calls.set(self.logout_calls.get() + 1);
        match self.logout {
            Reply::User => Ok(()),
            Reply::Unauthorized => Err(ApiError::Status(401)),
            Reply::Network | Reply::BadPayload => Err(ApiError::Transport("offline".to_owned())),
            Reply::Hang => pending().await,
        }
    }
}

#[derive(Default)]
struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_owned());
    }
}

// =============================================================================
// resolve_auth
// =============================================================================

#[test]
fn resolve_auth_success_is_authenticated() {
    let api = FakeApi::new(Reply::User, Reply::User);
    let state = block_on(resolve_auth(&api, pending::<()>()));
    assert_eq!(state, AuthState::Authenticated(admin()));
    assert_eq!(api.me_calls.get(), 1);
}

#[test]
fn resolve_auth_failures_are_unauthenticated_after_one_call() {
    for reply in [Reply::Unauthorized, Reply::Network, Reply::BadPayload] {
        let api = FakeApi::new(reply, Reply::User);
        let state = block_on(resolve_auth(&api, pending::<()>()));
        assert_eq!(state, AuthState::Unauthenticated);
        assert_eq!(api.me_calls.get(), 1);
    }
}

#[test]
fn resolve_auth_timeout_is_unauthenticated() {
    let api = FakeApi::new(Reply::Hang, Reply::User);
    let state = block_on(resolve_auth(&api, ready(())));
    assert_eq!(state, AuthState::Unauthenticated);
}

#[test]
fn resolve_auth_never_returns_loading() {
    for reply in [Reply::User, Reply::Unauthorized, Reply::Network, Reply::BadPayload, Reply::Hang] {
        let api = FakeApi::new(reply, Reply::User);
        assert!(!block_on(resolve_auth(&api, ready(()))).is_loading());
    }
}

// =============================================================================
// logout
// =============================================================================

fn run_logout(reply: Reply, timeout_fires: bool) -> (Vec<AuthState>, Vec<String>) {
    let api = FakeApi::new(Reply::User, reply);
    let navigator = RecordingNavigator::default();
    let states = RefCell::new(Vec::new());
    if timeout_fires {
        block_on(logout(&api, &navigator, ready(()), |s| states.borrow_mut().push(s)));
    } else {
        block_on(logout(&api, &navigator, pending::<()>(), |s| states.borrow_mut().push(s)));
    }
    assert_eq!(api.logout_calls.get(), 1);
    (states.into_inner(), navigator.visits.into_inner())
}

#[test]
fn logout_success_clears_state_and_navigates() {
    let (states, visits) = run_logout(Reply::User, false);
    assert_eq!(states, vec![AuthState::Unauthenticated]);
    assert_eq!(visits, vec![LOGIN_PATH.to_owned()]);
}

#[test]
fn logout_network_failure_still_logs_out_locally() {
    let (states, visits) = run_logout(Reply::Network, false);
    assert_eq!(states, vec![AuthState::Unauthenticated]);
    assert_eq!(visits, vec!["/login".to_owned()]);
}

#[test]
fn logout_server_error_still_logs_out_locally() {
    let (states, visits) = run_logout(Reply::Unauthorized, false);
    assert_eq!(states, vec![AuthState::Unauthenticated]);
    assert_eq!(visits, vec!["/login".to_owned()]);
}

#[test]
fn logout_hanging_call_still_logs_out_locally() {
    let (states, visits) = run_logout(Reply::Hang, true);
    assert_eq!(states, vec![AuthState::Unauthenticated]);
    assert_eq!(visits, vec!["/login".to_owned()]);
}

// =============================================================================
// redirect_edge
// =============================================================================

#[test]
fn redirect_edge_fires_on_first_true() {
    assert!(redirect_edge(None, true));
    assert!(redirect_edge(Some(false), true));
}

#[test]
fn redirect_edge_does_not_repeat_while_condition_holds() {
    assert!(!redirect_edge(Some(true), true));
}

#[test]
fn redirect_edge_ignores_false() {
    assert!(!redirect_edge(None, false));
    assert!(!redirect_edge(Some(true), false));
}

#[test]
fn redirect_edge_sequence_fires_once_per_transition() {
    let observed = [false, true, true, true, false, true, true];
    let mut previous = None;
    let mut fired = 0;
    for now in observed {
        if redirect_edge(previous, now) {
            fired += 1;
        }
        previous = Some(now);
    }
    assert_eq!(fired, 2);
}

// =============================================================================
// unauth_redirect_step
// =============================================================================

fn run_redirect_steps(steps: &[(&str, AuthState)]) -> Vec<(String, bool)> {
    let calls = RefCell::new(Vec::new());
    let navigate = |path: &str, options: NavigateOptions| calls.borrow_mut().push((path.to_owned(), options.replace));
    let mut previous = None;
    for (path, state) in steps {
        previous = Some(unauth_redirect_step(previous, path, state, &navigate));
    }
    calls.into_inner()
}

#[test]
fn unauth_redirect_waits_for_auth_check() {
    let calls = run_redirect_steps(&[("/control", AuthState::Loading), ("/control", AuthState::Loading)]);
    assert!(calls.is_empty());
}

#[test]
fn unauth_redirect_navigates_once_with_replace() {
    let calls = run_redirect_steps(&[
        ("/control", AuthState::Loading),
        ("/control", AuthState::Unauthenticated),
        ("/control", AuthState::Unauthenticated),
        ("/trains", AuthState::Unauthenticated),
    ]);
    assert_eq!(calls, vec![(LOGIN_PATH.to_owned(), true)]);
}

#[test]
fn unauth_redirect_rearms_after_leaving_condition() {
    let calls = run_redirect_steps(&[
        ("/control", AuthState::Unauthenticated),
        ("/login", AuthState::Unauthenticated),
        ("/dashboard", AuthState::Unauthenticated),
    ]);
    assert_eq!(calls.len(), 2);
}

#[test]
fn unauth_redirect_ignores_signed_in_and_bare_pages() {
    let calls = run_redirect_steps(&[
        ("/control", AuthState::Authenticated(admin())),
        ("/", AuthState::Unauthenticated),
        ("/login", AuthState::Unauthenticated),
    ]);
    assert!(calls.is_empty());
}
