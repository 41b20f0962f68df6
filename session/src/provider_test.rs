use std::collections::BTreeSet;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use super::*;
use crate::claims::TokenClaims;
use crate::error::SessionError;

// =============================================================
// Fakes
// =============================================================

struct FakeStore {
    account: Option<TokenClaims>,
    init_result: Result<bool, SessionError>,
    init_gate: RefCell<Option<oneshot::Receiver<()>>>,
    init_calls: Cell<u32>,
    authenticated: Cell<bool>,
    token: RefCell<Option<String>>,
    refresh_result: RefCell<Result<bool, SessionError>>,
    refresh_calls: Cell<u32>,
    last_min_validity: Cell<Option<Duration>>,
    login_calls: Cell<u32>,
    logout_calls: Cell<u32>,
    events: EventBus<AuthEvent>,
}

impl FakeStore {
    fn new(account: Option<TokenClaims>, init_result: Result<bool, SessionError>) -> Self {
        Self {
            account,
            init_result,
            init_gate: RefCell::new(None),
            init_calls: Cell::new(0),
            authenticated: Cell::new(false),
            token: RefCell::new(None),
            refresh_result: RefCell::new(Ok(false)),
            refresh_calls: Cell::new(0),
            last_min_validity: Cell::new(None),
            login_calls: Cell::new(0),
            logout_calls: Cell::new(0),
            events: EventBus::new(),
        }
    }

    fn signed_in(realm_roles: &[&str]) -> Self {
        let claims = TokenClaims {
            username: Some("ana@cinema.test".to_owned()),
            realm_roles: realm_roles.iter().map(|r| (*r).to_owned()).collect::<BTreeSet<_>>(),
            ..TokenClaims::default()
        };
        Self::new(Some(claims), Ok(true))
    }

    fn anonymous() -> Self {
        Self::new(None, Ok(false))
    }

    fn unreachable() -> Self {
        Self::new(None, Err(SessionError::Initialize("connection refused".to_owned())))
    }

    fn sign_in(&self) {
        self.authenticated.set(self.account.is_some());
        *self.token.borrow_mut() = self.account.as_ref().map(|_| "token-1".to_owned());
    }

    fn sign_out(&self) {
        self.authenticated.set(false);
        *self.token.borrow_mut() = None;
    }
}

#[async_trait(?Send)]
impl TokenStore for FakeStore {
    async fn initialize(&self) -> Result<bool, SessionError> {
        self.init_calls.set(self.init_calls.get() + 1);
        let gate = self.init_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if matches!(self.init_result, Ok(true)) {
            self.sign_in();
        }
        self.init_result.clone()
    }

    fn login(&self) {
        self.login_calls.set(self.login_calls.get() + 1);
    }

    fn logout(&self) {
        self.logout_calls.set(self.logout_calls.get() + 1);
    }

    async fn refresh_token(&self, min_validity: Duration) -> Result<bool, SessionError> {
        let n = self.refresh_calls.get() + 1;
        self.refresh_calls.set(n);
        self.last_min_validity.set(Some(min_validity));
        let result = self.refresh_result.borrow().clone();
        if matches!(result, Ok(true)) {
            *self.token.borrow_mut() = Some(format!("token-{}", n + 1));
        }
        result
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.get()
    }

    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn claims(&self) -> Option<TokenClaims> {
        if self.authenticated.get() { self.account.clone() } else { None }
    }

    fn events(&self) -> &EventBus<AuthEvent> {
        &self.events
    }
}

struct FakeBar {
    current: RefCell<String>,
    replaced: RefCell<Vec<String>>,
}

impl AddressBar for FakeBar {
    fn current(&self) -> Option<String> {
        Some(self.current.borrow().clone())
    }

    fn replace(&self, address: &str) {
        self.replaced.borrow_mut().push(address.to_owned());
        *self.current.borrow_mut() = address.to_owned();
    }
}

struct ManualRuntime {
    spawner: LocalSpawner,
    timers: RefCell<Vec<oneshot::Sender<()>>>,
}

impl Runtime for ManualRuntime {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).expect("spawn");
    }

    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        let (tx, rx) = oneshot::channel();
        self.timers.borrow_mut().push(tx);
        Box::pin(async move {
            if rx.await.is_err() {
                futures::future::pending::<()>().await;
            }
        })
    }
}

struct Harness {
    pool: LocalPool,
    runtime: Rc<ManualRuntime>,
    store: Rc<FakeStore>,
    bar: Rc<FakeBar>,
    provider: SessionProvider,
    views: Rc<RefCell<Vec<SessionView>>>,
    _views_sub: Subscription,
}

impl Harness {
    fn new(store: FakeStore) -> Self {
        Self::at("/", store)
    }

    fn at(address: &str, store: FakeStore) -> Self {
        let pool = LocalPool::new();
        let runtime = Rc::new(ManualRuntime { spawner: pool.spawner(), timers: RefCell::new(Vec::new()) });
        let store = Rc::new(store);
        let bar = Rc::new(FakeBar { current: RefCell::new(address.to_owned()), replaced: RefCell::new(Vec::new()) });
        let provider = SessionProvider::new(
            Rc::clone(&store) as Rc<dyn TokenStore>,
            Rc::clone(&runtime) as Rc<dyn Runtime>,
            Rc::clone(&bar) as Rc<dyn AddressBar>,
            SessionConfig::default(),
        );
        let views = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&views);
        let views_sub = provider.subscribe(move |v: &SessionView| sink.borrow_mut().push(v.clone()));
        Self { pool, runtime, store, bar, provider, views, _views_sub: views_sub }
    }

    fn spawn_boot(&self) {
        let provider = self.provider.clone();
        self.runtime
            .spawner
            .spawn_local(async move {
                provider.boot().await;
            })
            .expect("spawn");
    }

    fn boot(&mut self) {
        self.spawn_boot();
        self.pool.run_until_stalled();
    }

    /// Release every pending timer once and let the tasks settle.
    fn tick(&mut self) {
        let timers = std::mem::take(&mut *self.runtime.timers.borrow_mut());
        for timer in timers {
            let _ = timer.send(());
        }
        self.pool.run_until_stalled();
    }

    fn emit(&mut self, event: AuthEvent) {
        self.store.events.emit(&event);
        self.pool.run_until_stalled();
    }
}

// =============================================================
// Boot
// =============================================================

#[test]
fn anonymous_boot_is_ready_and_unauthenticated() {
    let mut h = Harness::new(FakeStore::anonymous());
    assert!(!h.provider.snapshot().ready);

    h.boot();

    let view = h.provider.snapshot();
    assert!(view.ready);
    assert!(!view.authenticated);
    assert_eq!(view.token, None);
}

#[test]
fn failed_handshake_still_reaches_ready() {
    let mut h = Harness::new(FakeStore::unreachable());
    h.boot();

    let view = h.provider.snapshot();
    assert!(view.ready);
    assert!(!view.authenticated);
    assert_eq!(h.views.borrow().len(), 1);
}

#[test]
fn signed_in_boot_publishes_identity() {
    let mut h = Harness::new(FakeStore::signed_in(&["admin"]));
    h.boot();

    let view = h.provider.snapshot();
    assert!(view.ready && view.authenticated);
    assert_eq!(view.token.as_deref(), Some("token-1"));
    assert_eq!(view.username(), Some("ana@cinema.test"));
    assert!(view.has_realm_role("admin"));
}

#[test]
fn second_boot_does_not_repeat_handshake() {
    let mut h = Harness::new(FakeStore::anonymous());
    h.boot();
    h.boot();

    assert_eq!(h.store.init_calls.get(), 1);
    assert_eq!(h.store.events.listener_count(), 1);
}

#[test]
fn concurrent_boots_share_one_handshake() {
    let mut h = Harness::new(FakeStore::anonymous());
    h.spawn_boot();
    h.spawn_boot();
    h.pool.run_until_stalled();

    assert_eq!(h.store.init_calls.get(), 1);
}

#[test]
fn boot_strips_auth_params_without_new_history_entry() {
    let mut h = Harness::at("/?code=abc&state=xyz", FakeStore::signed_in(&[]));
    h.boot();

    assert_eq!(*h.bar.current.borrow(), "/");
    assert_eq!(*h.bar.replaced.borrow(), vec!["/".to_owned()]);
}

#[test]
fn failed_handshake_leaves_address_untouched() {
    let mut h = Harness::at("/?code=abc&state=xyz", FakeStore::unreachable());
    h.boot();

    assert!(h.bar.replaced.borrow().is_empty());
}

// =============================================================
// Readiness across events
// =============================================================

#[test]
fn ready_flips_once_and_never_reverts() {
    let mut h = Harness::new(FakeStore::signed_in(&["admin"]));
    h.boot();
    for event in [
        AuthEvent::Logout,
        AuthEvent::Error,
        AuthEvent::Success,
        AuthEvent::TokenExpired,
        AuthEvent::RefreshError,
        AuthEvent::Ready,
        AuthEvent::RefreshSuccess,
        AuthEvent::Logout,
    ] {
        if event == AuthEvent::Success {
            h.store.sign_in();
        }
        h.emit(event);
    }

    let views = h.views.borrow();
    assert!(!views.is_empty());
    assert!(views.iter().all(|v| v.ready));
}

#[test]
fn logout_event_clears_credentials_and_success_restores_them() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();

    h.store.sign_out();
    h.emit(AuthEvent::Logout);
    let view = h.provider.snapshot();
    assert!(!view.authenticated);
    assert_eq!(view.token, None);
    assert_eq!(view.claims, None);

    h.store.sign_in();
    h.emit(AuthEvent::Success);
    assert!(h.provider.snapshot().authenticated);
}

#[test]
fn auth_error_event_marks_unauthenticated() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();
    h.emit(AuthEvent::Error);
    assert!(!h.provider.snapshot().authenticated);
}

#[test]
fn unchanged_state_is_not_republished() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();
    let before = h.views.borrow().len();
    h.emit(AuthEvent::Success);
    assert_eq!(h.views.borrow().len(), before);
}

// =============================================================
// Refresh loop
// =============================================================

#[test]
fn refresh_tick_requests_sixty_second_horizon() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();
    *h.store.refresh_result.borrow_mut() = Ok(true);

    h.tick();

    assert_eq!(h.store.refresh_calls.get(), 1);
    assert_eq!(h.store.last_min_validity.get(), Some(Duration::from_secs(60)));
    assert_eq!(h.provider.snapshot().token.as_deref(), Some("token-2"));

    h.tick();
    assert_eq!(h.store.refresh_calls.get(), 2);
}

#[test]
fn refresh_tick_skipped_while_unauthenticated() {
    let mut h = Harness::new(FakeStore::anonymous());
    h.boot();
    h.tick();
    h.tick();

    assert_eq!(h.store.refresh_calls.get(), 0);
    assert_eq!(h.store.login_calls.get(), 0);
}

#[test]
fn rejected_refresh_forces_login() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();
    *h.store.refresh_result.borrow_mut() = Err(SessionError::Refresh("session revoked".to_owned()));

    h.tick();

    assert_eq!(h.store.login_calls.get(), 1);
}

#[test]
fn token_expired_event_triggers_refresh() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();
    *h.store.refresh_result.borrow_mut() = Ok(true);

    h.emit(AuthEvent::TokenExpired);

    assert_eq!(h.store.refresh_calls.get(), 1);
    assert_eq!(h.provider.snapshot().token.as_deref(), Some("token-2"));
}

#[test]
fn token_expired_refresh_failure_forces_login() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();
    *h.store.refresh_result.borrow_mut() = Err(SessionError::Refresh("expired".to_owned()));

    h.emit(AuthEvent::TokenExpired);

    assert_eq!(h.store.login_calls.get(), 1);
}

// =============================================================
// Teardown
// =============================================================

#[test]
fn teardown_stops_refresh_and_detaches_listeners() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();
    assert_eq!(h.store.events.listener_count(), 1);

    h.provider.teardown();
    h.tick();
    h.emit(AuthEvent::Logout);

    assert_eq!(h.store.events.listener_count(), 0);
    assert_eq!(h.store.refresh_calls.get(), 0);
    assert!(h.provider.snapshot().authenticated);
}

#[test]
fn teardown_during_handshake_discards_result() {
    let store = FakeStore::signed_in(&[]);
    let (release, gate) = oneshot::channel();
    *store.init_gate.borrow_mut() = Some(gate);
    let mut h = Harness::new(store);

    h.boot();
    h.provider.teardown();
    let _ = release.send(());
    h.pool.run_until_stalled();

    assert!(!h.provider.snapshot().ready);
    assert!(h.views.borrow().is_empty());
}

#[test]
fn remount_after_teardown_boots_again() {
    let mut h = Harness::new(FakeStore::anonymous());
    h.boot();
    h.provider.teardown();
    h.boot();

    assert_eq!(h.store.init_calls.get(), 2);
    assert_eq!(h.store.events.listener_count(), 1);
}

// =============================================================
// Requests
// =============================================================

#[test]
fn bearer_token_refreshes_before_returning_current_token() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();
    *h.store.refresh_result.borrow_mut() = Ok(true);

    let token = h.pool.run_until(h.provider.bearer_token());

    assert_eq!(token.as_deref(), Some("token-2"));
    assert_eq!(h.store.refresh_calls.get(), 1);
}

#[test]
fn bearer_token_is_absent_without_session() {
    let mut h = Harness::new(FakeStore::anonymous());
    h.boot();

    let token = h.pool.run_until(h.provider.bearer_token());

    assert_eq!(token, None);
    assert_eq!(h.store.refresh_calls.get(), 0);
}

#[test]
fn bearer_token_survives_refresh_failure() {
    let mut h = Harness::new(FakeStore::signed_in(&[]));
    h.boot();
    *h.store.refresh_result.borrow_mut() = Err(SessionError::Refresh("offline".to_owned()));

    let token = h.pool.run_until(h.provider.bearer_token());

    assert_eq!(token.as_deref(), Some("token-1"));
    assert_eq!(h.store.login_calls.get(), 0);
}

#[test]
fn login_and_logout_delegate_to_store() {
    let h = Harness::new(FakeStore::anonymous());
    h.provider.login();
    h.provider.logout();
    assert_eq!(h.store.login_calls.get(), 1);
    assert_eq!(h.store.logout_calls.get(), 1);
}
