//! Single owner of the process-wide session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once at the application root. Boots the identity-provider store,
//! keeps the token fresh on a fixed interval and republishes a [`SessionView`]
//! to every subscriber after each change. It is the only writer of
//! [`Session`]; components and guards read published snapshots.
//!
//! CONCURRENCY
//! ===========
//! Everything runs on the browser's single thread. Each await point is
//! followed by a generation check, so completions that land after
//! [`SessionProvider::teardown`] are dropped instead of written.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};

use crate::address::{self, AddressBar};
use crate::config::SessionConfig;
use crate::events::{EventBus, Subscription};
use crate::runtime::Runtime;
use crate::store::{AuthEvent, TokenStore};
use crate::view::{Session, SessionView};

/// Cheaply clonable handle to the shared session state.
#[derive(Clone)]
pub struct SessionProvider {
    inner: Rc<Inner>,
}

struct Inner {
    store: Rc<dyn TokenStore>,
    runtime: Rc<dyn Runtime>,
    address_bar: Rc<dyn AddressBar>,
    config: SessionConfig,
    session: RefCell<Session>,
    booting: Cell<bool>,
    generation: Cell<u64>,
    refresh_loop: RefCell<Option<AbortHandle>>,
    store_subscriptions: RefCell<Vec<Subscription>>,
    published: EventBus<SessionView>,
}

impl SessionProvider {
    #[must_use]
    pub fn new(
        store: Rc<dyn TokenStore>,
        runtime: Rc<dyn Runtime>,
        address_bar: Rc<dyn AddressBar>,
        config: SessionConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                store,
                runtime,
                address_bar,
                config,
                session: RefCell::new(Session::default()),
                booting: Cell::new(false),
                generation: Cell::new(0),
                refresh_loop: RefCell::new(None),
                store_subscriptions: RefCell::new(Vec::new()),
                published: EventBus::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionView {
        self.inner.view()
    }

    /// Receive every snapshot published after this call.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionView) + 'static,
    {
        self.inner.published.subscribe(listener)
    }

    pub fn login(&self) {
        self.inner.store.login();
    }

    pub fn logout(&self) {
        self.inner.store.logout();
    }

    /// Run the boot sequence.
    ///
    /// Returns `false` without touching the store when a boot already ran
    /// or is in progress, or when the provider was torn down mid-handshake.
    pub async fn boot(&self) -> bool {
        let inner = &self.inner;
        if inner.booting.replace(true) {
            log::debug!("session boot skipped: already started");
            return false;
        }
        let generation = inner.generation.get();

        let outcome = inner.store.initialize().await;
        if inner.generation.get() != generation {
            log::debug!("session torn down during handshake; dropping result");
            return false;
        }

        let handshake_ok = match outcome {
            Ok(reported) => {
                log::debug!("identity provider handshake finished (authenticated={reported})");
                true
            }
            Err(e) => {
                log::warn!("{e}; continuing unauthenticated");
                false
            }
        };

        {
            let mut session = inner.session.borrow_mut();
            if handshake_ok {
                session.set_credentials(inner.store.is_authenticated(), inner.store.token(), inner.store.claims());
            } else {
                session.clear_credentials();
            }
            session.mark_ready();
        }

        if handshake_ok {
            address::sanitize(inner.address_bar.as_ref(), &inner.config.auth_params);
        }
        inner.publish();

        start_refresh_loop(inner);
        attach_store_events(inner);
        true
    }

    /// Run one refresh pass: refresh while authenticated, re-login on failure.
    pub async fn refresh(&self) {
        self.inner.refresh().await;
    }

    /// Token for an outgoing request, refreshed first when a session exists.
    pub async fn bearer_token(&self) -> Option<String> {
        let store = &self.inner.store;
        if store.is_authenticated() {
            if let Err(e) = store.refresh_token(self.inner.config.min_validity()).await {
                log::debug!("pre-request refresh failed: {e}");
            }
        }
        store.token()
    }

    /// Cancel the refresh loop, detach store listeners and allow a new boot.
    pub fn teardown(&self) {
        let inner = &self.inner;
        inner.generation.set(inner.generation.get() + 1);
        if let Some(handle) = inner.refresh_loop.borrow_mut().take() {
            handle.abort();
        }
        let subscriptions = std::mem::take(&mut *inner.store_subscriptions.borrow_mut());
        drop(subscriptions);
        inner.booting.set(false);
        log::debug!("session provider torn down");
    }
}

impl Inner {
    fn view(&self) -> SessionView {
        self.session.borrow().view(&self.config.default_client_id)
    }

    fn publish(&self) {
        let view = self.view();
        self.published.emit(&view);
    }

    fn write_credentials(&self, authenticated: bool) {
        let changed = {
            let mut session = self.session.borrow_mut();
            let before = session.clone();
            if authenticated {
                session.set_credentials(self.store.is_authenticated(), self.store.token(), self.store.claims());
            } else {
                session.clear_credentials();
            }
            *session != before
        };
        if changed {
            self.publish();
        }
    }

    async fn refresh(&self) {
        if !self.store.is_authenticated() {
            return;
        }
        let generation = self.generation.get();
        let result = self.store.refresh_token(self.config.min_validity()).await;
        if self.generation.get() != generation {
            return;
        }
        match result {
            Ok(refreshed) => {
                if refreshed {
                    log::debug!("access token refreshed");
                }
                self.write_credentials(true);
            }
            Err(e) => {
                log::warn!("{e}; starting re-authentication");
                self.store.login();
            }
        }
    }

    fn on_store_event(inner: &Rc<Self>, event: AuthEvent) {
        log::debug!("identity provider event: {event:?}");
        match event {
            AuthEvent::Success | AuthEvent::RefreshSuccess => inner.write_credentials(true),
            AuthEvent::Error | AuthEvent::Logout => inner.write_credentials(false),
            AuthEvent::TokenExpired => {
                let weak = Rc::downgrade(inner);
                inner.runtime.spawn_local(Box::pin(async move {
                    if let Some(inner) = weak.upgrade() {
                        inner.refresh().await;
                    }
                }));
            }
            // A rejected refresh is handled where the refresh was requested.
            AuthEvent::Ready | AuthEvent::RefreshError => {}
        }
    }
}

fn start_refresh_loop(inner: &Rc<Inner>) {
    let (handle, registration) = AbortHandle::new_pair();
    let task = Abortable::new(refresh_loop(Rc::downgrade(inner), inner.config.refresh_interval()), registration);
    inner.runtime.spawn_local(Box::pin(async move {
        let _ = task.await;
    }));
    if let Some(previous) = inner.refresh_loop.replace(Some(handle)) {
        previous.abort();
    }
}

async fn refresh_loop(weak: Weak<Inner>, period: Duration) {
    loop {
        let sleep = match weak.upgrade() {
            Some(inner) => inner.runtime.sleep(period),
            None => return,
        };
        sleep.await;
        let Some(inner) = weak.upgrade() else {
            return;
        };
        inner.refresh().await;
    }
}

fn attach_store_events(inner: &Rc<Inner>) {
    let weak = Rc::downgrade(inner);
    let subscription = inner.store.events().subscribe(move |event| {
        if let Some(inner) = weak.upgrade() {
            Inner::on_store_event(&inner, *event);
        }
    });
    inner.store_subscriptions.borrow_mut().push(subscription);
}
