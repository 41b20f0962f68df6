//! Async runtime hooks used by the session provider.
//!
//! The browser backs these with `spawn_local` and `gloo-timers`; tests back
//! them with a local executor and manually released timers.

use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Minimal single-threaded runtime surface.
pub trait Runtime {
    /// Run `task` to completion in the background on the current thread.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);

    /// Resolve after `duration` has elapsed.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}
