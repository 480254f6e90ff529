//! Browser instance pool.
//!
//! A bounded pool of browser sessions shared by crawling workers. Sessions
//! are created lazily through a factory up to the configured capacity;
//! `acquire` blocks once the capacity is outstanding and wakes when a
//! session is released or the pool is closed. `close` is idempotent and
//! safe to call from multiple threads.

use parking_lot::{Condvar, Mutex};
use tracing::debug;

use crate::error::{Error, Result};

struct PoolState<B> {
    idle: Vec<B>,
    /// Sessions created and not yet dropped (idle + handed out).
    live: usize,
    closed: bool,
}

/// Bounded pool of browser sessions with blocking acquire.
pub struct BrowserPool<B> {
    state: Mutex<PoolState<B>>,
    available: Condvar,
    capacity: usize,
    factory: Box<dyn Fn() -> B + Send + Sync>,
}

impl<B> BrowserPool<B> {
    /// Create a pool holding at most `capacity` sessions (minimum 1),
    /// created on demand by `factory`.
    #[must_use]
    pub fn new(capacity: usize, factory: impl Fn() -> B + Send + Sync + 'static) -> Self {
        Self {
            state: Mutex::new(PoolState {
                idle: Vec::new(),
                live: 0,
                closed: false,
            }),
            available: Condvar::new(),
            capacity: capacity.max(1),
            factory: Box::new(factory),
        }
    }

    /// Acquire a session, blocking while the pool is exhausted.
    ///
    /// Fails with [`Error::PoolClosed`] if the pool is closed before or
    /// while waiting.
    pub fn acquire(&self) -> Result<B> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return Err(Error::PoolClosed);
            }
            if let Some(session) = state.idle.pop() {
                return Ok(session);
            }
            if state.live < self.capacity {
                state.live += 1;
                drop(state);
                debug!("creating new pooled browser session");
                return Ok((self.factory)());
            }
            self.available.wait(&mut state);
        }
    }

    /// Return a session to the pool.
    ///
    /// Safe to call at most once per acquired session. After close the
    /// session is dropped instead of re-pooled.
    pub fn release(&self, session: B) {
        let mut state = self.state.lock();
        if state.closed {
            state.live = state.live.saturating_sub(1);
            return;
        }
        state.idle.push(session);
        drop(state);
        self.available.notify_one();
    }

    /// Close the pool: drop all idle sessions and wake every waiter.
    ///
    /// Idempotent and safe to invoke concurrently; outstanding sessions are
    /// dropped as their holders release them.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if !state.closed {
            state.closed = true;
            let drained = state.idle.len();
            state.live = state.live.saturating_sub(drained);
            state.idle.clear();
            debug!(drained, "browser pool closed");
        }
        drop(state);
        self.available.notify_all();
    }

    /// Whether the pool has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}
