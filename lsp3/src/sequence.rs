//! Latest-request tracking.
//!
//! A consumer that re-resolves whenever its input changes can receive
//! answers out of order. [`RequestSequencer`] hands out monotonically
//! increasing [`RequestToken`]s; only the most recently issued token is
//! accepted when results come back.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque ticket identifying one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Returns the raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Issues tokens and decides whether a returning result is still current.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Creates a sequencer with no requests issued.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issues a new token, superseding every earlier one.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Supersedes all outstanding tokens without starting a new request.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns `true` if `token` is the most recently issued one.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    /// Passes `value` through only if `token` is still current.
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        self.is_current(token).then_some(value)
    }
}
