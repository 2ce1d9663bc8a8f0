//! Latest-only profile state for interactive consumers.
//!
//! A UI re-resolves whenever the connected account changes. Without care a
//! slow answer for the previous account can land after the answer for the
//! current one. [`ProfileWatcher`] tags every request with a
//! [`RequestToken`](lsp3::sequence::RequestToken) and publishes a result
//! only if no newer request was issued in the meantime.

use std::sync::Arc;

use alloy_provider::Provider;
use lsp3::chain::ChainId;
use lsp3::profile::ResolvedProfile;
use lsp3::sequence::RequestSequencer;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::resolver::ProfileResolver;

/// Snapshot published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    /// A request is in flight.
    pub loading: bool,
    /// The latest accepted result.
    pub profile: Option<ResolvedProfile>,
}

/// Drives a [`ProfileResolver`] on behalf of one consumer.
#[derive(Debug)]
pub struct ProfileWatcher<P> {
    resolver: Arc<ProfileResolver<P>>,
    sequencer: Arc<RequestSequencer>,
    state: Arc<watch::Sender<ProfileState>>,
}

impl<P> ProfileWatcher<P>
where
    P: Provider + 'static,
{
    /// Creates a watcher with an empty, idle state.
    pub fn new(resolver: Arc<ProfileResolver<P>>) -> Self {
        let (state, _) = watch::channel(ProfileState::default());
        Self {
            resolver,
            sequencer: Arc::new(RequestSequencer::new()),
            state: Arc::new(state),
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state.subscribe()
    }

    /// Returns the current state.
    pub fn state(&self) -> ProfileState {
        self.state.borrow().clone()
    }

    /// Starts resolving `address` on `chain`, superseding any earlier request.
    ///
    /// The returned handle yields `true` if the result was published and
    /// `false` if a newer request made it stale. Superseded requests are not
    /// aborted; their results are dropped.
    pub fn request(&self, address: impl Into<String>, chain: ChainId) -> JoinHandle<bool> {
        let address = address.into();
        let token = self.sequencer.issue();
        self.state.send_modify(|state| state.loading = true);

        let resolver = Arc::clone(&self.resolver);
        let sequencer = Arc::clone(&self.sequencer);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let profile = resolver.resolve(&address, chain).await;
            state.send_if_modified(|current| {
                if !sequencer.is_current(token) {
                    #[cfg(feature = "telemetry")]
                    tracing::debug!(address = %address, token = token.get(), "Dropping stale profile");
                    return false;
                }
                current.loading = false;
                current.profile = Some(profile);
                true
            })
        })
    }

    /// Drops any in-flight result and resets to the idle, empty state.
    pub fn clear(&self) {
        self.sequencer.invalidate();
        self.state.send_replace(ProfileState::default());
    }
}
