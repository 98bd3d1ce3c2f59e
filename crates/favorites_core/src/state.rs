use std::sync::Arc;

use shared::domain::FavoriteSection;
use tokio::sync::watch;

use crate::error::FetchError;

/// Current status of the aggregation pipeline. Exactly one variant is active
/// at a time; every refresh replaces the value wholesale.
#[derive(Debug, Clone)]
pub enum FavoritesState {
    Loading,
    Normal(Vec<FavoriteSection>),
    Error(Arc<FetchError>),
}

impl FavoritesState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FavoritesState::Loading)
    }

    /// `Normal` or `Error` — the final state of one refresh cycle.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }
}

/// Holds the current state and fans it out to subscribers. A freshly
/// subscribed receiver always observes the latest value as its first
/// notification.
pub(crate) struct StateCell {
    tx: watch::Sender<FavoritesState>,
}

impl StateCell {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(FavoritesState::Loading);
        Self { tx }
    }

    pub(crate) fn current(&self) -> FavoritesState {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<FavoritesState> {
        let mut rx = self.tx.subscribe();
        // Late subscribers must not wait for the next transition to see the
        // current value.
        rx.mark_changed();
        rx
    }

    /// Replaces the value when `gate` still holds at write time. The gate
    /// runs inside the sender's own lock, so the check and the write are
    /// atomic against concurrent publishers: a stale writer arriving after a
    /// newer one can never clobber it. Publishing with no receivers left is a
    /// no-op rather than an error.
    pub(crate) fn set_if(&self, gate: impl FnOnce() -> bool, next: FavoritesState) -> bool {
        self.tx.send_if_modified(move |slot| {
            if !gate() {
                return false;
            }
            *slot = next;
            true
        })
    }
}
