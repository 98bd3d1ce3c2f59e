use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::future::join_all;
use shared::domain::{FavoriteItem, FavoriteKind, FavoriteSection, CATEGORIES};
use tokio::sync::watch;
use tracing::debug;

pub mod error;
mod sections;
mod state;

pub use error::FetchError;
pub use state::FavoritesState;

/// Remote source of favorited items. Called exactly once per category on
/// every refresh, with that category's fixed `(kind, limit)` pair.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn get_favorite_items(
        &self,
        kind: FavoriteKind,
        limit: Option<u32>,
    ) -> Result<Vec<FavoriteItem>>;
}

pub struct MissingFavoriteRepository;

#[async_trait]
impl FavoriteRepository for MissingFavoriteRepository {
    async fn get_favorite_items(
        &self,
        kind: FavoriteKind,
        _limit: Option<u32>,
    ) -> Result<Vec<FavoriteItem>> {
        Err(anyhow!("favorite repository unavailable for kind {kind:?}"))
    }
}

/// Aggregates the user's favorites into labeled sections and publishes the
/// result as a tri-state value observers can watch.
///
/// Every `refresh` replaces the published state wholesale: `Loading` first,
/// then either `Normal(sections)` or `Error(cause)`. A refresh started later
/// supersedes any still in flight; superseded outcomes are dropped, never
/// published.
pub struct FavoriteAggregator {
    repository: Arc<dyn FavoriteRepository>,
    state: state::StateCell,
    epoch: AtomicU64,
}

impl FavoriteAggregator {
    /// Creates the aggregator and starts the initial refresh. Must be called
    /// from within a tokio runtime.
    pub fn new(repository: Arc<dyn FavoriteRepository>) -> Arc<Self> {
        let aggregator = Self::new_idle(repository);
        aggregator.refresh();
        aggregator
    }

    /// Creates the aggregator without starting any work; the state stays
    /// `Loading` until the first `refresh`.
    pub fn new_idle(repository: Arc<dyn FavoriteRepository>) -> Arc<Self> {
        Arc::new(Self {
            repository,
            state: state::StateCell::new(),
            epoch: AtomicU64::new(0),
        })
    }

    /// Non-blocking snapshot of the current state.
    pub fn current(&self) -> FavoritesState {
        self.state.current()
    }

    /// Subscribes to state transitions. The receiver's first notification is
    /// the current value, so late subscribers never miss the latest state.
    pub fn subscribe(&self) -> watch::Receiver<FavoritesState> {
        self.state.subscribe()
    }

    /// Starts a new refresh. `Loading` is visible to observers before this
    /// returns; the terminal state is published from a spawned task. Safe to
    /// call repeatedly: whichever call holds the highest epoch at publish
    /// time wins.
    pub fn refresh(self: &Arc<Self>) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(epoch, "favorites refresh started");
        self.publish(epoch, FavoritesState::Loading);

        let this = Arc::clone(self);
        tokio::spawn(async move {
            let state = match this.load(epoch).await {
                Ok(sections) => FavoritesState::Normal(sections),
                Err(err) => FavoritesState::Error(Arc::new(err)),
            };
            this.publish(epoch, state);
        });
    }

    async fn load(&self, epoch: u64) -> Result<Vec<FavoriteSection>, FetchError> {
        let collections = self.fetch_all().await?;
        // Assembly is pure compute; keep it off the threads delivering state
        // to observers.
        let sections = tokio::task::spawn_blocking(move || sections::build_sections(collections))
            .await
            .map_err(|err| FetchError::new(anyhow!(err).context("section assembly task failed")))?;
        debug!(epoch, sections = sections.len(), "favorites refresh assembled");
        Ok(sections)
    }

    /// Fetches every category concurrently and returns one collection per
    /// `CATEGORIES` entry, index-aligned. All fetches drain to completion
    /// even when one fails; the first failure in category order is the one
    /// surfaced. No retries, no partial results.
    async fn fetch_all(&self) -> Result<Vec<Vec<FavoriteItem>>, FetchError> {
        let fetches = CATEGORIES
            .iter()
            .map(|category| self.repository.get_favorite_items(category.kind, category.limit));
        let results = join_all(fetches).await;

        let mut collections = Vec::with_capacity(CATEGORIES.len());
        for result in results {
            collections.push(result.map_err(FetchError::new)?);
        }
        Ok(collections)
    }

    /// Epoch-gated write: only the most recently started refresh may publish.
    /// A stale outcome is dropped silently even when it physically arrives
    /// after a newer epoch's write.
    fn publish(&self, epoch: u64, state: FavoritesState) {
        self.state
            .set_if(|| self.epoch.load(Ordering::SeqCst) == epoch, state);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
