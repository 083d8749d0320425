//! In-memory cache and request coalescing behind [`DeckService`].
//!
//! Each fetch runs in a spawned task that publishes its result into a
//! [`watch`] slot. The slot doubles as the in-flight marker for its key:
//! callers that arrive while a fetch is running subscribe to the same slot
//! and observe the same eventual success or failure, so at most one
//! non-forced request is ever on the wire per key. Because the task is
//! detached, a caller that goes away does not cancel the fetch other
//! waiters are parked on; only the per-request deadline does.
//!
//! [`DeckService`]: crate::DeckService

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use crate::config::ServiceConfig;
use crate::error::{DeckServiceError, Result};
use crate::http;
use crate::models::{self, Deck, DeckSummary};

/// A subscription onto one in-flight fetch. The watch channel retains the
/// published value, so a receiver cloned before the task settled still sees
/// the result after the in-flight marker is gone.
type FetchSlot<T> = watch::Receiver<Option<Result<T>>>;

pub(crate) struct ServiceInner {
    pub(crate) client: reqwest::Client,
    pub(crate) config: ServiceConfig,
    pub(crate) timeout: Duration,
    index_cache: Mutex<Option<Vec<DeckSummary>>>,
    deck_cache: Mutex<HashMap<String, Deck>>,
    pending_index: Mutex<Option<FetchSlot<Vec<DeckSummary>>>>,
    pending_decks: Mutex<HashMap<String, FetchSlot<Deck>>>,
}

impl ServiceInner {
    pub(crate) fn new(client: reqwest::Client, config: ServiceConfig, timeout: Duration) -> Self {
        Self {
            client,
            config,
            timeout,
            index_cache: Mutex::new(None),
            deck_cache: Mutex::new(HashMap::new()),
            pending_index: Mutex::new(None),
            pending_decks: Mutex::new(HashMap::new()),
        }
    }

    async fn load_index(&self) -> Result<Vec<DeckSummary>> {
        let url = self.config.index_url();
        let value = http::fetch_json(&self.client, &url, self.timeout).await?;
        models::parse_index(value)
    }

    async fn load_deck(&self, id: &str) -> Result<Deck> {
        let url = self.config.deck_url(id);
        let value = http::fetch_json(&self.client, &url, self.timeout).await?;
        Deck::from_value(value)
    }

    pub(crate) fn cached_deck(&self, id: &str) -> Option<Deck> {
        self.deck_cache.lock().unwrap().get(id).cloned()
    }

    /// Drop the index cache and all deck entries. Fetches already in flight
    /// are unaffected and will still publish and repopulate their entries.
    pub(crate) fn clear_cache(&self) {
        self.deck_cache.lock().unwrap().clear();
        *self.index_cache.lock().unwrap() = None;
        log::debug!("deck service cache cleared");
    }

    pub(crate) fn cache_stats(&self) -> (bool, usize) {
        let index_cached = self.index_cache.lock().unwrap().is_some();
        let decks = self.deck_cache.lock().unwrap().len();
        (index_cached, decks)
    }
}

// ---------------------------------------------------------------------------
// Index fetching
// ---------------------------------------------------------------------------

pub(crate) async fn fetch_index(inner: &Arc<ServiceInner>, force: bool) -> Result<Vec<DeckSummary>> {
    // Cache check, join-or-spawn, and marker insertion happen under the
    // registry lock so two racing callers cannot both start a fetch.
    let slot = {
        let mut pending = inner.pending_index.lock().unwrap();
        if !force {
            if let Some(cached) = inner.index_cache.lock().unwrap().as_ref() {
                log::debug!("index cache hit ({} entries)", cached.len());
                return Ok(cached.clone());
            }
            pending
                .get_or_insert_with(|| spawn_index_fetch(inner))
                .clone()
        } else {
            let slot = spawn_index_fetch(inner);
            *pending = Some(slot.clone());
            slot
        }
    };
    await_slot(slot).await
}

fn spawn_index_fetch(inner: &Arc<ServiceInner>) -> FetchSlot<Vec<DeckSummary>> {
    let (tx, rx) = watch::channel(None);
    let inner = Arc::clone(inner);
    tokio::spawn(async move {
        let result = inner.load_index().await;
        match &result {
            Ok(entries) => {
                log::debug!("index fetched ({} entries)", entries.len());
                *inner.index_cache.lock().unwrap() = Some(entries.clone());
            }
            Err(err) => log::warn!("index fetch failed: {}", err),
        }
        // Cache before marker: a caller that sees the marker gone must
        // already find the success in the cache.
        *inner.pending_index.lock().unwrap() = None;
        let _ = tx.send(Some(result));
    });
    rx
}

// ---------------------------------------------------------------------------
// Deck fetching
// ---------------------------------------------------------------------------

pub(crate) async fn fetch_deck(inner: &Arc<ServiceInner>, id: &str, force: bool) -> Result<Deck> {
    if id.is_empty() {
        return Err(DeckServiceError::InvalidId);
    }

    let slot = {
        let mut pending = inner.pending_decks.lock().unwrap();
        if !force {
            if let Some(deck) = inner.deck_cache.lock().unwrap().get(id) {
                log::debug!("deck cache hit for '{}'", id);
                return Ok(deck.clone());
            }
            pending
                .entry(id.to_string())
                .or_insert_with(|| spawn_deck_fetch(inner, id))
                .clone()
        } else {
            let slot = spawn_deck_fetch(inner, id);
            pending.insert(id.to_string(), slot.clone());
            slot
        }
    };
    await_slot(slot).await
}

fn spawn_deck_fetch(inner: &Arc<ServiceInner>, id: &str) -> FetchSlot<Deck> {
    let (tx, rx) = watch::channel(None);
    let inner = Arc::clone(inner);
    let id = id.to_string();
    tokio::spawn(async move {
        let result = inner.load_deck(&id).await;
        match &result {
            Ok(deck) => {
                log::debug!("deck '{}' fetched ({} cards)", id, deck.cards.len());
                inner
                    .deck_cache
                    .lock()
                    .unwrap()
                    .insert(id.clone(), deck.clone());
            }
            Err(err) => log::warn!("fetch failed for deck '{}': {}", id, err),
        }
        inner.pending_decks.lock().unwrap().remove(&id);
        let _ = tx.send(Some(result));
    });
    rx
}

// ---------------------------------------------------------------------------
// Slot waiting
// ---------------------------------------------------------------------------

/// Wait for the fetch behind `slot` to publish, then hand out its result.
async fn await_slot<T: Clone>(mut slot: FetchSlot<T>) -> Result<T> {
    let settled = slot
        .wait_for(Option::is_some)
        .await
        .map_err(|_| DeckServiceError::Aborted)?;
    match &*settled {
        Some(result) => result.clone(),
        None => Err(DeckServiceError::Aborted),
    }
}
