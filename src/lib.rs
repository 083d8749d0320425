//! Client SDK for statically-hosted deck sites.
//!
//! Fetches the deck index (`decks.json`) and individual deck documents over
//! HTTP, caches them in memory, coalesces concurrent requests for the same
//! resource into one network call, and provides case-insensitive substring
//! search over the cached index.
//!
//! # Quick start
//!
//! ```no_run
//! use decksite_sdk::DeckService;
//!
//! # async fn run() -> decksite_sdk::Result<()> {
//! let service = DeckService::builder("https://decks.example.org/data").build()?;
//!
//! // Browse the index, then open one deck
//! let index = service.fetch_index(false).await?;
//! let deck = service.fetch_deck(&index[0].index, false).await?;
//! println!("{}: {} cards", deck.name, deck.cards.len());
//!
//! // Substring search over name and description
//! let hits = service.search_index("dragon").await?;
//! # let _ = hits;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod search;
mod service;

pub use config::ServiceConfig;
pub use error::{DeckServiceError, Result};
pub use models::{Deck, DeckSummary};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use service::ServiceInner;

// ---------------------------------------------------------------------------
// DeckServiceBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DeckService`].
///
/// Obtained from [`DeckService::builder()`] with the deployment's base URL;
/// chain configuration methods and call [`build()`](Self::build).
pub struct DeckServiceBuilder {
    base_url: String,
    timeout: Duration,
}

impl DeckServiceBuilder {
    /// Set the per-request deadline. Defaults to 8 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the service, constructing its HTTP client.
    pub fn build(self) -> Result<DeckService> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        let config = ServiceConfig::new(self.base_url);
        Ok(DeckService {
            inner: Arc::new(ServiceInner::new(client, config, self.timeout)),
        })
    }
}

// ---------------------------------------------------------------------------
// DeckService
// ---------------------------------------------------------------------------

/// The deck-site data service: fetch, cache, coalesce, search.
///
/// Construct one at application start via [`builder()`](Self::builder) and
/// hand clones to consumers — cloning is cheap (a shared handle) and all
/// clones share the same caches and in-flight bookkeeping.
#[derive(Clone)]
pub struct DeckService {
    inner: Arc<ServiceInner>,
}

impl DeckService {
    /// Create a builder rooted at `base_url` (e.g. `https://host/data`).
    pub fn builder<S: Into<String>>(base_url: S) -> DeckServiceBuilder {
        DeckServiceBuilder {
            base_url: base_url.into(),
            timeout: config::DEFAULT_TIMEOUT,
        }
    }

    /// Fetch the deck index, serving from cache when possible.
    ///
    /// With `force` false a cached index is returned without a network call,
    /// and a call made while an index fetch is already in flight joins that
    /// fetch instead of issuing another. `force` true bypasses both and
    /// always downloads, replacing the cache on success. A failed fetch
    /// leaves the cache untouched.
    pub async fn fetch_index(&self, force: bool) -> Result<Vec<DeckSummary>> {
        service::fetch_index(&self.inner, force).await
    }

    /// Fetch one deck by id, serving from cache when possible.
    ///
    /// Fails with [`DeckServiceError::InvalidId`] before any network call if
    /// `id` is empty. Cache and in-flight coalescing rules match
    /// [`fetch_index`](Self::fetch_index), keyed per id. The payload must
    /// pass [`Deck::from_value`] validation; on any failure the deck cache
    /// for `id` is left untouched.
    pub async fn fetch_deck(&self, id: &str, force: bool) -> Result<Deck> {
        service::fetch_deck(&self.inner, id, force).await
    }

    /// Search the index by case-insensitive substring over name and
    /// description, fetching the index first if it is not cached.
    ///
    /// An empty (or all-whitespace) query returns the full index. Matches
    /// keep their original index order.
    pub async fn search_index(&self, query: &str) -> Result<Vec<DeckSummary>> {
        let entries = service::fetch_index(&self.inner, false).await?;
        Ok(search::filter_index(entries, query))
    }

    /// Fetch an HTML partial fragment by name, failing silently.
    ///
    /// Returns `Some(html)` on success and `None` on any failure (logged at
    /// `warn`); partials are presentation chrome, so a missing one should
    /// degrade to an empty slot rather than an error.
    pub async fn fetch_partial(&self, name: &str) -> Option<String> {
        let url = self.inner.config.partial_url(name);
        match http::fetch_text(&self.inner.client, &url, self.inner.timeout).await {
            Ok(html) => Some(html),
            Err(err) => {
                log::warn!("partial '{}' failed to load: {}", name, err);
                None
            }
        }
    }

    /// Synchronous cache lookup; never triggers a fetch.
    pub fn cached_deck(&self, id: &str) -> Option<Deck> {
        self.inner.cached_deck(id)
    }

    /// Drop the index cache and all cached decks.
    ///
    /// Fetches already in flight are not affected; they will still complete
    /// and repopulate their entries.
    pub fn clear_cache(&self) {
        self.inner.clear_cache()
    }

    /// The configured base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        self.inner.config.base_url()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DeckService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (index_cached, decks) = self.inner.cache_stats();
        write!(
            f,
            "DeckService(base_url={}, index_cached={}, cached_decks={})",
            self.inner.config.base_url(),
            index_cached,
            decks
        )
    }
}
