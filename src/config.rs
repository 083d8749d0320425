use std::time::Duration;

/// Default per-request deadline for deck site fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

pub const INDEX_FILE: &str = "decks.json";
pub const DECK_DIR: &str = "decks";
pub const PARTIAL_DIR: &str = "partials";

/// Resource locations for one deck site deployment.
///
/// The site layout is fixed (`decks.json` index, one JSON document per deck
/// under `decks/`, HTML fragments under `partials/`); only the base URL
/// varies between deployments, so that is the single configuration knob.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    base_url: String,
}

impl ServiceConfig {
    /// Create a config rooted at `base_url`. A trailing slash is tolerated.
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the deck index document.
    pub fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, INDEX_FILE)
    }

    /// URL of a single deck document. The id is percent-encoded so ids with
    /// spaces or separators cannot escape the deck directory.
    pub fn deck_url(&self, id: &str) -> String {
        format!(
            "{}/{}/{}.json",
            self.base_url,
            DECK_DIR,
            urlencoding::encode(id)
        )
    }

    /// URL of an HTML partial fragment.
    pub fn partial_url(&self, name: &str) -> String {
        format!(
            "{}/{}/{}.html",
            self.base_url,
            PARTIAL_DIR,
            urlencoding::encode(name)
        )
    }
}
