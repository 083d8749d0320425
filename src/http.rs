//! HTTP fetch helpers with an explicit per-request deadline.
//!
//! Every fetch runs under [`tokio::time::timeout`], so a hung server turns
//! into [`DeckServiceError::Timeout`] instead of an open-ended await. Status
//! codes are mapped into the crate error taxonomy before the body is read.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::{DeckServiceError, Result};

/// GET `url` and decode the body as a JSON value.
///
/// * 404 → [`DeckServiceError::NotFound`]
/// * other non-2xx → [`DeckServiceError::Network`] with the status code
/// * deadline elapsed → [`DeckServiceError::Timeout`]
/// * body that is not valid JSON → [`DeckServiceError::Json`], kept distinct
///   from network failures so callers can tell a bad document from a bad
///   connection
pub async fn fetch_json(client: &Client, url: &str, deadline: Duration) -> Result<Value> {
    let body = fetch_text(client, url, deadline).await?;
    Ok(serde_json::from_str(&body)?)
}

/// GET `url` and return the raw body text under the same status and
/// deadline mapping as [`fetch_json`].
pub async fn fetch_text(client: &Client, url: &str, deadline: Duration) -> Result<String> {
    log::debug!("GET {}", url);

    let request = async {
        let resp = client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::NOT_FOUND => DeckServiceError::NotFound(url.to_string()),
                _ => DeckServiceError::Network {
                    status: status.as_u16(),
                },
            });
        }
        Ok(resp.text().await?)
    };

    // The deadline covers the full exchange, headers and body both.
    match tokio::time::timeout(deadline, request).await {
        Ok(result) => result,
        Err(_) => {
            log::warn!("GET {} timed out after {:?}", url, deadline);
            Err(DeckServiceError::Timeout(deadline))
        }
    }
}
