use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DeckServiceError, Result};

// ---------------------------------------------------------------------------
// DeckSummary — one entry in the deck index
// ---------------------------------------------------------------------------

/// Summary info for a deck as listed in `decks.json`.
///
/// `index` is the deck's unique id and the key used to fetch the full
/// [`Deck`] document. Entries are immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub index: String,
    pub name: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Deck — the full record for one id
// ---------------------------------------------------------------------------

/// A full deck document: card list plus optional strategy text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub name: String,
    pub description: Option<String>,
    pub cards: Vec<String>,
    pub strategy_description: Option<String>,
}

impl Deck {
    /// Validate and decode a raw deck payload.
    ///
    /// The payload must be a JSON object ([`DeckShape`] otherwise) with a
    /// string `name` and an array `cards` ([`DeckValidation`] naming the
    /// offending fields otherwise). Anything else about the document is
    /// trusted as-is.
    ///
    /// [`DeckShape`]: DeckServiceError::DeckShape
    /// [`DeckValidation`]: DeckServiceError::DeckValidation
    pub fn from_value(value: Value) -> Result<Deck> {
        let obj = value.as_object().ok_or(DeckServiceError::DeckShape)?;

        let name_ok = obj.get("name").map(Value::is_string).unwrap_or(false);
        let cards_ok = obj.get("cards").map(Value::is_array).unwrap_or(false);
        if !name_ok || !cards_ok {
            let mut bad = Vec::new();
            if !name_ok {
                bad.push("name");
            }
            if !cards_ok {
                bad.push("cards");
            }
            return Err(DeckServiceError::DeckValidation(bad.join(", ")));
        }

        serde_json::from_value(value)
            .map_err(|e| DeckServiceError::DeckValidation(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Index parsing
// ---------------------------------------------------------------------------

/// Validate and decode a raw index payload.
///
/// The payload must be array-shaped and each entry must decode as a
/// [`DeckSummary`]; anything else fails with
/// [`IndexInvalid`](DeckServiceError::IndexInvalid). Server order is kept.
pub fn parse_index(value: Value) -> Result<Vec<DeckSummary>> {
    if !value.is_array() {
        return Err(DeckServiceError::IndexInvalid);
    }
    serde_json::from_value(value).map_err(|_| DeckServiceError::IndexInvalid)
}
