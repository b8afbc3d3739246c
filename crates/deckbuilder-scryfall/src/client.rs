use reqwest::StatusCode;
use tracing::warn;
use url::Url;

use crate::error::{Error, Result};
use crate::models::{ScryfallCard, ScryfallList};

const USER_AGENT: &str = concat!("deckbuilder/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Scryfall REST API.
///
/// Non-success responses and malformed payloads are downgraded to
/// "not found" / "empty result set" (logged as warnings); only
/// transport-level failures surface as errors.
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ScryfallClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    /// Retrieves a single card by its Scryfall id, `None` when the card
    /// does not exist or the response is unusable.
    pub async fn card_by_id(&self, scryfall_id: &str) -> Result<Option<ScryfallCard>> {
        let url = self.cards_url(&[scryfall_id])?;
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            log_degraded("card lookup", scryfall_id, response).await;
            return Ok(None);
        }

        match response.json::<ScryfallCard>().await {
            Ok(card) => Ok(Some(card)),
            Err(err) => {
                warn!("Malformed Scryfall card payload for '{scryfall_id}': {err}");
                Ok(None)
            }
        }
    }

    /// Searches cards with a Scryfall query string. Returns an empty list
    /// when nothing matches or the response is unusable, never `None`.
    pub async fn search(&self, query: &str) -> Result<Vec<ScryfallCard>> {
        let mut url = self.cards_url(&["search"])?;
        url.query_pairs_mut().append_pair("q", query);
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            // Scryfall answers 404 to queries with no matches.
            if response.status() != StatusCode::NOT_FOUND {
                log_degraded("search", query, response).await;
            }
            return Ok(Vec::new());
        }

        match response.json::<ScryfallList<ScryfallCard>>().await {
            Ok(list) => Ok(list.data),
            Err(err) => {
                warn!("Malformed Scryfall search payload for '{query}': {err}");
                Ok(Vec::new())
            }
        }
    }

    fn cards_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::BadBaseUrl)?
            .pop_if_empty()
            .push("cards")
            .extend(segments);
        Ok(url)
    }
}

async fn log_degraded(operation: &str, subject: &str, response: reqwest::Response) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    warn!("Scryfall {operation} failed for '{subject}': HTTP {status}, body: {body}");
}
