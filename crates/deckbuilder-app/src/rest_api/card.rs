use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum_valid::Garde;
use garde::Validate;
use http::StatusCode;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use deckbuilder_types::card::{Card, ColorSet, Rarity};
use deckbuilder_types::search::CardSearchCriteria;

/// Card search parameters: either a raw Scryfall query (`q`) or structured
/// criteria translated through the query builder. `q` wins when both are
/// given.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CardSearchQuery {
    #[garde(length(max = 255))]
    q: Option<String>,
    #[garde(length(max = 255))]
    name: Option<String>,
    #[garde(length(max = 50))]
    format: Option<String>,
    /// Color letters, e.g. "ur"; "c" selects colorless.
    #[garde(length(max = 16))]
    colors: Option<String>,
    #[garde(range(max = 1000))]
    min_cmc: Option<u32>,
    #[garde(range(max = 1000))]
    max_cmc: Option<u32>,
    #[garde(skip)]
    rarity: Option<Rarity>,
}

impl CardSearchQuery {
    fn into_query(self) -> ApiResult<String> {
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            return Ok(q.to_string());
        }

        let colors = self
            .colors
            .as_deref()
            .map(ColorSet::parse)
            .transpose()
            .map_err(|e| ApiError::InvalidQuery(e.to_string()))?;

        let query = CardSearchCriteria {
            name: self.name,
            format: self.format,
            colors,
            min_cmc: self.min_cmc,
            max_cmc: self.max_cmc,
            rarity: self.rarity,
        }
        .to_query();

        if query.is_empty() {
            return Err(ApiError::InvalidQuery(
                "At least one search criterion is required".to_string(),
            ));
        }
        Ok(query)
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(get, path = "/scryfall/{scryfall_id}", tag = "Card", operation_id = "getCardByScryfallId",
    responses((status = StatusCode::OK, description = "Get one card by its Scryfall id", body = Card))))]
pub async fn get_by_scryfall_id(
    Path(scryfall_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let card = state.scryfall().card_by_id(&scryfall_id).await?;
    match card {
        Some(card) => Ok((StatusCode::OK, Json(card.into_card()))),
        None => Err(ApiError::NotFound(format!("Card {scryfall_id}"))),
    }
}

#[cfg_attr(feature = "openapi", utoipa::path(get, path = "/search", tag = "Card", operation_id = "searchCards",
    params(CardSearchQuery),
    responses((status = StatusCode::OK, description = "Matching cards, possibly empty", body = Vec<Card>))))]
pub async fn search(
    State(state): State<AppState>,
    Garde(Query(params)): Garde<Query<CardSearchQuery>>,
) -> ApiResult<impl IntoResponse> {
    let query = params.into_query()?;
    let cards = state.scryfall().search(&query).await?;
    let cards: Vec<Card> = cards
        .into_iter()
        .map(deckbuilder_scryfall::models::ScryfallCard::into_card)
        .collect();

    Ok((StatusCode::OK, Json(cards)))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/scryfall/{scryfall_id}", get(get_by_scryfall_id))
        .route("/search", get(search))
}

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;

    #[derive(utoipa::OpenApi)]
    #[openapi(paths(get_by_scryfall_id, search))]
    struct ApiDocs;

    ApiDocs::openapi()
}
