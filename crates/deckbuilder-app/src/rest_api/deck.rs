use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
#[allow(unused_imports)]
use axum::routing::{delete, get, patch, post};
use axum_valid::Garde;
use garde::Validate;
use http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::rest_api::{Page, Paging};
use crate::state::AppState;
use deckbuilder_dal::deck::DeckRepository;
use deckbuilder_types::deck::{Deck, Section, Visibility};

crate::repository_from_request!(DeckRepository);

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeck {
    #[garde(length(min = 1, max = 200))]
    name: String,
    #[garde(length(min = 1, max = 50))]
    format: String,
    #[garde(length(max = 2000))]
    description: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    visibility: Visibility,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDeckVisibility {
    #[garde(skip)]
    visibility: Visibility,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDeckDescription {
    #[garde(length(max = 2000))]
    description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertDeckEntry {
    #[garde(length(min = 1, max = 50))]
    card_scryfall_id: String,
    #[garde(range(min = 1))]
    quantity: u32,
    #[garde(skip)]
    #[serde(default)]
    section: Section,
}

#[derive(Debug, Deserialize)]
pub struct RemoveEntryQuery {
    #[serde(default)]
    section: Section,
}

/// Loads the aggregate for a mutating request; absent decks surface as 404.
async fn load_deck(repository: &DeckRepository, id: Uuid) -> ApiResult<Deck> {
    repository
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {id}")))
}

#[cfg_attr(feature = "openapi", utoipa::path(post, path = "", tag = "Deck", operation_id = "createDeck",
    responses((status = StatusCode::CREATED, description = "Created Deck", body = Deck))))]
pub async fn create(
    repository: DeckRepository,
    Garde(Json(payload)): Garde<Json<CreateDeck>>,
) -> ApiResult<impl IntoResponse> {
    let deck = Deck::new(
        Uuid::new_v4(),
        &payload.name,
        &payload.format,
        payload.visibility,
        payload.description.as_deref(),
    )?;
    repository.add(&deck).await?;

    Ok((StatusCode::CREATED, Json(deck)))
}

#[cfg_attr(feature = "openapi", utoipa::path(get, path = "", tag = "Deck", operation_id = "listDeck",
    params(Paging),
    responses((status = StatusCode::OK, description = "List of decks, paginated", body = Page<deckbuilder_dal::deck::DeckShort>))))]
pub async fn list(
    repository: DeckRepository,
    State(state): State<AppState>,
    Garde(Query(paging)): Garde<Query<Paging>>,
) -> ApiResult<impl IntoResponse> {
    let default_page_size = state.config().default_page_size;
    let page = paging.page();
    let page_size = paging.page_size(default_page_size);
    let listing_params = paging.into_listing_params(default_page_size)?;

    let total = repository.count().await?;
    let rows = repository.list(listing_params).await?;

    Ok((StatusCode::OK, Json(Page::new(rows, total, page, page_size))))
}

#[cfg_attr(feature = "openapi", utoipa::path(get, path = "/{id}", tag = "Deck", operation_id = "getDeck",
    responses((status = StatusCode::OK, description = "Get one deck", body = Deck))))]
pub async fn get_by_id(
    Path(id): Path<Uuid>,
    repository: DeckRepository,
) -> ApiResult<impl IntoResponse> {
    let deck = load_deck(&repository, id).await?;

    Ok((StatusCode::OK, Json(deck)))
}

#[cfg_attr(feature = "openapi", utoipa::path(delete, path = "/{id}", tag = "Deck", operation_id = "deleteDeck"))]
pub async fn delete_deck(
    Path(id): Path<Uuid>,
    repository: DeckRepository,
) -> ApiResult<impl IntoResponse> {
    if !repository.delete(id).await? {
        return Err(ApiError::NotFound(format!("Deck {id}")));
    }

    Ok((StatusCode::NO_CONTENT, ()))
}

#[cfg_attr(feature = "openapi", utoipa::path(patch, path = "/{id}/visibility", tag = "Deck", operation_id = "changeDeckVisibility"))]
pub async fn change_visibility(
    Path(id): Path<Uuid>,
    repository: DeckRepository,
    Garde(Json(payload)): Garde<Json<UpdateDeckVisibility>>,
) -> ApiResult<impl IntoResponse> {
    let mut deck = load_deck(&repository, id).await?;
    deck.change_visibility(payload.visibility);
    repository.update(&deck).await?;

    Ok((StatusCode::NO_CONTENT, ()))
}

#[cfg_attr(feature = "openapi", utoipa::path(patch, path = "/{id}/description", tag = "Deck", operation_id = "changeDeckDescription"))]
pub async fn set_description(
    Path(id): Path<Uuid>,
    repository: DeckRepository,
    Garde(Json(payload)): Garde<Json<UpdateDeckDescription>>,
) -> ApiResult<impl IntoResponse> {
    let mut deck = load_deck(&repository, id).await?;
    deck.set_description(payload.description.as_deref());
    repository.update(&deck).await?;

    Ok((StatusCode::NO_CONTENT, ()))
}

#[cfg_attr(feature = "openapi", utoipa::path(post, path = "/{id}/entries", tag = "Deck", operation_id = "upsertDeckEntry"))]
pub async fn upsert_entry(
    Path(id): Path<Uuid>,
    repository: DeckRepository,
    Garde(Json(payload)): Garde<Json<UpsertDeckEntry>>,
) -> ApiResult<impl IntoResponse> {
    let mut deck = load_deck(&repository, id).await?;
    deck.upsert_entry(&payload.card_scryfall_id, payload.quantity, payload.section)?;
    repository.update(&deck).await?;

    Ok((StatusCode::NO_CONTENT, ()))
}

#[cfg_attr(feature = "openapi", utoipa::path(delete, path = "/{id}/entries/{card_scryfall_id}", tag = "Deck", operation_id = "removeDeckEntry"))]
pub async fn remove_entry(
    Path((id, card_scryfall_id)): Path<(Uuid, String)>,
    Query(query): Query<RemoveEntryQuery>,
    repository: DeckRepository,
) -> ApiResult<impl IntoResponse> {
    let mut deck = load_deck(&repository, id).await?;
    if !deck.remove_entry(&card_scryfall_id, query.section)? {
        return Err(ApiError::NotFound(format!(
            "Entry {card_scryfall_id} in deck {id}"
        )));
    }
    repository.update(&deck).await?;

    Ok((StatusCode::NO_CONTENT, ()))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", post(create).get(list))
        .route("/{id}", get(get_by_id).delete(delete_deck))
        .route("/{id}/visibility", patch(change_visibility))
        .route("/{id}/description", patch(set_description))
        .route("/{id}/entries", post(upsert_entry))
        .route("/{id}/entries/{card_scryfall_id}", delete(remove_entry))
}

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;

    #[derive(utoipa::OpenApi)]
    #[openapi(paths(
        create,
        list,
        get_by_id,
        delete_deck,
        change_visibility,
        set_description,
        upsert_entry,
        remove_entry
    ))]
    struct ApiDocs;

    ApiDocs::openapi()
}
