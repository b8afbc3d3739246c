use axum::response::{IntoResponse, Response};
use http::StatusCode;

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Validation error: {0}")]
    Validation(#[from] deckbuilder_types::ValidationError),

    #[error("Storage error: {0}")]
    Dal(#[from] deckbuilder_dal::Error),

    #[error("Card catalog error: {0}")]
    Scryfall(#[from] deckbuilder_scryfall::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Dal(deckbuilder_dal::Error::RecordNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Dal(deckbuilder_dal::Error::InvalidOrderByField(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Dal(_) | ApiError::Scryfall(_) | ApiError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!("API error: {self}");
        }
        (status, self.to_string()).into_response()
    }
}
