use crate::config::ServerConfig;
use crate::error::Result;
use axum::http::StatusCode;
use axum::{response::IntoResponse, routing::get, Json, Router};
use deckbuilder_app::state::{AppConfig, AppState};
use deckbuilder_scryfall::ScryfallClient;
use futures::FutureExt;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

pub async fn run(args: ServerConfig) -> Result<()> {
    let state = build_state(&args).await?;
    run_with_state(args, state).await
}

pub async fn run_with_state(args: ServerConfig, state: AppState) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_graceful_with_state(args, state, shutdown).await
}

pub async fn run_graceful_with_state<S>(
    args: ServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let mut app = main_router(state);

    if !args.no_cors {
        app = app.layer(tower_http::cors::CorsLayer::very_permissive());
    }

    let ip: std::net::IpAddr = args.listen_address.parse()?;
    let addr = std::net::SocketAddr::from((ip, args.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    debug!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

#[cfg(feature = "openapi")]
fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;

    #[derive(utoipa::OpenApi)]
    #[openapi(info(title = "DeckBuilder API"))]
    struct OpenApi;

    OpenApi::openapi()
        .nest("/api/decks", deckbuilder_app::rest_api::deck::api_docs())
        .nest("/api/cards", deckbuilder_app::rest_api::card::api_docs())
}

fn main_router(state: AppState) -> Router<()> {
    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/api/decks", deckbuilder_app::rest_api::deck::router())
        .nest("/api/cards", deckbuilder_app::rest_api::card::router())
        .with_state(state)
        .route("/health", get(health));

    #[cfg(feature = "openapi")]
    {
        let docs = api_docs();
        router = router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs),
        );
    }
    router
}

async fn health() -> impl IntoResponse {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "deckbuilder-server",
            "timestamp": timestamp,
        })),
    )
}

pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let data_dir = config.data_dir();
    if !data_dir.is_dir() {
        tokio::fs::create_dir_all(&data_dir).await?;
        info!("Created data directory {}", data_dir.display());
    }

    let pool = deckbuilder_dal::new_pool(&config.database_url()).await?;
    deckbuilder_dal::migrate(&pool).await?;

    let scryfall = ScryfallClient::new(config.scryfall_url.clone())?;

    let app_config = AppConfig {
        default_page_size: config.default_page_size,
    };

    Ok(AppState::new(app_config, pool, scryfall))
}
