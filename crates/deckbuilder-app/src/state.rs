use std::sync::Arc;

use deckbuilder_dal::Pool;
use deckbuilder_scryfall::ScryfallClient;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

// Empty validation context extracted by `axum_valid::Garde` for stateful
// routers; required by its `Context: FromRef<State>` bound when the garde
// validation uses the default `()` context.
impl axum::extract::FromRef<AppState> for () {
    fn from_ref(_: &AppState) -> Self {}
}

impl AppState {
    pub fn new(app_config: AppConfig, pool: Pool, scryfall: ScryfallClient) -> Self {
        AppState {
            state: Arc::new(AppStateInner {
                app_config,
                pool,
                scryfall,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.app_config
    }

    pub fn pool(&self) -> &Pool {
        &self.state.pool
    }

    pub fn scryfall(&self) -> &ScryfallClient {
        &self.state.scryfall
    }
}

struct AppStateInner {
    pool: Pool,
    scryfall: ScryfallClient,
    app_config: AppConfig,
}

pub struct AppConfig {
    pub default_page_size: u32,
}
