pub mod adaptive;
pub mod config;
pub mod logging;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::state::AppState;

pub async fn create_app() -> axum::Router {
    create_app_with(&Config::from_env())
}

pub fn create_app_with(config: &Config) -> axum::Router {
    let engine = AppState::create_engine(config.adaptive.clone());
    app_for_state(AppState::new(engine))
}

pub fn app_for_state(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
