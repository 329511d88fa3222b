//! Bookshelf Server
//!
//! HTTP backend for user sign-up/login and a book catalogue. Handlers in
//! [`api`] validate requests and delegate to the services in [`services`],
//! which talk to a [`BookStore`].

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

use auth::JwtManager;
use axum::Router;
use book_store::BookStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::state::{SharedState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: BookStore + 'static>(state: SharedState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
///
/// Fails if the token settings are unusable.
pub fn create_state<S: BookStore>(config: &Config, store: S) -> anyhow::Result<SharedState<S>> {
    let jwt_manager = JwtManager::new(config.jwt_config())?;

    Ok(create_shared_state(store, jwt_manager))
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
