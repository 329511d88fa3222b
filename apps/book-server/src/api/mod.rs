//! API endpoints.

pub mod auth;
pub mod book;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use book_store::BookStore;

use crate::middleware::auth_middleware;
use crate::state::SharedState;

/// Creates the API router with all endpoints.
///
/// Book creation, update and deletion sit behind [`auth_middleware`]; the
/// remaining routes are public.
pub fn create_router<S: BookStore + 'static>(state: SharedState<S>) -> Router {
    let protected: Router<SharedState<S>> = Router::new()
        .route("/books", post(book::create_book::<S>))
        .route(
            "/books/:id",
            patch(book::update_book::<S>).delete(book::delete_book::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    Router::new()
        // Auth endpoints
        .route("/auth/signup", post(auth::sign_up::<S>))
        .route("/auth/login", post(auth::login::<S>))
        // Book endpoints
        .route("/books", get(book::get_all_books::<S>))
        .route("/books/:id", get(book::get_book::<S>))
        .merge(protected)
        // Health check
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
