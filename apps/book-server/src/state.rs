//! Application state.

use std::sync::Arc;

use auth::JwtManager;
use book_store::BookStore;

use crate::services::{AuthService, BookService};

/// Shared application state.
pub struct AppState<S: BookStore> {
    /// User and book store.
    pub store: Arc<S>,
    /// JWT manager used to issue and check access tokens.
    pub jwt_manager: JwtManager,
    /// Sign-up and login.
    pub auth_service: AuthService<S>,
    /// Book CRUD.
    pub book_service: BookService<S>,
}

impl<S: BookStore> AppState<S> {
    /// Creates new application state.
    pub fn new(store: S, jwt_manager: JwtManager) -> Self {
        let store = Arc::new(store);
        Self {
            auth_service: AuthService::new(Arc::clone(&store), jwt_manager.clone()),
            book_service: BookService::new(Arc::clone(&store)),
            store,
            jwt_manager,
        }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from a store and token manager.
pub fn create_shared_state<S: BookStore>(store: S, jwt_manager: JwtManager) -> SharedState<S> {
    Arc::new(AppState::new(store, jwt_manager))
}
