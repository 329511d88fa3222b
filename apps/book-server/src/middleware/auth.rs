//! Authentication middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use book_store::BookStore;
use entities::{ObjectId, User};

use crate::error::ServerError;
use crate::state::AppState;

const LOGIN_FIRST: &str = "Login first to access this endpoint.";

/// Authenticated user information.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID.
    pub id: ObjectId,
    /// User display name.
    pub name: String,
    /// User email.
    pub email: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Extracts the JWT token from the Authorization header.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn login_first() -> ServerError {
    ServerError::Unauthorized(LOGIN_FIRST.to_string())
}

/// Resolves the bearer token of a request to a stored user.
///
/// Every credential problem yields the same 401; only store failures
/// surface as something else.
async fn authenticate<S: BookStore>(
    state: &AppState<S>,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, ServerError> {
    let Some(token) = extract_token(headers) else {
        tracing::debug!("Missing bearer token");
        return Err(login_first());
    };

    let user_id = state
        .jwt_manager
        .validate_token(token)
        .and_then(|claims| claims.user_id())
        .map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            login_first()
        })?;

    let Some(user) = state.store.get_user(user_id).await? else {
        tracing::debug!(user_id = %user_id, "Token names a missing user");
        return Err(login_first());
    };

    Ok(user.into())
}

/// Authentication middleware.
///
/// Validates the bearer token, loads the user it names and stores an
/// [`AuthenticatedUser`] in the request extensions. Requests without a
/// valid token, or whose user no longer exists, get a 401.
pub async fn auth_middleware<S: BookStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let authenticated = authenticate(&state, request.headers()).await;

    match authenticated {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "Request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Request rejected by auth middleware");
            e.into_response()
        }
    }
}
