//! Sign-up and login.

use std::sync::Arc;

use api_protocol::{
    requests::{LoginRequest, SignUpRequest},
    responses::TokenResponse,
};
use auth::{AuthResult, JwtManager};
use book_store::BookStore;
use entities::User;

use crate::error::{ServerError, ServerResult};

/// Same message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Registers users and exchanges credentials for access tokens.
pub struct AuthService<S> {
    store: Arc<S>,
    jwt_manager: JwtManager,
}

impl<S: BookStore> AuthService<S> {
    /// Creates a new auth service.
    pub fn new(store: Arc<S>, jwt_manager: JwtManager) -> Self {
        Self { store, jwt_manager }
    }

    /// Hashes the password, stores the user and returns a token for it.
    ///
    /// Fails with `Conflict` if the email is already registered.
    pub async fn sign_up(&self, request: SignUpRequest) -> ServerResult<TokenResponse> {
        let SignUpRequest {
            name,
            email,
            password,
        } = request;

        let password_hash = run_blocking(move || auth::hash_password(&password)).await?;

        let user = self
            .store
            .create_user(User::new(name, email, password_hash))
            .await
            .map_err(|e| {
                if e.is_already_exists() {
                    ServerError::Conflict("Duplicate email entered".to_string())
                } else {
                    e.into()
                }
            })?;

        tracing::info!(user_id = %user.id, "User signed up");

        self.issue_token(&user)
    }

    /// Checks the credentials and returns a token for the matching user.
    pub async fn login(&self, request: LoginRequest) -> ServerResult<TokenResponse> {
        let LoginRequest { email, password } = request;

        let Some(user) = self.store.get_user_by_email(&email).await? else {
            tracing::warn!("Login attempt for unknown email");
            return Err(ServerError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let password_hash = user.password.clone();
        let matched =
            run_blocking(move || auth::verify_password(&password, &password_hash)).await?;

        if !matched {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(ServerError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.issue_token(&user)
    }

    fn issue_token(&self, user: &User) -> ServerResult<TokenResponse> {
        let token = self.jwt_manager.generate_token(user.id)?;
        Ok(TokenResponse { token })
    }
}

/// Runs CPU-bound bcrypt work on the blocking pool.
async fn run_blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> AuthResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(format!("Blocking task failed: {e}")))?;
    Ok(result?)
}
