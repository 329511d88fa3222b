//! Authentication API endpoints.

use api_protocol::{
    Validate,
    requests::{LoginRequest, SignUpRequest},
    responses::TokenResponse,
};
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use book_store::BookStore;

use crate::error::ServerResult;
use crate::state::SharedState;

/// Registers a user and returns an access token.
pub async fn sign_up<S: BookStore>(
    State(state): State<SharedState<S>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<TokenResponse>)> {
    let Json(request) = payload?;
    request.validate()?;

    let response = state.auth_service.sign_up(request).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchanges email and password for an access token.
pub async fn login<S: BookStore>(
    State(state): State<SharedState<S>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ServerResult<Json<TokenResponse>> {
    let Json(request) = payload?;
    request.validate()?;

    let response = state.auth_service.login(request).await?;

    Ok(Json(response))
}
