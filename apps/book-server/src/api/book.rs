//! Book API endpoints.

use api_protocol::{
    Validate,
    requests::{CreateBookRequest, ListBooksQuery, UpdateBookRequest},
    responses::{Book, DeleteBookResponse},
};
use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use book_store::BookStore;

use crate::error::ServerResult;
use crate::middleware::AuthenticatedUser;
use crate::state::SharedState;

/// Lists one page of books, optionally filtered by title keyword.
pub async fn get_all_books<S: BookStore>(
    State(state): State<SharedState<S>>,
    query: Result<Query<ListBooksQuery>, QueryRejection>,
) -> ServerResult<Json<Vec<Book>>> {
    let Query(query) = query?;

    let books = state.book_service.find_all(&query).await?;

    Ok(Json(books.iter().map(Book::from).collect()))
}

/// Creates a book owned by the authenticated user.
pub async fn create_book<S: BookStore>(
    State(state): State<SharedState<S>>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<Book>)> {
    let Json(request) = payload?;
    request.validate()?;

    let book = state.book_service.create(request, &user).await?;

    Ok((StatusCode::CREATED, Json(book.into())))
}

/// Gets a book by ID.
pub async fn get_book<S: BookStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<Book>> {
    let book = state.book_service.find_by_id(&id).await?;

    Ok(Json(book.into()))
}

/// Applies a partial update to a book.
pub async fn update_book<S: BookStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> ServerResult<Json<Book>> {
    let Json(request) = payload?;
    request.validate()?;

    let book = state.book_service.update_by_id(&id, request).await?;

    Ok(Json(book.into()))
}

/// Deletes a book.
pub async fn delete_book<S: BookStore>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> ServerResult<Json<DeleteBookResponse>> {
    state.book_service.delete_by_id(&id).await?;

    Ok(Json(DeleteBookResponse { deleted: true }))
}
