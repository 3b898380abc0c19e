//! Book list endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::book::{Book, BookQuery, CreateBook},
    AppState,
};

use super::{auth::MessageResponse, CurrentUser};

/// List the authenticated user's books with optional filters
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "The user's books", body = Vec<Book>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list(user_id, &query).await?;
    Ok(Json(books))
}

/// Add a book to the authenticated user's list
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = state.services.books.create(user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(book)))
}

/// Delete a book from the authenticated user's list.
///
/// Responds with the same confirmation whether or not a row was deleted,
/// so callers cannot probe for other users' book ids.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Deletion confirmed", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(user_id, id).await?;

    Ok(Json(MessageResponse {
        message: "Book deleted".to_string(),
    }))
}
