//! HTTP handlers for the books module.
//!
//! Each handler validates its input first, then opens one pooled session for
//! its unit of work. The session returns to the pool when it drops, on every
//! exit path.

use axum::extract::State;
use bookstore_http::{ApiJson, ApiPath, ApiQuery, AppError};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};

use super::models::{Book, BookPayload, Message, SearchParams};
use super::repository;

pub const NOT_FOUND_MESSAGE: &str = "Book not found";
pub const DELETED_MESSAGE: &str = "Book deleted successfully";
pub const WELCOME_MESSAGE: &str = "Welcome to the Bookstore API";

/// Shared state of the books routes.
#[derive(Clone)]
pub struct BooksState {
    pool: SqlitePool,
}

impl BooksState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Acquire a session for one unit of work.
    async fn session(&self) -> Result<PoolConnection<Sqlite>, AppError> {
        Ok(self.pool.acquire().await?)
    }
}

pub async fn root() -> ApiJson<Message> {
    ApiJson(Message::new(WELCOME_MESSAGE))
}

pub async fn create_book(
    State(state): State<BooksState>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> Result<ApiJson<Book>, AppError> {
    let new_book = payload.validate()?;

    let mut conn = state.session().await?;
    let book = repository::insert(&mut conn, &new_book).await?;

    tracing::info!(book_id = book.id, title = %book.title, "book created");
    Ok(ApiJson(book))
}

pub async fn list_books(State(state): State<BooksState>) -> Result<ApiJson<Vec<Book>>, AppError> {
    let mut conn = state.session().await?;
    let books = repository::list_all(&mut conn).await?;
    Ok(ApiJson(books))
}

pub async fn get_book(
    State(state): State<BooksState>,
    ApiPath(book_id): ApiPath<i64>,
) -> Result<ApiJson<Book>, AppError> {
    let mut conn = state.session().await?;
    repository::get_by_id(&mut conn, book_id)
        .await?
        .map(ApiJson)
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))
}

pub async fn update_book(
    State(state): State<BooksState>,
    ApiPath(book_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> Result<ApiJson<Book>, AppError> {
    let fields = payload.validate()?;

    let mut conn = state.session().await?;
    let book = repository::update_by_id(&mut conn, book_id, &fields)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

    tracing::info!(book_id, "book updated");
    Ok(ApiJson(book))
}

pub async fn delete_book(
    State(state): State<BooksState>,
    ApiPath(book_id): ApiPath<i64>,
) -> Result<ApiJson<Message>, AppError> {
    let mut conn = state.session().await?;
    if !repository::delete_by_id(&mut conn, book_id).await? {
        return Err(AppError::not_found(NOT_FOUND_MESSAGE));
    }

    tracing::info!(book_id, "book deleted");
    Ok(ApiJson(Message::new(DELETED_MESSAGE)))
}

pub async fn search_books(
    State(state): State<BooksState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<ApiJson<Vec<Book>>, AppError> {
    let mut conn = state.session().await?;
    let books = repository::search_by_title(&mut conn, &params.q).await?;

    tracing::debug!(q = %params.q, matches = books.len(), "title search");
    Ok(ApiJson(books))
}
