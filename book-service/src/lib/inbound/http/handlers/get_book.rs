use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::BookId;
use crate::inbound::http::router::AppState;

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<BookResponseData>, ApiError> {
    let book_id = BookId::from_string(&id).map_err(|e| ApiError::from(BookError::from(e)))?;

    state
        .book_service
        .get_book(&book_id)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}

/// Public projection of a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookResponseData {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&Book> for BookResponseData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.0,
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            price: book.price,
            stock: book.stock,
            created_at: book.created_at,
            modified_at: book.modified_at,
        }
    }
}
