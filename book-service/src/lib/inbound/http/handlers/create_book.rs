use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::book::models::Book;
use crate::book::models::CreateBookCommand;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<CreateBookRequest>,
) -> Result<ApiSuccess<CreateBookResponseData>, ApiError> {
    state
        .book_service
        .create_book(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

/// HTTP request body for adding a book (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookRequest {
    title: String,
    author: String,
    #[serde(default)]
    description: String,
    price: i64,
    stock: i32,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateBookRequestError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Author must not be empty")]
    EmptyAuthor,

    #[error("Price must not be negative")]
    NegativePrice,

    #[error("Stock must not be negative")]
    NegativeStock,
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, ParseCreateBookRequestError> {
        if self.title.trim().is_empty() {
            return Err(ParseCreateBookRequestError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(ParseCreateBookRequestError::EmptyAuthor);
        }
        if self.price < 0 {
            return Err(ParseCreateBookRequestError::NegativePrice);
        }
        if self.stock < 0 {
            return Err(ParseCreateBookRequestError::NegativeStock);
        }
        Ok(CreateBookCommand::new(
            self.title,
            self.author,
            self.description,
            self.price,
            self.stock,
        ))
    }
}

impl From<ParseCreateBookRequestError> for ApiError {
    fn from(err: ParseCreateBookRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Public projection of a freshly added book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateBookResponseData {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&Book> for CreateBookResponseData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.0,
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            price: book.price,
            stock: book.stock,
            created_at: book.created_at,
        }
    }
}
