use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::book::errors::BookIdError;

/// Book catalog record.
///
/// `deleted_at` is the soft-delete tombstone; repositories treat a set
/// tombstone as absence.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Book unique identifier type.
///
/// Numeric, generated by the database on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub i64);

impl BookId {
    /// Parse a book ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid integer
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        s.parse::<i64>()
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Insert payload for a new catalog record; the identifier and timestamps
/// are assigned by the database.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
}

/// Command to add a book to the catalog.
#[derive(Debug)]
pub struct CreateBookCommand {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
}

impl CreateBookCommand {
    pub fn new(title: String, author: String, description: String, price: i64, stock: i32) -> Self {
        Self {
            title,
            author,
            description,
            price,
            stock,
        }
    }
}
