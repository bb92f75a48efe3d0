use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::NewBook;

/// Port for book domain service operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Add a book to the catalog.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// Retrieve a book by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist or was soft-deleted
    /// * `DatabaseError` - Database operation failed
    async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;
}

/// Persistence operations for the book catalog.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Persist a new book and return it with the generated identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, book: NewBook) -> Result<Book, BookError>;

    /// Retrieve a book by identifier, ignoring soft-deleted records.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;
}
