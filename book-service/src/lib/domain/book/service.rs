use std::sync::Arc;

use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::BookId;
use crate::book::models::CreateBookCommand;
use crate::book::models::NewBook;
use crate::book::ports::BookRepository;
use crate::book::ports::BookServicePort;

/// Domain service implementation for catalog operations.
///
/// Pure passthrough over the repository; generic for testability.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        let book = NewBook {
            title: command.title,
            author: command.author,
            description: command.description,
            price: command.price,
            stock: command.stock,
        };

        let created_book = self.repository.create(book).await?;

        tracing::info!(book_id = %created_book.id, "Book added to catalog");

        Ok(created_book)
    }

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id.to_string()))
    }
}
