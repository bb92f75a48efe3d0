use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::NewBook;
use crate::domain::book::ports::BookRepository;

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape; converted into the domain `Book` after fetching.
#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    description: String,
    price: i64,
    stock: i32,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl BookRow {
    fn into_book(self) -> Book {
        Book {
            id: BookId(self.id),
            title: self.title,
            author: self.author,
            description: self.description,
            price: self.price,
            stock: self.stock,
            created_at: self.created_at,
            modified_at: self.modified_at,
            deleted_at: self.deleted_at,
        }
    }
}

const BOOK_COLUMNS: &str =
    "id, title, author, description, price, stock, created_at, modified_at, deleted_at";

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn create(&self, book: NewBook) -> Result<Book, BookError> {
        let query = format!(
            "INSERT INTO books (title, author, description, price, stock) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {BOOK_COLUMNS}"
        );

        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.description)
            .bind(book.price)
            .bind(book.stock)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(row.into_book())
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        let query = format!(
            "SELECT {BOOK_COLUMNS} FROM books \
             WHERE id = $1 AND deleted_at IS NULL"
        );

        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BookError::DatabaseError(e.to_string()))?;

        Ok(row.map(BookRow::into_book))
    }
}
