//! Catalog management service

use crate::{
    error::AppResult,
    models::{Book, BookId, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Vec<Book> {
        self.repository.books.list().await
    }

    /// Case-insensitive substring search on title or author.
    /// An empty query returns the whole catalog.
    pub async fn search(&self, query: &str) -> Vec<Book> {
        self.repository.books.search(query).await
    }

    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        let book = self.repository.books.create(data).await?;
        tracing::info!(book_id = book.id, title = %book.title, "Book added");
        Ok(book)
    }

    pub async fn update(&self, id: BookId, data: UpdateBook) -> AppResult<Book> {
        let book = self.repository.books.update(id, data).await?;
        tracing::info!(book_id = id, "Book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: BookId) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    pub async fn set_availability(&self, id: BookId, available: bool) -> AppResult<Book> {
        let book = self.repository.books.set_availability(id, available).await?;
        tracing::info!(book_id = id, available, "Book availability changed");
        Ok(book)
    }
}
