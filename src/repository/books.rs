//! Catalog repository

use super::Store;
use crate::{
    error::{AppError, AppResult},
    models::{Book, BookId, CreateBook, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    store: Store,
}

impl BooksRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List the whole catalog in storage order
    pub async fn list(&self) -> Vec<Book> {
        self.store.read(|lib| lib.books.clone()).await
    }

    /// Books whose title or author contains `query`, ignoring case
    pub async fn search(&self, query: &str) -> Vec<Book> {
        let needle = query.to_lowercase();
        self.store.read(|lib| {
            lib.books
                .iter()
                .filter(|b| b.matches(&needle))
                .cloned()
                .collect()
        })
        .await
    }

    #[cfg(test)]
    pub async fn get_by_id(&self, id: BookId) -> AppResult<Book> {
        self.store
            .read(|lib| lib.book(id).cloned())
            .await
            .ok_or_else(AppError::book_not_found)
    }

    /// Add a book; it gets the next id and starts available
    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        self.store.transaction(|lib| {
            let book = Book {
                id: lib.next_book_id()?,
                title: data.title,
                author: data.author,
                category: data.category,
                available: true,
            };
            lib.books.push(book.clone());
            Ok(book)
        })
        .await
    }

    pub async fn update(&self, id: BookId, data: UpdateBook) -> AppResult<Book> {
        self.store.transaction(|lib| {
            let book = lib.book_mut(id).ok_or_else(AppError::book_not_found)?;
            data.apply(book);
            Ok(book.clone())
        })
        .await
    }

    /// Remove a book. A book on loan cannot be removed.
    pub async fn delete(&self, id: BookId) -> AppResult<()> {
        self.store.transaction(|lib| {
            let index = lib
                .books
                .iter()
                .position(|b| b.id == id)
                .ok_or_else(AppError::book_not_found)?;

            if lib.is_on_loan(id) {
                return Err(AppError::Conflict(
                    "Book is currently borrowed and cannot be deleted".to_string(),
                ));
            }

            lib.books.remove(index);
            Ok(())
        })
        .await
    }

    /// Set the availability flag directly.
    /// Releasing a book that a student still holds is rejected.
    pub async fn set_availability(&self, id: BookId, available: bool) -> AppResult<Book> {
        self.store.transaction(|lib| {
            let on_loan = lib.is_on_loan(id);
            let book = lib.book_mut(id).ok_or_else(AppError::book_not_found)?;

            if available && on_loan {
                return Err(AppError::Conflict(
                    "Book has an active borrow; return it instead".to_string(),
                ));
            }

            book.available = available;
            Ok(book.clone())
        })
        .await
    }
}
