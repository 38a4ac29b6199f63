//! Whole in-memory state: catalog plus roster

use indexmap::IndexMap;

use crate::error::{AppError, AppResult};

use super::{
    book::{Book, BookId},
    student::Student,
};

/// Catalog and roster as one unit, so a mutation touching both
/// is persisted (or discarded) together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    pub books: Vec<Book>,
    /// Roster keyed by student id, in document order
    pub students: IndexMap<String, Student>,
    /// Highest book id ever handed out by this process or found on load
    last_book_id: BookId,
}

impl Library {
    pub fn new(books: Vec<Book>, students: impl IntoIterator<Item = Student>) -> Self {
        let last_book_id = books.iter().map(|b| b.id).max().unwrap_or(0);
        let students = students.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self {
            books,
            students,
            last_book_id,
        }
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn book_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id == id)
    }

    /// Reserve the next book id. Ids are never reissued, even after a delete.
    pub fn next_book_id(&mut self) -> AppResult<BookId> {
        let highest = self
            .last_book_id
            .max(self.books.iter().map(|b| b.id).max().unwrap_or(0));
        self.last_book_id = highest
            .checked_add(1)
            .ok_or_else(|| AppError::Internal("Book id space exhausted".to_string()))?;
        Ok(self.last_book_id)
    }

    /// Whether any student currently holds the book
    pub fn is_on_loan(&self, book_id: BookId) -> bool {
        self.students.values().any(|s| s.has_active_borrow(book_id))
    }
}
