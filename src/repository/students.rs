//! Student roster repository

use super::Store;
use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, Student},
};

#[derive(Clone)]
pub struct StudentsRepository {
    store: Store,
}

impl StudentsRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn find(&self, id: &str) -> Option<Student> {
        self.store.read(|lib| lib.students.get(id).cloned()).await
    }

    /// Get a student profile with its full borrow history
    pub async fn get_by_id(&self, id: &str) -> AppResult<Student> {
        self.find(id)
            .await
            .ok_or_else(AppError::student_not_found)
    }

    /// Borrow history of a student, oldest first
    pub async fn borrowed(&self, id: &str) -> AppResult<Vec<BorrowRecord>> {
        self.store
            .read(|lib| lib.students.get(id).map(|s| s.borrowed.clone()))
            .await
            .ok_or_else(AppError::student_not_found)
    }
}
