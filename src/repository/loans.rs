//! Lending workflow: borrow and return across catalog and roster

use chrono::{DateTime, Utc};

use super::Store;
use crate::{
    error::{AppError, AppResult},
    models::{BookId, BorrowReceipt, BorrowRecord, BorrowStatus, LoanPolicy, Student},
};

#[derive(Clone)]
pub struct LoansRepository {
    store: Store,
}

impl LoansRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Lend a book to a student.
    ///
    /// Checks run in order: book exists, book available, student resolves
    /// (or is registered when the policy allows it), student does not
    /// already hold the book, active-borrow cap. Book and roster changes
    /// are persisted together.
    pub async fn borrow(
        &self,
        student_id: &str,
        book_id: BookId,
        policy: &LoanPolicy,
        now: DateTime<Utc>,
    ) -> AppResult<BorrowReceipt> {
        self.store.transaction(|lib| {
            let book = lib.book(book_id).ok_or_else(AppError::book_not_found)?;
            if !book.available {
                return Err(AppError::Conflict("Book already issued".to_string()));
            }
            let (title, author) = (book.title.clone(), book.author.clone());

            if !lib.students.contains_key(student_id) {
                if !policy.auto_register_students {
                    return Err(AppError::student_not_found());
                }
                tracing::info!(student_id, "Registering student on first borrow");
                lib.students
                    .insert(student_id.to_string(), Student::placeholder(student_id));
            }

            let student = lib
                .students
                .get_mut(student_id)
                .ok_or_else(AppError::student_not_found)?;

            if student.has_active_borrow(book_id) {
                return Err(AppError::Conflict(
                    "Student already has this book borrowed".to_string(),
                ));
            }

            if let Some(max) = policy.max_active_borrows {
                if student.active_borrows().count() >= max {
                    return Err(AppError::LimitExceeded(format!(
                        "Borrow limit reached ({})",
                        max
                    )));
                }
            }

            let due_at = now + policy.loan_period;
            student.borrowed.push(BorrowRecord {
                book_id,
                title,
                author,
                borrowed_at: now,
                due_at,
                status: BorrowStatus::Borrowed,
                returned_at: None,
            });

            if let Some(book) = lib.book_mut(book_id) {
                book.available = false;
            }

            Ok(BorrowReceipt {
                borrowed_at: now,
                due_at,
            })
        })
        .await
    }

    /// Close the student's active borrow of a book and release the book
    pub async fn return_loan(
        &self,
        student_id: &str,
        book_id: BookId,
        now: DateTime<Utc>,
    ) -> AppResult<BorrowRecord> {
        self.store.transaction(|lib| {
            if lib.book(book_id).is_none() {
                return Err(AppError::book_not_found());
            }

            let student = lib
                .students
                .get_mut(student_id)
                .ok_or_else(AppError::student_not_found)?;

            let record = student.active_borrow_mut(book_id).ok_or_else(|| {
                AppError::InvalidState("No active borrow found for this book".to_string())
            })?;
            record.mark_returned(now);
            let record = record.clone();

            if let Some(book) = lib.book_mut(book_id) {
                book.available = true;
            }

            Ok(record)
        })
        .await
    }
}
