//! Loan management service

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{BookId, BorrowReceipt, LoanPolicy},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    policy: LoanPolicy,
}

impl LoansService {
    pub fn new(repository: Repository, policy: LoanPolicy) -> Self {
        Self { repository, policy }
    }

    /// Borrow a book for a student; returns the due date
    pub async fn borrow(&self, student_id: &str, book_id: BookId) -> AppResult<BorrowReceipt> {
        let receipt = self
            .repository
            .loans
            .borrow(student_id, book_id, &self.policy, Utc::now())
            .await?;

        tracing::info!(
            student_id,
            book_id,
            due_at = %receipt.due_at,
            "Book borrowed"
        );
        Ok(receipt)
    }

    /// Return a borrowed book
    pub async fn return_book(&self, student_id: &str, book_id: BookId) -> AppResult<()> {
        let now = Utc::now();
        let record = self
            .repository
            .loans
            .return_loan(student_id, book_id, now)
            .await?;

        if record.is_overdue(now) {
            tracing::info!(student_id, book_id, due_at = %record.due_at, "Book returned late");
        } else {
            tracing::info!(student_id, book_id, "Book returned");
        }
        Ok(())
    }
}
