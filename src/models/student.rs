//! Student and borrow record models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::BookId;

/// Lifecycle of a borrow record: `Borrowed` -> `Returned` (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BorrowStatus {
    Borrowed,
    Returned,
}

/// One borrow of one book by one student.
/// Title and author are snapshots taken at borrow time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub status: BorrowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    pub fn is_active(&self) -> bool {
        self.status == BorrowStatus::Borrowed
    }

    /// Past due at `now`, or, once returned, past due when it came back
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            BorrowStatus::Borrowed => self.due_at < now,
            BorrowStatus::Returned => self.returned_at.is_some_and(|at| self.due_at < at),
        }
    }

    /// Close the record. Only valid on an active record.
    pub fn mark_returned(&mut self, now: DateTime<Utc>) {
        debug_assert!(self.is_active());
        self.status = BorrowStatus::Returned;
        self.returned_at = Some(now);
    }
}

/// Student profile with borrow history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    /// May be omitted in the map-shaped students document, where the key is the id
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub borrowed: Vec<BorrowRecord>,
}

impl Student {
    /// Blank profile created on first borrow when auto-registration is on
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            email: String::new(),
            borrowed: Vec::new(),
        }
    }

    pub fn active_borrows(&self) -> impl Iterator<Item = &BorrowRecord> {
        self.borrowed.iter().filter(|r| r.is_active())
    }

    pub fn active_borrow_mut(&mut self, book_id: BookId) -> Option<&mut BorrowRecord> {
        self.borrowed
            .iter_mut()
            .find(|r| r.book_id == book_id && r.is_active())
    }

    pub fn has_active_borrow(&self, book_id: BookId) -> bool {
        self.active_borrows().any(|r| r.book_id == book_id)
    }
}
