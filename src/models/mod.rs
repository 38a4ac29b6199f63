//! Data models for Shelf

pub mod book;
pub mod library;
pub mod loan;
pub mod student;

// Re-export commonly used types
pub use book::{Book, BookId, CreateBook, UpdateBook};
pub use library::Library;
pub use loan::{BorrowReceipt, LoanPolicy};
pub use student::{BorrowRecord, BorrowStatus, Student};
