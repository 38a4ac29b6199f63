//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type BookId = i64;

/// Catalog entry as stored in the books document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub category: String,
    /// False while a student holds the book (or it has been withdrawn)
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Book {
    /// Case-insensitive substring match on title or author.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

/// New catalog entry
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub category: String,
}

/// Partial update; `None` and empty strings leave the field untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

impl UpdateBook {
    pub fn apply(self, book: &mut Book) {
        let fields = [
            (self.title, &mut book.title),
            (self.author, &mut book.author),
            (self.category, &mut book.category),
        ];
        for (value, slot) in fields {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *slot = value;
            }
        }
    }
}
