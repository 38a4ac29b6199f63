//! Student roster service

use crate::{
    error::AppResult,
    models::{BorrowRecord, Student},
    repository::Repository,
};

/// Answer to a profile lookup
#[derive(Debug)]
pub enum StudentLookup {
    Found(Student),
    /// Unknown id under lenient lookup
    Unknown,
}

#[derive(Clone)]
pub struct StudentsService {
    repository: Repository,
    lenient_lookup: bool,
}

impl StudentsService {
    pub fn new(repository: Repository, lenient_lookup: bool) -> Self {
        Self {
            repository,
            lenient_lookup,
        }
    }

    /// Profile and borrow list. Unknown ids are `NotFound` unless lenient
    /// lookup is configured.
    pub async fn get_student(&self, id: &str) -> AppResult<StudentLookup> {
        if self.lenient_lookup {
            return Ok(match self.repository.students.find(id).await {
                Some(student) => StudentLookup::Found(student),
                None => StudentLookup::Unknown,
            });
        }
        self.repository
            .students
            .get_by_id(id)
            .await
            .map(StudentLookup::Found)
    }

    pub async fn get_borrowed(&self, id: &str) -> AppResult<Vec<BorrowRecord>> {
        self.repository.students.borrowed(id).await
    }
}
