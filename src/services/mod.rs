//! Business logic services

pub mod catalog;
pub mod loans;
pub mod students;

use crate::{config::LendingConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub students: students::StudentsService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, lending: &LendingConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            students: students::StudentsService::new(repository.clone(), lending.lenient_student_lookup),
            loans: loans::LoansService::new(repository, lending.into()),
        }
    }
}
