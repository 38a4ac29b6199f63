//! Repository layer: in-memory library state mirrored to storage

pub mod books;
pub mod loans;
pub mod storage;
pub mod students;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error::AppResult, models::Library};

use storage::Storage;

/// In-memory library state and its storage backend, shared by the
/// domain repositories
#[derive(Clone)]
pub struct Store {
    state: Arc<Mutex<Library>>,
    storage: Arc<dyn Storage>,
}

impl Store {
    /// Load the library from `storage` and keep it in memory
    pub async fn open(storage: Arc<dyn Storage>) -> AppResult<Self> {
        let library = storage.load().await?;
        Ok(Self {
            state: Arc::new(Mutex::new(library)),
            storage,
        })
    }

    /// Run a read-only query against the current state
    pub async fn read<T>(&self, f: impl FnOnce(&Library) -> T) -> T {
        let state = self.state.lock().await;
        f(&state)
    }

    /// Apply `f` to a working copy of the state and persist it.
    ///
    /// The working copy replaces the live state only once `f` succeeded
    /// and the save completed, so a failed mutation leaves both memory
    /// and storage untouched. Mutations are serialized by the state lock.
    pub async fn transaction<T>(&self, f: impl FnOnce(&mut Library) -> AppResult<T>) -> AppResult<T> {
        let mut state = self.state.lock().await;

        let mut working = state.clone();
        let result = f(&mut working)?;

        self.storage.save(&working).await?;
        *state = working;

        Ok(result)
    }
}

/// Main repository struct holding the shared store and the domain repositories
#[derive(Clone)]
pub struct Repository {
    pub store: Store,
    pub books: books::BooksRepository,
    pub students: students::StudentsRepository,
    pub loans: loans::LoansRepository,
}

impl Repository {
    /// Create a repository over an already opened store
    pub fn new(store: Store) -> Self {
        Self {
            books: books::BooksRepository::new(store.clone()),
            students: students::StudentsRepository::new(store.clone()),
            loans: loans::LoansRepository::new(store.clone()),
            store,
        }
    }

    /// Load the library from `storage` and build the repositories
    pub async fn open(storage: Arc<dyn Storage>) -> AppResult<Self> {
        Ok(Self::new(Store::open(storage).await?))
    }
}
