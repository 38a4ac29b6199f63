//! Persistence backends for the library state

use std::{
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Book, Library, Student};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load/save boundary between the in-memory state and its durable form
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the full catalog and roster
    async fn load(&self) -> Result<Library, StorageError>;

    /// Replace the stored catalog and roster with `library`
    async fn save(&self, library: &Library) -> Result<(), StorageError>;
}

/// Students document: the array layout is written, the map layout is
/// accepted on read.
#[derive(Deserialize)]
#[serde(untagged)]
enum StudentsDocument {
    List(Vec<Student>),
    Map(IndexMap<String, Student>),
}

impl StudentsDocument {
    fn into_students(self) -> Vec<Student> {
        match self {
            StudentsDocument::List(list) => list,
            StudentsDocument::Map(map) => map
                .into_iter()
                .map(|(id, mut student)| {
                    if student.id.is_empty() {
                        student.id = id;
                    }
                    student
                })
                .collect(),
        }
    }
}

/// Two flat JSON documents, rewritten wholesale on every save
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    books_path: PathBuf,
    students_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(books_path: impl Into<PathBuf>, students_path: impl Into<PathBuf>) -> Self {
        Self {
            books_path: books_path.into(),
            students_path: students_path.into(),
        }
    }

    async fn read_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StorageError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Document missing, starting empty");
                return Ok(T::default());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `path` with `suffix` appended to its file name
    fn sibling(path: &Path, suffix: &str) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Write `value` next to `path` and return the temporary file path
    async fn stage_document<T: Serialize + ?Sized>(
        path: &Path,
        value: &T,
    ) -> Result<PathBuf, StorageError> {
        let io_err = |source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        };

        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let staged = Self::sibling(path, ".tmp");
        tokio::fs::write(&staged, bytes).await.map_err(io_err)?;
        Ok(staged)
    }

    async fn commit_document(staged: &Path, path: &Path) -> Result<(), StorageError> {
        tokio::fs::rename(staged, path)
            .await
            .map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Copy the live document aside. `None` when there is no live document yet.
    async fn backup_document(path: &Path) -> Result<Option<PathBuf>, StorageError> {
        let backup = Self::sibling(path, ".bak");
        match tokio::fs::copy(path, &backup).await {
            Ok(_) => Ok(Some(backup)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                path: backup,
                source,
            }),
        }
    }

    /// Put the backed-up document back in place, or remove a document
    /// that did not exist before the save started
    async fn restore_document(backup: Option<&Path>, path: &Path) {
        let result = match backup {
            Some(backup) => tokio::fs::rename(backup, path).await,
            None => tokio::fs::remove_file(path).await,
        };
        if let Err(e) = result {
            tracing::error!(path = %path.display(), "Failed to restore document: {}", e);
        }
    }

    async fn discard<P: AsRef<Path>>(paths: &[P]) {
        for path in paths.iter().map(AsRef::as_ref) {
            if let Err(e) = tokio::fs::remove_file(path).await {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), "Failed to remove file: {}", e);
                }
            }
        }
    }
}

impl Default for StudentsDocument {
    fn default() -> Self {
        StudentsDocument::List(Vec::new())
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn load(&self) -> Result<Library, StorageError> {
        let books: Vec<Book> = Self::read_document(&self.books_path).await?;
        let students: StudentsDocument = Self::read_document(&self.students_path).await?;

        tracing::info!(
            books = books.len(),
            books_path = %self.books_path.display(),
            students_path = %self.students_path.display(),
            "Library documents loaded"
        );

        Ok(Library::new(books, students.into_students()))
    }

    async fn save(&self, library: &Library) -> Result<(), StorageError> {
        let students: Vec<&Student> = library.students.values().collect();

        // Stage both documents before touching either live file
        let books_staged = Self::stage_document(&self.books_path, &library.books).await?;
        let students_staged = match Self::stage_document(&self.students_path, &students).await {
            Ok(staged) => staged,
            Err(e) => {
                Self::discard(&[&books_staged]).await;
                return Err(e);
            }
        };

        // The live catalog is kept aside until the roster is committed too
        let backup = match Self::backup_document(&self.books_path).await {
            Ok(backup) => backup,
            Err(e) => {
                Self::discard(&[&books_staged, &students_staged]).await;
                return Err(e);
            }
        };

        if let Err(e) = Self::commit_document(&books_staged, &self.books_path).await {
            Self::discard(&[&books_staged, &students_staged]).await;
            if let Some(backup) = &backup {
                Self::discard(&[backup]).await;
            }
            return Err(e);
        }

        if let Err(e) = Self::commit_document(&students_staged, &self.students_path).await {
            Self::restore_document(backup.as_deref(), &self.books_path).await;
            Self::discard(&[&students_staged]).await;
            return Err(e);
        }

        if let Some(backup) = &backup {
            Self::discard(&[backup]).await;
        }

        tracing::debug!(books = library.books.len(), students = students.len(), "Library saved");
        Ok(())
    }
}

/// Process-local storage, used for tests and throwaway instances
#[derive(Debug, Default)]
pub struct MemoryStorage {
    library: Mutex<Library>,
}

impl MemoryStorage {
    pub fn new(library: Library) -> Self {
        Self {
            library: Mutex::new(library),
        }
    }

    /// Last saved state
    pub fn snapshot(&self) -> Library {
        self.library
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Library, StorageError> {
        Ok(self.snapshot())
    }

    async fn save(&self, library: &Library) -> Result<(), StorageError> {
        *self
            .library
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = library.clone();
        Ok(())
    }
}
