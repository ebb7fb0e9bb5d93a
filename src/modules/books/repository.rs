//! Book persistence: the store seam and the repository that validates around it.

use std::sync::Arc;

use async_trait::async_trait;
use libris_http::AppError;
use thiserror::Error;

use super::models::{Book, MissingFields, NewBook};

/// Raw document-store operations on the books collection.
///
/// Implementations do no validation; ids they cannot resolve (including
/// malformed ones) are reported as `None` / `false`.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Book>>;

    async fn insert(&self, book: NewBook) -> anyhow::Result<Book>;

    /// Replace all four fields, returning the record as it is after the write.
    async fn replace(&self, id: &str, book: NewBook) -> anyhow::Result<Option<Book>>;

    /// Returns whether a record was removed.
    async fn remove(&self, id: &str) -> anyhow::Result<bool>;
}

#[derive(Debug, Error)]
pub enum BookError {
    #[error("{}", .0.message())]
    Validation(MissingFields),

    #[error("book '{id}' not found")]
    NotFound { id: String },

    #[error("document store failure")]
    Store(#[source] anyhow::Error),
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::Validation(missing) => {
                AppError::validation(missing.details(), missing.message())
            }
            BookError::NotFound { .. } => AppError::not_found("Book not found"),
            BookError::Store(source) => AppError::store(source),
        }
    }
}

/// CRUD over the books collection with presence checks in front of every write.
#[derive(Clone)]
pub struct BookRepository {
    store: Arc<dyn BookStore>,
}

impl BookRepository {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Book>, BookError> {
        self.store.list().await.map_err(BookError::Store)
    }

    pub async fn create(&self, book: NewBook) -> Result<Book, BookError> {
        check_present(&book)?;

        let created = self.store.insert(book).await.map_err(BookError::Store)?;
        tracing::info!(book_id = %created.id, "book created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, book: NewBook) -> Result<Book, BookError> {
        check_present(&book)?;

        match self.store.replace(id, book).await.map_err(BookError::Store)? {
            Some(updated) => {
                tracing::info!(book_id = %id, "book updated");
                Ok(updated)
            }
            None => Err(BookError::NotFound { id: id.to_string() }),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), BookError> {
        if self.store.remove(id).await.map_err(BookError::Store)? {
            tracing::info!(book_id = %id, "book deleted");
            Ok(())
        } else {
            Err(BookError::NotFound { id: id.to_string() })
        }
    }
}

fn check_present(book: &NewBook) -> Result<(), BookError> {
    let blank = book.blank_fields();
    if blank.is_empty() {
        Ok(())
    } else {
        Err(BookError::Validation(MissingFields(blank)))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-process stores standing in for MongoDB in tests.

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryBookStore {
        books: Mutex<Vec<Book>>,
        next_id: AtomicUsize,
        pub calls: AtomicUsize,
    }

    impl MemoryBookStore {
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn len(&self) -> usize {
            self.books.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BookStore for MemoryBookStore {
        async fn list(&self) -> anyhow::Result<Vec<Book>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.books.lock().unwrap().clone())
        }

        async fn insert(&self, book: NewBook) -> anyhow::Result<Book> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let id = format!("{:024x}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            let book = Book::from_new(id, book);
            self.books.lock().unwrap().push(book.clone());
            Ok(book)
        }

        async fn replace(&self, id: &str, book: NewBook) -> anyhow::Result<Option<Book>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut books = self.books.lock().unwrap();
            Ok(books.iter_mut().find(|b| b.id == id).map(|existing| {
                *existing = Book::from_new(id, book);
                existing.clone()
            }))
        }

        async fn remove(&self, id: &str) -> anyhow::Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut books = self.books.lock().unwrap();
            let before = books.len();
            books.retain(|b| b.id != id);
            Ok(books.len() != before)
        }
    }

    /// Every call fails as if the server went away.
    pub struct UnreachableStore;

    #[async_trait]
    impl BookStore for UnreachableStore {
        async fn list(&self) -> anyhow::Result<Vec<Book>> {
            anyhow::bail!("server selection timeout: mongodb://10.0.0.7:27017")
        }

        async fn insert(&self, _book: NewBook) -> anyhow::Result<Book> {
            anyhow::bail!("server selection timeout: mongodb://10.0.0.7:27017")
        }

        async fn replace(&self, _id: &str, _book: NewBook) -> anyhow::Result<Option<Book>> {
            anyhow::bail!("server selection timeout: mongodb://10.0.0.7:27017")
        }

        async fn remove(&self, _id: &str) -> anyhow::Result<bool> {
            anyhow::bail!("server selection timeout: mongodb://10.0.0.7:27017")
        }
    }

    pub fn dune() -> NewBook {
        NewBook {
            title: "Dune".into(),
            author: "Herbert".into(),
            year: 1965.into(),
            genre: "SciFi".into(),
        }
    }
}
