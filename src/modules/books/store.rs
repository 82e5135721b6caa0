//! In-memory book collection.
//!
//! Every operation validates before it touches the collection, so a failed call
//! leaves it exactly as it was.

use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::filter::BookFilter;
use super::ids::{IdSource, RandomIds};
use super::models::{Book, BookPayload, BookSummary};

/// Path segments routed next to `/books/{id}`; an id equal to one of these
/// could never be addressed.
pub const RESERVED_IDS: &[&str] = &["health"];

/// Store handle shared by the HTTP handlers; the lock spans whole operations.
pub type SharedStore = Arc<RwLock<BookStore>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book name is missing")]
    MissingName,

    #[error("readPage {read_page} exceeds pageCount {page_count}")]
    InvalidPageRange { page_count: u32, read_page: u32 },

    #[error("book '{0}' not found")]
    NotFound(String),

    #[error("book '{0}' could not be read back after insert")]
    InternalFailure(String),
}

pub struct BookStore {
    books: Vec<Book>,
    id_length: usize,
    ids: Box<dyn IdSource>,
}

impl BookStore {
    /// Empty store generating random ids of `id_length` characters.
    pub fn new(id_length: usize) -> Self {
        Self::with_id_source(id_length, RandomIds)
    }

    pub fn with_id_source(id_length: usize, ids: impl IdSource + 'static) -> Self {
        Self {
            books: Vec::new(),
            id_length,
            ids: Box::new(ids),
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Validate `payload`, append a new book and return its id.
    pub fn create(&mut self, payload: BookPayload) -> Result<String, StoreError> {
        let details = payload.validate()?;
        let id = self.fresh_id();

        self.books
            .push(Book::new(id.clone(), details, OffsetDateTime::now_utc()));

        if self.position(&id).is_none() {
            return Err(StoreError::InternalFailure(id));
        }

        tracing::debug!(book_id = %id, total = self.books.len(), "book created");
        Ok(id)
    }

    /// Projections of the matching books in insertion order.
    pub fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .iter()
            .filter(|book| filter.matches(book))
            .map(Book::summary)
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&Book, StoreError> {
        self.books
            .iter()
            .find(|book| book.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Replace every editable field of book `id`. An unknown id is reported
    /// before the payload is looked at.
    pub fn update(&mut self, id: &str, payload: BookPayload) -> Result<(), StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let details = payload.validate()?;

        self.books[index].replace(details, OffsetDateTime::now_utc());

        tracing::debug!(book_id = %id, "book updated");
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        // `remove` shifts the tail, keeping the remaining books in order.
        self.books.remove(index);

        tracing::debug!(book_id = %id, total = self.books.len(), "book deleted");
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id() == id)
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id(self.id_length);
            if RESERVED_IDS.contains(&id.as_str()) {
                tracing::warn!(book_id = %id, "generated book id is a reserved path segment");
                continue;
            }
            if self.position(&id).is_none() {
                return id;
            }
            tracing::warn!(book_id = %id, "generated book id collided, drawing another");
        }
    }
}
