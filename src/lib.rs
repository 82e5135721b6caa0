//! Bookshelf application library
//!
//! In-memory book catalogue served over HTTP, plus the bootstrap that wires it
//! into the kernel and HTTP crates.

pub mod app;
pub mod modules;

/// Re-export commonly used types
pub use modules::books::{
    filter::BookFilter,
    models::{Book, BookPayload, BookSummary},
    store::{BookStore, SharedStore, StoreError},
};
