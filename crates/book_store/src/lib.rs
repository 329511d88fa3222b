//! User and book storage for Bookshelf
//!
//! This crate provides a storage abstraction over the `users` and `books`
//! collections. It ships an in-memory store (for tests and local runs) and a
//! MongoDB-backed store.

mod error;
mod memory;
mod mongo;
mod traits;

pub use error::*;
pub use memory::*;
pub use mongo::*;
pub use traits::*;

/// Number of books returned per page.
pub const BOOKS_PER_PAGE: u64 = 10;
